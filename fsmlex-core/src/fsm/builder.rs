//! 状态图构建器
//!
//! [`GraphBuilder`] keeps a "current node" and grows the graph from it.
//! Nothing is written to a [`Graph`] until [`GraphBuilder::build`], so a
//! node can still be made accepting after edges have been added to it.
//!
//! ```
//! use fsmlex_core::{GraphBuilder, ScanOptions, TokenKind, TransitionCheck};
//!
//! #[derive(Debug, Clone, PartialEq, Default)]
//! enum Kind {
//!     #[default]
//!     None,
//!     Number,
//! }
//! impl TokenKind for Kind {}
//!
//! let mut builder = GraphBuilder::new();
//! builder.transition(TransitionCheck::range('0', '9')).end(Kind::Number);
//! let digits = builder.current();
//! builder.transition_to(TransitionCheck::range('0', '9'), digits).unwrap();
//!
//! let mut lexer = builder.build_lexer(ScanOptions::default());
//! let source: Vec<char> = "2024".chars().collect();
//! assert_eq!(lexer.run(&source).unwrap().token.text, "2024");
//! ```

use super::check::{CharCheck, TransitionCheck};
use super::engine::FsmLexer;
use super::error::GraphBuildError;
use super::graph::{Graph, NodeAction, NodeCallback, Transition};
use super::matching::FsmMatch;
use super::types::{NodeId, TokenKind, START_NODE};
use fsmlex_config::ScanOptions;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the match property holding the delimiter of a string literal
pub const DELIMITER_PROPERTY: &str = "delimiter";

pub struct GraphBuilder<K> {
    values: Vec<Option<K>>,
    transitions: Vec<Transition>,
    actions: Vec<(NodeId, NodeAction)>,
    callbacks: Vec<(NodeId, NodeCallback<K>)>,
    marks: HashMap<String, NodeId>,
    current: NodeId,
    string_delimiter: char,
}

impl<K: TokenKind> GraphBuilder<K> {
    pub fn new() -> Self {
        Self {
            values: vec![None],
            transitions: Vec::new(),
            actions: Vec::new(),
            callbacks: Vec::new(),
            marks: HashMap::new(),
            current: START_NODE,
            string_delimiter: ScanOptions::default().string_delimiter,
        }
    }

    /// Delimiter used by [`Self::string`]
    pub fn with_string_delimiter(mut self, delimiter: char) -> Self {
        self.string_delimiter = delimiter;
        self
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    /// Add a detached node without moving
    pub fn node(&mut self, value: Option<K>) -> NodeId {
        let id = self.values.len();
        self.values.push(value);
        id
    }

    /// Add a new node reached from the current one, and move to it
    pub fn transition(&mut self, check: impl Into<TransitionCheck>) -> &mut Self {
        let to = self.node(None);
        self.transitions
            .push(Transition::new(self.current, to, check.into()));
        self.current = to;
        self
    }

    /// Add an edge from the current node to `to`, and move to `to`.
    ///
    /// `to` must be a node this builder already created.
    pub fn transition_to(
        &mut self,
        check: impl Into<TransitionCheck>,
        to: NodeId,
    ) -> Result<&mut Self, GraphBuildError> {
        if to >= self.values.len() {
            return Err(GraphBuildError::InvalidNodeId(to));
        }
        Ok(self.edge_to(check, to))
    }

    /// 内部使用：目标节点由构建器自己创建，无需检查
    fn edge_to(&mut self, check: impl Into<TransitionCheck>, to: NodeId) -> &mut Self {
        self.transitions
            .push(Transition::new(self.current, to, check.into()));
        self.current = to;
        self
    }

    /// Make the current node accepting
    pub fn end(&mut self, kind: K) -> &mut Self {
        if let Some(value) = self.values.get_mut(self.current) {
            *value = Some(kind);
        }
        self
    }

    pub fn mark(&mut self, name: impl Into<String>) -> &mut Self {
        self.marks.insert(name.into(), self.current);
        self
    }

    pub fn mark_of(&self, name: &str) -> Option<NodeId> {
        self.marks.get(name).copied()
    }

    pub fn goto(&mut self, name: &str) -> Result<&mut Self, GraphBuildError> {
        let id = self
            .mark_of(name)
            .ok_or_else(|| GraphBuildError::UnknownMark(name.to_string()))?;
        self.current = id;
        Ok(self)
    }

    pub fn goto_node(&mut self, id: NodeId) -> Result<&mut Self, GraphBuildError> {
        if id >= self.values.len() {
            return Err(GraphBuildError::InvalidNodeId(id));
        }
        self.current = id;
        Ok(self)
    }

    pub fn goto_start(&mut self) -> &mut Self {
        self.current = START_NODE;
        self
    }

    /// Set the action of the current node
    pub fn action<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.actions.push((self.current, Arc::new(f)));
        self
    }

    /// Set the callback of the current node
    pub fn callback<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(FsmMatch<K>) -> FsmMatch<K> + Send + Sync + 'static,
    {
        self.callbacks.push((self.current, Arc::new(f)));
        self
    }

    /// Fixed text from the start node, sharing plain character edges with
    /// keywords added before (`=` then `==` reuse the `=` node).
    pub fn keyword(&mut self, text: &str, kind: K) -> Result<&mut Self, GraphBuildError> {
        if text.is_empty() {
            return Err(GraphBuildError::EmptyCharSequence);
        }
        self.current = START_NODE;
        for c in text.chars() {
            match self.char_edge(self.current, c) {
                Some(next) => self.current = next,
                None => {
                    self.transition(c);
                }
            }
        }
        self.end(kind);
        self.current = START_NODE;
        Ok(self)
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`
    pub fn identifier(&mut self, kind: K) -> &mut Self {
        self.identifier_node(kind);
        self
    }

    /// Identifiers whose text names a keyword get the keyword's kind.
    ///
    /// Keywords are resolved by a callback on the identifier node rather
    /// than by separate branches, so `letter` is not cut at `let`.
    pub fn identifier_with_keywords(&mut self, kind: K, keywords: Vec<(String, K)>) -> &mut Self {
        let node = self.identifier_node(kind);
        let keywords: HashMap<String, K> = keywords.into_iter().collect();
        self.callbacks.push((
            node,
            Arc::new(move |mut m: FsmMatch<K>| {
                if let Some(kind) = keywords.get(&m.token.text) {
                    m.token.kind = kind.clone();
                }
                m
            }),
        ));
        self
    }

    fn identifier_node(&mut self, kind: K) -> NodeId {
        let start = TransitionCheck::new(CharCheck::predicate(|c| {
            c.is_ascii_alphabetic() || c == '_'
        }));
        let rest = TransitionCheck::new(CharCheck::predicate(|c| {
            c.is_ascii_alphanumeric() || c == '_'
        }));
        self.current = START_NODE;
        self.transition(start).end(kind);
        let node = self.current;
        self.edge_to(rest, node);
        self.current = START_NODE;
        node
    }

    /// `[0-9]+`
    pub fn integer(&mut self, kind: K) -> &mut Self {
        self.current = START_NODE;
        self.transition(TransitionCheck::range('0', '9')).end(kind);
        let node = self.current;
        self.edge_to(TransitionCheck::range('0', '9'), node);
        self.current = START_NODE;
        self
    }

    /// Delimited string literal with `\` escapes.
    ///
    /// The token text is the unescaped content between the delimiters; the
    /// delimiter is stored under [`DELIMITER_PROPERTY`].
    pub fn string(&mut self, kind: K) -> &mut Self {
        let delimiter = self.string_delimiter;
        self.current = START_NODE;

        // 开引号：进入字符串体时去掉
        self.transition(delimiter).action(move |value| {
            value
                .strip_prefix(delimiter)
                .unwrap_or(value)
                .to_string()
        });
        let body = self.current;

        self.transition('\\')
            .edge_to(TransitionCheck::any(), body);

        self.current = body;
        self.edge_to(
            CharCheck::AnyOf(vec![CharCheck::Char(delimiter), CharCheck::Char('\\')]).negate(),
            body,
        );

        self.transition(delimiter).end(kind).callback(move |mut m: FsmMatch<K>| {
            let raw = m
                .token
                .text
                .strip_suffix(delimiter)
                .unwrap_or(&m.token.text);
            m.token.text = unescape(raw);
            m.with_property(DELIMITER_PROPERTY, delimiter.to_string())
        });

        self.current = START_NODE;
        self
    }

    /// `/* ... */` block comment.
    ///
    /// The closing `/` is only taken once the body has produced a `*`
    /// after the opening `/*`, checked through a precondition.
    pub fn block_comment(&mut self, kind: K) -> &mut Self {
        self.current = START_NODE;
        self.transition('/').transition('*');
        let body = self.current;
        self.transition(
            TransitionCheck::char('/').with_precondition(|value| value.len() > 2 && value.ends_with('*')),
        )
        .end(kind);
        self.current = body;
        self.edge_to(TransitionCheck::any(), body);
        self.current = START_NODE;
        self
    }

    /// `\n`, `\r` or `\r\n` as a single token
    pub fn end_of_line(&mut self, kind: K) -> &mut Self {
        self.current = START_NODE;
        self.transition('\n').end(kind.clone());
        self.current = START_NODE;
        self.transition('\r').end(kind.clone()).transition('\n').end(kind);
        self.current = START_NODE;
        self
    }

    fn char_edge(&self, from: NodeId, c: char) -> Option<NodeId> {
        self.transitions
            .iter()
            .find(|t| {
                t.from == from
                    && !t.check.has_precondition()
                    && matches!(t.check.char_check(), CharCheck::Char(x) if *x == c)
            })
            .map(|t| t.to)
    }

    pub fn build(self) -> Graph<K> {
        let mut graph = Graph::empty();
        for value in self.values {
            graph.add_node(value);
        }
        for transition in self.transitions {
            graph.add_transition(transition);
        }
        for (id, action) in self.actions {
            graph.set_shared_action(id, action);
        }
        for (id, callback) in self.callbacks {
            graph.set_shared_callback(id, callback);
        }
        graph
    }

    pub fn build_lexer(self, options: ScanOptions) -> FsmLexer<K> {
        FsmLexer::new(self.build(), options)
    }
}

impl<K: TokenKind> Default for GraphBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve `\x` escapes to `x`
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::LexicalError;

    #[derive(Debug, Clone, PartialEq, Default)]
    enum Kind {
        #[default]
        None,
        Equal,
        DoubleEqual,
        Ident,
        Let,
        Int,
        Str,
        Comment,
        Eol,
    }

    impl TokenKind for Kind {}

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn scan_one(builder: GraphBuilder<Kind>, input: &str) -> Result<FsmMatch<Kind>, LexicalError> {
        let mut lexer = builder.build_lexer(ScanOptions::default());
        lexer.run(&chars(input))
    }

    #[test]
    fn test_keyword_shares_prefix() {
        let mut builder = GraphBuilder::new();
        builder.keyword("=", Kind::Equal).unwrap();
        builder.keyword("==", Kind::DoubleEqual).unwrap();
        // start + '=' + second '='
        assert_eq!(builder.values.len(), 3);

        let graph = builder.build();
        let mut lexer = FsmLexer::new(graph, ScanOptions::default());
        let src = chars("===");
        assert_eq!(lexer.run(&src).unwrap().token.kind, Kind::DoubleEqual);
        assert_eq!(lexer.run(&src).unwrap().token.kind, Kind::Equal);
    }

    #[test]
    fn test_empty_keyword() {
        let mut builder: GraphBuilder<Kind> = GraphBuilder::new();
        assert_eq!(
            builder.keyword("", Kind::Equal).err(),
            Some(GraphBuildError::EmptyCharSequence)
        );
    }

    #[test]
    fn test_marks() {
        let mut builder: GraphBuilder<Kind> = GraphBuilder::new();
        builder.transition('a').mark("after_a");
        let after_a = builder.current();
        builder.goto_start();
        assert_eq!(builder.current(), START_NODE);
        builder.goto("after_a").unwrap();
        assert_eq!(builder.current(), after_a);
        assert_eq!(
            builder.goto("nowhere").err(),
            Some(GraphBuildError::UnknownMark("nowhere".to_string()))
        );
        assert_eq!(builder.goto_node(42).err(), Some(GraphBuildError::InvalidNodeId(42)));
    }

    #[test]
    fn test_transition_to_unknown_node() {
        let mut builder: GraphBuilder<Kind> = GraphBuilder::new();
        assert_eq!(
            builder.transition_to('a', 7).err(),
            Some(GraphBuildError::InvalidNodeId(7))
        );
        // 失败时不加边，当前节点不变
        assert_eq!(builder.current(), START_NODE);
        builder.end(Kind::Ident);

        let graph = builder.build();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.transitions(START_NODE).is_empty());
    }

    #[test]
    fn test_transition_to_loops_back() {
        let mut builder = GraphBuilder::new();
        builder.transition('a').end(Kind::Ident);
        let a = builder.current();
        builder.transition('b').transition_to('a', a).unwrap();
        assert_eq!(builder.current(), a);

        let mut lexer = builder.build_lexer(ScanOptions::default());
        assert_eq!(lexer.run(&chars("ababa")).unwrap().token.text, "ababa");
    }

    #[test]
    fn test_identifier_with_keywords() {
        let mut builder = GraphBuilder::new();
        builder.identifier_with_keywords(Kind::Ident, vec![("let".to_string(), Kind::Let)]);
        let graph = builder.build();
        let mut lexer = FsmLexer::new(graph, ScanOptions::skip_blanks());
        let src = chars("let letter _x1");
        let first = lexer.run(&src).unwrap();
        assert_eq!(first.token.kind, Kind::Let);
        let second = lexer.run(&src).unwrap();
        assert_eq!(second.token.kind, Kind::Ident);
        assert_eq!(second.token.text, "letter");
        let third = lexer.run(&src).unwrap();
        assert_eq!(third.token.text, "_x1");
    }

    #[test]
    fn test_integer() {
        let mut builder = GraphBuilder::new();
        builder.integer(Kind::Int);
        let m = scan_one(builder, "0042x").unwrap();
        assert_eq!(m.token.kind, Kind::Int);
        assert_eq!(m.token.text, "0042");
    }

    #[test]
    fn test_string_strips_delimiters() {
        let mut builder = GraphBuilder::new();
        builder.string(Kind::Str);
        let m = scan_one(builder, r#""hello" rest"#).unwrap();
        assert_eq!(m.token.kind, Kind::Str);
        assert_eq!(m.token.text, "hello");
        assert_eq!(
            m.property(DELIMITER_PROPERTY),
            Some(&serde_json::Value::from("\""))
        );
    }

    #[test]
    fn test_string_escapes() {
        let mut builder = GraphBuilder::new();
        builder.string(Kind::Str);
        let m = scan_one(builder, r#""say \"hi\"\n""#).unwrap();
        assert_eq!(m.token.text, "say \"hi\"\n");
    }

    #[test]
    fn test_string_custom_delimiter() {
        let mut builder = GraphBuilder::new().with_string_delimiter('\'');
        builder.string(Kind::Str);
        let m = scan_one(builder, "'it\\'s'").unwrap();
        assert_eq!(m.token.text, "it's");
    }

    #[test]
    fn test_unterminated_string_fails() {
        let mut builder = GraphBuilder::new();
        builder.string(Kind::Str);
        let m = scan_one(builder, "\"open").unwrap();
        assert!(!m.is_success);
    }

    #[test]
    fn test_block_comment_precondition() {
        let mut builder = GraphBuilder::new();
        builder.block_comment(Kind::Comment);
        let graph = builder.build();

        let mut lexer = FsmLexer::new(graph, ScanOptions::default());
        let m = lexer.run_from(&chars("/* a */b"), 0).unwrap();
        assert_eq!(m.token.text, "/* a */");
        assert_eq!(lexer.cursor().position, 7);

        let m = lexer.run_from(&chars("/**/"), 0).unwrap();
        assert_eq!(m.token.text, "/**/");

        // "/*/" is not closed: the '/' right after "/*" must not end it
        assert!(!lexer.run_from(&chars("/*/"), 0).unwrap().is_success);
    }

    #[test]
    fn test_end_of_line_token() {
        let mut builder = GraphBuilder::new();
        builder.end_of_line(Kind::Eol);
        let m = scan_one(builder, "\r\nx").unwrap();
        assert_eq!(m.token.kind, Kind::Eol);
        assert_eq!(m.token.text, "\r\n");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\tb"), "a\tb");
        assert_eq!(unescape(r"\\"), "\\");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }
}
