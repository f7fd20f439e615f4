//! 测试辅助工具
//!
//! Token kinds and small graphs shared by the integration tests

#![allow(dead_code)]

use fsmlex_core::{FsmLexer, Graph, ScanOptions, TokenKind, Transition, TransitionCheck, START_NODE};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Kind {
    #[default]
    None,
    A,
    Ab,
    Digit,
    AnyChar,
    Number,
    Ident,
    Str,
    Eol,
}

impl TokenKind for Kind {
    fn is_end_of_line(&self) -> bool {
        matches!(self, Kind::Eol)
    }
}

pub fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Accepts "a" as `A` and "ab" as `Ab`
pub fn a_ab_graph() -> Graph<Kind> {
    let mut graph = Graph::new();
    let a = graph.add_end_node(Kind::A);
    let ab = graph.add_end_node(Kind::Ab);
    graph.add_transition(Transition::new(START_NODE, a, 'a'));
    graph.add_transition(Transition::new(a, ab, 'b'));
    graph
}

/// Accepts "ab" only
pub fn ab_only_graph() -> Graph<Kind> {
    let mut graph = Graph::new();
    let a = graph.add_node(None);
    let ab = graph.add_end_node(Kind::Ab);
    graph.add_transition(Transition::new(START_NODE, a, 'a'));
    graph.add_transition(Transition::new(a, ab, 'b'));
    graph
}

/// `[0-9]+`
pub fn number_graph() -> Graph<Kind> {
    let mut graph = Graph::new();
    let n = graph.add_end_node(Kind::Number);
    graph.add_transition(Transition::new(START_NODE, n, TransitionCheck::range('0', '9')));
    graph.add_transition(Transition::new(n, n, TransitionCheck::range('0', '9')));
    graph
}

/// `[a-z]+`
pub fn ident_graph() -> Graph<Kind> {
    let mut graph = Graph::new();
    let n = graph.add_end_node(Kind::Ident);
    graph.add_transition(Transition::new(START_NODE, n, TransitionCheck::range('a', 'z')));
    graph.add_transition(Transition::new(n, n, TransitionCheck::range('a', 'z')));
    graph
}

pub fn blanks() -> ScanOptions {
    ScanOptions {
        ignore_whitespace: true,
        whitespaces: vec![' ', '\t'],
        ..Default::default()
    }
}

pub fn lexer(graph: Graph<Kind>, options: ScanOptions) -> FsmLexer<Kind> {
    FsmLexer::new(graph, options)
}
