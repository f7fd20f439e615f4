//! Node actions, callbacks and value-aware preconditions

mod common;
use common::*;

use fsmlex_core::{
    tokenize, Graph, GraphBuilder, ScanOptions, TokenPosition, TokenizeError, Transition,
    TransitionCheck, START_NODE,
};

/// `"` body `"`, with an action on the opening quote node
fn quoted_graph() -> Graph<Kind> {
    let mut graph = Graph::new();
    let open = graph.add_node(None);
    let body = graph.add_node(None);
    let close = graph.add_end_node(Kind::Str);
    graph.add_transition(Transition::new(START_NODE, open, '"'));
    graph.add_transition(Transition::new(open, close, '"'));
    graph.add_transition(Transition::new(open, body, TransitionCheck::char('"').negate()));
    graph.add_transition(Transition::new(body, close, '"'));
    graph.add_transition(Transition::new(body, body, TransitionCheck::any()));
    graph.set_action(open, |v| v.trim_start_matches('"').to_string());
    graph
}

#[test]
fn test_action_strips_opening_quote() {
    let mut lexer = lexer(quoted_graph(), ScanOptions::default());
    let result = lexer.run_from(&chars("\"x\""), 0).unwrap();
    assert!(result.is_success);
    assert_eq!(result.token.kind, Kind::Str);
    assert_eq!(result.token.text, "x\"");
    assert_eq!(lexer.cursor().position, 3);
}

#[test]
fn test_action_runs_after_candidate_recorded() {
    let mut graph: Graph<Kind> = Graph::new();
    let n = graph.add_end_node(Kind::Ident);
    graph.add_transition(Transition::new(START_NODE, n, TransitionCheck::range('a', 'z')));
    graph.set_action(n, |_| String::from("rewritten"));

    let mut lexer = lexer(graph, ScanOptions::default());
    let result = lexer.run_from(&chars("q"), 0).unwrap();
    assert_eq!(result.token.text, "q");
}

#[test]
fn test_callback_rewrites_match() {
    let mut graph = ident_graph();
    graph.set_callback(1, |mut m| {
        m.token.text = m.token.text.to_uppercase();
        m
    });
    let mut lexer = lexer(graph, ScanOptions::default());
    let result = lexer.run_from(&chars("abc"), 0).unwrap();
    assert_eq!(result.token.text, "ABC");
    assert_eq!(result.token.kind, Kind::Ident);
}

#[test]
fn test_callback_can_attach_properties() {
    let mut graph = number_graph();
    graph.set_callback(1, |m| {
        let value: i64 = m.token.text.parse().unwrap_or_default();
        m.with_property("value", value)
    });
    let mut lexer = lexer(graph, blanks());
    let result = lexer.run_from(&chars(" 017"), 0).unwrap();
    assert_eq!(result.property("value"), Some(&serde_json::Value::from(17)));
}

#[test]
fn test_callback_of_winning_node_only() {
    // "a" -> A (callback), "abc" -> Ab (callback); input "abd" ends on "a"
    let mut graph: Graph<Kind> = Graph::new();
    let a = graph.add_end_node(Kind::A);
    let ab = graph.add_node(None);
    let abc = graph.add_end_node(Kind::Ab);
    graph.add_transition(Transition::new(START_NODE, a, 'a'));
    graph.add_transition(Transition::new(a, ab, 'b'));
    graph.add_transition(Transition::new(ab, abc, 'c'));
    graph.set_callback(a, |m| m.with_property("node", "a"));
    graph.set_callback(abc, |m| m.with_property("node", "abc"));

    let mut lexer = lexer(graph, ScanOptions::default());
    let short = lexer.run_from(&chars("abd"), 0).unwrap();
    assert_eq!(short.property("node"), Some(&serde_json::Value::from("a")));

    let long = lexer.run_from(&chars("abc"), 0).unwrap();
    assert_eq!(long.property("node"), Some(&serde_json::Value::from("abc")));
}

#[test]
fn test_failure_skips_callbacks() {
    let mut graph = ab_only_graph();
    graph.set_callback(2, |m| m.with_property("hit", true));
    let mut lexer = lexer(graph, ScanOptions::default());
    let result = lexer.run_from(&chars("ax"), 0).unwrap();
    assert!(!result.is_success);
    assert!(result.properties.is_empty());
}

#[test]
fn test_precondition_sees_accumulated_value() {
    // 'x' is only accepted as the third character or later
    let mut graph: Graph<Kind> = Graph::new();
    let n = graph.add_end_node(Kind::Ident);
    graph.add_transition(Transition::new(
        START_NODE,
        n,
        TransitionCheck::range('a', 'z').with_precondition(|v| v.is_empty()),
    ));
    graph.add_transition(Transition::new(
        n,
        n,
        TransitionCheck::char('x').with_precondition(|v| v.chars().count() >= 2),
    ));
    graph.add_transition(Transition::new(n, n, TransitionCheck::range('a', 'w')));

    let mut lexer = lexer(graph, ScanOptions::default());
    assert_eq!(lexer.run_from(&chars("abxx"), 0).unwrap().token.text, "abxx");
    assert_eq!(lexer.run_from(&chars("ax"), 0).unwrap().token.text, "a");
}

#[test]
fn test_precondition_sees_action_output() {
    let mut graph: Graph<Kind> = Graph::new();
    let open = graph.add_node(None);
    let close = graph.add_end_node(Kind::Str);
    graph.add_transition(Transition::new(START_NODE, open, '<'));
    graph.add_transition(Transition::new(
        open,
        close,
        TransitionCheck::char('>').with_precondition(|v| v.is_empty()),
    ));
    graph.set_action(open, |_| String::new());

    let mut lexer = lexer(graph, ScanOptions::default());
    let result = lexer.run_from(&chars("<>"), 0).unwrap();
    assert!(result.is_success);
    assert_eq!(result.token.text, ">");
}

#[test]
fn test_builder_block_comment() {
    let mut builder = GraphBuilder::new();
    builder.block_comment(Kind::Str).integer(Kind::Number);
    let mut lexer = builder.build_lexer(ScanOptions::skip_blanks());
    let src = chars("/* a * b */ 5");
    let comment = lexer.run(&src).unwrap();
    assert_eq!(comment.token.kind, Kind::Str);
    assert_eq!(comment.token.text, "/* a * b */");
    let number = lexer.run(&src).unwrap();
    assert_eq!(number.token.text, "5");
}

#[test]
fn test_builder_keywords_and_identifiers() {
    let mut builder = GraphBuilder::new();
    builder.identifier_with_keywords(Kind::Ident, vec![(String::from("ab"), Kind::Ab)]);
    let mut lexer = builder.build_lexer(ScanOptions::skip_blanks());
    let src = chars("ab abc");
    assert_eq!(lexer.run(&src).unwrap().token.kind, Kind::Ab);
    let ident = lexer.run(&src).unwrap();
    assert_eq!(ident.token.kind, Kind::Ident);
    assert_eq!(ident.token.text, "abc");
}

fn string_lexer(options: ScanOptions) -> fsmlex_core::FsmLexer<Kind> {
    let mut builder = GraphBuilder::new();
    builder
        .string(Kind::Str)
        .integer(Kind::Number)
        .end_of_line(Kind::Eol);
    builder.build_lexer(options)
}

#[test]
fn test_strings_across_skipped_lines() {
    let mut lexer = string_lexer(ScanOptions::skip_blanks());
    let src = chars("1\n\"a b\"\r\n  \"c\\\"d\"\r2");
    let tokens = tokenize(&mut lexer, &src).unwrap();
    let summary: Vec<(Kind, &str, TokenPosition)> = tokens
        .iter()
        .map(|t| (t.kind.clone(), t.text.as_str(), t.position))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Kind::Number, "1", TokenPosition::new(0, 0, 0)),
            (Kind::Str, "a b", TokenPosition::new(2, 1, 0)),
            (Kind::Str, "c\"d", TokenPosition::new(11, 2, 2)),
            (Kind::Number, "2", TokenPosition::new(18, 3, 0)),
        ]
    );
}

#[test]
fn test_strings_across_kept_lines() {
    let options = ScanOptions {
        ignore_eol: false,
        ..ScanOptions::skip_blanks()
    };
    let mut lexer = string_lexer(options);
    let src = chars("\"x\"\r\n\"y\"\n \"z");
    let mut tokenizer = fsmlex_core::Tokenizer::new(&mut lexer, &src);

    let x = tokenizer.next().unwrap().unwrap();
    assert_eq!(x.position, TokenPosition::new(0, 0, 0));
    assert_eq!(tokenizer.next().unwrap().unwrap().kind, Kind::Eol);
    let y = tokenizer.next().unwrap().unwrap();
    assert_eq!((y.text.as_str(), y.position), ("y", TokenPosition::new(5, 1, 0)));
    assert_eq!(tokenizer.next().unwrap().unwrap().kind, Kind::Eol);
    assert_eq!(
        tokenizer.next(),
        Some(Err(TokenizeError::Incomplete { line: 2, column: 1 }))
    );
}
