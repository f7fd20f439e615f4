//! Built-in demo grammar
//!
//! A small expression language: identifiers, `let`/`if`/`else`, integers,
//! strings, block comments, arithmetic and grouping operators, and line ends.

use fsmlex_core::{Graph, GraphBuildError, GraphBuilder, TokenKind};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoKind {
    #[default]
    Invalid,
    Identifier,
    Let,
    If,
    Else,
    Integer,
    Str,
    Comment,
    Assign,
    Equal,
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Semicolon,
    EndOfLine,
}

impl DemoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoKind::Invalid => "invalid",
            DemoKind::Identifier => "identifier",
            DemoKind::Let => "let",
            DemoKind::If => "if",
            DemoKind::Else => "else",
            DemoKind::Integer => "integer",
            DemoKind::Str => "string",
            DemoKind::Comment => "comment",
            DemoKind::Assign => "assign",
            DemoKind::Equal => "equal",
            DemoKind::Plus => "plus",
            DemoKind::Minus => "minus",
            DemoKind::Star => "star",
            DemoKind::Slash => "slash",
            DemoKind::LeftParen => "left_paren",
            DemoKind::RightParen => "right_paren",
            DemoKind::Semicolon => "semicolon",
            DemoKind::EndOfLine => "eol",
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TokenKind for DemoKind {
    fn is_end_of_line(&self) -> bool {
        matches!(self, DemoKind::EndOfLine)
    }
}

const OPERATORS: &[(&str, DemoKind)] = &[
    ("=", DemoKind::Assign),
    ("==", DemoKind::Equal),
    ("+", DemoKind::Plus),
    ("-", DemoKind::Minus),
    ("*", DemoKind::Star),
    ("/", DemoKind::Slash),
    ("(", DemoKind::LeftParen),
    (")", DemoKind::RightParen),
    (";", DemoKind::Semicolon),
];

static DEMO_GRAPH: OnceCell<Arc<Graph<DemoKind>>> = OnceCell::new();

/// The demo graph, built on first use
pub fn graph() -> Result<Arc<Graph<DemoKind>>, GraphBuildError> {
    DEMO_GRAPH
        .get_or_try_init(|| build().map(Arc::new))
        .map(Arc::clone)
}

fn build() -> Result<Graph<DemoKind>, GraphBuildError> {
    let mut builder = GraphBuilder::new();
    builder.identifier_with_keywords(
        DemoKind::Identifier,
        vec![
            ("let".to_string(), DemoKind::Let),
            ("if".to_string(), DemoKind::If),
            ("else".to_string(), DemoKind::Else),
        ],
    );
    builder.integer(DemoKind::Integer).string(DemoKind::Str);
    // 注释先于 `/` 运算符加入，`/` 复用注释的第一条边
    builder.block_comment(DemoKind::Comment);
    for (text, kind) in OPERATORS {
        builder.keyword(text, *kind)?;
    }
    builder.end_of_line(DemoKind::EndOfLine);
    Ok(builder.build())
}
