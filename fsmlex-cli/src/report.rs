//! CLI 格式化输出
//!
//! Token listings for stdout and source-context error display for stderr.

use crate::demo::DemoKind;
use fsmlex_core::fsm::eol;
use fsmlex_core::{Token, TokenizeError};
use serde_json::json;

/// 错误行前后显示的上下文行数
const CONTEXT_LINES: usize = 2;

/// `kind text line:column`, one token per line
pub fn text_listing(tokens: &[Token<DemoKind>]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!("{:<12} {:?} {}\n", token.kind, token.text, token.position));
    }
    out
}

pub fn json_listing(tokens: &[Token<DemoKind>]) -> Result<String, serde_json::Error> {
    let items: Vec<serde_json::Value> = tokens
        .iter()
        .map(|token| {
            json!({
                "kind": token.kind.as_str(),
                "text": token.text,
                "position": token.position,
            })
        })
        .collect();
    serde_json::to_string_pretty(&items)
}

/// The error, followed by the lines around it and a caret under the
/// offending column. Positions are 0-based; lines split like the lexer
/// counts them (`\n`, `\r\n`, lone `\r`).
pub fn error_with_source(err: &TokenizeError, source: &str) -> String {
    let mut out = format!("error: {}\n", err);

    let (line, column) = (err.line(), err.column());
    let lines = eol::split_lines(source);
    if line >= lines.len() {
        return out;
    }

    let first = line.saturating_sub(CONTEXT_LINES);
    let last = (line + CONTEXT_LINES).min(lines.len() - 1);
    let width = (last + 1).to_string().len();

    out.push_str(&format!("{}|--\n", "-".repeat(width + 1)));
    for (idx, text) in lines.iter().enumerate().take(last + 1).skip(first) {
        out.push_str(&format!("{:>width$} | {}\n", idx + 1, text, width = width));
        if idx == line {
            out.push_str(&format!("{} | {}^\n", " ".repeat(width), " ".repeat(column)));
        }
    }
    out
}
