//! 位置追踪
//!
//! All coordinates are 0-based:
//! - index: absolute offset into the character sequence
//! - line: incremented once per end-of-line sequence
//! - column: characters since the last end-of-line

use serde::Serialize;
use std::fmt;

/// Start position of a token, fixed when its first character is consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TokenPosition {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

impl TokenPosition {
    pub fn new(index: usize, line: usize, column: usize) -> Self {
        Self {
            index,
            line,
            column,
        }
    }
}

impl fmt::Display for TokenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Where the stream reader currently is.
///
/// Owned by one [`FsmLexer`](super::FsmLexer) and carried between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub position: usize,
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(position: usize, line: usize, column: usize) -> Self {
        Self {
            position,
            line,
            column,
        }
    }

    /// 前进一个字符（同一行内）
    pub fn advance(&mut self) {
        self.position += 1;
        self.column += 1;
    }

    /// 跳过一个换行序列，`width` 为序列长度（1 或 2）
    pub fn new_line(&mut self, width: usize) {
        self.position += width;
        self.line += 1;
        self.column = 0;
    }

    pub fn token_position(&self) -> TokenPosition {
        TokenPosition::new(self.position, self.line, self.column)
    }
}
