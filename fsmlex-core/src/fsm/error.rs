use super::types::NodeId;
use thiserror::Error;

/// The scanner is stuck at the first character of a fresh attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Lexical error at line {line}, column {column}: unexpected character '{character}'")]
pub struct LexicalError {
    pub line: usize,
    pub column: usize,
    pub character: char,
}

impl LexicalError {
    pub fn new(line: usize, column: usize, character: char) -> Self {
        Self {
            line,
            column,
            character,
        }
    }
}

/// Why a token stream stopped early
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),

    /// An attempt consumed input but never reached an accepting node
    #[error("Incomplete token at line {line}, column {column}")]
    Incomplete { line: usize, column: usize },
}

impl TokenizeError {
    pub fn line(&self) -> usize {
        match self {
            TokenizeError::Lexical(err) => err.line,
            TokenizeError::Incomplete { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            TokenizeError::Lexical(err) => err.column,
            TokenizeError::Incomplete { column, .. } => *column,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum GraphBuildError {
    #[error("Unknown mark: {0}")]
    UnknownMark(String),
    #[error("Invalid node ID: {0}")]
    InvalidNodeId(NodeId),
    #[error("Empty character sequence")]
    EmptyCharSequence,
}
