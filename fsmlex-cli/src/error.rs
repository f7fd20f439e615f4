//! CLI 错误类型

use fsmlex_core::{GraphBuildError, TokenizeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config '{path}': {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown log level '{0}'")]
    LogLevel(String),

    #[error("Failed to build lexer graph: {0}")]
    Graph(#[from] GraphBuildError),

    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}
