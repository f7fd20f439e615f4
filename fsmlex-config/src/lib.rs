//! fsmlex Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all fsmlex crates.

use serde::{Deserialize, Serialize};

/// Scanner options, set before scanning begins and constant for a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Skip characters from `whitespaces` between tokens
    pub ignore_whitespace: bool,
    /// Characters treated as whitespace when `ignore_whitespace` is set
    pub whitespaces: Vec<char>,
    /// Skip end-of-line sequences (`\n`, `\r`, `\r\n`) between tokens
    pub ignore_eol: bool,
    /// Coalesce consecutive end-of-line tokens.
    ///
    /// Not consulted by the scan engine; the tokenizer driver applies it.
    pub aggregate_eol: bool,
    /// Delimiter used by collaborators building string-literal transitions
    pub string_delimiter: char,
}

impl ScanOptions {
    /// Whitespace (space, tab) and end-of-line skipping both enabled.
    pub fn skip_blanks() -> Self {
        Self {
            ignore_whitespace: true,
            whitespaces: vec![' ', '\t'],
            ignore_eol: true,
            ..Default::default()
        }
    }

    /// Whether `c` is a whitespace character that should be skipped.
    pub fn skips_whitespace(&self, c: char) -> bool {
        self.ignore_whitespace && self.whitespaces.contains(&c)
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            ignore_whitespace: false,
            whitespaces: Vec::new(),
            ignore_eol: false,
            aggregate_eol: false,
            string_delimiter: '"',
        }
    }
}

/// Log verbosity, ordered from quietest to noisiest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse a level name. `"silent"` maps to `Error`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silent" | "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Execution phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Lexer,
    Cli,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Lexer => "lexer",
            Phase::Cli => "cli",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("fsmlex::{}", self.as_str())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Global default level
    pub global: LogLevel,
    /// Lexer level (None falls back to `global`)
    pub lexer: Option<LogLevel>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: LogLevel::Warn,
            lexer: None,
        }
    }
}

impl LogConfig {
    /// Get log level for a specific phase
    pub fn level_for(&self, phase: Phase) -> LogLevel {
        match phase {
            Phase::Lexer => self.lexer.unwrap_or(self.global),
            Phase::Cli => self.global,
        }
    }
}
