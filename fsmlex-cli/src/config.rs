//! CLI 配置
//!
//! Optional JSON config file with `scan` and `log` sections. Command-line
//! flags are applied on top of it.

use crate::error::CliError;
use fsmlex_config::{LogConfig, LogLevel, ScanOptions};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub scan: ScanOptions,
    pub log: LogConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            scan: ScanOptions::skip_blanks(),
            log: LogConfig::default(),
        }
    }
}

/// Overrides taken from the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub keep_eol: bool,
    pub aggregate_eol: bool,
    pub log_level: Option<LogLevel>,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content).map_err(|source| CliError::Config {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if overrides.keep_eol {
            self.scan.ignore_eol = false;
        }
        if overrides.aggregate_eol {
            self.scan.aggregate_eol = true;
        }
        if let Some(level) = overrides.log_level {
            self.log.global = level;
        }
    }
}
