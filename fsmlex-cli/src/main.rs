//! fsmlex CLI - tokenize a file with the built-in demo grammar
//!
//! Configuration comes from an optional JSON file; flags override it.

use clap::{Parser, ValueEnum};
use fsmlex_config::LogLevel;
use fsmlex_core::{tokenize, FsmLexer};
use std::io::Read;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};

mod config;
mod demo;
mod error;
mod logging;
mod report;

use crate::config::{CliConfig, Overrides};
use crate::error::CliError;
use crate::logging::LogFormat;

/// 输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "fsmlex",
    about = "Tokenize source text with a finite-state machine lexer",
    version = "0.1.0"
)]
struct Cli {
    /// Input file (default: stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// JSON config file with `scan` and `log` sections
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Token output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Emit end-of-line tokens instead of skipping line ends
    #[arg(long)]
    keep_eol: bool,

    /// Merge consecutive end-of-line tokens into one
    #[arg(long)]
    aggregate_eol: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    logging::init(&config.log, cli.log_format);

    let source = match read_source(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match run(&cli, &config, &source) {
        Ok(output) => print!("{}", output),
        Err(CliError::Tokenize(err)) => {
            eprint!("{}", report::error_with_source(&err, &source));
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Result<CliConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let log_level = cli
        .log_level
        .as_deref()
        .map(|s| LogLevel::parse(s).ok_or_else(|| CliError::LogLevel(s.to_string())))
        .transpose()?;
    config.apply(&Overrides {
        keep_eol: cli.keep_eol,
        aggregate_eol: cli.aggregate_eol,
        log_level,
    });
    Ok(config)
}

fn read_source(cli: &Cli) -> Result<String, CliError> {
    match &cli.input {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn run(cli: &Cli, config: &CliConfig, source: &str) -> Result<String, CliError> {
    let graph = demo::graph()?;
    debug!(target: "fsmlex::cli", nodes = graph.node_count(), "Demo graph ready");

    let mut lexer = FsmLexer::new(graph, config.scan.clone());
    let chars: Vec<char> = source.chars().collect();
    let tokens = tokenize(&mut lexer, &chars)?;
    info!(target: "fsmlex::cli", count = tokens.len(), "Tokenized input");

    match cli.format {
        OutputFormat::Text => Ok(report::text_listing(&tokens)),
        OutputFormat::Json => Ok(report::json_listing(&tokens)? + "\n"),
    }
}
