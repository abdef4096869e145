// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::Path;

use crate::app_config::Config;
use crate::extract::PdfLineExtractor;
use crate::registry::RegistryClient;
use crate::resolver::OwnershipResolver;

mod app_config;
mod errors;
mod extract;
mod owner_parser;
mod registry;
mod resolver;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// egrul-resolver - beneficial-ownership resolution through EGRUL
///
/// Resolves the chain of owners of a legal entity down to natural persons by
/// recursively requesting and parsing registry extracts. Prints the flat
/// person list as a JSON array.
#[derive(Parser, Debug)]
#[command(name = "egrul-resolver")]
#[command(version)]
#[command(about = "Resolve the beneficial owners of a registered entity")]
struct CommandLineOptions {
    /// Tax identifier (INN/OGRN) or entity name to resolve
    #[arg(value_name = "QUERY")]
    query: String,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Registry endpoint override
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

// @struct: Stderr logger so stdout stays pure JSON
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = std::io::stderr();
            let _ = match record.level() {
                Level::Error => writeln!(stderr, "\x1B[1;31m[ERROR] {}\x1B[0m", record.args()),
                Level::Warn => writeln!(stderr, "\x1B[1;33m[WARN] {}\x1B[0m", record.args()),
                Level::Info => writeln!(stderr, "[INFO] {}", record.args()),
                Level::Debug => writeln!(stderr, "\x1B[1;34m[DEBUG] {}\x1B[0m", record.args()),
                Level::Trace => writeln!(stderr, "\x1B[1;35m[TRACE] {}\x1B[0m", record.args()),
            };
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(cmd_log_level.clone().into());
    }

    // Load configuration if present, fall back to defaults otherwise
    let mut config = if Path::new(&cli.config_path).exists() {
        Config::from_file(&cli.config_path)?
    } else {
        Config::default()
    };

    if cli.log_level.is_none() {
        let config_level = match config.log_level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(config_level);
    }

    if let Some(endpoint) = cli.endpoint {
        config.registry.endpoint = endpoint;
    }
    config.validate()?;

    info!("Resolving beneficial owners for '{}'", cli.query);

    let client = RegistryClient::with_config(&config.registry);
    let resolver = OwnershipResolver::new(client, PdfLineExtractor);

    let owners = resolver
        .resolve_owners(&cli.query)
        .await
        .context(format!("Failed to resolve owners for '{}'", cli.query))?;

    info!("Found {} beneficial owner(s)", owners.len());

    let json = if cli.pretty {
        serde_json::to_string_pretty(&owners)?
    } else {
        serde_json::to_string(&owners)?
    };
    println!("{}", json);

    Ok(())
}
