//! Structured logging initialization
//!
//! Sets up a `tracing` subscriber with an env filter and either JSON (production) or
//! pretty (development) output. Configuration comes from environment variables:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `ROUTEMOUNT_LOG_LEVEL` | `info` | trace/debug/info/warn/error |
//! | `ROUTEMOUNT_LOG_FORMAT` | `json` | json/pretty |
//! | `ROUTEMOUNT_LOG_TARGET_FILTER` | unset | extra comma-separated filter directives |
//! | `ROUTEMOUNT_LOG_INCLUDE_LOCATION` | `false` | include file:line |
//!
//! `RUST_LOG`, when set, takes precedence over `ROUTEMOUNT_LOG_LEVEL`. Output goes to
//! stderr so it never mixes with CLI output.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json, // Default to JSON
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Module filter (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location (dev only)
    pub include_location: bool,
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: lookup("ROUTEMOUNT_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format: lookup("ROUTEMOUNT_LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(LogFormat::Json),
            target_filter: lookup("ROUTEMOUNT_LOG_TARGET_FILTER").filter(|f| !f.trim().is_empty()),
            include_location: lookup("ROUTEMOUNT_LOG_INCLUDE_LOCATION")
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Split `target_filter` into parsed directives and the entries that failed to parse
    fn target_directives(&self) -> (Vec<Directive>, Vec<String>) {
        let mut parsed = Vec::new();
        let mut rejected = Vec::new();
        let entries = self.target_filter.as_deref().unwrap_or_default();
        for entry in entries.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.parse::<Directive>() {
                Ok(directive) => parsed.push(directive),
                Err(_) => rejected.push(entry.to_string()),
            }
        }
        (parsed, rejected)
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Initialize logging from the environment, overriding the level
///
/// # Example
///
/// ```no_run
/// use routemount::logging;
///
/// logging::init_logging("info").expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: &str) -> Result<()> {
    let mut config = LogConfig::from_env();
    config.log_level = log_level.to_string();
    init_logging_with_config(&config)
}

/// Initialize logging with an explicit configuration
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let (directives, rejected) = config.target_directives();
    for bad in rejected {
        eprintln!("Warning: ignoring invalid ROUTEMOUNT_LOG_TARGET_FILTER directive '{bad}'");
    }
    let env_filter = directives.into_iter().fold(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level().as_str())),
        EnvFilter::add_directive,
    );

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_span_list(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
