// src/logging.rs

//! Logging for `seedrun`.
//!
//! Two layers live here:
//!
//! - [`init_logging`] installs the global `tracing` subscriber for the
//!   binary. Priority for determining the level:
//!   1. `--log-level` CLI flag (if provided)
//!   2. `SEEDRUN_LOG` environment variable (e.g. "info", "debug")
//!   3. default to `info`
//! - [`SeedLogger`] is the per-runner message sink. Every lifecycle message
//!   is forwarded to `tracing` and then either to a caller-supplied
//!   callback or, in verbose mode, printed to stdout as
//!   `[YYYY-MM-DD HH:MM:SS] [LEVEL] message`.

use std::fmt;

use anyhow::Result;
use tracing_subscriber::fmt as subscriber_fmt;

use crate::cli::TraceLevel;
use crate::types::LogLevel;

/// Caller-supplied log sink: receives every message and its level.
pub type LogCallback = Box<dyn Fn(&str, LogLevel)>;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup. Logs go to stderr so that the verbose
/// console sink owns stdout.
pub fn init_logging(cli_level: Option<TraceLevel>) -> Result<()> {
    let level = match cli_level {
        Some(lvl) => level_from_trace_level(lvl),
        None => std::env::var("SEEDRUN_LOG")
            .ok()
            .and_then(|s| parse_level_str(&s))
            .unwrap_or(tracing::Level::INFO),
    };

    subscriber_fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn level_from_trace_level(lvl: TraceLevel) -> tracing::Level {
    match lvl {
        TraceLevel::Error => tracing::Level::ERROR,
        TraceLevel::Warn => tracing::Level::WARN,
        TraceLevel::Info => tracing::Level::INFO,
        TraceLevel::Debug => tracing::Level::DEBUG,
        TraceLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

/// Message sink owned by a [`crate::engine::SeedRunner`].
///
/// A custom callback always wins over the console fallback; the console
/// fallback only prints when `verbose` is set.
pub struct SeedLogger {
    verbose: bool,
    callback: Option<LogCallback>,
}

impl fmt::Debug for SeedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedLogger")
            .field("verbose", &self.verbose)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl SeedLogger {
    pub fn new(verbose: bool, callback: Option<LogCallback>) -> Self {
        Self { verbose, callback }
    }

    /// A logger that only forwards to `tracing`.
    pub fn silent() -> Self {
        Self::new(false, None)
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(message.as_ref(), LogLevel::Info);
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(message.as_ref(), LogLevel::Warning);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(message.as_ref(), LogLevel::Error);
    }

    pub fn log(&self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Info => tracing::info!(target: "seedrun", "{message}"),
            LogLevel::Warning => tracing::warn!(target: "seedrun", "{message}"),
            LogLevel::Error => tracing::error!(target: "seedrun", "{message}"),
        }

        if let Some(callback) = &self.callback {
            callback(message, level);
        } else if self.verbose {
            println!("{}", console_line(message, level));
        }
    }
}

impl Default for SeedLogger {
    fn default() -> Self {
        Self::silent()
    }
}

/// Format a message the way the console fallback prints it.
pub fn console_line(message: &str, level: LogLevel) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "[{timestamp}] [{}] {message}",
        level.as_str().to_uppercase()
    )
}
