// src/types.rs

use std::fmt;
use std::str::FromStr;

/// Canonical seed name type used throughout the runner.
pub type SeedName = String;

/// Level attached to every message handed to a [`crate::logging::SeedLogger`].
///
/// Custom logger callbacks receive one of these alongside the message; the
/// console fallback prints it upper-cased (`[INFO]`, `[WARNING]`, `[ERROR]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!(
                "invalid log level: {other} (expected \"info\", \"warning\" or \"error\")"
            )),
        }
    }
}
