// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `seedrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seedrun",
    version,
    about = "Discover database seeds, order them by dependency and run each once.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML). Missing file means defaults.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Seeds directory; overrides `[runner].seeds_dir` and the default
    /// `resources/seeds` / `database/seeds` lookup.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Namespace hint used when resolving seed artifacts in the catalog.
    #[arg(long, value_name = "PATH")]
    pub namespace: Option<String>,

    /// Run only this seed (and its dependencies). Repeatable.
    #[arg(long = "seed", value_name = "NAME")]
    pub seeds: Vec<String>,

    /// List discovered seeds and exit.
    #[arg(long)]
    pub list: bool,

    /// Validate and print the execution plan without running any seed.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress the `[timestamp] [LEVEL]` console output.
    #[arg(long, short)]
    pub quiet: bool,

    /// Tracing level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SEEDRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<TraceLevel>,
}

/// Tracing level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum TraceLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
