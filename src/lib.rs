// src/lib.rs

pub mod cli;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod seed;
pub mod template;
pub mod types;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::discovery::{CatalogDiscovery, DiscoveryStrategy, SeedCatalog};
use crate::engine::{PlanStep, PlannedAction};
use crate::fs::{FileSystem, RealFileSystem};

pub use crate::engine::{RunnerOptions, SeedOutcome, SeedRunner};
pub use crate::errors::SeedError;
pub use crate::seed::Seed;
pub use crate::types::LogLevel;

/// What a single `seedrun` invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `--list`: discover and print, run nothing.
    List,
    /// `--dry-run`: discover, validate and print the plan.
    DryRun,
    /// Run the main seed, then the selection (or everything).
    Execute,
}

/// CLI flags merged with `Seeds.toml`.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub mode: Mode,
    pub seeds_dir: PathBuf,
    pub namespace: String,
    /// Seeds to run; empty means all discovered seeds.
    pub selection: Vec<String>,
    pub verbose: bool,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (CLI flags override `Seeds.toml`)
/// - seeds-directory resolution
/// - discovery against `catalog`
/// - `--list` / `--dry-run` / execution
pub fn run(args: CliArgs, catalog: SeedCatalog) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let discovery = CatalogDiscovery::new(catalog, RealFileSystem);
    let invocation = resolve_invocation(&RealFileSystem, &discovery, &args, &cwd)?;

    let mut runner = SeedRunner::with_options(
        RunnerOptions {
            verbose: invocation.verbose,
        },
        None,
    )
    .with_discovery(discovery);

    execute(&invocation, &mut runner, &mut io::stdout())
}

/// Merge CLI flags with the config file found relative to `cwd`.
///
/// Seeds directory precedence: `--dir`, then `[runner].seeds_dir`, then
/// `discovery`'s default for `cwd`. `--seed` replaces `[run].only`.
/// `--quiet` turns console output off regardless of `[runner].verbose`.
pub fn resolve_invocation(
    fs: &dyn FileSystem,
    discovery: &dyn DiscoveryStrategy,
    args: &CliArgs,
    cwd: &Path,
) -> Result<Invocation> {
    let cfg = load_or_default(fs, cwd.join(&args.config))?;

    let mode = if args.list {
        Mode::List
    } else if args.dry_run {
        Mode::DryRun
    } else {
        Mode::Execute
    };

    let seeds_dir = match (&args.dir, cfg.seeds_dir()) {
        (Some(dir), _) => cwd.join(dir),
        (None, Some(dir)) => cwd.join(dir),
        (None, None) => discovery.default_directory(cwd),
    };

    let namespace = args
        .namespace
        .clone()
        .unwrap_or_else(|| cfg.namespace().to_string());

    let selection = if args.seeds.is_empty() {
        cfg.only().to_vec()
    } else {
        args.seeds.clone()
    };

    Ok(Invocation {
        mode,
        seeds_dir,
        namespace,
        selection,
        verbose: cfg.verbose() && !args.quiet,
    })
}

/// Carry out `invocation` on `runner`, writing listings and plans to `out`.
pub fn execute(invocation: &Invocation, runner: &mut SeedRunner, out: &mut dyn Write) -> Result<()> {
    let dir = &invocation.seeds_dir;
    let namespace = invocation.namespace.as_str();
    info!(dir = %dir.display(), namespace, mode = ?invocation.mode, "seedrun invocation");

    match invocation.mode {
        Mode::List => {
            runner.discover_seeds(dir, namespace)?;
            write_seed_list(runner, out)?;
        }
        Mode::DryRun => {
            runner.discover_seeds(dir, namespace)?;
            runner.validate()?;
            let steps = if invocation.selection.is_empty() {
                runner.plan()?
            } else {
                runner.plan_seeds(invocation.selection.as_slice())?
            };
            write_dry_run(&steps, out)?;
        }
        Mode::Execute if invocation.selection.is_empty() => {
            runner.run_application(Some(dir.as_path()), namespace)?;
        }
        Mode::Execute => {
            runner.run_main_seed()?;
            runner.discover_seeds(dir, namespace)?;
            runner.run_seeds(invocation.selection.as_slice())?;
        }
    }

    info!(executed = runner.executed_seeds().len(), "seeding finished");
    Ok(())
}

fn write_seed_list(runner: &SeedRunner, out: &mut dyn Write) -> io::Result<()> {
    let names = runner.registered_seeds();
    writeln!(out, "seeds ({}):", names.len())?;
    for name in names {
        let Some(seed) = runner.get_seed(&name) else {
            continue;
        };
        writeln!(out, "  - {name}")?;
        let description = seed.description();
        if !description.is_empty() {
            writeln!(out, "      description: {description}")?;
        }
        let deps = seed.dependencies();
        if !deps.is_empty() {
            writeln!(out, "      depends on: {:?}", deps)?;
        }
    }
    Ok(())
}

/// Simple dry-run output: the order seeds would run in.
fn write_dry_run(steps: &[PlanStep], out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "seedrun dry-run ({} seeds):", steps.len())?;
    for (i, step) in steps.iter().enumerate() {
        let action = match step.action {
            PlannedAction::Run => "run",
            PlannedAction::Skip => "skip (should_run = false)",
        };
        writeln!(out, "  {:>2}. {} [{action}]", i + 1, step.seed)?;
        if !step.dependencies.is_empty() {
            writeln!(out, "      after: {:?}", step.dependencies)?;
        }
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
