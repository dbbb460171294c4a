// src/engine/runner.rs

//! Public entry point: one [`SeedRunner`] per seeding session.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::discovery::{CatalogDiscovery, DiscoveryStrategy, SeedCatalog};
use crate::engine::plan::{self, PlanStep};
use crate::engine::resolver::{Resolver, SeedOutcome};
use crate::engine::state::{ExecutionState, SeedRunState};
use crate::errors::{Result, SeedError};
use crate::fs::RealFileSystem;
use crate::logging::{LogCallback, SeedLogger};
use crate::seed::{check_contract, Registry, Seed};
use crate::types::SeedName;

/// Construction-time options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerOptions {
    /// Print lifecycle messages to stdout when no custom logger is set.
    pub verbose: bool,
}

/// Registers seeds, resolves their dependencies and runs each at most once
/// per session.
///
/// ```
/// use seedrun::{Seed, SeedRunner};
///
/// struct Users;
/// impl Seed for Users {
///     fn run(&mut self) -> anyhow::Result<()> { Ok(()) }
/// }
///
/// struct Accounts;
/// impl Seed for Accounts {
///     fn run(&mut self) -> anyhow::Result<()> { Ok(()) }
///     fn dependencies(&self) -> Vec<String> { vec!["Users".into()] }
/// }
///
/// let mut runner = SeedRunner::new(false, None);
/// runner
///     .register_seed(Box::new(Accounts))
///     .register_seed(Box::new(Users));
/// runner.run_all().unwrap();
///
/// assert_eq!(runner.executed_seeds(), ["Users", "Accounts"]);
/// ```
pub struct SeedRunner {
    registry: Registry,
    state: ExecutionState,
    logger: SeedLogger,
    discovery: Box<dyn DiscoveryStrategy>,
    main_seed: Option<Box<dyn Seed>>,
}

impl fmt::Debug for SeedRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedRunner")
            .field("registry", &self.registry)
            .field("state", &self.state)
            .field("logger", &self.logger)
            .field("main_seed", &self.main_seed.as_ref().map(|s| s.name()))
            .finish_non_exhaustive()
    }
}

impl Default for SeedRunner {
    fn default() -> Self {
        Self::new(false, None)
    }
}

impl SeedRunner {
    pub fn new(verbose: bool, logger: Option<LogCallback>) -> Self {
        Self::with_options(RunnerOptions { verbose }, logger)
    }

    pub fn with_options(options: RunnerOptions, logger: Option<LogCallback>) -> Self {
        Self {
            registry: Registry::new(),
            state: ExecutionState::new(),
            logger: SeedLogger::new(options.verbose, logger),
            discovery: Box::new(CatalogDiscovery::new(
                SeedCatalog::new(),
                RealFileSystem,
            )),
            main_seed: None,
        }
    }

    /// Runner configured for a project's own seeds: verbose by default.
    pub fn for_user_seeds(verbose: bool, logger: Option<LogCallback>) -> Self {
        Self::new(verbose, logger)
    }

    /// One-shot: discover seeds from `custom_path` (or the default seeds
    /// directory) using `catalog`, then run them all.
    pub fn run_user_seeds(
        verbose: bool,
        custom_path: Option<&Path>,
        catalog: SeedCatalog,
    ) -> Result<()> {
        let mut runner = Self::for_user_seeds(verbose, None)
            .with_discovery(CatalogDiscovery::new(catalog, RealFileSystem));
        runner.discover_and_run_user_seeds(custom_path)?;
        Ok(())
    }

    /// Replace the discovery strategy. It also owns seeds-directory
    /// resolution and creation.
    pub fn with_discovery(mut self, discovery: impl DiscoveryStrategy + 'static) -> Self {
        self.discovery = Box::new(discovery);
        self
    }

    /// Application base seed, run by [`SeedRunner::run_application`] before
    /// any user seed is discovered. It is not registered and not recorded
    /// in `executed_seeds`.
    pub fn with_main_seed(mut self, seed: impl Seed + 'static) -> Self {
        self.main_seed = Some(Box::new(seed));
        self
    }

    // ---------------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------------

    /// Register `seed` under its name. A later registration with the same
    /// name replaces the earlier one.
    pub fn register_seed(&mut self, seed: Box<dyn Seed>) -> &mut Self {
        let (name, replaced) = self.registry.insert(seed);
        if replaced {
            debug!(seed = %name, "seed re-registered");
        }
        self.logger.info(format!("Registered seed: {name}"));
        self
    }

    /// Register several seeds at once.
    ///
    /// Every seed is checked first; if any violates the seed contract the
    /// call fails with `InvalidInput` and none of them are registered.
    pub fn register_seeds<I>(&mut self, seeds: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Box<dyn Seed>>,
    {
        let seeds: Vec<Box<dyn Seed>> = seeds.into_iter().collect();
        for seed in &seeds {
            if let Err(err) = check_contract(seed.as_ref()) {
                self.logger.error(err.to_string());
                return Err(err);
            }
        }
        for seed in seeds {
            self.register_seed(seed);
        }
        Ok(self)
    }

    // ---------------------------------------------------------------------
    // Discovery
    // ---------------------------------------------------------------------

    /// Discover seeds in `directory` with the configured strategy and
    /// register them.
    pub fn discover_seeds(
        &mut self,
        directory: impl AsRef<Path>,
        namespace: &str,
    ) -> Result<&mut Self> {
        let found = self
            .discovery
            .discover(directory.as_ref(), namespace, &self.logger)?;
        for seed in found {
            self.register_seed(seed);
        }
        Ok(self)
    }

    /// Resolve the seeds directory (custom or default convention), discover
    /// and run everything.
    ///
    /// A missing directory is created and nothing runs.
    pub fn discover_and_run_user_seeds(&mut self, custom_path: Option<&Path>) -> Result<&mut Self> {
        self.discover_and_run_in(custom_path, "")
    }

    /// As [`SeedRunner::discover_and_run_user_seeds`], with a namespace hint
    /// for catalog lookups.
    pub fn discover_and_run_in(
        &mut self,
        custom_path: Option<&Path>,
        namespace: &str,
    ) -> Result<&mut Self> {
        let seeds_path = match custom_path {
            Some(path) => path.to_path_buf(),
            None => self.user_seeds_path()?,
        };

        if !self.discovery.ensure_directory(&seeds_path, &self.logger)? {
            return Ok(self);
        }

        self.logger
            .info(format!("Discovering seeds in: {}", seeds_path.display()));
        self.discover_seeds(&seeds_path, namespace)?;

        if self.registry.is_empty() {
            self.logger
                .info(format!("No seeds found in {}", seeds_path.display()));
        }

        self.run_all()
    }

    /// Default seeds directory relative to the current working directory.
    pub fn user_seeds_path(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        Ok(self.discovery.default_directory(&cwd))
    }

    /// Run the main seed (if any), then discover and run user seeds.
    pub fn run_application(
        &mut self,
        custom_path: Option<&Path>,
        namespace: &str,
    ) -> Result<&mut Self> {
        self.run_main_seed()?;
        self.logger.info("Discovering and running user seeds...");
        self.discover_and_run_in(custom_path, namespace)
    }

    /// Run the main seed's body, if one is configured. Failures are logged
    /// and wrapped like any other seed failure.
    pub fn run_main_seed(&mut self) -> Result<&mut Self> {
        let Some(seed) = self.main_seed.as_mut() else {
            return Ok(self);
        };
        let name = seed.name();
        self.logger.info("Running main seed for application...");

        if let Err(source) = seed.run() {
            self.logger.error(format!("Seed {name} failed: {source}"));
            return Err(SeedError::SeedExecutionFailed { seed: name, source });
        }
        Ok(self)
    }

    // ---------------------------------------------------------------------
    // Execution
    // ---------------------------------------------------------------------

    /// Run every registered seed in registration order. Each body runs at
    /// most once; the first failure aborts the whole run.
    pub fn run_all(&mut self) -> Result<&mut Self> {
        self.logger.info("Starting seed execution...");
        self.logger
            .info(format!("Total seeds registered: {}", self.registry.len()));

        let names: Vec<SeedName> = self.registry.names().to_vec();
        for name in &names {
            self.resolver().run_seed(name)?;
        }

        self.logger.info("All seeds completed successfully!");
        self.logger
            .info(format!("Total seeds executed: {}", self.state.executed().len()));
        Ok(self)
    }

    /// Run a single seed and, first, everything it depends on.
    pub fn run_seed(&mut self, name: &str) -> Result<&mut Self> {
        self.run_seed_outcome(name)?;
        Ok(self)
    }

    /// As [`SeedRunner::run_seed`], reporting what happened to `name`.
    pub fn run_seed_outcome(&mut self, name: &str) -> Result<SeedOutcome> {
        self.resolver().run_seed(name)
    }

    /// Run a chosen subset, in the given order.
    pub fn run_seeds<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&mut Self> {
        for name in names {
            self.resolver().run_seed(name.as_ref())?;
        }
        Ok(self)
    }

    fn resolver(&mut self) -> Resolver<'_> {
        Resolver::new(&mut self.registry, &mut self.state, &self.logger)
    }

    // ---------------------------------------------------------------------
    // Planning
    // ---------------------------------------------------------------------

    /// Check the whole registered graph for missing dependencies and cycles.
    pub fn validate(&self) -> Result<()> {
        plan::validate(&self.registry)
    }

    /// What `run_all` would do from a clean session, without running
    /// anything.
    pub fn plan(&self) -> Result<Vec<PlanStep>> {
        plan::plan(&self.registry)
    }

    pub fn plan_seeds<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<PlanStep>> {
        let roots: Vec<SeedName> = names.iter().map(|n| n.as_ref().to_string()).collect();
        plan::plan_seeds(&self.registry, &roots)
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    /// Names of seeds completed (run or skipped) this session, in order.
    pub fn executed_seeds(&self) -> &[SeedName] {
        self.state.executed()
    }

    /// Registered names in registration order.
    pub fn registered_seeds(&self) -> Vec<SeedName> {
        self.registry.names().to_vec()
    }

    pub fn has_executed(&self, name: &str) -> bool {
        self.state.is_executed(name)
    }

    pub fn get_seed(&self, name: &str) -> Option<&dyn Seed> {
        self.registry.get(name)
    }

    pub fn run_state_of(&self, name: &str) -> SeedRunState {
        if !self.registry.contains(name) {
            SeedRunState::Unregistered
        } else if self.state.is_executed(name) {
            SeedRunState::Executed
        } else if self.state.is_executing(name) {
            SeedRunState::Executing
        } else {
            SeedRunState::Registered
        }
    }

    /// Number of seeds currently mid-resolution. Zero between calls.
    pub fn executing_count(&self) -> usize {
        self.state.executing_count()
    }

    // ---------------------------------------------------------------------
    // Session
    // ---------------------------------------------------------------------

    /// Forget all seeds and all execution state.
    pub fn reset(&mut self) -> &mut Self {
        self.registry.clear();
        self.state.clear();
        debug!("runner reset");
        self
    }
}
