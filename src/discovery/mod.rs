// src/discovery/mod.rs

//! Seed discovery.
//!
//! Rust has no runtime class loading, so discovery resolves seed artifacts
//! found on disk against a table of registered factories:
//!
//! - [`catalog`] holds the factory table ([`SeedCatalog`]).
//! - [`scanner`] implements the default [`DiscoveryStrategy`] that maps
//!   `*Seed.*` files in a directory onto catalog entries.
//! - [`paths`] resolves the default seeds directory for a project.

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::fs::RealFileSystem;
use crate::logging::SeedLogger;
use crate::seed::Seed;

pub mod catalog;
pub mod paths;
pub mod scanner;

pub use catalog::{SeedCatalog, SeedFactory};
pub use paths::default_seeds_path;
pub use scanner::CatalogDiscovery;

/// Pluggable source of seeds for [`crate::engine::SeedRunner::discover_seeds`].
///
/// Implementations should log and skip artifacts they cannot turn into a
/// seed rather than failing the whole discovery.
///
/// The runner asks the strategy about directories too, so a strategy backed
/// by a custom [`crate::fs::FileSystem`] sees every path the runner touches.
pub trait DiscoveryStrategy {
    fn discover(
        &self,
        directory: &Path,
        namespace: &str,
        logger: &SeedLogger,
    ) -> Result<Vec<Box<dyn Seed>>>;

    /// Make sure `directory` exists. Returns `false` when it was missing
    /// (and has now been created), `true` when it was already there.
    fn ensure_directory(&self, _directory: &Path, _logger: &SeedLogger) -> Result<bool> {
        Ok(true)
    }

    /// Default seeds directory for a process running in `cwd`.
    fn default_directory(&self, cwd: &Path) -> PathBuf {
        paths::default_seeds_path(&RealFileSystem, cwd)
    }
}

/// A fixed list of seed factories, ignoring the directory.
///
/// Useful when the set of seeds is known at compile time.
impl<F> DiscoveryStrategy for Vec<F>
where
    F: Fn() -> Box<dyn Seed>,
{
    fn discover(
        &self,
        _directory: &Path,
        _namespace: &str,
        logger: &SeedLogger,
    ) -> Result<Vec<Box<dyn Seed>>> {
        let seeds: Vec<Box<dyn Seed>> = self.iter().map(|factory| factory()).collect();
        logger.info(format!("Loaded {} seeds from static list", seeds.len()));
        Ok(seeds)
    }
}
