// src/discovery/scanner.rs

//! Directory-scanning discovery backed by a [`SeedCatalog`].

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::discovery::catalog::SeedCatalog;
use crate::discovery::paths::default_seeds_path;
use crate::discovery::DiscoveryStrategy;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::logging::SeedLogger;
use crate::seed::{check_contract, Seed};

/// Default artifact pattern, matched against file names.
pub const DEFAULT_SEED_PATTERN: &str = "*Seed.*";

/// Artifact names that describe the seed machinery itself, never a seed.
pub const EXCLUDED_ARTIFACTS: &[&str] = &["Seed", "AbstractSeed", "SeedRunner"];

/// Namespaces tried after the bare name and the caller's namespace hint.
pub const FALLBACK_NAMESPACES: &[&str] = &["app::seeds", "database::seeds"];

/// Finds seed artifacts (by default `*Seed.*`) directly inside a directory
/// and instantiates the catalog entry each one names.
///
/// For an artifact `UsersSeed.rs` with namespace hint `my_app::seeds` the
/// identifiers tried are, in order: `UsersSeed`, `my_app::seeds::UsersSeed`,
/// `app::seeds::UsersSeed`, `database::seeds::UsersSeed`.
pub struct CatalogDiscovery<F: FileSystem> {
    catalog: SeedCatalog,
    fs: F,
    patterns: GlobSet,
}

impl<F: FileSystem> fmt::Debug for CatalogDiscovery<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogDiscovery")
            .field("catalog", &self.catalog)
            .field("fs", &self.fs)
            .finish_non_exhaustive()
    }
}

impl<F: FileSystem> CatalogDiscovery<F> {
    pub fn new(catalog: SeedCatalog, fs: F) -> Self {
        let patterns = build_globset(&[DEFAULT_SEED_PATTERN.to_string()])
            .unwrap_or_else(|_| GlobSet::empty());
        Self {
            catalog,
            fs,
            patterns,
        }
    }

    /// Replace the artifact file-name patterns.
    pub fn with_patterns(mut self, patterns: &[String]) -> anyhow::Result<Self> {
        self.patterns = build_globset(patterns)?;
        Ok(self)
    }

    pub fn catalog(&self) -> &SeedCatalog {
        &self.catalog
    }

    /// Seed artifacts directly inside `directory`, sorted by path.
    pub fn artifacts(&self, directory: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = self
            .fs
            .read_dir(directory)?
            .into_iter()
            .filter(|path| self.fs.is_file(path))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| self.patterns.is_match(name))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    fn load_artifact(
        &self,
        file: &Path,
        artifact: &str,
        namespace: &str,
        logger: &SeedLogger,
    ) -> anyhow::Result<Option<Box<dyn Seed>>> {
        let identifier = candidate_identifiers(artifact, namespace)
            .into_iter()
            .find(|id| self.catalog.contains(id));

        let Some(identifier) = identifier else {
            logger.warning(format!(
                "Could not find seed {artifact} in file {}",
                file.display()
            ));
            return Ok(None);
        };

        debug!(artifact, identifier = %identifier, "artifact resolved in catalog");

        let seed = match self.catalog.instantiate(&identifier) {
            Some(result) => result.with_context(|| format!("instantiating {identifier}"))?,
            None => return Ok(None),
        };

        if let Err(err) = check_contract(seed.as_ref()) {
            logger.warning(format!("Skipping {artifact}: {err}"));
            return Ok(None);
        }

        logger.info(format!("Successfully loaded seed: {artifact}"));
        Ok(Some(seed))
    }
}

impl<F: FileSystem> DiscoveryStrategy for CatalogDiscovery<F> {
    fn discover(
        &self,
        directory: &Path,
        namespace: &str,
        logger: &SeedLogger,
    ) -> Result<Vec<Box<dyn Seed>>> {
        if !self.ensure_directory(directory, logger)? {
            return Ok(Vec::new());
        }

        logger.info(format!("Scanning directory: {}", directory.display()));
        let files = self.artifacts(directory)?;

        if files.is_empty() {
            logger.info(format!("No Seed files found in {}", directory.display()));
            return Ok(Vec::new());
        }

        let mut seeds = Vec::new();
        for file in files {
            let Some(artifact) = file.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            if EXCLUDED_ARTIFACTS.contains(&artifact) {
                debug!(artifact, "skipping excluded artifact");
                continue;
            }

            logger.info(format!("Processing file: {}", file.display()));

            match self.load_artifact(&file, artifact, namespace, logger) {
                Ok(Some(seed)) => seeds.push(seed),
                Ok(None) => {}
                Err(err) => {
                    logger.error(format!("Error processing {}: {err:#}", file.display()));
                }
            }
        }

        Ok(seeds)
    }

    fn ensure_directory(&self, directory: &Path, logger: &SeedLogger) -> Result<bool> {
        if self.fs.is_dir(directory) {
            return Ok(true);
        }
        logger.info(format!("Seeds directory not found: {}", directory.display()));
        logger.info("Creating seeds directory...");
        self.fs.create_dir_all(directory)?;
        logger.info(format!("Seeds directory created: {}", directory.display()));
        Ok(false)
    }

    fn default_directory(&self, cwd: &Path) -> PathBuf {
        default_seeds_path(&self.fs, cwd)
    }
}

/// Identifiers tried, in order, for an artifact name.
pub fn candidate_identifiers(artifact: &str, namespace: &str) -> Vec<String> {
    let mut ids = vec![artifact.to_string()];
    let namespace = namespace.trim_matches(':');
    if !namespace.is_empty() {
        ids.push(format!("{namespace}::{artifact}"));
    }
    for fallback in FALLBACK_NAMESPACES {
        let id = format!("{fallback}::{artifact}");
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
