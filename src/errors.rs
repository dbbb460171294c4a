// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Seed not found: {0}")]
    NotFound(String),

    #[error("Circular dependency detected for seed: {0}")]
    CircularDependency(String),

    #[error("Dependency not found: {dependency} (required by seed {seed})")]
    DependencyNotFound { seed: String, dependency: String },

    #[error("Failed to execute seed {seed}: {source}")]
    SeedExecutionFailed {
        seed: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeedError {
    /// Innermost error behind any number of `SeedExecutionFailed` layers.
    ///
    /// A failure three seeds deep surfaces as
    /// `SeedExecutionFailed(A, SeedExecutionFailed(B, CircularDependency(A)))`;
    /// this returns the `CircularDependency`. When the innermost cause is
    /// not a `SeedError` (a seed body returned its own error), the last
    /// `SeedExecutionFailed` layer is returned.
    pub fn root_cause(&self) -> &SeedError {
        let mut current = self;
        while let SeedError::SeedExecutionFailed { source, .. } = current {
            match source.downcast_ref::<SeedError>() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    /// Seed names of every `SeedExecutionFailed` layer, outermost first.
    ///
    /// For a failure in `Users` reached through `Transactions -> Accounts`,
    /// this is `["Transactions", "Accounts", "Users"]`.
    pub fn failure_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let SeedError::SeedExecutionFailed { seed, source } = current {
            path.push(seed.as_str());
            match source.downcast_ref::<SeedError>() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        path
    }

    pub fn is_circular_dependency(&self) -> bool {
        matches!(self.root_cause(), SeedError::CircularDependency(_))
    }

    pub fn is_dependency_not_found(&self) -> bool {
        matches!(self.root_cause(), SeedError::DependencyNotFound { .. })
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SeedError>;
