// src/discovery/catalog.rs

//! Registered-factory table that discovery resolves artifact names against.

use std::collections::BTreeMap;
use std::fmt;

use crate::seed::Seed;

/// Builds a fresh seed instance. Errors are logged by discovery and the
/// artifact is skipped.
pub type SeedFactory = Box<dyn Fn() -> anyhow::Result<Box<dyn Seed>>>;

/// Identifier → factory table.
///
/// Identifiers are matched verbatim; `CatalogDiscovery` tries a bare name
/// and several namespaced forms (`<namespace>::UsersSeed`,
/// `app::seeds::UsersSeed`, `database::seeds::UsersSeed`).
#[derive(Default)]
pub struct SeedCatalog {
    entries: BTreeMap<String, SeedFactory>,
}

impl fmt::Debug for SeedCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedCatalog")
            .field("identifiers", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SeedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `identifier`, replacing any previous one.
    pub fn register<F>(&mut self, identifier: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> anyhow::Result<Box<dyn Seed>> + 'static,
    {
        self.entries.insert(identifier.into(), Box::new(factory));
        self
    }

    /// Register `S::default()` under its fully-qualified type path.
    pub fn register_type<S>(&mut self) -> &mut Self
    where
        S: Seed + Default + 'static,
    {
        self.register_type_as::<S>(std::any::type_name::<S>())
    }

    /// Register `S::default()` under an explicit identifier.
    pub fn register_type_as<S>(&mut self, identifier: impl Into<String>) -> &mut Self
    where
        S: Seed + Default + 'static,
    {
        self.register(identifier, || Ok(Box::new(S::default()) as Box<dyn Seed>))
    }

    /// Builder-style [`SeedCatalog::register_type_as`].
    pub fn with_type<S>(mut self, identifier: impl Into<String>) -> Self
    where
        S: Seed + Default + 'static,
    {
        self.register_type_as::<S>(identifier);
        self
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Run the factory for `identifier`, if registered.
    pub fn instantiate(&self, identifier: &str) -> Option<anyhow::Result<Box<dyn Seed>>> {
        self.entries.get(identifier).map(|factory| factory())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
