// src/template.rs

//! Starter seed shipped with the binary.
//!
//! A project's seeds directory only needs an `ExampleSeed.rs` (or any
//! `ExampleSeed.*`) artifact for discovery to pick this up through
//! [`builtin_catalog`]. Copy it as the starting point for real seeds.

use tracing::info;

use crate::discovery::SeedCatalog;
use crate::seed::Seed;

/// Demonstrates the shape of a seed. Add real inserts in `run`.
#[derive(Debug, Default)]
pub struct ExampleSeed {
    runs: usize,
}

impl ExampleSeed {
    pub fn runs(&self) -> usize {
        self.runs
    }
}

impl Seed for ExampleSeed {
    fn run(&mut self) -> anyhow::Result<()> {
        info!(seed = %self.name(), "{}", self.description());
        // e.g. insert a test user if the table is empty
        self.runs += 1;
        Ok(())
    }

    fn name(&self) -> String {
        "ExampleSeed".to_string()
    }

    fn description(&self) -> String {
        "Example seed that demonstrates the basic structure and usage of seeds".to_string()
    }
}

/// Catalog with the seeds bundled in this crate.
pub fn builtin_catalog() -> SeedCatalog {
    SeedCatalog::new().with_type::<ExampleSeed>("ExampleSeed")
}
