// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [runner]
/// verbose = true
/// seeds_dir = "database/seeds"
/// namespace = "app::seeds"
///
/// [run]
/// only = ["Users", "Accounts"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub runner: RunnerSection,

    #[serde(default)]
    pub run: RunSection,
}

/// `[runner]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    /// Print lifecycle messages to stdout.
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    /// Seeds directory. If `None`, the default convention is used
    /// (`resources/seeds`, `database/seeds`, ...).
    #[serde(default)]
    pub seeds_dir: Option<PathBuf>,

    /// Namespace hint for catalog lookups during discovery.
    #[serde(default)]
    pub namespace: String,
}

fn default_verbose() -> bool {
    true
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            verbose: default_verbose(),
            seeds_dir: None,
            namespace: String::new(),
        }
    }
}

/// `[run]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// Run only these seeds (plus their dependencies), in this order.
    /// Empty means every registered seed.
    #[serde(default)]
    pub only: Vec<String>,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>`, so holders can rely on
/// the invariants checked in `validate.rs`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    runner: RunnerSection,
    run: RunSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(runner: RunnerSection, run: RunSection) -> Self {
        Self { runner, run }
    }

    pub fn verbose(&self) -> bool {
        self.runner.verbose
    }

    pub fn seeds_dir(&self) -> Option<&std::path::Path> {
        self.runner.seeds_dir.as_deref()
    }

    pub fn namespace(&self) -> &str {
        &self.runner.namespace
    }

    pub fn only(&self) -> &[String] {
        &self.run.only
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RunnerSection::default(), RunSection::default())
    }
}
