// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SeedError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SeedError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.runner, raw.run))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_runner(cfg)?;
    validate_run_selection(cfg)?;
    Ok(())
}

fn validate_runner(cfg: &RawConfigFile) -> Result<()> {
    if let Some(dir) = &cfg.runner.seeds_dir {
        if dir.as_os_str().is_empty() {
            return Err(SeedError::ConfigError(
                "[runner].seeds_dir must not be empty".to_string(),
            ));
        }
    }

    let ns = &cfg.runner.namespace;
    if ns.starts_with("::") || ns.ends_with("::") || ns.chars().any(char::is_whitespace) {
        return Err(SeedError::ConfigError(format!(
            "[runner].namespace '{ns}' must be a plain path like \"app::seeds\""
        )));
    }

    Ok(())
}

fn validate_run_selection(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();
    for name in &cfg.run.only {
        if name.trim().is_empty() {
            return Err(SeedError::ConfigError(
                "[run].only must not contain empty seed names".to_string(),
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(SeedError::ConfigError(format!(
                "[run].only lists seed '{name}' more than once"
            )));
        }
    }
    Ok(())
}
