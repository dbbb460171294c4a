#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use seedrun::Seed;
use seedrun::config::{ConfigFile, RawConfigFile};

/// Shared record of which test seeds ran, in call order.
///
/// Clones share the same buffer, so one log can be handed to every seed in
/// a test and inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    entries: Rc<RefCell<Vec<String>>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.entries.borrow_mut().push(name.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.entries.borrow().iter().filter(|n| *n == name).count()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

/// Configurable seed for tests. Records its name in an [`ExecutionLog`]
/// every time `run` is called, then fails if configured to.
#[derive(Debug, Clone)]
pub struct TestSeed {
    name: String,
    dependencies: Vec<String>,
    should_run: bool,
    failure: Option<String>,
    description: String,
    log: ExecutionLog,
}

impl TestSeed {
    pub fn new(name: &str, log: &ExecutionLog) -> Self {
        Self {
            name: name.to_string(),
            dependencies: Vec::new(),
            should_run: true,
            failure: None,
            description: String::new(),
            log: log.clone(),
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.dependencies.push(dep.to_string());
        self
    }

    /// `should_run` returns `false`.
    pub fn skipped(mut self) -> Self {
        self.should_run = false;
        self
    }

    /// `run` returns an error with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    pub fn boxed(self) -> Box<dyn Seed> {
        Box::new(self)
    }
}

impl Seed for TestSeed {
    fn run(&mut self) -> anyhow::Result<()> {
        self.log.record(&self.name);
        match &self.failure {
            Some(message) => anyhow::bail!("{message}"),
            None => Ok(()),
        }
    }

    fn dependencies(&self) -> Vec<String> {
        self.dependencies.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn should_run(&self) -> bool {
        self.should_run
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn verbose(mut self, val: bool) -> Self {
        self.config.runner.verbose = val;
        self
    }

    pub fn seeds_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.runner.seeds_dir = Some(dir.into());
        self
    }

    pub fn namespace(mut self, ns: &str) -> Self {
        self.config.runner.namespace = ns.to_string();
        self
    }

    pub fn only(mut self, seed: &str) -> Self {
        self.config.run.only.push(seed.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
