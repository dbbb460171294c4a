// src/engine/resolver.rs

//! Depth-first dependency resolution and seed execution.
//!
//! [`Resolver`] borrows the registry, the session state and the logger from
//! a [`crate::engine::SeedRunner`] for the duration of one call.

use std::ops::{Deref, DerefMut};
use std::time::Instant;

use tracing::{debug, info};

use crate::errors::{Result, SeedError};
use crate::engine::state::ExecutionState;
use crate::logging::SeedLogger;
use crate::seed::Registry;

/// How a seed left `run_seed` when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedOutcome {
    /// Already in `executed`; nothing happened.
    AlreadyExecuted,
    /// `should_run()` returned false.
    Skipped,
    /// Body ran; wall-clock duration in milliseconds.
    Ran { elapsed_ms: f64 },
}

pub struct Resolver<'a> {
    registry: &'a mut Registry,
    state: &'a mut ExecutionState,
    logger: &'a SeedLogger,
}

impl<'a> Resolver<'a> {
    pub fn new(
        registry: &'a mut Registry,
        state: &'a mut ExecutionState,
        logger: &'a SeedLogger,
    ) -> Self {
        Self {
            registry,
            state,
            logger,
        }
    }

    /// Run `name`, its dependencies first.
    ///
    /// Errors from dependency resolution or from the seed body come back as
    /// `SeedExecutionFailed` for this seed, wrapping the cause. `NotFound`
    /// and `CircularDependency` for `name` itself are returned unwrapped;
    /// the caller one level up wraps them.
    pub fn run_seed(&mut self, name: &str) -> Result<SeedOutcome> {
        if !self.registry.contains(name) {
            let err = SeedError::NotFound(name.to_string());
            self.logger.error(err.to_string());
            return Err(err);
        }

        if self.state.is_executed(name) {
            self.logger
                .info(format!("Seed {name} already executed, skipping..."));
            return Ok(SeedOutcome::AlreadyExecuted);
        }

        if !self.state.begin(name) {
            return Err(SeedError::CircularDependency(name.to_string()));
        }

        let outcome = {
            let mut guard = ExecutingGuard {
                resolver: self,
                name: name.to_string(),
            };
            guard.execute(name)
        };

        match outcome {
            Ok(outcome) => {
                self.state.mark_executed(name);
                Ok(outcome)
            }
            Err(cause) => {
                self.logger.error(format!("Seed {name} failed: {cause}"));
                Err(SeedError::SeedExecutionFailed {
                    seed: name.to_string(),
                    source: cause,
                })
            }
        }
    }

    /// Steps 5-7: skip check, dependencies, body. Runs with `name` in
    /// `executing`.
    fn execute(&mut self, name: &str) -> anyhow::Result<SeedOutcome> {
        let seed = self
            .registry
            .get(name)
            .ok_or_else(|| SeedError::NotFound(name.to_string()))?;

        if !seed.should_run() {
            self.logger
                .info(format!("Seed {name} skipped (should_run returned false)"));
            return Ok(SeedOutcome::Skipped);
        }

        let dependencies = seed.dependencies();
        let description = seed.description();

        for identifier in dependencies {
            let dep_name = self
                .registry
                .find_dependency(&identifier)
                .map(str::to_string)
                .ok_or_else(|| SeedError::DependencyNotFound {
                    seed: name.to_string(),
                    dependency: identifier.clone(),
                })?;
            debug!(seed = %name, dependency = %dep_name, "resolving dependency");
            self.run_seed(&dep_name)?;
        }

        self.logger.info(format!("Executing seed: {name}"));
        self.logger.info(format!("Description: {description}"));

        let seed = self
            .registry
            .get_mut(name)
            .ok_or_else(|| SeedError::NotFound(name.to_string()))?;

        let started = Instant::now();
        seed.run()?;
        let elapsed_ms = round_ms(started.elapsed().as_secs_f64() * 1000.0);

        info!(seed = %name, elapsed_ms, "seed body finished");
        self.logger.info(format!(
            "Seed {name} completed successfully in {elapsed_ms}ms"
        ));

        Ok(SeedOutcome::Ran { elapsed_ms })
    }
}

/// Removes the seed from `executing` on every exit path, unwinding included.
struct ExecutingGuard<'r, 'a> {
    resolver: &'r mut Resolver<'a>,
    name: String,
}

impl<'a> Deref for ExecutingGuard<'_, 'a> {
    type Target = Resolver<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.resolver
    }
}

impl DerefMut for ExecutingGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.resolver
    }
}

impl Drop for ExecutingGuard<'_, '_> {
    fn drop(&mut self) {
        self.resolver.state.end(&self.name);
    }
}

fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<String>>>;

    struct Step {
        name: &'static str,
        deps: Vec<String>,
        calls: Calls,
        fail: bool,
    }

    impl Seed for Step {
        fn run(&mut self) -> anyhow::Result<()> {
            self.calls.borrow_mut().push(self.name.to_string());
            if self.fail {
                anyhow::bail!("{} exploded", self.name);
            }
            Ok(())
        }

        fn name(&self) -> String {
            self.name.to_string()
        }

        fn dependencies(&self) -> Vec<String> {
            self.deps.clone()
        }
    }

    fn step(name: &'static str, deps: &[&str], calls: &Calls) -> Box<dyn Seed> {
        Box::new(Step {
            name,
            deps: deps.iter().map(|d| d.to_string()).collect(),
            calls: Rc::clone(calls),
            fail: false,
        })
    }

    #[test]
    fn dependencies_run_before_dependents() {
        let calls = Calls::default();
        let mut registry = Registry::new();
        registry.insert(step("C", &["B"], &calls));
        registry.insert(step("B", &["A"], &calls));
        registry.insert(step("A", &[], &calls));
        let mut state = ExecutionState::new();
        let logger = SeedLogger::silent();

        let outcome = Resolver::new(&mut registry, &mut state, &logger)
            .run_seed("C")
            .unwrap();

        assert!(matches!(outcome, SeedOutcome::Ran { .. }));
        assert_eq!(*calls.borrow(), ["A", "B", "C"]);
        assert_eq!(state.executed(), ["A", "B", "C"]);
        assert_eq!(state.executing_count(), 0);
    }

    #[test]
    fn second_call_reports_already_executed() {
        let calls = Calls::default();
        let mut registry = Registry::new();
        registry.insert(step("A", &[], &calls));
        let mut state = ExecutionState::new();
        let logger = SeedLogger::silent();
        let mut resolver = Resolver::new(&mut registry, &mut state, &logger);

        resolver.run_seed("A").unwrap();
        assert_eq!(resolver.run_seed("A").unwrap(), SeedOutcome::AlreadyExecuted);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn body_failure_is_wrapped_and_cleaned_up() {
        let calls = Calls::default();
        let mut registry = Registry::new();
        registry.insert(Box::new(Step {
            name: "A",
            deps: vec![],
            calls: Rc::clone(&calls),
            fail: true,
        }));
        registry.insert(step("B", &["A"], &calls));
        let mut state = ExecutionState::new();
        let logger = SeedLogger::silent();

        let err = Resolver::new(&mut registry, &mut state, &logger)
            .run_seed("B")
            .unwrap_err();

        assert_eq!(err.failure_path(), vec!["B", "A"]);
        assert_eq!(*calls.borrow(), ["A"]);
        assert!(state.executed().is_empty());
        assert_eq!(state.executing_count(), 0);
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let calls = Calls::default();
        let mut registry = Registry::new();
        registry.insert(step("Loop", &["Loop"], &calls));
        let mut state = ExecutionState::new();
        let logger = SeedLogger::silent();

        let err = Resolver::new(&mut registry, &mut state, &logger)
            .run_seed("Loop")
            .unwrap_err();

        assert!(err.is_circular_dependency());
        assert!(calls.borrow().is_empty());
        assert_eq!(state.executing_count(), 0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_ms(1.23456), 1.23);
        assert_eq!(round_ms(0.005), 0.01);
    }
}
