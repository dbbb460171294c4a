// src/engine/state.rs

//! Per-session execution bookkeeping.

use std::collections::HashSet;

use crate::types::SeedName;

/// Where a seed currently stands within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedRunState {
    /// Not part of the registry.
    Unregistered,
    /// Registered, not yet touched in this session.
    Registered,
    /// On the current resolution chain.
    Executing,
    /// Completed (ran or was skipped) in this session.
    Executed,
}

/// `executed` / `executing` tracking for one session.
///
/// `executed` is append-only until [`ExecutionState::clear`]; `executing`
/// holds the names on the current resolution chain.
#[derive(Debug, Default)]
pub struct ExecutionState {
    executed: Vec<SeedName>,
    executed_set: HashSet<SeedName>,
    executing: HashSet<SeedName>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_executed(&self, name: &str) -> bool {
        self.executed_set.contains(name)
    }

    pub fn is_executing(&self, name: &str) -> bool {
        self.executing.contains(name)
    }

    /// Returns `false` if `name` was already executing (a cycle).
    pub fn begin(&mut self, name: &str) -> bool {
        self.executing.insert(name.to_string())
    }

    pub fn end(&mut self, name: &str) {
        self.executing.remove(name);
    }

    pub fn mark_executed(&mut self, name: &str) {
        debug_assert!(!self.executing.contains(name));
        if self.executed_set.insert(name.to_string()) {
            self.executed.push(name.to_string());
        }
    }

    pub fn executed(&self) -> &[SeedName] {
        &self.executed
    }

    pub fn executing_count(&self) -> usize {
        self.executing.len()
    }

    pub fn clear(&mut self) {
        self.executed.clear();
        self.executed_set.clear();
        self.executing.clear();
    }
}
