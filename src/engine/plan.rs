// src/engine/plan.rs

//! Pre-flight checks and dry-run planning over a [`Registry`].
//!
//! Nothing in here invokes a seed body.

use std::collections::HashSet;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{Result, SeedError};
use crate::seed::Registry;
use crate::types::SeedName;

/// What a full run would do with one seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    Run,
    /// `should_run()` currently returns false.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub seed: SeedName,
    pub action: PlannedAction,
    /// Resolved names of the seed's direct dependencies.
    pub dependencies: Vec<SeedName>,
}

/// Check every registered seed's dependencies, including those of seeds
/// that would currently be skipped.
///
/// Fails with `DependencyNotFound` for the first unresolvable identifier
/// (registration order) or `CircularDependency` naming a seed on a cycle.
pub fn validate(registry: &Registry) -> Result<()> {
    // Edge direction: dependency -> dependent.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in registry.names() {
        graph.add_node(name.as_str());
    }

    for (name, seed) in registry.iter() {
        for identifier in seed.dependencies() {
            let dep = registry.find_dependency(&identifier).ok_or_else(|| {
                SeedError::DependencyNotFound {
                    seed: name.to_string(),
                    dependency: identifier.clone(),
                }
            })?;
            if dep == name {
                return Err(SeedError::CircularDependency(name.to_string()));
            }
            graph.add_edge(dep, name, ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(SeedError::CircularDependency(cycle.node_id().to_string())),
    }
}

/// Order in which `run_all` would execute the registry, from a clean session.
///
/// Mirrors the runner's resolution: registration order at the top level,
/// dependencies depth first, skipped seeds do not pull in their
/// dependencies. Errors are the unwrapped engine errors.
pub fn plan(registry: &Registry) -> Result<Vec<PlanStep>> {
    let names: Vec<SeedName> = registry.names().to_vec();
    plan_seeds(registry, &names)
}

/// Like [`plan`], for an explicit list of top-level seeds.
pub fn plan_seeds(registry: &Registry, roots: &[SeedName]) -> Result<Vec<PlanStep>> {
    let mut planner = Planner {
        registry,
        steps: Vec::new(),
        done: HashSet::new(),
        on_stack: HashSet::new(),
    };
    for name in roots {
        planner.visit(name)?;
    }
    Ok(planner.steps)
}

struct Planner<'a> {
    registry: &'a Registry,
    steps: Vec<PlanStep>,
    done: HashSet<SeedName>,
    on_stack: HashSet<SeedName>,
}

impl Planner<'_> {
    fn visit(&mut self, name: &str) -> Result<()> {
        let seed = self
            .registry
            .get(name)
            .ok_or_else(|| SeedError::NotFound(name.to_string()))?;

        if self.done.contains(name) {
            return Ok(());
        }
        if !self.on_stack.insert(name.to_string()) {
            return Err(SeedError::CircularDependency(name.to_string()));
        }

        let result = self.visit_dependencies(name, seed.should_run(), seed.dependencies());
        self.on_stack.remove(name);
        let step = result?;

        self.done.insert(name.to_string());
        self.steps.push(step);
        Ok(())
    }

    fn visit_dependencies(
        &mut self,
        name: &str,
        should_run: bool,
        identifiers: Vec<String>,
    ) -> Result<PlanStep> {
        let mut dependencies = Vec::new();
        if should_run {
            for identifier in identifiers {
                let dep = self
                    .registry
                    .find_dependency(&identifier)
                    .ok_or_else(|| SeedError::DependencyNotFound {
                        seed: name.to_string(),
                        dependency: identifier.clone(),
                    })?
                    .to_string();
                self.visit(&dep)?;
                dependencies.push(dep);
            }
        }

        Ok(PlanStep {
            seed: name.to_string(),
            action: if should_run {
                PlannedAction::Run
            } else {
                PlannedAction::Skip
            },
            dependencies,
        })
    }
}
