// src/engine/mod.rs

//! Seed execution engine.
//!
//! - [`state`] tracks which seeds have run and which are on the current
//!   resolution chain.
//! - [`resolver`] is the depth-first state machine behind `run_seed`.
//! - [`plan`] validates the registered graph and produces dry-run plans
//!   without invoking any seed body.
//! - [`runner`] exposes the session-level API ([`SeedRunner`]).

pub mod plan;
pub mod resolver;
pub mod runner;
pub mod state;

pub use plan::{PlanStep, PlannedAction};
pub use resolver::SeedOutcome;
pub use runner::{RunnerOptions, SeedRunner};
pub use state::SeedRunState;
