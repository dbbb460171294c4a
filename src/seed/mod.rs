// src/seed/mod.rs

//! Seed units and the registry that holds them.
//!
//! - [`unit`] defines the [`Seed`] trait every fixture implements, and the
//!   contract check applied to seeds coming from untrusted sources.
//! - [`registry`] stores seeds by name for one session, preserving
//!   registration order for full runs.

pub mod registry;
pub mod unit;

pub use registry::Registry;
pub use unit::{check_contract, short_type_name, Seed};
