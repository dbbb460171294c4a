// src/seed/unit.rs

use crate::errors::{Result, SeedError};

/// A unit of seeding work with declared prerequisites.
///
/// Only [`Seed::run`] is required. Everything else has a default:
///
/// ```
/// use seedrun::Seed;
///
/// struct UsersSeed;
///
/// impl Seed for UsersSeed {
///     fn run(&mut self) -> anyhow::Result<()> {
///         // insert users...
///         Ok(())
///     }
/// }
///
/// assert_eq!(UsersSeed.name(), "UsersSeed");
/// assert!(UsersSeed.dependencies().is_empty());
/// ```
///
/// Dependencies may name another seed either by its [`Seed::name`] or by
/// its [`Seed::type_identity`] (e.g. `std::any::type_name::<UsersSeed>()`).
pub trait Seed {
    /// Perform the seeding side effect.
    ///
    /// Should be safe to call when the data already exists. Errors are
    /// wrapped by the runner into `SeedExecutionFailed`.
    fn run(&mut self) -> anyhow::Result<()>;

    /// Identifiers of seeds that must run before this one, in order.
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Unique, stable identifier. Defaults to the type's short name.
    fn name(&self) -> String {
        short_type_name(self.type_identity()).to_string()
    }

    /// Return `false` to skip this seed (and its dependency chain).
    fn should_run(&self) -> bool {
        true
    }

    fn description(&self) -> String {
        String::new()
    }

    /// Fully-qualified type path of the implementation.
    fn type_identity(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Last `::` segment of a type path, ignoring generic arguments.
///
/// `my_app::seeds::UsersSeed` becomes `UsersSeed`;
/// `my_app::Wrapper<my_app::Inner>` becomes `Wrapper`.
pub fn short_type_name(type_path: &str) -> &str {
    let base = type_path.split('<').next().unwrap_or(type_path);
    base.rsplit("::").next().unwrap_or(base)
}

/// Check that a seed satisfies the runner's contract.
///
/// - name is non-empty and has no surrounding whitespace
/// - every dependency identifier is non-empty
pub fn check_contract(seed: &dyn Seed) -> Result<()> {
    let name = seed.name();
    if name.trim().is_empty() {
        return Err(SeedError::InvalidInput(format!(
            "seed of type '{}' has an empty name",
            seed.type_identity()
        )));
    }
    if name.trim() != name {
        return Err(SeedError::InvalidInput(format!(
            "seed name '{name}' has leading or trailing whitespace"
        )));
    }
    for dep in seed.dependencies() {
        if dep.trim().is_empty() {
            return Err(SeedError::InvalidInput(format!(
                "seed '{name}' declares an empty dependency identifier"
            )));
        }
    }
    Ok(())
}
