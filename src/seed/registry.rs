// src/seed/registry.rs

//! Name-keyed seed storage for one session.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::seed::unit::Seed;
use crate::types::SeedName;

/// Seeds keyed by name.
///
/// Lookup is by name; listing (and therefore the default full-run order)
/// follows first registration. Re-registering a name replaces the seed in
/// place, keeping its original position.
#[derive(Default)]
pub struct Registry {
    seeds: Vec<Box<dyn Seed>>,
    names: Vec<SeedName>,
    index: HashMap<SeedName, usize>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `seed` under its name, returning the name used.
    ///
    /// Returns `true` in the second slot when an existing seed was replaced.
    pub fn insert(&mut self, seed: Box<dyn Seed>) -> (SeedName, bool) {
        let name = seed.name();
        match self.index.get(&name) {
            Some(&slot) => {
                debug!(seed = %name, "replacing previously registered seed");
                self.seeds[slot] = seed;
                (name, true)
            }
            None => {
                self.index.insert(name.clone(), self.seeds.len());
                self.seeds.push(seed);
                self.names.push(name.clone());
                (name, false)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Seed> {
        let slot = *self.index.get(name)?;
        Some(self.seeds[slot].as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Seed + 'static)> {
        let slot = *self.index.get(name)?;
        Some(self.seeds[slot].as_mut())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> &[SeedName] {
        &self.names
    }

    /// Resolve a dependency identifier to a registered seed name.
    ///
    /// An exact name match wins. Otherwise the first seed (in registration
    /// order) whose type identity equals `identifier` is used.
    pub fn find_dependency(&self, identifier: &str) -> Option<&str> {
        if let Some(&slot) = self.index.get(identifier) {
            return Some(self.names[slot].as_str());
        }
        self.seeds
            .iter()
            .position(|seed| seed.type_identity() == identifier)
            .map(|slot| self.names[slot].as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Seed)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.seeds.iter().map(|s| s.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn clear(&mut self) {
        self.seeds.clear();
        self.names.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        name: &'static str,
        marker: u32,
    }

    impl Seed for Fixture {
        fn run(&mut self) -> anyhow::Result<()> {
            Ok(())
        }

        fn name(&self) -> String {
            self.name.to_string()
        }

        fn description(&self) -> String {
            format!("marker {}", self.marker)
        }
    }

    struct UsersSeed;

    impl Seed for UsersSeed {
        fn run(&mut self) -> anyhow::Result<()> {
            Ok(())
        }

        fn name(&self) -> String {
            "users".to_string()
        }
    }

    fn fixture(name: &'static str, marker: u32) -> Box<dyn Seed> {
        Box::new(Fixture { name, marker })
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let mut reg = Registry::new();
        reg.insert(fixture("A", 1));
        reg.insert(fixture("B", 1));
        let (name, replaced) = reg.insert(fixture("A", 2));

        assert_eq!(name, "A");
        assert!(replaced);
        assert_eq!(reg.names(), ["A", "B"]);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("A").map(|s| s.description()), Some("marker 2".into()));
    }

    #[test]
    fn missing_lookup_is_none() {
        let reg = Registry::new();
        assert!(reg.get("Ghost").is_none());
        assert!(reg.find_dependency("Ghost").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn dependency_lookup_by_name_or_type_identity() {
        let mut reg = Registry::new();
        reg.insert(Box::new(UsersSeed));

        assert_eq!(reg.find_dependency("users"), Some("users"));
        assert_eq!(
            reg.find_dependency(std::any::type_name::<UsersSeed>()),
            Some("users")
        );
        assert_eq!(reg.find_dependency("UsersSeed"), None);
    }

    #[test]
    fn name_match_beats_type_identity() {
        let mut reg = Registry::new();
        let identity = std::any::type_name::<UsersSeed>();
        reg.insert(Box::new(UsersSeed));
        // A seed literally named after the type path of another seed.
        let leaked: &'static str = Box::leak(identity.to_string().into_boxed_str());
        reg.insert(fixture(leaked, 0));

        assert_eq!(reg.find_dependency(identity), Some(identity));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut reg = Registry::new();
        reg.insert(fixture("A", 1));
        reg.clear();
        assert!(reg.is_empty());
        assert!(reg.names().is_empty());
        assert!(!reg.contains("A"));
    }
}
