//! Named resource counters.
//!
//! Resources are game-defined names (solari, spice, water, garrison troops,
//! troops committed to the conflict). Counters never go below zero: an
//! overdraft is clamped at 0 rather than rejected, so callers that need a
//! hard affordability check use `can_afford` first.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Well-known resource names.
pub mod names {
    pub const SOLARI: &str = "solari";
    pub const SPICE: &str = "spice";
    pub const WATER: &str = "water";
    /// Troops waiting in the garrison.
    pub const TROOPS_GARRISON: &str = "troops_garrison";
    /// Troops committed to the current conflict.
    pub const TROOPS_IN_CONFLICT: &str = "troops_in_conflict";

    /// Map content aliases onto stored counter names. Plain `"troops"`
    /// always lands in the garrison.
    #[must_use]
    pub fn canonical(resource: &str) -> &str {
        match resource {
            "troops" => TROOPS_GARRISON,
            other => other,
        }
    }
}

/// A player's resource counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resources {
    counters: FxHashMap<String, i64>,
}

impl Resources {
    /// Create an empty set of counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style initial value.
    #[must_use]
    pub fn with(mut self, resource: impl Into<String>, amount: i64) -> Self {
        self.set(resource, amount);
        self
    }

    /// Current amount (0 for a resource never seen).
    #[must_use]
    pub fn get(&self, resource: &str) -> i64 {
        self.counters.get(resource).copied().unwrap_or(0)
    }

    /// Set a counter, clamped at 0.
    pub fn set(&mut self, resource: impl Into<String>, amount: i64) {
        self.counters.insert(resource.into(), amount.max(0));
    }

    /// Add a (possibly negative) delta, clamped at 0. Returns the new value.
    pub fn add(&mut self, resource: &str, delta: i64) -> i64 {
        let next = (self.get(resource) + delta).max(0);
        self.counters.insert(resource.to_string(), next);
        next
    }

    /// Remove up to `amount`, clamping at 0. Returns the amount actually removed.
    pub fn take(&mut self, resource: &str, amount: i64) -> i64 {
        let current = self.get(resource);
        let removed = amount.clamp(0, current);
        self.counters.insert(resource.to_string(), current - removed);
        removed
    }

    /// Check whether `amount` of `resource` is available.
    #[must_use]
    pub fn can_afford(&self, resource: &str, amount: i64) -> bool {
        self.get(resource) >= amount
    }

    /// Iterate over (name, amount) pairs in name order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, i64)> {
        let mut entries: Vec<_> = self.counters.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overdraft_clamps_at_zero() {
        let mut res = Resources::new().with(names::SOLARI, 2);

        assert_eq!(res.take(names::SOLARI, 5), 2);
        assert_eq!(res.get(names::SOLARI), 0);

        assert_eq!(res.add(names::WATER, -3), 0);
    }

    #[test]
    fn test_set_never_negative() {
        let mut res = Resources::new();
        res.set(names::SPICE, -4);
        assert_eq!(res.get(names::SPICE), 0);
    }

    #[test]
    fn test_can_afford() {
        let res = Resources::new().with(names::SPICE, 3);
        assert!(res.can_afford(names::SPICE, 3));
        assert!(!res.can_afford(names::SPICE, 4));
        assert!(res.can_afford(names::WATER, 0));
    }

    #[test]
    fn test_iter_sorted() {
        let res = Resources::new().with("water", 1).with("solari", 2);
        let names: Vec<_> = res.iter_sorted().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["solari", "water"]);
    }

    #[test]
    fn test_troops_alias() {
        assert_eq!(names::canonical("troops"), names::TROOPS_GARRISON);
        assert_eq!(names::canonical("spice"), "spice");
    }
}
