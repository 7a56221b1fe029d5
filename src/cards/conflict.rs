//! Conflict card definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::ConflictId;
use crate::effects::Gain;

/// Static conflict card data. Rewards are keyed by rank: `"1"`, `"2"`, `"3"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictDefinition {
    pub id: ConflictId,

    pub name: String,

    #[serde(default)]
    pub level: u8,

    #[serde(default)]
    pub rewards: BTreeMap<String, Vec<Gain>>,
}

impl ConflictDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ConflictId::new(id),
            name: name.into(),
            level: 1,
            rewards: BTreeMap::new(),
        }
    }

    /// Builder: set the reward list for a rank.
    #[must_use]
    pub fn with_reward(mut self, rank: u8, gains: Vec<Gain>) -> Self {
        self.rewards.insert(rank.to_string(), gains);
        self
    }

    /// Rewards for a rank, empty if the rank grants nothing.
    #[must_use]
    pub fn rewards_for(&self, rank: u8) -> &[Gain] {
        self.rewards
            .get(&rank.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conflict_rewards() {
        let json = r#"{
            "id": "skirmish",
            "name": "Skirmish",
            "rewards": {
                "1": [ { "type": "victory_points", "amount": 1 } ],
                "2": [ { "type": "resource", "resource": "solari", "amount": 2 } ]
            }
        }"#;

        let conflict: ConflictDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(conflict.rewards_for(1), &[Gain::vp(1)]);
        assert_eq!(conflict.rewards_for(2), &[Gain::resource("solari", 2)]);
        assert!(conflict.rewards_for(3).is_empty());
    }
}
