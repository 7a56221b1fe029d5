//! Leader definitions.

use serde::{Deserialize, Serialize};

use super::capability::Capability;
use crate::cards::LeaderId;
use crate::effects::Operation;

/// Static leader data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderDefinition {
    pub id: LeaderId,

    pub name: String,

    #[serde(default)]
    pub passive: Capability,

    #[serde(default)]
    pub signet: Option<SignetAbility>,
}

/// Operations run in place of the proxy card's own effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignetAbility {
    pub name: String,

    #[serde(default)]
    pub effect: Vec<Operation>,
}

impl LeaderDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: LeaderId::new(id),
            name: name.into(),
            passive: Capability::None,
            signet: None,
        }
    }

    /// Builder: set the passive capability.
    #[must_use]
    pub fn with_passive(mut self, passive: Capability) -> Self {
        self.passive = passive;
        self
    }

    /// Builder: set the signet ability.
    #[must_use]
    pub fn with_signet(mut self, name: impl Into<String>, effect: Vec<Operation>) -> Self {
        self.signet = Some(SignetAbility {
            name: name.into(),
            effect,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Symbol;

    #[test]
    fn test_parse_leader_json() {
        let json = r#"{
            "id": "leto",
            "name": "Duke Leto Atreides",
            "passive": { "kind": "cost_discount", "symbol": "landsraad", "resource": "solari", "amount": 1 },
            "signet": { "name": "Landsraad Popularity",
                        "effect": [ { "gain": { "type": "resource", "resource": "solari", "amount": 1 } } ] }
        }"#;

        let leader: LeaderDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(
            leader.passive,
            Capability::CostDiscount {
                symbol: Symbol::new("landsraad"),
                resource: "solari".to_string(),
                amount: 1,
            }
        );
        assert_eq!(leader.signet.unwrap().effect.len(), 1);
    }

    #[test]
    fn test_leader_without_abilities() {
        let leader: LeaderDefinition = serde_json::from_str(r#"{ "id": "paul", "name": "Paul" }"#).unwrap();
        assert_eq!(leader.passive, Capability::None);
        assert!(leader.signet.is_none());
    }
}
