//! Rules configuration.
//!
//! The numeric knobs of the ruleset (hand size, agent counts, influence
//! thresholds, strength per committed troop) and the one-time faction rewards
//! live here instead of being hardcoded in the processors. `RulesConfig::default()`
//! is the standard ruleset; sessions may load an override from JSON.

use serde::{Deserialize, Serialize};

use super::faction::{Faction, FactionMap};
use super::resources::names;
use crate::cards::CardId;
use crate::effects::Gain;

/// Ruleset parameters consulted by every processor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Cards drawn into hand at round reset.
    pub hand_size: usize,

    /// Agents every player starts a game with.
    pub base_agents: u8,

    /// Agent count after a permanent extra agent has been gained.
    pub max_agents: u8,

    /// Influence needed to hold (or contest) a faction alliance.
    pub alliance_threshold: u32,

    /// Influence that first earns the one-time VP bonus on a track.
    pub first_bonus_threshold: u32,

    /// VP granted by the first-threshold bonus.
    pub first_bonus_vp: u32,

    /// VP attached to holding an alliance.
    pub alliance_vp: u32,

    /// Strength contributed by each troop committed to the conflict.
    pub strength_per_troop: i64,

    /// The card whose agent effect is replaced by the leader's signet ability.
    pub proxy_card: CardId,

    /// One-time reward for first reaching `alliance_threshold` on a track.
    pub faction_bonuses: FactionMap<Vec<Gain>>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_size: 5,
            base_agents: 2,
            max_agents: 3,
            alliance_threshold: 4,
            first_bonus_threshold: 2,
            first_bonus_vp: 1,
            alliance_vp: 1,
            strength_per_troop: 2,
            proxy_card: CardId::new("signet_ring"),
            faction_bonuses: FactionMap::new(|faction| match faction {
                Faction::Emperor => vec![Gain::resource(names::TROOPS_GARRISON, 2)],
                Faction::Guild => vec![Gain::resource(names::SOLARI, 3)],
                Faction::Fremen => vec![Gain::resource(names::WATER, 1)],
                Faction::BeneGesserit => vec![Gain::Intrigue { amount: 1 }],
            }),
        }
    }
}

impl RulesConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
