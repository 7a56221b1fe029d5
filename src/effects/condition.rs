//! Requirement conditions.
//!
//! A `Requirement` step halts the rest of its effect list when its condition
//! does not hold. Conditions the engine cannot check (free-text rules) are
//! assumed met and flagged for manual resolution.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, LocationId};
use crate::core::{effect_names, Faction, GameState, PlayerId};

/// A condition checked against one player's position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// The player won the conflict this round.
    WonConflict,

    /// The player owns at least `count` copies of a card.
    MinCardCopies { card: CardId, count: usize },

    /// At least `tracks` factions have influence of `min_level` or more.
    InfluenceTracks { min_level: u32, tracks: usize },

    /// Influence with one faction is at least `amount`.
    MinInfluence { faction: Faction, amount: u32 },

    /// The player has an agent on the given location.
    OccupiesLocation { location: LocationId },

    /// The player holds the faction's alliance.
    AllyOf { faction: Faction },

    /// Free-text requirement the engine cannot check.
    Manual { description: String },
}

/// Result of checking a condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionCheck {
    /// Whether the chain may continue.
    pub met: bool,
    /// Audit note, if any.
    pub note: Option<String>,
}

impl ConditionCheck {
    fn met() -> Self {
        Self { met: true, note: None }
    }

    fn unmet(note: String) -> Self {
        Self {
            met: false,
            note: Some(note),
        }
    }
}

/// Evaluator for requirement conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check a condition for `player`. An unknown player never meets anything.
    #[must_use]
    pub fn evaluate(condition: &Condition, game: &GameState, player: PlayerId) -> ConditionCheck {
        let Some(state) = game.player(player) else {
            return ConditionCheck::unmet(format!("requirement not met: unknown player {}", player));
        };

        match condition {
            Condition::WonConflict => {
                if state.effect(effect_names::WON_CONFLICT) > 0 {
                    ConditionCheck::met()
                } else {
                    ConditionCheck::unmet("requirement not met: must win the conflict".to_string())
                }
            }

            Condition::MinCardCopies { card, count } => {
                let owned = state.deck_pool.iter().filter(|c| *c == card).count();
                if owned >= *count {
                    ConditionCheck::met()
                } else {
                    ConditionCheck::unmet(format!(
                        "requirement not met: at least {} {} (has {})",
                        count, card, owned
                    ))
                }
            }

            Condition::InfluenceTracks { min_level, tracks } => {
                let qualifying = state.influence.values().filter(|v| **v >= *min_level).count();
                if qualifying >= *tracks {
                    ConditionCheck::met()
                } else {
                    ConditionCheck::unmet(format!(
                        "requirement not met: {} influence on {} faction tracks (has {})",
                        min_level, tracks, qualifying
                    ))
                }
            }

            Condition::MinInfluence { faction, amount } => {
                let has = state.influence[*faction];
                if has >= *amount {
                    ConditionCheck::met()
                } else {
                    ConditionCheck::unmet(format!(
                        "requirement not met: {} {} influence (has {})",
                        amount, faction, has
                    ))
                }
            }

            Condition::OccupiesLocation { location } => {
                if game.occupant(location) == Some(player) {
                    ConditionCheck::met()
                } else {
                    ConditionCheck::unmet(format!("requirement not met: agent on {}", location))
                }
            }

            Condition::AllyOf { faction } => {
                if game.alliances[*faction] == Some(player) {
                    ConditionCheck::met()
                } else {
                    ConditionCheck::unmet(format!("requirement not met: alliance with {}", faction))
                }
            }

            Condition::Manual { description } => ConditionCheck {
                met: true,
                note: Some(format!(
                    "needs manual resolution: requirement '{}' (assumed met)",
                    description
                )),
            },
        }
    }
}
