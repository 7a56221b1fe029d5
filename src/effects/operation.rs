//! Operation definitions.
//!
//! An `Operation` is one step of a declarative effect list carried by a card,
//! location, signet ability, or intrigue. Content is deserialised straight
//! into these types when it is loaded, so the interpreter only ever matches
//! on a closed set of variants.
//!
//! ## JSON shape
//!
//! ```json
//! [
//!   { "requirement": { "type": "won_conflict" } },
//!   { "gain": { "type": "resource", "resource": "spice", "amount": 1 } },
//!   { "pay": [ { "resource": "water", "amount": 1 } ] },
//!   { "exchange": { "pay": [ { "resource": "solari", "amount": 2 } ],
//!                   "gain": [ { "type": "influence", "faction": "emperor", "amount": 1 } ] } },
//!   { "choice": [ [ { "gain": { "type": "strength", "amount": 2 } } ],
//!                 [ { "gain": { "type": "persuasion", "amount": 2 } } ] ] },
//!   "destroy_source"
//! ]
//! ```

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use crate::cards::LocationId;
use crate::core::Faction;

/// A single step in an effect list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Halt the rest of the list unless the condition holds.
    Requirement(Condition),

    /// Unconditional gain.
    Gain(Gain),

    /// Optional payment. Needs caller consent; every cost must be affordable
    /// before any is deducted.
    Pay(Vec<Cost>),

    /// Optional pay-then-gain bundle. Needs caller consent.
    Exchange {
        pay: Vec<Cost>,
        gain: Vec<Gain>,
    },

    /// Caller picks one alternative by index; the alternative is run as a
    /// nested list with the same decision.
    Choice(Vec<Vec<Operation>>),

    /// Send the card that carries this effect to the destroyed pile instead
    /// of the discard pile.
    DestroySource,
}

impl Operation {
    /// Shorthand for `Operation::Gain`.
    #[must_use]
    pub fn gain(gain: Gain) -> Self {
        Self::Gain(gain)
    }

    /// Shorthand for a single-cost optional payment.
    #[must_use]
    pub fn pay(resource: impl Into<String>, amount: i64) -> Self {
        Self::Pay(vec![Cost::new(resource, amount)])
    }

    /// Does this step need a consent flag or choice index from the caller?
    #[must_use]
    pub fn needs_decision(&self) -> bool {
        matches!(self, Self::Pay(_) | Self::Exchange { .. } | Self::Choice(_))
    }
}

/// Something a player receives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gain {
    /// Flat resource counter (solari, spice, water, troops...).
    Resource { resource: String, amount: i64 },

    /// Victory points.
    VictoryPoints { amount: u32 },

    /// Persuasion for the coming reveal.
    Persuasion { amount: i64 },

    /// Temporary combat strength for the current conflict.
    Strength { amount: i64 },

    /// Faction influence. Triggers alliance bookkeeping.
    Influence { faction: Faction, amount: i64 },

    /// Intrigue cards from the shared intrigue deck.
    Intrigue { amount: u32 },

    /// Cards from the player's own draw deck.
    DrawCards { amount: u32 },

    /// A control marker on a board location.
    Control { location: LocationId },

    /// Effect text the engine does not encode.
    Manual { description: String },
}

impl Gain {
    /// Shorthand for a resource gain.
    #[must_use]
    pub fn resource(resource: impl Into<String>, amount: i64) -> Self {
        Self::Resource {
            resource: resource.into(),
            amount,
        }
    }

    /// Shorthand for an influence gain.
    #[must_use]
    pub fn influence(faction: Faction, amount: i64) -> Self {
        Self::Influence { faction, amount }
    }

    /// Shorthand for victory points.
    #[must_use]
    pub fn vp(amount: u32) -> Self {
        Self::VictoryPoints { amount }
    }

    /// Human-readable description used in audit lines and reward text.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Gain::Resource { resource, amount } => format!("{} {}", amount, resource),
            Gain::VictoryPoints { amount } => format!("{} VP", amount),
            Gain::Persuasion { amount } => format!("{} persuasion", amount),
            Gain::Strength { amount } => format!("{} strength", amount),
            Gain::Influence { faction, amount } => format!("{} {} influence", amount, faction),
            Gain::Intrigue { amount } => format!("{} intrigue card(s)", amount),
            Gain::DrawCards { amount } => format!("{} card draw(s)", amount),
            Gain::Control { location } => format!("control of {}", location),
            Gain::Manual { description } => description.clone(),
        }
    }
}

/// A resource amount to be paid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub resource: String,
    pub amount: i64,
}

impl Cost {
    /// Create a cost.
    #[must_use]
    pub fn new(resource: impl Into<String>, amount: i64) -> Self {
        Self {
            resource: resource.into(),
            amount,
        }
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.resource)
    }
}
