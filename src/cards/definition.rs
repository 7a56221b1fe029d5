//! Imperium card definitions.
//!
//! A card has two halves: the agent half (placement symbols plus an effect
//! list run when the card is played on a location) and the reveal half
//! (persuasion and strength counted during the reveal phase, with optional
//! conditional bonuses). Buyable cards also carry a persuasion price and a
//! list of gains applied on purchase.

use serde::{Deserialize, Serialize};

use super::ids::{CardId, Symbol};
use crate::core::Faction;
use crate::effects::{Gain, Operation};

/// Static card data, read-only for the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    pub name: String,

    /// Symbols the card can be placed with.
    #[serde(default)]
    pub agent_symbols: Vec<Symbol>,

    /// Operations run when the card is played with an agent.
    #[serde(default)]
    pub agent_effect: Vec<Operation>,

    #[serde(default)]
    pub reveal: RevealEffect,

    /// Persuasion price in the market. `None` means the card cannot be bought.
    #[serde(default)]
    pub buy_cost: Option<i64>,

    /// Gains applied once when the card is bought.
    #[serde(default)]
    pub buy_effect: Vec<Gain>,
}

impl CardDefinition {
    /// Create a card with no symbols, effects, or reveal value.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            agent_symbols: Vec::new(),
            agent_effect: Vec::new(),
            reveal: RevealEffect::default(),
            buy_cost: None,
            buy_effect: Vec::new(),
        }
    }

    /// Builder: add a placement symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.agent_symbols.push(Symbol::new(symbol));
        self
    }

    /// Builder: set the agent effect list.
    #[must_use]
    pub fn with_agent_effect(mut self, ops: Vec<Operation>) -> Self {
        self.agent_effect = ops;
        self
    }

    /// Builder: set base reveal values.
    #[must_use]
    pub fn with_reveal(mut self, persuasion: i64, strength: i64) -> Self {
        self.reveal.persuasion = persuasion;
        self.reveal.strength = strength;
        self
    }

    /// Builder: add a conditional reveal bonus.
    #[must_use]
    pub fn with_reveal_bonus(mut self, bonus: RevealBonus) -> Self {
        self.reveal.bonuses.push(bonus);
        self
    }

    /// Builder: make the card buyable.
    #[must_use]
    pub fn with_buy_cost(mut self, persuasion: i64) -> Self {
        self.buy_cost = Some(persuasion);
        self
    }

    /// Builder: set the purchase gains.
    #[must_use]
    pub fn with_buy_effect(mut self, gains: Vec<Gain>) -> Self {
        self.buy_effect = gains;
        self
    }

    /// Does the card carry this placement symbol?
    #[must_use]
    pub fn has_symbol(&self, symbol: &Symbol) -> bool {
        self.agent_symbols.contains(symbol)
    }

    #[must_use]
    pub fn is_buyable(&self) -> bool {
        self.buy_cost.is_some()
    }
}

/// The reveal half of a card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealEffect {
    #[serde(default)]
    pub persuasion: i64,

    #[serde(default)]
    pub strength: i64,

    #[serde(default)]
    pub bonuses: Vec<RevealBonus>,

    /// Reveal text the engine does not encode, shown for manual handling.
    #[serde(default)]
    pub description: Option<String>,
}

/// A conditional bonus on top of a card's base reveal values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealBonus {
    pub when: RevealPredicate,

    #[serde(default)]
    pub persuasion: i64,

    #[serde(default)]
    pub strength: i64,
}

/// Predicates a reveal bonus can depend on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RevealPredicate {
    /// The player holds the faction alliance.
    AllyOf { faction: Faction },

    /// A card with this symbol was played with an agent this round.
    PlayedTag { symbol: Symbol },

    /// Scaled by the number of cards with this symbol played this round or
    /// still in hand, not counting copies of the card itself.
    PerTaggedCard { symbol: Symbol },
}
