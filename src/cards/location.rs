//! Board location definitions.

use serde::{Deserialize, Serialize};

use super::ids::{LocationId, Symbol};
use crate::effects::{Condition, Cost, Operation};

/// Static location data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationDefinition {
    pub id: LocationId,

    pub name: String,

    /// Symbol a card must carry to be placed here. `None` accepts any card.
    #[serde(default)]
    pub symbol_required: Option<Symbol>,

    /// Resources paid when an agent is placed.
    #[serde(default)]
    pub cost: Vec<Cost>,

    /// Operations run for the occupying player.
    #[serde(default)]
    pub effect: Vec<Operation>,

    /// Extra condition checked during move validation.
    #[serde(default)]
    pub requirement: Option<Condition>,

    /// Agent-count change applied after placement.
    #[serde(default)]
    pub agent_bonus: Option<AgentBonus>,
}

/// Locations that change how many agents a player has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentBonus {
    /// One more agent this round only.
    ExtraThisRound,
    /// Raise the agent total to the configured maximum for the rest of the game.
    Permanent,
}

impl LocationDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(id),
            name: name.into(),
            symbol_required: None,
            cost: Vec::new(),
            effect: Vec::new(),
            requirement: None,
            agent_bonus: None,
        }
    }

    /// Builder: require a placement symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol_required = Some(Symbol::new(symbol));
        self
    }

    /// Builder: add a resource cost.
    #[must_use]
    pub fn with_cost(mut self, resource: impl Into<String>, amount: i64) -> Self {
        self.cost.push(Cost::new(resource, amount));
        self
    }

    /// Builder: set the effect list.
    #[must_use]
    pub fn with_effect(mut self, ops: Vec<Operation>) -> Self {
        self.effect = ops;
        self
    }

    /// Builder: add a validation requirement.
    #[must_use]
    pub fn with_requirement(mut self, condition: Condition) -> Self {
        self.requirement = Some(condition);
        self
    }

    /// Builder: set the agent bonus.
    #[must_use]
    pub fn with_agent_bonus(mut self, bonus: AgentBonus) -> Self {
        self.agent_bonus = Some(bonus);
        self
    }

    /// Does a card with these symbols fit this location?
    #[must_use]
    pub fn accepts(&self, symbols: &[Symbol]) -> bool {
        match &self.symbol_required {
            Some(required) => symbols.contains(required),
            None => true,
        }
    }
}
