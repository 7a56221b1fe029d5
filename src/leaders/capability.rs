//! Typed leader capability hooks.
//!
//! Placement and payment code asks the acting player's capability for
//! adjustments at fixed points of a move. Every hook has a neutral default,
//! so a capability only overrides the hooks it cares about.

use serde::{Deserialize, Serialize};

use crate::cards::{LocationDefinition, LocationId, Symbol};
use crate::core::names;
use crate::effects::{Cost, Gain, Operation};

/// A resource payment made while placing an agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    pub resource: String,
    /// Cost printed on the location.
    pub listed: i64,
    /// Amount actually paid after discounts.
    pub paid: i64,
}

/// Hooks a leader capability can provide.
pub trait LeaderCapability {
    /// Amount to subtract from `cost` when placing on `location`.
    fn cost_discount(&self, _location: &LocationDefinition, _cost: &Cost) -> i64 {
        0
    }

    /// Extra operations triggered by a location payment.
    fn after_payment(&self, _payment: &Payment) -> Vec<Operation> {
        Vec::new()
    }

    /// May the player place on `location` while it is occupied?
    fn allows_occupied(&self, _location: &LocationDefinition) -> bool {
        false
    }

    /// Extra operations for occupying `location`.
    fn location_bonus(&self, _location: &LocationDefinition) -> Vec<Operation> {
        Vec::new()
    }

    /// Gains applied once when the game is set up.
    fn starting_bonus(&self) -> Vec<Gain> {
        Vec::new()
    }
}

/// Passive leader capabilities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Capability {
    #[default]
    None,

    /// Cheaper `resource` costs on locations requiring `symbol`.
    CostDiscount {
        symbol: Symbol,
        resource: String,
        amount: i64,
    },

    /// Draw cards whenever `resource` is actually paid for a location.
    DrawOnPayment { resource: String, cards: u32 },

    /// Placement on occupied locations requiring one of `symbols`.
    OccupiedPlacement { symbols: Vec<Symbol> },

    /// Extra gains whenever the player occupies `location`.
    LocationBonus { location: LocationId, gain: Vec<Gain> },

    /// Gains applied at game setup.
    StartingBonus { gain: Vec<Gain> },
}

impl LeaderCapability for Capability {
    fn cost_discount(&self, location: &LocationDefinition, cost: &Cost) -> i64 {
        match self {
            Capability::CostDiscount { symbol, resource, amount }
                if same_resource(resource, &cost.resource) && location.symbol_required.as_ref() == Some(symbol) =>
            {
                (*amount).min(cost.amount).max(0)
            }
            _ => 0,
        }
    }

    fn after_payment(&self, payment: &Payment) -> Vec<Operation> {
        match self {
            Capability::DrawOnPayment { resource, cards }
                if same_resource(resource, &payment.resource) && payment.paid > 0 =>
            {
                vec![Operation::gain(Gain::DrawCards { amount: *cards })]
            }
            _ => Vec::new(),
        }
    }

    fn allows_occupied(&self, location: &LocationDefinition) -> bool {
        match (self, &location.symbol_required) {
            (Capability::OccupiedPlacement { symbols }, Some(required)) => symbols.contains(required),
            _ => false,
        }
    }

    fn location_bonus(&self, location: &LocationDefinition) -> Vec<Operation> {
        match self {
            Capability::LocationBonus { location: target, gain } if *target == location.id => {
                gain.iter().cloned().map(Operation::gain).collect()
            }
            _ => Vec::new(),
        }
    }

    fn starting_bonus(&self) -> Vec<Gain> {
        match self {
            Capability::StartingBonus { gain } => gain.clone(),
            _ => Vec::new(),
        }
    }
}

fn same_resource(a: &str, b: &str) -> bool {
    names::canonical(a) == names::canonical(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landsraad_location() -> LocationDefinition {
        LocationDefinition::new("high_council", "High Council")
            .with_symbol("landsraad")
            .with_cost("solari", 5)
    }

    #[test]
    fn test_cost_discount_matches_symbol_and_resource() {
        let cap = Capability::CostDiscount {
            symbol: Symbol::new("landsraad"),
            resource: "solari".to_string(),
            amount: 1,
        };
        let location = landsraad_location();

        assert_eq!(cap.cost_discount(&location, &Cost::new("solari", 5)), 1);
        assert_eq!(cap.cost_discount(&location, &Cost::new("spice", 5)), 0);

        let other = LocationDefinition::new("arrakeen", "Arrakeen").with_symbol("city");
        assert_eq!(cap.cost_discount(&other, &Cost::new("solari", 2)), 0);
    }

    #[test]
    fn test_cost_discount_never_exceeds_cost() {
        let cap = Capability::CostDiscount {
            symbol: Symbol::new("landsraad"),
            resource: "solari".to_string(),
            amount: 3,
        };
        assert_eq!(cap.cost_discount(&landsraad_location(), &Cost::new("solari", 1)), 1);
    }

    #[test]
    fn test_draw_on_payment_needs_nonzero_payment() {
        let cap = Capability::DrawOnPayment { resource: "solari".to_string(), cards: 1 };

        let paid = Payment { resource: "solari".to_string(), listed: 2, paid: 2 };
        let free = Payment { resource: "solari".to_string(), listed: 1, paid: 0 };

        assert_eq!(cap.after_payment(&paid), vec![Operation::gain(Gain::DrawCards { amount: 1 })]);
        assert!(cap.after_payment(&free).is_empty());
    }

    #[test]
    fn test_occupied_placement_by_symbol() {
        let cap = Capability::OccupiedPlacement {
            symbols: vec![Symbol::new("landsraad"), Symbol::new("city")],
        };

        assert!(cap.allows_occupied(&landsraad_location()));
        assert!(!cap.allows_occupied(&LocationDefinition::new("sietch", "Sietch").with_symbol("fremen")));
        assert!(!cap.allows_occupied(&LocationDefinition::new("mentat", "Mentat")));
    }

    #[test]
    fn test_location_bonus_only_on_target() {
        let cap = Capability::LocationBonus {
            location: LocationId::new("high_council"),
            gain: vec![Gain::Intrigue { amount: 1 }],
        };

        assert_eq!(cap.location_bonus(&landsraad_location()).len(), 1);
        assert!(cap.location_bonus(&LocationDefinition::new("carthag", "Carthag")).is_empty());
    }

    #[test]
    fn test_none_is_neutral() {
        let cap = Capability::None;
        assert_eq!(cap.cost_discount(&landsraad_location(), &Cost::new("solari", 5)), 0);
        assert!(cap.starting_bonus().is_empty());
        assert!(!cap.allows_occupied(&landsraad_location()));
    }

    #[test]
    fn test_resource_aliases_match() {
        let cap = Capability::CostDiscount {
            symbol: Symbol::new("landsraad"),
            resource: "troops_garrison".to_string(),
            amount: 2,
        };
        let location = LocationDefinition::new("rally", "Rally").with_symbol("landsraad").with_cost("troops", 3);

        assert_eq!(cap.cost_discount(&location, &location.cost[0]), 2);

        let draw = Capability::DrawOnPayment {
            resource: "troops".to_string(),
            cards: 1,
        };
        let payment = Payment {
            resource: "troops_garrison".to_string(),
            listed: 3,
            paid: 1,
        };
        assert_eq!(draw.after_payment(&payment).len(), 1);
    }
}
