//! Caller decisions for consent-gated and choice operations.
//!
//! `DecisionInput` is an immutable value handed to the interpreter and passed
//! unchanged into every nested list. `DecisionRequest` is the inverse: it
//! tells a caller which decision a pending effect list will ask for.

use serde::{Deserialize, Serialize};

use super::operation::{Cost, Gain, Operation};

/// The caller's answers for optional steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionInput {
    /// Consent to optional `Pay` and `Exchange` steps.
    #[serde(default)]
    pub consent: bool,
    /// Selected alternative for `Choice` steps.
    #[serde(default)]
    pub choice_index: Option<usize>,
}

impl DecisionInput {
    /// No consent, no choice.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            consent: false,
            choice_index: None,
        }
    }

    /// Consent to optional costs, no choice.
    #[must_use]
    pub const fn consent() -> Self {
        Self {
            consent: true,
            choice_index: None,
        }
    }

    /// Select a choice alternative.
    #[must_use]
    pub const fn choose(index: usize) -> Self {
        Self {
            consent: false,
            choice_index: Some(index),
        }
    }

    /// Add consent to an existing decision.
    #[must_use]
    pub const fn with_consent(mut self) -> Self {
        self.consent = true;
        self
    }
}

/// The first decision an effect list will need.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionRequest {
    /// Nothing to ask.
    Simple,
    /// Pick one of `options` alternatives.
    Choice { source: String, options: Vec<String> },
    /// Accept or decline a pay-then-gain bundle.
    Exchange {
        source: String,
        pay: Vec<Cost>,
        gain: Vec<Gain>,
    },
    /// Accept or decline an optional payment.
    OptionalPay { source: String, costs: Vec<Cost> },
}

impl DecisionRequest {
    /// Scan top-level steps of `ops` for the first one needing a decision.
    #[must_use]
    pub fn scan(ops: &[Operation], source: &str) -> Self {
        for op in ops {
            match op {
                Operation::Choice(alternatives) => {
                    return Self::Choice {
                        source: source.to_string(),
                        options: alternatives.iter().map(|alt| describe_list(alt)).collect(),
                    };
                }
                Operation::Exchange { pay, gain } => {
                    return Self::Exchange {
                        source: source.to_string(),
                        pay: pay.clone(),
                        gain: gain.clone(),
                    };
                }
                Operation::Pay(costs) => {
                    return Self::OptionalPay {
                        source: source.to_string(),
                        costs: costs.clone(),
                    };
                }
                Operation::Requirement(_) | Operation::Gain(_) | Operation::DestroySource => {}
            }
        }
        Self::Simple
    }

    /// True when nothing needs to be asked.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        matches!(self, Self::Simple)
    }
}

fn describe_list(ops: &[Operation]) -> String {
    let parts: Vec<String> = ops
        .iter()
        .map(|op| match op {
            Operation::Gain(gain) => format!("gain {}", gain.describe()),
            Operation::Pay(costs) => format!("pay {}", join_costs(costs)),
            Operation::Exchange { pay, gain } => format!(
                "pay {} for {}",
                join_costs(pay),
                gain.iter().map(Gain::describe).collect::<Vec<_>>().join(", ")
            ),
            Operation::Requirement(_) => "requirement".to_string(),
            Operation::Choice(_) => "nested choice".to_string(),
            Operation::DestroySource => "destroy this card".to_string(),
        })
        .collect();

    if parts.is_empty() {
        "no effect".to_string()
    } else {
        parts.join(", ")
    }
}

fn join_costs(costs: &[Cost]) -> String {
    costs.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
