//! Intrigue card definitions.
//!
//! Intrigue effects come in four shapes. Each shape is dispatched differently
//! by the intrigue processor, so the shape is part of the type rather than
//! inferred from the operation list.

use serde::{Deserialize, Serialize};

use super::ids::IntrigueId;
use crate::effects::{Gain, Operation};

/// Static intrigue card data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntrigueDefinition {
    pub id: IntrigueId,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub effect: IntrigueEffect,
}

impl IntrigueDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, effect: IntrigueEffect) -> Self {
        Self {
            id: IntrigueId::new(id),
            name: name.into(),
            description: String::new(),
            effect,
        }
    }

    /// Builder: set the rules text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The shape of an intrigue effect.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntrigueEffect {
    /// Plain gains.
    Gain(Vec<Gain>),

    /// Write a named temporary effect on the player.
    SetFlag {
        name: String,
        #[serde(default)]
        mode: FlagMode,
        value: i64,
    },

    /// A general operation list.
    Operations(Vec<Operation>),

    /// Two independent lists; a halt in the first does not stop the second.
    Pair {
        first: Vec<Operation>,
        second: Vec<Operation>,
    },

    /// Only the description; resolved by hand.
    #[default]
    Manual,
}

/// How `SetFlag` combines with an existing value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagMode {
    #[default]
    Overwrite,
    Add,
}
