//! Effect system for card, location, signet, and intrigue abilities.
//!
//! Effects are declarative operation lists parsed from content:
//! - `Operation`: One step (requirement, gain, pay, exchange, choice)
//! - `Condition`: What a requirement step checks
//! - `DecisionInput`: The caller's consent flag and choice index
//! - `EffectInterpreter`: Runs a list against the game state
//!
//! ## Design Philosophy
//!
//! The interpreter only ever matches on closed enums. Anything the content
//! cannot express is a `Manual` gain or condition, which the interpreter
//! records for manual resolution instead of failing the request.

mod condition;
mod decision;
mod interpreter;
mod operation;

pub use condition::{Condition, ConditionCheck, ConditionEvaluator};
pub use decision::{DecisionInput, DecisionRequest};
pub use interpreter::{ChainOutcome, EffectInterpreter};
pub use operation::{Cost, Gain, Operation};
