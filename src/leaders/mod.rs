//! Leaders: passive capabilities and signet abilities.
//!
//! Each leader has one passive `Capability`, parsed from content into a closed
//! enum, and an optional signet ability run when the proxy card is played.
//! Processors talk to capabilities only through the `LeaderCapability` hooks.

pub mod capability;
pub mod definition;

pub use capability::{Capability, LeaderCapability, Payment};
pub use definition::{LeaderDefinition, SignetAbility};
