//! Content records: cards, locations, intrigues, conflicts, and registries.
//!
//! ## Key Types
//!
//! - `CardId`, `LocationId`, ...: String slugs naming externally authored records
//! - `CardDefinition`: Agent symbols, agent effect, reveal values, market price
//! - `LocationDefinition`: Placement symbol, cost, effect, agent bonus
//! - `IntrigueDefinition`: One of four effect shapes
//! - `ConflictDefinition`: Rank-keyed reward lists
//! - `Registry<T>` / `ContentDb`: Lookup by id, loaded from JSON
//!
//! The engine never mutates content.

pub mod conflict;
pub mod definition;
pub mod ids;
pub mod intrigue;
pub mod location;
pub mod registry;

pub use conflict::ConflictDefinition;
pub use definition::{CardDefinition, RevealBonus, RevealEffect, RevealPredicate};
pub use ids::{CardId, ConflictId, IntrigueId, LeaderId, LocationId, Symbol};
pub use intrigue::{FlagMode, IntrigueDefinition, IntrigueEffect};
pub use location::{AgentBonus, LocationDefinition};
pub use registry::{ContentDb, ContentError, ContentRecord, Registry};
