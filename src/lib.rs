//! # imperium-engine
//!
//! Rules engine for a round-based worker-placement deckbuilding game.
//!
//! Players send agents with cards to board locations, pay costs, gain
//! resources and faction influence, then reveal their hands for persuasion
//! and strength, buy cards, and fight over a conflict each round.
//!
//! ## Design Principles
//!
//! 1. **Content as Data**: Cards, locations, intrigues, leaders, and
//!    conflicts are loaded from JSON into closed enums once. The engine
//!    only interprets `Operation` lists; it never special-cases a card.
//!
//! 2. **Explicit State**: Every operation takes the `&mut GameState` it
//!    works on. Persistence lives behind `StateRepository`.
//!
//! 3. **Reject, Don't Panic**: Validation failures come back as typed
//!    rejections and leave the state untouched. Effects the content cannot
//!    express are logged as `needs manual resolution:` audit lines.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state clones via `im-rs`, so a
//!   `Session` can apply an intent to a copy and commit only on success.
//!
//! - **Deterministic Shuffles**: A seeded ChaCha8 RNG travels inside the
//!   state and drives every shuffle.
//!
//! ## Modules
//!
//! - `core`: Players, factions, resources, state, RNG, configuration
//! - `cards`: Content records, ids, registries
//! - `leaders`: Leader capabilities and signet abilities
//! - `effects`: Operations, conditions, decisions, the interpreter
//! - `rules`: Moves, intrigue, reveal, alliances, conflict, phases, market,
//!   manual corrections
//! - `session`: Repositories and serialised intent execution

pub mod cards;
pub mod core;
pub mod effects;
pub mod leaders;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Faction, FactionMap, GameRng, GameRngState, GameState, HistoryEntry, Phase, PlayerId, PlayerMap, PlayerState,
    Resources, RevealStats, RulesConfig,
};

pub use crate::cards::{
    CardDefinition, CardId, ConflictDefinition, ConflictId, ContentDb, ContentError, IntrigueDefinition, IntrigueId,
    LeaderId, LocationDefinition, LocationId, Registry, Symbol,
};

pub use crate::leaders::{Capability, LeaderCapability, LeaderDefinition};

pub use crate::effects::{Condition, Cost, DecisionInput, DecisionRequest, EffectInterpreter, Gain, Operation};

pub use crate::rules::{
    Adjustment, AllianceTracker, ConflictRejection, ConflictResolver, CorrectionRejection, Engine, IntrigueRejection,
    MarketRejection, MoveRejection, PassRejection, PlayerTemplate, Ranking, RevealStatsCalculator, SetupError,
    TroopRejection,
};

pub use crate::session::{ContentStore, Intent, MemoryRepository, Rejection, Session, SessionError, StateRepository};
