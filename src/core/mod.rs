//! Core engine types: players, factions, resources, state, RNG, configuration.
//!
//! Everything here is content-agnostic. Processors in `rules` read content
//! records and mutate these types.

pub mod config;
pub mod faction;
pub mod player;
pub mod resources;
pub mod rng;
pub mod state;

pub use config::RulesConfig;
pub use faction::{Faction, FactionMap};
pub use player::{PlayerId, PlayerMap};
pub use resources::{names, Resources};
pub use rng::{GameRng, GameRngState};
pub use state::{
    effect_names, BonusClaims, GameState, HistoryEntry, Phase, PlayerState, RevealStats, RevealedCard,
};
