//! Game rules: one processor per concern, plus the `Engine` facade.
//!
//! Processors borrow content and configuration and mutate only the
//! `GameState` passed to them. Validation failures come back as typed
//! rejections; the state is left untouched in that case.

pub mod alliance;
pub mod conflict;
pub mod correction;
pub mod engine;
pub mod intrigue;
pub mod market;
pub mod moves;
pub mod phase;
pub mod reveal;
pub mod setup;

pub use alliance::{AllianceTracker, InfluenceUpdate};
pub use conflict::{ConflictRejection, ConflictResolver, Ranking, REWARD_RANKS};
pub use correction::{Adjustment, CorrectionProcessor, CorrectionRejection, CORRECTION_TAG};
pub use engine::Engine;
pub use intrigue::{IntrigueProcessor, IntrigueRejection};
pub use market::{MarketProcessor, MarketRejection, TroopRejection};
pub use moves::{MoveProcessor, MoveRejection};
pub use phase::{PassRejection, PhaseStateMachine};
pub use reveal::RevealStatsCalculator;
pub use setup::{PlayerTemplate, SetupError};
