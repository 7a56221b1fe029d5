//! Single entry point for every game operation.
//!
//! `Engine` borrows the loaded content and ruleset and hands each call to
//! the processor that owns it. Every mutating call takes the explicit
//! `&mut GameState` it works on; nothing is stored between calls.
//!
//! ```
//! use imperium_engine::cards::ContentDb;
//! use imperium_engine::core::{GameState, PlayerId, PlayerState, RulesConfig};
//! use imperium_engine::rules::Engine;
//!
//! let content = ContentDb::new();
//! let config = RulesConfig::default();
//! let engine = Engine::new(&content, &config);
//!
//! let mut game = GameState::new(vec![PlayerState::new("Alia")], 1).unwrap();
//! engine.pass_turn(&mut game, PlayerId::new(0)).unwrap();
//! assert_eq!(game.phase.to_string(), "REVEAL");
//! ```

use super::conflict::{ConflictRejection, ConflictResolver};
use super::correction::{Adjustment, CorrectionProcessor, CorrectionRejection};
use super::intrigue::{IntrigueProcessor, IntrigueRejection};
use super::market::{MarketProcessor, MarketRejection, TroopRejection};
use super::moves::{MoveProcessor, MoveRejection};
use super::phase::{PassRejection, PhaseStateMachine};
use super::setup::{PlayerTemplate, SetupError};
use crate::cards::{CardId, ConflictId, ContentDb, IntrigueId, LocationId};
use crate::core::{GameState, PlayerId, RulesConfig};
use crate::effects::{DecisionInput, DecisionRequest, EffectInterpreter};

/// Facade over the rules processors.
#[derive(Clone, Copy)]
pub struct Engine<'a> {
    content: &'a ContentDb,
    config: &'a RulesConfig,
}

impl<'a> Engine<'a> {
    #[must_use]
    pub fn new(content: &'a ContentDb, config: &'a RulesConfig) -> Self {
        Self { content, config }
    }

    #[must_use]
    pub fn content(&self) -> &'a ContentDb {
        self.content
    }

    #[must_use]
    pub fn config(&self) -> &'a RulesConfig {
        self.config
    }

    fn moves(&self) -> MoveProcessor<'a> {
        MoveProcessor::new(self.content, self.config)
    }

    fn phases(&self) -> PhaseStateMachine<'a> {
        PhaseStateMachine::new(&self.content.cards, self.config)
    }

    fn conflicts(&self) -> ConflictResolver<'a> {
        ConflictResolver::new(self.content, EffectInterpreter::new(self.config))
    }

    fn market(&self) -> MarketProcessor<'a> {
        MarketProcessor::new(self.content, self.config)
    }

    fn intrigues(&self) -> IntrigueProcessor<'a> {
        IntrigueProcessor::new(self.content, self.config)
    }

    fn corrections(&self) -> CorrectionProcessor<'a> {
        CorrectionProcessor::new(self.content, self.config)
    }

    // === Setup ===

    pub fn new_game(&self, templates: Vec<PlayerTemplate>, seed: u64) -> Result<GameState, SetupError> {
        GameState::new_game(templates, self.content, self.config, seed)
    }

    // === Agent turns ===

    pub fn validate_move(
        &self,
        game: &GameState,
        player: PlayerId,
        card: &CardId,
        location: &LocationId,
    ) -> Result<(), MoveRejection> {
        self.moves().validate(game, player, card, location).map(|_| ())
    }

    /// What the caller must decide before committing this move.
    pub fn move_decision(
        &self,
        game: &GameState,
        player: PlayerId,
        card: &CardId,
        location: &LocationId,
    ) -> Result<DecisionRequest, MoveRejection> {
        self.moves().decision(game, player, card, location)
    }

    /// Commit a move, then advance the phase if the agent turn is over.
    pub fn commit_move(
        &self,
        game: &mut GameState,
        player: PlayerId,
        card: &CardId,
        location: &LocationId,
        decision: DecisionInput,
    ) -> Result<String, MoveRejection> {
        let summary = self.moves().commit(game, player, card, location, decision)?;
        self.advance_phase(game);
        Ok(summary)
    }

    /// Pass, then advance the phase if the agent turn is over.
    pub fn pass_turn(&self, game: &mut GameState, player: PlayerId) -> Result<String, PassRejection> {
        let summary = self.phases().pass_turn(game, player)?;
        self.advance_phase(game);
        Ok(summary)
    }

    /// Move to REVEAL if every player is done. Returns true on a change.
    pub fn advance_phase(&self, game: &mut GameState) -> bool {
        self.phases().advance(game)
    }

    // === Intrigue ===

    pub fn intrigue_decision(
        &self,
        game: &GameState,
        player: PlayerId,
        intrigue: &IntrigueId,
    ) -> Result<DecisionRequest, IntrigueRejection> {
        self.intrigues().decision(game, player, intrigue)
    }

    pub fn play_intrigue(
        &self,
        game: &mut GameState,
        player: PlayerId,
        intrigue: &IntrigueId,
        decision: DecisionInput,
    ) -> Result<String, IntrigueRejection> {
        self.intrigues().play(game, player, intrigue, decision)
    }

    // === Reveal ===

    pub fn commit_troops(&self, game: &mut GameState, player: PlayerId, count: i64) -> Result<String, TroopRejection> {
        self.market().commit_troops(game, player, count)
    }

    pub fn add_card_to_market(&self, game: &mut GameState, card: &CardId) -> Result<String, MarketRejection> {
        self.market().add_card_to_market(game, card)
    }

    pub fn buy_card(&self, game: &mut GameState, player: PlayerId, card: &CardId) -> Result<String, MarketRejection> {
        self.market().buy_card(game, player, card)
    }

    // === Conflict ===

    pub fn set_conflict(&self, game: &mut GameState, conflict: &ConflictId) -> Result<String, ConflictRejection> {
        self.conflicts().set_conflict(game, conflict)
    }

    /// Resolve the active conflict. Without explicit strengths, each
    /// player's stored reveal strength is used.
    pub fn resolve_conflict(
        &self,
        game: &mut GameState,
        strengths: Option<&[(PlayerId, i64)]>,
    ) -> Result<String, ConflictRejection> {
        let resolver = self.conflicts();
        match strengths {
            Some(strengths) => resolver.resolve(game, strengths),
            None => {
                let strengths = ConflictResolver::final_strengths(game);
                resolver.resolve(game, &strengths)
            }
        }
    }

    pub fn reset_round(&self, game: &mut GameState) {
        self.phases().reset_round(game);
    }

    // === Corrections ===

    pub fn add_intrigue(
        &self,
        game: &mut GameState,
        player: PlayerId,
        intrigue: &IntrigueId,
    ) -> Result<String, CorrectionRejection> {
        self.corrections().add_intrigue(game, player, intrigue)
    }

    pub fn set_hand(&self, game: &mut GameState, player: PlayerId, cards: &[CardId]) -> Result<String, CorrectionRejection> {
        self.corrections().set_hand(game, player, cards)
    }

    pub fn adjust_player(
        &self,
        game: &mut GameState,
        player: PlayerId,
        adjustment: &Adjustment,
    ) -> Result<String, CorrectionRejection> {
        self.corrections().adjust(game, player, adjustment)
    }
}
