//! The two-phase round: AGENT_TURN then REVEAL, then reset.
//!
//! The agent phase ends once every player has used all agents or passed.
//! Entering REVEAL snapshots every player's reveal stats. Round reset
//! clears the board and transient state and redeals every hand from the
//! player's full collection.

use thiserror::Error;
use tracing::{info, warn};

use super::reveal::RevealStatsCalculator;
use crate::cards::{CardDefinition, Registry};
use crate::core::{names, GameState, HistoryEntry, Phase, PlayerId, RevealStats, RulesConfig};

/// Why a pass was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PassRejection {
    #[error("cannot pass during the {0} phase")]
    WrongPhase(Phase),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("{0} has already placed all agents")]
    NoAgentsLeft(String),

    #[error("{0} has already passed")]
    AlreadyPassed(String),
}

/// Owns phase transitions and round reset.
pub struct PhaseStateMachine<'a> {
    cards: &'a Registry<CardDefinition>,
    config: &'a RulesConfig,
}

impl<'a> PhaseStateMachine<'a> {
    #[must_use]
    pub fn new(cards: &'a Registry<CardDefinition>, config: &'a RulesConfig) -> Self {
        Self { cards, config }
    }

    /// Mark a player as done placing agents this round.
    pub fn pass_turn(&self, game: &mut GameState, player: PlayerId) -> Result<String, PassRejection> {
        if game.phase != Phase::AgentTurn {
            return Err(PassRejection::WrongPhase(game.phase));
        }
        let state = game.player_mut(player).ok_or(PassRejection::UnknownPlayer(player))?;
        if state.agents_placed >= state.agents_total {
            return Err(PassRejection::NoAgentsLeft(state.name.clone()));
        }
        if state.has_passed {
            return Err(PassRejection::AlreadyPassed(state.name.clone()));
        }

        state.has_passed = true;
        let summary = format!("{} passed their agent turn.", state.name);
        game.record(HistoryEntry::for_player(player, summary.clone()));
        info!(player = %player, "player passed");
        Ok(summary)
    }

    /// Has every player used all agents or passed?
    #[must_use]
    pub fn agent_phase_finished(game: &GameState) -> bool {
        game.players
            .iter()
            .all(|(_, state)| state.has_passed || state.agents_placed >= state.agents_total)
    }

    /// Move to REVEAL if the agent phase is finished. Returns true if the
    /// phase changed.
    pub fn advance(&self, game: &mut GameState) -> bool {
        if game.phase != Phase::AgentTurn || !Self::agent_phase_finished(game) {
            return false;
        }

        game.phase = Phase::Reveal;
        RevealStatsCalculator::new(self.cards, self.config).refresh_all(game);
        game.record(HistoryEntry::note("All agents placed. Phase changed to REVEAL."));
        info!(round = game.round, "phase changed to REVEAL");
        true
    }

    /// Clear the board and start the next round.
    pub fn reset_round(&self, game: &mut GameState) {
        game.clear_locations();
        game.round_history.clear();
        game.phase = Phase::AgentTurn;
        game.round += 1;
        game.conflict = None;
        game.conflict_resolved = false;

        let GameState { players, rng, .. } = game;
        for (_, state) in players.iter_mut() {
            state.agents_placed = 0;
            state.has_passed = false;
            state.reveal_stats = RevealStats::default();
            state.active_effects.clear();
            state.persuasion_spent = 0;
            state.resources.set(names::TROOPS_IN_CONFLICT, 0);

            state.discard_pile.clear();
            state.hand.clear();
            state.draw_deck = state.deck_pool.clone();
            rng.shuffle(&mut state.draw_deck);

            let dealt = self.config.hand_size.min(state.draw_deck.len());
            state.hand = state.draw_deck.drain(..dealt).collect();
            if dealt < self.config.hand_size {
                warn!(player = %state.name, dealt, "collection smaller than a full hand");
            }
        }

        info!(round = game.round, "round reset");
    }
}
