//! New-game construction from player templates.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::phase::PhaseStateMachine;
use crate::cards::{CardId, ContentDb, IntrigueId, LeaderId};
use crate::core::{GameState, HistoryEntry, PlayerId, PlayerState, Resources, RulesConfig};
use crate::effects::EffectInterpreter;
use crate::leaders::LeaderCapability;

/// Why a game could not be created.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a game needs between 1 and 255 players, got {0}")]
    PlayerCount(usize),

    #[error("unknown leader '{0}'")]
    UnknownLeader(LeaderId),
}

/// Starting position for one seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTemplate {
    pub name: String,

    #[serde(default)]
    pub leader: Option<LeaderId>,

    #[serde(default)]
    pub resources: Resources,

    /// Every card the player starts with.
    #[serde(default)]
    pub deck: Vec<CardId>,

    #[serde(default)]
    pub intrigues: Vec<IntrigueId>,
}

impl PlayerTemplate {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_leader(mut self, leader: impl Into<String>) -> Self {
        self.leader = Some(LeaderId::new(leader));
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource: &str, amount: i64) -> Self {
        self.resources.set(resource, amount);
        self
    }

    #[must_use]
    pub fn with_deck(mut self, cards: &[&str]) -> Self {
        self.deck.extend(cards.iter().map(|id| CardId::new(*id)));
        self
    }
}

impl GameState {
    /// Build a round-1 game: seat every template, deal opening hands from a
    /// shuffled deck, stock the shared intrigue deck, and apply each leader's
    /// starting bonus once.
    pub fn new_game(
        templates: Vec<PlayerTemplate>,
        content: &ContentDb,
        config: &RulesConfig,
        seed: u64,
    ) -> Result<Self, SetupError> {
        let count = templates.len();
        let mut players = Vec::with_capacity(count);
        for template in templates {
            if let Some(leader) = &template.leader {
                if !content.leaders.contains(leader) {
                    return Err(SetupError::UnknownLeader(leader.clone()));
                }
            }

            let mut state = PlayerState::new(template.name);
            state.leader = template.leader;
            state.resources = template.resources;
            state.deck_pool = template.deck;
            state.intrigue_hand = template.intrigues;
            state.agents_total = config.base_agents;
            players.push(state);
        }

        let mut game = GameState::new(players, seed).ok_or(SetupError::PlayerCount(count))?;

        // reset deals the opening hands; it also advances the round counter
        PhaseStateMachine::new(&content.cards, config).reset_round(&mut game);
        game.round = 1;
        game.intrigue_deck = intrigue_deck(&mut game, content);

        let interpreter = EffectInterpreter::new(config);
        for player in PlayerId::all(count) {
            let bonus = game
                .player(player)
                .and_then(|state| state.leader.as_ref())
                .and_then(|id| content.leaders.get(id))
                .map(|leader| leader.passive.starting_bonus())
                .unwrap_or_default();
            if bonus.is_empty() {
                continue;
            }
            let audit = interpreter.apply_gains(&mut game, player, &bonus);
            game.record(HistoryEntry::for_player(
                player,
                format!("Starting bonus: {}", audit.join(", ")),
            ));
        }

        info!(players = count, seed, "game created");
        Ok(game)
    }
}

/// One copy of every intrigue in content, minus those already dealt to a
/// player, shuffled with the game's RNG.
fn intrigue_deck(game: &mut GameState, content: &ContentDb) -> Vec<IntrigueId> {
    let mut deck: Vec<IntrigueId> = content.intrigues.iter().map(|intrigue| intrigue.id.clone()).collect();
    deck.sort();
    for (_, state) in game.players.iter() {
        for held in &state.intrigue_hand {
            if let Some(pos) = deck.iter().position(|id| id == held) {
                deck.remove(pos);
            }
        }
    }
    game.rng.shuffle(&mut deck);
    deck
}
