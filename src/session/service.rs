//! Serialised intent execution for one game.
//!
//! Every intent runs under the session lock: load the committed snapshot,
//! apply the intent to that copy, and commit only if it succeeded. A
//! rejected intent leaves the stored game exactly as it was.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::repository::{ContentStore, RepositoryError, StateRepository};
use crate::cards::{CardId, ConflictId, IntrigueId, LocationId};
use crate::core::{GameState, PlayerId, RulesConfig};
use crate::effects::DecisionInput;
use crate::rules::{
    Adjustment, ConflictRejection, CorrectionRejection, Engine, IntrigueRejection, MarketRejection, MoveRejection,
    PassRejection, PlayerTemplate, SetupError, TroopRejection,
};

/// A request to change the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Move {
        player: PlayerId,
        card: CardId,
        location: LocationId,
        #[serde(default)]
        decision: DecisionInput,
    },
    Pass {
        player: PlayerId,
    },
    PlayIntrigue {
        player: PlayerId,
        intrigue: IntrigueId,
        #[serde(default)]
        decision: DecisionInput,
    },
    CommitTroops {
        player: PlayerId,
        count: i64,
    },
    BuyCard {
        player: PlayerId,
        card: CardId,
    },
    AddCardToMarket {
        card: CardId,
    },
    SetConflict {
        conflict: ConflictId,
    },
    ResolveConflict {
        #[serde(default)]
        strengths: Option<Vec<(PlayerId, i64)>>,
    },
    ResetRound,
    AddIntrigue {
        player: PlayerId,
        intrigue: IntrigueId,
    },
    SetHand {
        player: PlayerId,
        cards: Vec<CardId>,
    },
    Adjust {
        player: PlayerId,
        #[serde(default)]
        adjustment: Adjustment,
    },
}

/// A rules-level refusal. The game is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error(transparent)]
    Move(#[from] MoveRejection),
    #[error(transparent)]
    Pass(#[from] PassRejection),
    #[error(transparent)]
    Intrigue(#[from] IntrigueRejection),
    #[error(transparent)]
    Troops(#[from] TroopRejection),
    #[error(transparent)]
    Market(#[from] MarketRejection),
    #[error(transparent)]
    Conflict(#[from] ConflictRejection),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Correction(#[from] CorrectionRejection),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("content is unavailable")]
    ContentUnavailable,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("rejected: {0}")]
    Rejected(#[from] Rejection),
}

impl SessionError {
    /// True for failures that no different input could fix.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SessionError::Rejected(_))
    }
}

/// One game's intent executor.
pub struct Session<R, C> {
    game_id: String,
    config: RulesConfig,
    content: C,
    repository: Mutex<R>,
}

impl<R: StateRepository, C: ContentStore> Session<R, C> {
    pub fn new(game_id: impl Into<String>, content: C, config: RulesConfig, repository: R) -> Self {
        Self {
            game_id: game_id.into(),
            config,
            content,
            repository: Mutex::new(repository),
        }
    }

    #[must_use]
    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    fn engine(&self) -> Result<Engine<'_>, SessionError> {
        let content = self.content.content().ok_or(SessionError::ContentUnavailable)?;
        Ok(Engine::new(content, &self.config))
    }

    /// Create and commit a fresh game, replacing any stored one.
    pub fn start(&self, templates: Vec<PlayerTemplate>, seed: u64) -> Result<GameState, SessionError> {
        let engine = self.engine()?;
        let mut repository = self.repository.lock().unwrap_or_else(PoisonError::into_inner);
        let game = engine.new_game(templates, seed).map_err(Rejection::from)?;
        repository.commit(&self.game_id, &game)?;
        info!(game = %self.game_id, "session started");
        Ok(game)
    }

    /// The committed game.
    pub fn snapshot(&self) -> Result<GameState, SessionError> {
        let repository = self.repository.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(repository.load(&self.game_id)?)
    }

    /// Run one intent. Returns the audit line on success.
    pub fn execute(&self, intent: &Intent) -> Result<String, SessionError> {
        let engine = self.engine()?;
        let mut repository = self.repository.lock().unwrap_or_else(PoisonError::into_inner);
        let mut game = repository.load(&self.game_id)?;

        match apply(&engine, &mut game, intent) {
            Ok(summary) => {
                repository.commit(&self.game_id, &game)?;
                Ok(summary)
            }
            Err(rejection) => {
                warn!(game = %self.game_id, %rejection, "intent rejected");
                Err(rejection.into())
            }
        }
    }
}

fn apply(engine: &Engine<'_>, game: &mut GameState, intent: &Intent) -> Result<String, Rejection> {
    let summary = match intent {
        Intent::Move {
            player,
            card,
            location,
            decision,
        } => engine.commit_move(game, *player, card, location, *decision)?,
        Intent::Pass { player } => engine.pass_turn(game, *player)?,
        Intent::PlayIntrigue {
            player,
            intrigue,
            decision,
        } => engine.play_intrigue(game, *player, intrigue, *decision)?,
        Intent::CommitTroops { player, count } => engine.commit_troops(game, *player, *count)?,
        Intent::BuyCard { player, card } => engine.buy_card(game, *player, card)?,
        Intent::AddCardToMarket { card } => engine.add_card_to_market(game, card)?,
        Intent::SetConflict { conflict } => engine.set_conflict(game, conflict)?,
        Intent::ResolveConflict { strengths } => engine.resolve_conflict(game, strengths.as_deref())?,
        Intent::ResetRound => {
            engine.reset_round(game);
            format!("Round {} started.", game.round)
        }
        Intent::AddIntrigue { player, intrigue } => engine.add_intrigue(game, *player, intrigue)?,
        Intent::SetHand { player, cards } => engine.set_hand(game, *player, cards)?,
        Intent::Adjust { player, adjustment } => engine.adjust_player(game, *player, adjustment)?,
    };
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, ContentDb, LocationDefinition};
    use crate::core::names;
    use crate::effects::{Gain, Operation};
    use crate::session::MemoryRepository;

    fn content() -> ContentDb {
        ContentDb::new()
            .with_card(CardDefinition::new("dagger", "Dagger"))
            .and_then(|db| {
                db.with_location(
                    LocationDefinition::new("carthag", "Carthag")
                        .with_effect(vec![Operation::gain(Gain::resource(names::SPICE, 1))]),
                )
            })
            .unwrap()
    }

    fn session() -> Session<MemoryRepository, ContentDb> {
        let session = Session::new("g", content(), RulesConfig::default(), MemoryRepository::new());
        session
            .start(
                vec![
                    PlayerTemplate::new("Alia").with_deck(&["dagger", "dagger"]),
                    PlayerTemplate::new("Duncan").with_deck(&["dagger"]),
                ],
                2,
            )
            .unwrap();
        session
    }

    const P0: PlayerId = PlayerId::new(0);

    #[test]
    fn test_successful_intent_commits() {
        let session = session();
        session
            .execute(&Intent::Move {
                player: P0,
                card: CardId::new("dagger"),
                location: LocationId::new("carthag"),
                decision: DecisionInput::none(),
            })
            .unwrap();

        let game = session.snapshot().unwrap();
        assert_eq!(game.players[P0].resources.get(names::SPICE), 1);
        assert_eq!(game.occupant(&LocationId::new("carthag")), Some(P0));
    }

    #[test]
    fn test_rejected_intent_leaves_state() {
        let session = session();
        let before = session.snapshot().unwrap();

        let err = session
            .execute(&Intent::Move {
                player: P0,
                card: CardId::new("dagger"),
                location: LocationId::new("nowhere"),
                decision: DecisionInput::none(),
            })
            .unwrap_err();

        assert!(!err.is_fatal());
        let after = session.snapshot().unwrap();
        assert_eq!(after.round_history.len(), before.round_history.len());
        assert_eq!(after.players[P0].hand, before.players[P0].hand);
    }

    #[test]
    fn test_missing_content_is_fatal() {
        let session: Session<MemoryRepository, Option<ContentDb>> =
            Session::new("g", None, RulesConfig::default(), MemoryRepository::new());
        let err = session.execute(&Intent::ResetRound).unwrap_err();
        assert!(matches!(err, SessionError::ContentUnavailable));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_intent_from_json() {
        let intent: Intent = serde_json::from_str(
            r#"{ "type": "move", "player": 0, "card": "dagger", "location": "carthag", "decision": { "consent": true } }"#,
        )
        .unwrap();
        assert_eq!(
            intent,
            Intent::Move {
                player: P0,
                card: CardId::new("dagger"),
                location: LocationId::new("carthag"),
                decision: DecisionInput::consent(),
            }
        );
    }
}
