//! Playing intrigue cards.
//!
//! The card leaves the intrigue hand as soon as validation passes, even if
//! its effect then halts. An intrigue id with no content record is still
//! consumed and logged for manual resolution.

use thiserror::Error;
use tracing::{info, warn};

use super::reveal::RevealStatsCalculator;
use crate::cards::{ContentDb, FlagMode, IntrigueEffect, IntrigueId};
use crate::core::{GameState, HistoryEntry, Phase, PlayerId, RulesConfig};
use crate::effects::{DecisionInput, DecisionRequest, EffectInterpreter};

/// Why an intrigue could not be played.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IntrigueRejection {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("{player} does not hold intrigue '{intrigue}'")]
    NotInHand { player: String, intrigue: IntrigueId },
}

/// Validates and resolves intrigue plays.
pub struct IntrigueProcessor<'a> {
    content: &'a ContentDb,
    config: &'a RulesConfig,
}

impl<'a> IntrigueProcessor<'a> {
    #[must_use]
    pub fn new(content: &'a ContentDb, config: &'a RulesConfig) -> Self {
        Self { content, config }
    }

    pub fn validate(&self, game: &GameState, player: PlayerId, intrigue: &IntrigueId) -> Result<(), IntrigueRejection> {
        let state = game.player(player).ok_or(IntrigueRejection::UnknownPlayer(player))?;
        if !state.intrigue_hand.contains(intrigue) {
            return Err(IntrigueRejection::NotInHand {
                player: state.name.clone(),
                intrigue: intrigue.clone(),
            });
        }
        Ok(())
    }

    /// First decision the intrigue will ask for.
    pub fn decision(
        &self,
        game: &GameState,
        player: PlayerId,
        intrigue: &IntrigueId,
    ) -> Result<DecisionRequest, IntrigueRejection> {
        self.validate(game, player, intrigue)?;
        let Some(definition) = self.content.intrigues.get(intrigue) else {
            return Ok(DecisionRequest::Simple);
        };
        Ok(match &definition.effect {
            IntrigueEffect::Operations(ops) => DecisionRequest::scan(ops, &definition.name),
            IntrigueEffect::Pair { first, second } => {
                let request = DecisionRequest::scan(first, &definition.name);
                if request.is_simple() {
                    DecisionRequest::scan(second, &definition.name)
                } else {
                    request
                }
            }
            IntrigueEffect::Gain(_) | IntrigueEffect::SetFlag { .. } | IntrigueEffect::Manual => DecisionRequest::Simple,
        })
    }

    /// Remove the card from hand and resolve it. Returns the audit line.
    pub fn play(
        &self,
        game: &mut GameState,
        player: PlayerId,
        intrigue: &IntrigueId,
        decision: DecisionInput,
    ) -> Result<String, IntrigueRejection> {
        if let Err(rejection) = self.validate(game, player, intrigue) {
            warn!(player = %player, intrigue = %intrigue, %rejection, "intrigue rejected");
            return Err(rejection);
        }

        let Some(state) = game.player_mut(player) else {
            return Err(IntrigueRejection::UnknownPlayer(player));
        };
        state.remove_intrigue(intrigue);
        let player_name = state.name.clone();

        let interpreter = EffectInterpreter::new(self.config);
        let mut parts = Vec::new();

        match self.content.intrigues.get(intrigue) {
            None => {
                warn!(intrigue = %intrigue, "intrigue has no content record");
                parts.push(format!("{} played intrigue '{}'", player_name, intrigue));
                parts.push("needs manual resolution: unknown intrigue".to_string());
            }
            Some(definition) => {
                parts.push(format!("{} played intrigue '{}'", player_name, definition.name));
                match &definition.effect {
                    IntrigueEffect::Gain(gains) => {
                        parts.extend(interpreter.apply_gains(game, player, gains));
                    }
                    IntrigueEffect::SetFlag { name, mode, value } => {
                        if let Some(state) = game.player_mut(player) {
                            match mode {
                                FlagMode::Overwrite => {
                                    state.set_effect(name.as_str(), *value);
                                    parts.push(format!("{} set to {}", name, value));
                                }
                                FlagMode::Add => {
                                    let now = state.add_effect(name, *value);
                                    parts.push(format!("{} {:+} (now {})", name, value, now));
                                }
                            }
                        }
                    }
                    IntrigueEffect::Operations(ops) => {
                        let outcome = interpreter.apply(game, player, ops, decision);
                        parts.extend(outcome.audit);
                    }
                    IntrigueEffect::Pair { first, second } => {
                        let outcome = interpreter.apply(game, player, first, decision);
                        parts.extend(outcome.audit);
                        let outcome = interpreter.apply(game, player, second, decision);
                        parts.extend(outcome.audit);
                    }
                    IntrigueEffect::Manual => {
                        parts.push(format!("needs manual resolution: {}", definition.description));
                    }
                }
            }
        }

        if game.phase == Phase::Reveal {
            RevealStatsCalculator::new(&self.content.cards, self.config).refresh(game, player);
        }

        let summary = parts.join(" | ");
        game.record(HistoryEntry::for_player(player, summary.clone()));
        info!(player = %player, intrigue = %intrigue, "intrigue played");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::IntrigueDefinition;
    use crate::core::{effect_names, PlayerState};
    use crate::effects::{Gain, Operation};

    fn content() -> ContentDb {
        ContentDb::new()
            .with_intrigue(IntrigueDefinition::new(
                "ambush",
                "Ambush",
                IntrigueEffect::SetFlag {
                    name: effect_names::STRENGTH_BONUS.to_string(),
                    mode: FlagMode::Add,
                    value: 4,
                },
            ))
            .and_then(|db| {
                db.with_intrigue(IntrigueDefinition::new(
                    "bribery",
                    "Bribery",
                    IntrigueEffect::Operations(vec![Operation::pay("solari", 2), Operation::gain(Gain::vp(1))]),
                ))
            })
            .and_then(|db| {
                db.with_intrigue(IntrigueDefinition::new(
                    "market_monopoly",
                    "Market Monopoly",
                    IntrigueEffect::Pair {
                        first: vec![Operation::pay("spice", 1), Operation::gain(Gain::vp(1))],
                        second: vec![Operation::gain(Gain::resource("solari", 1))],
                    },
                ))
            })
            .unwrap()
    }

    fn game(intrigues: &[&str]) -> GameState {
        GameState::new(
            vec![PlayerState::new("Alia").with_intrigues(intrigues), PlayerState::new("Duncan")],
            1,
        )
        .unwrap()
    }

    const P0: PlayerId = PlayerId::new(0);

    #[test]
    fn test_flag_accumulates() {
        let content = content();
        let config = RulesConfig::default();
        let processor = IntrigueProcessor::new(&content, &config);
        let mut game = game(&["ambush", "ambush"]);

        processor.play(&mut game, P0, &IntrigueId::new("ambush"), DecisionInput::none()).unwrap();
        processor.play(&mut game, P0, &IntrigueId::new("ambush"), DecisionInput::none()).unwrap();

        assert_eq!(game.players[P0].effect(effect_names::STRENGTH_BONUS), 8);
        assert!(game.players[P0].intrigue_hand.is_empty());
    }

    #[test]
    fn test_failed_effect_still_consumes_card() {
        let content = content();
        let config = RulesConfig::default();
        let processor = IntrigueProcessor::new(&content, &config);
        let mut game = game(&["bribery"]);

        processor.play(&mut game, P0, &IntrigueId::new("bribery"), DecisionInput::consent()).unwrap();

        assert!(game.players[P0].intrigue_hand.is_empty());
        assert_eq!(game.players[P0].victory_points, 0);
        assert_eq!(game.round_history.len(), 1);
    }

    #[test]
    fn test_pair_halves_are_independent() {
        let content = content();
        let config = RulesConfig::default();
        let processor = IntrigueProcessor::new(&content, &config);
        let mut game = game(&["market_monopoly"]);

        processor
            .play(&mut game, P0, &IntrigueId::new("market_monopoly"), DecisionInput::none())
            .unwrap();

        assert_eq!(game.players[P0].victory_points, 0);
        assert_eq!(game.players[P0].resources.get("solari"), 1);
    }

    #[test]
    fn test_unknown_intrigue_soft_fails() {
        let content = content();
        let config = RulesConfig::default();
        let processor = IntrigueProcessor::new(&content, &config);
        let mut game = game(&["mystery"]);

        let summary = processor.play(&mut game, P0, &IntrigueId::new("mystery"), DecisionInput::none()).unwrap();

        assert!(summary.contains("needs manual resolution"));
        assert!(game.players[P0].intrigue_hand.is_empty());
    }

    #[test]
    fn test_not_in_hand() {
        let content = content();
        let config = RulesConfig::default();
        let processor = IntrigueProcessor::new(&content, &config);
        let mut game = game(&[]);

        let result = processor.play(&mut game, P0, &IntrigueId::new("ambush"), DecisionInput::none());
        assert!(matches!(result, Err(IntrigueRejection::NotInHand { .. })));
        assert!(game.round_history.is_empty());
    }

    #[test]
    fn test_reveal_phase_refreshes_strength() {
        let content = content();
        let config = RulesConfig::default();
        let processor = IntrigueProcessor::new(&content, &config);
        let mut game = game(&["ambush"]);
        game.phase = Phase::Reveal;

        processor.play(&mut game, P0, &IntrigueId::new("ambush"), DecisionInput::none()).unwrap();

        assert_eq!(game.players[P0].reveal_stats.total_strength, 4);
    }

    #[test]
    fn test_decision_for_operations() {
        let content = content();
        let config = RulesConfig::default();
        let processor = IntrigueProcessor::new(&content, &config);
        let game = game(&["bribery"]);

        let request = processor.decision(&game, P0, &IntrigueId::new("bribery")).unwrap();
        assert!(matches!(request, DecisionRequest::OptionalPay { .. }));
    }
}
