//! Game-master corrections.
//!
//! Effects the content cannot express are audited as `needs manual
//! resolution:`. These operations are how the table settles them: hand out
//! a specific intrigue, replace a player's hand, or adjust counters
//! directly. Corrections ignore the phase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::reveal::RevealStatsCalculator;
use crate::cards::{CardId, ContentDb, IntrigueId};
use crate::core::{names, Faction, GameState, HistoryEntry, Phase, PlayerId, RulesConfig};
use crate::effects::{EffectInterpreter, Gain};

/// Prefix of every adjustment history line.
pub const CORRECTION_TAG: &str = "[CORRECTION]";

/// Why a correction was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CorrectionRejection {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown card '{0}'")]
    UnknownCard(CardId),

    #[error("unknown intrigue '{0}'")]
    UnknownIntrigue(IntrigueId),

    #[error("'{card}' is not in {player}'s deck pool")]
    NotOwned { player: String, card: CardId },
}

/// Counter deltas for one player. Zero deltas are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    #[serde(default)]
    pub resources: BTreeMap<String, i64>,

    #[serde(default)]
    pub influence: BTreeMap<Faction, i64>,
}

impl Adjustment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>, delta: i64) -> Self {
        self.resources.insert(resource.into(), delta);
        self
    }

    #[must_use]
    pub fn with_influence(mut self, faction: Faction, delta: i64) -> Self {
        self.influence.insert(faction, delta);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.values().chain(self.influence.values()).all(|delta| *delta == 0)
    }
}

/// Applies manual corrections to a game.
pub struct CorrectionProcessor<'a> {
    content: &'a ContentDb,
    config: &'a RulesConfig,
}

impl<'a> CorrectionProcessor<'a> {
    #[must_use]
    pub fn new(content: &'a ContentDb, config: &'a RulesConfig) -> Self {
        Self { content, config }
    }

    /// Give a player a specific intrigue card. The shared deck is untouched.
    pub fn add_intrigue(
        &self,
        game: &mut GameState,
        player: PlayerId,
        intrigue: &IntrigueId,
    ) -> Result<String, CorrectionRejection> {
        let definition = self
            .content
            .intrigues
            .get(intrigue)
            .ok_or_else(|| CorrectionRejection::UnknownIntrigue(intrigue.clone()))?;
        let state = game.player_mut(player).ok_or(CorrectionRejection::UnknownPlayer(player))?;

        state.intrigue_hand.push(intrigue.clone());
        let summary = format!("{} manually added intrigue: '{}'.", state.name, definition.name);
        game.record(HistoryEntry::for_player(player, summary.clone()));
        info!(player = %player, intrigue = %intrigue, "intrigue added by hand");
        Ok(summary)
    }

    /// Replace a player's hand with cards from their deck pool. The rest of
    /// the pool becomes the draw deck and the discard pile is emptied.
    pub fn set_hand(
        &self,
        game: &mut GameState,
        player: PlayerId,
        cards: &[CardId],
    ) -> Result<String, CorrectionRejection> {
        let state = game.player(player).ok_or(CorrectionRejection::UnknownPlayer(player))?;

        let mut remaining = state.deck_pool.clone();
        for card in cards {
            if !self.content.cards.contains(card) {
                return Err(CorrectionRejection::UnknownCard(card.clone()));
            }
            match remaining.iter().position(|owned| owned == card) {
                Some(pos) => {
                    remaining.remove(pos);
                }
                None => {
                    return Err(CorrectionRejection::NotOwned {
                        player: state.name.clone(),
                        card: card.clone(),
                    })
                }
            }
        }

        let state = game.player_mut(player).ok_or(CorrectionRejection::UnknownPlayer(player))?;
        state.hand = cards.to_vec();
        state.draw_deck = remaining;
        state.discard_pile.clear();
        let summary = format!("Set {} card(s) in {}'s hand.", cards.len(), state.name);

        self.refresh_in_reveal(game, player);
        game.record(HistoryEntry::for_player(player, summary.clone()));
        info!(player = %player, cards = cards.len(), "hand set by hand");
        Ok(summary)
    }

    /// Add resource and influence deltas. Resources clamp at 0; influence
    /// goes through the alliance tracker like any other influence gain.
    pub fn adjust(
        &self,
        game: &mut GameState,
        player: PlayerId,
        adjustment: &Adjustment,
    ) -> Result<String, CorrectionRejection> {
        let state = game.player_mut(player).ok_or(CorrectionRejection::UnknownPlayer(player))?;
        let name = state.name.clone();

        let mut changes = Vec::new();
        for (resource, delta) in adjustment.resources.iter().filter(|(_, delta)| **delta != 0) {
            let resource = names::canonical(resource);
            let before = state.resources.get(resource);
            let after = state.resources.add(resource, *delta);
            if before + delta < 0 {
                changes.push(format!("{} {:+} (clamped to {})", resource, delta, after));
            } else {
                changes.push(format!("{} {:+} (now {})", resource, delta, after));
            }
        }

        let influence: Vec<Gain> = adjustment
            .influence
            .iter()
            .filter(|(_, delta)| **delta != 0)
            .map(|(faction, delta)| Gain::influence(*faction, *delta))
            .collect();
        changes.extend(EffectInterpreter::new(self.config).apply_gains(game, player, &influence));

        if changes.is_empty() {
            return Ok("No changes.".to_string());
        }

        self.refresh_in_reveal(game, player);
        let summary = format!("{} {}: {}", CORRECTION_TAG, name, changes.join(", "));
        game.record(HistoryEntry::for_player(player, summary.clone()));
        info!(player = %player, "counters corrected");
        Ok(summary)
    }

    fn refresh_in_reveal(&self, game: &mut GameState, player: PlayerId) {
        if game.phase == Phase::Reveal {
            RevealStatsCalculator::new(&self.content.cards, self.config).refresh(game, player);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, IntrigueDefinition, IntrigueEffect};
    use crate::core::PlayerState;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn content() -> ContentDb {
        ContentDb::new()
            .with_card(CardDefinition::new("dagger", "Dagger").with_reveal(0, 1))
            .and_then(|db| db.with_card(CardDefinition::new("diplomacy", "Diplomacy").with_reveal(1, 0)))
            .and_then(|db| db.with_card(CardDefinition::new("dune", "Dune, the Desert Planet")))
            .and_then(|db| {
                db.with_intrigue(IntrigueDefinition::new(
                    "windfall",
                    "Windfall",
                    IntrigueEffect::Gain(vec![Gain::resource(names::SOLARI, 2)]),
                ))
            })
            .unwrap()
    }

    fn game() -> GameState {
        let mut alia = PlayerState::new("Alia").with_hand(&["dagger"]);
        alia.deck_pool = ["dagger", "dagger", "diplomacy"].iter().map(|id| CardId::new(*id)).collect();
        alia.discard_pile = vec![CardId::new("diplomacy")];
        GameState::new(vec![alia, PlayerState::new("Duncan")], 1).unwrap()
    }

    #[test]
    fn test_add_intrigue() {
        let content = content();
        let config = RulesConfig::default();
        let processor = CorrectionProcessor::new(&content, &config);
        let mut game = game();

        let summary = processor.add_intrigue(&mut game, P0, &IntrigueId::new("windfall")).unwrap();

        assert_eq!(game.players[P0].intrigue_hand, vec![IntrigueId::new("windfall")]);
        assert_eq!(summary, "Alia manually added intrigue: 'Windfall'.");
        assert_eq!(game.round_history.len(), 1);
        assert_eq!(
            processor.add_intrigue(&mut game, P0, &IntrigueId::new("ambush")),
            Err(CorrectionRejection::UnknownIntrigue(IntrigueId::new("ambush")))
        );
        assert_eq!(
            processor.add_intrigue(&mut game, PlayerId::new(5), &IntrigueId::new("windfall")),
            Err(CorrectionRejection::UnknownPlayer(PlayerId::new(5)))
        );
    }

    #[test]
    fn test_set_hand_from_pool() {
        let content = content();
        let config = RulesConfig::default();
        let processor = CorrectionProcessor::new(&content, &config);
        let mut game = game();

        processor
            .set_hand(&mut game, P0, &[CardId::new("dagger"), CardId::new("diplomacy")])
            .unwrap();

        let alia = &game.players[P0];
        assert_eq!(alia.hand, vec![CardId::new("dagger"), CardId::new("diplomacy")]);
        assert_eq!(alia.draw_deck, vec![CardId::new("dagger")]);
        assert!(alia.discard_pile.is_empty());
    }

    #[test]
    fn test_set_hand_rejects_cards_not_owned() {
        let content = content();
        let config = RulesConfig::default();
        let processor = CorrectionProcessor::new(&content, &config);
        let mut game = game();

        assert_eq!(
            processor.set_hand(&mut game, P0, &[CardId::new("dune")]),
            Err(CorrectionRejection::NotOwned {
                player: "Alia".to_string(),
                card: CardId::new("dune"),
            })
        );
        // one copy of diplomacy in the pool
        assert!(matches!(
            processor.set_hand(&mut game, P0, &[CardId::new("diplomacy"), CardId::new("diplomacy")]),
            Err(CorrectionRejection::NotOwned { .. })
        ));
        assert_eq!(
            processor.set_hand(&mut game, P0, &[CardId::new("crysknife")]),
            Err(CorrectionRejection::UnknownCard(CardId::new("crysknife")))
        );
        assert_eq!(game.players[P0].hand, vec![CardId::new("dagger")]);
        assert!(game.round_history.is_empty());
    }

    #[test]
    fn test_adjust_clamps_resources() {
        let content = content();
        let config = RulesConfig::default();
        let processor = CorrectionProcessor::new(&content, &config);
        let mut game = game();
        game.players[P0].resources.set(names::SOLARI, 2);

        let summary = processor
            .adjust(
                &mut game,
                P0,
                &Adjustment::new()
                    .with_resource(names::SOLARI, -5)
                    .with_resource("troops", 3)
                    .with_resource(names::WATER, 0),
            )
            .unwrap();

        let alia = &game.players[P0];
        assert_eq!(alia.resources.get(names::SOLARI), 0);
        assert_eq!(alia.resources.get(names::TROOPS_GARRISON), 3);
        assert!(summary.starts_with("[CORRECTION] Alia: "));
        assert!(summary.contains("solari -5 (clamped to 0)"));
        assert!(!summary.contains("water"));
        assert_eq!(game.round_history.len(), 1);
    }

    #[test]
    fn test_adjust_influence_moves_alliance() {
        let content = content();
        let config = RulesConfig::default();
        let processor = CorrectionProcessor::new(&content, &config);
        let mut game = game();

        processor
            .adjust(&mut game, P1, &Adjustment::new().with_influence(Faction::Guild, 4))
            .unwrap();
        assert_eq!(game.alliances[Faction::Guild], Some(P1));
        assert_eq!(game.players[P1].resources.get(names::SOLARI), 3);

        processor
            .adjust(&mut game, P1, &Adjustment::new().with_influence(Faction::Guild, -9))
            .unwrap();
        assert_eq!(game.players[P1].influence[Faction::Guild], 0);
    }

    #[test]
    fn test_empty_adjustment_records_nothing() {
        let content = content();
        let config = RulesConfig::default();
        let processor = CorrectionProcessor::new(&content, &config);
        let mut game = game();

        assert!(Adjustment::new().with_resource(names::SPICE, 0).is_empty());
        assert_eq!(processor.adjust(&mut game, P0, &Adjustment::new()).unwrap(), "No changes.");
        assert!(game.round_history.is_empty());
    }

    #[test]
    fn test_adjust_refreshes_reveal_strength() {
        let content = content();
        let config = RulesConfig::default();
        let processor = CorrectionProcessor::new(&content, &config);
        let mut game = game();
        game.phase = Phase::Reveal;

        processor
            .adjust(&mut game, P1, &Adjustment::new().with_resource(names::TROOPS_IN_CONFLICT, 2))
            .unwrap();

        assert_eq!(game.players[P1].reveal_stats.total_strength, 4);
    }
}
