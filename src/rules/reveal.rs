//! Reveal-phase persuasion and strength.
//!
//! Cards still in hand at reveal contribute their base values plus every
//! conditional bonus whose predicate holds. Cards in the discard pile are
//! the ones played with agents this round; they count toward `PlayedTag` and
//! `PerTaggedCard` predicates but contribute nothing themselves.
//!
//! The result is stored on the player as a snapshot. Nothing recomputes it
//! lazily: callers recompute after changing a hand, influence, or troops.

use crate::cards::{CardDefinition, CardId, Registry, RevealPredicate, Symbol};
use crate::core::{effect_names, GameState, PlayerId, PlayerState, RevealStats, RevealedCard, RulesConfig};

/// Derives reveal snapshots from hand contents.
pub struct RevealStatsCalculator<'a> {
    cards: &'a Registry<CardDefinition>,
    config: &'a RulesConfig,
}

impl<'a> RevealStatsCalculator<'a> {
    #[must_use]
    pub fn new(cards: &'a Registry<CardDefinition>, config: &'a RulesConfig) -> Self {
        Self { cards, config }
    }

    /// Compute a player's snapshot without storing it.
    #[must_use]
    pub fn calculate(&self, game: &GameState, player: PlayerId) -> Option<RevealStats> {
        let state = game.player(player)?;
        let mut stats = RevealStats::default();
        let mut persuasion = 0;

        for card_id in &state.hand {
            let Some(card) = self.cards.get(card_id) else {
                stats.cards.push(RevealedCard {
                    card: card_id.clone(),
                    name: card_id.to_string(),
                    persuasion: 0,
                    strength: 0,
                    note: Some("needs manual resolution: unknown card".to_string()),
                });
                continue;
            };

            let mut card_persuasion = card.reveal.persuasion;
            let mut card_strength = card.reveal.strength;
            let mut activated = Vec::new();

            for bonus in &card.reveal.bonuses {
                let multiplier = self.multiplier(&bonus.when, game, player, state, &card.id);
                if multiplier > 0 {
                    card_persuasion += bonus.persuasion * multiplier;
                    card_strength += bonus.strength * multiplier;
                    activated.push(format!(
                        "bonus {:+} persuasion {:+} strength",
                        bonus.persuasion * multiplier,
                        bonus.strength * multiplier
                    ));
                }
            }

            let note = if activated.is_empty() {
                card.reveal.description.clone()
            } else {
                Some(activated.join("; "))
            };

            persuasion += card_persuasion;
            stats.base_strength += card_strength;
            stats.cards.push(RevealedCard {
                card: card.id.clone(),
                name: card.name.clone(),
                persuasion: card_persuasion,
                strength: card_strength,
                note,
            });
        }

        stats.total_persuasion = persuasion + state.effect(effect_names::PERSUASION_BONUS) - state.persuasion_spent;
        stats.total_strength = stats.base_strength
            + state.troops_in_conflict() * self.config.strength_per_troop
            + state.effect(effect_names::STRENGTH_BONUS);

        Some(stats)
    }

    /// Recompute and store one player's snapshot.
    pub fn refresh(&self, game: &mut GameState, player: PlayerId) -> Option<i64> {
        let stats = self.calculate(game, player)?;
        let total = stats.total_persuasion;
        game.player_mut(player)?.reveal_stats = stats;
        Some(total)
    }

    /// Recompute and store every player's snapshot.
    pub fn refresh_all(&self, game: &mut GameState) {
        let players: Vec<PlayerId> = game.players.player_ids().collect();
        for player in players {
            self.refresh(game, player);
        }
    }

    /// How many times a bonus applies (0 if the predicate fails).
    fn multiplier(
        &self,
        predicate: &RevealPredicate,
        game: &GameState,
        player: PlayerId,
        state: &PlayerState,
        this_card: &CardId,
    ) -> i64 {
        match predicate {
            RevealPredicate::AllyOf { faction } => i64::from(game.alliances[*faction] == Some(player)),
            RevealPredicate::PlayedTag { symbol } => i64::from(self.count_tagged(&state.discard_pile, symbol, None) > 0),
            RevealPredicate::PerTaggedCard { symbol } => {
                let played = self.count_tagged(&state.discard_pile, symbol, None);
                let held = self.count_tagged(&state.hand, symbol, Some(this_card));
                i64::try_from(played + held).unwrap_or(i64::MAX)
            }
        }
    }

    fn count_tagged(&self, pile: &[CardId], symbol: &Symbol, exclude: Option<&CardId>) -> usize {
        pile.iter()
            .filter(|id| Some(*id) != exclude)
            .filter_map(|id| self.cards.get(id))
            .filter(|card| card.has_symbol(symbol))
            .count()
    }
}
