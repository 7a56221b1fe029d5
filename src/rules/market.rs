//! The card market and troop commitment.
//!
//! Buying spends reveal-phase persuasion. Spent persuasion is tracked on the
//! player separately from the snapshot so a refresh after buying still
//! reflects what is left.

use thiserror::Error;
use tracing::{info, warn};

use super::reveal::RevealStatsCalculator;
use crate::cards::{CardId, ContentDb};
use crate::core::{names, GameState, HistoryEntry, Phase, PlayerId, RulesConfig};
use crate::effects::EffectInterpreter;

/// Why a market action was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MarketRejection {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown card '{0}'")]
    UnknownCard(CardId),

    #[error("'{0}' cannot be bought")]
    NotBuyable(CardId),

    #[error("'{0}' is not in the market")]
    NotInMarket(CardId),

    #[error("not enough persuasion: required {required}, has {has}")]
    InsufficientPersuasion { required: i64, has: i64 },
}

/// Why a troop commitment was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TroopRejection {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("cannot commit {requested} troops: {available} available")]
    NotEnoughTroops { requested: i64, available: i64 },
}

/// Market purchases and troop deployment.
pub struct MarketProcessor<'a> {
    content: &'a ContentDb,
    config: &'a RulesConfig,
}

impl<'a> MarketProcessor<'a> {
    #[must_use]
    pub fn new(content: &'a ContentDb, config: &'a RulesConfig) -> Self {
        Self { content, config }
    }

    fn reveal(&self) -> RevealStatsCalculator<'a> {
        RevealStatsCalculator::new(&self.content.cards, self.config)
    }

    /// Put a buyable card on display.
    pub fn add_card_to_market(&self, game: &mut GameState, card_id: &CardId) -> Result<String, MarketRejection> {
        let card = self
            .content
            .cards
            .get(card_id)
            .ok_or_else(|| MarketRejection::UnknownCard(card_id.clone()))?;
        if !card.is_buyable() {
            return Err(MarketRejection::NotBuyable(card_id.clone()));
        }

        game.market.push(card_id.clone());
        let summary = format!("'{}' added to the market.", card.name);
        game.record(HistoryEntry::note(summary.clone()));
        Ok(summary)
    }

    /// Buy a card from the market with persuasion.
    pub fn buy_card(&self, game: &mut GameState, player: PlayerId, card_id: &CardId) -> Result<String, MarketRejection> {
        let card = self
            .content
            .cards
            .get(card_id)
            .ok_or_else(|| MarketRejection::UnknownCard(card_id.clone()))?;
        let cost = card.buy_cost.ok_or_else(|| MarketRejection::NotBuyable(card_id.clone()))?;
        let Some(slot) = game.market.iter().position(|id| id == card_id) else {
            return Err(MarketRejection::NotInMarket(card_id.clone()));
        };

        let reveal = self.reveal();
        let has = reveal.refresh(game, player).ok_or(MarketRejection::UnknownPlayer(player))?;
        if has < cost {
            warn!(player = %player, card = %card_id, cost, has, "purchase rejected");
            return Err(MarketRejection::InsufficientPersuasion { required: cost, has });
        }

        game.market.remove(slot);
        let player_name = match game.player_mut(player) {
            Some(state) => {
                state.persuasion_spent += cost;
                state.discard_pile.push(card_id.clone());
                state.deck_pool.push(card_id.clone());
                state.name.clone()
            }
            None => return Err(MarketRejection::UnknownPlayer(player)),
        };

        let gains = EffectInterpreter::new(self.config).apply_gains(game, player, &card.buy_effect);
        reveal.refresh(game, player);

        let mut summary = format!("{} bought '{}' for {} persuasion.", player_name, card.name, cost);
        if !gains.is_empty() {
            summary.push_str(&format!(" | Buy effect: {}", gains.join(", ")));
        }
        game.record(HistoryEntry::for_player(player, summary.clone()));
        info!(player = %player, card = %card_id, cost, "card bought");
        Ok(summary)
    }

    /// Set how many of a player's troops fight in the conflict. Troops move
    /// between the garrison and the conflict; the total is preserved.
    pub fn commit_troops(&self, game: &mut GameState, player: PlayerId, count: i64) -> Result<String, TroopRejection> {
        let state = game.player_mut(player).ok_or(TroopRejection::UnknownPlayer(player))?;
        let available = state.resources.get(names::TROOPS_GARRISON) + state.troops_in_conflict();
        if count < 0 || count > available {
            return Err(TroopRejection::NotEnoughTroops {
                requested: count,
                available,
            });
        }

        state.resources.set(names::TROOPS_IN_CONFLICT, count);
        state.resources.set(names::TROOPS_GARRISON, available - count);
        let summary = format!("{} committed {} troops to the conflict.", state.name, count);

        if game.phase == Phase::Reveal {
            self.reveal().refresh(game, player);
        }
        game.record(HistoryEntry::for_player(player, summary.clone()));
        info!(player = %player, count, "troops committed");
        Ok(summary)
    }
}
