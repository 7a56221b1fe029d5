//! Agent placement: validate, commit, record.
//!
//! A move sends one agent with one card from hand to one location. Commit
//! order matters for the audit line and for effects that depend on earlier
//! gains:
//!
//! 1. occupy the location
//! 2. pay the (possibly discounted) location cost, then any payment-triggered
//!    leader operations
//! 3. location effect, then any leader bonus for that location
//! 4. the card's agent effect, or the leader's signet ability when the card
//!    is the proxy card
//! 5. discard the card, or destroy it if a `DestroySource` step ran
//! 6. agent bookkeeping, including location agent bonuses
//! 7. append the round history entry

use thiserror::Error;
use tracing::{info, warn};

use crate::cards::{AgentBonus, CardDefinition, CardId, ContentDb, LocationDefinition, LocationId, Symbol};
use crate::core::{names, GameState, HistoryEntry, Phase, PlayerId, PlayerState, RulesConfig};
use crate::effects::{ConditionEvaluator, DecisionInput, DecisionRequest, EffectInterpreter, Operation};
use crate::leaders::{Capability, LeaderCapability, Payment};

static NO_CAPABILITY: Capability = Capability::None;

/// Why a move was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("cannot send an agent during the {0} phase")]
    WrongPhase(Phase),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("{0} has no agents left this round")]
    NoAgentsLeft(String),

    #[error("{0} has already passed this round")]
    AlreadyPassed(String),

    #[error("unknown location '{0}'")]
    UnknownLocation(LocationId),

    #[error("unknown card '{0}'")]
    UnknownCard(CardId),

    #[error("'{location}' is already occupied by {occupant}")]
    Occupied { location: String, occupant: String },

    #[error("{player} does not hold '{card}'")]
    CardNotInHand { player: String, card: String },

    #[error("'{card}' does not carry the '{required}' symbol required by '{location}'")]
    SymbolMismatch {
        card: String,
        location: String,
        required: Symbol,
    },

    #[error("not enough {resource}: required {required}, has {has}")]
    CannotAfford { resource: String, required: i64, has: i64 },

    #[error("location requirement not met: {0}")]
    RequirementUnmet(String),
}

/// Validates and commits agent placements.
pub struct MoveProcessor<'a> {
    content: &'a ContentDb,
    config: &'a RulesConfig,
}

impl<'a> MoveProcessor<'a> {
    #[must_use]
    pub fn new(content: &'a ContentDb, config: &'a RulesConfig) -> Self {
        Self { content, config }
    }

    /// The acting player's passive capability. Players without a known
    /// leader get the neutral one.
    #[must_use]
    pub fn capability(&self, state: &PlayerState) -> &'a dyn LeaderCapability {
        state
            .leader
            .as_ref()
            .and_then(|id| self.content.leaders.get(id))
            .map_or(&NO_CAPABILITY, |leader| &leader.passive)
    }

    /// Check a move without changing anything.
    pub fn validate(
        &self,
        game: &GameState,
        player: PlayerId,
        card_id: &CardId,
        location_id: &LocationId,
    ) -> Result<(&'a CardDefinition, &'a LocationDefinition), MoveRejection> {
        if game.phase != Phase::AgentTurn {
            return Err(MoveRejection::WrongPhase(game.phase));
        }

        let state = game.player(player).ok_or(MoveRejection::UnknownPlayer(player))?;
        if state.agents_placed >= state.agents_total {
            return Err(MoveRejection::NoAgentsLeft(state.name.clone()));
        }
        if state.has_passed {
            return Err(MoveRejection::AlreadyPassed(state.name.clone()));
        }

        let location = self
            .content
            .locations
            .get(location_id)
            .ok_or_else(|| MoveRejection::UnknownLocation(location_id.clone()))?;
        let card = self
            .content
            .cards
            .get(card_id)
            .ok_or_else(|| MoveRejection::UnknownCard(card_id.clone()))?;

        let capability = self.capability(state);
        if let Some(occupant) = game.occupant(location_id) {
            if !capability.allows_occupied(location) {
                let occupant = game.player(occupant).map_or_else(|| occupant.to_string(), |s| s.name.clone());
                return Err(MoveRejection::Occupied {
                    location: location.name.clone(),
                    occupant,
                });
            }
        }

        if !state.hand.contains(card_id) {
            return Err(MoveRejection::CardNotInHand {
                player: state.name.clone(),
                card: card.name.clone(),
            });
        }

        if let Some(required) = &location.symbol_required {
            if !card.has_symbol(required) {
                return Err(MoveRejection::SymbolMismatch {
                    card: card.name.clone(),
                    location: location.name.clone(),
                    required: required.clone(),
                });
            }
        }

        for cost in &location.cost {
            let resource = names::canonical(&cost.resource);
            let required = cost.amount - capability.cost_discount(location, cost);
            let has = state.resources.get(resource);
            if has < required {
                return Err(MoveRejection::CannotAfford {
                    resource: resource.to_string(),
                    required,
                    has,
                });
            }
        }

        if let Some(condition) = &location.requirement {
            let check = ConditionEvaluator::evaluate(condition, game, player);
            if !check.met {
                return Err(MoveRejection::RequirementUnmet(check.note.unwrap_or_default()));
            }
        }

        Ok((card, location))
    }

    /// First decision the move will ask for: the card (or signet) effect is
    /// scanned before the location effect.
    pub fn decision(
        &self,
        game: &GameState,
        player: PlayerId,
        card_id: &CardId,
        location_id: &LocationId,
    ) -> Result<DecisionRequest, MoveRejection> {
        let (card, location) = self.validate(game, player, card_id, location_id)?;
        let state = game.player(player).ok_or(MoveRejection::UnknownPlayer(player))?;

        let card_request = if card.id == self.config.proxy_card {
            state
                .leader
                .as_ref()
                .and_then(|id| self.content.leaders.get(id))
                .and_then(|leader| leader.signet.as_ref())
                .map_or(DecisionRequest::Simple, |signet| {
                    DecisionRequest::scan(&signet.effect, &signet.name)
                })
        } else {
            DecisionRequest::scan(&card.agent_effect, &card.name)
        };

        if !card_request.is_simple() {
            return Ok(card_request);
        }
        Ok(DecisionRequest::scan(&location.effect, &location.name))
    }

    /// Validate and apply a move. Returns the audit line.
    pub fn commit(
        &self,
        game: &mut GameState,
        player: PlayerId,
        card_id: &CardId,
        location_id: &LocationId,
        decision: DecisionInput,
    ) -> Result<String, MoveRejection> {
        let (card, location) = match self.validate(game, player, card_id, location_id) {
            Ok(found) => found,
            Err(rejection) => {
                warn!(player = %player, card = %card_id, location = %location_id, %rejection, "move rejected");
                return Err(rejection);
            }
        };
        let interpreter = EffectInterpreter::new(self.config);

        let state = game.player(player).ok_or(MoveRejection::UnknownPlayer(player))?;
        let player_name = state.name.clone();
        let capability = self.capability(state);
        let signet = state
            .leader
            .as_ref()
            .and_then(|id| self.content.leaders.get(id))
            .map(|leader| leader.signet.as_ref());

        // 1. occupy
        game.occupy(location_id, player);
        let mut summary = format!("{} played '{}' on '{}'.", player_name, card.name, location.name);

        // 2. pay
        let mut after_payment: Vec<Operation> = Vec::new();
        if let Some(state) = game.player_mut(player) {
            for cost in &location.cost {
                let resource = names::canonical(&cost.resource);
                let paid = (cost.amount - capability.cost_discount(location, cost)).max(0);
                state.resources.take(resource, paid);
                summary.push_str(&format!(" (Paid {} {})", paid, resource));
                after_payment.extend(capability.after_payment(&Payment {
                    resource: resource.to_string(),
                    listed: cost.amount,
                    paid,
                }));
            }
        }
        if !after_payment.is_empty() {
            let outcome = interpreter.apply(game, player, &after_payment, decision);
            summary.push_str(&format!(" | Leader: {}", outcome.summary_or("(No effect)")));
        }

        // 3. location
        let outcome = interpreter.apply(game, player, &location.effect, decision);
        summary.push_str(&format!(" | Location: {}", outcome.summary_or("(No effect)")));

        let bonus = capability.location_bonus(location);
        if !bonus.is_empty() {
            let outcome = interpreter.apply(game, player, &bonus, decision);
            summary.push_str(&format!(" | Leader bonus: {}", outcome.summary_or("(No effect)")));
        }

        // 4. card or signet
        let destroy = if card.id == self.config.proxy_card {
            match signet {
                Some(Some(ability)) => {
                    let outcome = interpreter.apply(game, player, &ability.effect, decision);
                    summary.push_str(&format!(" | Signet ({}): {}", ability.name, outcome.summary_or("(No effect)")));
                    outcome.destroy_source
                }
                Some(None) => {
                    summary.push_str(" | Signet: needs manual resolution: leader has no signet ability");
                    false
                }
                None => {
                    warn!(player = %player, "signet played without a known leader");
                    summary.push_str(" | Signet: needs manual resolution: leader not found");
                    false
                }
            }
        } else {
            let outcome = interpreter.apply(game, player, &card.agent_effect, decision);
            summary.push_str(&format!(" | Card: {}", outcome.summary_or("(No effect)")));
            outcome.destroy_source
        };

        // 5-6. card movement and agents
        if let Some(state) = game.player_mut(player) {
            if destroy {
                state.remove_from_hand(card_id);
                state.remove_from_pool(card_id);
            } else if state.remove_from_hand(card_id) {
                state.discard_pile.push(card_id.clone());
            }

            state.agents_placed += 1;
            match location.agent_bonus {
                Some(AgentBonus::ExtraThisRound) => {
                    state.agents_placed = state.agents_placed.saturating_sub(1);
                    summary.push_str(" (Gained 1 temporary agent)");
                }
                Some(AgentBonus::Permanent) if state.agents_total < self.config.max_agents => {
                    state.agents_total = self.config.max_agents;
                    summary.push_str(" (Gained 1 permanent agent)");
                }
                _ => {}
            }
        }
        if destroy {
            game.destroyed_pile.push(card_id.clone());
            summary.push_str(" (Card Destroyed)");
        }

        // 7. record
        game.record(HistoryEntry::placement(player, &card.name, &location.name, summary.clone()));
        info!(player = %player, card = %card_id, location = %location_id, "move committed");
        Ok(summary)
    }
}
