//! Effect list interpreter.
//!
//! Runs an ordered list of operations for one player. Each step either
//! applies (and writes an audit line) or halts the rest of its list. A halt
//! never undoes steps that already applied.
//!
//! A list halts on:
//! - a `Requirement` whose condition does not hold
//! - a `Pay` without consent, or one the player cannot afford
//! - an `Exchange` without consent, or whose payment is unaffordable
//! - a `Choice` with a missing or out-of-range index, or whose chosen
//!   alternative halts
//!
//! Influence gains are routed through `AllianceTracker`; the one-time faction
//! reward it returns is applied here like any other gain.

use tracing::{debug, warn};

use super::condition::ConditionEvaluator;
use super::decision::DecisionInput;
use super::operation::{Cost, Gain, Operation};
use crate::core::{effect_names, names, GameState, PlayerId, RulesConfig};
use crate::rules::AllianceTracker;

/// Result of running one effect list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainOutcome {
    pub audit: Vec<String>,
    /// False if some step halted the list.
    pub completed: bool,
    /// A `DestroySource` step ran.
    pub destroy_source: bool,
}

impl Default for ChainOutcome {
    fn default() -> Self {
        Self {
            audit: Vec::new(),
            completed: true,
            destroy_source: false,
        }
    }
}

impl ChainOutcome {
    /// Audit lines joined for a history entry, or `fallback` if empty.
    #[must_use]
    pub fn summary_or(&self, fallback: &str) -> String {
        if self.audit.is_empty() {
            fallback.to_string()
        } else {
            self.audit.join(", ")
        }
    }
}

/// Applies operation lists to a game.
pub struct EffectInterpreter<'a> {
    config: &'a RulesConfig,
}

impl<'a> EffectInterpreter<'a> {
    #[must_use]
    pub fn new(config: &'a RulesConfig) -> Self {
        Self { config }
    }

    /// Run `ops` for `player` with the caller's `decision`.
    pub fn apply(
        &self,
        game: &mut GameState,
        player: PlayerId,
        ops: &[Operation],
        decision: DecisionInput,
    ) -> ChainOutcome {
        let mut outcome = ChainOutcome::default();
        let completed = self.run(game, player, ops, decision, &mut outcome);
        outcome.completed = completed;
        outcome
    }

    /// Apply gains with no decision involved (rewards, buy effects).
    pub fn apply_gains(&self, game: &mut GameState, player: PlayerId, gains: &[Gain]) -> Vec<String> {
        let mut audit = Vec::new();
        for gain in gains {
            self.apply_gain(game, player, gain, &mut audit);
        }
        audit
    }

    fn run(
        &self,
        game: &mut GameState,
        player: PlayerId,
        ops: &[Operation],
        decision: DecisionInput,
        outcome: &mut ChainOutcome,
    ) -> bool {
        for (step, op) in ops.iter().enumerate() {
            let proceed = match op {
                Operation::Requirement(condition) => {
                    let check = ConditionEvaluator::evaluate(condition, game, player);
                    if let Some(note) = check.note {
                        outcome.audit.push(note);
                    }
                    check.met
                }

                Operation::Gain(gain) => {
                    self.apply_gain(game, player, gain, &mut outcome.audit);
                    true
                }

                Operation::Pay(costs) => {
                    if decision.consent {
                        self.pay(game, player, costs, &mut outcome.audit)
                    } else {
                        outcome.audit.push("declined optional payment".to_string());
                        false
                    }
                }

                Operation::Exchange { pay, gain } => {
                    if !decision.consent {
                        outcome.audit.push("declined exchange".to_string());
                        false
                    } else if self.pay(game, player, pay, &mut outcome.audit) {
                        for g in gain {
                            self.apply_gain(game, player, g, &mut outcome.audit);
                        }
                        true
                    } else {
                        false
                    }
                }

                Operation::Choice(alternatives) => match decision.choice_index {
                    Some(index) if index < alternatives.len() => {
                        outcome.audit.push(format!("chose option {}", index + 1));
                        self.run(game, player, &alternatives[index], decision, outcome)
                    }
                    _ => {
                        outcome.audit.push(format!(
                            "choice required (0-{}), none valid given",
                            alternatives.len().saturating_sub(1)
                        ));
                        false
                    }
                },

                Operation::DestroySource => {
                    outcome.destroy_source = true;
                    true
                }
            };

            if !proceed {
                let skipped = ops.len() - step - 1;
                debug!(player = %player, step, skipped, "effect list halted");
                if skipped > 0 {
                    outcome.audit.push(format!("halted, {} step(s) skipped", skipped));
                }
                return false;
            }
        }
        true
    }

    /// All-or-nothing payment: every cost is checked before any is taken.
    fn pay(&self, game: &mut GameState, player: PlayerId, costs: &[Cost], audit: &mut Vec<String>) -> bool {
        let Some(state) = game.player_mut(player) else {
            audit.push(format!("cannot pay: unknown player {}", player));
            return false;
        };

        if let Some(short) = costs
            .iter()
            .find(|c| !state.resources.can_afford(names::canonical(&c.resource), c.amount))
        {
            audit.push(format!(
                "cannot pay {} (has {})",
                short,
                state.resources.get(names::canonical(&short.resource))
            ));
            return false;
        }

        for cost in costs {
            state.resources.take(names::canonical(&cost.resource), cost.amount);
            audit.push(format!("paid {}", cost));
        }
        true
    }

    fn apply_gain(&self, game: &mut GameState, player: PlayerId, gain: &Gain, audit: &mut Vec<String>) {
        if let Gain::Influence { faction, amount } = gain {
            let update = AllianceTracker::new(self.config).change_influence(game, player, *faction, *amount);
            audit.extend(update.audit);
            for bonus in &update.faction_bonus {
                self.apply_gain(game, player, bonus, audit);
            }
            return;
        }

        if let Gain::Intrigue { amount } = gain {
            for _ in 0..*amount {
                match game.intrigue_deck.pop() {
                    Some(intrigue) => {
                        if let Some(state) = game.player_mut(player) {
                            state.intrigue_hand.push(intrigue);
                        }
                        audit.push("+1 intrigue card".to_string());
                    }
                    None => {
                        warn!(player = %player, "intrigue deck empty");
                        audit.push("needs manual resolution: intrigue deck empty".to_string());
                        break;
                    }
                }
            }
            return;
        }

        if let Gain::DrawCards { amount } = gain {
            let drawn = game.draw_cards(player, *amount as usize);
            audit.push(format!("drew {} card(s)", drawn.len()));
            return;
        }

        let Some(state) = game.player_mut(player) else {
            audit.push(format!("needs manual resolution: unknown player {}", player));
            return;
        };

        match gain {
            Gain::Resource { resource, amount } => {
                let now = state.resources.add(names::canonical(resource), *amount);
                audit.push(format!("{:+} {} (now {})", amount, names::canonical(resource), now));
            }
            Gain::VictoryPoints { amount } => {
                state.victory_points += amount;
                audit.push(format!("+{} VP", amount));
            }
            Gain::Persuasion { amount } => {
                state.add_effect(effect_names::PERSUASION_BONUS, *amount);
                state.reveal_stats.total_persuasion += amount;
                audit.push(format!("{:+} persuasion", amount));
            }
            Gain::Strength { amount } => {
                state.add_effect(effect_names::STRENGTH_BONUS, *amount);
                state.reveal_stats.total_strength += amount;
                audit.push(format!("{:+} strength", amount));
            }
            Gain::Control { location } => {
                if !state.controls.contains(location) {
                    state.controls.push(location.clone());
                }
                audit.push(format!("control of {}", location));
            }
            Gain::Manual { description } => {
                warn!(player = %player, effect = %description, "manual effect");
                audit.push(format!("needs manual resolution: {}", description));
            }
            Gain::Influence { .. } | Gain::Intrigue { .. } | Gain::DrawCards { .. } => {}
        }
    }
}
