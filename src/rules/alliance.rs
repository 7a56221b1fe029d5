//! Faction influence thresholds and alliance ownership.
//!
//! Every influence change goes through `AllianceTracker::change_influence`:
//!
//! 1. Influence is updated and clamped at 0.
//! 2. First time at `first_bonus_threshold`: one-time VP bonus.
//! 3. First time at `alliance_threshold`: one-time faction reward, returned to
//!    the caller so it is applied through the effect interpreter.
//! 4. Alliance check: an unclaimed alliance goes to the first qualifying
//!    player; a held alliance moves only to a player with strictly more
//!    influence, and the previous holder loses the alliance VP.
//!
//! Claimed flags never reset during a game. A holder whose influence later
//! drops keeps the alliance until someone overtakes them.

use tracing::info;

use crate::core::{Faction, GameState, PlayerId, RulesConfig};
use crate::effects::Gain;

/// Result of one influence change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfluenceUpdate {
    pub audit: Vec<String>,
    /// One-time faction reward still to be applied.
    pub faction_bonus: Vec<Gain>,
}

/// Influence and alliance bookkeeping.
pub struct AllianceTracker<'a> {
    config: &'a RulesConfig,
}

impl<'a> AllianceTracker<'a> {
    #[must_use]
    pub fn new(config: &'a RulesConfig) -> Self {
        Self { config }
    }

    /// Apply an influence delta and run threshold and alliance checks.
    pub fn change_influence(
        &self,
        game: &mut GameState,
        player: PlayerId,
        faction: Faction,
        delta: i64,
    ) -> InfluenceUpdate {
        let mut update = InfluenceUpdate::default();
        let Some(state) = game.player_mut(player) else {
            update
                .audit
                .push(format!("needs manual resolution: unknown player {}", player));
            return update;
        };

        let current = i64::from(state.influence[faction]);
        let next = u32::try_from((current + delta).max(0)).unwrap_or(u32::MAX);
        state.influence[faction] = next;
        update
            .audit
            .push(format!("{:+} {} influence (now {})", delta, faction, next));

        if next >= self.config.first_bonus_threshold && !state.claims.first_threshold[faction] {
            state.claims.first_threshold[faction] = true;
            state.victory_points += self.config.first_bonus_vp;
            update.audit.push(format!(
                "reached {} {} influence: +{} VP",
                self.config.first_bonus_threshold, faction, self.config.first_bonus_vp
            ));
        }

        if next >= self.config.alliance_threshold && !state.claims.alliance_threshold[faction] {
            state.claims.alliance_threshold[faction] = true;
            update.faction_bonus = self.config.faction_bonuses[faction].clone();
            update.audit.push(format!(
                "reached {} {} influence: faction reward",
                self.config.alliance_threshold, faction
            ));
        }

        if let Some(line) = self.update_alliance(game, player, faction) {
            update.audit.push(line);
        }

        update
    }

    /// Re-evaluate who holds `faction`'s alliance after `player`'s influence
    /// changed. Returns an audit line if the alliance moved.
    pub fn update_alliance(&self, game: &mut GameState, player: PlayerId, faction: Faction) -> Option<String> {
        let influence = game.player(player)?.influence[faction];
        if influence < self.config.alliance_threshold {
            return None;
        }

        let holder = game.alliances[faction];
        if holder == Some(player) {
            return None;
        }

        let mut line = String::new();
        if let Some(previous) = holder {
            let previous_state = game.player_mut(previous)?;
            if influence <= previous_state.influence[faction] {
                return None;
            }
            previous_state.victory_points = previous_state.victory_points.saturating_sub(self.config.alliance_vp);
            line.push_str(&format!(
                "{} loses the {} alliance (-{} VP); ",
                previous_state.name, faction, self.config.alliance_vp
            ));
        }

        let state = game.player_mut(player)?;
        state.victory_points += self.config.alliance_vp;
        line.push_str(&format!(
            "{} gains the {} alliance (+{} VP)",
            state.name, faction, self.config.alliance_vp
        ));
        game.alliances[faction] = Some(player);

        info!(player = %player, faction = %faction, "alliance changed hands");
        Some(line)
    }
}
