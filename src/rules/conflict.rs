//! Conflict ranking and rewards.
//!
//! ## Ranking
//!
//! Players with strength 0 are dropped. The rest are grouped by strength,
//! strongest first, and ranks are handed out with a cursor starting at 1:
//!
//! - a single player takes the cursor's rank and the cursor moves on by one
//! - a tie for rank 1 leaves rank 1 unawarded; the whole group takes rank 2
//!   and the cursor moves to 3
//! - a tie anywhere below rank 1 awards nothing, and no later group ranks
//!
//! So `{A:5, B:5, C:3}` gives rank 2 to A and B and rank 3 to C, while
//! `{A:5, B:3, C:3}` gives rank 1 to A and nothing else.

use std::collections::BTreeMap;

use smallvec::SmallVec;
use thiserror::Error;
use tracing::info;

use crate::cards::{ConflictDefinition, ConflictId, ContentDb};
use crate::core::{effect_names, GameState, HistoryEntry, PlayerId};
use crate::effects::EffectInterpreter;

/// Highest rank that can earn a reward.
pub const REWARD_RANKS: u8 = 3;

/// Why a conflict could not be set or resolved.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConflictRejection {
    #[error("no conflict is active this round")]
    NoActiveConflict,

    #[error("unknown conflict '{0}'")]
    UnknownConflict(ConflictId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("player {0} is listed more than once")]
    DuplicatePlayer(PlayerId),

    #[error("the conflict has already been resolved this round")]
    AlreadyResolved,
}

/// Players placed at each rank. Unawarded ranks are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ranking {
    ranks: BTreeMap<u8, SmallVec<[PlayerId; 4]>>,
}

impl Ranking {
    /// Rank players by strength.
    #[must_use]
    pub fn from_strengths(strengths: &[(PlayerId, i64)]) -> Self {
        let mut contenders: Vec<(PlayerId, i64)> = strengths.iter().copied().filter(|(_, s)| *s > 0).collect();
        contenders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut groups: Vec<SmallVec<[PlayerId; 4]>> = Vec::new();
        let mut last_strength = None;
        for (player, strength) in contenders {
            match groups.last_mut() {
                Some(group) if last_strength == Some(strength) => group.push(player),
                _ => {
                    let mut group = SmallVec::new();
                    group.push(player);
                    groups.push(group);
                }
            }
            last_strength = Some(strength);
        }

        let mut ranks = BTreeMap::new();
        let mut cursor = 1u8;
        for group in groups {
            if cursor > REWARD_RANKS {
                break;
            }
            if group.len() == 1 {
                ranks.insert(cursor, group);
                cursor += 1;
            } else if cursor == 1 {
                ranks.insert(2, group);
                cursor = 3;
            } else {
                break;
            }
        }

        Self { ranks }
    }

    /// Players at `rank` (empty if unawarded).
    #[must_use]
    pub fn at(&self, rank: u8) -> &[PlayerId] {
        self.ranks.get(&rank).map(SmallVec::as_slice).unwrap_or(&[])
    }

    /// The rank a player earned, if any.
    #[must_use]
    pub fn rank_of(&self, player: PlayerId) -> Option<u8> {
        self.ranks
            .iter()
            .find(|(_, players)| players.contains(&player))
            .map(|(rank, _)| *rank)
    }

    /// Awarded ranks in order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[PlayerId])> {
        self.ranks.iter().map(|(rank, players)| (*rank, players.as_slice()))
    }
}

/// Sets and resolves the round's conflict.
pub struct ConflictResolver<'a> {
    content: &'a ContentDb,
    interpreter: EffectInterpreter<'a>,
}

impl<'a> ConflictResolver<'a> {
    #[must_use]
    pub fn new(content: &'a ContentDb, interpreter: EffectInterpreter<'a>) -> Self {
        Self { content, interpreter }
    }

    /// Install the conflict card for this round.
    pub fn set_conflict(&self, game: &mut GameState, conflict: &ConflictId) -> Result<String, ConflictRejection> {
        let definition = self
            .content
            .conflicts
            .get(conflict)
            .ok_or_else(|| ConflictRejection::UnknownConflict(conflict.clone()))?;

        game.conflict = Some(conflict.clone());
        game.conflict_resolved = false;
        let summary = format!("Conflict set: {}", definition.name);
        game.record(HistoryEntry::note(summary.clone()));
        info!(conflict = %conflict, "conflict set");
        Ok(summary)
    }

    /// Strength map from each player's stored reveal snapshot.
    #[must_use]
    pub fn final_strengths(game: &GameState) -> Vec<(PlayerId, i64)> {
        game.players
            .iter()
            .map(|(id, state)| (id, state.reveal_stats.total_strength))
            .collect()
    }

    /// Rank players and hand out the active conflict's rewards.
    pub fn resolve(&self, game: &mut GameState, strengths: &[(PlayerId, i64)]) -> Result<String, ConflictRejection> {
        let conflict_id = game.conflict.clone().ok_or(ConflictRejection::NoActiveConflict)?;
        if game.conflict_resolved {
            return Err(ConflictRejection::AlreadyResolved);
        }
        let definition: &ConflictDefinition = self
            .content
            .conflicts
            .get(&conflict_id)
            .ok_or(ConflictRejection::UnknownConflict(conflict_id.clone()))?;

        if let Some((unknown, _)) = strengths.iter().find(|(p, _)| !game.players.contains(*p)) {
            return Err(ConflictRejection::UnknownPlayer(*unknown));
        }
        for (i, (player, _)) in strengths.iter().enumerate() {
            if strengths[..i].iter().any(|(seen, _)| seen == player) {
                return Err(ConflictRejection::DuplicatePlayer(*player));
            }
        }

        let ranking = Ranking::from_strengths(strengths);
        let mut parts = Vec::new();

        for (rank, players) in ranking.iter() {
            let rewards = definition.rewards_for(rank);
            for player in players {
                let audit = self.interpreter.apply_gains(game, *player, rewards);
                if rank == 1 {
                    if let Some(state) = game.player_mut(*player) {
                        state.set_effect(effect_names::WON_CONFLICT, 1);
                    }
                }
                let name = game.player(*player).map_or_else(|| player.to_string(), |s| s.name.clone());
                let detail = if audit.is_empty() { "no reward".to_string() } else { audit.join(", ") };
                parts.push(format!("{}: {} ({})", ordinal(rank), name, detail));
            }
        }

        let summary = if parts.is_empty() {
            format!("Conflict resolved ({}): no winners", definition.name)
        } else {
            format!("Conflict resolved ({}): {}", definition.name, parts.join(", "))
        };
        game.conflict_resolved = true;
        game.record(HistoryEntry::note(summary.clone()));
        info!(conflict = %conflict_id, "conflict resolved");
        Ok(summary)
    }
}

fn ordinal(rank: u8) -> &'static str {
    match rank {
        1 => "1st",
        2 => "2nd",
        3 => "3rd",
        _ => "unranked",
    }
}
