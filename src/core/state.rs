//! Game state: the board, the round, and every player's position.
//!
//! ## GameState
//!
//! - Phase and round number
//! - Location occupancy (at most one occupant per location)
//! - Active conflict, alliance holders, market, shared intrigue deck
//! - Round history, cleared at round reset
//! - RNG for every shuffle
//!
//! ## PlayerState
//!
//! Resources, influence, VP, agents, card piles, one-time bonus claims,
//! temporary effects, and the last reveal snapshot.
//!
//! Uses `im` persistent structures for the round history and occupancy so a
//! session can apply an intent to a clone and only commit on success.

use im::{OrdMap, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::faction::FactionMap;
use super::player::{PlayerId, PlayerMap};
use super::resources::{names, Resources};
use super::rng::GameRng;
use crate::cards::{CardId, ConflictId, IntrigueId, LeaderId, LocationId};

/// Names of temporary effects stored in `PlayerState::active_effects`.
pub mod effect_names {
    /// Accumulated strength from played intrigues and effects.
    pub const STRENGTH_BONUS: &str = "strength_bonus";
    /// Accumulated persuasion from effects.
    pub const PERSUASION_BONUS: &str = "persuasion_bonus";
    /// Set on the rank-1 player when a conflict resolves.
    pub const WON_CONFLICT: &str = "won_conflict";
}

/// Round phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    #[serde(rename = "AGENT_TURN")]
    AgentTurn,
    #[serde(rename = "REVEAL")]
    Reveal,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AgentTurn => write!(f, "AGENT_TURN"),
            Phase::Reveal => write!(f, "REVEAL"),
        }
    }
}

/// One line of the round history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub player: Option<PlayerId>,
    pub card: Option<String>,
    pub location: Option<String>,
    pub summary: String,
}

impl HistoryEntry {
    /// An entry not tied to a player.
    #[must_use]
    pub fn note(summary: impl Into<String>) -> Self {
        Self {
            player: None,
            card: None,
            location: None,
            summary: summary.into(),
        }
    }

    /// An entry for one player's action.
    #[must_use]
    pub fn for_player(player: PlayerId, summary: impl Into<String>) -> Self {
        Self {
            player: Some(player),
            card: None,
            location: None,
            summary: summary.into(),
        }
    }

    /// An agent placement entry.
    #[must_use]
    pub fn placement(
        player: PlayerId,
        card: impl Into<String>,
        location: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            player: Some(player),
            card: Some(card.into()),
            location: Some(location.into()),
            summary: summary.into(),
        }
    }
}

/// Per-card reveal contribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedCard {
    pub card: CardId,
    pub name: String,
    pub persuasion: i64,
    pub strength: i64,
    pub note: Option<String>,
}

/// Reveal snapshot stored on the player. Recomputed explicitly, never lazily.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealStats {
    pub total_persuasion: i64,
    /// Strength from hand cards only.
    pub base_strength: i64,
    /// Hand cards, committed troops, and temporary bonuses.
    pub total_strength: i64,
    pub cards: Vec<RevealedCard>,
}

/// One-time influence bonuses already claimed, per faction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusClaims {
    /// First-threshold VP bonus.
    pub first_threshold: FactionMap<bool>,
    /// Alliance-threshold faction reward.
    pub alliance_threshold: FactionMap<bool>,
}

/// One player's position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub leader: Option<LeaderId>,
    pub resources: Resources,
    pub influence: FactionMap<u32>,
    pub victory_points: u32,

    pub agents_placed: u8,
    pub agents_total: u8,
    pub has_passed: bool,

    pub hand: Vec<CardId>,
    pub discard_pile: Vec<CardId>,
    pub draw_deck: Vec<CardId>,
    /// Every card the player owns, wherever it currently sits.
    pub deck_pool: Vec<CardId>,

    pub intrigue_hand: Vec<IntrigueId>,
    pub claims: BonusClaims,
    pub active_effects: FxHashMap<String, i64>,
    pub reveal_stats: RevealStats,
    /// Persuasion already spent in the market this round.
    pub persuasion_spent: i64,
    /// Locations carrying this player's control marker.
    pub controls: Vec<LocationId>,
}

impl PlayerState {
    /// A player with two agents and nothing else.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            leader: None,
            resources: Resources::new(),
            influence: FactionMap::default(),
            victory_points: 0,
            agents_placed: 0,
            agents_total: 2,
            has_passed: false,
            hand: Vec::new(),
            discard_pile: Vec::new(),
            draw_deck: Vec::new(),
            deck_pool: Vec::new(),
            intrigue_hand: Vec::new(),
            claims: BonusClaims::default(),
            active_effects: FxHashMap::default(),
            reveal_stats: RevealStats::default(),
            persuasion_spent: 0,
            controls: Vec::new(),
        }
    }

    /// Builder: set the leader.
    #[must_use]
    pub fn with_leader(mut self, leader: impl Into<String>) -> Self {
        self.leader = Some(LeaderId::new(leader));
        self
    }

    /// Builder: set a resource.
    #[must_use]
    pub fn with_resource(mut self, resource: &str, amount: i64) -> Self {
        self.resources.set(resource, amount);
        self
    }

    /// Builder: put cards in hand. They are also added to the owned pool.
    #[must_use]
    pub fn with_hand(mut self, cards: &[&str]) -> Self {
        for card in cards {
            self.hand.push(CardId::new(*card));
            self.deck_pool.push(CardId::new(*card));
        }
        self
    }

    /// Builder: put intrigue cards in the intrigue hand.
    #[must_use]
    pub fn with_intrigues(mut self, intrigues: &[&str]) -> Self {
        self.intrigue_hand.extend(intrigues.iter().map(|id| IntrigueId::new(*id)));
        self
    }

    /// Value of a temporary effect (0 if unset).
    #[must_use]
    pub fn effect(&self, name: &str) -> i64 {
        self.active_effects.get(name).copied().unwrap_or(0)
    }

    pub fn set_effect(&mut self, name: impl Into<String>, value: i64) {
        self.active_effects.insert(name.into(), value);
    }

    /// Add to a temporary effect. Returns the new value.
    pub fn add_effect(&mut self, name: &str, delta: i64) -> i64 {
        let next = self.effect(name) + delta;
        self.active_effects.insert(name.to_string(), next);
        next
    }

    #[must_use]
    pub fn agents_remaining(&self) -> u8 {
        self.agents_total.saturating_sub(self.agents_placed)
    }

    #[must_use]
    pub fn troops_in_conflict(&self) -> i64 {
        self.resources.get(names::TROOPS_IN_CONFLICT)
    }

    /// Remove one copy of a card from hand. Returns whether it was there.
    pub fn remove_from_hand(&mut self, card: &CardId) -> bool {
        remove_one(&mut self.hand, card)
    }

    /// Remove one copy of a card from the owned pool.
    pub fn remove_from_pool(&mut self, card: &CardId) -> bool {
        remove_one(&mut self.deck_pool, card)
    }

    /// Remove one intrigue from the intrigue hand.
    pub fn remove_intrigue(&mut self, intrigue: &IntrigueId) -> bool {
        remove_one(&mut self.intrigue_hand, intrigue)
    }

    /// Draw up to `count` cards, reshuffling the discard pile into the draw
    /// deck when it runs out. Returns the cards drawn.
    pub fn draw_cards(&mut self, count: usize, rng: &mut GameRng) -> Vec<CardId> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            if self.draw_deck.is_empty() {
                if self.discard_pile.is_empty() {
                    break;
                }
                self.draw_deck.append(&mut self.discard_pile);
                rng.shuffle(&mut self.draw_deck);
            }
            let card = self.draw_deck.remove(0);
            self.hand.push(card.clone());
            drawn.push(card);
        }
        drawn
    }
}

fn remove_one<T: PartialEq>(items: &mut Vec<T>, item: &T) -> bool {
    match items.iter().position(|i| i == item) {
        Some(pos) => {
            items.remove(pos);
            true
        }
        None => false,
    }
}

/// Complete game state for one session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,

    /// Round number (starts at 1).
    pub round: u32,

    /// Location occupancy. Locations never visited are absent.
    pub locations: OrdMap<LocationId, Option<PlayerId>>,

    /// Conflict card for this round.
    pub conflict: Option<ConflictId>,

    /// The round's conflict has already paid out.
    pub conflict_resolved: bool,

    pub round_history: Vector<HistoryEntry>,

    /// Alliance holder per faction.
    pub alliances: FactionMap<Option<PlayerId>>,

    pub players: PlayerMap<PlayerState>,

    /// Cards available to buy, in display order.
    pub market: Vec<CardId>,

    /// Shared intrigue deck; cards are drawn from the end.
    pub intrigue_deck: Vec<IntrigueId>,

    /// Cards removed from the game.
    pub destroyed_pile: Vec<CardId>,

    pub rng: GameRng,
}

impl GameState {
    /// Create a game in round 1, agent phase. Returns `None` for an empty
    /// or oversized player list.
    #[must_use]
    pub fn new(players: Vec<PlayerState>, seed: u64) -> Option<Self> {
        let players = PlayerMap::from_vec(players)?;
        Some(Self {
            phase: Phase::AgentTurn,
            round: 1,
            locations: OrdMap::new(),
            conflict: None,
            conflict_resolved: false,
            round_history: Vector::new(),
            alliances: FactionMap::default(),
            players,
            market: Vec::new(),
            intrigue_deck: Vec::new(),
            destroyed_pile: Vec::new(),
            rng: GameRng::new(seed),
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        self.players.get(player)
    }

    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(player)
    }

    /// Seat of the player with this name.
    #[must_use]
    pub fn find_player(&self, name: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, state)| state.name == name)
            .map(|(id, _)| id)
    }

    /// Who occupies a location, if anyone.
    #[must_use]
    pub fn occupant(&self, location: &LocationId) -> Option<PlayerId> {
        self.locations.get(location).copied().flatten()
    }

    #[must_use]
    pub fn is_occupied(&self, location: &LocationId) -> bool {
        self.occupant(location).is_some()
    }

    pub fn occupy(&mut self, location: &LocationId, player: PlayerId) {
        self.locations.insert(location.clone(), Some(player));
    }

    /// Empty every location.
    pub fn clear_locations(&mut self) {
        let keys: Vec<LocationId> = self.locations.keys().cloned().collect();
        for key in keys {
            self.locations.insert(key, None);
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.round_history.push_back(entry);
    }

    /// Draw cards for a player from their own deck.
    pub fn draw_cards(&mut self, player: PlayerId, count: usize) -> Vec<CardId> {
        let Self { players, rng, .. } = self;
        match players.get_mut(player) {
            Some(state) => state.draw_cards(count, rng),
            None => Vec::new(),
        }
    }
}
