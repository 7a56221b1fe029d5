//! Content registries.
//!
//! A `Registry<T>` stores one kind of content record and provides lookup by
//! id. `ContentDb` bundles the five registries the engine reads from and is
//! loaded once per request from the content store.

use std::fmt::Display;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::conflict::ConflictDefinition;
use super::definition::CardDefinition;
use super::ids::{CardId, ConflictId, IntrigueId, LeaderId, LocationId};
use super::intrigue::IntrigueDefinition;
use super::location::LocationDefinition;
use crate::leaders::LeaderDefinition;

/// Failure to load content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}

/// A content record stored in a registry.
pub trait ContentRecord {
    type Id: Clone + Eq + Hash + Display;

    /// Kind name used in error messages.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;
}

impl ContentRecord for CardDefinition {
    type Id = CardId;
    const KIND: &'static str = "card";

    fn id(&self) -> &CardId {
        &self.id
    }
}

impl ContentRecord for LocationDefinition {
    type Id = LocationId;
    const KIND: &'static str = "location";

    fn id(&self) -> &LocationId {
        &self.id
    }
}

impl ContentRecord for IntrigueDefinition {
    type Id = IntrigueId;
    const KIND: &'static str = "intrigue";

    fn id(&self) -> &IntrigueId {
        &self.id
    }
}

impl ContentRecord for LeaderDefinition {
    type Id = LeaderId;
    const KIND: &'static str = "leader";

    fn id(&self) -> &LeaderId {
        &self.id
    }
}

impl ContentRecord for ConflictDefinition {
    type Id = ConflictId;
    const KIND: &'static str = "conflict";

    fn id(&self) -> &ConflictId {
        &self.id
    }
}

/// Registry of one kind of content record.
///
/// ```
/// use imperium_engine::cards::{CardDefinition, CardId, Registry};
///
/// let mut cards = Registry::new();
/// cards.register(CardDefinition::new("dagger", "Dagger")).unwrap();
///
/// assert_eq!(cards.get(&CardId::new("dagger")).unwrap().name, "Dagger");
/// assert!(cards.register(CardDefinition::new("dagger", "Dagger")).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Registry<T: ContentRecord> {
    records: FxHashMap<T::Id, T>,
}

impl<T: ContentRecord> Default for Registry<T> {
    fn default() -> Self {
        Self {
            records: FxHashMap::default(),
        }
    }
}

impl<T: ContentRecord> Registry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record. Fails if the id is already taken.
    pub fn register(&mut self, record: T) -> Result<(), ContentError> {
        let id = record.id().clone();
        if self.records.contains_key(&id) {
            return Err(ContentError::DuplicateId {
                kind: T::KIND,
                id: id.to_string(),
            });
        }
        self.records.insert(id, record);
        Ok(())
    }

    /// Build a registry from a list of records.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Result<Self, ContentError> {
        let mut registry = Self::new();
        for record in records {
            registry.register(record)?;
        }
        Ok(registry)
    }

    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.records.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }
}

impl<T: ContentRecord + DeserializeOwned> Registry<T> {
    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let records: Vec<T> = serde_json::from_str(json)?;
        Self::from_records(records)
    }
}

/// All content the engine reads.
#[derive(Clone, Debug, Default)]
pub struct ContentDb {
    pub cards: Registry<CardDefinition>,
    pub locations: Registry<LocationDefinition>,
    pub intrigues: Registry<IntrigueDefinition>,
    pub leaders: Registry<LeaderDefinition>,
    pub conflicts: Registry<ConflictDefinition>,
}

#[derive(Deserialize)]
struct RawContent {
    #[serde(default)]
    cards: Vec<CardDefinition>,
    #[serde(default)]
    locations: Vec<LocationDefinition>,
    #[serde(default)]
    intrigues: Vec<IntrigueDefinition>,
    #[serde(default)]
    leaders: Vec<LeaderDefinition>,
    #[serde(default)]
    conflicts: Vec<ConflictDefinition>,
}

impl ContentDb {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object with `cards`, `locations`, `intrigues`, `leaders`
    /// and `conflicts` arrays. Missing arrays are empty.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let raw: RawContent = serde_json::from_str(json)?;
        Ok(Self {
            cards: Registry::from_records(raw.cards)?,
            locations: Registry::from_records(raw.locations)?,
            intrigues: Registry::from_records(raw.intrigues)?,
            leaders: Registry::from_records(raw.leaders)?,
            conflicts: Registry::from_records(raw.conflicts)?,
        })
    }

    /// Builder: add a card.
    pub fn with_card(mut self, card: CardDefinition) -> Result<Self, ContentError> {
        self.cards.register(card)?;
        Ok(self)
    }

    /// Builder: add a location.
    pub fn with_location(mut self, location: LocationDefinition) -> Result<Self, ContentError> {
        self.locations.register(location)?;
        Ok(self)
    }

    /// Builder: add an intrigue card.
    pub fn with_intrigue(mut self, intrigue: IntrigueDefinition) -> Result<Self, ContentError> {
        self.intrigues.register(intrigue)?;
        Ok(self)
    }

    /// Builder: add a leader.
    pub fn with_leader(mut self, leader: LeaderDefinition) -> Result<Self, ContentError> {
        self.leaders.register(leader)?;
        Ok(self)
    }

    /// Builder: add a conflict card.
    pub fn with_conflict(mut self, conflict: ConflictDefinition) -> Result<Self, ContentError> {
        self.conflicts.register(conflict)?;
        Ok(self)
    }
}
