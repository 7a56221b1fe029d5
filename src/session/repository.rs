//! Persistence seams for game state and content.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

use crate::cards::ContentDb;
use crate::core::GameState;

/// Storage failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no saved game '{0}'")]
    NotFound(String),

    #[error("snapshot encoding failed: {0}")]
    Codec(#[from] bincode::Error),
}

/// Loads and stores whole game snapshots.
pub trait StateRepository {
    fn load(&self, game_id: &str) -> Result<GameState, RepositoryError>;

    /// Replace the stored snapshot for `game_id`.
    fn commit(&mut self, game_id: &str, state: &GameState) -> Result<(), RepositoryError>;
}

/// In-process repository keeping `bincode` snapshots.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    snapshots: FxHashMap<String, Vec<u8>>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, game_id: &str) -> bool {
        self.snapshots.contains_key(game_id)
    }

    /// Size of the stored snapshot in bytes.
    #[must_use]
    pub fn snapshot_len(&self, game_id: &str) -> Option<usize> {
        self.snapshots.get(game_id).map(Vec::len)
    }
}

impl StateRepository for MemoryRepository {
    fn load(&self, game_id: &str) -> Result<GameState, RepositoryError> {
        let bytes = self
            .snapshots
            .get(game_id)
            .ok_or_else(|| RepositoryError::NotFound(game_id.to_string()))?;
        Ok(bincode::deserialize(bytes)?)
    }

    fn commit(&mut self, game_id: &str, state: &GameState) -> Result<(), RepositoryError> {
        let bytes = bincode::serialize(state)?;
        debug!(game = game_id, bytes = bytes.len(), "snapshot committed");
        self.snapshots.insert(game_id.to_string(), bytes);
        Ok(())
    }
}

/// Source of the content database. `None` means content could not be
/// loaded and no intent can run.
pub trait ContentStore {
    fn content(&self) -> Option<&ContentDb>;
}

impl ContentStore for ContentDb {
    fn content(&self) -> Option<&ContentDb> {
        Some(self)
    }
}

impl ContentStore for Option<ContentDb> {
    fn content(&self) -> Option<&ContentDb> {
        self.as_ref()
    }
}
