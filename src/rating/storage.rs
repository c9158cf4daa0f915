//! Player record store interface and implementations
//!
//! This module defines the seam to the external player-data collaborator,
//! with an in-memory implementation and a mock that records calls for
//! testing. The core never caches records across operations; every action
//! that needs a record fetches it through this interface.

use crate::error::{MatchmakingError, Result};
use crate::types::{PlayerId, PlayerRecord, PlayerUpdate, DEFAULT_DISPLAY_NAME};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Trait for player record storage operations
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Fetch a player's record, creating a zeroed one on first reference.
    ///
    /// Refreshes the stored name when the observed display name is
    /// non-default and differs from the stored value.
    async fn fetch_or_create(&self, id: &PlayerId, display_name: &str) -> Result<PlayerRecord>;

    /// Apply a partial update to an existing player's record
    async fn persist(&self, id: &PlayerId, update: PlayerUpdate) -> Result<()>;

    /// Records ordered by rate descending, for leaderboard display
    async fn top_n(&self, n: usize) -> Result<Vec<PlayerRecord>>;
}

fn apply_update(record: &mut PlayerRecord, update: PlayerUpdate) {
    if let Some(rate) = update.rate {
        record.rate = rate;
    }
    if let Some(wins) = update.wins {
        record.wins = wins;
    }
    if let Some(losses) = update.losses {
        record.losses = losses;
    }
    if let Some(name) = update.name {
        record.name = name;
    }
}

fn sorted_top_n(records: &HashMap<PlayerId, PlayerRecord>, n: usize) -> Vec<PlayerRecord> {
    let mut entries: Vec<PlayerRecord> = records.values().cloned().collect();
    // Rate descending, then id ascending so equal rates order deterministically
    entries.sort_by(|a, b| b.rate.cmp(&a.rate).then_with(|| a.id.cmp(&b.id)));
    entries.truncate(n);
    entries
}

/// In-memory player store implementation
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    records: RwLock<HashMap<PlayerId, PlayerRecord>>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn record_count(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire records read lock".to_string(),
            })?;

        Ok(records.len())
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn fetch_or_create(&self, id: &PlayerId, display_name: &str) -> Result<PlayerRecord> {
        let mut records = self
            .records
            .write()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire records write lock".to_string(),
            })?;

        let record = records
            .entry(id.clone())
            .or_insert_with(|| PlayerRecord::new(id.clone(), display_name.to_string()));

        if display_name != DEFAULT_DISPLAY_NAME && record.name != display_name {
            record.name = display_name.to_string();
        }

        Ok(record.clone())
    }

    async fn persist(&self, id: &PlayerId, update: PlayerUpdate) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire records write lock".to_string(),
            })?;

        let record = records
            .get_mut(id)
            .ok_or_else(|| MatchmakingError::PersistenceFailed {
                player_id: id.clone(),
                message: "No record for player".to_string(),
            })?;

        apply_update(record, update);
        Ok(())
    }

    async fn top_n(&self, n: usize) -> Result<Vec<PlayerRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire records read lock".to_string(),
            })?;

        Ok(sorted_top_n(&records, n))
    }
}

/// Mock player store for testing
///
/// Records every call and allows persist failures to be injected per player.
#[derive(Debug, Default)]
pub struct MockPlayerStore {
    records: RwLock<HashMap<PlayerId, PlayerRecord>>,
    fetch_calls: RwLock<Vec<PlayerId>>,
    persist_calls: RwLock<Vec<(PlayerId, PlayerUpdate)>>,
    failing_persists: RwLock<HashSet<PlayerId>>,
}

impl MockPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset records for testing
    pub fn preset_records(&self, records: Vec<PlayerRecord>) {
        if let Ok(mut stored) = self.records.write() {
            for record in records {
                stored.insert(record.id.clone(), record);
            }
        }
    }

    /// Make persist fail for the given player
    pub fn fail_persist_for(&self, id: &str) {
        if let Ok(mut failing) = self.failing_persists.write() {
            failing.insert(id.to_string());
        }
    }

    /// Get all fetch calls made (for testing)
    pub fn get_fetch_calls(&self) -> Vec<PlayerId> {
        self.fetch_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Get all persist calls made (for testing)
    pub fn get_persist_calls(&self) -> Vec<(PlayerId, PlayerUpdate)> {
        self.persist_calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.fetch_calls.write() {
            calls.clear();
        }
        if let Ok(mut calls) = self.persist_calls.write() {
            calls.clear();
        }
    }

    /// Current state of a record (for testing)
    pub fn get_record(&self, id: &str) -> Option<PlayerRecord> {
        self.records
            .read()
            .ok()
            .and_then(|records| records.get(id).cloned())
    }
}

#[async_trait]
impl PlayerStore for MockPlayerStore {
    async fn fetch_or_create(&self, id: &PlayerId, display_name: &str) -> Result<PlayerRecord> {
        if let Ok(mut calls) = self.fetch_calls.write() {
            calls.push(id.clone());
        }

        let mut records = self
            .records
            .write()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire records write lock".to_string(),
            })?;

        let record = records
            .entry(id.clone())
            .or_insert_with(|| PlayerRecord::new(id.clone(), display_name.to_string()));

        if display_name != DEFAULT_DISPLAY_NAME && record.name != display_name {
            record.name = display_name.to_string();
        }

        Ok(record.clone())
    }

    async fn persist(&self, id: &PlayerId, update: PlayerUpdate) -> Result<()> {
        if let Ok(mut calls) = self.persist_calls.write() {
            calls.push((id.clone(), update.clone()));
        }

        let failing = self
            .failing_persists
            .read()
            .map(|set| set.contains(id))
            .unwrap_or(false);
        if failing {
            return Err(MatchmakingError::PersistenceFailed {
                player_id: id.clone(),
                message: "Injected persist failure".to_string(),
            }
            .into());
        }

        let mut records = self
            .records
            .write()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire records write lock".to_string(),
            })?;

        let record = records
            .get_mut(id)
            .ok_or_else(|| MatchmakingError::PersistenceFailed {
                player_id: id.clone(),
                message: "No record for player".to_string(),
            })?;

        apply_update(record, update);
        Ok(())
    }

    async fn top_n(&self, n: usize) -> Result<Vec<PlayerRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire records read lock".to_string(),
            })?;

        Ok(sorted_top_n(&records, n))
    }
}
