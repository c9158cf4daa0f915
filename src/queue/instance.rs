//! Match queue implementation
//!
//! An insertion-ordered, duplicate-free set of participant ids waiting for
//! team assignment. The queue lives only for the active recruiting window
//! and is never persisted. Every operation is a plain collection mutation;
//! nothing here blocks.

use crate::types::{PlayerId, QueueId};
use crate::utils::{current_timestamp, generate_queue_id};
use chrono::{DateTime, Utc};

/// Participants waiting for a match, in join order
#[derive(Debug, Clone)]
pub struct MatchQueue {
    id: QueueId,
    waiting: Vec<PlayerId>,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl MatchQueue {
    /// Create a new empty queue with a fresh ID
    pub fn new() -> Self {
        Self::with_id(generate_queue_id())
    }

    /// Create a new empty queue with a specific ID
    pub fn with_id(id: QueueId) -> Self {
        let now = current_timestamp();
        Self {
            id,
            waiting: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    pub fn id(&self) -> QueueId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Append a participant if absent. Returns false when already queued;
    /// repeating the same join never changes state.
    pub fn join(&mut self, player_id: PlayerId) -> bool {
        if self.contains(&player_id) {
            return false;
        }
        self.waiting.push(player_id);
        self.last_activity = current_timestamp();
        true
    }

    /// Remove a participant if present. Returns false when not queued.
    pub fn leave(&mut self, player_id: &str) -> bool {
        let initial_len = self.waiting.len();
        self.waiting.retain(|id| id != player_id);

        if self.waiting.len() == initial_len {
            return false;
        }
        self.last_activity = current_timestamp();
        true
    }

    /// Empty the queue
    pub fn clear(&mut self) {
        self.waiting.clear();
        self.last_activity = current_timestamp();
    }

    /// Current membership in join order, without mutating
    pub fn snapshot(&self) -> Vec<PlayerId> {
        self.waiting.clone()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.waiting.iter().any(|id| id == player_id)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}

impl Default for MatchQueue {
    fn default() -> Self {
        Self::new()
    }
}
