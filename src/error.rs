//! Error types for the matchmaking service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific matchmaking scenarios
#[derive(Debug, thiserror::Error)]
pub enum MatchmakingError {
    #[error("Not enough participants to start a match: {count} queued, need at least 2")]
    InsufficientParticipants { count: usize },

    #[error("Player {player_id} is already queued")]
    AlreadyQueued { player_id: String },

    #[error("Player {player_id} is not in the queue")]
    NotQueued { player_id: String },

    #[error("Queue not found: {queue_id}")]
    QueueNotFound { queue_id: String },

    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("Session {session_id} is not pending: current status is {status}")]
    SessionNotPending { session_id: String, status: String },

    #[error("Invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("Persistence failed for player {player_id}: {message}")]
    PersistenceFailed { player_id: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}
