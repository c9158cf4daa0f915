//! Scrim Hall - matchmaking service for rate-balanced team scrimmages
//!
//! This crate provides recruiting queue management, a tiered skill-rating
//! system, and imbalance-minimizing team partitioning for two-team matches.

pub mod balance;
pub mod config;
pub mod error;
pub mod queue;
pub mod rating;
pub mod session;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{MatchmakingError, Result};
pub use types::*;

// Re-export key components
pub use balance::{ExactPartitioner, GreedyPartitioner, TeamPartitioner};
pub use queue::MatchQueue;
pub use rating::storage::{InMemoryPlayerStore, PlayerStore};
pub use session::{MatchSession, MatchmakingService, SessionStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
