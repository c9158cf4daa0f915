//! Match sessions and the matchmaking action interface
//!
//! A session represents one started match awaiting exactly one terminal
//! outcome; the service owns queues and sessions and exposes the actions
//! the surrounding application drives.

pub mod instance;
pub mod manager;

// Re-export commonly used types
pub use instance::{MatchSession, SessionStatus};
pub use manager::{MatchmakingService, ServiceStats};
