//! Tiered rating system: rank bands, adjustment engine, and player storage
//!
//! Ratings move through six named bands (Iron through Master) with
//! band-dependent win/loss deltas. The engine functions are pure; storage
//! is the external player-data collaborator seam.

pub mod engine;
pub mod storage;
pub mod tiers;

// Re-export commonly used types
pub use engine::{build_update, preview_update, rating_delta};
pub use storage::{InMemoryPlayerStore, MockPlayerStore, PlayerStore};
pub use tiers::{rank_tier, RankTier, TIERS};
