//! Test fixtures and helpers for integration testing

use scrim_hall::rating::storage::MockPlayerStore;
use scrim_hall::session::MatchmakingService;
use scrim_hall::types::PlayerRecord;
use std::sync::Arc;

/// Build a player record with zeroed win/loss counters
pub fn player_record(id: &str, name: &str, rate: u32) -> PlayerRecord {
    PlayerRecord {
        id: id.to_string(),
        name: name.to_string(),
        rate,
        wins: 0,
        losses: 0,
    }
}

/// Mock store preloaded with the given (id, name, rate) players
pub fn seeded_store(players: &[(&str, &str, u32)]) -> Arc<MockPlayerStore> {
    let store = Arc::new(MockPlayerStore::new());
    store.preset_records(
        players
            .iter()
            .map(|(id, name, rate)| player_record(id, name, *rate))
            .collect(),
    );
    store
}

/// Service over a seeded mock store, with the store handle kept for
/// assertions
pub fn create_test_system(
    players: &[(&str, &str, u32)],
) -> (MatchmakingService, Arc<MockPlayerStore>) {
    let store = seeded_store(players);
    let service = MatchmakingService::new(store.clone());
    (service, store)
}
