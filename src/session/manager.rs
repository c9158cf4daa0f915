//! Matchmaking service orchestrating queues, sessions, and the player store
//!
//! This is the action interface exposed to the surrounding application:
//! recruit, join, leave, start, declare-winner, and cancel, plus the profile
//! and leaderboard read models. Queues and sessions are explicitly owned
//! instances keyed by id; actions against different instances proceed
//! independently, while actions against one instance serialize on its map
//! lock. No lock is held across a store call.

use crate::balance::{ExactPartitioner, GreedyPartitioner, PartitionStrategy, TeamPartitioner};
use crate::config::MatchmakingSettings;
use crate::error::{MatchmakingError, Result};
use crate::queue::MatchQueue;
use crate::rating::engine::{build_update, preview_update};
use crate::rating::storage::PlayerStore;
use crate::rating::tiers::rank_tier;
use crate::session::instance::MatchSession;
use crate::types::{
    LeaderboardEntry, LeaderboardView, MatchOutcome, MatchResolution, MatchStartView,
    ParticipantResult, PlayerId, ProfileView, QueueEntryView, QueueId, QueueView, SessionId,
    TeamMember, TeamSide, DEFAULT_DISPLAY_NAME,
};
use crate::utils::current_timestamp;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info};

/// Minimum queue size required to start a match
pub const MIN_PARTICIPANTS: usize = 2;

/// Accent color for an empty leaderboard
const LEADERBOARD_FALLBACK_COLOR: u32 = 0xffd700;

/// Statistics about service operations
#[derive(Debug, Clone, Default)]
pub struct ServiceStats {
    /// Total number of recruiting queues opened
    pub queues_opened: u64,
    /// Total number of successful joins
    pub players_joined: u64,
    /// Total number of matches started
    pub matches_started: u64,
    /// Total number of matches resolved with a winner
    pub matches_resolved: u64,
    /// Total number of matches cancelled
    pub matches_cancelled: u64,
    /// Current number of open queues
    pub active_queues: usize,
    /// Current number of sessions awaiting a result
    pub pending_sessions: usize,
}

/// The matchmaking service
pub struct MatchmakingService {
    /// Map of open recruiting queues by ID
    queues: Arc<RwLock<HashMap<QueueId, MatchQueue>>>,
    /// Map of match sessions by ID
    sessions: Arc<RwLock<HashMap<SessionId, MatchSession>>>,
    /// Player-data collaborator
    store: Arc<dyn PlayerStore>,
    /// Roster partitioning algorithm
    partitioner: Arc<dyn TeamPartitioner>,
    settings: MatchmakingSettings,
    stats: Arc<RwLock<ServiceStats>>,
}

impl MatchmakingService {
    /// Create a new service with default settings
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        Self::with_settings(store, MatchmakingSettings::default())
    }

    /// Create a new service with the given settings
    pub fn with_settings(store: Arc<dyn PlayerStore>, settings: MatchmakingSettings) -> Self {
        let partitioner = build_partitioner(&settings);
        Self::with_partitioner(store, partitioner, settings)
    }

    /// Create with a custom partitioner
    pub fn with_partitioner(
        store: Arc<dyn PlayerStore>,
        partitioner: Arc<dyn TeamPartitioner>,
        settings: MatchmakingSettings,
    ) -> Self {
        Self {
            queues: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            store,
            partitioner,
            settings,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Open a fresh recruiting queue
    pub async fn recruit(&self) -> Result<QueueView> {
        let queue = MatchQueue::new();
        let queue_id = queue.id();

        {
            let mut queues = self
                .queues
                .write()
                .map_err(|_| MatchmakingError::InternalError {
                    message: "Failed to acquire queues write lock".to_string(),
                })?;
            queues.insert(queue_id, queue);
        }

        self.bump_stats(|stats| stats.queues_opened += 1)?;
        info!("Opened recruiting queue {}", queue_id);

        Ok(QueueView {
            queue_id,
            entries: Vec::new(),
        })
    }

    /// Add a participant to a queue
    ///
    /// Ensures the player record exists (refreshing the stored name) before
    /// touching the queue. Joining twice is rejected as a typed signal.
    pub async fn join(
        &self,
        queue_id: QueueId,
        player_id: &str,
        display_name: &str,
    ) -> Result<QueueView> {
        self.store
            .fetch_or_create(&player_id.to_string(), display_name)
            .await?;

        {
            let mut queues = self
                .queues
                .write()
                .map_err(|_| MatchmakingError::InternalError {
                    message: "Failed to acquire queues write lock".to_string(),
                })?;
            let queue = queues
                .get_mut(&queue_id)
                .ok_or_else(|| MatchmakingError::QueueNotFound {
                    queue_id: queue_id.to_string(),
                })?;

            if !queue.join(player_id.to_string()) {
                return Err(MatchmakingError::AlreadyQueued {
                    player_id: player_id.to_string(),
                }
                .into());
            }
        }

        self.bump_stats(|stats| stats.players_joined += 1)?;
        debug!("Player {} joined queue {}", player_id, queue_id);

        self.queue_view(queue_id).await
    }

    /// Remove a participant from a queue
    pub async fn leave(&self, queue_id: QueueId, player_id: &str) -> Result<QueueView> {
        {
            let mut queues = self
                .queues
                .write()
                .map_err(|_| MatchmakingError::InternalError {
                    message: "Failed to acquire queues write lock".to_string(),
                })?;
            let queue = queues
                .get_mut(&queue_id)
                .ok_or_else(|| MatchmakingError::QueueNotFound {
                    queue_id: queue_id.to_string(),
                })?;

            if !queue.leave(player_id) {
                return Err(MatchmakingError::NotQueued {
                    player_id: player_id.to_string(),
                }
                .into());
            }
        }

        debug!("Player {} left queue {}", player_id, queue_id);
        self.queue_view(queue_id).await
    }

    /// Current membership of a queue as a display view
    pub async fn queue_view(&self, queue_id: QueueId) -> Result<QueueView> {
        let snapshot = self.queue_snapshot(queue_id)?;

        let mut entries = Vec::with_capacity(snapshot.len());
        for id in &snapshot {
            let record = self.store.fetch_or_create(id, DEFAULT_DISPLAY_NAME).await?;
            let tier = rank_tier(record.rate);
            entries.push(QueueEntryView {
                id: id.clone(),
                name: record.name,
                rate: record.rate,
                tier_icon: tier.icon.to_string(),
            });
        }

        Ok(QueueView { queue_id, entries })
    }

    /// Start a match from the queue's current membership
    ///
    /// Requires at least [`MIN_PARTICIPANTS`] queued; otherwise fails with
    /// no state change. Ratings are resolved through the store before the
    /// queue is cleared, so a store failure leaves the recruiting window
    /// intact.
    pub async fn start(&self, queue_id: QueueId) -> Result<MatchStartView> {
        let snapshot = self.queue_snapshot(queue_id)?;
        if snapshot.len() < MIN_PARTICIPANTS {
            return Err(MatchmakingError::InsufficientParticipants {
                count: snapshot.len(),
            }
            .into());
        }

        let mut roster = Vec::with_capacity(snapshot.len());
        for id in &snapshot {
            let record = self.store.fetch_or_create(id, DEFAULT_DISPLAY_NAME).await?;
            roster.push(TeamMember {
                id: id.clone(),
                name: record.name,
                rate: record.rate,
            });
        }

        let partition = self.partitioner.partition(&roster)?;
        let session = MatchSession::new(partition.team_a.clone(), partition.team_b.clone());
        let session_id = session.id();

        {
            let mut queues = self
                .queues
                .write()
                .map_err(|_| MatchmakingError::InternalError {
                    message: "Failed to acquire queues write lock".to_string(),
                })?;
            if let Some(queue) = queues.get_mut(&queue_id) {
                queue.clear();
            }
        }

        {
            let mut sessions = self
                .sessions
                .write()
                .map_err(|_| MatchmakingError::InternalError {
                    message: "Failed to acquire sessions write lock".to_string(),
                })?;
            sessions.insert(session_id, session);
        }

        self.bump_stats(|stats| stats.matches_started += 1)?;
        info!(
            "Match {} started with {} participants: {} vs {} ({} strategy)",
            session_id,
            roster.len(),
            partition.sum_a(),
            partition.sum_b(),
            self.partitioner.strategy()
        );

        Ok(MatchStartView {
            session_id,
            sum_a: partition.sum_a(),
            sum_b: partition.sum_b(),
            average_a: partition.team_a.average_rate(),
            average_b: partition.team_b.average_rate(),
            team_a: partition.team_a,
            team_b: partition.team_b,
        })
    }

    /// Resolve a pending session with a declared winner
    ///
    /// The terminal status is claimed under the sessions lock before any
    /// store call, so a repeated resolve (or a cancel racing it) fails
    /// without reaching the store. Rating updates are then applied to every
    /// participant; a failed write is reported in that participant's result
    /// rather than silently dropped.
    pub async fn declare_winner(
        &self,
        session_id: SessionId,
        winner: TeamSide,
    ) -> Result<MatchResolution> {
        let (team_a, team_b, resolved_at) = {
            let mut sessions = self
                .sessions
                .write()
                .map_err(|_| MatchmakingError::InternalError {
                    message: "Failed to acquire sessions write lock".to_string(),
                })?;
            let session = sessions.get_mut(&session_id).ok_or_else(|| {
                MatchmakingError::SessionNotFound {
                    session_id: session_id.to_string(),
                }
            })?;

            session.mark_resolved(winner)?;
            (
                session.team_a().clone(),
                session.team_b().clone(),
                session.resolved_at().unwrap_or_else(current_timestamp),
            )
        };

        let mut results = Vec::with_capacity(team_a.len() + team_b.len());
        for (side, team) in [(TeamSide::A, &team_a), (TeamSide::B, &team_b)] {
            let outcome = if side == winner {
                MatchOutcome::Win
            } else {
                MatchOutcome::Loss
            };
            for member in team.members() {
                results.push(self.apply_member_update(member, side, outcome).await);
            }
        }

        self.bump_stats(|stats| stats.matches_resolved += 1)?;
        info!("Match {} resolved: team {} wins", session_id, winner);

        Ok(MatchResolution {
            session_id,
            winner,
            results,
            resolved_at,
        })
    }

    /// Cancel a pending session without rating changes
    pub async fn cancel(&self, session_id: SessionId) -> Result<()> {
        {
            let mut sessions = self
                .sessions
                .write()
                .map_err(|_| MatchmakingError::InternalError {
                    message: "Failed to acquire sessions write lock".to_string(),
                })?;
            let session = sessions.get_mut(&session_id).ok_or_else(|| {
                MatchmakingError::SessionNotFound {
                    session_id: session_id.to_string(),
                }
            })?;
            session.mark_cancelled()?;
        }

        self.bump_stats(|stats| stats.matches_cancelled += 1)?;
        info!("Match {} cancelled", session_id);
        Ok(())
    }

    /// Snapshot of a session (for display and tests)
    pub async fn session(&self, session_id: SessionId) -> Result<MatchSession> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire sessions read lock".to_string(),
            })?;

        sessions
            .get(&session_id)
            .cloned()
            .ok_or_else(|| {
                MatchmakingError::SessionNotFound {
                    session_id: session_id.to_string(),
                }
                .into()
            })
    }

    /// Profile read model for a single player
    pub async fn profile(&self, player_id: &str, display_name: &str) -> Result<ProfileView> {
        let record = self
            .store
            .fetch_or_create(&player_id.to_string(), display_name)
            .await?;
        let tier = rank_tier(record.rate);

        Ok(ProfileView {
            id: record.id,
            name: record.name,
            rate: record.rate,
            wins: record.wins,
            losses: record.losses,
            tier_name: tier.name.to_string(),
            tier_icon: tier.icon.to_string(),
            tier_color: tier.color,
        })
    }

    /// Leaderboard read model, sized per settings
    pub async fn leaderboard(&self) -> Result<LeaderboardView> {
        let records = self.store.top_n(self.settings.leaderboard_size).await?;

        let accent_color = records
            .first()
            .map(|leader| rank_tier(leader.rate).color)
            .unwrap_or(LEADERBOARD_FALLBACK_COLOR);

        let entries = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                let tier = rank_tier(record.rate);
                LeaderboardEntry {
                    position: i + 1,
                    id: record.id,
                    name: record.name,
                    rate: record.rate,
                    tier_name: tier.name.to_string(),
                    tier_icon: tier.icon.to_string(),
                }
            })
            .collect();

        Ok(LeaderboardView {
            entries,
            accent_color,
        })
    }

    /// Current service statistics
    pub async fn get_stats(&self) -> Result<ServiceStats> {
        let mut stats = self
            .stats
            .read()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire stats read lock".to_string(),
            })?
            .clone();

        let queues = self
            .queues
            .read()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire queues read lock".to_string(),
            })?;
        stats.active_queues = queues.len();
        drop(queues);

        let sessions = self
            .sessions
            .read()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire sessions read lock".to_string(),
            })?;
        stats.pending_sessions = sessions.values().filter(|s| s.is_pending()).count();

        Ok(stats)
    }

    fn queue_snapshot(&self, queue_id: QueueId) -> Result<Vec<PlayerId>> {
        let queues = self
            .queues
            .read()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire queues read lock".to_string(),
            })?;

        let queue = queues
            .get(&queue_id)
            .ok_or_else(|| MatchmakingError::QueueNotFound {
                queue_id: queue_id.to_string(),
            })?;

        Ok(queue.snapshot())
    }

    /// Fetch, adjust, and persist one participant's rating as a single
    /// logical step; a failure on either side lands in `persist_error`.
    async fn apply_member_update(
        &self,
        member: &TeamMember,
        side: TeamSide,
        outcome: MatchOutcome,
    ) -> ParticipantResult {
        match self.store.fetch_or_create(&member.id, &member.name).await {
            Ok(record) => {
                let (adjustment, update) = build_update(&record, outcome);
                let persist_error = match self.store.persist(&member.id, update).await {
                    Ok(()) => None,
                    Err(e) => {
                        error!("Failed to persist rating update for {}: {}", member.id, e);
                        Some(e.to_string())
                    }
                };

                ParticipantResult {
                    id: member.id.clone(),
                    name: record.name,
                    side,
                    outcome,
                    adjustment,
                    persist_error,
                }
            }
            Err(e) => {
                error!("Failed to fetch record for {}: {}", member.id, e);
                ParticipantResult {
                    id: member.id.clone(),
                    name: member.name.clone(),
                    side,
                    outcome,
                    // Best available estimate from the partition-time rate;
                    // nothing was written for this participant.
                    adjustment: preview_update(member.rate, outcome),
                    persist_error: Some(e.to_string()),
                }
            }
        }
    }

    fn bump_stats(&self, apply: impl FnOnce(&mut ServiceStats)) -> Result<()> {
        let mut stats = self
            .stats
            .write()
            .map_err(|_| MatchmakingError::InternalError {
                message: "Failed to acquire stats write lock".to_string(),
            })?;
        apply(&mut stats);
        Ok(())
    }
}

fn build_partitioner(settings: &MatchmakingSettings) -> Arc<dyn TeamPartitioner> {
    match settings.partition_strategy {
        PartitionStrategy::Greedy => Arc::new(GreedyPartitioner::new()),
        PartitionStrategy::Exact => Arc::new(ExactPartitioner::with_fallback_limit(
            settings.exact_partition_limit,
        )),
    }
}
