//! Common types used throughout the matchmaking service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players, assigned by the surrounding platform
pub type PlayerId = String;

/// Unique identifier for recruiting queues
pub type QueueId = Uuid;

/// Unique identifier for match sessions
pub type SessionId = Uuid;

/// Display name used when the platform provides none
pub const DEFAULT_DISPLAY_NAME: &str = "Unknown";

/// Persisted per-player record, owned by the player-data collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    /// Last-seen display name, not authoritative
    pub name: String,
    pub rate: u32,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerRecord {
    /// Create a fresh record for a first-seen player
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            rate: 0,
            wins: 0,
            losses: 0,
        }
    }
}

/// Partial update pushed to the player store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub rate: Option<u32>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub name: Option<String>,
}

/// Which of the two teams is being referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    /// The opposing side
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamSide::A => write!(f, "A"),
            TeamSide::B => write!(f, "B"),
        }
    }
}

/// Outcome of a match from one participant's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Loss,
}

impl MatchOutcome {
    pub fn is_win(self) -> bool {
        matches!(self, MatchOutcome::Win)
    }
}

/// Roster entry snapshotted at partition time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: PlayerId,
    pub name: String,
    pub rate: u32,
}

/// One side of a started match; immutable once the match starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    members: Vec<TeamMember>,
    total_rate: u32,
}

impl Team {
    pub fn new(members: Vec<TeamMember>) -> Self {
        let total_rate = members.iter().map(|m| m.rate).sum();
        Self {
            members,
            total_rate,
        }
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn total_rate(&self) -> u32 {
        self.total_rate
    }

    /// Mean rate of the team, or 0.0 for an empty team
    pub fn average_rate(&self) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        self.total_rate as f64 / self.members.len() as f64
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.members.iter().any(|m| m.id == player_id)
    }
}

/// Rating movement for one participant after resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingAdjustment {
    pub old_rate: u32,
    pub new_rate: u32,
    pub delta: i32,
}

/// Per-participant entry in a match resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantResult {
    pub id: PlayerId,
    pub name: String,
    pub side: TeamSide,
    pub outcome: MatchOutcome,
    pub adjustment: RatingAdjustment,
    /// Present when the store rejected this participant's write; the
    /// computed adjustment then diverges from persisted state
    pub persist_error: Option<String>,
}

/// Result record produced when a session is resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResolution {
    pub session_id: SessionId,
    pub winner: TeamSide,
    pub results: Vec<ParticipantResult>,
    pub resolved_at: DateTime<Utc>,
}

impl MatchResolution {
    /// Results for one side, in team order
    pub fn results_for(&self, side: TeamSide) -> Vec<&ParticipantResult> {
        self.results.iter().filter(|r| r.side == side).collect()
    }

    /// Participants whose store write failed
    pub fn failed_writes(&self) -> Vec<&ParticipantResult> {
        self.results
            .iter()
            .filter(|r| r.persist_error.is_some())
            .collect()
    }
}

/// Queue entry prepared for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntryView {
    pub id: PlayerId,
    pub name: String,
    pub rate: u32,
    pub tier_icon: String,
}

/// View model for an active recruiting queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueView {
    pub queue_id: QueueId,
    /// Entries in join order
    pub entries: Vec<QueueEntryView>,
}

impl QueueView {
    pub fn player_count(&self) -> usize {
        self.entries.len()
    }
}

/// View model for a started match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStartView {
    pub session_id: SessionId,
    pub team_a: Team,
    pub team_b: Team,
    pub sum_a: u32,
    pub sum_b: u32,
    pub average_a: f64,
    pub average_b: f64,
}

/// One row of the leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position by rate descending
    pub position: usize,
    pub id: PlayerId,
    pub name: String,
    pub rate: u32,
    pub tier_name: String,
    pub tier_icon: String,
}

/// View model for the leaderboard display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardView {
    pub entries: Vec<LeaderboardEntry>,
    /// Tier color of the current leader, used as the display accent
    pub accent_color: u32,
}

/// View model for a single player's profile display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: PlayerId,
    pub name: String,
    pub rate: u32,
    pub wins: u32,
    pub losses: u32,
    pub tier_name: String,
    pub tier_icon: String,
    pub tier_color: u32,
}
