//! Match session state machine
//!
//! A session is created with two fixed teams and stays `Pending` until
//! exactly one terminal transition: a winner is declared or the match is
//! cancelled. Terminal states are final; rejecting the second transition is
//! what prevents double-applied rating changes.

use crate::error::{MatchmakingError, Result};
use crate::types::{SessionId, Team, TeamSide};
use crate::utils::{current_timestamp, generate_session_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a match session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Teams fixed, awaiting a result
    Pending,
    /// Team A won (terminal)
    ResolvedA,
    /// Team B won (terminal)
    ResolvedB,
    /// Abandoned without a result; no rating changes (terminal)
    Cancelled,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionStatus::Pending)
    }

    /// Terminal status for a declared winner
    pub fn resolved(winner: TeamSide) -> Self {
        match winner {
            TeamSide::A => SessionStatus::ResolvedA,
            TeamSide::B => SessionStatus::ResolvedB,
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Pending => write!(f, "pending"),
            SessionStatus::ResolvedA => write!(f, "resolved_a"),
            SessionStatus::ResolvedB => write!(f, "resolved_b"),
            SessionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One started match: two fixed teams and a status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSession {
    id: SessionId,
    team_a: Team,
    team_b: Team,
    status: SessionStatus,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl MatchSession {
    /// Create a pending session with a fresh ID
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self::with_id(generate_session_id(), team_a, team_b)
    }

    /// Create a pending session with a specific ID
    pub fn with_id(id: SessionId, team_a: Team, team_b: Team) -> Self {
        Self {
            id,
            team_a,
            team_b,
            status: SessionStatus::Pending,
            created_at: current_timestamp(),
            resolved_at: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    pub fn team_a(&self) -> &Team {
        &self.team_a
    }

    pub fn team_b(&self) -> &Team {
        &self.team_b
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == SessionStatus::Pending
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    fn ensure_pending(&self) -> Result<()> {
        if !self.is_pending() {
            return Err(MatchmakingError::SessionNotPending {
                session_id: self.id.to_string(),
                status: self.status.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Claim the terminal status for a declared winner
    ///
    /// Only valid from `Pending`; callers apply rating updates after the
    /// claim so a rejected second call cannot reach the store.
    pub fn mark_resolved(&mut self, winner: TeamSide) -> Result<()> {
        self.ensure_pending()?;
        self.status = SessionStatus::resolved(winner);
        self.resolved_at = Some(current_timestamp());
        Ok(())
    }

    /// Abandon a pending session without rating changes
    pub fn mark_cancelled(&mut self) -> Result<()> {
        self.ensure_pending()?;
        self.status = SessionStatus::Cancelled;
        self.resolved_at = Some(current_timestamp());
        Ok(())
    }
}
