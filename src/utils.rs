//! Utility functions for the matchmaking service

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique queue ID
pub fn generate_queue_id() -> Uuid {
    Uuid::new_v4()
}

/// Generate a new unique session ID
pub fn generate_session_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Format a signed rating delta the way result displays expect ("+30", "-15")
pub fn format_delta(delta: i32) -> String {
    if delta >= 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_ids() {
        let id1 = generate_queue_id();
        let id2 = generate_queue_id();
        assert_ne!(id1, id2);

        let session_id1 = generate_session_id();
        let session_id2 = generate_session_id();
        assert_ne!(session_id1, session_id2);
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(30), "+30");
        assert_eq!(format_delta(0), "+0");
        assert_eq!(format_delta(-15), "-15");
    }
}
