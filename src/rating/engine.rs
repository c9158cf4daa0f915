//! Tiered rating adjustment engine
//!
//! Pure functions computing the rating movement for a match result. Band
//! selection always uses the rate *before* the match; the adjusted rate is
//! clamped at zero. Callers own exactly-once application per resolved match:
//! these functions have no state of their own, but writing the same outcome
//! against the same stored record twice double-applies it.

use crate::rating::tiers::rank_tier;
use crate::types::{MatchOutcome, PlayerRecord, PlayerUpdate, RatingAdjustment};

/// Signed rating change for a result at the given pre-match rate
pub fn rating_delta(rate: u32, outcome: MatchOutcome) -> i32 {
    let tier = rank_tier(rate);
    match outcome {
        MatchOutcome::Win => tier.win_delta,
        MatchOutcome::Loss => tier.loss_delta,
    }
}

/// Compute the adjustment for one participant without touching storage
pub fn preview_update(rate: u32, outcome: MatchOutcome) -> RatingAdjustment {
    let delta = rating_delta(rate, outcome);
    let new_rate = (i64::from(rate) + i64::from(delta)).max(0) as u32;
    RatingAdjustment {
        old_rate: rate,
        new_rate,
        delta,
    }
}

/// Full update for a record: the adjusted rate plus the win/loss increment,
/// expressed as a partial store write
pub fn build_update(
    record: &PlayerRecord,
    outcome: MatchOutcome,
) -> (RatingAdjustment, PlayerUpdate) {
    let adjustment = preview_update(record.rate, outcome);
    let update = PlayerUpdate {
        rate: Some(adjustment.new_rate),
        wins: Some(record.wins + u32::from(outcome.is_win())),
        losses: Some(record.losses + u32::from(!outcome.is_win())),
        name: None,
    };
    (adjustment, update)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_table_per_band() {
        let cases = [
            (0, 30, -15),
            (99, 30, -15),
            (100, 30, -24),
            (299, 30, -24),
            (300, 24, -24),
            (499, 24, -24),
            (500, 24, -30),
            (799, 24, -30),
            (800, 20, -30),
            (999, 20, -30),
            (1000, 15, -30),
            (2500, 15, -30),
        ];

        for (rate, win, loss) in cases {
            assert_eq!(rating_delta(rate, MatchOutcome::Win), win, "win at {rate}");
            assert_eq!(
                rating_delta(rate, MatchOutcome::Loss),
                loss,
                "loss at {rate}"
            );
        }
    }

    #[test]
    fn test_delta_is_deterministic() {
        for rate in [0, 90, 100, 550, 1000, 4000] {
            for outcome in [MatchOutcome::Win, MatchOutcome::Loss] {
                assert_eq!(rating_delta(rate, outcome), rating_delta(rate, outcome));
            }
        }
    }

    #[test]
    fn test_update_scenarios() {
        let win = preview_update(90, MatchOutcome::Win);
        assert_eq!(win.delta, 30);
        assert_eq!(win.new_rate, 120);

        let loss = preview_update(90, MatchOutcome::Loss);
        assert_eq!(loss.delta, -15);
        assert_eq!(loss.new_rate, 75);
    }

    #[test]
    fn test_update_clamps_at_zero() {
        let clamped = preview_update(5, MatchOutcome::Loss);
        assert_eq!(clamped.delta, -15);
        assert_eq!(clamped.new_rate, 0);

        // A loss never raises the rate, and new_rate is unsigned so it can
        // never be negative.
        for rate in 0..1100 {
            assert!(preview_update(rate, MatchOutcome::Loss).new_rate <= rate);
        }
    }

    #[test]
    fn test_build_update_increments_exactly_one_counter() {
        let record = PlayerRecord {
            id: "p1".to_string(),
            name: "Player One".to_string(),
            rate: 320,
            wins: 4,
            losses: 7,
        };

        let (adjustment, update) = build_update(&record, MatchOutcome::Win);
        assert_eq!(adjustment.old_rate, 320);
        assert_eq!(adjustment.new_rate, 344);
        assert_eq!(update.rate, Some(344));
        assert_eq!(update.wins, Some(5));
        assert_eq!(update.losses, Some(7));
        assert_eq!(update.name, None);

        let (adjustment, update) = build_update(&record, MatchOutcome::Loss);
        assert_eq!(adjustment.new_rate, 296);
        assert_eq!(update.wins, Some(4));
        assert_eq!(update.losses, Some(8));
    }
}
