//! Rank tier bands and their display attributes
//!
//! Six half-open bands partition the non-negative rate axis. Each band
//! carries the win/loss deltas applied to rates inside it, so the same
//! table drives both rank display and rating adjustment.

use serde::Serialize;

/// One rating band with its display attributes and adjustment deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankTier {
    pub name: &'static str,
    /// Lower bound of the band, inclusive; the band extends to the next
    /// tier's bound, exclusive
    pub min_rate: u32,
    pub color: u32,
    pub icon: &'static str,
    pub win_delta: i32,
    pub loss_delta: i32,
}

/// Tier table ordered by ascending lower bound
pub const TIERS: [RankTier; 6] = [
    RankTier {
        name: "Iron",
        min_rate: 0,
        color: 0x434343,
        icon: "⚫",
        win_delta: 30,
        loss_delta: -15,
    },
    RankTier {
        name: "Bronze",
        min_rate: 100,
        color: 0xcd7f32,
        icon: "🟤",
        win_delta: 30,
        loss_delta: -24,
    },
    RankTier {
        name: "Silver",
        min_rate: 300,
        color: 0xc0c0c0,
        icon: "⚪",
        win_delta: 24,
        loss_delta: -24,
    },
    RankTier {
        name: "Gold",
        min_rate: 500,
        color: 0xffd700,
        icon: "🟡",
        win_delta: 24,
        loss_delta: -30,
    },
    RankTier {
        name: "Diamond",
        min_rate: 800,
        color: 0x00bfff,
        icon: "💎",
        win_delta: 20,
        loss_delta: -30,
    },
    RankTier {
        name: "Master",
        min_rate: 1000,
        color: 0x800080,
        icon: "👑",
        win_delta: 15,
        loss_delta: -30,
    },
];

/// Look up the tier containing `rate`
///
/// Bands are inclusive below and exclusive above: a rate of exactly 100 is
/// Bronze, not Iron.
pub fn rank_tier(rate: u32) -> &'static RankTier {
    TIERS
        .iter()
        .rev()
        .find(|tier| rate >= tier.min_rate)
        .unwrap_or(&TIERS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_lookup_interior_values() {
        assert_eq!(rank_tier(0).name, "Iron");
        assert_eq!(rank_tier(50).name, "Iron");
        assert_eq!(rank_tier(250).name, "Bronze");
        assert_eq!(rank_tier(400).name, "Silver");
        assert_eq!(rank_tier(700).name, "Gold");
        assert_eq!(rank_tier(900).name, "Diamond");
        assert_eq!(rank_tier(5000).name, "Master");
    }

    #[test]
    fn test_tier_boundaries_map_to_upper_band() {
        assert_eq!(rank_tier(99).name, "Iron");
        assert_eq!(rank_tier(100).name, "Bronze");
        assert_eq!(rank_tier(299).name, "Bronze");
        assert_eq!(rank_tier(300).name, "Silver");
        assert_eq!(rank_tier(499).name, "Silver");
        assert_eq!(rank_tier(500).name, "Gold");
        assert_eq!(rank_tier(799).name, "Gold");
        assert_eq!(rank_tier(800).name, "Diamond");
        assert_eq!(rank_tier(999).name, "Diamond");
        assert_eq!(rank_tier(1000).name, "Master");
    }

    #[test]
    fn test_bands_partition_the_rate_axis() {
        // Every rate lands in exactly one band: the table is sorted and
        // starts at zero, so the reverse scan always finds a tier.
        let mut previous = 0;
        for (i, tier) in TIERS.iter().enumerate() {
            if i == 0 {
                assert_eq!(tier.min_rate, 0);
            } else {
                assert!(tier.min_rate > previous);
            }
            previous = tier.min_rate;
        }

        for rate in 0..1100 {
            let tier = rank_tier(rate);
            let matching = TIERS
                .iter()
                .enumerate()
                .filter(|(i, t)| {
                    let upper = TIERS.get(i + 1).map(|next| next.min_rate);
                    rate >= t.min_rate && upper.map_or(true, |u| rate < u)
                })
                .count();
            assert_eq!(matching, 1);
            assert!(rate >= tier.min_rate);
        }
    }

    #[test]
    fn test_tier_display_attributes() {
        assert_eq!(rank_tier(150).color, 0xcd7f32);
        assert_eq!(rank_tier(150).icon, "🟤");
        assert_eq!(rank_tier(1200).icon, "👑");
    }
}
