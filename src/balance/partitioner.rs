//! Roster partitioning into two balanced teams
//!
//! Both partitioners honor the same size constraint: equal team sizes for an
//! even roster, a difference of exactly one for an odd roster. Both are
//! deterministic for identical input, including tie handling.

use crate::error::{MatchmakingError, Result};
use crate::types::{Team, TeamMember};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Outcome of a partition: the two teams and their rating sums
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionResult {
    pub team_a: Team,
    pub team_b: Team,
}

impl PartitionResult {
    pub fn sum_a(&self) -> u32 {
        self.team_a.total_rate()
    }

    pub fn sum_b(&self) -> u32 {
        self.team_b.total_rate()
    }

    /// Absolute rating-sum difference between the teams
    pub fn imbalance(&self) -> u32 {
        self.sum_a().abs_diff(self.sum_b())
    }
}

/// Partitioning strategy selector, configurable per service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionStrategy {
    Greedy,
    Exact,
}

impl std::fmt::Display for PartitionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartitionStrategy::Greedy => write!(f, "greedy"),
            PartitionStrategy::Exact => write!(f, "exact"),
        }
    }
}

/// Trait for roster-splitting algorithms
pub trait TeamPartitioner: Send + Sync {
    /// Split the roster into two teams. Requires at least two members;
    /// fewer is a caller contract breach.
    fn partition(&self, roster: &[TeamMember]) -> Result<PartitionResult>;

    /// Strategy implemented, for logging and diagnostics
    fn strategy(&self) -> PartitionStrategy;
}

fn validate_roster(roster: &[TeamMember]) -> Result<()> {
    if roster.len() < 2 {
        return Err(MatchmakingError::InvalidRoster {
            reason: format!("need at least 2 members, got {}", roster.len()),
        }
        .into());
    }
    Ok(())
}

/// Greedy heuristic partitioner
///
/// Sorts by rate descending and assigns each member to the side with the
/// smaller running sum; ties go to the side with fewer members, then to
/// team A. A side that reaches ceil(N/2) members stops receiving, which
/// keeps the size constraint hard. O(N log N), not guaranteed minimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPartitioner;

impl GreedyPartitioner {
    pub fn new() -> Self {
        Self
    }
}

impl TeamPartitioner for GreedyPartitioner {
    fn partition(&self, roster: &[TeamMember]) -> Result<PartitionResult> {
        validate_roster(roster)?;

        let mut sorted = roster.to_vec();
        sorted.sort_by(|a, b| b.rate.cmp(&a.rate));

        let side_cap = roster.len().div_ceil(2);
        let mut team_a: Vec<TeamMember> = Vec::new();
        let mut team_b: Vec<TeamMember> = Vec::new();
        let mut sum_a: u64 = 0;
        let mut sum_b: u64 = 0;

        for member in sorted {
            let assign_to_a = if team_a.len() >= side_cap {
                false
            } else if team_b.len() >= side_cap {
                true
            } else if sum_a != sum_b {
                sum_a < sum_b
            } else {
                team_a.len() <= team_b.len()
            };

            if assign_to_a {
                sum_a += u64::from(member.rate);
                team_a.push(member);
            } else {
                sum_b += u64::from(member.rate);
                team_b.push(member);
            }
        }

        Ok(PartitionResult {
            team_a: Team::new(team_a),
            team_b: Team::new(team_b),
        })
    }

    fn strategy(&self) -> PartitionStrategy {
        PartitionStrategy::Greedy
    }
}

/// Exhaustive partitioner
///
/// Fixes |team A| = floor(N/2), enumerates every combination of that size
/// in lexicographic index order, and keeps the first split with the
/// smallest absolute rating difference. Exact but O(C(N, N/2)); rosters
/// beyond `fallback_limit` are delegated to the greedy heuristic.
#[derive(Debug, Clone, Copy)]
pub struct ExactPartitioner {
    fallback_limit: Option<usize>,
}

impl ExactPartitioner {
    /// Exhaustive search for any roster size
    pub fn new() -> Self {
        Self {
            fallback_limit: None,
        }
    }

    /// Fall back to the greedy heuristic for rosters larger than `limit`
    pub fn with_fallback_limit(limit: usize) -> Self {
        Self {
            fallback_limit: Some(limit),
        }
    }

    fn search(&self, roster: &[TeamMember]) -> PartitionResult {
        let n = roster.len();
        let k = n / 2;
        let total: u64 = roster.iter().map(|m| u64::from(m.rate)).sum();

        let mut indices: Vec<usize> = (0..k).collect();
        let mut best_diff = u64::MAX;
        let mut best_indices = indices.clone();

        loop {
            let sum_a: u64 = indices.iter().map(|&i| u64::from(roster[i].rate)).sum();
            // |sum_a - sum_b| without signed arithmetic: sum_b = total - sum_a
            let diff = (2 * sum_a).abs_diff(total);

            // Strict comparison keeps the first enumerated minimum on ties
            if diff < best_diff {
                best_diff = diff;
                best_indices.copy_from_slice(&indices);
                if diff == 0 {
                    break;
                }
            }

            if !next_combination(&mut indices, n) {
                break;
            }
        }

        let in_a = |i: usize| best_indices.contains(&i);
        let team_a: Vec<TeamMember> = (0..n).filter(|&i| in_a(i)).map(|i| roster[i].clone()).collect();
        let team_b: Vec<TeamMember> = (0..n).filter(|&i| !in_a(i)).map(|i| roster[i].clone()).collect();

        PartitionResult {
            team_a: Team::new(team_a),
            team_b: Team::new(team_b),
        }
    }
}

impl Default for ExactPartitioner {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamPartitioner for ExactPartitioner {
    fn partition(&self, roster: &[TeamMember]) -> Result<PartitionResult> {
        validate_roster(roster)?;

        if let Some(limit) = self.fallback_limit {
            if roster.len() > limit {
                warn!(
                    "Roster size {} exceeds exact-search limit {}, using greedy heuristic",
                    roster.len(),
                    limit
                );
                return GreedyPartitioner::new().partition(roster);
            }
        }

        Ok(self.search(roster))
    }

    fn strategy(&self) -> PartitionStrategy {
        PartitionStrategy::Exact
    }
}

/// Advance `indices` to the next k-combination of 0..n in lexicographic
/// order. Returns false when exhausted.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if indices[i] != i + n - k {
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roster(rates: &[u32]) -> Vec<TeamMember> {
        rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| TeamMember {
                id: format!("p{}", i + 1),
                name: format!("Player {}", i + 1),
                rate,
            })
            .collect()
    }

    fn assert_valid_partition(input: &[TeamMember], result: &PartitionResult) {
        let n = input.len();
        let size_a = result.team_a.len();
        let size_b = result.team_b.len();

        assert_eq!(size_a + size_b, n);
        assert!(size_a.abs_diff(size_b) <= 1);
        if n % 2 == 0 {
            assert_eq!(size_a, size_b);
        }

        // Union of the two sides equals the input as a multiset of ids
        let mut combined: Vec<&str> = result
            .team_a
            .members()
            .iter()
            .chain(result.team_b.members())
            .map(|m| m.id.as_str())
            .collect();
        combined.sort_unstable();
        let mut expected: Vec<&str> = input.iter().map(|m| m.id.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(combined, expected);

        // Disjoint sides
        for member in result.team_a.members() {
            assert!(!result.team_b.contains(&member.id));
        }
    }

    #[test]
    fn test_partitioners_reject_small_rosters() {
        for partitioner in [
            Box::new(GreedyPartitioner::new()) as Box<dyn TeamPartitioner>,
            Box::new(ExactPartitioner::new()),
        ] {
            assert!(partitioner.partition(&[]).is_err());
            assert!(partitioner.partition(&roster(&[100])).is_err());
        }
    }

    #[test]
    fn test_exact_two_players() {
        let input = roster(&[1000, 10]);
        let result = ExactPartitioner::new().partition(&input).unwrap();

        assert_valid_partition(&input, &result);
        assert_eq!(result.sum_a(), 1000);
        assert_eq!(result.sum_b(), 10);
        assert_eq!(result.imbalance(), 990);
    }

    #[test]
    fn test_exact_finds_zero_difference_split() {
        let input = roster(&[200, 100, 100, 0]);
        let result = ExactPartitioner::new().partition(&input).unwrap();

        assert_valid_partition(&input, &result);
        assert_eq!(result.imbalance(), 0);
        assert_eq!(result.sum_a(), 200);
        assert_eq!(result.sum_b(), 200);
    }

    #[test]
    fn test_exact_reaches_true_minimum() {
        // Every 2-2 split of this roster has difference 100; the naive
        // {100,100} vs {100,0} pairing is already minimal.
        let input = roster(&[100, 100, 100, 0]);
        let result = ExactPartitioner::new().partition(&input).unwrap();

        assert_valid_partition(&input, &result);
        assert_eq!(result.imbalance(), 100);
    }

    #[test]
    fn test_exact_fixes_team_a_to_floor_half() {
        let input = roster(&[500, 400, 300, 200, 100]);
        let result = ExactPartitioner::new().partition(&input).unwrap();

        assert_valid_partition(&input, &result);
        assert_eq!(result.team_a.len(), 2);
        assert_eq!(result.team_b.len(), 3);
    }

    #[test]
    fn test_exact_is_deterministic_on_ties() {
        // All members equal: every split ties at zero difference, so the
        // first enumerated combination (the roster prefix) must win.
        let input = roster(&[100, 100, 100, 100]);
        let first = ExactPartitioner::new().partition(&input).unwrap();
        let second = ExactPartitioner::new().partition(&input).unwrap();

        assert_eq!(first.team_a, second.team_a);
        assert_eq!(first.team_a.members()[0].id, "p1");
        assert_eq!(first.team_a.members()[1].id, "p2");
    }

    #[test]
    fn test_greedy_balances_simple_roster() {
        let input = roster(&[200, 100, 100, 0]);
        let result = GreedyPartitioner::new().partition(&input).unwrap();

        assert_valid_partition(&input, &result);
        assert_eq!(result.imbalance(), 0);
    }

    #[test]
    fn test_greedy_enforces_size_cap() {
        // Pure sum-chasing would pile three members onto the zero side
        let input = roster(&[100, 0, 0, 0]);
        let result = GreedyPartitioner::new().partition(&input).unwrap();

        assert_valid_partition(&input, &result);
        assert_eq!(result.team_a.len(), 2);
        assert_eq!(result.team_b.len(), 2);
    }

    #[test]
    fn test_greedy_odd_roster() {
        let input = roster(&[300, 200, 100]);
        let result = GreedyPartitioner::new().partition(&input).unwrap();

        assert_valid_partition(&input, &result);
    }

    #[test]
    fn test_exact_never_worse_than_greedy() {
        let rosters: &[&[u32]] = &[
            &[500, 300, 200, 100],
            &[900, 800, 100, 50, 20, 10],
            &[1000, 0, 0, 0],
            &[123, 456, 789, 12, 345, 678],
        ];

        for rates in rosters {
            let input = roster(rates);
            let exact = ExactPartitioner::new().partition(&input).unwrap();
            let greedy = GreedyPartitioner::new().partition(&input).unwrap();
            assert!(exact.imbalance() <= greedy.imbalance(), "rates {rates:?}");
        }
    }

    #[test]
    fn test_fallback_limit_delegates_to_greedy() {
        let rates: Vec<u32> = (0..20).map(|i| i * 37).collect();
        let input = roster(&rates);

        let bounded = ExactPartitioner::with_fallback_limit(16);
        let result = bounded.partition(&input).unwrap();
        let greedy = GreedyPartitioner::new().partition(&input).unwrap();

        assert_valid_partition(&input, &result);
        assert_eq!(result.imbalance(), greedy.imbalance());

        // Under the limit the search still runs exhaustively
        let small = roster(&[200, 100, 100, 0]);
        assert_eq!(bounded.partition(&small).unwrap().imbalance(), 0);
    }

    proptest! {
        #[test]
        fn prop_greedy_partition_invariants(rates in prop::collection::vec(0u32..2000, 2..14)) {
            let input = roster(&rates);
            let result = GreedyPartitioner::new().partition(&input).unwrap();
            assert_valid_partition(&input, &result);
        }

        #[test]
        fn prop_exact_partition_invariants(rates in prop::collection::vec(0u32..2000, 2..11)) {
            let input = roster(&rates);
            let result = ExactPartitioner::new().partition(&input).unwrap();
            assert_valid_partition(&input, &result);

            let greedy = GreedyPartitioner::new().partition(&input).unwrap();
            prop_assert!(result.imbalance() <= greedy.imbalance());
        }
    }
}
