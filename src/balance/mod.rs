//! Team balancing algorithms
//!
//! Splits a roster into two teams minimizing the rating-sum imbalance
//! under a hard size constraint.

pub mod partitioner;

// Re-export commonly used types
pub use partitioner::{
    ExactPartitioner, GreedyPartitioner, PartitionResult, PartitionStrategy, TeamPartitioner,
};
