//! Cache Replacement Policies.
//!
//! Implements the algorithms that pick a victim way when a fill lands in a
//! full set.
//!
//! # Policies
//!
//! - `RoundRobin`: a per-set counter advanced on every fill.
//! - `Lru`: Least Recently Used.

/// Least Recently Used replacement policy.
pub mod lru;

/// Round-robin replacement policy.
pub mod round_robin;

pub use lru::LruPolicy;
pub use round_robin::RoundRobinPolicy;

use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
pub trait ReplacementPolicy: std::fmt::Debug + Send + Sync {
    /// Records a hit on `way` of `set`.
    fn update(&mut self, set: usize, way: usize);

    /// Selects the way the next fill of `set` will replace.
    fn get_victim(&self, set: usize) -> usize;

    /// Records that `way` of `set` has just been filled.
    fn on_fill(&mut self, set: usize, way: usize);
}

/// Builds the policy selected in the configuration.
///
/// # Arguments
///
/// * `kind` - Configured policy.
/// * `sets` - Number of sets.
/// * `ways` - Associativity.
pub fn build(kind: PolicyType, sets: usize, ways: usize) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::RoundRobin => Box::new(RoundRobinPolicy::new(sets, ways)),
        PolicyType::Lru => Box::new(LruPolicy::new(sets, ways)),
    }
}
