//! Round-robin victim selection.
//!
//! Each set owns a counter naming the next victim. The counter advances on
//! every fill and ignores hits, so lines are replaced in fill order. This is
//! the default policy for every cache.

use super::ReplacementPolicy;

/// Round-robin policy state.
#[derive(Debug, Clone)]
pub struct RoundRobinPolicy {
    /// Next way to be replaced, per set.
    next_way: Vec<usize>,
    /// Counter modulus.
    ways: usize,
}

impl RoundRobinPolicy {
    /// Creates the policy with every counter at way 0.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            next_way: vec![0; sets],
            ways: ways.max(1),
        }
    }
}

impl ReplacementPolicy for RoundRobinPolicy {
    fn update(&mut self, _set: usize, _way: usize) {}

    fn get_victim(&self, set: usize) -> usize {
        self.next_way.get(set).copied().unwrap_or(0)
    }

    fn on_fill(&mut self, set: usize, _way: usize) {
        if let Some(next) = self.next_way.get_mut(set) {
            *next = (*next + 1) % self.ways;
        }
    }
}
