//! Least-recently-used victim selection.
//!
//! Each set keeps a usage stack: a hit or a fill moves the way to the front
//! and the victim is whatever sits at the back.

use super::ReplacementPolicy;

/// LRU policy state.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// A usage stack per set. Index 0 is MRU, the last index is LRU.
    usage: Vec<Vec<usize>>,
}

impl LruPolicy {
    /// Creates the policy. Way `ways - 1` starts as the victim of every set.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: (0..sets).map(|_| (0..ways).collect()).collect(),
        }
    }

    fn promote(&mut self, set: usize, way: usize) {
        let Some(stack) = self.usage.get_mut(set) else {
            return;
        };
        if let Some(pos) = stack.iter().position(|&w| w == way) {
            let _ = stack.remove(pos);
        }
        stack.insert(0, way);
    }
}

impl ReplacementPolicy for LruPolicy {
    fn update(&mut self, set: usize, way: usize) {
        self.promote(set, way);
    }

    fn get_victim(&self, set: usize) -> usize {
        self.usage
            .get(set)
            .and_then(|stack| stack.last())
            .copied()
            .unwrap_or(0)
    }

    fn on_fill(&mut self, set: usize, way: usize) {
        self.promote(set, way);
    }
}
