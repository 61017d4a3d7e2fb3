//! Bimodal branch predictor with branch-target cache.
//!
//! Each entry pairs a 2-bit saturating counter with a cached target:
//!
//! | counter | state              | predicts   |
//! |---------|--------------------|------------|
//! | 0       | strongly not-taken | not taken  |
//! | 1       | weakly not-taken   | not taken  |
//! | 2       | weakly taken       | taken      |
//! | 3       | strongly taken     | taken      |
//!
//! The table is untagged: branches whose addresses share the low index bits
//! alias onto the same entry.

use tracing::trace;

use super::{BranchPredictor, Prediction};
use crate::common::ConfigError;

/// Counter value after reset (weakly not-taken).
const COUNTER_RESET: u8 = 1;

/// Largest counter value (strongly taken).
const COUNTER_MAX: u8 = 3;

/// One predictor table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PredictorEntry {
    /// 2-bit saturating counter.
    pub counter: u8,
    /// Last taken target seen at this index.
    pub target: u64,
    /// `target` has been written at least once.
    pub target_valid: bool,
}

impl Default for PredictorEntry {
    fn default() -> Self {
        Self {
            counter: COUNTER_RESET,
            target: 0,
            target_valid: false,
        }
    }
}

impl PredictorEntry {
    /// Applies the saturating transition for one outcome.
    fn train(&mut self, taken: bool) {
        if taken {
            if self.counter < COUNTER_MAX {
                self.counter += 1;
            }
        } else if self.counter > 0 {
            self.counter -= 1;
        }
    }
}

/// Table of 2-bit counters plus target cache.
#[derive(Clone, Debug)]
pub struct BimodalPredictor {
    table: Vec<PredictorEntry>,
    mask: usize,
}

impl BimodalPredictor {
    /// Creates a predictor with `entries` entries in the reset state.
    ///
    /// # Arguments
    ///
    /// * `entries` - Table size; must be a non-zero power of two.
    pub fn new(entries: usize) -> Result<Self, ConfigError> {
        if entries == 0 || !entries.is_power_of_two() {
            return Err(ConfigError::PredictorEntries(entries));
        }
        Ok(Self {
            table: vec![PredictorEntry::default(); entries],
            mask: entries - 1,
        })
    }

    /// Table index for a fetch address.
    #[inline]
    pub const fn index(&self, pc: u64) -> usize {
        ((pc >> 2) as usize) & self.mask
    }

    /// Read-only view of the entry used for `pc`.
    pub fn entry(&self, pc: u64) -> &PredictorEntry {
        &self.table[self.index(pc)]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false; a predictor has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl BranchPredictor for BimodalPredictor {
    fn predict(&self, pc: u64) -> Prediction {
        let e = self.entry(pc);
        Prediction {
            taken: e.counter >> 1 == 1,
            target: if e.target_valid {
                e.target
            } else {
                pc.wrapping_add(4)
            },
        }
    }

    fn update(&mut self, pc: u64, taken: bool, target: u64) {
        let idx = self.index(pc);
        let e = &mut self.table[idx];
        e.train(taken);
        if taken {
            e.target = target;
            e.target_valid = true;
        }
        trace!("BP  pc={pc:#x} idx={idx} counter={} taken={taken}", e.counter);
    }
}
