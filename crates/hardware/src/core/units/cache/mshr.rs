//! Miss Status Handling Register.
//!
//! Each cache owns exactly one MSHR, so at most one miss is outstanding per
//! cache. While it is busy, hits are still served; any further miss must
//! wait for it to retire.

use crate::core::pipeline::signals::MemWidth;

/// A store that missed and is waiting for its line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingWrite {
    /// Byte address of the store.
    pub addr: u64,
    /// Store width.
    pub width: MemWidth,
    /// Store payload.
    pub data: u64,
}

/// The single outstanding-miss record of a cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mshr {
    /// Line-aligned address being fetched.
    pub line_addr: u64,
    /// A miss is outstanding.
    pub in_flight: bool,
    /// Cycles until the line arrives.
    pub cycles_left: u64,
    /// Store buffered by a write miss, applied when the line is filled.
    pub pending_write: Option<PendingWrite>,
}

impl Mshr {
    /// True while a miss is outstanding.
    pub const fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// True when the outstanding miss is for `line_addr`.
    pub const fn tracks(&self, line_addr: u64) -> bool {
        self.in_flight && self.line_addr == line_addr
    }

    /// Records a new miss.
    ///
    /// # Arguments
    ///
    /// * `line_addr` - Line being fetched.
    /// * `latency` - Cycles until the line arrives (at least one).
    /// * `pending_write` - Store to merge into the line on fill.
    pub fn allocate(&mut self, line_addr: u64, latency: u64, pending_write: Option<PendingWrite>) {
        *self = Self {
            line_addr,
            in_flight: true,
            cycles_left: latency.max(1),
            pending_write,
        };
    }

    /// Advances one cycle.
    ///
    /// # Returns
    ///
    /// `true` exactly once, on the cycle the line arrives.
    pub fn tick(&mut self) -> bool {
        if !self.in_flight {
            return false;
        }
        self.cycles_left = self.cycles_left.saturating_sub(1);
        self.cycles_left == 0
    }

    /// Clears the record after the fill and hands back any buffered store.
    pub fn retire(&mut self) -> Option<PendingWrite> {
        let pending = self.pending_write.take();
        *self = Self::default();
        pending
    }
}
