//! Two-level cache hierarchy.
//!
//! This module implements split L1 instruction/data caches in front of a
//! unified write-back L2. It provides:
//! 1. **Storage:** Set-associative line arrays with pluggable replacement policies.
//! 2. **Miss Handling:** One MSHR per cache with hit-under-miss in the L1s.
//! 3. **Channels:** A read-only instruction port and a read/write data port
//!    through which the pipeline reaches memory.

/// Set-associative line storage.
pub mod array;

/// Instruction/data channels over the whole hierarchy.
pub mod hierarchy;

/// First-level cache.
pub mod l1;

/// Unified second-level cache.
pub mod l2;

/// Miss status handling register.
pub mod mshr;

/// Cache replacement policy implementations (round-robin, LRU).
pub mod policies;

pub use hierarchy::MemoryHierarchy;
pub use l1::L1Cache;
pub use l2::L2Cache;

use crate::common::MemRequest;

/// Why an access could not complete this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallCause {
    /// The access missed and has just started a fill.
    Miss,
    /// The access is waiting for the fill already in flight for its line.
    MissPending,
    /// A second miss while the MSHR holds a different line.
    MshrBusy,
    /// The L2 is busy with another L1's memory read.
    LowerLevelBusy,
}

/// Outcome of one cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access<T> {
    /// The access completed this cycle.
    Ready(T),
    /// The requester must retry next cycle.
    Stall(StallCause),
}

impl<T> Access<T> {
    /// True when the requester has to stall.
    pub const fn is_stall(&self) -> bool {
        matches!(self, Self::Stall(_))
    }
}

/// Read-only instruction-side channel used by Fetch.
pub trait InstructionPort {
    /// Fetches the instruction word at `addr` (4-byte aligned).
    fn fetch(&mut self, addr: u64) -> Access<u32>;

    /// True when `[addr, addr + len)` is backed by memory.
    fn is_mapped(&self, addr: u64, len: u64) -> bool;
}

/// Read/write data-side channel used by the Memory stage.
pub trait DataPort {
    /// Performs a load or store. Loads return the extended value, stores 0.
    fn access(&mut self, req: MemRequest) -> Access<u64>;

    /// True when `[addr, addr + len)` is backed by memory.
    fn is_mapped(&self, addr: u64, len: u64) -> bool;
}
