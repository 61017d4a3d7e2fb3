//! The complete memory system seen by the pipeline.
//!
//! `MemoryHierarchy` owns both L1 caches, the L2 and main memory. Fetch sees
//! it through `InstructionPort`, the Memory stage through `DataPort`; the
//! controller advances outstanding misses once per cycle with `tick`.

use super::{Access, DataPort, InstructionPort, L1Cache, L2Cache};
use crate::common::data::extend;
use crate::common::{AccessType, LoadError, MemRequest};
use crate::config::Config;
use crate::core::pipeline::signals::MemWidth;
use crate::soc::MainMemory;

/// L1-I, L1-D, L2 and main memory.
#[derive(Debug)]
pub struct MemoryHierarchy {
    /// L1 instruction cache.
    pub l1_i: L1Cache,
    /// L1 data cache.
    pub l1_d: L1Cache,
    /// Unified L2 cache (owns main memory).
    pub l2: L2Cache,
}

impl MemoryHierarchy {
    /// Builds an empty hierarchy over zeroed memory.
    pub fn new(config: &Config) -> Self {
        let memory = MainMemory::new(&config.memory);
        Self {
            l1_i: L1Cache::new("L1I", &config.cache.l1_i),
            l1_d: L1Cache::new("L1D", &config.cache.l1_d),
            l2: L2Cache::new(&config.cache.l2, config.cache.l2_latency, memory),
        }
    }

    /// Advances outstanding misses by one cycle. The L2 goes first so a line
    /// it receives this cycle can be forwarded to an L1 in the same cycle.
    pub fn tick(&mut self) {
        self.l2.tick();
        self.l1_i.tick(&mut self.l2);
        self.l1_d.tick(&mut self.l2);
    }

    /// Main memory.
    pub const fn memory(&self) -> &MainMemory {
        self.l2.memory()
    }

    /// True when `[addr, addr + len)` is backed by memory.
    pub fn in_range(&self, addr: u64, len: u64) -> bool {
        self.memory().contains(addr, len)
    }

    /// Places a program image directly in main memory (caches are bypassed,
    /// so this must happen before the first access).
    pub fn load_image(&mut self, addr: u64, data: &[u8]) -> Result<(), LoadError> {
        self.l2.memory_mut().load(addr, data)
    }

    /// Architectural value of `width` bytes at `addr`, without timing or
    /// replacement side effects.
    pub fn peek(&self, addr: u64, width: MemWidth) -> Option<u64> {
        self.l2.peek(addr, width)
    }
}

impl InstructionPort for MemoryHierarchy {
    fn fetch(&mut self, addr: u64) -> Access<u32> {
        match self.l1_i.read(addr, MemWidth::Word, &mut self.l2) {
            Access::Ready(raw) => Access::Ready(raw as u32),
            Access::Stall(cause) => Access::Stall(cause),
        }
    }

    fn is_mapped(&self, addr: u64, len: u64) -> bool {
        self.in_range(addr, len)
    }
}

impl DataPort for MemoryHierarchy {
    fn access(&mut self, req: MemRequest) -> Access<u64> {
        match req.kind {
            AccessType::Write => match self.l1_d.write(req.addr, req.width, req.data, &mut self.l2)
            {
                Access::Ready(()) => Access::Ready(0),
                Access::Stall(cause) => Access::Stall(cause),
            },
            AccessType::Read => {
                match self.l1_d.read(req.addr, req.width, &mut self.l2) {
                    Access::Ready(raw) => Access::Ready(extend(raw, req.width, req.signed)),
                    Access::Stall(cause) => Access::Stall(cause),
                }
            }
        }
    }

    fn is_mapped(&self, addr: u64, len: u64) -> bool {
        self.in_range(addr, len)
    }
}
