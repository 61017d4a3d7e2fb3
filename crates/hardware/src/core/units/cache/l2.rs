//! Unified L2 cache.
//!
//! The L2 backs both L1 caches. It is write-back with a dirty bit per line:
//! writes from the L1 data cache mark the line dirty and a dirty victim is
//! written to main memory when it is evicted. A single MSHR limits it to one
//! outstanding memory read; an L1 that misses while it is busy must wait.

use tracing::debug;

use super::StallCause;
use super::array::CacheArray;
use super::mshr::Mshr;
use crate::config::CacheConfig;
use crate::core::pipeline::signals::MemWidth;
use crate::soc::MainMemory;
use crate::stats::CacheStats;

/// Unified second-level cache together with the memory below it.
#[derive(Debug)]
pub struct L2Cache {
    array: CacheArray,
    mshr: Mshr,
    hit_latency: u64,
    memory: MainMemory,
    /// Access counters.
    pub stats: CacheStats,
}

impl L2Cache {
    /// Creates an empty L2 in front of `memory`.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated geometry.
    /// * `hit_latency` - Cycles to return a line already present.
    /// * `memory` - Backing main memory.
    pub fn new(config: &CacheConfig, hit_latency: u64, memory: MainMemory) -> Self {
        Self {
            array: CacheArray::new(config),
            mshr: Mshr::default(),
            hit_latency,
            memory,
            stats: CacheStats::default(),
        }
    }

    /// Backing main memory.
    pub const fn memory(&self) -> &MainMemory {
        &self.memory
    }

    /// Mutable access to main memory, used to place program images.
    pub const fn memory_mut(&mut self) -> &mut MainMemory {
        &mut self.memory
    }

    /// Line storage.
    pub const fn array(&self) -> &CacheArray {
        &self.array
    }

    /// The miss record.
    pub const fn mshr(&self) -> &Mshr {
        &self.mshr
    }

    /// Asks for the line at `addr` on behalf of an L1 miss.
    ///
    /// # Returns
    ///
    /// The number of cycles until the line can be handed to the L1, or
    /// `StallCause::LowerLevelBusy` when a different miss already occupies
    /// the MSHR.
    pub fn request(&mut self, addr: u64) -> Result<u64, StallCause> {
        let line = self.array.line_addr(addr);
        if self.array.touch(line) {
            self.stats.hits += 1;
            return Ok(self.hit_latency);
        }
        if self.mshr.is_busy() {
            self.stats.mshr_stalls += 1;
            return Err(StallCause::LowerLevelBusy);
        }
        let latency = self.hit_latency + self.memory.read_latency();
        self.mshr.allocate(line, latency, None);
        self.stats.misses += 1;
        debug!("L2  miss line={line:#x} latency={latency}");
        Ok(latency)
    }

    /// Advances the outstanding memory read, installing the line when it arrives.
    pub fn tick(&mut self) {
        if self.mshr.tick() {
            let line = self.mshr.line_addr;
            let _ = self.mshr.retire();
            if !self.array.contains(line) {
                self.install(line);
            }
        }
    }

    /// Copies the bytes of `addr`'s region into `buf` for an L1 fill.
    ///
    /// A line evicted between the request and the fill is re-read from memory
    /// so the L1 always receives current data.
    pub fn fetch_line(&mut self, addr: u64, buf: &mut [u8]) {
        if !self.array.contains(addr) {
            self.install(self.array.line_addr(addr));
        }
        let offset = (addr - self.array.line_addr(addr)) as usize;
        if let Some(src) = self
            .array
            .line(addr)
            .and_then(|l| l.data.get(offset..offset + buf.len()))
        {
            buf.copy_from_slice(src);
        }
    }

    /// Posted write from the L1 data cache (write-allocate, marks the line dirty).
    pub fn write(&mut self, addr: u64, width: MemWidth, data: u64) {
        if self.array.write(addr, width, data, true) {
            self.stats.hits += 1;
            return;
        }
        self.stats.misses += 1;
        self.install(self.array.line_addr(addr));
        let _ = self.array.write(addr, width, data, true);
    }

    /// Coherent read of `width` bytes: the L2 copy when present, memory otherwise.
    pub fn peek(&self, addr: u64, width: MemWidth) -> Option<u64> {
        self.array
            .peek(addr, width)
            .or_else(|| self.memory.read(addr, width))
    }

    fn install(&mut self, line: u64) {
        let mut buf = vec![0; self.array.line_bytes()];
        self.memory.read_line(line, &mut buf);
        if let Some(victim) = self.array.fill(line, &buf) {
            self.stats.evictions += 1;
            if victim.dirty {
                self.memory.write_line(victim.line_addr, &victim.data);
                self.stats.writebacks += 1;
                debug!("L2  writeback line={:#x}", victim.line_addr);
            }
        }
        self.stats.fills += 1;
    }
}

