//! First-level cache (instruction or data side).
//!
//! The L1 returns hits in the cycle they are requested and handles misses
//! through a single MSHR:
//! 1. **Hit-under-miss:** While the MSHR is busy, hits are served normally.
//! 2. **Read miss:** Allocates the MSHR and stalls the requester until the fill.
//! 3. **Write miss:** Allocates the MSHR, buffers the store and lets the
//!    pipeline continue; the store is merged into the line on fill.
//! 4. **Second miss:** Any miss while the MSHR is busy stalls the requester.
//!
//! The data-side L1 is write-through into the L2, so its lines are never
//! dirty and evictions need no write-back.

use tracing::debug;

use super::array::{CacheArray, write_le};
use super::l2::L2Cache;
use super::mshr::{Mshr, PendingWrite};
use super::{Access, StallCause};
use crate::config::CacheConfig;
use crate::core::pipeline::signals::MemWidth;
use crate::stats::CacheStats;

/// One first-level cache.
#[derive(Debug)]
pub struct L1Cache {
    name: &'static str,
    array: CacheArray,
    mshr: Mshr,
    /// Access counters.
    pub stats: CacheStats,
}

impl L1Cache {
    /// Creates an empty L1.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in trace output (`"L1I"` or `"L1D"`).
    /// * `config` - Validated geometry.
    pub fn new(name: &'static str, config: &CacheConfig) -> Self {
        Self {
            name,
            array: CacheArray::new(config),
            mshr: Mshr::default(),
            stats: CacheStats::default(),
        }
    }

    /// Line storage.
    pub const fn array(&self) -> &CacheArray {
        &self.array
    }

    /// The miss record.
    pub const fn mshr(&self) -> &Mshr {
        &self.mshr
    }

    /// Advances the outstanding miss and fills the line when it arrives.
    ///
    /// # Arguments
    ///
    /// * `l2` - Level supplying the line.
    pub fn tick(&mut self, l2: &mut L2Cache) {
        if !self.mshr.tick() {
            return;
        }
        let line = self.mshr.line_addr;
        let mut buf = vec![0; self.array.line_bytes()];
        l2.fetch_line(line, &mut buf);
        if let Some(PendingWrite { addr, width, data }) = self.mshr.retire() {
            write_le(&mut buf, (addr - line) as usize, width, data);
        }
        if self.array.fill(line, &buf).is_some() {
            self.stats.evictions += 1;
        }
        self.stats.fills += 1;
        debug!("{} fill line={line:#x}", self.name);
    }

    /// Services a read.
    ///
    /// # Arguments
    ///
    /// * `addr` - Naturally aligned byte address.
    /// * `width` - Transfer width.
    /// * `l2` - Level consulted on a miss.
    ///
    /// # Returns
    ///
    /// The raw little-endian value on a hit, otherwise the stall cause.
    pub fn read(&mut self, addr: u64, width: MemWidth, l2: &mut L2Cache) -> Access<u64> {
        if let Some(raw) = self.array.read(addr, width) {
            self.stats.hits += 1;
            return Access::Ready(raw);
        }
        match self.begin_miss(addr, None, l2) {
            Ok(()) => Access::Stall(StallCause::Miss),
            Err(cause) => Access::Stall(cause),
        }
    }

    /// Services a write.
    ///
    /// A hit updates the line in place; a miss buffers the store in the MSHR
    /// and completes immediately. Either way the store is forwarded to the L2.
    ///
    /// # Returns
    ///
    /// `Access::Ready(())` when the store has been accepted.
    pub fn write(&mut self, addr: u64, width: MemWidth, data: u64, l2: &mut L2Cache) -> Access<()> {
        if self.array.write(addr, width, data, false) {
            self.stats.hits += 1;
            l2.write(addr, width, data);
            return Access::Ready(());
        }
        let pending = PendingWrite { addr, width, data };
        match self.begin_miss(addr, Some(pending), l2) {
            Ok(()) => Access::Ready(()),
            Err(cause) => Access::Stall(cause),
        }
    }

    fn begin_miss(
        &mut self,
        addr: u64,
        pending: Option<PendingWrite>,
        l2: &mut L2Cache,
    ) -> Result<(), StallCause> {
        let line = self.array.line_addr(addr);
        if self.mshr.tracks(line) {
            return Err(StallCause::MissPending);
        }
        if self.mshr.is_busy() {
            self.stats.mshr_stalls += 1;
            return Err(StallCause::MshrBusy);
        }
        if let Some(w) = pending {
            l2.write(w.addr, w.width, w.data);
        }
        let latency = l2.request(line)?;
        self.mshr.allocate(line, latency, pending);
        self.stats.misses += 1;
        debug!(
            "{} miss addr={addr:#x} line={line:#x} latency={latency} write={}",
            self.name,
            pending.is_some()
        );
        Ok(())
    }
}
