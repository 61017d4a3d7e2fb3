//! Main memory.
//!
//! This module implements the backing store below the L2 cache. It provides:
//! 1. **Buffer:** Bounds-checked byte storage for memory contents.
//! 2. **Line Transfers:** Whole-line reads for L2 fills and writes for dirty write-backs.
//! 3. **Timing:** A fixed, configurable read latency charged on every L2 miss.

/// Byte storage.
pub mod buffer;

use self::buffer::MemoryBuffer;
use crate::common::LoadError;
use crate::config::MemoryConfig;
use crate::core::pipeline::signals::MemWidth;

/// Main memory mapped at a physical base address.
#[derive(Clone, Debug)]
pub struct MainMemory {
    buffer: MemoryBuffer,
    base: u64,
    read_latency: u64,
}

impl MainMemory {
    /// Creates a zeroed memory from its configuration.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            buffer: MemoryBuffer::new(config.ram_size),
            base: config.ram_base,
            read_latency: config.read_latency,
        }
    }

    /// Physical base address.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// One past the last valid address.
    pub fn end(&self) -> u64 {
        self.base + self.buffer.len() as u64
    }

    /// Cycles needed to return a line.
    pub const fn read_latency(&self) -> u64 {
        self.read_latency
    }

    /// True when `[addr, addr + len)` lies inside memory.
    pub fn contains(&self, addr: u64, len: u64) -> bool {
        addr >= self.base && addr.checked_add(len).is_some_and(|end| end <= self.end())
    }

    fn offset(&self, addr: u64) -> usize {
        addr.wrapping_sub(self.base) as usize
    }

    /// Copies a line into `buf`; out-of-range bytes read as zero.
    ///
    /// # Arguments
    ///
    /// * `line_addr` - Line-aligned address.
    /// * `buf` - Destination, one line long.
    pub fn read_line(&self, line_addr: u64, buf: &mut [u8]) {
        match self.buffer.read_slice(self.offset(line_addr), buf.len()) {
            Some(src) if self.contains(line_addr, buf.len() as u64) => buf.copy_from_slice(src),
            _ => buf.fill(0),
        }
    }

    /// Writes a whole line back; out-of-range write-backs are dropped.
    pub fn write_line(&mut self, line_addr: u64, data: &[u8]) {
        if self.contains(line_addr, data.len() as u64) {
            let _ = self.buffer.write_slice(self.offset(line_addr), data);
        }
    }

    /// Reads `width` bytes little-endian, bypassing every cache.
    pub fn read(&self, addr: u64, width: MemWidth) -> Option<u64> {
        let len = width.bytes();
        if !self.contains(addr, len) {
            return None;
        }
        let bytes = self.buffer.read_slice(self.offset(addr), len as usize)?;
        Some(
            bytes
                .iter()
                .rev()
                .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)),
        )
    }

    /// Copies a program image into memory.
    ///
    /// # Arguments
    ///
    /// * `addr` - Physical load address.
    /// * `data` - Bytes to copy.
    ///
    /// # Returns
    ///
    /// `LoadError::OutOfRange` when the image does not fit.
    pub fn load(&mut self, addr: u64, data: &[u8]) -> Result<(), LoadError> {
        let end = addr.saturating_add(data.len() as u64);
        if !self.contains(addr, data.len() as u64)
            || !self.buffer.write_slice(self.offset(addr), data)
        {
            return Err(LoadError::OutOfRange { start: addr, end });
        }
        Ok(())
    }
}
