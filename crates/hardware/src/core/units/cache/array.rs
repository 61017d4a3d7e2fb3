//! Set-associative line storage.
//!
//! `CacheArray` owns the tag, state and data of every line in one cache and
//! the replacement policy choosing its victims. Both cache levels are built on
//! it; timing and miss handling live in the level-specific wrappers.
//!
//! Addressing: `set = (addr / line) % sets`, `tag = addr / (line * sets)`.

use super::policies::{self, ReplacementPolicy};
use crate::config::CacheConfig;
use crate::core::pipeline::signals::MemWidth;

/// One cache line.
#[derive(Clone, Debug, Default)]
pub struct CacheLine {
    /// Address tag.
    pub tag: u64,
    /// Line holds valid data.
    pub valid: bool,
    /// Line differs from the level below (write-back caches only).
    pub dirty: bool,
    /// Line contents.
    pub data: Vec<u8>,
}

/// A line pushed out of the array by a fill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evicted {
    /// Line-aligned address of the victim.
    pub line_addr: u64,
    /// Victim was dirty.
    pub dirty: bool,
    /// Victim contents.
    pub data: Vec<u8>,
}

/// Storage and replacement state of one set-associative cache.
#[derive(Debug)]
pub struct CacheArray {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    line_bytes: usize,
    policy: Box<dyn ReplacementPolicy>,
}

impl CacheArray {
    /// Builds an empty array from a validated configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let ways = config.ways.max(1);
        let line_bytes = config.line_bytes.max(8);
        let num_sets = (config.size_bytes / (line_bytes * ways)).max(1);
        let blank = CacheLine {
            data: vec![0; line_bytes],
            ..CacheLine::default()
        };
        Self {
            lines: vec![blank; num_sets * ways],
            num_sets,
            ways,
            line_bytes,
            policy: policies::build(config.policy, num_sets, ways),
        }
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> usize {
        self.line_bytes
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Address of the line containing `addr`.
    pub const fn line_addr(&self, addr: u64) -> u64 {
        addr & !(self.line_bytes as u64 - 1)
    }

    /// Set index of `addr`.
    pub const fn set_index(&self, addr: u64) -> usize {
        ((addr / self.line_bytes as u64) % self.num_sets as u64) as usize
    }

    /// Tag of `addr`.
    pub const fn tag(&self, addr: u64) -> u64 {
        addr / (self.line_bytes * self.num_sets) as u64
    }

    const fn slot(&self, set: usize, way: usize) -> usize {
        set * self.ways + way
    }

    /// Finds the way holding `addr`. At most one way can match.
    pub fn lookup(&self, addr: u64) -> Option<usize> {
        let set = self.set_index(addr);
        let tag = self.tag(addr);
        (0..self.ways).find(|&way| {
            let line = &self.lines[self.slot(set, way)];
            line.valid && line.tag == tag
        })
    }

    /// True when `addr` is present.
    pub fn contains(&self, addr: u64) -> bool {
        self.lookup(addr).is_some()
    }

    /// Borrows the line holding `addr`.
    pub fn line(&self, addr: u64) -> Option<&CacheLine> {
        self.lookup(addr)
            .map(|way| &self.lines[self.slot(self.set_index(addr), way)])
    }

    /// Records a use of the line holding `addr` with the replacement policy.
    ///
    /// # Returns
    ///
    /// `false` on a miss, in which case nothing changes.
    pub fn touch(&mut self, addr: u64) -> bool {
        let set = self.set_index(addr);
        let Some(way) = self.lookup(addr) else {
            return false;
        };
        self.policy.update(set, way);
        true
    }

    /// Reads `width` bytes at `addr` on a hit and records the use.
    ///
    /// # Returns
    ///
    /// The little-endian raw value, or `None` on a miss.
    pub fn read(&mut self, addr: u64, width: MemWidth) -> Option<u64> {
        let set = self.set_index(addr);
        let way = self.lookup(addr)?;
        self.policy.update(set, way);
        let offset = (addr - self.line_addr(addr)) as usize;
        Some(read_le(&self.lines[self.slot(set, way)].data, offset, width))
    }

    /// Reads without updating replacement state.
    pub fn peek(&self, addr: u64, width: MemWidth) -> Option<u64> {
        let offset = (addr - self.line_addr(addr)) as usize;
        self.line(addr).map(|l| read_le(&l.data, offset, width))
    }

    /// Writes `width` bytes at `addr` on a hit and records the use.
    ///
    /// # Arguments
    ///
    /// * `mark_dirty` - Set the dirty bit (write-back caches).
    ///
    /// # Returns
    ///
    /// `true` on a hit; a miss writes nothing.
    pub fn write(&mut self, addr: u64, width: MemWidth, data: u64, mark_dirty: bool) -> bool {
        let set = self.set_index(addr);
        let Some(way) = self.lookup(addr) else {
            return false;
        };
        self.policy.update(set, way);
        let offset = (addr - self.line_addr(addr)) as usize;
        let idx = self.slot(set, way);
        let line = &mut self.lines[idx];
        write_le(&mut line.data, offset, width, data);
        line.dirty |= mark_dirty;
        true
    }

    /// Installs a line, replacing the victim chosen by the policy.
    ///
    /// # Arguments
    ///
    /// * `line_addr` - Line-aligned address being filled.
    /// * `data` - New contents, one line long.
    ///
    /// # Returns
    ///
    /// The previous occupant when it was valid.
    pub fn fill(&mut self, line_addr: u64, data: &[u8]) -> Option<Evicted> {
        let set = self.set_index(line_addr);
        let way = self.policy.get_victim(set) % self.ways;
        let tag = self.tag(line_addr);
        let sets = self.num_sets as u64;
        let line_bytes = self.line_bytes as u64;
        let idx = self.slot(set, way);

        let old = &mut self.lines[idx];
        let evicted = old.valid.then(|| Evicted {
            line_addr: (old.tag * sets + set as u64) * line_bytes,
            dirty: old.dirty,
            data: old.data.clone(),
        });

        old.tag = tag;
        old.valid = true;
        old.dirty = false;
        let n = data.len().min(old.data.len());
        old.data[..n].copy_from_slice(&data[..n]);
        self.policy.on_fill(set, way);
        evicted
    }
}

/// Reads `width` bytes little-endian from `data[offset..]`.
pub fn read_le(data: &[u8], offset: usize, width: MemWidth) -> u64 {
    let len = width.bytes() as usize;
    data.get(offset..offset + len).map_or(0, |bytes| {
        bytes
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
    })
}

/// Writes the low `width` bytes of `value` little-endian into `data[offset..]`.
pub fn write_le(data: &mut [u8], offset: usize, width: MemWidth, value: u64) {
    let len = width.bytes() as usize;
    if let Some(dst) = data.get_mut(offset..offset + len) {
        dst.copy_from_slice(&value.to_le_bytes()[..len]);
    }
}
