//! Integer Register File.
//!
//! Thirty-two doubleword registers with `x0` hardwired to zero. The pipeline
//! reads through two ports during operand fetch and writes through a single
//! port at Commit.

use crate::common::constants::NUM_REGS;

/// The architectural integer register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u64; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    ///
    /// # Returns
    ///
    /// The 64-bit value held by the register, or 0 for an out-of-range index.
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Reads both source operands in one access.
    ///
    /// # Arguments
    ///
    /// * `rs1` - First source register index.
    /// * `rs2` - Second source register index.
    pub fn read_pair(&self, rs1: usize, rs2: usize) -> (u64, u64) {
        (self.read(rs1), self.read(rs2))
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` and out-of-range indices are discarded.
    /// * `val` - The 64-bit value to write.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx == 0 {
            return;
        }
        if let Some(slot) = self.regs.get_mut(idx) {
            *slot = val;
        }
    }

    /// Returns a copy of all 32 registers (x0 included, always zero).
    pub fn snapshot(&self) -> [u64; NUM_REGS] {
        self.regs
    }

    /// Formats the register file as four columns of `xNN=value` pairs.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (i, chunk) in self.regs.chunks(4).enumerate() {
            for (j, val) in chunk.iter().enumerate() {
                let idx = i * 4 + j;
                out.push_str(&format!("x{idx:<2}={val:#018x} "));
            }
            out.push('\n');
        }
        out
    }
}
