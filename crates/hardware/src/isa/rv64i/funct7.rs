//! RISC-V Base Integer (I) Function Codes (funct7).
//!
//! The `funct7` field (bits 31-25) separates R-type operations that share a
//! `funct3` (ADD vs SUB, SRL vs SRA). RV64 immediate shifts use the upper six
//! bits (`funct6`) because the shift amount takes bit 25.

/// Default operation (ADD, SRL, etc.).
pub const DEFAULT: u32 = 0b0000000;

/// Alternate operation selecting SUB.
pub const SUB: u32 = 0b0100000;

/// Alternate operation selecting SRA / SRAW.
pub const SRA: u32 = 0b0100000;

/// `funct6` of SLLI / SRLI (bits 31-26).
pub const SHIFT_LOGICAL_6: u32 = 0b000000;

/// `funct6` of SRAI (bits 31-26).
pub const SHIFT_ARITH_6: u32 = 0b010000;
