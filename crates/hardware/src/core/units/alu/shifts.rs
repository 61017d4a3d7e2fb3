//! ALU shift operations.
//!
//! Shift amounts are masked to 6 bits (0–63) for full-width shifts and
//! 5 bits (0–31) for narrow shifts. Narrow results are sign-extended from
//! bit 31.

use super::sext32;
use crate::core::pipeline::signals::AluOp;

/// Shift amount mask for full-width shifts.
const SHAMT_MASK_64: u64 = 0x3f;

/// Shift amount mask for narrow shifts.
const SHAMT_MASK_32: u64 = 0x1f;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op`     - The shift operation (Sll, Srl or Sra).
/// * `a`      - The value to be shifted.
/// * `b`      - The shift amount (only the low 6 or 5 bits are used).
/// * `narrow` - Shift the low word and sign-extend the result.
///
/// # Returns
///
/// The 64-bit result, or `0` for a non-shift opcode.
pub fn execute(op: AluOp, a: u64, b: u64, narrow: bool) -> u64 {
    if narrow {
        let sh = (b & SHAMT_MASK_32) as u32;
        let lo = a as u32;
        return match op {
            AluOp::Sll => sext32(u64::from(lo << sh)),
            AluOp::Srl => sext32(u64::from(lo >> sh)),
            AluOp::Sra => ((lo as i32) >> sh) as i64 as u64,
            _ => 0,
        };
    }

    let sh = (b & SHAMT_MASK_64) as u32;
    match op {
        AluOp::Sll => a << sh,
        AluOp::Srl => a >> sh,
        AluOp::Sra => ((a as i64) >> sh) as u64,
        _ => 0,
    }
}
