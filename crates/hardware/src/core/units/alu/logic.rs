//! ALU bitwise logic and set-less-than operations.

use super::sext32;
use crate::core::pipeline::signals::AluOp;

/// Executes a logical or comparison operation.
///
/// # Arguments
///
/// * `op`     - The ALU operation (Or, And, Xor, Slt or Sltu).
/// * `a`      - First operand.
/// * `b`      - Second operand.
/// * `narrow` - Compare or combine only the low 32 bits.
///
/// # Returns
///
/// The result; comparisons produce `1` or `0`.
pub fn execute(op: AluOp, a: u64, b: u64, narrow: bool) -> u64 {
    let (a, b) = if narrow { (sext32(a), sext32(b)) } else { (a, b) };
    let r = match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => u64::from((a as i64) < (b as i64)),
        AluOp::Sltu => u64::from(a < b),
        _ => 0,
    };
    if narrow { sext32(r) } else { r }
}
