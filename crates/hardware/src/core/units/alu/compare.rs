//! Branch comparisons.

use crate::core::pipeline::signals::AluOp;

/// Evaluates a conditional branch comparison.
///
/// # Arguments
///
/// * `op` - One of Beq, Bne, Blt, Bge, Bltu, Bgeu.
/// * `a`  - Value of `rs1`.
/// * `b`  - Value of `rs2`.
///
/// # Returns
///
/// `true` when the branch is taken; `false` for any other opcode.
pub fn taken(op: AluOp, a: u64, b: u64) -> bool {
    match op {
        AluOp::Beq => a == b,
        AluOp::Bne => a != b,
        AluOp::Blt => (a as i64) < (b as i64),
        AluOp::Bge => (a as i64) >= (b as i64),
        AluOp::Bltu => a < b,
        AluOp::Bgeu => a >= b,
        _ => false,
    }
}
