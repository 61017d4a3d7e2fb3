//! ALU arithmetic operations.
//!
//! Addition, subtraction and the address-forming functions (LUI, AUIPC,
//! link address, effective address). All arithmetic wraps modulo 2^64.

use super::sext32;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::pipeline::signals::AluOp;

/// Executes an arithmetic operation.
///
/// # Arguments
///
/// * `op`     - The ALU operation (Add, Sub, Lui, Auipc, Link or Address).
/// * `a`      - First operand (program counter for Auipc and Link).
/// * `b`      - Second operand (immediate for Lui, Auipc and Address).
/// * `narrow` - Apply the 32-bit variant (Add and Sub only).
///
/// # Returns
///
/// The 64-bit result, or `0` for a non-arithmetic opcode.
pub fn execute(op: AluOp, a: u64, b: u64, narrow: bool) -> u64 {
    match op {
        AluOp::Add if narrow => sext32(a.wrapping_add(b)),
        AluOp::Sub if narrow => sext32(a.wrapping_sub(b)),
        AluOp::Add | AluOp::Auipc | AluOp::Address => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Lui => b,
        AluOp::Link => a.wrapping_add(INSTRUCTION_SIZE),
        _ => 0,
    }
}
