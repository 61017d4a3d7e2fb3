//! RV64I field decoder.
//!
//! Splits a 32-bit instruction word into a `Decoded` record and rebuilds the
//! scattered immediate of each format (I, S, B, U, J) as a sign-extended
//! 64-bit value. Control-signal generation lives in the Decode stage.

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv64i::opcodes;

/// Extracts `inst[hi:lo]` right-aligned.
#[inline(always)]
const fn bits(inst: u32, hi: u32, lo: u32) -> u32 {
    (inst >> lo) & ((1 << (hi - lo + 1)) - 1)
}

/// Sign-extends the low `width` bits of `val`.
#[inline(always)]
const fn sign_extend(val: u32, width: u32) -> i64 {
    let shift = 32 - width;
    (((val << shift) as i32) >> shift) as i64
}

/// I-type: `imm[11:0]` in bits 31:20.
pub const fn imm_i(inst: u32) -> i64 {
    sign_extend(bits(inst, 31, 20), 12)
}

/// S-type: `imm[11:5]` in bits 31:25 and `imm[4:0]` in bits 11:7.
pub const fn imm_s(inst: u32) -> i64 {
    sign_extend((bits(inst, 31, 25) << 5) | bits(inst, 11, 7), 12)
}

/// B-type: a 13-bit even offset scattered over bits 31, 30:25, 11:8 and 7.
pub const fn imm_b(inst: u32) -> i64 {
    let v = (bits(inst, 31, 31) << 12)
        | (bits(inst, 7, 7) << 11)
        | (bits(inst, 30, 25) << 5)
        | (bits(inst, 11, 8) << 1);
    sign_extend(v, 13)
}

/// U-type: bits 31:12 placed in the upper part of a sign-extended word.
pub const fn imm_u(inst: u32) -> i64 {
    ((inst & 0xFFFF_F000) as i32) as i64
}

/// J-type: a 21-bit even offset scattered over bits 31, 30:21, 20 and 19:12.
pub const fn imm_j(inst: u32) -> i64 {
    let v = (bits(inst, 31, 31) << 20)
        | (bits(inst, 19, 12) << 12)
        | (bits(inst, 20, 20) << 11)
        | (bits(inst, 30, 21) << 1);
    sign_extend(v, 21)
}

/// Decodes the fields of an instruction word.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding.
///
/// # Returns
///
/// The extracted fields. The decoder never fails; an unknown opcode simply
/// yields a zero immediate and is rejected later during control generation.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();
    let imm = match opcode {
        opcodes::OP_IMM
        | opcodes::OP_IMM_32
        | opcodes::OP_LOAD
        | opcodes::OP_JALR
        | opcodes::OP_SYSTEM
        | opcodes::OP_MISC_MEM => imm_i(inst),
        opcodes::OP_STORE => imm_s(inst),
        opcodes::OP_BRANCH => imm_b(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => imm_u(inst),
        opcodes::OP_JAL => imm_j(inst),
        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm,
    }
}
