//! Minor opcodes, instruction bits 14..12.
//!
//! The same value means different things under different major opcodes, so
//! the constants are grouped by the opcode they belong to.

// OP_LOAD

/// `lb`
pub const LB: u32 = 0b000;
/// `lh`
pub const LH: u32 = 0b001;
/// `lw`
pub const LW: u32 = 0b010;
/// `ld`
pub const LD: u32 = 0b011;
/// `lbu`
pub const LBU: u32 = 0b100;
/// `lhu`
pub const LHU: u32 = 0b101;
/// `lwu`
pub const LWU: u32 = 0b110;

// OP_STORE

/// `sb`
pub const SB: u32 = 0b000;
/// `sh`
pub const SH: u32 = 0b001;
/// `sw`
pub const SW: u32 = 0b010;
/// `sd`
pub const SD: u32 = 0b011;

// OP_BRANCH

/// `beq`
pub const BEQ: u32 = 0b000;
/// `bne`
pub const BNE: u32 = 0b001;
/// `blt`
pub const BLT: u32 = 0b100;
/// `bge`
pub const BGE: u32 = 0b101;
/// `bltu`
pub const BLTU: u32 = 0b110;
/// `bgeu`
pub const BGEU: u32 = 0b111;

// OP_REG / OP_IMM and their 32-bit forms

/// `add`/`sub` (funct7 selects), `addi`.
pub const ADD_SUB: u32 = 0b000;
/// Left shift.
pub const SLL: u32 = 0b001;
/// Signed set-less-than.
pub const SLT: u32 = 0b010;
/// Unsigned set-less-than.
pub const SLTU: u32 = 0b011;
/// `xor`, `xori`.
pub const XOR: u32 = 0b100;
/// Right shifts; funct7 bit 5 picks arithmetic.
pub const SRL_SRA: u32 = 0b101;
/// `or`, `ori`.
pub const OR: u32 = 0b110;
/// `and`, `andi`.
pub const AND: u32 = 0b111;

// OP_MISC_MEM

/// `fence`
pub const FENCE: u32 = 0b000;
/// `fence.i`
pub const FENCE_I: u32 = 0b001;

// OP_SYSTEM

/// `ecall`/`ebreak`; the immediate tells them apart.
pub const PRIV: u32 = 0b000;
