//! Major opcodes, instruction bits 6..0.
//!
//! Listed in encoding order. Every RV64I instruction maps to exactly one of
//! these; anything else decodes as illegal.

/// `LB`..`LWU`.
pub const OP_LOAD: u32 = 0b0000011;

/// `FENCE`, `FENCE.I` (executed as no-ops).
pub const OP_MISC_MEM: u32 = 0b0001111;

/// Register-immediate ALU operations.
pub const OP_IMM: u32 = 0b0010011;

/// `AUIPC`.
pub const OP_AUIPC: u32 = 0b0010111;

/// `ADDIW`, `SLLIW`, `SRLIW`, `SRAIW`.
pub const OP_IMM_32: u32 = 0b0011011;

/// `SB`..`SD`.
pub const OP_STORE: u32 = 0b0100011;

/// Register-register ALU operations.
pub const OP_REG: u32 = 0b0110011;

/// `LUI`.
pub const OP_LUI: u32 = 0b0110111;

/// `ADDW`, `SUBW` and the 32-bit shifts.
pub const OP_REG_32: u32 = 0b0111011;

/// Conditional branches.
pub const OP_BRANCH: u32 = 0b1100011;

/// `JALR`.
pub const OP_JALR: u32 = 0b1100111;

/// `JAL`.
pub const OP_JAL: u32 = 0b1101111;

/// `ECALL`, `EBREAK`.
pub const OP_SYSTEM: u32 = 0b1110011;

/// `ecall` as a complete word.
pub const ECALL: u32 = 0x0000_0073;

/// `ebreak` as a complete word.
pub const EBREAK: u32 = 0x0010_0073;
