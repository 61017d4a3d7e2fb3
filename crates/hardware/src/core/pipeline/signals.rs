//! Pipeline control signals and operation types.
//!
//! This module defines the signals the Decode stage attaches to every slot. It performs:
//! 1. **Operation Classification:** Selects the ALU function, including branch compares.
//! 2. **Operand Selection:** Defines sources for ALU inputs (registers, PC, or immediates).
//! 3. **Memory Control:** Specifies access widths and sign-extension requirements.
//! 4. **System Control:** Marks the serializing system instructions.

use serde::Serialize;

/// ALU functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition.
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than unsigned.
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Load upper immediate: passes operand B through.
    Lui,
    /// PC-relative add of an upper immediate.
    Auipc,
    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Branch if less than (signed).
    Blt,
    /// Branch if greater or equal (signed).
    Bge,
    /// Branch if less than (unsigned).
    Bltu,
    /// Branch if greater or equal (unsigned).
    Bgeu,
    /// Link address of a jump: operand A plus one instruction.
    Link,
    /// Effective address of a load or store.
    Address,
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Source register 1.
    #[default]
    Reg1,
    /// Program counter of the instruction.
    Pc,
    /// Constant zero.
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Sign-extended immediate.
    #[default]
    Imm,
    /// Source register 2.
    Reg2,
    /// Constant zero.
    Zero,
}

/// Memory transfer width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum MemWidth {
    /// No memory access.
    #[default]
    Nop,
    /// 8-bit access.
    Byte,
    /// 16-bit access.
    Half,
    /// 32-bit access.
    Word,
    /// 64-bit access.
    Double,
}

impl MemWidth {
    /// Number of bytes transferred.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Nop => 0,
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }
}

/// Serializing system instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SystemOp {
    /// Not a system instruction.
    #[default]
    None,
    /// `ECALL`.
    Ecall,
    /// `EBREAK`.
    Ebreak,
}

/// Control signals produced by Decode and consumed downstream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Instruction writes `rd` at Commit.
    pub reg_write: bool,
    /// Instruction reads data memory.
    pub mem_read: bool,
    /// Instruction writes data memory.
    pub mem_write: bool,
    /// Conditional branch.
    pub branch: bool,
    /// Unconditional jump (JAL or JALR).
    pub jump: bool,
    /// Jump target is register-relative (JALR).
    pub jump_reg: bool,
    /// Narrow (32-bit, W-suffix) operation.
    pub is_rv32: bool,
    /// Memory transfer width.
    pub width: MemWidth,
    /// Sign-extend loaded data.
    pub signed_load: bool,
    /// ALU function.
    pub alu: AluOp,
    /// Operand A source.
    pub a_src: OpASrc,
    /// Operand B source.
    pub b_src: OpBSrc,
    /// System instruction kind.
    pub system: SystemOp,
}

impl ControlSignals {
    /// True for instructions resolved by the branch unit.
    pub const fn is_control_flow(&self) -> bool {
        self.branch || self.jump
    }
}
