//! RV64I encoding tables.
//!
//! Only the base integer set is modeled: no M, A, F, D or C extensions and
//! no CSR instructions.

/// Minor opcodes.
pub mod funct3;

/// R-type and shift-immediate upper bits.
pub mod funct7;

/// Major opcodes.
pub mod opcodes;
