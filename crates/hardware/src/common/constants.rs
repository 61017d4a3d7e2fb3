//! Global Constants.
//!
//! This module defines constants used across the model. It includes:
//! 1. **Instruction Constants:** Instruction width and field masks.
//! 2. **Architectural Constants:** Register count and the exit system call number.
//! 3. **Memory Constants:** Default placement and size of main memory.

/// Size of an RV64I instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Bit mask for extracting the opcode field from an instruction.
pub const OPCODE_MASK: u32 = 0x7F;

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// System call number that terminates the program (`a7 == 93`, code in `a0`).
pub const SYS_EXIT: u64 = 93;

/// Default physical base address of main memory.
pub const DEFAULT_RAM_BASE: u64 = 0x8000_0000;

/// Default main memory size (16 MiB).
pub const DEFAULT_RAM_SIZE: usize = 16 * 1024 * 1024;

/// Number of entries in the default branch predictor table.
pub const DEFAULT_PREDICTOR_ENTRIES: usize = 256;
