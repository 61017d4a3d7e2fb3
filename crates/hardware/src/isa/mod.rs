//! RV64I encodings, field extraction and disassembly.
//!
//! No extension beyond the base integer set is recognised; any other word
//! decodes as a decode fault.

/// ABI register names and the indices the exit convention uses.
pub mod abi;

/// Field and immediate extraction for every RV64I format.
pub mod decode;

/// Text rendering for trace output and the CLI.
pub mod disasm;

/// Raw field accessors and the `Decoded` bundle.
pub mod instruction;

/// Opcode and function-code tables.
pub mod rv64i;
