//! Common utilities and types shared by every unit of the core model.
//!
//! This module provides the building blocks used across the crate. It includes:
//! 1. **Constants:** Instruction width, register count, memory layout defaults.
//! 2. **Memory Transactions:** Requests exchanged with the cache hierarchy.
//! 3. **Error Handling:** Architectural traps, exception records and the crate error types.
//! 4. **Register File:** The 32-entry integer register file with `x0` hardwired to zero.

/// Common constants used throughout the model.
pub mod constants;

/// Memory transaction types.
pub mod data;

/// Error types and trap definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use data::{AccessType, MemRequest};
pub use error::{ConfigError, ExceptionRecord, LoadError, SimError, Trap};
pub use reg::RegisterFile;
