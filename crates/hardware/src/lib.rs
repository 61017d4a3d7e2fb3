//! Cycle-level model of a ten-stage RV64I integer core.
//!
//! This crate implements the execution core of a 64-bit RISC-V processor with the following:
//! 1. **Core:** Ten-stage in-order pipeline (Fetch, Decode, five Execute micro-stages,
//!    Memory, Writeback, Commit) with load-use stalls, operand forwarding and
//!    misprediction recovery.
//! 2. **Units:** Integer ALU and a bimodal branch predictor with target cache.
//! 3. **Memory:** Split L1 caches with hit-under-miss, a unified write-back L2 and main memory.
//! 4. **ISA:** RV64I decoding and disassembly.
//! 5. **Simulation:** Program loading, retirement observation, configuration and statistics.

/// Common types and constants (registers, traps, memory requests).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// CPU core (pipeline, units, retirement).
pub mod core;
/// Instruction set (decode, instruction fields, ABI, RV64I encodings, disassembly).
pub mod isa;
/// Program loader and simulation driver.
pub mod sim;
/// Main memory.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds pipeline, caches, predictor and stats.
pub use crate::core::{Cpu, HaltReason};
/// Retirement interface exposed to checkers.
pub use crate::core::retire::{RetireLog, RetireObserver, RetireOutcome, RetireRecord};
/// Program image and simulation driver.
pub use crate::sim::{Program, Simulator};
