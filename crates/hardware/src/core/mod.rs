//! Core processor implementation.
//!
//! This module contains the CPU, its ten-stage pipeline, the execution units
//! the pipeline drives and the retirement interface through which committed
//! instructions are observed.

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Instruction pipeline implementation (stages, slots, hazards, forwarding, controller).
pub mod pipeline;

/// Retirement records and observers.
pub mod retire;

/// Execution units (ALU, branch predictor, caches).
pub mod units;

pub use self::cpu::{Cpu, HaltReason};
