//! Shared test infrastructure.

/// Instruction and slot builders.
pub mod builder;
