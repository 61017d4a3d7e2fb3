//! Tests for the execution core.

/// CPU construction, program loading and halting.
pub mod cpu;
