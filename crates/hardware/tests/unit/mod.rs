//! # Unit Components
//!
//! Tests grouped by the crate module they exercise.

/// Register file and error types.
pub mod common;


/// Pipeline, execution units, CPU and retirement interface.
pub mod core;


/// Program loading and the simulator driver.
pub mod sim;
