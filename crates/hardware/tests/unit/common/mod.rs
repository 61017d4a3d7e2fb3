//! Tests for shared data structures.

/// Architectural and host error types.
pub mod errors;
