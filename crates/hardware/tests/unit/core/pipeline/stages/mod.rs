//! Stage tests.

/// Commit and writeback.
pub mod commit;

/// Control-signal generation.
pub mod decode;
