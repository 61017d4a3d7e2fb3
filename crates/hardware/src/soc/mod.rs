//! Off-core system components.
//!
//! The core model has a single off-core collaborator: main memory, which
//! backs the L2 cache and receives its dirty write-backs.

/// Main memory (backing store below the L2).
pub mod memory;

pub use memory::MainMemory;
