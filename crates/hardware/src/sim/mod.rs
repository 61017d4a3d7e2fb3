//! Simulation driver and program loading.
//!
//! Provides the `Simulator` run loop and the loaders that turn instruction
//! words, flat binaries and ELF executables into a `Program`.

/// Program images (word streams, flat binaries, ELF).
pub mod loader;

/// Run loop and observer fan-out.
pub mod simulator;

pub use loader::{ImageFormat, Program, Segment};
pub use simulator::Simulator;
