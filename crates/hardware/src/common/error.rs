//! Trap and error definitions.
//!
//! This module defines the error handling for the model. It provides:
//! 1. **Trap Representation:** Architectural faults raised by instructions.
//! 2. **Exception Records:** The structured record a faulting slot carries to Commit.
//! 3. **Host Errors:** Configuration and program-loading failures surfaced to callers.

use serde::Serialize;
use thiserror::Error;

use crate::core::pipeline::Stage;

/// Architectural faults an instruction can raise.
///
/// A trap never corrupts state silently: the faulting slot is tagged, younger
/// slots are flushed, and the fault is reported when the slot retires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize)]
pub enum Trap {
    /// Raised when a fetch address or a taken branch/jump target is not a
    /// multiple of the instruction width. The value is the misaligned address.
    #[error("InstructionAddressMisaligned({0:#x})")]
    InstructionAddressMisaligned(u64),

    /// Raised when the fetch address lies outside main memory.
    #[error("InstructionAccessFault({0:#x})")]
    InstructionAccessFault(u64),

    /// Raised by `EBREAK`. The value is the program counter.
    #[error("Breakpoint({0:#x})")]
    Breakpoint(u64),

    /// Raised when a load address is not naturally aligned.
    #[error("LoadAddressMisaligned({0:#x})")]
    LoadAddressMisaligned(u64),

    /// Raised when a load address lies outside main memory.
    #[error("LoadAccessFault({0:#x})")]
    LoadAccessFault(u64),

    /// Raised when a store address is not naturally aligned.
    #[error("StoreAddressMisaligned({0:#x})")]
    StoreAddressMisaligned(u64),

    /// Raised when a store address lies outside main memory.
    #[error("StoreAccessFault({0:#x})")]
    StoreAccessFault(u64),

    /// Raised by `ECALL` when it does not follow the exit convention.
    /// The value is the system call number found in `a7`.
    #[error("EnvironmentCall({0})")]
    EnvironmentCall(u64),
}

/// Structured description of an architectural fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ExceptionRecord {
    /// The fault that was raised.
    pub trap: Trap,
    /// Program counter of the faulting instruction.
    pub pc: u64,
    /// Stage in which the fault was detected.
    pub stage: Stage,
}

impl std::fmt::Display for ExceptionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at pc={:#x} ({:?})", self.trap, self.pc, self.stage)
    }
}

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A cache geometry parameter is zero or not a power of two.
    #[error("{cache}: {field} must be a non-zero power of two (got {value})")]
    NotPowerOfTwo {
        /// Name of the offending cache.
        cache: &'static str,
        /// Name of the offending field.
        field: &'static str,
        /// Value found in the configuration.
        value: usize,
    },

    /// The cache is too small to hold `ways` lines per set.
    #[error("{cache}: {size} bytes cannot hold {ways} ways of {line}-byte lines")]
    Geometry {
        /// Name of the offending cache.
        cache: &'static str,
        /// Total capacity in bytes.
        size: usize,
        /// Line size in bytes.
        line: usize,
        /// Associativity.
        ways: usize,
    },

    /// A line is smaller than the widest access (a doubleword).
    #[error("{cache}: line size {line} is smaller than a doubleword")]
    LineTooSmall {
        /// Name of the offending cache.
        cache: &'static str,
        /// Line size in bytes.
        line: usize,
    },

    /// An L1 line is larger than an L2 line, so one L2 line cannot fill it.
    #[error("{cache}: line size {line} exceeds the L2 line size {l2_line}")]
    LineMismatch {
        /// Name of the offending L1.
        cache: &'static str,
        /// L1 line size.
        line: usize,
        /// L2 line size.
        l2_line: usize,
    },

    /// The predictor table size is zero or not a power of two.
    #[error("predictor_entries must be a non-zero power of two (got {0})")]
    PredictorEntries(usize),

    /// Main memory is empty or its base is not line aligned.
    #[error("invalid main memory layout: base={base:#x} size={size:#x}")]
    Memory {
        /// Physical base address.
        base: u64,
        /// Size in bytes.
        size: usize,
    },

    /// The configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Failures while building a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the program file failed.
    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a usable ELF executable.
    #[error("invalid ELF image: {0}")]
    Elf(#[from] object::read::Error),

    /// The ELF machine or class is not RV64.
    #[error("unsupported ELF target: {0}")]
    UnsupportedTarget(String),

    /// A program header points past the end of the file.
    #[error("segment at file offset {offset:#x} (+{size:#x} bytes) exceeds the image")]
    SegmentBounds {
        /// File offset of the segment.
        offset: u64,
        /// Segment file size.
        size: u64,
    },

    /// A flat binary length is not a multiple of the instruction width.
    #[error("flat image length {0} is not a multiple of 4")]
    TruncatedImage(usize),

    /// The image does not fit inside main memory.
    #[error("image [{start:#x}, {end:#x}) lies outside main memory")]
    OutOfRange {
        /// First byte of the image.
        start: u64,
        /// One past the last byte of the image.
        end: u64,
    },
}

/// Umbrella error returned by simulator construction and loading.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Program could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}
