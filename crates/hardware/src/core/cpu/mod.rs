//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Owns the register file, branch predictor and pipeline latches.
//! 2. **Memory Hierarchy:** Owns the split L1 caches, the unified L2 and main memory.
//! 3. **Program Setup:** Places a program image in memory and points Fetch at its entry.
//! 4. **Halting:** Records why execution stopped (exit, fault or exhausted stream).

/// Per-cycle execution and statistics accounting.
pub mod execution;

use std::ops::Range;

use serde::Serialize;

use crate::common::{ConfigError, ExceptionRecord, LoadError, RegisterFile};
use crate::config::Config;
use crate::core::pipeline::PipelineController;
use crate::core::units::bru::BimodalPredictor;
use crate::core::units::cache::MemoryHierarchy;
use crate::isa::abi;
use crate::sim::loader::Program;
use crate::stats::SimStats;

/// Why the core stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HaltReason {
    /// `ECALL` with the exit service number; carries the exit code.
    Exit(u64),
    /// An instruction retired with an architectural fault.
    Exception(ExceptionRecord),
    /// Fetch left the instruction stream and the pipeline drained.
    StreamExhausted,
    /// The cycle budget ran out.
    CycleLimit(u64),
}

/// Main CPU structure containing all processor state and components.
#[derive(Debug)]
pub struct Cpu {
    /// General purpose registers.
    pub regs: RegisterFile,
    /// Caches and main memory.
    pub memory: MemoryHierarchy,
    /// Branch predictor.
    pub predictor: BimodalPredictor,
    /// Stage latches and fetch PC.
    pub pipeline: PipelineController,
    /// Performance statistics.
    pub stats: SimStats,
    /// Emit a pipeline occupancy line every cycle.
    pub trace: bool,
    start_pc: Option<u64>,
    stream: Range<u64>,
    halt: Option<HaltReason>,
}

impl Cpu {
    /// Creates a new CPU with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The simulator configuration parameters.
    ///
    /// # Returns
    ///
    /// A CPU with empty caches and zeroed memory, or the first geometry error.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let memory = MemoryHierarchy::new(config);
        let entry = config.general.start_pc.unwrap_or(config.memory.ram_base);
        let mut regs = RegisterFile::new();
        regs.write(abi::REG_SP, memory.memory().end() & !0xF);

        Ok(Self {
            regs,
            memory,
            predictor: BimodalPredictor::new(config.pipeline.predictor_entries)?,
            pipeline: PipelineController::new(entry),
            stats: SimStats::default(),
            trace: config.general.trace_instructions,
            start_pc: config.general.start_pc,
            stream: entry..entry,
            halt: None,
        })
    }

    /// Loads a program and resets the pipeline to its entry point.
    ///
    /// # Errors
    ///
    /// `LoadError::OutOfRange` when any part of the image falls outside main memory.
    pub fn load_program(&mut self, program: &Program) -> Result<(), LoadError> {
        for segment in &program.data {
            self.memory.load_image(segment.addr, &segment.bytes)?;
        }
        self.memory.load_image(program.base, &program.text_bytes())?;
        self.stream = program.stream();
        self.pipeline = PipelineController::new(self.start_pc.unwrap_or(program.entry));
        self.halt = None;
        Ok(())
    }

    /// Address range Fetch may read instructions from.
    pub fn stream(&self) -> Range<u64> {
        self.stream.clone()
    }

    /// Halt reason, once the core has stopped.
    pub const fn halt_reason(&self) -> Option<HaltReason> {
        self.halt
    }

    /// True once the core has stopped.
    pub const fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    /// Stops the core from outside (cycle budget).
    pub fn force_halt(&mut self, reason: HaltReason) {
        let _ = self.halt.get_or_insert(reason);
    }

    /// Formats the fetch PC and registers.
    pub fn dump_state(&self) -> String {
        format!("PC = {:#018x}\n{}", self.pipeline.fetch_pc(), self.regs.dump())
    }
}
