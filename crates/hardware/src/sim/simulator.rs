//! Simulator: owns the CPU and the retirement observers side-by-side.
//!
//! The simulator is the entry point for running a program. It applies the
//! cycle budget from the configuration and fans every retirement record out
//! to the registered observers.

use tracing::info;

use crate::common::SimError;
use crate::config::Config;
use crate::core::retire::{RetireObserver, RetireRecord};
use crate::core::{Cpu, HaltReason};
use crate::sim::loader::Program;
use crate::stats::SimStats;

/// Top-level simulator: CPU plus observers.
pub struct Simulator {
    /// CPU state (registers, caches, pipeline, stats).
    pub cpu: Cpu,
    max_cycles: u64,
    observers: Vec<Box<dyn RetireObserver>>,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("cpu", &self.cpu)
            .field("max_cycles", &self.max_cycles)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Simulator {
    /// Creates a simulator with an empty instruction stream.
    ///
    /// # Errors
    ///
    /// `SimError::Config` when the configuration fails validation.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        Ok(Self {
            cpu: Cpu::new(config)?,
            max_cycles: config.general.max_cycles,
            observers: Vec::new(),
        })
    }

    /// Creates a simulator and loads `program`.
    ///
    /// # Errors
    ///
    /// Configuration or load failures.
    pub fn with_program(config: &Config, program: &Program) -> Result<Self, SimError> {
        let mut sim = Self::new(config)?;
        sim.load(program)?;
        Ok(sim)
    }

    /// Loads a program, replacing the current instruction stream.
    ///
    /// # Errors
    ///
    /// `SimError::Load` when the image does not fit in memory.
    pub fn load(&mut self, program: &Program) -> Result<(), SimError> {
        self.cpu.load_program(program)?;
        info!(
            "loaded {} instruction(s) at {:#x}, entry {:#x}",
            program.words.len(),
            program.base,
            program.entry
        );
        Ok(())
    }

    /// Registers an observer that receives every retirement record.
    pub fn add_observer(&mut self, observer: Box<dyn RetireObserver>) {
        self.observers.push(observer);
    }

    /// Overrides the cycle budget.
    pub const fn set_max_cycles(&mut self, cycles: u64) {
        self.max_cycles = cycles;
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Returns
    ///
    /// The record retired this cycle, after it has been delivered to the observers.
    pub fn step(&mut self) -> Option<RetireRecord> {
        let record = self.cpu.tick()?;
        for observer in &mut self.observers {
            observer.on_retire(&record);
        }
        Some(record)
    }

    /// Runs until the core halts or the cycle budget is spent.
    pub fn run(&mut self) -> HaltReason {
        self.run_inner(None)
    }

    /// Like `run`, additionally feeding records to a borrowed observer.
    pub fn run_with(&mut self, observer: &mut dyn RetireObserver) -> HaltReason {
        self.run_inner(Some(observer))
    }

    fn run_inner(&mut self, mut extra: Option<&mut dyn RetireObserver>) -> HaltReason {
        loop {
            if let Some(reason) = self.cpu.halt_reason() {
                return reason;
            }
            if self.cpu.stats.cycles >= self.max_cycles {
                info!("cycle budget of {} exhausted", self.max_cycles);
                self.cpu.force_halt(HaltReason::CycleLimit(self.max_cycles));
                continue;
            }
            let record = self.step();
            if let (Some(record), Some(observer)) = (record, extra.as_deref_mut()) {
                observer.on_retire(&record);
            }
        }
    }

    /// Halt reason, once stopped.
    pub const fn halt_reason(&self) -> Option<HaltReason> {
        self.cpu.halt_reason()
    }

    /// Performance statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Architectural value of register `idx`.
    pub fn reg(&self, idx: usize) -> u64 {
        self.cpu.regs.read(idx)
    }
}
