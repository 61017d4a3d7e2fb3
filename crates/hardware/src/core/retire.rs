//! Retirement observation interface.
//!
//! Every instruction that completes Commit produces one `RetireRecord`. The
//! records are the contract with external checkers: they describe the
//! architectural effect of each instruction in program order. It provides:
//! 1. **Records:** PC, destination/value, branch resolution and data access.
//! 2. **Outcomes:** Normal retirement, decode faults and architectural exceptions.
//! 3. **Observers:** A trait for consumers plus an in-memory collector.

use serde::Serialize;

use crate::common::{AccessType, ExceptionRecord};
use crate::core::pipeline::signals::MemWidth;

/// Data access performed by a retiring load or store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MemAccessRecord {
    /// Byte address.
    pub addr: u64,
    /// Transfer width.
    pub width: MemWidth,
    /// Loaded (extended) value or stored value.
    pub data: u64,
    /// `Read` for loads, `Write` for stores.
    pub kind: AccessType,
}

/// How an instruction left the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RetireOutcome {
    /// Architectural effects applied.
    Normal,
    /// Unrecognized encoding, retired as a no-op.
    DecodeError,
    /// Architectural fault; no register or memory effect.
    Exception(ExceptionRecord),
}

/// One retired instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RetireRecord {
    /// Cycle in which the instruction committed.
    pub cycle: u64,
    /// Program counter.
    pub pc: u64,
    /// Raw instruction word.
    pub inst: u32,
    /// Destination register, present only when a nonzero register was written.
    pub rd: Option<usize>,
    /// Value written to `rd` (0 otherwise).
    pub value: u64,
    /// Resolved direction (control-flow instructions only).
    pub branch_taken: bool,
    /// Resolved target (control-flow instructions only).
    pub branch_target: Option<u64>,
    /// Data access, for loads and stores.
    pub mem: Option<MemAccessRecord>,
    /// Outcome tag.
    pub outcome: RetireOutcome,
}

impl RetireRecord {
    /// True when the instruction retired without a fault.
    pub const fn is_normal(&self) -> bool {
        matches!(self.outcome, RetireOutcome::Normal)
    }
}

/// Consumer of retirement records.
pub trait RetireObserver {
    /// Called once per retired instruction, in program order.
    fn on_retire(&mut self, record: &RetireRecord);
}

/// Observer that keeps every record in memory.
#[derive(Clone, Debug, Default)]
pub struct RetireLog {
    records: Vec<RetireRecord>,
}

impl RetireLog {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Records in retirement order.
    pub fn records(&self) -> &[RetireRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has retired.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record retired at `pc`.
    pub fn last_at(&self, pc: u64) -> Option<&RetireRecord> {
        self.records.iter().rev().find(|r| r.pc == pc)
    }

    /// Consumes the log.
    pub fn into_records(self) -> Vec<RetireRecord> {
        self.records
    }
}

impl RetireObserver for RetireLog {
    fn on_retire(&mut self, record: &RetireRecord) {
        self.records.push(record.clone());
    }
}
