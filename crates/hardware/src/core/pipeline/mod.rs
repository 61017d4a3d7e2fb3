//! Ten-stage instruction pipeline.
//!
//! This module contains the in-order pipeline that moves instructions from
//! Fetch to Commit. It includes the following components:
//! 1. **Slots:** The per-stage bundle an instruction carries through the pipe.
//! 2. **Hazards:** Load-use detection and the stall/bubble decision.
//! 3. **Forwarding:** Bypass selection for operands read at the evaluation point.
//! 4. **Signals:** Control signals generated during instruction decoding.
//! 5. **Stages:** Pure per-stage transformations (Fetch, Decode, Execute, Memory, Writeback, Commit).
//! 6. **Controller:** The per-cycle compute-then-commit sequencing of all stages.

use serde::Serialize;

/// Per-cycle sequencing of stall, flush and redirect control.
pub mod controller;

/// Bypass network and forward-select generation.
pub mod forwarding;

/// Pipeline hazard detection logic.
pub mod hazards;

/// Control signals generated during instruction decode.
pub mod signals;

/// Per-stage instruction bundle.
pub mod slot;

/// Pipeline stage implementations.
pub mod stages;

pub use controller::{CoreUnits, FetchState, PipelineController, TickReport};
pub use forwarding::{BypassNetwork, ForwardSelect, ForwardingUnit};
pub use hazards::HazardUnit;
pub use slot::Slot;

/// Number of pipeline stages.
pub const STAGE_COUNT: usize = 10;

/// Logical pipeline stages, oldest last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    /// Instruction fetch and branch prediction.
    Fetch,
    /// Field extraction and control-signal generation.
    Decode,
    /// First execute micro-stage.
    Execute1,
    /// Second execute micro-stage.
    Execute2,
    /// Third execute micro-stage.
    Execute3,
    /// Fourth execute micro-stage.
    Execute4,
    /// Operand read, ALU evaluation and branch resolution.
    Execute5,
    /// Data cache access.
    Memory,
    /// Result selection.
    Writeback,
    /// Register update and retirement.
    Commit,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Self; STAGE_COUNT] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute1,
        Self::Execute2,
        Self::Execute3,
        Self::Execute4,
        Self::Execute5,
        Self::Memory,
        Self::Writeback,
        Self::Commit,
    ];

    /// Position of the stage in the pipeline (Fetch = 0).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short mnemonic used in trace output.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Fetch => "IF",
            Self::Decode => "ID",
            Self::Execute1 => "X1",
            Self::Execute2 => "X2",
            Self::Execute3 => "X3",
            Self::Execute4 => "X4",
            Self::Execute5 => "X5",
            Self::Memory => "MEM",
            Self::Writeback => "WB",
            Self::Commit => "CM",
        }
    }
}
