//! Pipeline slot.
//!
//! A `Slot` is created by Fetch, enriched by every later stage and dropped
//! after Commit or by a flush. An empty latch (`None`) is a bubble.

use crate::common::ExceptionRecord;
use crate::core::pipeline::signals::ControlSignals;
use crate::core::retire::MemAccessRecord;
use crate::isa::instruction::Decoded;

/// One in-flight instruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    /// Program counter.
    pub pc: u64,
    /// Raw instruction word.
    pub inst: u32,
    /// Next PC predicted at fetch.
    pub pred_next: u64,
    /// Decoded fields.
    pub decoded: Decoded,
    /// Control signals.
    pub ctrl: ControlSignals,
    /// Destination register, 0 when nothing is written.
    pub rd: usize,
    /// First source register, 0 when unused.
    pub rs1: usize,
    /// Second source register, 0 when unused.
    pub rs2: usize,
    /// Sign-extended immediate.
    pub imm: i64,
    /// Operand values after forwarding.
    pub rs1_val: u64,
    /// Operand values after forwarding.
    pub rs2_val: u64,
    /// ALU result, link address or effective address.
    pub result: u64,
    /// Value returned by a load.
    pub load_data: u64,
    /// Resolved direction of a control-flow instruction.
    pub branch_taken: bool,
    /// Resolved target of a control-flow instruction.
    pub branch_target: Option<u64>,
    /// Data access performed in the Memory stage.
    pub mem: Option<MemAccessRecord>,
    /// Exit code requested by the exit environment call.
    pub exit_code: Option<u64>,
    /// The opcode was not recognized.
    pub decode_error: bool,
    /// Architectural fault raised by this instruction.
    pub exception: Option<ExceptionRecord>,
}

impl Slot {
    /// A freshly fetched instruction.
    pub fn fetched(pc: u64, inst: u32, pred_next: u64) -> Self {
        Self {
            pc,
            inst,
            pred_next,
            ..Self::default()
        }
    }

    /// A slot carrying a fault detected before the instruction word was known.
    pub fn faulted(pc: u64, exception: ExceptionRecord) -> Self {
        Self {
            pc,
            exception: Some(exception),
            ..Self::default()
        }
    }

    /// True when the slot will update `rd` at Commit.
    pub const fn writes_register(&self) -> bool {
        self.ctrl.reg_write && self.rd != 0 && self.exception.is_none() && !self.decode_error
    }

    /// True when the slot is a load that has not faulted.
    pub const fn is_load(&self) -> bool {
        self.ctrl.mem_read && self.exception.is_none() && !self.decode_error
    }

    /// Value the slot will write to `rd`: load data for loads, the ALU result otherwise.
    pub const fn produced_value(&self) -> u64 {
        if self.ctrl.mem_read {
            self.load_data
        } else {
            self.result
        }
    }
}
