//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! It is responsible for reading the instruction word at the fetch PC through
//! the instruction channel and for choosing the next fetch PC: control-flow
//! instructions are pre-decoded and looked up in the branch predictor, all
//! others continue at `pc + 4`.

use std::ops::Range;

use tracing::trace;

use crate::common::constants::{INSTRUCTION_SIZE, OPCODE_MASK};
use crate::common::{ExceptionRecord, Trap};
use crate::core::pipeline::Stage;
use crate::core::pipeline::slot::Slot;
use crate::core::units::bru::BranchPredictor;
use crate::core::units::cache::{Access, InstructionPort, StallCause};
use crate::isa::rv64i::opcodes;

/// Result of one fetch attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A new slot and the predicted next fetch PC.
    Fetched(Slot),
    /// The instruction cache could not deliver the word this cycle.
    Stalled(StallCause),
    /// The fetch PC is misaligned or unmapped; fetching stops.
    Faulted(Slot),
    /// The fetch PC lies outside the supplied instruction stream.
    Idle,
}

/// True for the opcodes the predictor is consulted for.
const fn is_control_flow(inst: u32) -> bool {
    matches!(
        inst & OPCODE_MASK,
        opcodes::OP_BRANCH | opcodes::OP_JAL | opcodes::OP_JALR
    )
}

/// Executes the instruction fetch stage.
///
/// # Arguments
///
/// * `pc` - Current fetch PC.
/// * `stream` - Address range holding the instruction stream.
/// * `port` - Instruction-side memory channel.
/// * `predictor` - Branch predictor (read-only lookup).
///
/// # Returns
///
/// The `FetchOutcome` for this cycle. A fetched slot carries its predicted
/// next PC in `pred_next`.
pub fn fetch_stage(
    pc: u64,
    stream: &Range<u64>,
    port: &mut impl InstructionPort,
    predictor: &impl BranchPredictor,
) -> FetchOutcome {
    let fault = |trap| {
        trace!("IF  pc={pc:#x} # TRAP: {trap}");
        FetchOutcome::Faulted(Slot::faulted(
            pc,
            ExceptionRecord {
                trap,
                pc,
                stage: Stage::Fetch,
            },
        ))
    };

    if pc % INSTRUCTION_SIZE != 0 {
        return fault(Trap::InstructionAddressMisaligned(pc));
    }
    if !port.is_mapped(pc, INSTRUCTION_SIZE) {
        return fault(Trap::InstructionAccessFault(pc));
    }
    if !stream.contains(&pc) {
        return FetchOutcome::Idle;
    }

    let inst = match port.fetch(pc) {
        Access::Ready(inst) => inst,
        Access::Stall(cause) => {
            trace!("IF  pc={pc:#x} # STALL: {cause:?}");
            return FetchOutcome::Stalled(cause);
        }
    };

    let pred_next = if is_control_flow(inst) {
        predictor.predict(pc).next_pc(pc)
    } else {
        pc.wrapping_add(INSTRUCTION_SIZE)
    };

    trace!("IF  pc={pc:#x} inst={inst:#010x} next={pred_next:#x}");
    FetchOutcome::Fetched(Slot::fetched(pc, inst, pred_next))
}
