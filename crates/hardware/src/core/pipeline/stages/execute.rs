//! Instruction Execute (EX) Stages.
//!
//! The execute portion of the pipeline has five micro-stages. The first four
//! only carry the slot forward; the fifth is the evaluation point, which:
//! 1. **Operand Read:** Reads sources through the bypass network.
//! 2. **Arithmetic:** Runs the ALU, including the 32-bit narrow forms.
//! 3. **Branch Resolution:** Computes direction and target, trains the
//!    predictor and reports a redirect when the fetch-time prediction was wrong.
//! 4. **Address Checks:** Computes data addresses and raises alignment and access faults.
//! 5. **Serialization:** Handles `ECALL`/`EBREAK`, which stop the front end.

use tracing::trace;

use crate::common::constants::{INSTRUCTION_SIZE, SYS_EXIT};
use crate::common::{ExceptionRecord, Trap};
use crate::core::pipeline::Stage;
use crate::core::pipeline::forwarding::{BypassNetwork, ForwardSelect};
use crate::core::pipeline::signals::{OpASrc, OpBSrc, SystemOp};
use crate::core::pipeline::slot::Slot;
use crate::core::units::alu::Alu;
use crate::core::units::bru::BranchPredictor;

/// Everything the evaluation point reports back to the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOutcome {
    /// The evaluated slot.
    pub slot: Slot,
    /// Corrected fetch PC after a misprediction.
    pub redirect: Option<u64>,
    /// Younger slots must be discarded and fetching stopped.
    pub serialize: bool,
    /// The slot was a control-flow instruction that trained the predictor.
    pub resolved_branch: bool,
    /// Selector used for each source operand.
    pub forwards: [ForwardSelect; 2],
}

/// Executes one transport micro-stage (`Execute1`..`Execute4`).
pub const fn transport_stage(slot: Slot) -> Slot {
    slot
}

/// Executes the evaluation micro-stage (`Execute5`).
///
/// # Arguments
///
/// * `slot` - Slot leaving `Execute4`.
/// * `bypass` - Register file plus the two forwarding candidates.
/// * `predictor` - Branch predictor trained on resolution.
/// * `is_mapped` - Tells whether a data range is backed by memory.
pub fn execute_stage(
    mut slot: Slot,
    bypass: &BypassNetwork<'_>,
    predictor: &mut impl BranchPredictor,
    is_mapped: impl Fn(u64, u64) -> bool,
) -> ExecuteOutcome {
    if slot.exception.is_some() {
        return ExecuteOutcome {
            slot,
            ..ExecuteOutcome::default()
        };
    }
    if slot.decode_error {
        // A malformed control-flow word may still have steered Fetch through
        // an aliased predictor entry; execution resumes at the next word.
        let next = slot.pc.wrapping_add(INSTRUCTION_SIZE);
        let redirect = (slot.pred_next != next).then_some(next);
        if redirect.is_some() {
            trace!("X5  pc={:#x} # DECODE ERROR, refetch {next:#x}", slot.pc);
        }
        return ExecuteOutcome {
            slot,
            redirect,
            ..ExecuteOutcome::default()
        };
    }

    let (v1, s1) = bypass.read(slot.rs1);
    let (v2, s2) = bypass.read(slot.rs2);
    slot.rs1_val = v1;
    slot.rs2_val = v2;

    let pc = slot.pc;
    let ctrl = slot.ctrl;
    let a = match ctrl.a_src {
        OpASrc::Reg1 => v1,
        OpASrc::Pc => pc,
        OpASrc::Zero => 0,
    };
    let b = match ctrl.b_src {
        OpBSrc::Imm => slot.imm as u64,
        OpBSrc::Reg2 => v2,
        OpBSrc::Zero => 0,
    };
    let alu = Alu::execute(ctrl.alu, a, b, ctrl.is_rv32);
    slot.result = alu.result;

    let mut out = ExecuteOutcome {
        forwards: [s1, s2],
        ..ExecuteOutcome::default()
    };
    let fault = |trap| {
        Some(ExceptionRecord {
            trap,
            pc,
            stage: Stage::Execute5,
        })
    };

    match ctrl.system {
        SystemOp::Ecall => {
            // rs1 = a7, rs2 = a0
            if v1 == SYS_EXIT {
                slot.exit_code = Some(v2);
            } else {
                slot.exception = fault(Trap::EnvironmentCall(v1));
            }
        }
        SystemOp::Ebreak => slot.exception = fault(Trap::Breakpoint(pc)),
        SystemOp::None => {}
    }

    if ctrl.is_control_flow() {
        let (taken, target) = if ctrl.jump_reg {
            (true, v1.wrapping_add(slot.imm as u64) & !1)
        } else {
            (ctrl.jump || alu.branch_taken, pc.wrapping_add(slot.imm as u64))
        };
        slot.branch_taken = taken;
        slot.branch_target = Some(target);

        if taken && target % INSTRUCTION_SIZE != 0 {
            slot.exception = fault(Trap::InstructionAddressMisaligned(target));
        } else {
            predictor.update(pc, taken, target);
            out.resolved_branch = true;
            let actual = if taken {
                target
            } else {
                pc.wrapping_add(INSTRUCTION_SIZE)
            };
            if actual != slot.pred_next {
                trace!(
                    "X5  pc={pc:#x} # MISPREDICT predicted={:#x} actual={actual:#x}",
                    slot.pred_next
                );
                out.redirect = Some(actual);
            }
        }
    }

    if ctrl.mem_read || ctrl.mem_write {
        let addr = alu.result;
        let len = ctrl.width.bytes();
        let (misaligned, access) = if ctrl.mem_read {
            (Trap::LoadAddressMisaligned(addr), Trap::LoadAccessFault(addr))
        } else {
            (Trap::StoreAddressMisaligned(addr), Trap::StoreAccessFault(addr))
        };
        if len > 0 && addr % len != 0 {
            slot.exception = fault(misaligned);
        } else if !is_mapped(addr, len) {
            slot.exception = fault(access);
        }
    }

    if slot.exception.is_some() || ctrl.system != SystemOp::None {
        out.serialize = true;
        out.redirect = None;
    }

    trace!(
        "X5  pc={pc:#x} a={a:#x} b={b:#x} res={:#x} fwd={:?}",
        slot.result, out.forwards
    );
    out.slot = slot;
    out
}
