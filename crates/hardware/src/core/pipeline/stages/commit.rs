//! Commit (CM) Stage.
//!
//! The last stage makes an instruction's effects permanent. It performs the following:
//! 1. **Register Update:** Writes `rd` unless the slot faulted or failed to decode.
//! 2. **Retirement:** Builds the `RetireRecord` exposed to observers.

use tracing::trace;

use crate::common::RegisterFile;
use crate::core::pipeline::slot::Slot;
use crate::core::retire::{RetireOutcome, RetireRecord};

/// Executes the commit stage.
///
/// # Arguments
///
/// * `slot` - Slot leaving Writeback.
/// * `regs` - Register file (sole writer).
/// * `cycle` - Current cycle number, stamped on the record.
pub fn commit_stage(slot: &Slot, regs: &mut RegisterFile, cycle: u64) -> RetireRecord {
    let outcome = match (slot.exception, slot.decode_error) {
        (Some(record), _) => RetireOutcome::Exception(record),
        (None, true) => RetireOutcome::DecodeError,
        (None, false) => RetireOutcome::Normal,
    };

    let rd = slot.writes_register().then_some(slot.rd);
    if let Some(rd) = rd {
        regs.write(rd, slot.result);
    }

    trace!("CM  pc={:#x} inst={:#010x} {outcome:?}", slot.pc, slot.inst);
    RetireRecord {
        cycle,
        pc: slot.pc,
        inst: slot.inst,
        rd,
        value: if rd.is_some() { slot.result } else { 0 },
        branch_taken: slot.branch_taken,
        branch_target: slot.branch_target,
        mem: slot.mem,
        outcome,
    }
}
