//! Writeback (WB) Stage.
//!
//! Selects the value the slot will commit: load data for loads, the ALU
//! result (or link address) for everything else. The register file itself is
//! only written at Commit.

use tracing::trace;

use crate::core::pipeline::slot::Slot;

/// Executes the writeback stage.
pub fn wb_stage(mut slot: Slot) -> Slot {
    if slot.ctrl.mem_read {
        slot.result = slot.load_data;
    }
    if slot.writes_register() {
        trace!("WB  pc={:#x} x{} <- {:#x}", slot.pc, slot.rd, slot.result);
    }
    slot
}
