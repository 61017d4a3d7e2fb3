//! Memory Access (MEM) Stage.
//!
//! This module implements the data-memory stage. It performs the following:
//! 1. **Loads:** Reads through the data channel with sign or zero extension.
//! 2. **Stores:** Writes the low `width` bytes of the source operand.
//! 3. **Stall Reporting:** Returns the cache's stall cause so the controller
//!    can hold the slot and retry next cycle.
//!
//! Addresses were checked for alignment and range at `Execute5`, so faulting
//! slots arrive here already tagged and skip the access.

use tracing::trace;

use crate::common::{AccessType, MemRequest};
use crate::core::pipeline::slot::Slot;
use crate::core::retire::MemAccessRecord;
use crate::core::units::cache::{Access, DataPort};

/// Executes the memory stage.
///
/// # Arguments
///
/// * `slot` - Slot leaving `Execute5`.
/// * `port` - Data-side memory channel.
///
/// # Returns
///
/// The updated slot, or the stall cause when the access must be retried.
pub fn mem_stage(mut slot: Slot, port: &mut impl DataPort) -> Access<Slot> {
    let ctrl = slot.ctrl;
    if slot.exception.is_some() || slot.decode_error || !(ctrl.mem_read || ctrl.mem_write) {
        return Access::Ready(slot);
    }

    let addr = slot.result;
    let req = if ctrl.mem_read {
        MemRequest::read(addr, ctrl.width, ctrl.signed_load)
    } else {
        let bits = ctrl.width.bytes() * 8;
        let data = if bits >= 64 {
            slot.rs2_val
        } else {
            slot.rs2_val & ((1 << bits) - 1)
        };
        MemRequest::write(addr, ctrl.width, data)
    };

    match port.access(req) {
        Access::Ready(val) => {
            let data = if req.kind == AccessType::Read {
                slot.load_data = val;
                val
            } else {
                req.data
            };
            trace!("MEM pc={:#x} {:?} addr={addr:#x} data={data:#x}", slot.pc, req.kind);
            slot.mem = Some(MemAccessRecord {
                addr,
                width: ctrl.width,
                data,
                kind: req.kind,
            });
            Access::Ready(slot)
        }
        Access::Stall(cause) => {
            trace!("MEM pc={:#x} addr={addr:#x} # STALL: {cause:?}", slot.pc);
            Access::Stall(cause)
        }
    }
}
