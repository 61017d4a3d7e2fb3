//! Operand forwarding.
//!
//! Instructions read their operands at the evaluation point (`Execute5`).
//! Results of the two slots directly ahead of it are not yet in the register
//! file, so the forwarding unit substitutes them:
//! 1. **FROM_MEM:** The slot in the `Execute5` latch, about to access memory (ALU results only).
//! 2. **FROM_WB:** The slot in the `Memory` latch (ALU result or load data).
//! 3. **NONE:** The register file, which already holds every older result.

use serde::Serialize;
use tracing::trace;

use crate::common::RegisterFile;
use crate::core::pipeline::slot::Slot;

/// Operand source chosen by the forwarding unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ForwardSelect {
    /// Register file value.
    #[default]
    None,
    /// Result of the slot about to enter the Memory stage.
    FromMem,
    /// Result of the slot about to enter the Writeback stage.
    FromWb,
}

/// Forward-select logic.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardingUnit;

impl ForwardingUnit {
    /// Picks the source for one operand.
    ///
    /// A candidate is eligible when it writes a nonzero register equal to
    /// `src`. The Memory-side candidate must also not be a load, since its
    /// data does not exist yet. Memory beats Writeback.
    ///
    /// # Arguments
    ///
    /// * `src` - Source register index of the consumer.
    /// * `mem` - Slot in the `Execute5` latch.
    /// * `wb` - Slot in the `Memory` latch.
    pub fn select(src: usize, mem: Option<&Slot>, wb: Option<&Slot>) -> ForwardSelect {
        if src == 0 {
            return ForwardSelect::None;
        }
        let matches = |s: &&Slot| s.writes_register() && s.rd == src;
        if mem.filter(matches).is_some_and(|s| !s.ctrl.mem_read) {
            return ForwardSelect::FromMem;
        }
        if wb.filter(matches).is_some() {
            return ForwardSelect::FromWb;
        }
        ForwardSelect::None
    }
}

/// Read-only view of every operand source visible to `Execute5`.
#[derive(Clone, Copy, Debug)]
pub struct BypassNetwork<'a> {
    /// Architectural register file.
    pub regs: &'a RegisterFile,
    /// FROM_MEM candidate.
    pub mem: Option<&'a Slot>,
    /// FROM_WB candidate.
    pub wb: Option<&'a Slot>,
}

impl BypassNetwork<'_> {
    /// Reads register `idx` through the bypass network.
    ///
    /// # Returns
    ///
    /// The operand value and the selector that produced it.
    pub fn read(&self, idx: usize) -> (u64, ForwardSelect) {
        let sel = ForwardingUnit::select(idx, self.mem, self.wb);
        let val = match (sel, self.mem, self.wb) {
            (ForwardSelect::FromMem, Some(s), _) | (ForwardSelect::FromWb, _, Some(s)) => {
                s.produced_value()
            }
            _ => self.regs.read(idx),
        };
        if sel != ForwardSelect::None {
            trace!("FWD x{idx} <- {val:#x} ({sel:?})");
        }
        (val, sel)
    }
}
