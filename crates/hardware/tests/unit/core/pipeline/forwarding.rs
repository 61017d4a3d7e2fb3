//! Forwarding Unit Tests.
//!
//! The slot in the `Execute5` latch feeds FROM_MEM (ALU results only), the
//! slot in the `Memory` latch feeds FROM_WB, and FROM_MEM wins when both match.

use rstest::rstest;
use rv64pipe_core::common::{RegisterFile, Trap};
use rv64pipe_core::core::pipeline::{BypassNetwork, ForwardSelect, ForwardingUnit, Slot};

use crate::common::builder::SlotBuilder;

fn alu(rd: usize, val: u64) -> Slot {
    SlotBuilder::new().alu(rd, val).build()
}

// ══════════════════════════════════════════════════════════
// 1. Selection
// ══════════════════════════════════════════════════════════

#[test]
fn no_candidates_reads_register_file() {
    assert_eq!(ForwardingUnit::select(5, None, None), ForwardSelect::None);
}

#[rstest]
#[case::mem_only(Some(5), None, ForwardSelect::FromMem)]
#[case::wb_only(None, Some(5), ForwardSelect::FromWb)]
#[case::both_prefer_mem(Some(5), Some(5), ForwardSelect::FromMem)]
#[case::mem_other_reg(Some(6), Some(5), ForwardSelect::FromWb)]
#[case::neither_matches(Some(6), Some(7), ForwardSelect::None)]
fn selection_priority(
    #[case] mem_rd: Option<usize>,
    #[case] wb_rd: Option<usize>,
    #[case] expected: ForwardSelect,
) {
    let mem = mem_rd.map(|rd| alu(rd, 1));
    let wb = wb_rd.map(|rd| alu(rd, 2));
    assert_eq!(ForwardingUnit::select(5, mem.as_ref(), wb.as_ref()), expected);
}

#[test]
fn x0_is_never_forwarded() {
    let p = alu(0, 9);
    assert_eq!(ForwardingUnit::select(0, Some(&p), Some(&p)), ForwardSelect::None);
}

#[test]
fn load_in_execute5_is_not_a_mem_candidate() {
    let load = SlotBuilder::new().load(5, 0).build();
    assert_eq!(ForwardingUnit::select(5, Some(&load), None), ForwardSelect::None);

    let older = alu(5, 3);
    assert_eq!(ForwardingUnit::select(5, Some(&load), Some(&older)), ForwardSelect::FromWb);
}

#[test]
fn load_in_memory_latch_forwards_from_wb() {
    let load = SlotBuilder::new().load(5, 0xAA).build();
    assert_eq!(ForwardingUnit::select(5, None, Some(&load)), ForwardSelect::FromWb);
}

#[test]
fn non_writers_are_ignored() {
    let mut store = SlotBuilder::new().store(1, 2).build();
    store.rd = 5;
    let faulted = SlotBuilder::new().alu(5, 1).faulted(Trap::Breakpoint(0)).build();
    let bad = SlotBuilder::new().alu(5, 1).decode_error().build();

    assert_eq!(ForwardingUnit::select(5, Some(&store), None), ForwardSelect::None);
    assert_eq!(ForwardingUnit::select(5, Some(&faulted), None), ForwardSelect::None);
    assert_eq!(ForwardingUnit::select(5, None, Some(&bad)), ForwardSelect::None);
}

// ══════════════════════════════════════════════════════════
// 2. Bypass network values
// ══════════════════════════════════════════════════════════

#[test]
fn bypass_returns_value_of_selected_source() {
    let mut regs = RegisterFile::new();
    regs.write(5, 100);
    regs.write(6, 200);
    regs.write(7, 300);
    let mem = alu(5, 111);
    let wb = SlotBuilder::new().load(6, 222).build();
    let bypass = BypassNetwork {
        regs: &regs,
        mem: Some(&mem),
        wb: Some(&wb),
    };

    assert_eq!(bypass.read(5), (111, ForwardSelect::FromMem));
    assert_eq!(bypass.read(6), (222, ForwardSelect::FromWb));
    assert_eq!(bypass.read(7), (300, ForwardSelect::None));
    assert_eq!(bypass.read(0), (0, ForwardSelect::None));
}
