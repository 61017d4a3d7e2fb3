//! Commit and Writeback Stage Tests.

use pretty_assertions::assert_eq;
use rv64pipe_core::common::{ExceptionRecord, RegisterFile, Trap};
use rv64pipe_core::core::pipeline::Stage;
use rv64pipe_core::core::pipeline::stages::{commit_stage, wb_stage};
use rv64pipe_core::core::retire::{RetireOutcome, RetireRecord};

use crate::common::builder::SlotBuilder;

const PC: u64 = 0x8000_0010;

#[test]
fn writeback_selects_load_data() {
    let mut load = SlotBuilder::new().load(6, 0x77).build();
    load.result = 0x8000_2000;
    assert_eq!(wb_stage(load).result, 0x77);

    let alu = SlotBuilder::new().alu(6, 5).build();
    assert_eq!(wb_stage(alu).result, 5);
}

#[test]
fn normal_commit_writes_destination() {
    let mut regs = RegisterFile::new();
    let slot = SlotBuilder::new().pc(PC).alu(3, 99).build();
    let record = commit_stage(&slot, &mut regs, 12);

    assert_eq!(regs.read(3), 99);
    assert_eq!(
        record,
        RetireRecord {
            cycle: 12,
            pc: PC,
            inst: 0,
            rd: Some(3),
            value: 99,
            branch_taken: false,
            branch_target: None,
            mem: None,
            outcome: RetireOutcome::Normal,
        }
    );
}

#[test]
fn x0_destination_reports_no_write() {
    let mut regs = RegisterFile::new();
    let slot = SlotBuilder::new().alu(0, 5).build();
    let record = commit_stage(&slot, &mut regs, 1);
    assert_eq!(record.rd, None);
    assert_eq!(record.value, 0);
    assert_eq!(regs.read(0), 0);
}

#[test]
fn faulted_slot_changes_nothing() {
    let mut regs = RegisterFile::new();
    let slot = SlotBuilder::new()
        .pc(PC)
        .alu(3, 99)
        .faulted(Trap::Breakpoint(PC))
        .build();
    let record = commit_stage(&slot, &mut regs, 1);

    assert_eq!(regs.read(3), 0);
    assert_eq!(record.rd, None);
    assert_eq!(
        record.outcome,
        RetireOutcome::Exception(ExceptionRecord {
            trap: Trap::Breakpoint(PC),
            pc: PC,
            stage: Stage::Execute5,
        })
    );
    assert!(!record.is_normal());
}

#[test]
fn decode_error_retires_as_no_op() {
    let mut regs = RegisterFile::new();
    let slot = SlotBuilder::new().alu(3, 99).decode_error().build();
    let record = commit_stage(&slot, &mut regs, 1);
    assert_eq!(record.outcome, RetireOutcome::DecodeError);
    assert_eq!(regs.read(3), 0);
}
