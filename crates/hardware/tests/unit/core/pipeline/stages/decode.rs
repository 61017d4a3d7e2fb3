//! Decode Stage Tests.
//!
//! Checks the control signals and register selection of each instruction
//! class. Unused source registers must read as `x0`.

use pretty_assertions::assert_eq;
use rv64pipe_core::common::Trap;
use rv64pipe_core::core::pipeline::signals::{AluOp, MemWidth, OpASrc, OpBSrc, SystemOp};
use rv64pipe_core::core::pipeline::stages::decode::control_signals;
use rv64pipe_core::core::pipeline::stages::decode_stage;
use rv64pipe_core::isa::abi::{REG_A0, REG_A7};
use rv64pipe_core::isa::decode::decode;

use crate::common::builder::SlotBuilder;
use crate::common::builder::instruction::asm;

const PC: u64 = 0x8000_0000;

#[test]
fn alu_immediate() {
    let s = SlotBuilder::decoded(PC, asm().addi(3, 4, -7).build()).build();
    assert!(s.ctrl.reg_write);
    assert_eq!((s.rd, s.rs1, s.rs2), (3, 4, 0));
    assert_eq!(s.imm, -7);
    assert_eq!(s.ctrl.alu, AluOp::Add);
    assert_eq!(s.ctrl.b_src, OpBSrc::Imm);
    assert!(!s.decode_error);
}

#[test]
fn register_register() {
    let s = SlotBuilder::decoded(PC, asm().sub(3, 4, 5).build()).build();
    assert_eq!((s.rd, s.rs1, s.rs2), (3, 4, 5));
    assert_eq!(s.ctrl.alu, AluOp::Sub);
    assert_eq!(s.ctrl.b_src, OpBSrc::Reg2);
}

#[test]
fn word_forms_set_rv32() {
    let s = SlotBuilder::decoded(PC, asm().addw(1, 2, 3).build()).build();
    assert!(s.ctrl.is_rv32);
    let s = SlotBuilder::decoded(PC, asm().addiw(1, 2, 3).build()).build();
    assert!(s.ctrl.is_rv32);
}

#[test]
fn load_signals() {
    let s = SlotBuilder::decoded(PC, asm().lbu(6, 5, 3).build()).build();
    assert!(s.ctrl.mem_read && s.ctrl.reg_write);
    assert_eq!(s.ctrl.width, MemWidth::Byte);
    assert!(!s.ctrl.signed_load);
    assert_eq!((s.rd, s.rs1, s.rs2), (6, 5, 0));
}

#[test]
fn store_writes_no_register() {
    let s = SlotBuilder::decoded(PC, asm().sw(5, 6, 8).build()).build();
    assert!(s.ctrl.mem_write);
    assert!(!s.ctrl.reg_write);
    assert_eq!(s.ctrl.width, MemWidth::Word);
    assert_eq!((s.rd, s.rs1, s.rs2), (0, 5, 6));
}

#[test]
fn branch_reads_both_sources() {
    let s = SlotBuilder::decoded(PC, asm().bgeu(1, 2, -16).build()).build();
    assert!(s.ctrl.branch);
    assert_eq!(s.ctrl.alu, AluOp::Bgeu);
    assert_eq!((s.rd, s.rs1, s.rs2), (0, 1, 2));
    assert_eq!(s.imm, -16);
}

#[test]
fn jumps_link_through_the_alu() {
    let jal = SlotBuilder::decoded(PC, asm().jal(1, 64).build()).build();
    assert!(jal.ctrl.jump && !jal.ctrl.jump_reg);
    assert_eq!(jal.ctrl.alu, AluOp::Link);
    assert_eq!(jal.ctrl.a_src, OpASrc::Pc);
    assert_eq!((jal.rd, jal.rs1, jal.rs2), (1, 0, 0));

    let jalr = SlotBuilder::decoded(PC, asm().jalr(0, 1, 0).build()).build();
    assert!(jalr.ctrl.jump_reg);
    assert_eq!((jalr.rd, jalr.rs1), (0, 1));
}

#[test]
fn upper_immediates_read_no_register() {
    let lui = SlotBuilder::decoded(PC, asm().lui(5, 0x12345).build()).build();
    assert_eq!(lui.ctrl.a_src, OpASrc::Zero);
    assert_eq!((lui.rd, lui.rs1, lui.rs2), (5, 0, 0));

    let auipc = SlotBuilder::decoded(PC, asm().auipc(5, 1).build()).build();
    assert_eq!(auipc.ctrl.alu, AluOp::Auipc);
    assert_eq!(auipc.rs1, 0);
}

#[test]
fn system_instructions() {
    let ecall = SlotBuilder::decoded(PC, asm().ecall().build()).build();
    assert_eq!(ecall.ctrl.system, SystemOp::Ecall);
    assert_eq!((ecall.rd, ecall.rs1, ecall.rs2), (0, REG_A7, REG_A0));
    assert!(!ecall.ctrl.reg_write);

    let ebreak = SlotBuilder::decoded(PC, asm().ebreak().build()).build();
    assert_eq!(ebreak.ctrl.system, SystemOp::Ebreak);
    assert_eq!((ebreak.rs1, ebreak.rs2), (0, 0));

    let fence = SlotBuilder::decoded(PC, asm().fence().build()).build();
    assert!(!fence.decode_error);
    assert!(!fence.ctrl.reg_write);
}

#[test]
fn unknown_encoding_is_flagged() {
    let s = SlotBuilder::decoded(PC, 0xFFFF_FFFF).build();
    assert!(s.decode_error);
    assert!(!s.writes_register());
    assert!(control_signals(&decode(0)).is_none());
}

#[test]
fn bad_funct3_is_rejected() {
    let bad_branch = asm().beq(1, 2, 8).funct3(0b010).build();
    assert!(control_signals(&decode(bad_branch)).is_none());
    let bad_load = asm().ld(1, 2, 0).funct3(0b111).build();
    assert!(control_signals(&decode(bad_load)).is_none());
}

#[test]
fn faulted_slot_passes_through() {
    let slot = SlotBuilder::new()
        .pc(PC + 2)
        .faulted(Trap::InstructionAddressMisaligned(PC + 2))
        .build();
    assert_eq!(decode_stage(slot.clone()), slot);
}
