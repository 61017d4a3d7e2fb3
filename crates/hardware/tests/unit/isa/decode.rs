//! Instruction Decoder Tests.
//!
//! Verifies field extraction and the sign-extended immediates of every
//! instruction format, including round-trips through the test encoder.

use proptest::prelude::*;
use rv64pipe_core::isa::decode::{decode, imm_b, imm_i, imm_j, imm_s, imm_u};
use rv64pipe_core::isa::instruction::InstructionBits;
use rv64pipe_core::isa::rv64i::opcodes;

use crate::common::builder::instruction::asm;

// ══════════════════════════════════════════════════════════
// 1. Field extraction
// ══════════════════════════════════════════════════════════

#[test]
fn r_type_fields() {
    let inst = asm().sub(3, 4, 5).build();
    let d = decode(inst);
    assert_eq!(d.opcode, opcodes::OP_REG);
    assert_eq!((d.rd, d.rs1, d.rs2), (3, 4, 5));
    assert_eq!(d.funct3, 0);
    assert_eq!(d.funct7, 0b0100000);
    assert_eq!(d.imm, 0);
    assert_eq!(d.raw, inst);
}

#[test]
fn field_accessors_match_decoder() {
    let inst = asm().ld(9, 2, 16).build();
    assert_eq!(inst.opcode(), opcodes::OP_LOAD);
    assert_eq!(inst.rd(), 9);
    assert_eq!(inst.rs1(), 2);
    assert_eq!(inst.funct3(), 0b011);
}

// ══════════════════════════════════════════════════════════
// 2. Immediates
// ══════════════════════════════════════════════════════════

#[test]
fn i_type_immediate_is_sign_extended() {
    assert_eq!(imm_i(asm().addi(1, 0, -1).build()), -1);
    assert_eq!(imm_i(asm().addi(1, 0, 2047).build()), 2047);
    assert_eq!(imm_i(asm().addi(1, 0, -2048).build()), -2048);
}

#[test]
fn s_type_immediate_is_reassembled() {
    assert_eq!(imm_s(asm().sd(2, 1, -8).build()), -8);
    assert_eq!(imm_s(asm().sd(2, 1, 2040).build()), 2040);
}

#[test]
fn b_type_immediate_is_even_and_signed() {
    assert_eq!(imm_b(asm().beq(1, 2, 8).build()), 8);
    assert_eq!(imm_b(asm().beq(1, 2, -4).build()), -4);
    assert_eq!(imm_b(asm().bne(1, 2, -4096).build()), -4096);
    assert_eq!(imm_b(asm().bne(1, 2, 4094).build()), 4094);
}

#[test]
fn u_type_immediate_occupies_upper_bits() {
    assert_eq!(imm_u(asm().lui(1, 0x12345).build()), 0x1234_5000);
    assert_eq!(imm_u(asm().lui(1, 0x80000).build()), -0x8000_0000);
}

#[test]
fn j_type_immediate_is_reassembled() {
    assert_eq!(imm_j(asm().jal(1, 2048).build()), 2048);
    assert_eq!(imm_j(asm().jal(1, -2).build()), -2);
    assert_eq!(imm_j(asm().jal(0, 0xF_FFFE).build()), 0xF_FFFE);
}

#[test]
fn unknown_opcode_decodes_with_zero_immediate() {
    let d = decode(0xFFFF_FFFF);
    assert_eq!(d.opcode, 0x7F);
    assert_eq!(d.imm, 0);
}

proptest! {
    #[test]
    fn branch_offsets_round_trip(half in -2048i32..2048) {
        let offset = half * 2;
        prop_assert_eq!(decode(asm().blt(3, 4, offset).build()).imm, i64::from(offset));
    }

    #[test]
    fn jump_offsets_round_trip(half in -(1i32 << 19)..(1i32 << 19)) {
        let offset = half * 2;
        prop_assert_eq!(decode(asm().jal(1, offset).build()).imm, i64::from(offset));
    }

    #[test]
    fn store_offsets_round_trip(offset in -2048i32..2048) {
        prop_assert_eq!(decode(asm().sw(3, 4, offset).build()).imm, i64::from(offset));
    }
}
