//! Disassembler Tests.

use rstest::rstest;
use rv64pipe_core::isa::disasm::disassemble;

use crate::common::builder::instruction::asm;

#[rstest]
#[case(0x00A0_0513, "addi a0, zero, 10")]
#[case(asm().add(2, 1, 1).build(), "add sp, ra, ra")]
#[case(asm().subw(10, 11, 12).build(), "subw a0, a1, a2")]
#[case(asm().sra(5, 6, 7).build(), "sra t0, t1, t2")]
#[case(asm().slli(1, 1, 63).build(), "slli ra, ra, 63")]
#[case(asm().srai(1, 1, 3).build(), "srai ra, ra, 3")]
#[case(asm().addiw(1, 2, -1).build(), "addiw ra, sp, -1")]
#[case(asm().ld(10, 2, 8).build(), "ld a0, 8(sp)")]
#[case(asm().lbu(10, 2, -1).build(), "lbu a0, -1(sp)")]
#[case(asm().sd(2, 11, 16).build(), "sd a1, 16(sp)")]
#[case(asm().beq(1, 0, 8).build(), "beq ra, zero, 8")]
#[case(asm().bgeu(1, 2, -16).build(), "bgeu ra, sp, -16")]
#[case(asm().jal(1, -4).build(), "jal ra, -4")]
#[case(asm().jalr(0, 1, 0).build(), "jalr zero, 0(ra)")]
#[case(asm().lui(5, 0x12345).build(), "lui t0, 0x12345")]
#[case(asm().auipc(5, 1).build(), "auipc t0, 0x1")]
#[case(asm().ecall().build(), "ecall")]
#[case(asm().ebreak().build(), "ebreak")]
#[case(asm().fence().build(), "fence")]
fn renders_mnemonic_and_operands(#[case] inst: u32, #[case] text: &str) {
    assert_eq!(disassemble(inst), text);
}

#[rstest]
#[case::unknown_opcode(0xFFFF_FFFF)]
#[case::all_zero(0x0000_0000)]
#[case::bad_branch_funct3(asm().beq(1, 2, 8).funct3(0b010).build())]
#[case::bad_system(0x0020_0073)]
fn unrecognized_words_render_unknown(#[case] inst: u32) {
    assert_eq!(disassemble(inst), "unknown");
}
