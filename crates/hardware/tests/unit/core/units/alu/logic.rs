//! ALU Logic Tests.

use rstest::rstest;
use rv64pipe_core::core::pipeline::signals::AluOp;
use rv64pipe_core::core::units::alu::Alu;

fn alu(op: AluOp, a: u64, b: u64) -> u64 {
    Alu::execute(op, a, b, false).result
}

#[rstest]
#[case(AluOp::And, 0xF0F0, 0xFF00, 0xF000)]
#[case(AluOp::Or, 0xF0F0, 0x0F0F, 0xFFFF)]
#[case(AluOp::Xor, 0xFFFF, 0x0F0F, 0xF0F0)]
#[case(AluOp::Xor, u64::MAX, u64::MAX, 0)]
fn bitwise(#[case] op: AluOp, #[case] a: u64, #[case] b: u64, #[case] expected: u64) {
    assert_eq!(alu(op, a, b), expected);
}

// ══════════════════════════════════════════════════════════
// Set-less-than: signed vs unsigned
// ══════════════════════════════════════════════════════════

#[test]
fn slt_treats_operands_as_signed() {
    assert_eq!(alu(AluOp::Slt, (-1_i64) as u64, 1), 1);
    assert_eq!(alu(AluOp::Slt, 1, (-1_i64) as u64), 0);
}

#[test]
fn sltu_treats_operands_as_unsigned() {
    assert_eq!(alu(AluOp::Sltu, (-1_i64) as u64, 1), 0);
    assert_eq!(alu(AluOp::Sltu, 0, 1), 1);
}

#[test]
fn slt_equal_operands_is_zero() {
    assert_eq!(alu(AluOp::Slt, 5, 5), 0);
    assert_eq!(alu(AluOp::Sltu, 5, 5), 0);
}
