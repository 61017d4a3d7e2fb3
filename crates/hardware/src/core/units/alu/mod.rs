//! Arithmetic Logic Unit (ALU).
//!
//! The ALU is a pure evaluator used at the final Execute micro-stage. It
//! handles arithmetic, logical operations and shifts for both 64-bit and
//! narrow 32-bit operands, the six branch comparisons, link-address
//! production and load/store address computation.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Lui, Auipc, Link, Address
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra
//! - [`compare`]:    Beq, Bne, Blt, Bge, Bltu, Bgeu

/// Integer arithmetic and address operations.
pub mod arithmetic;

/// Branch comparisons.
pub mod compare;

/// Bitwise logical and set-less-than operations.
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::core::pipeline::signals::AluOp;

/// Output bundle of one ALU evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluOutput {
    /// Computed value. Branch compares produce `a - b`.
    pub result: u64,
    /// Outcome of a branch comparison; false for every other function.
    pub branch_taken: bool,
    /// `result == 0`.
    pub zero: bool,
    /// Bit 63 of `result`.
    pub negative: bool,
}

/// Arithmetic Logic Unit for integer operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alu;

impl Alu {
    /// Evaluates one ALU function.
    ///
    /// # Arguments
    ///
    /// * `op`     - The ALU function to perform.
    /// * `a`      - First operand.
    /// * `b`      - Second operand (also the shift amount).
    /// * `narrow` - Operate on the low 32 bits and sign-extend the result.
    ///
    /// # Returns
    ///
    /// The result together with the branch outcome and the zero/negative flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use rv64pipe_core::core::pipeline::signals::AluOp;
    /// use rv64pipe_core::core::units::alu::Alu;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8, false).result, 50);
    ///
    /// // 32-bit addition wraps and sign-extends.
    /// assert_eq!(Alu::execute(AluOp::Add, 0x7FFF_FFFF, 1, true).result, 0xFFFF_FFFF_8000_0000);
    ///
    /// let out = Alu::execute(AluOp::Blt, -5_i64 as u64, 10, false);
    /// assert!(out.branch_taken);
    /// assert!(out.negative);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64, narrow: bool) -> AluOutput {
        let (result, branch_taken) = match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Lui
            | AluOp::Auipc
            | AluOp::Link
            | AluOp::Address => (arithmetic::execute(op, a, b, narrow), false),

            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                (logic::execute(op, a, b, narrow), false)
            }

            AluOp::Sll | AluOp::Srl | AluOp::Sra => (shifts::execute(op, a, b, narrow), false),

            AluOp::Beq | AluOp::Bne | AluOp::Blt | AluOp::Bge | AluOp::Bltu | AluOp::Bgeu => {
                (a.wrapping_sub(b), compare::taken(op, a, b))
            }
        };

        AluOutput {
            result,
            branch_taken,
            zero: result == 0,
            negative: (result as i64) < 0,
        }
    }
}

/// Sign-extends the low 32 bits of `v` to 64 bits.
#[inline(always)]
pub(crate) const fn sext32(v: u64) -> u64 {
    v as i32 as i64 as u64
}
