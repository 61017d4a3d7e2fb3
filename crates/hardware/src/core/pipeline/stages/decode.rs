//! Decode stage.
//!
//! Turns a fetched word into the slot's control bits:
//! 1. **Decoding:** Splits the raw word into fields with the ISA decoder.
//! 2. **Control Generation:** Produces ALU, memory and system control signals.
//! 3. **Register Selection:** Names the destination and the source registers
//!    actually read; unused sources are reported as `x0` so they never match
//!    a producer in the hazard or forwarding logic.
//! 4. **Fault Marking:** Unrecognized encodings become no-ops flagged as decode errors.

use tracing::trace;

use crate::core::pipeline::signals::{AluOp, ControlSignals, MemWidth, OpASrc, OpBSrc, SystemOp};
use crate::core::pipeline::slot::Slot;
use crate::isa::abi;
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::rv64i::{funct3, funct7, opcodes};

/// Control signals plus the registers an instruction touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    /// Control signals.
    pub ctrl: ControlSignals,
    /// Destination register (0 when nothing is written).
    pub rd: usize,
    /// First source register (0 when unused).
    pub rs1: usize,
    /// Second source register (0 when unused).
    pub rs2: usize,
}

/// Executes the instruction decode stage.
///
/// Slots that already carry an exception pass through untouched.
pub fn decode_stage(mut slot: Slot) -> Slot {
    if slot.exception.is_some() {
        return slot;
    }

    let d = decode(slot.inst);
    slot.decoded = d;
    slot.imm = d.imm;

    match control_signals(&d) {
        Some(ops) => {
            slot.ctrl = ops.ctrl;
            slot.rd = ops.rd;
            slot.rs1 = ops.rs1;
            slot.rs2 = ops.rs2;
            trace!(
                "ID  pc={:#x} rd=x{} rs1=x{} rs2=x{} imm={:#x} alu={:?}",
                slot.pc, slot.rd, slot.rs1, slot.rs2, slot.imm, slot.ctrl.alu
            );
        }
        None => {
            slot.decode_error = true;
            trace!("ID  pc={:#x} inst={:#010x} # DECODE ERROR", slot.pc, slot.inst);
        }
    }
    slot
}

/// Generates the control signals for a decoded instruction.
///
/// # Returns
///
/// `None` when the encoding is not part of RV64I.
pub fn control_signals(d: &Decoded) -> Option<Operands> {
    let mut c = ControlSignals::default();
    let (mut rs1, mut rs2) = (0, 0);

    match d.opcode {
        opcodes::OP_LUI => {
            c.reg_write = true;
            c.a_src = OpASrc::Zero;
            c.alu = AluOp::Lui;
        }
        opcodes::OP_AUIPC => {
            c.reg_write = true;
            c.a_src = OpASrc::Pc;
            c.alu = AluOp::Auipc;
        }
        opcodes::OP_JAL => {
            c.reg_write = true;
            c.jump = true;
            c.a_src = OpASrc::Pc;
            c.b_src = OpBSrc::Zero;
            c.alu = AluOp::Link;
        }
        opcodes::OP_JALR if d.funct3 == 0 => {
            c.reg_write = true;
            c.jump = true;
            c.jump_reg = true;
            c.a_src = OpASrc::Pc;
            c.b_src = OpBSrc::Zero;
            c.alu = AluOp::Link;
            rs1 = d.rs1;
        }
        opcodes::OP_BRANCH => {
            c.branch = true;
            c.b_src = OpBSrc::Reg2;
            c.alu = match d.funct3 {
                funct3::BEQ => AluOp::Beq,
                funct3::BNE => AluOp::Bne,
                funct3::BLT => AluOp::Blt,
                funct3::BGE => AluOp::Bge,
                funct3::BLTU => AluOp::Bltu,
                funct3::BGEU => AluOp::Bgeu,
                _ => return None,
            };
            (rs1, rs2) = (d.rs1, d.rs2);
        }
        opcodes::OP_LOAD => {
            let (width, signed) = match d.funct3 {
                funct3::LB => (MemWidth::Byte, true),
                funct3::LH => (MemWidth::Half, true),
                funct3::LW => (MemWidth::Word, true),
                funct3::LD => (MemWidth::Double, true),
                funct3::LBU => (MemWidth::Byte, false),
                funct3::LHU => (MemWidth::Half, false),
                funct3::LWU => (MemWidth::Word, false),
                _ => return None,
            };
            c.reg_write = true;
            c.mem_read = true;
            c.width = width;
            c.signed_load = signed;
            c.alu = AluOp::Address;
            rs1 = d.rs1;
        }
        opcodes::OP_STORE => {
            c.mem_write = true;
            c.width = match d.funct3 {
                funct3::SB => MemWidth::Byte,
                funct3::SH => MemWidth::Half,
                funct3::SW => MemWidth::Word,
                funct3::SD => MemWidth::Double,
                _ => return None,
            };
            c.alu = AluOp::Address;
            (rs1, rs2) = (d.rs1, d.rs2);
        }
        opcodes::OP_IMM => {
            c.reg_write = true;
            c.alu = imm_op(d.funct3, d.funct7 >> 1)?;
            rs1 = d.rs1;
        }
        opcodes::OP_IMM_32 => {
            c.reg_write = true;
            c.is_rv32 = true;
            c.alu = match (d.funct3, d.funct7) {
                (funct3::ADD_SUB, _) => AluOp::Add,
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
                _ => return None,
            };
            rs1 = d.rs1;
        }
        opcodes::OP_REG => {
            c.reg_write = true;
            c.b_src = OpBSrc::Reg2;
            c.alu = reg_op(d.funct3, d.funct7)?;
            (rs1, rs2) = (d.rs1, d.rs2);
        }
        opcodes::OP_REG_32 => {
            c.reg_write = true;
            c.is_rv32 = true;
            c.b_src = OpBSrc::Reg2;
            c.alu = match (d.funct3, d.funct7) {
                (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
                (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
                (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
                (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
                (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
                _ => return None,
            };
            (rs1, rs2) = (d.rs1, d.rs2);
        }
        opcodes::OP_MISC_MEM if matches!(d.funct3, funct3::FENCE | funct3::FENCE_I) => {}
        opcodes::OP_SYSTEM => {
            c.system = match d.raw {
                opcodes::ECALL => {
                    // Syscall number and argument are read like ordinary sources.
                    (rs1, rs2) = (abi::REG_A7, abi::REG_A0);
                    SystemOp::Ecall
                }
                opcodes::EBREAK => SystemOp::Ebreak,
                _ => return None,
            };
        }
        _ => return None,
    }

    let rd = if c.reg_write { d.rd } else { 0 };
    Some(Operands {
        ctrl: c,
        rd,
        rs1,
        rs2,
    })
}

/// ALU function of an `OP-IMM` instruction. `funct6` selects the shift kind.
fn imm_op(f3: u32, funct6: u32) -> Option<AluOp> {
    Some(match (f3, funct6) {
        (funct3::ADD_SUB, _) => AluOp::Add,
        (funct3::SLT, _) => AluOp::Slt,
        (funct3::SLTU, _) => AluOp::Sltu,
        (funct3::XOR, _) => AluOp::Xor,
        (funct3::OR, _) => AluOp::Or,
        (funct3::AND, _) => AluOp::And,
        (funct3::SLL, funct7::SHIFT_LOGICAL_6) => AluOp::Sll,
        (funct3::SRL_SRA, funct7::SHIFT_LOGICAL_6) => AluOp::Srl,
        (funct3::SRL_SRA, funct7::SHIFT_ARITH_6) => AluOp::Sra,
        _ => return None,
    })
}

/// ALU function of an `OP` instruction.
fn reg_op(f3: u32, f7: u32) -> Option<AluOp> {
    Some(match (f3, f7) {
        (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
        (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
        (funct3::SLL, funct7::DEFAULT) => AluOp::Sll,
        (funct3::SLT, funct7::DEFAULT) => AluOp::Slt,
        (funct3::SLTU, funct7::DEFAULT) => AluOp::Sltu,
        (funct3::XOR, funct7::DEFAULT) => AluOp::Xor,
        (funct3::SRL_SRA, funct7::DEFAULT) => AluOp::Srl,
        (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
        (funct3::OR, funct7::DEFAULT) => AluOp::Or,
        (funct3::AND, funct7::DEFAULT) => AluOp::And,
        _ => return None,
    })
}
