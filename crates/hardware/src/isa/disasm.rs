//! RV64I disassembler.
//!
//! Renders an instruction word as assembler text for trace output, retirement
//! logs and test diagnostics. Unknown encodings render as `unknown`.
//!
//! ```
//! use rv64pipe_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x00A00513), "addi a0, zero, 10");
//! ```

use crate::isa::abi::reg_name as x;
use crate::isa::decode::{imm_b, imm_i, imm_j, imm_s, imm_u};
use crate::isa::instruction::InstructionBits;
use crate::isa::rv64i::{funct3 as f3, funct7 as f7, opcodes as op};

/// Disassembles a 32-bit instruction into a human-readable string.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    let (rd, rs1, rs2) = (inst.rd(), inst.rs1(), inst.rs2());
    let funct3 = inst.funct3();

    match inst.opcode() {
        op::OP_LUI => format!("lui {}, {:#x}", x(rd), (imm_u(inst) >> 12) & 0xFFFFF),
        op::OP_AUIPC => format!("auipc {}, {:#x}", x(rd), (imm_u(inst) >> 12) & 0xFFFFF),
        op::OP_JAL => format!("jal {}, {}", x(rd), imm_j(inst)),
        op::OP_JALR => format!("jalr {}, {}({})", x(rd), imm_i(inst), x(rs1)),
        op::OP_BRANCH => {
            let mn = match funct3 {
                f3::BEQ => "beq",
                f3::BNE => "bne",
                f3::BLT => "blt",
                f3::BGE => "bge",
                f3::BLTU => "bltu",
                f3::BGEU => "bgeu",
                _ => return unknown(),
            };
            format!("{mn} {}, {}, {}", x(rs1), x(rs2), imm_b(inst))
        }
        op::OP_LOAD => {
            let mn = match funct3 {
                f3::LB => "lb",
                f3::LH => "lh",
                f3::LW => "lw",
                f3::LD => "ld",
                f3::LBU => "lbu",
                f3::LHU => "lhu",
                f3::LWU => "lwu",
                _ => return unknown(),
            };
            format!("{mn} {}, {}({})", x(rd), imm_i(inst), x(rs1))
        }
        op::OP_STORE => {
            let mn = match funct3 {
                f3::SB => "sb",
                f3::SH => "sh",
                f3::SW => "sw",
                f3::SD => "sd",
                _ => return unknown(),
            };
            format!("{mn} {}, {}({})", x(rs2), imm_s(inst), x(rs1))
        }
        op::OP_IMM | op::OP_IMM_32 => op_imm(inst, inst.opcode() == op::OP_IMM_32),
        op::OP_REG | op::OP_REG_32 => op_reg(inst, inst.opcode() == op::OP_REG_32),
        op::OP_MISC_MEM => "fence".to_string(),
        op::OP_SYSTEM => match inst {
            op::ECALL => "ecall".to_string(),
            op::EBREAK => "ebreak".to_string(),
            _ => unknown(),
        },
        _ => unknown(),
    }
}

fn unknown() -> String {
    "unknown".to_string()
}

fn op_imm(inst: u32, narrow: bool) -> String {
    let (rd, rs1) = (x(inst.rd()), x(inst.rs1()));
    let imm = imm_i(inst);
    let shamt = imm & if narrow { 0x1F } else { 0x3F };
    let w = if narrow { "w" } else { "" };

    match (inst.funct3(), narrow) {
        (f3::ADD_SUB, _) => format!("addi{w} {rd}, {rs1}, {imm}"),
        (f3::SLT, false) => format!("slti {rd}, {rs1}, {imm}"),
        (f3::SLTU, false) => format!("sltiu {rd}, {rs1}, {imm}"),
        (f3::XOR, false) => format!("xori {rd}, {rs1}, {imm}"),
        (f3::OR, false) => format!("ori {rd}, {rs1}, {imm}"),
        (f3::AND, false) => format!("andi {rd}, {rs1}, {imm}"),
        (f3::SLL, _) => format!("slli{w} {rd}, {rs1}, {shamt}"),
        (f3::SRL_SRA, _) if inst.funct7() & f7::SRA != 0 => {
            format!("srai{w} {rd}, {rs1}, {shamt}")
        }
        (f3::SRL_SRA, _) => format!("srli{w} {rd}, {rs1}, {shamt}"),
        _ => unknown(),
    }
}

fn op_reg(inst: u32, narrow: bool) -> String {
    let mn = match (inst.funct3(), inst.funct7(), narrow) {
        (f3::ADD_SUB, f7::DEFAULT, false) => "add",
        (f3::ADD_SUB, f7::SUB, false) => "sub",
        (f3::SLL, f7::DEFAULT, false) => "sll",
        (f3::SLT, f7::DEFAULT, false) => "slt",
        (f3::SLTU, f7::DEFAULT, false) => "sltu",
        (f3::XOR, f7::DEFAULT, false) => "xor",
        (f3::SRL_SRA, f7::DEFAULT, false) => "srl",
        (f3::SRL_SRA, f7::SRA, false) => "sra",
        (f3::OR, f7::DEFAULT, false) => "or",
        (f3::AND, f7::DEFAULT, false) => "and",
        (f3::ADD_SUB, f7::DEFAULT, true) => "addw",
        (f3::ADD_SUB, f7::SUB, true) => "subw",
        (f3::SLL, f7::DEFAULT, true) => "sllw",
        (f3::SRL_SRA, f7::DEFAULT, true) => "srlw",
        (f3::SRL_SRA, f7::SRA, true) => "sraw",
        _ => return unknown(),
    };
    format!("{mn} {}, {}, {}", x(inst.rd()), x(inst.rs1()), x(inst.rs2()))
}
