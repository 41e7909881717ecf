//! RV32I Instruction Decoder.
//!
//! Implements the front half of the tile: raw 32-bit words in, structured
//! `Instruction` records out. The decoder is a total function — it performs
//! no I/O, never fails, and maps every unrecognized encoding to
//! `Category::Unknown` with `Operands::None` rather than an error. Legality
//! beyond the encoding level (privilege checks, accelerator presence) is the
//! execution engine's concern.

use super::instruction::{Category, Instruction, Operands};
use super::opcodes::*;

/// Sign-extends the low `bits` bits of `value` to a signed 32-bit integer.
///
/// Implemented as a left shift to place the sign bit at bit 31 followed by
/// an arithmetic right shift back down.
pub fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

/// Decodes a raw instruction word.
///
/// The common subfields (opcode, rd, funct3, rs1, rs2, funct7) are extracted
/// for every word regardless of recognition; `category` and `operands` are
/// only populated for encodings in the supported RV32I subset.
pub fn decode(raw: u32) -> Instruction {
    let opcode = raw & 0x7f;
    let rd = ((raw >> 7) & 0x1f) as usize;
    let funct3 = (raw >> 12) & 0x7;
    let rs1 = ((raw >> 15) & 0x1f) as usize;
    let rs2 = ((raw >> 20) & 0x1f) as usize;
    let funct7 = (raw >> 25) & 0x7f;

    let mut inst = Instruction {
        raw,
        opcode,
        rd,
        funct3,
        rs1,
        rs2,
        funct7,
        category: Category::Unknown,
        operands: Operands::None,
    };

    match opcode {
        OP_ALU_REG => {
            // Ten legal funct3/funct7 pairs; funct7 selects SUB and SRA in
            // the two shared slots.
            let legal = matches!(
                (funct3, funct7),
                (0x0, F7_BASE)
                    | (0x0, F7_ALT)
                    | (0x1, F7_BASE)
                    | (0x2, F7_BASE)
                    | (0x3, F7_BASE)
                    | (0x4, F7_BASE)
                    | (0x5, F7_BASE)
                    | (0x5, F7_ALT)
                    | (0x6, F7_BASE)
                    | (0x7, F7_BASE)
            );
            if legal {
                inst.category = Category::Alu;
                inst.operands = Operands::R { rd, rs1, rs2 };
            }
        }

        OP_ALU_IMM => match funct3 {
            // SLLI takes a 5-bit shift amount in place of the immediate.
            0x1 => {
                inst.category = Category::Alu;
                inst.operands = Operands::I {
                    rd,
                    rs1,
                    imm: ((raw >> 20) & 0x1f) as i32,
                };
            }
            // SRLI/SRAI share funct3 = 5; funct7 disambiguates.
            0x5 => {
                if funct7 == F7_BASE || funct7 == F7_ALT {
                    inst.category = Category::Alu;
                    inst.operands = Operands::I {
                        rd,
                        rs1,
                        imm: ((raw >> 20) & 0x1f) as i32,
                    };
                }
            }
            _ => {
                inst.category = Category::Alu;
                inst.operands = Operands::I {
                    rd,
                    rs1,
                    imm: sign_extend(raw >> 20, 12),
                };
            }
        },

        OP_LOAD => {
            if funct3 == F3_WORD {
                inst.category = Category::Load;
                inst.operands = Operands::I {
                    rd,
                    rs1,
                    imm: sign_extend(raw >> 20, 12),
                };
            }
        }

        OP_STORE => {
            if funct3 == F3_WORD {
                let imm = ((raw >> 25) << 5) | ((raw >> 7) & 0x1f);
                inst.category = Category::Store;
                inst.operands = Operands::S {
                    rs1,
                    rs2,
                    imm: sign_extend(imm, 12),
                };
            }
        }

        OP_BRANCH => {
            if matches!(funct3, F3_BEQ | F3_BNE | F3_BLT) {
                let imm = ((raw >> 31) & 0x1) << 12
                    | ((raw >> 7) & 0x1) << 11
                    | ((raw >> 25) & 0x3f) << 5
                    | ((raw >> 8) & 0xf) << 1;
                inst.category = Category::Branch;
                inst.operands = Operands::B {
                    rs1,
                    rs2,
                    imm: sign_extend(imm, 13),
                };
            }
        }

        OP_LUI | OP_AUIPC => {
            inst.category = Category::Alu;
            inst.operands = Operands::U {
                rd,
                imm: (raw & 0xffff_f000) as i32,
            };
        }

        OP_JAL => {
            let imm = ((raw >> 31) & 0x1) << 20
                | ((raw >> 12) & 0xff) << 12
                | ((raw >> 20) & 0x1) << 11
                | ((raw >> 21) & 0x3ff) << 1;
            inst.category = Category::Jump;
            inst.operands = Operands::J {
                rd,
                imm: sign_extend(imm, 21),
            };
        }

        OP_JALR => {
            if funct3 == 0x0 {
                inst.category = Category::Jump;
                inst.operands = Operands::I {
                    rd,
                    rs1,
                    imm: sign_extend(raw >> 20, 12),
                };
            }
        }

        OP_SYSTEM => match funct3 {
            F3_PRIV => {
                // The imm12 field selects the privileged operation; the
                // five recognized values are kept verbatim in `imm` for
                // the engine to dispatch on.
                let imm12 = raw >> 20;
                if matches!(
                    imm12,
                    PRIV_ECALL | PRIV_EBREAK | PRIV_URET | PRIV_SRET | PRIV_MRET
                ) {
                    inst.category = Category::System;
                    inst.operands = Operands::I {
                        rd,
                        rs1,
                        imm: imm12 as i32,
                    };
                }
            }
            F3_CSRRW | F3_CSRRS | F3_CSRRC => {
                inst.category = Category::Csr;
                inst.operands = Operands::Csr {
                    rd,
                    rs1,
                    csr: raw >> 20,
                };
            }
            F3_CSRRWI | F3_CSRRSI | F3_CSRRCI => {
                // The rs1 field holds the zero-extended immediate.
                inst.category = Category::CsrImm;
                inst.operands = Operands::CsrImm {
                    rd,
                    zimm: rs1 as u32,
                    csr: raw >> 20,
                };
            }
            _ => {}
        },

        OP_CUSTOM0 => {
            inst.category = Category::Custom;
            inst.operands = Operands::R { rd, rs1, rs2 };
        }

        _ => {}
    }

    inst
}
