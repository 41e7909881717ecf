//! Decoded Instruction Representation.
//!
//! This module defines the structured record produced by the decoder: the
//! raw bit fields common to every encoding, a semantic `Category`, and an
//! `Operands` group whose variant doubles as the format tag (R/I/S/B/U/J,
//! plus the two CSR forms). Exactly one category/operand pairing is
//! populated per legal encoding; anything the decoder does not recognize
//! carries `Category::Unknown` with `Operands::None`.

/// Semantic class of a decoded instruction.
///
/// The execution engine dispatches on the category first and the operand
/// format second, mirroring the two-level structure of the RV32I opcode map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Integer ALU operation (register-register, register-immediate, LUI, AUIPC).
    Alu,
    /// Memory load (LW).
    Load,
    /// Memory store (SW).
    Store,
    /// Conditional branch (BEQ, BNE, BLT).
    Branch,
    /// Unconditional jump (JAL, JALR).
    Jump,
    /// Privileged system instruction (ECALL, EBREAK, URET, SRET, MRET).
    System,
    /// CSR access with a register operand (CSRRW, CSRRS, CSRRC).
    Csr,
    /// CSR access with a zero-extended immediate (CSRRWI, CSRRSI, CSRRCI).
    CsrImm,
    /// CUSTOM-0 accelerator dispatch.
    Custom,
    /// Encoding not recognized by this tile. Executes as a no-op.
    Unknown,
}

/// Format-specific operand fields.
///
/// The variant is the format tag; each carries only the fields that format
/// defines, with immediates already sign- or zero-extended by the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operands {
    /// R-type: two source registers, one destination.
    R { rd: usize, rs1: usize, rs2: usize },
    /// I-type: one source register, a 12-bit signed immediate (or a 5-bit
    /// shift amount for SLLI/SRLI/SRAI, stored zero-extended).
    I { rd: usize, rs1: usize, imm: i32 },
    /// S-type: base register, store-data register, signed offset.
    S { rs1: usize, rs2: usize, imm: i32 },
    /// B-type: two comparison registers, signed PC-relative offset.
    B { rs1: usize, rs2: usize, imm: i32 },
    /// U-type: destination register, upper-20-bit immediate.
    U { rd: usize, imm: i32 },
    /// J-type: link register, signed PC-relative offset.
    J { rd: usize, imm: i32 },
    /// CSR register form: destination, source register, CSR address.
    Csr { rd: usize, rs1: usize, csr: u32 },
    /// CSR immediate form: destination, 5-bit zero-extended immediate
    /// (taken from the rs1 field), CSR address.
    CsrImm { rd: usize, zimm: u32, csr: u32 },
    /// No operand group; paired with `Category::Unknown`.
    None,
}

/// A fully decoded instruction.
///
/// The raw subfields (`opcode` through `funct7`) are extracted for every
/// word, recognized or not; `category` and `operands` carry the decoder's
/// interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// The undecoded 32-bit instruction word.
    pub raw: u32,
    /// bits[6:0].
    pub opcode: u32,
    /// bits[11:7].
    pub rd: usize,
    /// bits[14:12].
    pub funct3: u32,
    /// bits[19:15].
    pub rs1: usize,
    /// bits[24:20].
    pub rs2: usize,
    /// bits[31:25].
    pub funct7: u32,
    /// Semantic class assigned by the decoder.
    pub category: Category,
    /// Format tag plus extracted operand fields.
    pub operands: Operands,
}

impl Instruction {
    /// True when the decoder recognized the encoding.
    pub fn is_known(&self) -> bool {
        self.category != Category::Unknown
    }
}
