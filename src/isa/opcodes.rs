//! RV32I Opcode and Function-Code Constants.
//!
//! This module defines the major opcodes, funct3/funct7 selectors, and
//! privileged-instruction immediates recognized by the decoder. Only the
//! subset implemented by the tile is listed; anything outside it decodes
//! as `Unknown`.

/// Register-register ALU opcode (ADD, SUB, SLL, SLT, SLTU, XOR, SRL, SRA, OR, AND).
pub const OP_ALU_REG: u32 = 0x33;

/// Register-immediate ALU opcode (ADDI, SLTI, SLTIU, XORI, ORI, ANDI, SLLI, SRLI, SRAI).
pub const OP_ALU_IMM: u32 = 0x13;

/// Load opcode. Only LW (funct3 = 2) is recognized.
pub const OP_LOAD: u32 = 0x03;

/// Store opcode. Only SW (funct3 = 2) is recognized.
pub const OP_STORE: u32 = 0x23;

/// Conditional branch opcode (BEQ, BNE, BLT).
pub const OP_BRANCH: u32 = 0x63;

/// Load Upper Immediate.
pub const OP_LUI: u32 = 0x37;

/// Add Upper Immediate to PC.
pub const OP_AUIPC: u32 = 0x17;

/// Jump And Link.
pub const OP_JAL: u32 = 0x6f;

/// Jump And Link Register.
pub const OP_JALR: u32 = 0x67;

/// System instruction opcode (ECALL, EBREAK, xRET, CSR accesses).
pub const OP_SYSTEM: u32 = 0x73;

/// CUSTOM-0 opcode, reserved for the attached accelerator. Decoded as R-type.
pub const OP_CUSTOM0: u32 = 0x0b;

/// funct3 selector for LW/SW (32-bit access width).
pub const F3_WORD: u32 = 0x2;

/// funct3 selector for BEQ.
pub const F3_BEQ: u32 = 0x0;
/// funct3 selector for BNE.
pub const F3_BNE: u32 = 0x1;
/// funct3 selector for BLT (signed).
pub const F3_BLT: u32 = 0x4;

/// funct3 selector for privileged system instructions (imm12 picks the op).
pub const F3_PRIV: u32 = 0x0;
/// funct3 selector for CSRRW.
pub const F3_CSRRW: u32 = 0x1;
/// funct3 selector for CSRRS.
pub const F3_CSRRS: u32 = 0x2;
/// funct3 selector for CSRRC.
pub const F3_CSRRC: u32 = 0x3;
/// funct3 selector for CSRRWI.
pub const F3_CSRRWI: u32 = 0x5;
/// funct3 selector for CSRRSI.
pub const F3_CSRRSI: u32 = 0x6;
/// funct3 selector for CSRRCI.
pub const F3_CSRRCI: u32 = 0x7;

/// funct7 for the base variant of a shared funct3 slot (ADD, SRL).
pub const F7_BASE: u32 = 0x00;
/// funct7 for the alternate variant (SUB, SRA).
pub const F7_ALT: u32 = 0x20;

/// imm12 selector for ECALL within the privileged funct3 slot.
pub const PRIV_ECALL: u32 = 0x000;
/// imm12 selector for EBREAK.
pub const PRIV_EBREAK: u32 = 0x001;
/// imm12 selector for URET.
pub const PRIV_URET: u32 = 0x002;
/// imm12 selector for SRET.
pub const PRIV_SRET: u32 = 0x102;
/// imm12 selector for MRET.
pub const PRIV_MRET: u32 = 0x302;

/// Full ECALL encoding.
pub const ECALL: u32 = 0x0000_0073;

/// Full EBREAK encoding. The scheduler matches executed instructions
/// against this word to detect voluntary yields.
pub const EBREAK: u32 = 0x0010_0073;

/// Full MRET encoding.
pub const MRET: u32 = 0x3020_0073;

/// Full SRET encoding.
pub const SRET: u32 = 0x1020_0073;

/// Full URET encoding.
pub const URET: u32 = 0x0020_0073;
