//! Instruction Set Architecture definitions and decoding.
//!
//! Covers the RV32I subset implemented by the tile: the base integer
//! operations, LW/SW word memory access, BEQ/BNE/BLT branches, JAL/JALR,
//! the privileged system instructions, CSR accesses, and the CUSTOM-0
//! accelerator opcode. Decoding is total; everything outside the subset
//! becomes `Category::Unknown`.

/// ABI register names and syscall numbers.
pub mod abi;

/// The total instruction decoder.
pub mod decode;

/// Decoded instruction record, semantic categories, and operand formats.
pub mod instruction;

/// Opcode and function-code constants.
pub mod opcodes;

pub use decode::{decode, sign_extend};
pub use instruction::{Category, Instruction, Operands};
