//! RISC-V ABI Register Names and Syscall Numbers.
//!
//! Maps the symbolic ABI register names onto their architectural indices
//! and defines the syscall numbers honored by the exit protocol.

/// Hardwired zero register (x0).
pub const REG_ZERO: usize = 0;

/// Return address register (x1 / ra).
pub const REG_RA: usize = 1;

/// Stack pointer register (x2 / sp).
pub const REG_SP: usize = 2;

/// Temporary register t0 (x5).
pub const REG_T0: usize = 5;

/// Temporary register t1 (x6).
pub const REG_T1: usize = 6;

/// Temporary register t2 (x7).
pub const REG_T2: usize = 7;

/// Argument/return register a0 (x10). Carries the exit code on ECALL exit.
pub const REG_A0: usize = 10;

/// Argument register a1 (x11).
pub const REG_A1: usize = 11;

/// Argument register a4 (x14).
pub const REG_A4: usize = 14;

/// Argument register a7 (x17). Carries the syscall number on ECALL.
pub const REG_A7: usize = 17;

/// Exit syscall number. An ECALL with a7 == SYS_EXIT halts the tile with
/// the exit code taken from a0 instead of raising an environment-call trap.
pub const SYS_EXIT: u32 = 93;
