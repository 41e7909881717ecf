//! Synchronous Trap Causes.
//!
//! The tile raises only synchronous traps; there is no interrupt machinery.
//! Each cause maps to the standard mcause exception code written on trap
//! entry.

/// Cause of a synchronous trap, as recorded in mcause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapCause {
    /// Unsupported or privilege-violating instruction (code 2).
    IllegalInstruction,
    /// EBREAK executed (code 3).
    Breakpoint,
    /// ECALL issued from U-mode (code 8).
    EnvironmentCallFromU,
    /// ECALL issued from S-mode (code 9).
    EnvironmentCallFromS,
    /// ECALL issued from M-mode (code 11).
    EnvironmentCallFromM,
}

impl TrapCause {
    /// The mcause exception code for this cause.
    pub fn code(self) -> u32 {
        match self {
            TrapCause::IllegalInstruction => 2,
            TrapCause::Breakpoint => 3,
            TrapCause::EnvironmentCallFromU => 8,
            TrapCause::EnvironmentCallFromS => 9,
            TrapCause::EnvironmentCallFromM => 11,
        }
    }

    /// Human-readable cause name.
    pub fn name(self) -> &'static str {
        match self {
            TrapCause::IllegalInstruction => "IllegalInstruction",
            TrapCause::Breakpoint => "Breakpoint",
            TrapCause::EnvironmentCallFromU => "EnvironmentCallFromUMode",
            TrapCause::EnvironmentCallFromS => "EnvironmentCallFromSMode",
            TrapCause::EnvironmentCallFromM => "EnvironmentCallFromMMode",
        }
    }
}

impl std::fmt::Display for TrapCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
