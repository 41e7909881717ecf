//! Tile core implementation.
//!
//! The execution engine (fetch/decode/execute state machine, trap entry and
//! return, context save/restore) together with the architectural records it
//! operates on.

/// Architectural state: register file, CSRs, privilege modes, trap causes.
pub mod arch;

/// The execution engine and the parked thread context record.
pub mod cpu;

/// Per-instruction execution semantics and the execute outcome type.
pub mod exec;

pub use cpu::{Cpu, ThreadContext};
pub use exec::ExecOutcome;
