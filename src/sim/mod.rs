//! Simulation harness: the two-thread scheduler, the interactive debugger,
//! program loading, and end-of-run diagnostics.

/// Interactive debugger REPL.
pub mod debugger;

/// Flat binary loading.
pub mod loader;

/// End-of-run diagnostics.
pub mod postmortem;

/// Cooperative two-thread scheduler.
pub mod scheduler;

pub use scheduler::{CycleReport, Scheduler, NUM_THREADS};
