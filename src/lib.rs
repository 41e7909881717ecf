//! RV32I Tile Simulator Library.
//!
//! This crate implements a cycle-level instruction-set simulator for a small
//! RV32I tile: one in-order core, a machine-mode CSR file with synchronous
//! traps, and a cooperative two-thread scheduler where EBREAK doubles as a
//! voluntary yield.
//!
//! # Architecture
//!
//! * **Core**: fetch/decode/execute, one instruction per tick.
//! * **Threads**: two software contexts round-robin multiplexed over the
//!   single core by the scheduler.
//! * **Platform**: pluggable memory backends and an optional CUSTOM-0
//!   accelerator, wired explicitly as shared ports.
//!
//! # Modules
//!
//! * `config`: Configuration loading and parsing.
//! * `core`: CPU core implementation.
//! * `isa`: Instruction Set Architecture definitions.
//! * `sim`: Scheduler, debugger, loaders, diagnostics.
//! * `soc`: Memory backends and accelerators.
//! * `stats`: Run statistics collection.

/// Configuration system for run control, memory, and accelerator settings.
///
/// Loads and parses TOML configuration files; every field carries a default
/// so a partial file still yields a runnable system.
pub mod config;

/// CPU core implementation: architectural state, per-tick execution, traps.
///
/// Implements the fetch/decode/execute loop, the GPR and CSR files,
/// privilege tracking, and synchronous trap entry and return.
pub mod core;

/// Instruction Set Architecture definitions and the decoder.
///
/// Implements total RV32I decoding: every 32-bit word maps to a structured
/// record, with unrecognized encodings tagged Unknown rather than rejected.
pub mod isa;

/// Simulation harness: scheduler, interactive debugger, loader, postmortem.
///
/// Coordinates the two software thread contexts over the core, drives
/// auto-run and REPL sessions, and reports end-of-run diagnostics.
pub mod sim;

/// Platform components: memory backends, accelerators, system assembly.
///
/// Implements the flat and DRAM-modelled memories, the CUSTOM-0 accelerator
/// ports, and the builder that wires a system from configuration.
pub mod soc;

/// Run statistics collection and reporting.
///
/// Tracks cycle counts, the retired-instruction mix, traps, and scheduler
/// activity, printed as a final block after simulation.
pub mod stats;
