//! Architectural state components.
//!
//! Register file, privilege modes, trap causes, and the CSR file — the
//! pieces of processor state the execution engine operates on.

/// Control and Status Register addresses, mstatus bit layout, and the CSR file.
pub mod csr;

/// General-purpose register file with the hardwired-zero invariant.
pub mod gpr;

/// Privilege mode definitions and conversions.
pub mod mode;

/// Synchronous trap causes and their mcause codes.
pub mod trap;
