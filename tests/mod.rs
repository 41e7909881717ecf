//! Test module organization.
//!
//! This module organizes all integration tests for the tile simulator.

/// ALU, memory-access, and control-flow execution tests.
mod alu_tests;


/// Debugger command grammar tests.
mod debugger_tests;

/// Instruction decoding tests.
mod isa_tests;
