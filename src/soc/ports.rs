//! Tile Capability Ports.
//!
//! The two interfaces through which the engine reaches beyond its own
//! architectural state: a word-addressed memory port and an optional
//! accelerator port for CUSTOM-0. Both are synchronous and single-owner;
//! the shared handles use `RefCell`, so any attempt to re-enter a port
//! from inside one of its own callbacks panics instead of corrupting
//! state.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a memory backend. Cloned into the engine, the
/// scheduler (for inspection commands), and memory-using accelerators.
pub type SharedMemory = Rc<RefCell<dyn MemoryPort>>;

/// Shared handle to an accelerator backend.
pub type SharedAccel = Rc<RefCell<dyn AccelPort>>;

/// Word-granular memory access, little-endian, full 32-bit address space.
///
/// Backends decide what out-of-range accesses mean; the engine itself
/// never traps on an address.
pub trait MemoryPort {
    /// Reads the 32-bit word at `addr`.
    fn read32(&mut self, addr: u32) -> u32;

    /// Writes the 32-bit word at `addr`.
    fn write32(&mut self, addr: u32, value: u32);

    /// One-line description for the assembly banner.
    fn describe(&self) -> String;

    /// Prints backend-specific statistics at teardown. Default: nothing.
    fn report(&self) {}
}

/// Accelerator attached to the CUSTOM-0 opcode.
///
/// The engine issues the raw instruction word plus the resolved source
/// operands, then collects a response if the accelerator reports one.
/// `read_response` clears the pending state; a response the engine cannot
/// deliver (rd == x0) stays pending.
pub trait AccelPort {
    /// Presents a CUSTOM-0 instruction to the accelerator.
    fn issue(&mut self, raw: u32, pc: u32, rs1_val: u32, rs2_val: u32);

    /// True when a response is waiting to be collected.
    fn has_response(&self) -> bool {
        false
    }

    /// Takes the pending response, clearing it.
    fn read_response(&mut self) -> u32 {
        0
    }

    /// Loads a word on behalf of the accelerator. Backends without memory
    /// access read zero.
    fn mem_load32(&mut self, _addr: u32) -> u32 {
        0
    }

    /// Stores a word on behalf of the accelerator. Backends without memory
    /// access drop the write.
    fn mem_store32(&mut self, _addr: u32, _value: u32) {}

    /// One-line description for the assembly banner.
    fn describe(&self) -> String;
}
