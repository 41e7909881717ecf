//! Control and Status Registers.
//!
//! The tile implements the four machine-mode trap CSRs as named fields and
//! backs every other address with a sparse shadow map, so software can park
//! values in arbitrary CSR numbers (mscratch and friends) without the file
//! growing dedicated storage for each. Reads of addresses never written
//! return zero.

use std::collections::HashMap;

/// Machine status register address.
pub const MSTATUS: u32 = 0x300;
/// Machine trap-vector base address register.
pub const MTVEC: u32 = 0x305;
/// Machine exception program counter register.
pub const MEPC: u32 = 0x341;
/// Machine trap cause register.
pub const MCAUSE: u32 = 0x342;

/// mstatus.MIE: machine interrupt enable.
pub const MSTATUS_MIE: u32 = 1 << 3;
/// mstatus.MPIE: previous interrupt enable, stacked on trap entry.
pub const MSTATUS_MPIE: u32 = 1 << 7;
/// Bit position of the two-bit mstatus.MPP field.
pub const MSTATUS_MPP_SHIFT: u32 = 11;
/// Mask covering the mstatus.MPP field.
pub const MSTATUS_MPP_MASK: u32 = 0b11 << MSTATUS_MPP_SHIFT;

/// The tile's CSR file: four named trap CSRs plus a sparse shadow map.
///
/// Lookup checks the named fields first; only unrecognized addresses touch
/// the map.
#[derive(Default)]
pub struct CsrFile {
    pub mstatus: u32,
    pub mtvec: u32,
    pub mepc: u32,
    pub mcause: u32,
    shadow: HashMap<u32, u32>,
}

impl CsrFile {
    /// Creates an empty CSR file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a CSR by address. Unwritten shadow addresses read as zero.
    pub fn read(&self, addr: u32) -> u32 {
        match addr {
            MSTATUS => self.mstatus,
            MTVEC => self.mtvec,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            _ => self.shadow.get(&addr).copied().unwrap_or(0),
        }
    }

    /// Writes a CSR by address.
    pub fn write(&mut self, addr: u32, val: u32) {
        match addr {
            MSTATUS => self.mstatus = val,
            MTVEC => self.mtvec = val,
            MEPC => self.mepc = val,
            MCAUSE => self.mcause = val,
            _ => {
                self.shadow.insert(addr, val);
            }
        }
    }

    /// Clears the named CSRs and drops every shadow entry.
    pub fn reset(&mut self) {
        self.mstatus = 0;
        self.mtvec = 0;
        self.mepc = 0;
        self.mcause = 0;
        self.shadow.clear();
    }
}
