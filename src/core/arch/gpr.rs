//! General-Purpose Register File.
//!
//! Thirty-two 32-bit integer registers with the architectural x0-is-zero
//! invariant enforced at the accessors: reads of x0 return 0 and writes to
//! it are dropped, so no caller can observe a nonzero x0.

/// The tile's integer register file (x0-x31).
pub struct Gpr {
    regs: [u32; 32],
}

impl Gpr {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads register `idx`. x0 always reads as zero.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs[idx]
        }
    }

    /// Writes register `idx`. Writes to x0 are silently dropped.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Copies the full register state out, with x0 forced to zero.
    ///
    /// Used by the scheduler when parking a thread context.
    pub fn snapshot(&self) -> [u32; 32] {
        let mut out = self.regs;
        out[0] = 0;
        out
    }

    /// Replaces the full register state, with x0 forced to zero.
    ///
    /// Used by the scheduler when resuming a thread context.
    pub fn restore(&mut self, vals: &[u32; 32]) {
        self.regs = *vals;
        self.regs[0] = 0;
    }

    /// Clears every register.
    pub fn reset(&mut self) {
        self.regs = [0; 32];
    }

    /// Dumps all registers to stdout, four per line.
    pub fn dump(&self) {
        for i in (0..32).step_by(4) {
            println!(
                "x{:<2}={:#010x} x{:<2}={:#010x} x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.read(i),
                i + 1,
                self.read(i + 1),
                i + 2,
                self.read(i + 2),
                i + 3,
                self.read(i + 3)
            );
        }
    }
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}
