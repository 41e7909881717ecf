//! Accelerator Backends.
//!
//! Two `AccelPort` implementations for the CUSTOM-0 opcode: a demo adder
//! that answers with rs1+rs2, and an array summer that walks guest memory
//! through a shared memory handle. Both respond in the same tick they are
//! issued in and hold exactly one pending response.

use crate::soc::ports::{AccelPort, SharedMemory};

/// Demonstration accelerator: response = rs1 + rs2, logging each request.
pub struct DemoAddAccel {
    response: u32,
    pending: bool,
}

impl DemoAddAccel {
    pub fn new() -> Self {
        Self {
            response: 0,
            pending: false,
        }
    }
}

impl Default for DemoAddAccel {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelPort for DemoAddAccel {
    fn issue(&mut self, raw: u32, pc: u32, rs1_val: u32, rs2_val: u32) {
        self.response = rs1_val.wrapping_add(rs2_val);
        self.pending = true;
        println!(
            "[Accel] demo-add pc={:#010x} inst={:#010x} rs1={:#010x} rs2={:#010x}",
            pc, raw, rs1_val, rs2_val
        );
    }

    fn has_response(&self) -> bool {
        self.pending
    }

    fn read_response(&mut self) -> u32 {
        self.pending = false;
        self.response
    }

    fn describe(&self) -> String {
        "demo-add".to_string()
    }
}

/// Array-summing accelerator.
///
/// rs1 carries the base address and rs2 the element count; the response is
/// the wrapping sum of that many consecutive little-endian words, fetched
/// through the shared memory handle.
pub struct ArraySumAccel {
    mem: SharedMemory,
    response: u32,
    pending: bool,
}

impl ArraySumAccel {
    pub fn new(mem: SharedMemory) -> Self {
        Self {
            mem,
            response: 0,
            pending: false,
        }
    }
}

impl AccelPort for ArraySumAccel {
    fn issue(&mut self, _raw: u32, _pc: u32, rs1_val: u32, rs2_val: u32) {
        let mut sum = 0u32;
        for i in 0..rs2_val {
            let addr = rs1_val.wrapping_add(i.wrapping_mul(4));
            sum = sum.wrapping_add(self.mem_load32(addr));
        }
        self.response = sum;
        self.pending = true;
        println!(
            "[Accel] array-sum base={:#010x} count={} -> {:#010x}",
            rs1_val, rs2_val, sum
        );
    }

    fn has_response(&self) -> bool {
        self.pending
    }

    fn read_response(&mut self) -> u32 {
        self.pending = false;
        self.response
    }

    fn mem_load32(&mut self, addr: u32) -> u32 {
        self.mem.borrow_mut().read32(addr)
    }

    fn mem_store32(&mut self, addr: u32, value: u32) {
        self.mem.borrow_mut().write32(addr, value);
    }

    fn describe(&self) -> String {
        "array-sum".to_string()
    }
}
