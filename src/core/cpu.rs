//! Tile Execution Engine.
//!
//! This module implements the core state machine of the tile: fetch, decode,
//! and execute of exactly one instruction per `tick`, plus the machine-mode
//! trap entry/return sequences and the context save/restore hooks the
//! cooperative scheduler uses to multiplex thread contexts over the single
//! engine.
//!
//! The engine talks to the outside world only through the attached
//! `MemoryPort` and (optionally) `AccelPort` capabilities. Ticking without a
//! memory port is a recorded no-op rather than an error, so a partially
//! assembled system stays inert instead of crashing.

use crate::core::arch::csr::{self, CsrFile};
use crate::core::arch::gpr::Gpr;
use crate::core::arch::mode::PrivilegeMode;
use crate::core::arch::trap::TrapCause;
use crate::core::exec::{self, ExecOutcome};
use crate::isa::decode;
use crate::soc::ports::{SharedAccel, SharedMemory};
use crate::stats::SimStats;

/// A parked thread: program counter, register file image, and liveness.
///
/// The scheduler owns two of these and swaps them through the engine one
/// tick at a time. `regs[0]` is forced to zero on both save and restore so
/// a context can never smuggle a nonzero x0 into the engine.
#[derive(Clone, Copy, Debug)]
pub struct ThreadContext {
    pub pc: u32,
    pub regs: [u32; 32],
    pub active: bool,
}

impl ThreadContext {
    /// Creates an active context that will begin execution at `pc`.
    pub fn new(pc: u32) -> Self {
        Self {
            pc,
            regs: [0; 32],
            active: true,
        }
    }
}

/// The tile's execution engine.
///
/// Holds all architectural state (pc, registers, CSRs, privilege) along
/// with the run-control flags the exit protocol latches. Capabilities are
/// attached after construction; until a memory port is present, `tick` does
/// nothing observable.
pub struct Cpu {
    pub regs: Gpr,
    pub pc: u32,
    pub privilege: PrivilegeMode,
    pub csrs: CsrFile,

    /// Engine refuses to tick while set. Latched by the exit protocol and
    /// cleared when the scheduler loads a fresh context.
    pub halted: bool,
    /// Set once an ECALL exit (a7 == 93) has been executed.
    pub exited: bool,
    /// Exit code latched from a0 at the exit ECALL.
    pub exit_code: u32,

    /// PC captured at the start of the current tick; trap entry writes this
    /// value to mepc.
    pub last_pc: u32,
    /// Raw word fetched in the current tick. The scheduler matches it
    /// against the EBREAK encoding to detect voluntary yields.
    pub last_instr: u32,

    pub trace: bool,
    pub stats: SimStats,

    mem: Option<SharedMemory>,
    accel: Option<SharedAccel>,
}

impl Cpu {
    /// Creates an engine in its reset state with no capabilities attached.
    pub fn new() -> Self {
        Self {
            regs: Gpr::new(),
            pc: 0,
            privilege: PrivilegeMode::Machine,
            csrs: CsrFile::new(),
            halted: false,
            exited: false,
            exit_code: 0,
            last_pc: 0,
            last_instr: 0,
            trace: false,
            stats: SimStats::default(),
            mem: None,
            accel: None,
        }
    }

    /// Attaches the memory capability the engine fetches and loads through.
    pub fn attach_memory(&mut self, mem: SharedMemory) {
        self.mem = Some(mem);
    }

    /// Attaches an accelerator for CUSTOM-0 dispatch.
    pub fn attach_accelerator(&mut self, accel: SharedAccel) {
        self.accel = Some(accel);
    }

    /// Hands out a clone of the accelerator handle, if one is attached.
    pub(crate) fn accel(&self) -> Option<SharedAccel> {
        self.accel.clone()
    }

    /// True when tracing is requested, either per-run or at compile time.
    pub fn trace_enabled(&self) -> bool {
        cfg!(feature = "always-trace") || self.trace
    }

    /// Returns the engine to its power-on state. Attached capabilities and
    /// accumulated statistics survive a reset.
    pub fn reset(&mut self) {
        self.pc = 0;
        self.regs.reset();
        self.csrs.reset();
        self.privilege = PrivilegeMode::Machine;
        self.halted = false;
        self.exited = false;
        self.exit_code = 0;
        self.last_pc = 0;
        self.last_instr = 0;
    }

    /// Executes one instruction.
    ///
    /// A halted engine does nothing. Without a memory port the tick is
    /// recorded (pc bookkeeping updated) but nothing executes. Otherwise:
    /// fetch at pc, decode, execute, and apply the outcome — fall through,
    /// redirect, trap entry, or exit latch.
    pub fn tick(&mut self) {
        if self.halted {
            return;
        }
        let Some(mem) = self.mem.clone() else {
            self.last_pc = self.pc;
            self.last_instr = 0;
            return;
        };

        let pc = self.pc;
        let raw = mem.borrow_mut().read32(pc);
        self.last_pc = pc;
        self.last_instr = raw;

        let inst = decode(raw);
        if self.trace_enabled() {
            eprintln!(
                "[Core] pc={:#010x} raw={:#010x} {:?}/{:?}",
                pc, raw, inst.category, inst.operands
            );
        }

        self.stats.cycles += 1;
        self.stats.count_instruction(inst.category);

        match exec::execute(self, &mem, &inst, pc) {
            ExecOutcome::Continue(next) => self.pc = next,
            ExecOutcome::Trap(cause) => self.raise_trap(cause),
            ExecOutcome::ReturnTo(target) => self.pc = target,
            ExecOutcome::Exit(code) => self.request_exit(code),
        }
    }

    /// Reads a general-purpose register.
    pub fn read_reg(&self, idx: usize) -> u32 {
        self.regs.read(idx)
    }

    /// Writes a general-purpose register, with a trace line when enabled.
    pub fn write_reg(&mut self, idx: usize, val: u32) {
        if idx != 0 && self.trace_enabled() {
            eprintln!("[Core]   x{} <= {:#010x}", idx, val);
        }
        self.regs.write(idx, val);
    }

    /// Reads a CSR by address.
    pub fn csr_read(&self, addr: u32) -> u32 {
        self.csrs.read(addr)
    }

    /// Writes a CSR by address, with a trace line when enabled.
    pub fn csr_write(&mut self, addr: u32, val: u32) {
        if self.trace_enabled() {
            eprintln!("[Core]   csr {:#05x} <= {:#010x}", addr, val);
        }
        self.csrs.write(addr, val);
    }

    /// Performs the machine-mode trap entry sequence.
    ///
    /// mepc takes the begin-of-tick pc, mcause the cause code; MIE is
    /// stacked into MPIE and cleared; MPP records the interrupted privilege;
    /// control transfers to mtvec in Machine mode.
    pub fn raise_trap(&mut self, cause: TrapCause) {
        self.stats.traps_taken += 1;
        self.csrs.mepc = self.last_pc;
        self.csrs.mcause = cause.code();

        let mut status = self.csrs.mstatus;
        if status & csr::MSTATUS_MIE != 0 {
            status |= csr::MSTATUS_MPIE;
        } else {
            status &= !csr::MSTATUS_MPIE;
        }
        status &= !csr::MSTATUS_MIE;
        status = (status & !csr::MSTATUS_MPP_MASK)
            | ((self.privilege.to_u8() as u32) << csr::MSTATUS_MPP_SHIFT);
        self.csrs.mstatus = status;

        self.pc = self.csrs.mtvec;
        self.privilege = PrivilegeMode::Machine;

        if self.trace_enabled() {
            eprintln!(
                "[Core] trap {} mepc={:#010x} -> mtvec={:#010x}",
                cause, self.csrs.mepc, self.pc
            );
        }
    }

    /// Performs the trap return sequence shared by uret/sret/mret.
    ///
    /// MPIE is unstacked into MIE and then set; privilege drops to the mode
    /// saved in MPP, which is reset to User. Returns the redirect target
    /// (mepc).
    pub fn resume_from_trap(&mut self) -> u32 {
        let mut status = self.csrs.mstatus;
        if status & csr::MSTATUS_MPIE != 0 {
            status |= csr::MSTATUS_MIE;
        } else {
            status &= !csr::MSTATUS_MIE;
        }
        status |= csr::MSTATUS_MPIE;

        let mpp = ((status & csr::MSTATUS_MPP_MASK) >> csr::MSTATUS_MPP_SHIFT) as u8;
        self.privilege = PrivilegeMode::from_u8(mpp);
        status &= !csr::MSTATUS_MPP_MASK;
        self.csrs.mstatus = status;

        self.csrs.mepc
    }

    /// Latches a program exit: records the code, sets the exited flag, and
    /// halts the engine. The pc stays at the exiting instruction.
    pub fn request_exit(&mut self, code: u32) {
        self.exit_code = code;
        self.exited = true;
        self.halted = true;
    }

    /// Copies pc and registers out to a parked context. x0 is forced to
    /// zero in the snapshot.
    pub fn save_context(&self, ctx: &mut ThreadContext) {
        ctx.pc = self.pc;
        ctx.regs = self.regs.snapshot();
    }

    /// Restores pc and registers from a parked context and clears the
    /// run-control flags so the incoming thread starts from a clean slate.
    pub fn load_context(&mut self, ctx: &ThreadContext) {
        self.pc = ctx.pc;
        self.regs.restore(&ctx.regs);
        self.halted = false;
        self.exited = false;
        self.exit_code = 0;
    }

    /// Dumps pc and the register file to stdout.
    pub fn dump_state(&self) {
        println!("PC = {:#010x}  priv = {}", self.pc, self.privilege);
        self.regs.dump();
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
