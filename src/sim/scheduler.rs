//! Cooperative two-thread scheduler.
//!
//! Multiplexes two software thread contexts over the single core in
//! round-robin order, one instruction per scheduling step. EBREAK doubles as
//! a voluntary yield: the scheduler skips the saved context past the
//! breakpoint instruction so the thread resumes on its next turn, and logs a
//! snapshot once per distinct yield site. User breakpoints stop a thread
//! before the instruction executes.

use crate::core::arch::trap::TrapCause;
use crate::core::{Cpu, ThreadContext};
use crate::isa::opcodes;
use crate::soc::ports::SharedMemory;

pub const NUM_THREADS: usize = 2;

pub(crate) const COLOR_RESET: &str = "\x1b[0m";
pub(crate) const COLOR_BP: &str = "\x1b[33m";
pub(crate) const COLOR_EXIT: &str = "\x1b[32m";
pub(crate) const COLOR_ERR: &str = "\x1b[31m";
pub(crate) const COLOR_HINT: &str = "\x1b[36m";

/// What one scheduling step did, for the front ends to report.
#[derive(Debug, Default, Clone, Copy)]
pub struct CycleReport {
    /// Thread the step selected; `None` when nothing was runnable.
    pub thread: Option<usize>,
    /// Context pc at the start of the step.
    pub begin_pc: u32,
    /// Instruction word at `begin_pc`.
    pub instruction: u32,
    /// mcause after the step.
    pub cause: u32,
    /// An instruction was executed (false for user-breakpoint stops).
    pub executed: bool,
    /// The executed instruction was EBREAK.
    pub executed_breakpoint: bool,
    /// First EBREAK at this pc for this thread; print a snapshot.
    pub log_snapshot: bool,
    /// A user breakpoint matched `begin_pc`; nothing executed.
    pub user_breakpoint_hit: bool,
    /// The program exited during this step.
    pub program_exited: bool,
}

pub struct Scheduler {
    pub cpu: Cpu,
    pub mem: SharedMemory,
    pub threads: [ThreadContext; NUM_THREADS],
    pub current_thread: usize,
    pub cycle: u64,
    pub breakpoints: Vec<u32>,
    pub saw_breakpoint_trap: [bool; NUM_THREADS],
    pub breakpoint_mepc: [u32; NUM_THREADS],
    pub saw_ecall_trap: [bool; NUM_THREADS],
    pub ecall_mepc: [u32; NUM_THREADS],
    pub program_exited: bool,
    pub program_exit_code: u32,
    pub user_quit: bool,
    pub trace_enabled: bool,
    last_breakpoint_log_pc: [u32; NUM_THREADS],
}

impl Scheduler {
    /// Wraps the core and memory; both thread contexts start at the core's
    /// current pc.
    pub fn new(cpu: Cpu, mem: SharedMemory) -> Self {
        let mut sched = Self {
            cpu,
            mem,
            threads: [ThreadContext::new(0); NUM_THREADS],
            current_thread: NUM_THREADS - 1,
            cycle: 0,
            breakpoints: Vec::new(),
            saw_breakpoint_trap: [false; NUM_THREADS],
            breakpoint_mepc: [0; NUM_THREADS],
            saw_ecall_trap: [false; NUM_THREADS],
            ecall_mepc: [0; NUM_THREADS],
            program_exited: false,
            program_exit_code: 0,
            user_quit: false,
            trace_enabled: false,
            last_breakpoint_log_pc: [u32::MAX; NUM_THREADS],
        };
        sched.reset();
        sched
    }

    /// Rearms both contexts at the core's current pc and clears all
    /// bookkeeping. Does not touch the core's own state.
    pub fn reset(&mut self) {
        let entry = self.cpu.pc;
        for t in 0..NUM_THREADS {
            self.threads[t] = ThreadContext::new(entry);
            self.saw_breakpoint_trap[t] = false;
            self.saw_ecall_trap[t] = false;
            self.breakpoint_mepc[t] = 0;
            self.ecall_mepc[t] = 0;
            self.last_breakpoint_log_pc[t] = u32::MAX;
        }
        self.program_exited = false;
        self.program_exit_code = 0;
        self.user_quit = false;
        // One before thread 0, so the first step picks thread 0.
        self.current_thread = NUM_THREADS - 1;
        self.cycle = 0;
        self.trace_enabled = false;
        self.breakpoints.clear();
    }

    pub fn has_active_threads(&self) -> bool {
        self.threads.iter().any(|t| t.active)
    }

    /// Runs one scheduling step: pick the next active thread, execute one
    /// instruction in its context, and apply the yield/exit bookkeeping.
    ///
    /// With `honor_breakpoints`, a thread whose pc matches a user breakpoint
    /// is reported without executing anything; its pc and the cycle counter
    /// are untouched, so the stop repeats until stepped over.
    pub fn execute_cycle(&mut self, honor_breakpoints: bool) -> CycleReport {
        let mut report = CycleReport::default();
        if self.program_exited || !self.has_active_threads() {
            return report;
        }

        let previous = self.current_thread;
        let mut attempts = 0;
        loop {
            self.current_thread = (self.current_thread + 1) % NUM_THREADS;
            attempts += 1;
            if self.threads[self.current_thread].active || attempts >= NUM_THREADS {
                break;
            }
        }
        if !self.threads[self.current_thread].active {
            return report;
        }

        let tid = self.current_thread;
        let begin_pc = self.threads[tid].pc;

        if honor_breakpoints && self.breakpoints.contains(&begin_pc) {
            report.thread = Some(tid);
            report.begin_pc = begin_pc;
            report.instruction = self.mem.borrow_mut().read32(begin_pc);
            report.cause = self.cpu.csrs.mcause;
            report.user_breakpoint_hit = true;
            return report;
        }

        self.cpu.load_context(&self.threads[tid]);
        self.cpu.tick();
        self.cpu.save_context(&mut self.threads[tid]);
        self.cycle += 1;
        if tid != previous {
            self.cpu.stats.context_switches += 1;
        }

        report.executed = true;
        report.thread = Some(tid);
        report.begin_pc = begin_pc;
        report.instruction = self.cpu.last_instr;
        report.cause = self.cpu.csrs.mcause;

        if self.cpu.exited {
            if !self.program_exited {
                self.program_exit_code = self.cpu.exit_code;
                println!(
                    "{}[EXIT] Program exited with code {}{}",
                    COLOR_EXIT, self.program_exit_code, COLOR_RESET
                );
            }
            self.program_exited = true;
            for t in &mut self.threads {
                t.active = false;
            }
            report.program_exited = true;
            return report;
        }

        let executed_breakpoint = report.instruction == opcodes::EBREAK;
        report.executed_breakpoint = executed_breakpoint;
        if executed_breakpoint {
            if begin_pc != self.last_breakpoint_log_pc[tid] {
                report.log_snapshot = true;
                self.last_breakpoint_log_pc[tid] = begin_pc;
            }
            if !self.saw_breakpoint_trap[tid] {
                self.saw_breakpoint_trap[tid] = true;
                self.breakpoint_mepc[tid] = begin_pc;
            }
            // Resume past the ebreak on this thread's next turn. The core
            // redirected to mtvec during the step; the yield convention
            // overrides that in the saved context.
            self.threads[tid].pc = begin_pc.wrapping_add(4);
            self.cpu.stats.breakpoint_yields += 1;
        }

        if !self.saw_ecall_trap[tid] && report.cause == TrapCause::EnvironmentCallFromM.code() {
            self.saw_ecall_trap[tid] = true;
            self.ecall_mepc[tid] = self.cpu.csrs.mepc;
        }

        report
    }

    /// Runs up to `max_cycles` scheduling steps without honoring user
    /// breakpoints, stopping early on exit or when nothing is runnable.
    pub fn auto_run(&mut self, max_cycles: u64) {
        for _ in 0..max_cycles {
            if !self.has_active_threads() {
                break;
            }
            let report = self.execute_cycle(false);
            if !report.executed {
                break;
            }
            if self.trace_enabled {
                self.print_cycle_trace(&report);
            }
            if report.log_snapshot {
                self.print_breakpoint_snapshot(&report);
            }
            if report.program_exited {
                break;
            }
        }
    }

    /// One line per executed step: cycle count, thread, pc, instruction word.
    pub fn print_cycle_trace(&self, report: &CycleReport) {
        if let Some(t) = report.thread {
            println!(
                "cycle {} [T{}] pc={:#010x} instr={:#010x}",
                self.cycle, t, report.begin_pc, report.instruction
            );
        }
    }

    /// Yield-site snapshot: trap CSRs, the low argument registers, and the
    /// shared counter window at 0x100.
    pub fn print_breakpoint_snapshot(&self, report: &CycleReport) {
        let t = match report.thread {
            Some(t) => t,
            None => return,
        };
        println!(
            "{}[BP][T{}] breakpoint pc={:#010x} mcause={:#010x} mstatus={:#010x}{}",
            COLOR_BP, t, report.begin_pc, report.cause, self.cpu.csrs.mstatus, COLOR_RESET
        );
        print!("  regs:");
        for r in 1..=7 {
            print!(" x{}={:#010x}", r, self.threads[t].regs[r]);
        }
        println!(" a4={:#010x}", self.threads[t].regs[14]);
        print!("  mem:");
        let mut addr = 0x0100u32;
        while addr <= 0x0110 {
            let val = self.mem.borrow_mut().read32(addr);
            print!(" [{:#010x}]={:#010x}", addr, val);
            addr += 4;
        }
        println!();
    }
}
