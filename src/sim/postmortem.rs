//! End-of-run diagnostics.
//!
//! When a run stops without the program calling exit, this report shows where
//! each thread got to: the first EBREAK yield, the first machine-mode ecall,
//! the live core CSRs, and the shared counter window. The x0 check is the one
//! hard invariant; a nonzero x0 in a saved context fails the run.

use crate::sim::scheduler::Scheduler;

/// Verifies x0 is still zero in both saved contexts.
pub fn check_x0(sched: &Scheduler) -> bool {
    let mut ok = true;
    for (t, ctx) in sched.threads.iter().enumerate() {
        if ctx.regs[0] != 0 {
            eprintln!(
                "[!] [T{}] x0 corrupted: {:#010x} (must remain zero)",
                t, ctx.regs[0]
            );
            ok = false;
        }
    }
    ok
}

/// Prints the postmortem report and returns whether the x0 check passed.
pub fn verify_and_report(sched: &Scheduler) -> bool {
    println!(
        "[Postmortem] run stopped without program exit after {} cycles",
        sched.cycle
    );
    println!(
        "[Postmortem] core: pc={:#010x} privilege={} mcause={:#010x} mepc={:#010x} mstatus={:#010x}",
        sched.cpu.pc,
        sched.cpu.privilege,
        sched.cpu.csrs.mcause,
        sched.cpu.csrs.mepc,
        sched.cpu.csrs.mstatus
    );

    for (t, ctx) in sched.threads.iter().enumerate() {
        let bp = if sched.saw_breakpoint_trap[t] {
            format!("yes @ {:#010x}", sched.breakpoint_mepc[t])
        } else {
            "no".to_string()
        };
        let ecall = if sched.saw_ecall_trap[t] {
            format!("yes @ {:#010x}", sched.ecall_mepc[t])
        } else {
            "no".to_string()
        };
        println!(
            "[Postmortem] [T{}] pc={:#010x} active={} breakpoint_trap={} machine_ecall={}",
            t,
            ctx.pc,
            if ctx.active { "yes" } else { "no" },
            bp,
            ecall
        );
    }

    print!("[Postmortem] mem:");
    let mut addr = 0x0100u32;
    while addr <= 0x0110 {
        let val = sched.mem.borrow_mut().read32(addr);
        print!(" [{:#010x}]={:#010x}", addr, val);
        addr += 4;
    }
    println!();

    let ok = check_x0(sched);
    if ok {
        println!("[Postmortem] x0 check passed");
    }
    ok
}
