//! Interactive debugger front end.
//!
//! A line-oriented REPL over the scheduler: single-step, run to a breakpoint,
//! inspect thread contexts and memory, toggle tracing. Command parsing is
//! separated from execution so the grammar is testable; a parse error prints
//! a message and re-prompts without touching any simulator state.

use crate::sim::scheduler::{Scheduler, COLOR_BP, COLOR_ERR, COLOR_HINT, COLOR_RESET};
use crate::soc::ports::SharedMemory;
use std::io::{self, BufRead, Write};

/// Which registers a `regs` command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegsTarget {
    All,
    Thread(u32),
    Register(u32, u32),
}

/// One parsed debugger command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Step(u32),
    Cont,
    /// `None` lists the current breakpoints.
    Break(Option<u32>),
    Delete(u32),
    Clear,
    Regs(RegsTarget),
    Mem {
        addr: u32,
        count: u32,
    },
    /// `None` toggles, `Some` sets.
    Trace(Option<bool>),
    Quit,
    Help,
}

/// Parses a numeric literal: decimal, or hex with an 0x/0X prefix.
pub fn parse_u32(text: &str) -> Option<u32> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        text.parse::<u32>().ok()
    }
}

/// Parses one command line. Trailing tokens beyond what a command consumes
/// are ignored. The error string is the message to show the user.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut tokens = line.split_whitespace();
    let word = match tokens.next() {
        Some(w) => w,
        None => return Err("Empty command".to_string()),
    };

    match word.to_ascii_lowercase().as_str() {
        "step" => match tokens.next() {
            None => Ok(Command::Step(1)),
            Some(tok) => match parse_u32(tok) {
                Some(count) if count > 0 => Ok(Command::Step(count)),
                _ => Err("Invalid step count".to_string()),
            },
        },
        "cont" | "continue" => Ok(Command::Cont),
        "break" | "br" => match tokens.next() {
            None => Ok(Command::Break(None)),
            Some(tok) => match parse_u32(tok) {
                Some(addr) => Ok(Command::Break(Some(addr))),
                None => Err("Invalid address".to_string()),
            },
        },
        "delete" | "del" => match tokens.next() {
            None => Err("Usage: delete <addr>".to_string()),
            Some(tok) => match parse_u32(tok) {
                Some(addr) => Ok(Command::Delete(addr)),
                None => Err("Invalid address".to_string()),
            },
        },
        "clear" => Ok(Command::Clear),
        "regs" => match tokens.next() {
            None => Ok(Command::Regs(RegsTarget::All)),
            Some(tok) => match tok.split_once(':') {
                None => match parse_u32(tok) {
                    Some(thread) => Ok(Command::Regs(RegsTarget::Thread(thread))),
                    None => Err("Invalid thread index".to_string()),
                },
                Some((t_str, r_str)) => {
                    let thread =
                        parse_u32(t_str).ok_or_else(|| "Invalid thread index".to_string())?;
                    let reg =
                        parse_u32(r_str).ok_or_else(|| "Invalid register index".to_string())?;
                    Ok(Command::Regs(RegsTarget::Register(thread, reg)))
                }
            },
        },
        "mem" => {
            let addr_tok = tokens
                .next()
                .ok_or_else(|| "Usage: mem <addr> [count]".to_string())?;
            let addr = parse_u32(addr_tok).ok_or_else(|| "Invalid address".to_string())?;
            let count = match tokens.next() {
                None => 4,
                Some(tok) => parse_u32(tok).ok_or_else(|| "Invalid count".to_string())?,
            };
            if count == 0 {
                return Err("Count must be greater than zero".to_string());
            }
            Ok(Command::Mem { addr, count })
        }
        "trace" => match tokens.next() {
            None => Ok(Command::Trace(None)),
            Some(tok) => match tok.to_ascii_lowercase().as_str() {
                "on" => Ok(Command::Trace(Some(true))),
                "off" => Ok(Command::Trace(Some(false))),
                _ => Err("Usage: trace [on|off]".to_string()),
            },
        },
        "quit" | "q" => Ok(Command::Quit),
        "help" => Ok(Command::Help),
        _ => Err(format!("Unknown command: {}", word)),
    }
}

/// Runs the REPL until quit, EOF, or program exit.
pub fn run(sched: &mut Scheduler) {
    println!("Entering tile debugger. Type 'help' for commands.");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("rvtile> ");
        let _ = io::stdout().flush();
        line.clear();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                sched.user_quit = true;
                break;
            }
            Ok(_) => {}
        }
        if line.split_whitespace().next().is_none() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                println!("{}{}{}", COLOR_ERR, msg, COLOR_RESET);
                continue;
            }
        };

        match command {
            Command::Step(count) => run_step(sched, count),
            Command::Cont => run_cont(sched),
            Command::Break(None) => list_breakpoints(sched),
            Command::Break(Some(addr)) => {
                if sched.breakpoints.contains(&addr) {
                    println!("Breakpoint already exists at {:#010x}", addr);
                } else {
                    sched.breakpoints.push(addr);
                    println!("Breakpoint added at {:#010x}", addr);
                }
            }
            Command::Delete(addr) => {
                if let Some(pos) = sched.breakpoints.iter().position(|&b| b == addr) {
                    sched.breakpoints.remove(pos);
                    println!("Breakpoint removed at {:#010x}", addr);
                } else {
                    println!("No breakpoint at {:#010x}", addr);
                }
            }
            Command::Clear => {
                sched.breakpoints.clear();
                println!("All breakpoints cleared");
            }
            Command::Regs(RegsTarget::All) => print_registers(sched),
            Command::Regs(RegsTarget::Thread(t)) => print_registers_for_thread(sched, t),
            Command::Regs(RegsTarget::Register(t, r)) => print_single_register(sched, t, r),
            Command::Mem { addr, count } => dump_memory(&sched.mem, addr, count),
            Command::Trace(mode) => {
                sched.trace_enabled = match mode {
                    Some(on) => on,
                    None => !sched.trace_enabled,
                };
                println!(
                    "Trace {}",
                    if sched.trace_enabled {
                        "enabled"
                    } else {
                        "disabled"
                    }
                );
            }
            Command::Quit => {
                sched.user_quit = true;
                break;
            }
            Command::Help => print_help(),
        }

        if sched.program_exited {
            break;
        }
    }
}

fn run_step(sched: &mut Scheduler, count: u32) {
    for _ in 0..count {
        let report = sched.execute_cycle(false);
        if !report.executed {
            if !sched.has_active_threads() {
                println!("No active threads remain.");
            }
            break;
        }
        sched.print_cycle_trace(&report);
        if report.log_snapshot {
            sched.print_breakpoint_snapshot(&report);
        }
        if report.executed_breakpoint {
            println!(
                "{}[BP] Software breakpoint executed at {:#010x}{}",
                COLOR_BP, report.begin_pc, COLOR_RESET
            );
            break;
        }
        if report.program_exited {
            break;
        }
    }
}

fn run_cont(sched: &mut Scheduler) {
    while sched.has_active_threads() {
        let report = sched.execute_cycle(true);
        if !report.executed {
            if report.user_breakpoint_hit {
                println!(
                    "{}[BP] Hit breakpoint at {:#010x}{}",
                    COLOR_BP, report.begin_pc, COLOR_RESET
                );
                sched.print_breakpoint_snapshot(&report);
            }
            break;
        }
        if sched.trace_enabled {
            sched.print_cycle_trace(&report);
        }
        if report.log_snapshot {
            sched.print_breakpoint_snapshot(&report);
            break;
        }
        if report.executed_breakpoint {
            println!(
                "{}[BP] Software breakpoint executed at {:#010x}{}",
                COLOR_BP, report.begin_pc, COLOR_RESET
            );
            break;
        }
        if report.program_exited {
            break;
        }
    }
}

fn list_breakpoints(sched: &Scheduler) {
    if sched.breakpoints.is_empty() {
        println!("No breakpoints set");
    } else {
        println!("Breakpoints:");
        for addr in &sched.breakpoints {
            println!("  {:#010x}", addr);
        }
    }
}

fn print_registers(sched: &Scheduler) {
    for t in 0..sched.threads.len() {
        print_thread_context(sched, t);
    }
}

fn print_registers_for_thread(sched: &Scheduler, t: u32) {
    if t as usize >= sched.threads.len() {
        println!(
            "{}Invalid thread index (expected 0 or 1){}",
            COLOR_ERR, COLOR_RESET
        );
        return;
    }
    print_thread_context(sched, t as usize);
}

fn print_thread_context(sched: &Scheduler, t: usize) {
    let ctx = &sched.threads[t];
    println!(
        "[T{}] pc={:#010x} active={}",
        t,
        ctx.pc,
        if ctx.active { "yes" } else { "no" }
    );
    for r in 0..32 {
        print!("  x{:02}={:#010x}", r, ctx.regs[r]);
        if r % 4 == 3 {
            println!();
        }
    }
    println!();
}

fn print_single_register(sched: &Scheduler, t: u32, r: u32) {
    if t as usize >= sched.threads.len() {
        println!(
            "{}Invalid thread index (expected 0 or 1){}",
            COLOR_ERR, COLOR_RESET
        );
        return;
    }
    if r >= 32 {
        println!(
            "{}Invalid register index (expected 0-31){}",
            COLOR_ERR, COLOR_RESET
        );
        return;
    }
    let ctx = &sched.threads[t as usize];
    println!(
        "[T{}] x{}={:#010x} (pc={:#010x} active={})",
        t,
        r,
        ctx.regs[r as usize],
        ctx.pc,
        if ctx.active { "yes" } else { "no" }
    );
}

fn dump_memory(mem: &SharedMemory, addr: u32, count: u32) {
    for i in 0..count {
        let current = addr.wrapping_add(i.wrapping_mul(4));
        let value = mem.borrow_mut().read32(current);
        println!("  [{:#010x}] = {:#010x}", current, value);
    }
}

fn print_help() {
    println!("{}Commands:{}", COLOR_HINT, COLOR_RESET);
    println!("  step [N]           - advance N cycles (default 1)");
    println!("  cont               - run until breakpoint or exit");
    println!("  break <addr>       - set breakpoint at PC address");
    println!("  delete <addr>      - remove breakpoint at PC address");
    println!("  clear              - remove all breakpoints");
    println!("  regs               - dump all registers for both threads");
    println!("  regs <t>           - dump registers for thread t (0 or 1)");
    println!("  regs <t>:<reg>     - dump register x<reg> for thread t");
    println!("  mem <addr> [count] - dump memory words");
    println!("  trace [on|off]     - toggle per-cycle tracing");
    println!("  quit               - exit debugger");
}
