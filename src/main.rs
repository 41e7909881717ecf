//! RV32I Tile Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, system assembly, program loading, and the run itself.
//!
//! # Usage
//!
//! The simulator runs in two modes:
//! 1. **Auto-run Mode**: `--steps N` runs N scheduler steps and reports.
//! 2. **Interactive Mode**: with `--steps 0` (the default) the simulator
//!    drops into a debugger REPL with breakpoints, stepping, and inspection.

use clap::Parser;
use std::io::Write;
use std::{fs, io, process};

extern crate rvtile;

use rvtile::config::Config;
use rvtile::core::Cpu;
use rvtile::sim::debugger;
use rvtile::sim::loader;
use rvtile::sim::postmortem;
use rvtile::sim::Scheduler;
use rvtile::soc::System;

/// Demo image used when no binary is given: addi, addi, add, ecall.
const DEMO_PROGRAM: [u32; 4] = [0x0050_0093, 0x0030_8113, 0x0020_81b3, 0x0000_0073];

/// Command-line arguments for the tile simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "RV32I Tile Simulator")]
struct Args {
    /// TOML configuration file; built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Flat binary to load; the built-in demo program runs when omitted.
    #[arg(short, long)]
    file: Option<String>,

    /// Load address for the program image (decimal or 0x hex).
    #[arg(long)]
    load_addr: Option<String>,

    /// Initial PC (decimal or 0x hex).
    #[arg(long)]
    start_pc: Option<String>,

    /// Scheduler steps to run; 0 enters the interactive debugger.
    #[arg(long)]
    steps: Option<u64>,

    /// Per-instruction trace lines on stderr.
    #[arg(long)]
    trace: bool,
}

fn parse_addr_arg(text: &str, what: &str) -> u32 {
    debugger::parse_u32(text).unwrap_or_else(|| {
        eprintln!("[!] Invalid {}: {}", what, text);
        process::exit(1);
    })
}

/// Main entry point for the tile simulator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses command-line arguments and the TOML
///    configuration file; CLI flags override file settings.
/// 2. **Assembly**: Builds the `System` (memory, accelerator) and the `Cpu`,
///    wiring the shared ports explicitly.
/// 3. **Loader**: Places the flat binary (or the built-in demo image) in
///    memory and points the core at the start PC.
/// 4. **Run**: Auto-runs for `--steps` cycles, or enters the debugger REPL.
/// 5. **Teardown**: Postmortem checks, memory report, statistics, and exit
///    with the program's exit code.
fn main() {
    let args = Args::parse();
    let config: Config = match &args.config {
        Some(path) => {
            let content = fs::read_to_string(path).expect("Failed to read config");
            toml::from_str(&content).expect("Failed to parse config")
        }
        None => Config::default(),
    };

    let trace = args.trace || config.general.trace;
    let steps = args.steps.unwrap_or(config.general.steps);
    let load_addr = match &args.load_addr {
        Some(text) => parse_addr_arg(text, "load address"),
        None => config.system.load_addr_val(),
    };
    let start_pc = match &args.start_pc {
        Some(text) => parse_addr_arg(text, "start pc"),
        None => config.system.start_pc_val(),
    };

    println!("Global Configuration");
    println!("--------------------");
    println!("General:");
    println!("  Trace:     {}", trace);
    println!("  Steps:     {}", steps);
    println!("System:");
    println!("  Start PC:  {:#x}", start_pc);
    println!("  Load Addr: {:#x}", load_addr);
    println!("Memory:");
    println!("  Kind:      {:?}", config.memory.kind);
    println!("  Size:      {} KB", config.memory.size_val() / 1024);
    println!("Accelerator:");
    println!("  Kind:      {:?}", config.accelerator.kind);
    println!("--------------------");

    let system = System::new(&config);
    let mut cpu = Cpu::new();
    cpu.attach_memory(system.mem.clone());
    if let Some(ref accel) = system.accel {
        cpu.attach_accelerator(accel.clone());
    }
    cpu.trace = trace;

    if let Some(ref bin_path) = args.file {
        println!("[*] Flat Binary Mode");
        let bin_data = loader::load_binary(bin_path);
        loader::load_image(&system.mem, &bin_data, load_addr);
    } else {
        println!("[*] Built-in Demo Mode");
        loader::load_words(&system.mem, &DEMO_PROGRAM, load_addr);
    }
    cpu.pc = start_pc;

    let mut sched = Scheduler::new(cpu, system.mem.clone());
    sched.trace_enabled = trace;

    if steps > 0 {
        sched.auto_run(steps);
    } else {
        debugger::run(&mut sched);
    }

    println!();
    if sched.program_exited {
        let code = sched.program_exit_code;
        println!("[*] Exiting with code {}", code);
        let x0_ok = postmortem::check_x0(&sched);
        sched.mem.borrow().report();
        sched.cpu.stats.print();
        io::stdout().flush().ok();
        process::exit(if x0_ok { code as i32 } else { 1 });
    }

    if sched.user_quit {
        sched.mem.borrow().report();
        sched.cpu.stats.print();
        return;
    }

    let ok = postmortem::verify_and_report(&sched);
    sched.mem.borrow().report();
    sched.cpu.stats.print();
    io::stdout().flush().ok();
    process::exit(if ok { 0 } else { 1 });
}
