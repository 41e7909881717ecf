//! Simulation statistics collection and reporting.
//!
//! Tracks cycle and instruction counts, the instruction-category mix, trap
//! activity, and scheduler behavior, and prints a summary block at the end
//! of a run.

use crate::isa::Category;
use std::time::Instant;

/// Counters accumulated over a simulation run.
///
/// The engine owns one of these and bumps the instruction counters per
/// executed tick; the scheduler adds its own context-switch and yield
/// counts on top.
pub struct SimStats {
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,

    pub inst_alu: u64,
    pub inst_load: u64,
    pub inst_store: u64,
    pub inst_branch: u64,
    pub inst_jump: u64,
    pub inst_system: u64,
    pub inst_csr: u64,
    pub inst_custom: u64,
    pub inst_unknown: u64,

    pub traps_taken: u64,

    pub context_switches: u64,
    pub breakpoint_yields: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_jump: 0,
            inst_system: 0,
            inst_csr: 0,
            inst_custom: 0,
            inst_unknown: 0,
            traps_taken: 0,
            context_switches: 0,
            breakpoint_yields: 0,
        }
    }
}

impl SimStats {
    /// Records one executed instruction under its category.
    pub fn count_instruction(&mut self, category: Category) {
        self.instructions_retired += 1;
        match category {
            Category::Alu => self.inst_alu += 1,
            Category::Load => self.inst_load += 1,
            Category::Store => self.inst_store += 1,
            Category::Branch => self.inst_branch += 1,
            Category::Jump => self.inst_jump += 1,
            Category::System => self.inst_system += 1,
            Category::Csr | Category::CsrImm => self.inst_csr += 1,
            Category::Custom => self.inst_custom += 1,
            Category::Unknown => self.inst_unknown += 1,
        }
    }

    /// Prints a formatted summary of the run.
    pub fn print(&self) {
        let duration = self.start_time.elapsed();
        let seconds = duration.as_secs_f64();

        let instr = if self.instructions_retired == 0 {
            1
        } else {
            self.instructions_retired
        };
        let khz = (self.cycles as f64 / seconds) / 1000.0;

        println!("\n==========================================================");
        println!("TILE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("sim_insts                {}", self.instructions_retired);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        let total = instr as f64;
        let mix = |name: &str, count: u64| {
            println!(
                "  {:<22} {} ({:.2}%)",
                name,
                count,
                (count as f64 / total) * 100.0
            );
        };
        mix("op.alu", self.inst_alu);
        mix("op.load", self.inst_load);
        mix("op.store", self.inst_store);
        mix("op.branch", self.inst_branch);
        mix("op.jump", self.inst_jump);
        mix("op.system", self.inst_system);
        mix("op.csr", self.inst_csr);
        mix("op.custom", self.inst_custom);
        mix("op.unknown", self.inst_unknown);
        println!("----------------------------------------------------------");
        println!("SCHEDULER");
        println!("  traps.taken            {}", self.traps_taken);
        println!("  context.switches       {}", self.context_switches);
        println!("  breakpoint.yields      {}", self.breakpoint_yields);
        println!("==========================================================");
    }
}
