//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the core model. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (IPC, CPI).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, control flow, system).
//! 3. **Branch prediction:** Resolutions, mispredictions, and accuracy.
//! 4. **Hazards:** Stall cycles by cause, flushed slots and forwarding activity.
//! 5. **Cache hierarchy:** Hit/miss/fill counts for L1-I, L1-D and L2.

use std::fmt::Write as _;
use std::time::Instant;

use serde::Serialize;

/// Counters kept by each cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their line.
    pub hits: u64,
    /// Accesses that allocated the MSHR.
    pub misses: u64,
    /// Lines installed.
    pub fills: u64,
    /// Valid lines replaced by a fill.
    pub evictions: u64,
    /// Dirty lines written to the level below.
    pub writebacks: u64,
    /// Cycles a miss waited because the MSHR was busy.
    pub mshr_stalls: u64,
}

impl CacheStats {
    /// Fraction of accesses that missed, in percent.
    pub fn miss_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            100.0 * self.misses as f64 / total as f64
        }
    }
}

/// Simulation statistics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Instructions retired at Commit.
    pub instructions_retired: u64,

    /// Retired register-register and register-immediate instructions.
    pub inst_alu: u64,
    /// Retired loads.
    pub inst_load: u64,
    /// Retired stores.
    pub inst_store: u64,
    /// Retired branches and jumps.
    pub inst_branch: u64,
    /// Retired system instructions.
    pub inst_system: u64,

    /// Control-flow resolutions that matched the prediction.
    pub branch_correct: u64,
    /// Control-flow resolutions that redirected fetch.
    pub branch_mispredictions: u64,

    /// Cycles lost to load-use stalls.
    pub stalls_data: u64,
    /// Cycles the Memory stage waited on the data cache.
    pub stalls_mem: u64,
    /// Cycles Fetch waited on the instruction cache.
    pub stalls_fetch: u64,
    /// Stall cycles caused by a second miss while an MSHR was busy.
    pub stalls_mshr: u64,
    /// Slots discarded by misprediction and fault flushes.
    pub stalls_control: u64,
    /// Number of flush events.
    pub flushes: u64,

    /// Operands supplied by the FROM_MEM bypass.
    pub forwards_mem: u64,
    /// Operands supplied by the FROM_WB bypass.
    pub forwards_wb: u64,

    /// Instructions retired as decode faults.
    pub decode_errors: u64,
    /// Instructions retired with an architectural fault.
    pub exceptions: u64,

    /// L1 instruction cache counters.
    pub l1_i: CacheStats,
    /// L1 data cache counters.
    pub l1_d: CacheStats,
    /// L2 cache counters.
    pub l2: CacheStats,
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
            inst_system: 0,
            branch_correct: 0,
            branch_mispredictions: 0,
            stalls_data: 0,
            stalls_mem: 0,
            stalls_fetch: 0,
            stalls_mshr: 0,
            stalls_control: 0,
            flushes: 0,
            forwards_mem: 0,
            forwards_wb: 0,
            decode_errors: 0,
            exceptions: 0,
            l1_i: CacheStats::default(),
            l1_d: CacheStats::default(),
            l2: CacheStats::default(),
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `report_sections` to render all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "pred", "cache"];

impl SimStats {
    /// Instructions per cycle.
    pub fn ipc(&self) -> f64 {
        self.instructions_retired as f64 / self.cycles.max(1) as f64
    }

    /// Percentage of control-flow resolutions that were predicted correctly.
    pub fn branch_accuracy(&self) -> f64 {
        let total = self.branch_correct + self.branch_mispredictions;
        if total == 0 {
            0.0
        } else {
            100.0 * self.branch_correct as f64 / total as f64
        }
    }

    /// Renders the requested sections.
    ///
    /// # Arguments
    ///
    /// * `sections` - Names from `STATS_SECTIONS`, or empty for all.
    pub fn report_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| 100.0 * n as f64 / of;
        let rule = "----------------------------------------------------------";
        let mut out = String::new();

        if want("summary") {
            let seconds = self.start_time.elapsed().as_secs_f64();
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "RV64 PIPELINE SIMULATION STATISTICS");
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(out, "sim_ipc                  {:.4}", self.ipc());
            let _ = writeln!(out, "sim_cpi                  {:.4}", cyc / instr);
            let _ = writeln!(out, "{rule}");
        }
        if want("core") {
            let _ = writeln!(out, "CORE BREAKDOWN");
            for (name, n) in [
                ("stalls.data", self.stalls_data),
                ("stalls.memory", self.stalls_mem),
                ("stalls.fetch", self.stalls_fetch),
                ("stalls.mshr", self.stalls_mshr),
                ("stalls.control", self.stalls_control),
            ] {
                let _ = writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, cyc));
            }
            let _ = writeln!(out, "  {:<22} {}", "flushes", self.flushes);
            let _ = writeln!(out, "  {:<22} {}", "forward.from_mem", self.forwards_mem);
            let _ = writeln!(out, "  {:<22} {}", "forward.from_wb", self.forwards_wb);
            let _ = writeln!(out, "  {:<22} {}", "decode_errors", self.decode_errors);
            let _ = writeln!(out, "  {:<22} {}", "exceptions", self.exceptions);
            for (name, n) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.system", self.inst_system),
            ] {
                let _ = writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, instr));
            }
            let _ = writeln!(out, "{rule}");
        }
        if want("pred") {
            let total = self.branch_correct + self.branch_mispredictions;
            let _ = writeln!(out, "BRANCH PREDICTION");
            let _ = writeln!(out, "  bp.lookups             {total}");
            let _ = writeln!(out, "  bp.mispredicts         {}", self.branch_mispredictions);
            let _ = writeln!(out, "  bp.accuracy            {:.2}%", self.branch_accuracy());
            let _ = writeln!(out, "{rule}");
        }
        if want("cache") {
            let _ = writeln!(out, "MEMORY HIERARCHY");
            for (name, c) in [("L1-I", &self.l1_i), ("L1-D", &self.l1_d), ("L2", &self.l2)] {
                let _ = writeln!(
                    out,
                    "  {name:<6} accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}% | writebacks: {}",
                    c.hits + c.misses,
                    c.hits,
                    c.miss_rate(),
                    c.writebacks
                );
            }
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints the requested sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.report_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
