//! Simulation statistics collection and reporting.
//!
//! This module tracks the performance counters of a run. It provides:
//! 1. **Cycles and CPI:** Total cycles, completed instructions, and cycles per instruction.
//! 2. **Stalls:** Load-use hazard stalls and cache-miss stall cycles.
//! 3. **Control flow:** Flushes caused by taken jumps.
//! 4. **Forwarding:** Load-use hazards resolved by bypass.
//! 5. **Data cache:** Hit/miss counts and hit rate.
//!
//! Counters start at zero for every run and only ever increase.

use std::fmt::Write as _;

use serde::Serialize;

/// Performance counters for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulated cycles.
    pub cycles: u64,
    /// Number of instructions executed to completion.
    pub instructions_retired: u64,
    /// Bubbles inserted for load-use hazards.
    pub stalls_data: u64,
    /// Cycles spent waiting on cache misses.
    pub stalls_mem: u64,
    /// Pipeline flushes caused by taken jumps.
    pub flushes: u64,
    /// Load-use hazards resolved by forwarding.
    pub forwards: u64,
    /// Data cache hits.
    pub dcache_hits: u64,
    /// Data cache misses.
    pub dcache_misses: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"stalls"`, `"memory"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "stalls", "memory"];

const RULE: &str = "==========================================================";
const THIN_RULE: &str = "----------------------------------------------------------";

impl SimStats {
    /// Cycles per instruction, or `0.0` when nothing completed.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::stats::SimStats;
    ///
    /// let mut stats = SimStats::default();
    /// assert_eq!(stats.cpi(), 0.0);
    ///
    /// stats.cycles = 9;
    /// stats.instructions_retired = 6;
    /// assert!((stats.cpi() - 1.5).abs() < f64::EPSILON);
    /// ```
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Hazard stalls plus cache stall cycles.
    pub const fn total_stalls(&self) -> u64 {
        self.stalls_data + self.stalls_mem
    }

    /// Data cache hit rate as a percentage, or `0.0` with no accesses.
    pub fn hit_rate(&self) -> f64 {
        let total = self.dcache_hits + self.dcache_misses;
        if total == 0 {
            0.0
        } else {
            self.dcache_hits as f64 / total as f64 * 100.0
        }
    }

    /// Renders the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass
    /// an empty slice to render every section.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "PIPELINE SIMULATION STATISTICS");
        let _ = writeln!(out, "{RULE}");
        if want("summary") {
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_insts                {}", self.instructions_retired);
            let _ = writeln!(
                out,
                "sim_cpi                  {} / {} = {:.3}",
                self.cycles,
                self.instructions_retired,
                self.cpi()
            );
            let _ = writeln!(out, "{THIN_RULE}");
        }
        if want("stalls") {
            let _ = writeln!(out, "STALL BREAKDOWN");
            let _ = writeln!(out, "  stalls.total           {}", self.total_stalls());
            let _ = writeln!(out, "  stalls.hazard          {}", self.stalls_data);
            let _ = writeln!(out, "  stalls.cache           {}", self.stalls_mem);
            let _ = writeln!(out, "  flushes                {}", self.flushes);
            let _ = writeln!(out, "  forwards               {}", self.forwards);
            let _ = writeln!(out, "{THIN_RULE}");
        }
        if want("memory") {
            let _ = writeln!(out, "DATA CACHE");
            let _ = writeln!(out, "  dcache.hits            {}", self.dcache_hits);
            let _ = writeln!(out, "  dcache.misses          {}", self.dcache_misses);
            let _ = writeln!(out, "  dcache.hit_rate        {:.2}%", self.hit_rate());
        }
        let _ = writeln!(out, "{RULE}");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
