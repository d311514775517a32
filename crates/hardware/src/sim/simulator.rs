//! Pipeline controller.
//!
//! [`Simulator`] owns the machine state, the single Fetch/Execute latch,
//! the forwarding unit, and the counters for one run. Each call to
//! [`Simulator::step`] is one clock cycle and resolves, in priority order:
//! 1. **Cache stall:** An outstanding miss freezes the pipeline.
//! 2. **Execute:** The latched instruction runs once.
//! 3. **Miss penalty:** A miss during execute starts the freeze.
//! 4. **Halt:** HALT drains the latch.
//! 5. **Flush:** A taken jump discards the slot and skips fetch.
//! 6. **Load-use hazard:** The next instruction is forwarded or stalled.
//! 7. **Fetch:** The next instruction is latched and the PC advances.

use serde::Serialize;

use super::loader::ProgramImage;
use super::trace::{EventLog, TraceEvent};
use crate::common::{Result, SimError};
use crate::config::{Config, RunMode};
use crate::core::Cpu;
use crate::core::cpu::ExecOutcome;
use crate::core::pipeline::forwarding::ForwardingUnit;
use crate::core::pipeline::hazards::need_stall_load_use;
use crate::core::pipeline::latches::PipelineLatch;
use crate::core::units::cache;
use crate::isa::Decoded;
use crate::stats::SimStats;

/// `tracing` target for cycle-level events.
pub const TRACE_TARGET: &str = "pipesim::pipeline";

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    /// Configuration the run used.
    pub mode: RunMode,
    /// Final counters.
    pub stats: SimStats,
    /// Cycles per instruction.
    pub cpi: f64,
    /// Hazard stalls plus cache stall cycles.
    pub total_stalls: u64,
    /// Data cache hit rate, in percent.
    pub hit_rate: f64,
    /// Final register file, `R0` first.
    pub registers: Vec<u8>,
}

impl RunReport {
    fn new(mode: RunMode, stats: &SimStats, cpu: &Cpu) -> Self {
        Self {
            mode,
            stats: stats.clone(),
            cpi: stats.cpi(),
            total_stalls: stats.total_stalls(),
            hit_rate: stats.hit_rate(),
            registers: cpu.regs.as_slice().to_vec(),
        }
    }
}

/// Two-stage pipeline simulator for one configuration.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    image: ProgramImage,
    cpu: Cpu,
    latch: PipelineLatch,
    forwarding: ForwardingUnit,
    stats: SimStats,
    events: EventLog,
    cache_stall_remaining: u64,
}

impl Simulator {
    /// Builds a simulator with fresh state and `image` loaded.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] for an invalid configuration, or
    /// [`SimError::OutOfBounds`] for a bad register preset.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::config::{Config, RunMode};
    /// use pipesim_core::sim::{ProgramImage, Simulator};
    ///
    /// let config = Config::default().for_mode(RunMode::NoOptimization);
    /// let mut sim = Simulator::new(&config, &ProgramImage::demo()).unwrap();
    /// let report = sim.run().unwrap();
    /// assert_eq!(report.stats.cycles, 9);
    /// assert_eq!(report.registers[1], 8);
    /// ```
    pub fn new(config: &Config, image: &ProgramImage) -> Result<Self> {
        config.validate()?;
        let mut sim = Self {
            config: config.clone(),
            image: image.clone(),
            cpu: Cpu::new(config),
            latch: PipelineLatch::new(),
            forwarding: ForwardingUnit::new(config.pipeline.forwarding),
            stats: SimStats::default(),
            events: EventLog::new(),
            cache_stall_remaining: 0,
        };
        sim.image.load_into(&mut sim.cpu)?;
        Ok(sim)
    }

    /// Discards all state and reloads the image.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::new`].
    pub fn reset(&mut self) -> Result<()> {
        *self = Self::new(&self.config, &self.image)?;
        Ok(())
    }

    /// Returns `true` once HALT has executed and the latch has drained.
    pub const fn finished(&self) -> bool {
        self.cpu.halted && !self.latch.valid
    }

    /// Advances one clock cycle. Does nothing once the run has finished.
    ///
    /// # Errors
    ///
    /// Propagates register and memory bounds errors.
    pub fn step(&mut self) -> Result<()> {
        if self.finished() {
            return Ok(());
        }
        self.stats.cycles += 1;
        let cycle = self.stats.cycles;

        if self.cache_stall_remaining > 0 {
            self.cache_stall_remaining -= 1;
            self.stats.stalls_mem += 1;
            self.emit(TraceEvent::Stall {
                cycle,
                remaining: self.cache_stall_remaining,
            });
            return Ok(());
        }

        self.forwarding.reset();
        let outcome = if self.latch.valid && !self.latch.executed {
            self.execute_latch(cycle)?
        } else {
            ExecOutcome::default()
        };

        if outcome.stall_cycles > 0 {
            self.cache_stall_remaining = outcome.stall_cycles;
            return Ok(());
        }

        if self.cpu.halted {
            self.latch.retire();
            return Ok(());
        }

        if let Some(target) = outcome.redirect {
            self.latch.flush();
            self.stats.flushes += 1;
            self.emit(TraceEvent::Flush { cycle, target });
            return Ok(());
        }

        let decoded = self.cpu.peek(self.cpu.pc)?;
        if need_stall_load_use(&self.latch, &decoded.instruction) {
            let reg = self.latch.dest_reg;
            if let Some(value) = self.forwarding.check(reg, &self.latch) {
                self.stats.forwards += 1;
                self.emit(TraceEvent::Forward { cycle, reg, value });
            } else {
                self.latch.bubble();
                self.stats.stalls_data += 1;
                self.emit(TraceEvent::Bubble { cycle, reg });
                return Ok(());
            }
        }

        self.fetch(cycle, decoded);
        Ok(())
    }

    /// Steps until the program halts and the pipeline drains.
    ///
    /// # Errors
    ///
    /// [`SimError::NonTermination`] once `max_cycles` cycles have elapsed
    /// without finishing; the partial counters stay readable through
    /// [`Simulator::stats`]. Bounds errors from [`Simulator::step`] are
    /// propagated.
    pub fn run(&mut self) -> Result<RunReport> {
        let mode = self.config.mode();
        let max_cycles = self.config.general.max_cycles;
        tracing::info!(%mode, max_cycles, "run started");

        while !self.finished() {
            if self.stats.cycles >= max_cycles {
                tracing::warn!(%mode, max_cycles, "cycle cap reached before HALT");
                return Err(SimError::NonTermination { max_cycles });
            }
            self.step()?;
        }

        tracing::info!(
            %mode,
            cycles = self.stats.cycles,
            instructions = self.stats.instructions_retired,
            "run finished"
        );
        Ok(self.report())
    }

    /// Summary of the current state.
    pub fn report(&self) -> RunReport {
        RunReport::new(self.config.mode(), &self.stats, &self.cpu)
    }

    /// Counters so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Machine state.
    pub const fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// The Fetch/Execute latch.
    pub const fn latch(&self) -> &PipelineLatch {
        &self.latch
    }

    /// The forwarding unit's state for the last cycle.
    pub const fn forwarding(&self) -> &ForwardingUnit {
        &self.forwarding
    }

    /// Events recorded when `general.record_events` is set.
    pub const fn events(&self) -> &EventLog {
        &self.events
    }

    /// Configuration in effect.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The image loaded at construction.
    pub const fn image(&self) -> &ProgramImage {
        &self.image
    }

    fn execute_latch(&mut self, cycle: u64) -> Result<ExecOutcome> {
        let inst = self.latch.instruction.clone();
        let outcome = self.cpu.execute(&inst)?;
        self.latch.executed = true;
        self.stats.instructions_retired += 1;
        if let Some(value) = outcome.result {
            self.latch.set_result(value);
        }

        if let Some(access) = outcome.cache {
            if access.hit {
                self.stats.dcache_hits += 1;
            } else {
                self.stats.dcache_misses += 1;
            }
            self.emit(TraceEvent::CacheAccess {
                cycle,
                kind: access.kind,
                address: access.address,
                index: cache::index(access.address),
                tag: cache::tag(access.address),
                hit: access.hit,
                stall_cycles: access.stall_cycles,
            });
        }

        self.emit(TraceEvent::Execute {
            cycle,
            pc: inst.pc,
            mnemonic: inst.mnemonic.clone(),
            before: outcome.before,
            after: outcome.result,
        });

        if outcome.zero_write {
            self.emit(TraceEvent::ZeroRegisterWrite { cycle, pc: inst.pc });
        }
        if outcome.halt {
            self.emit(TraceEvent::Halt { cycle, pc: inst.pc });
        }
        Ok(outcome)
    }

    fn fetch(&mut self, cycle: u64, decoded: Decoded) {
        let pc = self.cpu.pc;
        if let Some(err) = decoded.malformed {
            tracing::warn!(target: TRACE_TARGET, pc, "{err}");
            if let SimError::MalformedOperand { address, literal } = err {
                self.emit(TraceEvent::MalformedOperand {
                    cycle,
                    address,
                    literal,
                });
            }
        }

        self.emit(TraceEvent::Fetch {
            cycle,
            pc,
            mnemonic: decoded.instruction.mnemonic.clone(),
        });
        self.latch.latch(decoded.instruction);
        self.cpu.pc = pc.wrapping_add(1);
    }

    fn emit(&mut self, event: TraceEvent) {
        tracing::debug!(target: TRACE_TARGET, "{event}");
        if self.config.general.record_events {
            self.events.push(event);
        }
    }
}

/// Runs `image` once per [`RunMode`], each from fresh state.
///
/// `config` supplies everything except the forwarding and cache toggles.
pub fn run_all_modes(config: &Config, image: &ProgramImage) -> Vec<(RunMode, Result<RunReport>)> {
    RunMode::ALL
        .iter()
        .map(|&mode| {
            let result =
                Simulator::new(&config.for_mode(mode), image).and_then(|mut sim| sim.run());
            (mode, result)
        })
        .collect()
}
