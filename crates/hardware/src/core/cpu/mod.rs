//! CPU machine state.
//!
//! [`Cpu`] owns every piece of architectural state a run mutates: the
//! register file, the unified memory, the optional data cache, the ALU
//! flags, and the special registers (PC, MAR, MDR, halt flag). Each
//! simulation builds its own `Cpu`, so runs never share state.
//!
//! The execute stage is in [`execution`] and cache-aware data access in
//! [`memory`].

/// Execute stage.
pub mod execution;

/// LOAD/STORE data access through the cache or straight to memory.
pub mod memory;

pub use execution::{CacheAccess, ExecOutcome};

use crate::common::Result;
use crate::config::Config;
use crate::core::arch::gpr::RegisterFile;
use crate::core::units::alu::Alu;
use crate::core::units::cache::DirectMappedCache;
use crate::isa::decode::{Decoded, decode};
use crate::soc::memory::Memory;

/// Architectural and micro-architectural state of the machine.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Unified program/data store.
    pub memory: Memory,
    /// Data cache, present only when enabled for this run.
    pub cache: Option<DirectMappedCache>,
    /// ALU and its condition flags.
    pub alu: Alu,
    /// Address of the next instruction to fetch.
    pub pc: u8,
    /// Memory address register.
    pub mar: u8,
    /// Memory data register.
    pub mdr: u8,
    /// Set once HALT executes.
    pub halted: bool,
}

impl Cpu {
    /// Creates a CPU with empty memory and zeroed registers.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            memory: Memory::new(),
            cache: config
                .cache
                .enabled
                .then(|| DirectMappedCache::new(config.cache.miss_penalty)),
            alu: Alu::new(),
            pc: config.general.start_pc,
            mar: 0,
            mdr: 0,
            halted: false,
        }
    }

    /// Decodes the instruction at `pc` without changing any state.
    ///
    /// # Errors
    ///
    /// Propagates a memory bounds error.
    pub fn peek(&self, pc: u8) -> Result<Decoded> {
        Ok(decode(self.memory.cell(pc as usize)?, pc))
    }

    /// Formats the special registers and the register file.
    pub fn dump_state(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "PC={:#04x} MAR={:#04x} MDR={:#04x} halted={} Z={} C={}",
            self.pc,
            self.mar,
            self.mdr,
            self.halted,
            u8::from(self.alu.flags().zero),
            u8::from(self.alu.flags().carry),
        )];
        lines.extend(self.regs.dump());
        lines
    }
}
