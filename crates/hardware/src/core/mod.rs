//! Core processor implementation.
//!
//! This module contains the machine state and the units the pipeline
//! controller drives: the register file, the execute stage, the pipeline
//! latch with its hazard and forwarding logic, and the ALU and data cache.

/// Architectural state (register file).
pub mod arch;

/// Machine state and the execute stage.
pub mod cpu;

/// Pipeline latch, load-use hazard detection, and forwarding.
pub mod pipeline;

/// Execution units (ALU, data cache).
pub mod units;

pub use self::cpu::Cpu;
