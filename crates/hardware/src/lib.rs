//! Two-stage pipeline simulator library.
//!
//! This crate implements a cycle-accurate Fetch/Execute pipeline for a small
//! 8-bit accumulator-style machine with the following:
//! 1. **Core:** A bit-serial ALU, sixteen 8-bit registers, and an execute stage.
//! 2. **Pipeline:** One IF/EX latch, load-use hazard detection, operand
//!    forwarding, and flush on taken jumps.
//! 3. **Memory:** A unified 256-entry store behind an optional direct-mapped,
//!    write-through data cache.
//! 4. **ISA:** Opcode decoding and a line assembler for program listings.
//! 5. **Simulation:** Configuration, program loading, trace events, and
//!    statistics for three run modes.
//!
//! # Examples
//!
//! ```
//! use pipesim_core::sim::{ProgramImage, run_all_modes};
//! use pipesim_core::Config;
//!
//! let results = run_all_modes(&Config::default(), &ProgramImage::demo());
//! for (mode, report) in results {
//!     let report = report.unwrap();
//!     assert_eq!(report.registers[1], 8, "{mode}");
//! }
//! ```

/// Common types and constants (bit vectors, errors, access types).
pub mod common;
/// Simulator configuration and run modes.
pub mod config;
/// CPU core (registers, execute stage, pipeline units, ALU, cache).
pub mod core;
/// Instruction set (opcodes, decode, assembler).
pub mod isa;
/// Cycle loop, program loading, and trace events.
pub mod sim;
/// Unified program/data memory.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Error type returned by every fallible operation.
pub use crate::common::SimError;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Machine state; owned by a [`Simulator`].
pub use crate::core::Cpu;
/// Pipeline controller for one run.
pub use crate::sim::Simulator;
