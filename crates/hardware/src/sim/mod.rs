//! Simulation driver.
//!
//! Ties the machine state and pipeline units together into a cycle loop,
//! loads program images, and records trace events.

/// Program images and loading.
pub mod loader;
/// Cycle loop and run reports.
pub mod simulator;
/// Trace events and the event log.
pub mod trace;

pub use loader::ProgramImage;
pub use simulator::{RunReport, Simulator, run_all_modes};
pub use trace::{EventLog, TraceEvent};
