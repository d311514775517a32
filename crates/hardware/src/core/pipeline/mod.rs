//! Two-stage instruction pipeline.
//!
//! This module contains the pieces the controller in
//! [`crate::sim::simulator`] drives each cycle:
//! 1. **Latches:** The single IF/EX pipeline register.
//! 2. **Hazards:** Load-use dependency detection.
//! 3. **Forwarding:** Result bypass from the latch to the next instruction.

/// Operand forwarding unit.
pub mod forwarding;

/// Load-use hazard detection.
pub mod hazards;

/// IF/EX pipeline register.
pub mod latches;
