//! Common types and constants shared by every part of the simulator.
//!
//! This module provides the vocabulary the rest of the crate builds on:
//! 1. **Constants:** Machine geometry (register count, memory size, cache shape).
//! 2. **Bit vectors:** Conversions between integers and MSB-first `bool` vectors.
//! 3. **Memory access:** Classification of data accesses (read/write).
//! 4. **Error handling:** The crate-wide [`SimError`] type.

/// MSB-first bit-vector helpers used by the ALU.
pub mod bits;

/// Machine geometry and timing constants.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error type and result alias.
pub mod error;

pub use data::AccessType;
pub use error::{Result, SimError, Space};
