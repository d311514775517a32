//! Execution units.
//!
//! This module contains the functional units used by the execute stage:
//! the bit-serial ALU and the direct-mapped data cache.

/// Arithmetic Logic Unit with bit-serial add, subtract, multiply, and divide.
pub mod alu;

/// Direct-mapped, write-through data cache.
pub mod cache;
