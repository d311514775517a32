//! Architectural state.
//!
//! Holds the programmer-visible register file. The scalar special registers
//! (PC, MAR, MDR, halt flag) live directly on [`crate::core::Cpu`].

/// General-purpose register file.
pub mod gpr;
