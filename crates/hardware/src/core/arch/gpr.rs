//! General-Purpose Register File.
//!
//! This module implements the 16-entry, 8-bit register file. It performs
//! the following:
//! 1. **Storage:** Maintains registers `R0`-`R15`.
//! 2. **Invariant Enforcement:** `R0` is hardwired to zero; writes to it are
//!    accepted and reported but have no effect.
//! 3. **Bounds Checking:** Indices past `R15` are errors, never aliased.
//! 4. **Debugging:** Utilities for dumping the register state.

use crate::common::constants::REGISTER_COUNT;
use crate::common::{Result, SimError};

/// Outcome of a register write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was stored.
    Written,
    /// The target was `R0`; nothing changed.
    Ignored,
}

/// General-purpose register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u8; REGISTER_COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15). `R0` always reads 0.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if `idx` is 16 or more.
    pub fn read(&self, idx: usize) -> Result<u8> {
        self.regs
            .get(idx)
            .copied()
            .ok_or_else(|| SimError::register(idx, REGISTER_COUNT))
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15).
    /// * `val` - The value to store.
    ///
    /// # Returns
    ///
    /// [`WriteOutcome::Ignored`] for `R0`, otherwise [`WriteOutcome::Written`].
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if `idx` is 16 or more.
    pub fn write(&mut self, idx: usize, val: u8) -> Result<WriteOutcome> {
        if idx >= REGISTER_COUNT {
            return Err(SimError::register(idx, REGISTER_COUNT));
        }
        if idx == 0 {
            tracing::warn!(value = val, "write to R0 ignored");
            return Ok(WriteOutcome::Ignored);
        }
        self.regs[idx] = val;
        Ok(WriteOutcome::Written)
    }

    /// Clears every register, then applies `presets`.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if any preset names a register past `R15`.
    pub fn preset(&mut self, presets: &[(u8, u8)]) -> Result<()> {
        self.regs = [0; REGISTER_COUNT];
        for &(idx, val) in presets {
            let _ = self.write(idx as usize, val)?;
        }
        Ok(())
    }

    /// All registers, `R0` first.
    pub const fn as_slice(&self) -> &[u8; REGISTER_COUNT] {
        &self.regs
    }

    /// Formats the registers four to a line.
    pub fn dump(&self) -> Vec<String> {
        self.regs
            .chunks(4)
            .enumerate()
            .map(|(row, chunk)| {
                chunk
                    .iter()
                    .enumerate()
                    .map(|(i, v)| format!("R{:<2}={:#04x}", row * 4 + i, v))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}
