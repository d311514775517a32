//! Unified program/data store.
//!
//! The machine has a single 256-entry address space. Each address holds a
//! [`MemoryCell`] (the decode view used by fetch) and a byte (the data view
//! used by LOAD and STORE). The two views are kept consistent: installing a
//! cell sets the byte to its data literal, and writing a byte rewrites the
//! literal.

/// Program store cell records.
pub mod cell;

pub use cell::MemoryCell;

use crate::common::constants::MEMORY_SIZE;
use crate::common::{Result, SimError};

/// 256-entry unified memory.
#[derive(Clone, Debug)]
pub struct Memory {
    cells: Vec<MemoryCell>,
    bytes: Vec<u8>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Creates a memory with every cell empty and every byte zero.
    pub fn new() -> Self {
        Self {
            cells: (0..MEMORY_SIZE).map(|a| MemoryCell::empty(a as u8)).collect(),
            bytes: vec![0; MEMORY_SIZE],
        }
    }

    /// Returns the cell at `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if `addr` is 256 or more.
    pub fn cell(&self, addr: usize) -> Result<&MemoryCell> {
        self.cells
            .get(addr)
            .ok_or_else(|| SimError::memory(addr, MEMORY_SIZE))
    }

    /// Installs `cell` at its own address and updates the byte view.
    ///
    /// A literal that does not parse leaves a zero byte behind; decode
    /// reports the problem when the cell is fetched.
    pub fn set_cell(&mut self, cell: MemoryCell) {
        let addr = cell.address as usize;
        self.bytes[addr] = cell.data_value().unwrap_or(0);
        self.cells[addr] = cell;
    }

    /// Reads the data byte at `addr`.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if `addr` is 256 or more.
    pub fn read_byte(&self, addr: usize) -> Result<u8> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or_else(|| SimError::memory(addr, MEMORY_SIZE))
    }

    /// Writes the data byte at `addr` and rewrites the cell's literal.
    ///
    /// # Errors
    ///
    /// [`SimError::OutOfBounds`] if `addr` is 256 or more.
    pub fn write_byte(&mut self, addr: usize, value: u8) -> Result<()> {
        let (Some(byte), Some(cell)) = (self.bytes.get_mut(addr), self.cells.get_mut(addr)) else {
            return Err(SimError::memory(addr, MEMORY_SIZE));
        };
        *byte = value;
        cell.data = format!("{value:#04x}");
        Ok(())
    }

    /// Resets every cell and byte.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Formats the populated cells in `lo..hi` as `addr: byte  mnemonic` lines.
    pub fn dump_range(&self, lo: usize, hi: usize) -> Vec<String> {
        let hi = hi.min(MEMORY_SIZE);
        (lo..hi)
            .filter(|&a| self.cells[a].valid || self.bytes[a] != 0)
            .map(|a| {
                format!(
                    "{:#04x}: {:#04x}  {}",
                    a, self.bytes[a], self.cells[a].mnemonic
                )
            })
            .collect()
    }
}
