//! Simulation error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Bounds violations:** Register or memory indices outside the machine.
//! 2. **Decode advisories:** Operand literals that could not be parsed.
//! 3. **Run aborts:** Programs that never reach a halted, drained pipeline.
//! 4. **Front-end failures:** Assembly, configuration, and I/O problems.

use std::fmt;

use thiserror::Error;

/// Address space that an out-of-range index was aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Space {
    /// The general register file.
    Register,
    /// The unified program/data store.
    Memory,
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register => write!(f, "register"),
            Self::Memory => write!(f, "memory address"),
        }
    }
}

/// Errors raised by the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// An index fell outside the register file or memory.
    ///
    /// Out-of-range reads are never redirected to slot 0.
    #[error("{space} index {index} out of bounds (limit {limit})")]
    OutOfBounds {
        /// Which address space was accessed.
        space: Space,
        /// The offending index.
        index: usize,
        /// Number of valid slots in that space.
        limit: usize,
    },

    /// A data field could not be parsed as hexadecimal.
    ///
    /// Decode continues with the field treated as zero; this variant is
    /// reported alongside the decoded instruction rather than returned.
    #[error("malformed operand {literal:?} at {address:#04x}, using 0")]
    MalformedOperand {
        /// Address of the cell holding the literal.
        address: u8,
        /// The literal as written.
        literal: String,
    },

    /// The safety cycle cap was reached before the program halted.
    #[error("simulation did not terminate within {max_cycles} cycles")]
    NonTermination {
        /// The cap that was hit.
        max_cycles: u64,
    },

    /// A source listing could not be assembled.
    #[error("line {line}: {message}")]
    Assemble {
        /// One-based line number in the listing.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A JSON document could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Builds an [`SimError::OutOfBounds`] for the register file.
    pub const fn register(index: usize, limit: usize) -> Self {
        Self::OutOfBounds {
            space: Space::Register,
            index,
            limit,
        }
    }

    /// Builds an [`SimError::OutOfBounds`] for memory.
    pub const fn memory(index: usize, limit: usize) -> Self {
        Self::OutOfBounds {
            space: Space::Memory,
            index,
            limit,
        }
    }
}
