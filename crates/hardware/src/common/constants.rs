//! Machine Constants.
//!
//! This module defines the fixed geometry of the simulated machine. It includes:
//! 1. **Register file:** Number of general registers and selector width.
//! 2. **Memory:** Size of the unified program/data store.
//! 3. **Cache:** Line count, index width, and miss penalty.

/// Number of general-purpose registers (`R0`-`R15`).
pub const REGISTER_COUNT: usize = 16;

/// Width of a register selector in bits.
pub const OPERAND_BITS: usize = 4;

/// Width of the data path in bits.
pub const WORD_BITS: usize = 8;

/// Number of addressable cells in the unified program/data store.
pub const MEMORY_SIZE: usize = 256;

/// Number of lines in the direct-mapped data cache.
pub const CACHE_LINES: usize = 8;

/// Number of address bits consumed by the cache index.
pub const CACHE_INDEX_BITS: u32 = 3;

/// Mask selecting the cache index bits of an address.
pub const CACHE_INDEX_MASK: u8 = (CACHE_LINES - 1) as u8;

/// Total cycles a cache miss spends fetching from memory.
///
/// The access cycle itself accounts for one of these, so a miss adds
/// `CACHE_MISS_PENALTY - 1` stall cycles to the pipeline.
pub const CACHE_MISS_PENALTY: u64 = 5;

/// Default safety limit on simulated cycles before a run is aborted.
pub const DEFAULT_MAX_CYCLES: u64 = 10_000;
