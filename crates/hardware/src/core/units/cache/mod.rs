//! Direct-Mapped Data Cache.
//!
//! This module implements the data cache that sits between the execute stage
//! and memory. It provides:
//! 1. **Geometry:** 8 lines of one byte each; index = `addr & 7`, tag = `addr >> 3`.
//! 2. **Policy:** Write-through with write-allocate. A conflicting tag simply
//!    replaces the resident line.
//! 3. **Timing:** Hits cost nothing extra; a read or write miss stalls for
//!    `miss_penalty - 1` cycles.
//! 4. **Accounting:** Hit, miss, and stall-cycle counters.

use serde::Serialize;

use crate::common::Result;
use crate::common::constants::{CACHE_INDEX_BITS, CACHE_INDEX_MASK, CACHE_LINES};
use crate::soc::memory::Memory;

/// Cache line index for `addr`.
pub const fn index(addr: u8) -> usize {
    (addr & CACHE_INDEX_MASK) as usize
}

/// Cache tag for `addr`.
pub const fn tag(addr: u8) -> u8 {
    addr >> CACHE_INDEX_BITS
}

/// One cache line: valid bit, tag, and a single data byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheLine {
    /// Set once the line has been filled.
    pub valid: bool,
    /// Upper five address bits of the resident byte.
    pub tag: u8,
    /// The cached byte.
    pub data: u8,
}

/// Outcome of a cache read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheRead {
    /// The byte read.
    pub data: u8,
    /// Whether the line was resident.
    pub hit: bool,
    /// Extra stall cycles caused by this access.
    pub stall_cycles: u64,
}

/// Outcome of a cache write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheWrite {
    /// Whether the line was resident.
    pub hit: bool,
    /// Extra stall cycles caused by this access.
    pub stall_cycles: u64,
}

/// Direct-mapped, write-through, write-allocate cache.
#[derive(Clone, Debug)]
pub struct DirectMappedCache {
    lines: [CacheLine; CACHE_LINES],
    miss_penalty: u64,
    /// Accesses that found their line resident.
    pub hits: u64,
    /// Accesses that had to fill their line.
    pub misses: u64,
    /// Sum of the stall cycles charged by misses.
    pub stall_cycles_total: u64,
}

impl DirectMappedCache {
    /// Creates a cache with every line invalid.
    ///
    /// # Arguments
    ///
    /// * `miss_penalty` - Total cycles a miss spends in memory. The access
    ///   cycle covers one of them, so each miss stalls `miss_penalty - 1`.
    pub const fn new(miss_penalty: u64) -> Self {
        Self {
            lines: [CacheLine {
                valid: false,
                tag: 0,
                data: 0,
            }; CACHE_LINES],
            miss_penalty,
            hits: 0,
            misses: 0,
            stall_cycles_total: 0,
        }
    }

    /// Stall cycles charged for one miss.
    pub const fn miss_stall(&self) -> u64 {
        self.miss_penalty.saturating_sub(1)
    }

    /// Returns `true` if `addr` is resident.
    pub const fn contains(&self, addr: u8) -> bool {
        let line = &self.lines[index(addr)];
        line.valid && line.tag == tag(addr)
    }

    /// Reads the byte at `addr`, filling the line from `memory` on a miss.
    ///
    /// # Returns
    ///
    /// The byte, whether the access hit, and the stall cycles it costs.
    ///
    /// # Errors
    ///
    /// Propagates a memory bounds error from the fill.
    pub fn read(&mut self, addr: u8, memory: &Memory) -> Result<CacheRead> {
        let idx = index(addr);
        if self.contains(addr) {
            self.hits += 1;
            return Ok(CacheRead {
                data: self.lines[idx].data,
                hit: true,
                stall_cycles: 0,
            });
        }

        let data = memory.read_byte(addr as usize)?;
        self.install(addr, data);
        let stall_cycles = self.record_miss();
        Ok(CacheRead {
            data,
            hit: false,
            stall_cycles,
        })
    }

    /// Writes `data` to `addr` in memory and in the cache.
    ///
    /// Memory is always updated. A resident line is updated in place; a
    /// missing line is allocated and charged the full miss stall.
    ///
    /// # Errors
    ///
    /// Propagates a memory bounds error from the write-through.
    pub fn write(&mut self, addr: u8, data: u8, memory: &mut Memory) -> Result<CacheWrite> {
        memory.write_byte(addr as usize, data)?;

        if self.contains(addr) {
            self.lines[index(addr)].data = data;
            self.hits += 1;
            return Ok(CacheWrite {
                hit: true,
                stall_cycles: 0,
            });
        }

        self.install(addr, data);
        let stall_cycles = self.record_miss();
        Ok(CacheWrite {
            hit: false,
            stall_cycles,
        })
    }

    /// Invalidates every line and zeroes the counters.
    pub fn reset(&mut self) {
        *self = Self::new(self.miss_penalty);
    }

    /// Current contents, indexed by line.
    pub const fn lines(&self) -> &[CacheLine; CACHE_LINES] {
        &self.lines
    }

    /// Hit rate as a percentage, or 0 before the first access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }

    /// Formats each line as `[i] valid tag data`.
    pub fn dump(&self) -> Vec<String> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                format!(
                    "[{i}] valid={} tag={:#04x} data={:#04x}",
                    u8::from(line.valid),
                    line.tag,
                    line.data
                )
            })
            .collect()
    }

    fn install(&mut self, addr: u8, data: u8) {
        self.lines[index(addr)] = CacheLine {
            valid: true,
            tag: tag(addr),
            data,
        };
    }

    fn record_miss(&mut self) -> u64 {
        let stall = self.miss_stall();
        self.misses += 1;
        self.stall_cycles_total += stall;
        stall
    }
}
