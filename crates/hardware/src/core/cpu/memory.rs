//! Data access for LOAD and STORE.
//!
//! With a cache present, reads and writes go through it and may report a
//! miss stall. Without one they go straight to memory and never stall.

use super::Cpu;
use super::execution::CacheAccess;
use crate::common::{AccessType, Result};

impl Cpu {
    /// Reads the byte at `addr`.
    ///
    /// # Returns
    ///
    /// The byte and, when the cache is enabled, a description of the access.
    ///
    /// # Errors
    ///
    /// Propagates a memory bounds error.
    pub fn load(&mut self, addr: u8) -> Result<(u8, Option<CacheAccess>)> {
        match self.cache.as_mut() {
            Some(cache) => {
                let read = cache.read(addr, &self.memory)?;
                let access = CacheAccess {
                    kind: AccessType::Read,
                    address: addr,
                    hit: read.hit,
                    stall_cycles: read.stall_cycles,
                };
                Ok((read.data, Some(access)))
            }
            None => Ok((self.memory.read_byte(addr as usize)?, None)),
        }
    }

    /// Writes `value` to `addr`, through the cache if enabled.
    ///
    /// # Errors
    ///
    /// Propagates a memory bounds error.
    pub fn store(&mut self, addr: u8, value: u8) -> Result<Option<CacheAccess>> {
        match self.cache.as_mut() {
            Some(cache) => {
                let write = cache.write(addr, value, &mut self.memory)?;
                Ok(Some(CacheAccess {
                    kind: AccessType::Write,
                    address: addr,
                    hit: write.hit,
                    stall_cycles: write.stall_cycles,
                }))
            }
            None => {
                self.memory.write_byte(addr as usize, value)?;
                Ok(None)
            }
        }
    }
}
