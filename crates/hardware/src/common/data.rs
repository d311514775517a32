//! Memory Access Types.
//!
//! Classifies data accesses made by the execute stage so the cache and the
//! trace log can report them uniformly.

use std::fmt;

use serde::Serialize;

/// Type of data memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Data read access issued by a LOAD.
    Read,

    /// Data write access issued by a STORE.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}
