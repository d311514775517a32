//! Memory system.
//!
//! The machine has no bus or devices; the only component outside the core is
//! the unified 256-entry program/data store.

/// Unified program/data store.
pub mod memory;
