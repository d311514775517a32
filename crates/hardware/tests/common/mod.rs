//! Shared test infrastructure.

/// Simulator construction helpers.
pub mod harness;

pub use harness::{TestContext, init_tracing};
