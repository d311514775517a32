//! # Unit Components
//!
//! Tests for each building block of the simulator, plus end-to-end runs of
//! complete programs under every configuration.





/// Simulator runs, loader, and trace output.
pub mod sim;
