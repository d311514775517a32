/// Jumps, halting, PC wrap, and the cycle cap.
pub mod control_flow;
/// The reference program under every mode.
pub mod scenario;
