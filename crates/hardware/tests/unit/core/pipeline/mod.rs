/// Load-use hazard detection.
pub mod hazards;
