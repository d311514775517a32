/// Per-opcode execute behaviour.
pub mod execution;
