/// Bit-serial ALU.
pub mod alu;
