//! Instruction Set Architecture.
//!
//! The machine has one instruction format: an opcode byte, a 4-bit register
//! selector, and an 8-bit immediate/address field. This module holds:
//! 1. **Opcodes:** The closed [`opcode::Opcode`] enum and its byte encoding.
//! 2. **Instructions:** The decoded [`instruction::Instruction`] form.
//! 3. **Decode:** Program cell to instruction, with literal validation.
//! 4. **Assembler:** A line-oriented listing format for loading programs.

/// Line assembler producing program cells.
pub mod asm;

/// Program cell decoding.
pub mod decode;

/// Decoded instruction representation.
pub mod instruction;

/// Opcode enum and byte encodings.
pub mod opcode;

pub use decode::{Decoded, decode};
pub use instruction::Instruction;
pub use opcode::Opcode;
