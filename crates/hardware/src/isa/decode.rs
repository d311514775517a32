//! Program cell decoding.
//!
//! Fetch turns a [`MemoryCell`] into an [`Instruction`]. Decoding never
//! fails: an unpopulated cell decodes as `NOP`, and a data literal that is
//! not hexadecimal is read as zero with the problem reported alongside.

use super::instruction::Instruction;
use super::opcode::Opcode;
use crate::common::SimError;
use crate::soc::memory::MemoryCell;

/// Result of decoding one cell.
#[derive(Debug)]
pub struct Decoded {
    /// The decoded instruction.
    pub instruction: Instruction,
    /// Set when the data literal could not be parsed.
    pub malformed: Option<SimError>,
}

/// Decodes `cell`, recording `pc` as the instruction's origin.
///
/// # Examples
///
/// ```
/// use pipesim_core::isa::decode::decode;
/// use pipesim_core::isa::opcode::{codes, Opcode};
/// use pipesim_core::soc::memory::MemoryCell;
///
/// let cell = MemoryCell::instruction(0, codes::LOAD, 1, 0x80, "LOAD R1, 0x80");
/// let d = decode(&cell, 0);
/// assert_eq!(d.instruction.opcode, Opcode::Load);
/// assert_eq!(d.instruction.operand, 1);
/// assert_eq!(d.instruction.address, 0x80);
/// assert!(d.malformed.is_none());
/// ```
pub fn decode(cell: &MemoryCell, pc: u8) -> Decoded {
    if !cell.valid {
        return Decoded {
            instruction: Instruction::nop(pc),
            malformed: None,
        };
    }

    let (address, malformed) = match cell.data_value() {
        Some(v) => (v, None),
        None => (
            0,
            Some(SimError::MalformedOperand {
                address: cell.address,
                literal: cell.data.clone(),
            }),
        ),
    };

    let instruction = Instruction::new(
        Opcode::from_byte(cell.opcode),
        cell.operand_index(),
        address,
        pc,
    );
    Decoded {
        instruction,
        malformed,
    }
}
