//! Decoded instructions.
//!
//! An [`Instruction`] is the immutable form of a program cell after fetch:
//! opcode, register selector, address field, and the PC it came from.

use std::fmt;

use super::opcode::Opcode;
use crate::common::constants::REGISTER_COUNT;

/// A fetched and decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Decoded operation.
    pub opcode: Opcode,
    /// Register selector (0-15).
    pub operand: u8,
    /// Immediate/address field.
    pub address: u8,
    /// Address the instruction was fetched from.
    pub pc: u8,
    /// Human-readable form, e.g. `LOAD R1, 0x80`.
    pub mnemonic: String,
}

impl Instruction {
    /// Builds an instruction and derives its mnemonic.
    pub fn new(opcode: Opcode, operand: u8, address: u8, pc: u8) -> Self {
        let mut inst = Self {
            opcode,
            operand: operand % REGISTER_COUNT as u8,
            address,
            pc,
            mnemonic: String::new(),
        };
        inst.mnemonic = inst.to_string();
        inst
    }

    /// A `NOP` at `pc`.
    pub fn nop(pc: u8) -> Self {
        Self::new(Opcode::Nop, 0, 0, pc)
    }

    /// The register an ALU op reads alongside its operand register.
    pub const fn second_operand(&self) -> u8 {
        (self.operand + 1) % REGISTER_COUNT as u8
    }

    /// Whether this instruction reads `reg` as a source.
    ///
    /// ALU ops read the operand register and its successor; STORE reads the
    /// operand register. Nothing else reads a register.
    pub const fn reads(&self, reg: u8) -> bool {
        match self.opcode {
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div => {
                self.operand == reg || self.second_operand() == reg
            }
            Opcode::Store => self.operand == reg,
            _ => false,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode {
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div => write!(
                f,
                "{} R{}, R{}",
                self.opcode,
                self.operand,
                self.second_operand()
            ),
            Opcode::Load | Opcode::Store => {
                write!(f, "{} R{}, {:#04x}", self.opcode, self.operand, self.address)
            }
            Opcode::Jmp | Opcode::Jz | Opcode::Jc => {
                write!(f, "{} {:#04x}", self.opcode, self.address)
            }
            Opcode::Nop | Opcode::Halt | Opcode::Unknown(_) => write!(f, "{}", self.opcode),
        }
    }
}
