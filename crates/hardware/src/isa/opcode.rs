//! Opcode encodings.
//!
//! The opcode byte stored in a program cell is decoded once, at fetch, into
//! the closed [`Opcode`] enum. Bytes with no assigned meaning decode to
//! [`Opcode::Unknown`], which executes as a counted no-op.

use std::fmt;

use crate::core::units::alu::AluOp;

/// Raw opcode byte values.
pub mod codes {
    /// No operation.
    pub const NOP: u8 = 0x00;
    /// `R[n] = R[n] + R[n+1]`.
    pub const ADD: u8 = 0x01;
    /// `R[n] = R[n] - R[n+1]`.
    pub const SUB: u8 = 0x02;
    /// `R[n] = R[n] * R[n+1]` (low byte).
    pub const MUL: u8 = 0x03;
    /// `R[n] = R[n] / R[n+1]` (unsigned, zero on divide by zero).
    pub const DIV: u8 = 0x04;
    /// Unconditional jump.
    pub const JMP: u8 = 0x08;
    /// Jump if the ALU zero flag is set.
    pub const JZ: u8 = 0x0B;
    /// Jump if the ALU carry flag is set.
    pub const JC: u8 = 0x0C;
    /// `R[n] = M[addr]`.
    pub const LOAD: u8 = 0x0D;
    /// `M[addr] = R[n]`.
    pub const STORE: u8 = 0x0E;
    /// Halt.
    pub const HALT: u8 = 0x0F;
    /// Alternate halt encoding.
    pub const HALT_ALT: u8 = 0x10;
}

/// Decoded operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// No operation.
    Nop,
    /// Add the operand register and its successor.
    Add,
    /// Subtract the successor from the operand register.
    Sub,
    /// Multiply the operand register by its successor.
    Mul,
    /// Divide the operand register by its successor.
    Div,
    /// Jump to the address field.
    Jmp,
    /// Jump to the address field if the zero flag is set.
    Jz,
    /// Jump to the address field if the carry flag is set.
    Jc,
    /// Load a byte into the operand register.
    Load,
    /// Store the operand register.
    Store,
    /// Stop fetching.
    Halt,
    /// Any other byte.
    Unknown(u8),
}

impl Opcode {
    /// Decodes an opcode byte.
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            codes::NOP => Self::Nop,
            codes::ADD => Self::Add,
            codes::SUB => Self::Sub,
            codes::MUL => Self::Mul,
            codes::DIV => Self::Div,
            codes::JMP => Self::Jmp,
            codes::JZ => Self::Jz,
            codes::JC => Self::Jc,
            codes::LOAD => Self::Load,
            codes::STORE => Self::Store,
            codes::HALT | codes::HALT_ALT => Self::Halt,
            other => Self::Unknown(other),
        }
    }

    /// Canonical encoding of this opcode.
    pub const fn byte(self) -> u8 {
        match self {
            Self::Nop => codes::NOP,
            Self::Add => codes::ADD,
            Self::Sub => codes::SUB,
            Self::Mul => codes::MUL,
            Self::Div => codes::DIV,
            Self::Jmp => codes::JMP,
            Self::Jz => codes::JZ,
            Self::Jc => codes::JC,
            Self::Load => codes::LOAD,
            Self::Store => codes::STORE,
            Self::Halt => codes::HALT,
            Self::Unknown(b) => b,
        }
    }

    /// Looks up an assembler mnemonic, case-insensitively.
    ///
    /// `LD`, `ST`, and `HLT` are accepted as short forms.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        let op = match name.to_ascii_uppercase().as_str() {
            "NOP" => Self::Nop,
            "ADD" => Self::Add,
            "SUB" => Self::Sub,
            "MUL" => Self::Mul,
            "DIV" => Self::Div,
            "JMP" => Self::Jmp,
            "JZ" => Self::Jz,
            "JC" => Self::Jc,
            "LOAD" | "LD" => Self::Load,
            "STORE" | "ST" => Self::Store,
            "HALT" | "HLT" => Self::Halt,
            _ => return None,
        };
        Some(op)
    }

    /// Upper-case mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Jmp => "JMP",
            Self::Jz => "JZ",
            Self::Jc => "JC",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::Halt => "HALT",
            Self::Unknown(_) => "???",
        }
    }

    /// ALU operation for arithmetic opcodes.
    pub const fn alu_op(self) -> Option<AluOp> {
        match self {
            Self::Add => Some(AluOp::Add),
            Self::Sub => Some(AluOp::Sub),
            Self::Mul => Some(AluOp::Mul),
            Self::Div => Some(AluOp::Div),
            _ => None,
        }
    }

    /// ADD, SUB, MUL, or DIV.
    pub const fn is_alu(self) -> bool {
        self.alu_op().is_some()
    }

    /// LOAD.
    pub const fn is_load(self) -> bool {
        matches!(self, Self::Load)
    }

    /// Whether the instruction writes a register that can be forwarded.
    pub const fn produces_result(self) -> bool {
        self.is_alu() || self.is_load()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(b) => write!(f, "??? ({b:#04x})"),
            op => f.write_str(op.mnemonic()),
        }
    }
}
