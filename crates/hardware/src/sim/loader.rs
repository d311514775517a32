//! Program images and loading.
//!
//! A [`ProgramImage`] is everything needed to start a run: the program and
//! data cells, extra data bytes, and register presets. Images come from
//! three places:
//! 1. **Assembly:** A textual listing, see [`crate::isa::asm`].
//! 2. **JSON:** A serialized image, as produced by `serde_json`.
//! 3. **Built in:** The [`ProgramImage::demo`] program.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::core::Cpu;
use crate::isa::asm::assemble;
use crate::isa::{Instruction, Opcode};
use crate::soc::memory::MemoryCell;

/// Initial machine contents for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramImage {
    /// Cells installed at their own addresses.
    #[serde(default)]
    pub cells: Vec<MemoryCell>,
    /// `(address, byte)` pairs installed as data cells after `cells`.
    #[serde(default)]
    pub data: Vec<(u8, u8)>,
    /// `(register, value)` presets.
    #[serde(default)]
    pub registers: Vec<(u8, u8)>,
}

impl ProgramImage {
    /// Assembles a textual listing.
    ///
    /// # Errors
    ///
    /// [`crate::common::SimError::Assemble`] on the first bad line.
    pub fn from_asm(source: &str) -> Result<Self> {
        let listing = assemble(source)?;
        Ok(Self {
            cells: listing.cells,
            data: Vec::new(),
            registers: listing.registers,
        })
    }

    /// Parses a JSON image.
    ///
    /// # Errors
    ///
    /// [`crate::common::SimError::Json`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads an image from disk. Files ending in `.json` are parsed as JSON;
    /// anything else is assembled.
    ///
    /// # Errors
    ///
    /// I/O, JSON, or assembly errors.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_asm(&text)
        }
    }

    /// The reference program: two loads, a dependent add, a store, and a
    /// jump over a dead `SUB`.
    ///
    /// ```text
    /// 0x00  LOAD  R1, 0x80
    /// 0x01  LOAD  R2, 0x81
    /// 0x02  ADD   R1, R2
    /// 0x03  STORE R1, 0x82
    /// 0x04  JMP   0x06
    /// 0x05  SUB   R3, R4      ; skipped
    /// 0x06  HALT
    /// ```
    ///
    /// Memory holds 5 at `0x80` and 3 at `0x81`; R1-R4 are preset to
    /// 5, 3, 8, 2. On completion R1 = 8 and `0x82` = 8 in every mode.
    pub fn demo() -> Self {
        let program = [
            (Opcode::Load, 1, 0x80),
            (Opcode::Load, 2, 0x81),
            (Opcode::Add, 1, 0),
            (Opcode::Store, 1, 0x82),
            (Opcode::Jmp, 0, 0x06),
            (Opcode::Sub, 3, 0),
            (Opcode::Halt, 0, 0),
        ];
        let cells = program
            .iter()
            .zip(0u8..)
            .map(|(&(op, reg, addr), at)| {
                let inst = Instruction::new(op, reg, addr, at);
                MemoryCell::instruction(at, op.byte(), reg, addr, &inst.mnemonic)
            })
            .collect();

        Self {
            cells,
            data: vec![(0x80, 5), (0x81, 3)],
            registers: vec![(1, 5), (2, 3), (3, 8), (4, 2)],
        }
    }

    /// Installs the image into `cpu`'s memory and registers.
    ///
    /// # Errors
    ///
    /// [`crate::common::SimError::OutOfBounds`] if a register preset names
    /// a register past R15.
    pub fn load_into(&self, cpu: &mut Cpu) -> Result<()> {
        for cell in &self.cells {
            cpu.memory.set_cell(cell.clone());
        }
        for &(addr, value) in &self.data {
            cpu.memory.set_cell(MemoryCell::data(addr, value));
        }
        cpu.regs.preset(&self.registers)
    }
}
