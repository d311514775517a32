//! Execute stage.
//!
//! Runs one decoded instruction against the machine state and reports what
//! the pipeline controller needs to know afterwards: the forwardable result,
//! any cache stall, a PC redirect, and whether the machine halted.

use super::Cpu;
use crate::common::{AccessType, Result};
use crate::core::arch::gpr::WriteOutcome;
use crate::isa::{Instruction, Opcode};

/// A data cache access made while executing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheAccess {
    /// Read for LOAD, write for STORE.
    pub kind: AccessType,
    /// Address accessed.
    pub address: u8,
    /// Whether the line was resident.
    pub hit: bool,
    /// Stall cycles charged by the access.
    pub stall_cycles: u64,
}

/// What executing one instruction did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Value written to the destination register, forwardable this cycle.
    pub result: Option<u8>,
    /// Destination register value before the write.
    pub before: Option<u8>,
    /// Cache stall cycles owed before the pipeline may advance.
    pub stall_cycles: u64,
    /// New PC when a jump was taken.
    pub redirect: Option<u8>,
    /// Set by HALT.
    pub halt: bool,
    /// The cache access, if any.
    pub cache: Option<CacheAccess>,
    /// The destination was `R0`, so the write was dropped.
    pub zero_write: bool,
}

impl Cpu {
    /// Executes `inst`.
    ///
    /// ALU ops read the operand register and its successor and write the
    /// operand register. LOAD and STORE set MAR and MDR. Taken jumps set the
    /// PC directly. Unknown opcodes do nothing.
    ///
    /// # Errors
    ///
    /// Propagates register or memory bounds errors.
    pub fn execute(&mut self, inst: &Instruction) -> Result<ExecOutcome> {
        let mut out = ExecOutcome::default();
        let reg = inst.operand as usize;

        match inst.opcode {
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div => {
                let a = self.regs.read(reg)?;
                let b = self.regs.read(inst.second_operand() as usize)?;
                let value = match inst.opcode.alu_op() {
                    Some(op) => self.alu.execute(op, a, b),
                    None => a,
                };
                self.write_dest(reg, value, &mut out)?;
            }
            Opcode::Load => {
                self.mar = inst.address;
                let (value, access) = self.load(inst.address)?;
                self.mdr = value;
                out.stall_cycles = access.map_or(0, |a| a.stall_cycles);
                out.cache = access;
                self.write_dest(reg, value, &mut out)?;
            }
            Opcode::Store => {
                self.mar = inst.address;
                self.mdr = self.regs.read(reg)?;
                let access = self.store(inst.address, self.mdr)?;
                out.stall_cycles = access.map_or(0, |a| a.stall_cycles);
                out.cache = access;
            }
            Opcode::Jmp => self.jump(inst.address, &mut out),
            Opcode::Jz => {
                if self.alu.flags().zero {
                    self.jump(inst.address, &mut out);
                }
            }
            Opcode::Jc => {
                if self.alu.flags().carry {
                    self.jump(inst.address, &mut out);
                }
            }
            Opcode::Halt => {
                self.halted = true;
                out.halt = true;
            }
            Opcode::Nop | Opcode::Unknown(_) => {}
        }

        Ok(out)
    }

    fn write_dest(&mut self, reg: usize, value: u8, out: &mut ExecOutcome) -> Result<()> {
        out.before = Some(self.regs.read(reg)?);
        out.zero_write = self.regs.write(reg, value)? == WriteOutcome::Ignored;
        out.result = Some(value);
        Ok(())
    }

    const fn jump(&mut self, target: u8, out: &mut ExecOutcome) {
        self.pc = target;
        out.redirect = Some(target);
    }
}
