//! Pipeline register.
//!
//! The machine has exactly two stages, so a single latch sits between Fetch
//! and Execute. It carries the decoded instruction plus the fields the
//! hazard unit and forwarding unit inspect after the instruction executes.

use std::fmt;

use crate::isa::{Instruction, Opcode};

/// What the latch currently holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotKind {
    /// Nothing has been fetched yet, or the last instruction has retired.
    #[default]
    Empty,
    /// A fetched instruction.
    Instruction,
    /// A stall bubble inserted for a load-use hazard.
    Bubble,
    /// The slot was discarded by a taken jump.
    Flushed,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "EMPTY",
            Self::Instruction => "INSTR",
            Self::Bubble => "BUBBLE",
            Self::Flushed => "FLUSHED",
        };
        f.write_str(s)
    }
}

/// IF/EX pipeline register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineLatch {
    /// Whether the slot holds a real instruction.
    pub valid: bool,
    /// Slot contents, distinguishing bubbles and flushes from empty slots.
    pub kind: SlotKind,
    /// The latched instruction (a `NOP` placeholder when invalid).
    pub instruction: Instruction,
    /// Whether the instruction is a LOAD.
    pub is_load: bool,
    /// Register the instruction writes.
    pub dest_reg: u8,
    /// Whether the instruction writes a forwardable result.
    pub produces_result: bool,
    /// The result, once executed.
    pub result_value: u8,
    /// Whether `result_value` may be forwarded this cycle.
    pub result_ready: bool,
    /// Set once the execute stage has run this instruction.
    pub executed: bool,
}

impl Default for PipelineLatch {
    fn default() -> Self {
        Self {
            valid: false,
            kind: SlotKind::Empty,
            instruction: Instruction::nop(0),
            is_load: false,
            dest_reg: 0,
            produces_result: false,
            result_value: 0,
            result_ready: false,
            executed: false,
        }
    }
}

impl PipelineLatch {
    /// Creates an empty latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latches a freshly decoded instruction. The result fields start clear.
    pub fn latch(&mut self, instruction: Instruction) {
        self.valid = true;
        self.kind = SlotKind::Instruction;
        self.is_load = instruction.opcode == Opcode::Load;
        self.dest_reg = instruction.operand;
        self.produces_result = instruction.opcode.produces_result();
        self.instruction = instruction;
        self.clear_result();
        self.executed = false;
    }

    /// Replaces the contents with a stall bubble.
    pub fn bubble(&mut self) {
        self.invalidate(SlotKind::Bubble);
    }

    /// Discards the contents after a taken jump.
    pub fn flush(&mut self) {
        self.invalidate(SlotKind::Flushed);
    }

    /// Empties the slot after the final instruction retires.
    pub fn retire(&mut self) {
        self.invalidate(SlotKind::Empty);
    }

    /// Clears the forwarding fields.
    pub const fn clear_result(&mut self) {
        self.result_value = 0;
        self.result_ready = false;
    }

    /// Records the executed instruction's result and marks it forwardable.
    pub const fn set_result(&mut self, value: u8) {
        self.result_value = value;
        self.result_ready = true;
    }

    /// Text shown for this slot in traces.
    pub fn label(&self) -> String {
        match self.kind {
            SlotKind::Instruction => self.instruction.mnemonic.clone(),
            other => other.to_string(),
        }
    }

    fn invalidate(&mut self, kind: SlotKind) {
        let pc = self.instruction.pc;
        *self = Self {
            kind,
            instruction: Instruction::nop(pc),
            ..Self::default()
        };
    }
}
