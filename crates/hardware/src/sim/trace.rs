//! Pipeline trace events.
//!
//! Every observable action of the controller is described by a
//! [`TraceEvent`]. The simulator always emits events through `tracing`
//! (target `pipesim::pipeline`); when recording is enabled it also keeps
//! them in an [`EventLog`], which can be appended to a text file one line
//! per event.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::common::{AccessType, Result};

/// One pipeline event, stamped with the cycle it happened in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    /// An instruction was decoded into the pipeline latch.
    Fetch {
        /// Cycle number.
        cycle: u64,
        /// Address fetched from.
        pc: u8,
        /// Decoded mnemonic.
        mnemonic: String,
    },
    /// The latched instruction executed.
    Execute {
        /// Cycle number.
        cycle: u64,
        /// Address of the instruction.
        pc: u8,
        /// Mnemonic.
        mnemonic: String,
        /// Destination register value before the write.
        before: Option<u8>,
        /// Destination register value after the write.
        after: Option<u8>,
    },
    /// A cycle spent waiting on a cache miss.
    Stall {
        /// Cycle number.
        cycle: u64,
        /// Stall cycles still owed after this one.
        remaining: u64,
    },
    /// A bubble was inserted for a load-use hazard.
    Bubble {
        /// Cycle number.
        cycle: u64,
        /// Register the stalled instruction was waiting on.
        reg: u8,
    },
    /// The latch was invalidated by a taken jump.
    Flush {
        /// Cycle number.
        cycle: u64,
        /// Jump target.
        target: u8,
    },
    /// A loaded value was bypassed to the next instruction.
    Forward {
        /// Cycle number.
        cycle: u64,
        /// Forwarded register.
        reg: u8,
        /// Forwarded value.
        value: u8,
    },
    /// A LOAD or STORE went through the data cache.
    CacheAccess {
        /// Cycle number.
        cycle: u64,
        /// Read or write.
        kind: AccessType,
        /// Address accessed.
        address: u8,
        /// Line index.
        index: usize,
        /// Tag compared.
        tag: u8,
        /// Whether the line was resident.
        hit: bool,
        /// Stall cycles charged.
        stall_cycles: u64,
    },
    /// A write to `R0` was dropped.
    ZeroRegisterWrite {
        /// Cycle number.
        cycle: u64,
        /// Address of the writing instruction.
        pc: u8,
    },
    /// A cell's data literal was not hexadecimal and was read as zero.
    MalformedOperand {
        /// Cycle number.
        cycle: u64,
        /// Address of the cell.
        address: u8,
        /// The literal as stored.
        literal: String,
    },
    /// HALT executed.
    Halt {
        /// Cycle number.
        cycle: u64,
        /// Address of the HALT.
        pc: u8,
    },
}

impl TraceEvent {
    /// Cycle the event happened in.
    pub const fn cycle(&self) -> u64 {
        match self {
            Self::Fetch { cycle, .. }
            | Self::Execute { cycle, .. }
            | Self::Stall { cycle, .. }
            | Self::Bubble { cycle, .. }
            | Self::Flush { cycle, .. }
            | Self::Forward { cycle, .. }
            | Self::CacheAccess { cycle, .. }
            | Self::ZeroRegisterWrite { cycle, .. }
            | Self::MalformedOperand { cycle, .. }
            | Self::Halt { cycle, .. } => *cycle,
        }
    }
}

fn reg_value(v: Option<u8>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:#04x}"))
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[cycle {:>4}] ", self.cycle())?;
        match self {
            Self::Fetch { pc, mnemonic, .. } => write!(f, "FETCH    {pc:#04x}  {mnemonic}"),
            Self::Execute {
                pc,
                mnemonic,
                before,
                after,
                ..
            } => write!(
                f,
                "EXECUTE  {pc:#04x}  {mnemonic}  before={} after={}",
                reg_value(*before),
                reg_value(*after)
            ),
            Self::Stall { remaining, .. } => write!(f, "STALL    cache miss, {remaining} left"),
            Self::Bubble { reg, .. } => write!(f, "BUBBLE   load-use on R{reg}"),
            Self::Flush { target, .. } => write!(f, "FLUSH    jump to {target:#04x}"),
            Self::Forward { reg, value, .. } => write!(f, "FORWARD  R{reg} = {value:#04x}"),
            Self::CacheAccess {
                kind,
                address,
                index,
                tag,
                hit,
                stall_cycles,
                ..
            } => write!(
                f,
                "CACHE    {kind} {address:#04x} line={index} tag={tag:#04x} {} stall={stall_cycles}",
                if *hit { "hit" } else { "miss" }
            ),
            Self::ZeroRegisterWrite { pc, .. } => {
                write!(f, "WARN     {pc:#04x}  write to R0 ignored")
            }
            Self::MalformedOperand {
                address, literal, ..
            } => write!(f, "WARN     {address:#04x}  malformed operand {literal:?}, using 0"),
            Self::Halt { pc, .. } => write!(f, "HALT     {pc:#04x}"),
        }
    }
}

/// Recorded trace events, in emission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<TraceEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `event`.
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Recorded events.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Appends every event to `path`, one line each, creating the file if
    /// needed. Existing content is never truncated.
    ///
    /// # Errors
    ///
    /// [`crate::common::SimError::Io`] if the file cannot be opened or written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut out = BufWriter::new(file);
        for event in &self.events {
            writeln!(out, "{event}")?;
        }
        out.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a TraceEvent;
    type IntoIter = std::slice::Iter<'a, TraceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
