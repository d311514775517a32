//! Operand forwarding.
//!
//! The forwarding unit bypasses the latched instruction's result to the
//! instruction being fetched. Apart from the enable toggle it holds only
//! observables for the current cycle, which [`ForwardingUnit::reset`]
//! clears at the start of every cycle.

use crate::core::pipeline::latches::PipelineLatch;

/// Forwarding unit state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardingUnit {
    /// Whether forwarding is enabled for this run.
    pub enabled: bool,
    /// Whether a value was forwarded this cycle.
    pub active: bool,
    /// Register whose value was forwarded.
    pub reg: u8,
    /// The forwarded value.
    pub value: u8,
}

impl ForwardingUnit {
    /// Creates a unit with the given toggle and no activity.
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            active: false,
            reg: 0,
            value: 0,
        }
    }

    /// Clears this cycle's observables, keeping the toggle.
    pub const fn reset(&mut self) {
        self.active = false;
        self.reg = 0;
        self.value = 0;
    }

    /// Returns the value of `required_reg` if `latch` can supply it now.
    ///
    /// Forwarding succeeds when the unit is enabled and the latch holds a
    /// valid instruction that produces a result, has that result ready,
    /// and writes `required_reg`. A success is recorded in the unit's
    /// observables.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::pipeline::forwarding::ForwardingUnit;
    /// use pipesim_core::core::pipeline::latches::PipelineLatch;
    /// use pipesim_core::isa::{Instruction, Opcode};
    ///
    /// let mut latch = PipelineLatch::new();
    /// latch.latch(Instruction::new(Opcode::Load, 2, 0x81, 1));
    /// latch.set_result(3);
    ///
    /// let mut fwd = ForwardingUnit::new(true);
    /// assert_eq!(fwd.check(2, &latch), Some(3));
    /// assert!(fwd.active);
    /// assert_eq!(fwd.check(4, &latch), None);
    /// ```
    pub const fn check(&mut self, required_reg: u8, latch: &PipelineLatch) -> Option<u8> {
        if self.enabled
            && latch.valid
            && latch.produces_result
            && latch.result_ready
            && latch.dest_reg == required_reg
        {
            self.active = true;
            self.reg = required_reg;
            self.value = latch.result_value;
            Some(latch.result_value)
        } else {
            None
        }
    }
}
