//! Load-use hazard detection.
//!
//! Execute runs before fetch within a cycle, so the only dependency the
//! machine can see is between the LOAD just executed in the latch and the
//! instruction about to be fetched. The controller resolves it either by
//! forwarding or by inserting a bubble.

use crate::core::pipeline::latches::PipelineLatch;
use crate::isa::Instruction;

/// Checks whether fetching `next` would create a load-use hazard.
///
/// A hazard exists when the latch holds a valid LOAD whose destination
/// register is one of `next`'s source registers. Loads into `R0` never
/// create a hazard because that register cannot change.
///
/// # Arguments
///
/// * `latch` - The IF/EX register after this cycle's execute step.
/// * `next`  - The instruction at the current PC, decoded but not latched.
///
/// # Returns
///
/// `true` if `next` must wait for or receive the loaded value.
pub fn need_stall_load_use(latch: &PipelineLatch, next: &Instruction) -> bool {
    if !latch.valid || !latch.is_load || latch.dest_reg == 0 {
        return false;
    }
    next.reads(latch.dest_reg)
}
