//! # Load-Use Hazard Tests

use pipesim_core::core::pipeline::hazards::need_stall_load_use;
use pipesim_core::core::pipeline::latches::PipelineLatch;
use pipesim_core::isa::{Instruction, Opcode};
use rstest::rstest;

fn latched(op: Opcode, reg: u8) -> PipelineLatch {
    let mut latch = PipelineLatch::new();
    latch.latch(Instruction::new(op, reg, 0x80, 0));
    latch
}

#[rstest]
#[case::first_alu_source(Instruction::new(Opcode::Add, 2, 0, 1), true)]
#[case::second_alu_source(Instruction::new(Opcode::Add, 1, 0, 1), true)]
#[case::store_source(Instruction::new(Opcode::Store, 2, 0x90, 1), true)]
#[case::unrelated_alu(Instruction::new(Opcode::Sub, 3, 0, 1), false)]
#[case::load_overwrites(Instruction::new(Opcode::Load, 2, 0x81, 1), false)]
#[case::jump(Instruction::new(Opcode::Jmp, 2, 0x02, 1), false)]
fn load_into_r2_then(#[case] next: Instruction, #[case] stall: bool) {
    assert_eq!(need_stall_load_use(&latched(Opcode::Load, 2), &next), stall);
}

#[test]
fn alu_producer_never_stalls() {
    let next = Instruction::new(Opcode::Add, 2, 0, 1);
    assert!(!need_stall_load_use(&latched(Opcode::Add, 2), &next));
}

#[test]
fn load_into_r0_never_stalls() {
    let next = Instruction::new(Opcode::Add, 15, 0, 1);
    assert!(!need_stall_load_use(&latched(Opcode::Load, 0), &next));
}

#[test]
fn empty_latch_never_stalls() {
    let next = Instruction::new(Opcode::Add, 2, 0, 1);
    assert!(!need_stall_load_use(&PipelineLatch::new(), &next));

    let mut latch = latched(Opcode::Load, 2);
    latch.bubble();
    assert!(!need_stall_load_use(&latch, &next));
}
