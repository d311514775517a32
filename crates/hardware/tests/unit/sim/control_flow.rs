//! # Control Flow Tests

use pipesim_core::common::SimError;
use pipesim_core::config::RunMode;
use pipesim_core::isa::opcode::codes;
use pipesim_core::sim::{ProgramImage, TraceEvent};
use pipesim_core::soc::memory::MemoryCell;
use rstest::rstest;

use crate::common::TestContext;

const BRANCH: &str = "
    SUB  R1, R2
    JZ   0x03
    ADD  R5, R6
    HALT
";

#[test]
fn taken_jz_flushes_the_fall_through() {
    let (sim, report) = TestContext::new()
        .with_asm(BRANCH)
        .with_reg(1, 3)
        .with_reg(2, 3)
        .with_reg(5, 1)
        .with_reg(6, 1)
        .run_ok();

    assert_eq!(report.stats.flushes, 1);
    assert_eq!(report.stats.cycles, 5);
    assert_eq!(report.stats.instructions_retired, 3);
    assert_eq!(sim.cpu().regs.read(5).unwrap(), 1);
}

#[test]
fn untaken_jz_falls_through() {
    let (sim, report) = TestContext::new()
        .with_asm(BRANCH)
        .with_reg(1, 4)
        .with_reg(2, 3)
        .with_reg(5, 1)
        .with_reg(6, 1)
        .run_ok();

    assert_eq!(report.stats.flushes, 0);
    assert_eq!(report.stats.cycles, 5);
    assert_eq!(report.stats.instructions_retired, 4);
    assert_eq!(sim.cpu().regs.read(5).unwrap(), 2);
}

#[test]
fn jc_takes_carry_from_add() {
    let (sim, report) = TestContext::new()
        .with_asm("ADD R1, R2\nJC 0x03\nADD R5, R6\nHALT")
        .with_reg(1, 200)
        .with_reg(2, 100)
        .with_reg(5, 1)
        .run_ok();

    assert_eq!(report.stats.flushes, 1);
    assert_eq!(sim.cpu().regs.read(1).unwrap(), 44);
    assert_eq!(sim.cpu().regs.read(5).unwrap(), 1);
}

#[test]
fn jump_to_self_hits_the_cycle_cap() {
    let ctx = TestContext::new().with_asm("JMP 0x00").with_max_cycles(50);
    let mut sim = ctx.build();

    let err = sim.run().unwrap_err();
    assert!(matches!(err, SimError::NonTermination { max_cycles: 50 }));
    assert_eq!(sim.stats().cycles, 50);
    assert!(sim.stats().flushes > 0);
    assert!(!sim.cpu().halted);
}

#[test]
fn program_without_halt_never_terminates() {
    let (sim, result) = TestContext::new()
        .with_asm("NOP")
        .with_max_cycles(300)
        .run();
    assert!(matches!(result, Err(SimError::NonTermination { .. })));
    // Fetch runs through all 256 empty cells and wraps.
    assert_eq!(sim.stats().instructions_retired, 299);
}

#[test]
fn pc_wraps_from_ff_to_00() {
    let (sim, report) = TestContext::new()
        .with_asm(".org 0xFF\nNOP\n.org 0\nHALT")
        .with_start_pc(0xFF)
        .run_ok();
    assert_eq!(report.stats.cycles, 3);
    assert_eq!(report.stats.instructions_retired, 2);
    assert_eq!(sim.cpu().pc, 0x01);
}

#[test]
fn alternate_halt_encoding_stops() {
    let mut ctx = TestContext::new().with_asm("NOP\nHALT");
    ctx.image.cells[1].opcode = 0x10;
    let (_, report) = ctx.run_ok();
    assert_eq!(report.stats.instructions_retired, 2);
}

#[test]
fn step_after_finish_is_a_no_op() {
    let ctx = TestContext::new().with_asm("HALT");
    let mut sim = ctx.build();
    let _ = sim.run().unwrap();
    let cycles = sim.stats().cycles;
    sim.step().unwrap();
    assert_eq!(sim.stats().cycles, cycles);
    assert!(sim.finished());
}

#[test]
fn load_into_r0_is_ignored_with_an_event() {
    let (sim, _) = TestContext::new()
        .with_asm("LOAD R0, 0x80\nHALT")
        .with_data(0x80, 5)
        .with_mode(RunMode::NoOptimization)
        .recording()
        .run_ok();

    assert_eq!(sim.cpu().regs.read(0).unwrap(), 0);
    assert!(
        sim.events()
            .events()
            .iter()
            .any(|e| matches!(e, TraceEvent::ZeroRegisterWrite { pc: 0, .. }))
    );
}

#[test]
fn malformed_operand_is_reported_and_read_as_zero() {
    let mut ctx = TestContext::new()
        .with_asm("LOAD R1, 0x80\nHALT")
        .with_reg(1, 9)
        .recording();
    ctx.image.cells[0].data = "not-hex".into();

    let (sim, _) = ctx.run_ok();
    assert!(sim.events().events().iter().any(|e| matches!(
        e,
        TraceEvent::MalformedOperand { address: 0, literal, .. } if literal == "not-hex"
    )));
    // LOAD R1, 0x00 reads the zero byte left behind by the bad literal.
    assert_eq!(sim.cpu().regs.read(1).unwrap(), 0);
}

#[rstest]
#[case::no_optimization(RunMode::NoOptimization)]
#[case::forwarding_cache(RunMode::ForwardingCache)]
fn unknown_opcode_completes_without_side_effects(#[case] mode: RunMode) {
    let image = ProgramImage {
        cells: vec![
            MemoryCell::instruction(0x00, 0x07, 1, 0x80, "???"),
            MemoryCell::instruction(0x01, codes::HALT, 0, 0, "HALT"),
        ],
        data: vec![(0x80, 0x2A)],
        registers: vec![(1, 5), (2, 3)],
    };
    let (sim, report) = TestContext::new()
        .with_mode(mode)
        .with_image(image)
        .run_ok();

    assert_eq!(report.stats.instructions_retired, 2);
    assert_eq!(report.stats.cycles, 3);
    assert_eq!(report.stats.total_stalls(), 0);
    assert_eq!(report.stats.flushes, 0);

    let mut expected = vec![0; 16];
    expected[1] = 5;
    expected[2] = 3;
    assert_eq!(report.registers, expected);
    assert_eq!(sim.cpu().memory.read_byte(0x80).unwrap(), 0x2A);
    assert_eq!(sim.cpu().pc, 2);
}
