//! # Execute Stage Tests
//!
//! Drives `Cpu::execute` directly, one instruction at a time.

use pipesim_core::common::AccessType;
use pipesim_core::config::{Config, RunMode};
use pipesim_core::core::Cpu;
use pipesim_core::isa::{Instruction, Opcode};
use rstest::rstest;

fn cpu(mode: RunMode) -> Cpu {
    Cpu::new(&Config::default().for_mode(mode))
}

#[rstest]
#[case(Opcode::Add, 5, 3, 8)]
#[case(Opcode::Sub, 8, 2, 6)]
#[case(Opcode::Mul, 7, 6, 42)]
#[case(Opcode::Div, 9, 2, 4)]
#[case(Opcode::Div, 9, 0, 0)]
fn alu_ops_write_operand_register(
    #[case] op: Opcode,
    #[case] a: u8,
    #[case] b: u8,
    #[case] expected: u8,
) {
    let mut cpu = cpu(RunMode::ForwardingOnly);
    cpu.regs.preset(&[(3, a), (4, b)]).unwrap();

    let out = cpu.execute(&Instruction::new(op, 3, 0, 0)).unwrap();
    assert_eq!(out.result, Some(expected));
    assert_eq!(out.before, Some(a));
    assert_eq!(cpu.regs.read(3).unwrap(), expected);
    assert_eq!(cpu.regs.read(4).unwrap(), b);
}

#[test]
fn alu_second_operand_wraps_to_r0() {
    let mut cpu = cpu(RunMode::ForwardingOnly);
    cpu.regs.preset(&[(15, 9)]).unwrap();
    let out = cpu.execute(&Instruction::new(Opcode::Add, 15, 0, 0)).unwrap();
    assert_eq!(out.result, Some(9));
}

#[test]
fn load_and_store_set_mar_and_mdr() {
    let mut cpu = cpu(RunMode::ForwardingOnly);
    cpu.memory.write_byte(0x80, 5).unwrap();

    let out = cpu.execute(&Instruction::new(Opcode::Load, 1, 0x80, 0)).unwrap();
    assert_eq!(out.result, Some(5));
    assert_eq!(out.stall_cycles, 0);
    assert!(out.cache.is_none());
    assert_eq!((cpu.mar, cpu.mdr), (0x80, 5));

    let out = cpu.execute(&Instruction::new(Opcode::Store, 1, 0x82, 1)).unwrap();
    assert_eq!(out.result, None);
    assert_eq!((cpu.mar, cpu.mdr), (0x82, 5));
    assert_eq!(cpu.memory.read_byte(0x82).unwrap(), 5);
}

#[test]
fn cached_load_reports_miss_penalty() {
    let mut cpu = cpu(RunMode::ForwardingCache);
    cpu.memory.write_byte(0x81, 3).unwrap();

    let out = cpu.execute(&Instruction::new(Opcode::Load, 2, 0x81, 0)).unwrap();
    assert_eq!(out.stall_cycles, 4);
    let access = out.cache.unwrap();
    assert_eq!(access.kind, AccessType::Read);
    assert!(!access.hit);

    let out = cpu.execute(&Instruction::new(Opcode::Load, 3, 0x81, 1)).unwrap();
    assert_eq!(out.stall_cycles, 0);
    assert!(out.cache.unwrap().hit);
}

#[test]
fn jmp_always_redirects() {
    let mut cpu = cpu(RunMode::ForwardingOnly);
    let out = cpu.execute(&Instruction::new(Opcode::Jmp, 0, 0x06, 4)).unwrap();
    assert_eq!(out.redirect, Some(0x06));
    assert_eq!(cpu.pc, 0x06);
}

#[rstest]
#[case(3, 3, true)]
#[case(4, 3, false)]
fn jz_follows_zero_flag(#[case] a: u8, #[case] b: u8, #[case] taken: bool) {
    let mut cpu = cpu(RunMode::ForwardingOnly);
    cpu.regs.preset(&[(1, a), (2, b)]).unwrap();
    let _ = cpu.execute(&Instruction::new(Opcode::Sub, 1, 0, 0)).unwrap();
    cpu.pc = 2;

    let out = cpu.execute(&Instruction::new(Opcode::Jz, 0, 0x10, 1)).unwrap();
    assert_eq!(out.redirect.is_some(), taken);
    assert_eq!(cpu.pc, if taken { 0x10 } else { 2 });
}

#[test]
fn jc_follows_carry_flag() {
    let mut cpu = cpu(RunMode::ForwardingOnly);
    cpu.regs.preset(&[(1, 200), (2, 100)]).unwrap();
    let _ = cpu.execute(&Instruction::new(Opcode::Add, 1, 0, 0)).unwrap();
    let out = cpu.execute(&Instruction::new(Opcode::Jc, 0, 0x20, 1)).unwrap();
    assert_eq!(out.redirect, Some(0x20));
}

#[test]
fn halt_sets_flag_and_unknown_is_noop() {
    let mut cpu = cpu(RunMode::ForwardingOnly);
    let out = cpu.execute(&Instruction::new(Opcode::Unknown(0x07), 1, 0, 0)).unwrap();
    assert_eq!(out, Default::default());
    assert!(!cpu.halted);

    let out = cpu.execute(&Instruction::new(Opcode::Halt, 0, 0, 1)).unwrap();
    assert!(out.halt);
    assert!(cpu.halted);
}

#[test]
fn write_to_r0_is_flagged() {
    let mut cpu = cpu(RunMode::ForwardingOnly);
    cpu.memory.write_byte(0x80, 5).unwrap();
    let out = cpu.execute(&Instruction::new(Opcode::Load, 0, 0x80, 0)).unwrap();
    assert!(out.zero_write);
    assert_eq!(cpu.regs.read(0).unwrap(), 0);
}
