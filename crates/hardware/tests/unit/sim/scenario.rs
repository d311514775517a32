//! # Reference Program Tests
//!
//! Runs the demo program (two loads, a dependent add, a store, and a jump
//! over a dead `SUB`) under each run mode and checks the exact counters.

use pipesim_core::config::{Config, RunMode};
use pipesim_core::sim::{ProgramImage, Simulator, TraceEvent, run_all_modes};
use pipesim_core::stats::SimStats;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::TestContext;

fn expected(mode: RunMode) -> SimStats {
    match mode {
        RunMode::NoOptimization => SimStats {
            cycles: 9,
            instructions_retired: 6,
            stalls_data: 1,
            flushes: 1,
            ..SimStats::default()
        },
        RunMode::ForwardingOnly => SimStats {
            cycles: 8,
            instructions_retired: 6,
            flushes: 1,
            forwards: 1,
            ..SimStats::default()
        },
        RunMode::ForwardingCache => SimStats {
            cycles: 23,
            instructions_retired: 6,
            stalls_mem: 12,
            flushes: 1,
            forwards: 1,
            dcache_misses: 3,
            ..SimStats::default()
        },
    }
}

#[rstest]
#[case(RunMode::NoOptimization)]
#[case(RunMode::ForwardingOnly)]
#[case(RunMode::ForwardingCache)]
fn demo_counters(#[case] mode: RunMode) {
    let (_, report) = TestContext::demo().with_mode(mode).run_ok();
    assert_eq!(report.mode, mode);
    assert_eq!(report.stats, expected(mode));
}

#[rstest]
#[case(RunMode::NoOptimization)]
#[case(RunMode::ForwardingOnly)]
#[case(RunMode::ForwardingCache)]
fn demo_final_state(#[case] mode: RunMode) {
    let (sim, report) = TestContext::demo().with_mode(mode).run_ok();
    let cpu = sim.cpu();

    assert_eq!(&report.registers[1..5], &[8, 3, 8, 2]);
    assert_eq!(cpu.memory.read_byte(0x82).unwrap(), 8);
    assert_eq!(cpu.memory.read_byte(0x80).unwrap(), 5);
    assert_eq!(cpu.memory.read_byte(0x81).unwrap(), 3);
    assert!(cpu.halted);
    assert!(!sim.latch().valid);
    assert_eq!(cpu.pc, 0x07);
}

#[test]
fn no_optimization_cpi_is_one_and_a_half() {
    let (_, report) = TestContext::demo()
        .with_mode(RunMode::NoOptimization)
        .run_ok();
    assert!((report.cpi - 1.5).abs() < 1e-9);
    assert_eq!(report.total_stalls, 1);
}

#[test]
fn cache_run_misses_on_every_access() {
    let (sim, report) = TestContext::demo()
        .with_mode(RunMode::ForwardingCache)
        .run_ok();
    assert_eq!(report.hit_rate, 0.0);
    assert_eq!(report.total_stalls, 12);

    let cache = sim.cpu().cache.as_ref().unwrap();
    assert!(cache.contains(0x80) && cache.contains(0x81) && cache.contains(0x82));
    assert_eq!(cache.lines()[2].data, 8);
}

#[test]
fn stall_and_flush_happen_where_expected() {
    let (sim, _) = TestContext::demo()
        .with_mode(RunMode::NoOptimization)
        .recording()
        .run_ok();

    let interesting: Vec<_> = sim
        .events()
        .events()
        .iter()
        .filter(|e| matches!(e, TraceEvent::Bubble { .. } | TraceEvent::Flush { .. }))
        .cloned()
        .collect();
    assert_eq!(
        interesting,
        vec![
            TraceEvent::Bubble { cycle: 3, reg: 2 },
            TraceEvent::Flush {
                cycle: 7,
                target: 6
            },
        ]
    );
}

#[test]
fn forwarding_replaces_the_bubble() {
    let (sim, _) = TestContext::demo()
        .with_mode(RunMode::ForwardingOnly)
        .recording()
        .run_ok();

    let forwards: Vec<_> = sim
        .events()
        .events()
        .iter()
        .filter(|e| matches!(e, TraceEvent::Forward { .. }))
        .cloned()
        .collect();
    assert_eq!(
        forwards,
        vec![TraceEvent::Forward {
            cycle: 3,
            reg: 2,
            value: 3
        }]
    );
}

#[test]
fn dead_sub_never_executes() {
    let (sim, _) = TestContext::demo().recording().run_ok();
    assert!(!sim.events().events().iter().any(|e| matches!(
        e,
        TraceEvent::Execute { mnemonic, .. } if mnemonic.starts_with("SUB")
    )));
}

#[test]
fn modes_are_isolated_and_deterministic() {
    let config = Config::default();
    let image = ProgramImage::demo();

    let first = run_all_modes(&config, &image);
    let second = run_all_modes(&config, &image);
    assert_eq!(first.len(), 3);

    for ((mode_a, a), (mode_b, b)) in first.into_iter().zip(second) {
        assert_eq!(mode_a, mode_b);
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a, b);
        assert_eq!(a.stats, expected(mode_a));
    }
}

#[test]
fn reset_reproduces_the_run() {
    let ctx = TestContext::demo().with_mode(RunMode::ForwardingCache).recording();
    let mut sim: Simulator = ctx.build();
    let first = sim.run().unwrap();
    let first_events = sim.events().clone();

    sim.reset().unwrap();
    assert_eq!(sim.stats(), &SimStats::default());
    assert!(sim.events().is_empty());

    let second = sim.run().unwrap();
    assert_eq!(first, second);
    assert_eq!(&first_events, sim.events());
}
