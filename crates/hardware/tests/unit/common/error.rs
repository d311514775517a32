//! # Error Tests

use pipesim_core::common::{SimError, Space};

#[test]
fn out_of_bounds_names_the_space() {
    let e = SimError::register(16, 16);
    assert!(matches!(
        e,
        SimError::OutOfBounds {
            space: Space::Register,
            index: 16,
            limit: 16
        }
    ));
    assert_eq!(e.to_string(), "register index 16 out of bounds (limit 16)");

    let e = SimError::memory(300, 256);
    assert!(e.to_string().starts_with("memory address index 300"));
}

#[test]
fn non_termination_reports_cap() {
    let e = SimError::NonTermination { max_cycles: 42 };
    assert!(e.to_string().contains("42 cycles"));
}

#[test]
fn json_errors_convert() {
    let err: SimError = serde_json::from_str::<u8>("nope").unwrap_err().into();
    assert!(matches!(err, SimError::Json(_)));
}
