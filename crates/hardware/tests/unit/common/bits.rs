//! # Bit Vector Tests

use pipesim_core::common::bits::{from_bits, from_bits_signed, is_zero, render, to_bits};
use proptest::prelude::*;

#[test]
fn msb_comes_first() {
    assert_eq!(render(&to_bits(0x80, 8)), "10000000");
    assert_eq!(render(&to_bits(5, 4)), "0101");
}

#[test]
fn signed_reads_top_bit_as_sign() {
    assert_eq!(from_bits_signed(&to_bits(0b1000, 4)), -8);
    assert_eq!(from_bits_signed(&to_bits(0b0111, 4)), 7);
    assert_eq!(from_bits_signed(&to_bits(0xFF, 8)), -1);
}

#[test]
fn zero_detection() {
    assert!(is_zero(&to_bits(0, 8)));
    assert!(!is_zero(&to_bits(1, 8)));
}

proptest! {
    #[test]
    fn byte_values_survive_conversion(v in any::<u8>()) {
        prop_assert_eq!(from_bits(&to_bits(u64::from(v), 8)), u64::from(v));
    }
}
