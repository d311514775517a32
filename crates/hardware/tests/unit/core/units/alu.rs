//! # ALU Tests
//!
//! Exhaustive checks of the bit-serial operations over every pair of 4-bit
//! operands, plus the 8-bit `Alu` wrapper used by the execute stage.

use pipesim_core::common::bits::{from_bits, from_bits_signed, to_bits};
use pipesim_core::core::units::alu::arithmetic::{add, div, div_unsigned, mul, negate, sub};
use pipesim_core::core::units::alu::{Alu, AluOp};
use proptest::prelude::*;
use rstest::rstest;

fn nibble(v: u8) -> Vec<bool> {
    to_bits(u64::from(v), 4)
}

fn signed(v: u8) -> i64 {
    from_bits_signed(&nibble(v))
}

#[test]
fn add_and_sub_wrap_mod_16_for_all_pairs() {
    for a in 0..16u8 {
        for b in 0..16u8 {
            let (sum, carry) = add(&nibble(a), &nibble(b));
            assert_eq!(from_bits(&sum), u64::from((a + b) % 16), "{a} + {b}");
            assert_eq!(carry, a + b > 15, "carry {a} + {b}");

            let (diff, borrow) = sub(&nibble(a), &nibble(b));
            assert_eq!(from_bits(&diff), u64::from(a.wrapping_sub(b) % 16), "{a} - {b}");
            assert_eq!(borrow, a < b, "borrow {a} - {b}");
        }
    }
}

#[test]
fn mul_matches_signed_product_for_all_pairs() {
    for a in 0..16u8 {
        for b in 0..16u8 {
            let product = mul(&nibble(a), &nibble(b));
            assert_eq!(product.len(), 8);
            assert_eq!(
                from_bits_signed(&product),
                signed(a) * signed(b),
                "{} * {}",
                signed(a),
                signed(b)
            );
        }
    }
}

#[test]
fn div_satisfies_division_identity_for_all_pairs() {
    for a in 0..16u8 {
        for b in 1..16u8 {
            let (q, r) = div(&nibble(a), &nibble(b));
            let (sa, sb) = (signed(a), signed(b));
            let (sq, sr) = (from_bits_signed(&q), from_bits_signed(&r));

            assert_eq!((sq * sb + sr).rem_euclid(16), sa.rem_euclid(16), "{sa} / {sb}");
            assert!(sr.abs() < sb.abs(), "|r| < |b| for {sa} / {sb}");
            assert!(sr == 0 || sr.signum() == sa.signum(), "sign of r for {sa} / {sb}");
        }
    }
}

#[test]
fn divide_by_zero_yields_zero() {
    let (q, r) = div(&nibble(7), &nibble(0));
    assert_eq!(from_bits(&q), 0);
    assert_eq!(from_bits(&r), 0);
}

#[rstest]
#[case(0b1000, 0b1000)]
#[case(0b0001, 0b1111)]
#[case(0b0000, 0b0000)]
#[case(0b0111, 0b1001)]
fn negate_is_twos_complement(#[case] v: u8, #[case] expected: u8) {
    assert_eq!(from_bits(&negate(&nibble(v))), u64::from(expected));
}

proptest! {
    #[test]
    fn unsigned_div_matches_integer_division(a in any::<u8>(), b in 1..=255u8) {
        let (q, r) = div_unsigned(&to_bits(u64::from(a), 8), &to_bits(u64::from(b), 8));
        prop_assert_eq!(from_bits(&q), u64::from(a / b));
        prop_assert_eq!(from_bits(&r), u64::from(a % b));
    }

    #[test]
    fn alu_mul_keeps_low_byte(a in any::<u8>(), b in any::<u8>()) {
        let mut alu = Alu::new();
        prop_assert_eq!(alu.execute(AluOp::Mul, a, b), a.wrapping_mul(b));
    }

    #[test]
    fn alu_add_sets_flags(a in any::<u8>(), b in any::<u8>()) {
        let mut alu = Alu::new();
        let out = alu.execute(AluOp::Add, a, b);
        prop_assert_eq!(out, a.wrapping_add(b));
        prop_assert_eq!(alu.flags().carry, u16::from(a) + u16::from(b) > 255);
        prop_assert_eq!(alu.flags().zero, out == 0);
    }
}

#[test]
fn mul_and_div_leave_flags_alone() {
    let mut alu = Alu::new();
    let _ = alu.execute(AluOp::Sub, 3, 3);
    assert!(alu.flags().zero);
    let _ = alu.execute(AluOp::Mul, 3, 3);
    let _ = alu.execute(AluOp::Div, 9, 3);
    assert!(alu.flags().zero);

    alu.reset();
    assert!(!alu.flags().zero && !alu.flags().carry);
}

#[test]
fn alu_div_is_unsigned_and_tolerates_zero() {
    let mut alu = Alu::new();
    assert_eq!(alu.execute(AluOp::Div, 200, 7), 28);
    assert_eq!(alu.execute(AluOp::Div, 200, 0), 0);
}
