//! Bit-serial arithmetic.
//!
//! Every operation walks MSB-first `bool` vectors one bit at a time, the way
//! the hardware datapath would:
//! - [`add`] / [`sub`]: ripple-carry full adders and full subtractors.
//! - [`mul`]: shift-and-add over an accumulator/multiplier pair with an
//!   arithmetic right shift after each step (radix-2 Booth recoding).
//! - [`div`] / [`div_unsigned`]: restoring division with two's-complement
//!   sign handling.
//!
//! Width is taken from the first operand. The second operand is aligned at
//! the least significant bit and zero-extended if shorter. Overflow wraps.

/// Returns bit `i` counting from the least significant end, or `false`
/// past the top of the vector.
#[inline]
fn lsb(bits: &[bool], i: usize) -> bool {
    bits.len()
        .checked_sub(i + 1)
        .and_then(|idx| bits.get(idx).copied())
        .unwrap_or(false)
}

/// One full-adder cell: `(sum, carry_out)`.
#[inline]
const fn full_add(a: bool, b: bool, carry: bool) -> (bool, bool) {
    (a ^ b ^ carry, (a & b) | (carry & (a ^ b)))
}

/// One full-subtractor cell: `(difference, borrow_out)`.
#[inline]
const fn full_sub(a: bool, b: bool, borrow: bool) -> (bool, bool) {
    (a ^ b ^ borrow, (!a & b) | (!(a ^ b) & borrow))
}

/// Adds two vectors, returning the wrapped sum and the final carry.
///
/// # Examples
///
/// ```
/// use pipesim_core::common::bits::{from_bits, to_bits};
/// use pipesim_core::core::units::alu::arithmetic::add;
///
/// let (sum, carry) = add(&to_bits(9, 4), &to_bits(8, 4));
/// assert_eq!(from_bits(&sum), 1);
/// assert!(carry);
/// ```
pub fn add(a: &[bool], b: &[bool]) -> (Vec<bool>, bool) {
    let width = a.len();
    let mut out = vec![false; width];
    let mut carry = false;
    for i in 0..width {
        let (s, c) = full_add(lsb(a, i), lsb(b, i), carry);
        out[width - 1 - i] = s;
        carry = c;
    }
    (out, carry)
}

/// Subtracts `b` from `a`, returning the wrapped difference and the final
/// borrow. The borrow is set exactly when `a < b` as unsigned values.
pub fn sub(a: &[bool], b: &[bool]) -> (Vec<bool>, bool) {
    let width = a.len();
    let mut out = vec![false; width];
    let mut borrow = false;
    for i in 0..width {
        let (d, br) = full_sub(lsb(a, i), lsb(b, i), borrow);
        out[width - 1 - i] = d;
        borrow = br;
    }
    (out, borrow)
}

/// Two's-complement negation, computed as `0 - a`.
pub fn negate(a: &[bool]) -> Vec<bool> {
    sub(&vec![false; a.len()], a).0
}

/// Copies `a` into a vector `width` bits wide, replicating the sign bit.
fn sign_extend(a: &[bool], width: usize) -> Vec<bool> {
    let sign = a.first().copied().unwrap_or(false);
    let mut out = vec![sign; width.saturating_sub(a.len())];
    out.extend_from_slice(a);
    out
}

/// Copies `a` into a vector `width` bits wide, padding with zeros.
fn zero_extend(a: &[bool], width: usize) -> Vec<bool> {
    let mut out = vec![false; width.saturating_sub(a.len())];
    out.extend_from_slice(a);
    out
}

/// Shifts the concatenation `acc : q : q_1` one place right, keeping the
/// sign of `acc`.
fn shift_right_arith(acc: &mut Vec<bool>, q: &mut Vec<bool>, q_1: &mut bool) {
    *q_1 = q.last().copied().unwrap_or(false);
    let carried = acc.last().copied().unwrap_or(false);
    let _ = q.pop();
    q.insert(0, carried);
    let sign = acc.first().copied().unwrap_or(false);
    let _ = acc.pop();
    acc.insert(0, sign);
}

/// Signed multiply of two `n`-bit vectors into a `2n`-bit product.
///
/// Both operands are read as two's complement. The running accumulator is
/// one bit wider than the operands so that subtracting the most negative
/// multiplicand cannot overflow.
///
/// # Examples
///
/// ```
/// use pipesim_core::common::bits::{from_bits_signed, to_bits};
/// use pipesim_core::core::units::alu::arithmetic::mul;
///
/// // -3 * 5 at 4 bits
/// let p = mul(&to_bits(0b1101, 4), &to_bits(5, 4));
/// assert_eq!(p.len(), 8);
/// assert_eq!(from_bits_signed(&p), -15);
/// ```
pub fn mul(a: &[bool], b: &[bool]) -> Vec<bool> {
    let n = a.len();
    let m = sign_extend(a, n + 1);
    let mut acc = vec![false; n + 1];
    let b = zero_extend(b, n);
    let mut q = b[b.len() - n..].to_vec();
    let mut q_1 = false;

    for _ in 0..n {
        let q0 = q.last().copied().unwrap_or(false);
        match (q0, q_1) {
            (true, false) => acc = sub(&acc, &m).0,
            (false, true) => acc = add(&acc, &m).0,
            _ => {}
        }
        shift_right_arith(&mut acc, &mut q, &mut q_1);
    }

    // acc:q is 2n+1 bits wide; the top bit only repeats the sign.
    let mut product = acc;
    product.extend(q);
    product.split_off(1)
}

/// Unsigned restoring division of two `n`-bit vectors.
///
/// Returns `(quotient, remainder)`, each `n` bits wide. A zero divisor
/// yields zero for both.
pub fn div_unsigned(a: &[bool], b: &[bool]) -> (Vec<bool>, Vec<bool>) {
    let n = a.len();
    if b.iter().all(|&bit| !bit) {
        return (vec![false; n], vec![false; n]);
    }

    let m = zero_extend(b, n + 1);
    let mut acc = vec![false; n + 1];
    let mut q = a.to_vec();

    for _ in 0..n {
        // Shift acc:q left by one.
        let top = q.first().copied().unwrap_or(false);
        let _ = acc.remove(0);
        acc.push(top);
        let _ = q.remove(0);

        let (trial, borrow) = sub(&acc, &m);
        if borrow {
            acc = add(&trial, &m).0;
            q.push(false);
        } else {
            acc = trial;
            q.push(true);
        }
    }

    (q, acc.split_off(1))
}

/// Signed division of two `n`-bit vectors.
///
/// Negative operands are negated before an unsigned restoring divide. The
/// quotient is negated when the operand signs differ and the remainder takes
/// the sign of the dividend, so `a == q * b + r` holds in `n`-bit arithmetic.
/// A zero divisor yields zero for both.
///
/// # Examples
///
/// ```
/// use pipesim_core::common::bits::{from_bits_signed, to_bits};
/// use pipesim_core::core::units::alu::arithmetic::div;
///
/// // -7 / 2 at 4 bits
/// let (q, r) = div(&to_bits(0b1001, 4), &to_bits(2, 4));
/// assert_eq!(from_bits_signed(&q), -3);
/// assert_eq!(from_bits_signed(&r), -1);
/// ```
pub fn div(a: &[bool], b: &[bool]) -> (Vec<bool>, Vec<bool>) {
    let n = a.len();
    let b = zero_extend(b, n);
    if b.iter().all(|&bit| !bit) {
        return (vec![false; n], vec![false; n]);
    }

    let a_neg = a.first().copied().unwrap_or(false);
    let b_neg = b.first().copied().unwrap_or(false);
    let mag_a = if a_neg { negate(a) } else { a.to_vec() };
    let mag_b = if b_neg { negate(&b) } else { b };

    let (q, r) = div_unsigned(&mag_a, &mag_b);
    let q = if a_neg == b_neg { q } else { negate(&q) };
    let r = if a_neg { negate(&r) } else { r };
    (q, r)
}
