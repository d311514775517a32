//! MSB-first bit vectors.
//!
//! The ALU operates on fixed-width `bool` vectors with the most significant
//! bit at index 0. These helpers convert between that representation and
//! plain integers.

/// Expands the low `width` bits of `value` into an MSB-first vector.
///
/// # Examples
///
/// ```
/// use pipesim_core::common::bits::to_bits;
///
/// assert_eq!(to_bits(0b0101, 4), vec![false, true, false, true]);
/// ```
pub fn to_bits(value: u64, width: usize) -> Vec<bool> {
    (0..width).rev().map(|i| (value >> i) & 1 == 1).collect()
}

/// Packs an MSB-first vector into an unsigned integer.
pub fn from_bits(bits: &[bool]) -> u64 {
    bits.iter().fold(0, |acc, &b| (acc << 1) | u64::from(b))
}

/// Packs an MSB-first vector into a sign-extended integer.
///
/// The first element is the two's-complement sign bit.
pub fn from_bits_signed(bits: &[bool]) -> i64 {
    let raw = from_bits(bits) as i64;
    match bits.first() {
        Some(true) if bits.len() < 64 => raw - (1_i64 << bits.len()),
        _ => raw,
    }
}

/// Returns `true` if every bit is clear.
pub fn is_zero(bits: &[bool]) -> bool {
    bits.iter().all(|&b| !b)
}

/// Renders an MSB-first vector as a `0`/`1` string.
pub fn render(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}
