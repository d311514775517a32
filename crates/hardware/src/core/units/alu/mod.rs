//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used by the execute stage. The
//! arithmetic itself lives in [`arithmetic`] as pure bit-serial functions over
//! MSB-first `bool` vectors; [`Alu`] wraps them for the 8-bit data path and
//! keeps the zero/carry flags consumed by `JZ` and `JC`.

/// Bit-serial add, subtract, multiply, and divide.
pub mod arithmetic;

use serde::Serialize;

use crate::common::bits::{from_bits, is_zero, to_bits};
use crate::common::constants::WORD_BITS;

/// ALU operation selected by the decoded opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Multiplication, low byte of the product.
    Mul,
    /// Unsigned division; a zero divisor yields zero.
    Div,
}

/// Condition flags produced by ADD and SUB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AluFlags {
    /// Set when the last ADD/SUB result was zero.
    pub zero: bool,
    /// Carry out of the last ADD, or borrow out of the last SUB.
    pub carry: bool,
}

/// Arithmetic Logic Unit for the 8-bit data path.
///
/// MUL and DIV leave the flags untouched.
#[derive(Clone, Debug, Default)]
pub struct Alu {
    flags: AluFlags,
}

impl Alu {
    /// Creates an ALU with both flags clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes `op` on two register values.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform.
    /// * `a`  - Value of the operand register.
    /// * `b`  - Value of the register following the operand register.
    ///
    /// # Returns
    ///
    /// The 8-bit result to write back.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::{Alu, AluOp};
    ///
    /// let mut alu = Alu::new();
    /// assert_eq!(alu.execute(AluOp::Add, 200, 100), 44);
    /// assert!(alu.flags().carry);
    ///
    /// assert_eq!(alu.execute(AluOp::Sub, 7, 7), 0);
    /// assert!(alu.flags().zero);
    ///
    /// assert_eq!(alu.execute(AluOp::Div, 9, 0), 0);
    /// ```
    pub fn execute(&mut self, op: AluOp, a: u8, b: u8) -> u8 {
        let a = to_bits(u64::from(a), WORD_BITS);
        let b = to_bits(u64::from(b), WORD_BITS);
        let out = match op {
            AluOp::Add => {
                let (sum, carry) = arithmetic::add(&a, &b);
                self.set_flags(&sum, carry);
                sum
            }
            AluOp::Sub => {
                let (diff, borrow) = arithmetic::sub(&a, &b);
                self.set_flags(&diff, borrow);
                diff
            }
            AluOp::Mul => {
                let product = arithmetic::mul(&a, &b);
                product[WORD_BITS..].to_vec()
            }
            AluOp::Div => arithmetic::div_unsigned(&a, &b).0,
        };
        from_bits(&out) as u8
    }

    /// Returns the current condition flags.
    pub const fn flags(&self) -> AluFlags {
        self.flags
    }

    /// Clears both flags.
    pub fn reset(&mut self) {
        self.flags = AluFlags::default();
    }

    fn set_flags(&mut self, result: &[bool], carry: bool) {
        self.flags = AluFlags {
            zero: is_zero(result),
            carry,
        };
    }
}
