//! Program store cells.
//!
//! A cell is the record an external loader writes for one address: the
//! instruction's source text, mnemonic, opcode byte, 4-bit register
//! selector, and a hex literal for the immediate/address field.

use serde::{Deserialize, Serialize};

use crate::common::bits::{from_bits, to_bits};
use crate::common::constants::OPERAND_BITS;

/// One entry of the unified program/data store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryCell {
    /// Address of this cell.
    pub address: u8,
    /// Source text the cell was assembled from.
    #[serde(default)]
    pub text: String,
    /// Human-readable mnemonic, for display only.
    #[serde(default)]
    pub mnemonic: String,
    /// Encoded opcode byte.
    #[serde(default)]
    pub opcode: u8,
    /// Register selector, most significant bit first.
    #[serde(default)]
    pub operand: [bool; OPERAND_BITS],
    /// Immediate/address field as a hex literal (`"0x80"` or `"80"`).
    #[serde(default = "MemoryCell::default_data")]
    pub data: String,
    /// Whether the loader populated this cell.
    #[serde(default = "MemoryCell::default_valid")]
    pub valid: bool,
}

impl MemoryCell {
    fn default_data() -> String {
        "0x00".to_string()
    }

    const fn default_valid() -> bool {
        true
    }

    /// Creates an unpopulated cell at `address`.
    pub fn empty(address: u8) -> Self {
        Self {
            address,
            text: String::new(),
            mnemonic: String::new(),
            opcode: 0,
            operand: [false; OPERAND_BITS],
            data: Self::default_data(),
            valid: false,
        }
    }

    /// Creates a populated instruction cell.
    ///
    /// # Arguments
    ///
    /// * `address`  - Where the cell lives.
    /// * `opcode`   - Encoded opcode byte.
    /// * `operand`  - Register selector (0-15; higher bits are dropped).
    /// * `data`     - Immediate/address field.
    /// * `mnemonic` - Display mnemonic.
    pub fn instruction(address: u8, opcode: u8, operand: u8, data: u8, mnemonic: &str) -> Self {
        Self {
            address,
            text: mnemonic.to_string(),
            mnemonic: mnemonic.to_string(),
            opcode,
            operand: Self::selector_bits(operand),
            data: format!("{data:#04x}"),
            valid: true,
        }
    }

    /// Creates a data cell holding `value`.
    pub fn data(address: u8, value: u8) -> Self {
        Self {
            address,
            text: format!(".byte {value:#04x}"),
            mnemonic: "DATA".to_string(),
            opcode: 0,
            operand: [false; OPERAND_BITS],
            data: format!("{value:#04x}"),
            valid: true,
        }
    }

    /// Register selector as an index.
    pub fn operand_index(&self) -> u8 {
        from_bits(&self.operand) as u8
    }

    /// Parses the data literal, returning `None` if it is not hex.
    pub fn data_value(&self) -> Option<u8> {
        let literal = self.data.trim();
        let digits = literal
            .strip_prefix("0x")
            .or_else(|| literal.strip_prefix("0X"))
            .unwrap_or(literal);
        u8::from_str_radix(digits, 16).ok()
    }

    fn selector_bits(operand: u8) -> [bool; OPERAND_BITS] {
        let bits = to_bits(u64::from(operand), OPERAND_BITS);
        let mut out = [false; OPERAND_BITS];
        out.copy_from_slice(&bits);
        out
    }
}
