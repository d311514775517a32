//! Line assembler.
//!
//! Turns a small textual listing into program cells, so programs can be
//! written as
//!
//! ```text
//! .reg  R3, 8          ; preset a register
//! .byte 0x80, 5        ; data byte at 0x80
//! LOAD  R1, 0x80
//! ADD   R1, R2         ; second register must be R(n+1)
//! JMP   0x06
//! HALT
//! ```
//!
//! Instructions are placed at consecutive addresses starting at 0 (or at
//! the last `.org`). `;` and `#` start a comment. Numbers are decimal or
//! `0x` hexadecimal, and memory operands may be written in brackets.

use super::instruction::Instruction;
use super::opcode::Opcode;
use crate::common::constants::REGISTER_COUNT;
use crate::common::{Result, SimError};
use crate::soc::memory::MemoryCell;

/// Output of [`assemble`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    /// Instruction and data cells, in source order.
    pub cells: Vec<MemoryCell>,
    /// Register presets from `.reg` directives.
    pub registers: Vec<(u8, u8)>,
}

/// Assembles `source` into cells.
///
/// # Errors
///
/// [`SimError::Assemble`] naming the first offending line.
///
/// # Examples
///
/// ```
/// use pipesim_core::isa::asm::assemble;
///
/// let listing = assemble("LOAD R1, [0x80]\nHALT").unwrap();
/// assert_eq!(listing.cells.len(), 2);
/// assert_eq!(listing.cells[1].address, 1);
/// ```
pub fn assemble(source: &str) -> Result<Listing> {
    let mut listing = Listing::default();
    let mut location: usize = 0;

    for (i, raw) in source.lines().enumerate() {
        let line_no = i + 1;
        let err = |message: String| SimError::Assemble {
            line: line_no,
            message,
        };

        let text = raw.split([';', '#']).next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        let (head, rest) = text
            .split_once(char::is_whitespace)
            .map_or((text, ""), |(h, r)| (h, r.trim()));
        let args: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split(',').map(str::trim).collect()
        };

        match head.to_ascii_lowercase().as_str() {
            ".org" => {
                let [addr] = args.as_slice() else {
                    return Err(err(".org takes one address".into()));
                };
                location = parse_number(addr).map_err(&err)? as usize;
                continue;
            }
            ".byte" => {
                let [addr, value] = args.as_slice() else {
                    return Err(err(".byte takes an address and a value".into()));
                };
                let addr = parse_number(addr).map_err(&err)?;
                let value = parse_number(value).map_err(&err)?;
                listing.cells.push(MemoryCell::data(addr, value));
                continue;
            }
            ".reg" => {
                let [reg, value] = args.as_slice() else {
                    return Err(err(".reg takes a register and a value".into()));
                };
                let reg = parse_register(reg).map_err(&err)?;
                let value = parse_number(value).map_err(&err)?;
                listing.registers.push((reg, value));
                continue;
            }
            _ => {}
        }

        let opcode =
            Opcode::from_mnemonic(head).ok_or_else(|| err(format!("unknown mnemonic `{head}`")))?;
        let (operand, data) = operands(opcode, &args).map_err(&err)?;

        let address = u8::try_from(location)
            .map_err(|_| err(format!("program runs past the end of memory at {location}")))?;
        let mnemonic = Instruction::new(opcode, operand, data, address).mnemonic;
        let mut cell = MemoryCell::instruction(address, opcode.byte(), operand, data, &mnemonic);
        cell.text = text.to_string();
        listing.cells.push(cell);
        location += 1;
    }

    Ok(listing)
}

/// Extracts `(register selector, address field)` for one instruction.
fn operands(opcode: Opcode, args: &[&str]) -> std::result::Result<(u8, u8), String> {
    match opcode {
        Opcode::Nop | Opcode::Halt | Opcode::Unknown(_) => match args {
            [] => Ok((0, 0)),
            _ => Err(format!("{opcode} takes no operands")),
        },
        Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div => match args {
            [a] => Ok((parse_register(a)?, 0)),
            [a, b] => {
                let a = parse_register(a)?;
                let b = parse_register(b)?;
                let expected = (a + 1) % REGISTER_COUNT as u8;
                if b == expected {
                    Ok((a, 0))
                } else {
                    Err(format!(
                        "{opcode} R{a} always reads R{expected} as its second operand, not R{b}"
                    ))
                }
            }
            _ => Err(format!("{opcode} takes one or two registers")),
        },
        Opcode::Load | Opcode::Store => match args {
            [reg, addr] => Ok((parse_register(reg)?, parse_number(addr)?)),
            _ => Err(format!("{opcode} takes a register and an address")),
        },
        Opcode::Jmp | Opcode::Jz | Opcode::Jc => match args {
            [addr] => Ok((0, parse_number(addr)?)),
            _ => Err(format!("{opcode} takes one address")),
        },
    }
}

fn parse_register(token: &str) -> std::result::Result<u8, String> {
    let digits = token
        .strip_prefix('R')
        .or_else(|| token.strip_prefix('r'))
        .ok_or_else(|| format!("expected a register, found `{token}`"))?;
    match digits.parse::<u8>() {
        Ok(n) if (n as usize) < REGISTER_COUNT => Ok(n),
        _ => Err(format!("no such register `{token}`")),
    }
}

fn parse_number(token: &str) -> std::result::Result<u8, String> {
    let token = token.trim_start_matches('[').trim_end_matches(']').trim();
    let parsed = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .map_or_else(|| token.parse::<u8>(), |hex| u8::from_str_radix(hex, 16));
    parsed.map_err(|_| format!("`{token}` is not a byte value"))
}
