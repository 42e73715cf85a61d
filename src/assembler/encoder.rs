//! Serializes resolved instructions into the final byte sequence.
use std::fmt;

use super::error::{Error, Result};
use super::resolver::Resolved;

/// An assembled program. Keeps the per-instruction records
/// so a listing can be printed alongside the bytes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Program {
    instructions: Vec<Resolved>,
    bytes:        Vec<u8>,
}

impl Program {
    /// The program as a flat byte sequence.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn instructions(&self) -> &[Resolved] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Two-digit upper-case hex bytes separated by single spaces.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", to_hex(&self.bytes))
    }
}

/// Formats bytes as `C4 00 00 ...` with no trailing separator.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<String>>()
        .join(" ")
}

/// Concatenates the instructions in order. `expected` is the size the
/// label scan computed; a different count is an internal error.
pub fn encode(instructions: Vec<Resolved>, expected: usize) -> Result<Program> {
    let bytes: Vec<u8> = instructions.iter()
        .flat_map(|ins| ins.bytes.iter().copied())
        .collect();

    if bytes.len() != expected {
        error!("encoder produced {} byte(s), label scan expected {}", bytes.len(), expected);
        return Err(Error::EncodingLengthMismatch { expected, actual: bytes.len() });
    }

    Ok(Program { instructions, bytes })
}
