//! Every way an assembly can fail.
//!
//! Line numbers are 1-based document lines, so they can be shown
//! to the user as-is.
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The three sections of a source document, in order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Section {
    Description,
    Symbols,
    Code,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Section::Description => write!(f, "description"),
            Section::Symbols     => write!(f, "symbol definitions"),
            Section::Code        => write!(f, "code"),
        }
    }
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    #[error("expected exactly 2 section separators, found {separators}")]
    Structural { separators: usize },

    #[error("malformed symbol definition on line {line}: `{text}`")]
    MalformedSymbolDef { line: usize, text: String },

    #[error("malformed code line on line {line}: `{text}`")]
    MalformedCodeLine { line: usize, text: String },

    #[error("symbol `{name}` redefined on line {line}")]
    DuplicateSymbol { name: String, line: usize },

    #[error("label `{name}` redefined on line {line}")]
    DuplicateLabel { name: String, line: usize },

    #[error("`{name}` is defined both as a symbol and as a label")]
    AmbiguousName { name: String },

    #[error("symbol `{name}` on line {line} has value {value:02x}, slots must be 00-0f")]
    InvalidSlotValue { name: String, value: u8, line: usize },

    #[error("unknown mnemonic `{name}` on line {line}")]
    UnknownMnemonic { name: String, line: usize },

    #[error("`{mnemonic}` on line {line} takes {expected} operand(s), got {found}")]
    OperandCount { mnemonic: String, expected: usize, found: usize, line: usize },

    #[error("literal `{token}` on line {line} does not fit in a byte")]
    InvalidLiteral { token: String, line: usize },

    #[error("label `{label}` lands at address {address:#x}, past the end of addressable memory")]
    AddressOverflow { label: String, address: usize },

    #[error("unresolved reference `{token}` on line {line}")]
    UnresolvedReference { token: String, line: usize },

    #[error("internal error: encoded {actual} byte(s) but the label scan sized the program at {expected}")]
    EncodingLengthMismatch { expected: usize, actual: usize },
}

impl Error {
    /// The source line the error points at, if it points at one.
    pub fn line(&self) -> Option<usize> {
        use Error::*;
        match self {
            MalformedSymbolDef { line, .. } |
            MalformedCodeLine { line, .. }  |
            DuplicateSymbol { line, .. }    |
            DuplicateLabel { line, .. }     |
            InvalidSlotValue { line, .. }   |
            UnknownMnemonic { line, .. }    |
            OperandCount { line, .. }       |
            InvalidLiteral { line, .. }     |
            UnresolvedReference { line, .. } => Some(*line),

            Structural { .. }             |
            AmbiguousName { .. }          |
            AddressOverflow { .. }        |
            EncodingLengthMismatch { .. } => None,
        }
    }

    /// The section the error belongs to, if it belongs to one.
    pub fn section(&self) -> Option<Section> {
        use Error::*;
        match self {
            MalformedSymbolDef { .. } |
            DuplicateSymbol { .. }    |
            InvalidSlotValue { .. }   => Some(Section::Symbols),

            MalformedCodeLine { .. }   |
            DuplicateLabel { .. }      |
            UnknownMnemonic { .. }     |
            OperandCount { .. }        |
            InvalidLiteral { .. }      |
            AddressOverflow { .. }     |
            UnresolvedReference { .. } => Some(Section::Code),

            Structural { .. }             |
            AmbiguousName { .. }          |
            EncodingLengthMismatch { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_and_section() {
        let e = Error::MalformedSymbolDef { line: 4, text: "foo".to_string() };
        assert_eq!(e.line(), Some(4));
        assert_eq!(e.section(), Some(Section::Symbols));

        let e = Error::UnresolvedReference { token: "NOPE".to_string(), line: 12 };
        assert_eq!(e.line(), Some(12));
        assert_eq!(e.section(), Some(Section::Code));

        let e = Error::Structural { separators: 1 };
        assert_eq!(e.line(), None);
        assert_eq!(e.section(), None);
    }

    #[test]
    fn test_display() {
        let e = Error::InvalidSlotValue { name: "FOO".to_string(), value: 0x10, line: 3 };
        assert_eq!(e.to_string(), "symbol `FOO` on line 3 has value 10, slots must be 00-0f");

        let e = Error::Structural { separators: 3 };
        assert_eq!(e.to_string(), "expected exactly 2 section separators, found 3");
    }
}
