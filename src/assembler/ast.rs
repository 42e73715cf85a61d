//! Typed records for the lines of a Slot source document.
//!
//! A document has three sections separated by lines of three or more
//! hyphens. The first is free text, the second names memory slots and
//! the third holds one instruction per line:
//!
//! ```text
//! Iterative Fibonacci.
//! ---
//! N      0f   # number of terms
//! A      00
//! B      01
//! SUM    02
//! RETURN 00
//! ---
//!         res
//!         set A 00
//!         set B 01
//! LOOP:   jceq N DONE    # labels may be used before they are defined
//!         mov SUM A
//!         add SUM B
//!         mov A B
//!         mov B SUM
//!         inc
//!         jmp LOOP
//! DONE:   out RETURN
//!         halt
//! ```
//!
//! Comments start with `#` and run to the end of the line.
//! Mnemonics are lower-case, symbol and label names are upper-case
//! and literals are lower-case hexadecimal.

use std::fmt;

/// A single line of the document, after comment stripping.
/// `number` is the 1-based line number in the original document.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SourceLine {
    pub number: usize,
    pub text:   String,
}

impl SourceLine {
    pub fn new<S: Into<String>>(number: usize, text: S) -> Self {
        SourceLine { number, text: text.into() }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// `NAME BYTE` from the symbol definitions section.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SymbolDef {
    pub name:  String,
    pub value: u8,
    pub line:  usize,
}

/// An operand as written in the source.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Operand {
    /// A symbol or label name, resolved later.
    Name(String),
    /// A hex literal, kept as text until the substitution passes finish.
    Literal(String),
}

impl Operand {
    pub fn text(&self) -> &str {
        match self {
            Operand::Name(s) | Operand::Literal(s) => s,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// One instruction line from the code section.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Statement {
    pub label:    Option<String>,
    pub mnemonic: String,
    pub operands: Vec<Operand>,
    pub line:     usize,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{}: ", label)?;
        }
        write!(f, "{}", self.mnemonic)?;
        for op in self.operands.iter() {
            write!(f, " {}", op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_display() {
        let s = Statement {
            label: Some("LOOP".to_string()),
            mnemonic: "jceq".to_string(),
            operands: vec![Operand::Name("N".to_string()), Operand::Name("DONE".to_string())],
            line: 9,
        };
        assert_eq!(s.to_string(), "LOOP: jceq N DONE");

        let s = Statement {
            label: None,
            mnemonic: "set".to_string(),
            operands: vec![Operand::Name("A".to_string()), Operand::Literal("00".to_string())],
            line: 10,
        };
        assert_eq!(s.to_string(), "set A 00");
    }

    #[test]
    fn test_source_line_blank() {
        assert!(SourceLine::new(1, "").is_blank());
        assert!(SourceLine::new(1, " \t ").is_blank());
        assert!(!SourceLine::new(1, "halt").is_blank());
    }
}
