//! The Slot instruction catalog.
//!
//! The machine has sixteen one-byte memory slots (`00`-`0f`) and a loop
//! counter. Every instruction is three bytes wide: an opcode followed by
//! two operand bytes. Instructions taking fewer than two operands pad the
//! unused bytes with `00`.
//!
//! ```text
//! halt              ; stop execution
//! nop               ; do nothing
//! set  SLOT VALUE   ; SLOT <= VALUE
//! mov  DEST SRC     ; DEST <= SRC
//! add  DEST SRC     ; DEST <= DEST + SRC
//! sub  DEST SRC     ; DEST <= DEST - SRC
//! and  DEST SRC     ; DEST <= DEST & SRC
//! or   DEST SRC     ; DEST <= DEST | SRC
//! xor  DEST SRC     ; DEST <= DEST ^ SRC
//! jmp  ADDR         ; jump to ADDR
//! jz   SLOT ADDR    ; jump to ADDR if SLOT is zero
//! jcne SLOT ADDR    ; jump to ADDR if the counter differs from SLOT
//! jceq SLOT ADDR    ; jump to ADDR if the counter equals SLOT
//! out  SLOT         ; print SLOT
//! in   SLOT         ; read a byte into SLOT
//! res               ; counter <= 0
//! inc               ; counter <= counter + 1
//! cnt  SLOT         ; SLOT <= counter
//! ```
use std::collections::HashMap;
use std::fmt;
use once_cell::sync::Lazy;

/// Bytes per instruction: the opcode plus two operand bytes.
pub const INSTRUCTION_WIDTH: usize = 3;

/// One catalog entry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub opcode:   u8,
    /// One description per operand; the length is the instruction's arity.
    pub operands: &'static [&'static str],
}

impl Instruction {
    pub const fn new(mnemonic: &'static str, opcode: u8, operands: &'static [&'static str]) -> Self {
        Instruction { mnemonic, opcode, operands }
    }

    /// How many operands the instruction takes in source.
    pub fn arity(&self) -> usize {
        self.operands.len()
    }

    /// Bytes the instruction occupies in the assembled program.
    /// Unused operand slots still take up space.
    pub fn width(&self) -> usize {
        INSTRUCTION_WIDTH
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic)?;
        for op in self.operands.iter() {
            write!(f, " {}", op)?;
        }
        Ok(())
    }
}

const STANDARD: &[Instruction] = &[
    Instruction::new("halt", 0x00, &[]),
    Instruction::new("nop",  0x01, &[]),
    Instruction::new("set",  0x10, &["slot", "value"]),
    Instruction::new("mov",  0x11, &["dest", "src"]),
    Instruction::new("add",  0x20, &["dest", "src"]),
    Instruction::new("sub",  0x21, &["dest", "src"]),
    Instruction::new("and",  0x22, &["dest", "src"]),
    Instruction::new("or",   0x23, &["dest", "src"]),
    Instruction::new("xor",  0x24, &["dest", "src"]),
    Instruction::new("jmp",  0x30, &["address"]),
    Instruction::new("jz",   0x31, &["slot", "address"]),
    Instruction::new("jcne", 0x32, &["slot", "address"]),
    Instruction::new("jceq", 0x33, &["slot", "address"]),
    Instruction::new("out",  0x40, &["slot"]),
    Instruction::new("in",   0x41, &["slot"]),
    Instruction::new("res",  0xC4, &[]),
    Instruction::new("inc",  0xC5, &[]),
    Instruction::new("cnt",  0xC6, &["slot"]),
];

static STANDARD_CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog::new(STANDARD.iter().copied()));

/// An immutable mnemonic lookup table.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<Instruction>,
    index:   HashMap<&'static str, usize>,
}

impl Catalog {
    /// Builds a catalog from entries. A later entry with the same
    /// mnemonic replaces an earlier one.
    pub fn new<I: IntoIterator<Item = Instruction>>(entries: I) -> Self {
        let mut catalog = Catalog { entries: Vec::new(), index: HashMap::new() };
        for ins in entries {
            match catalog.index.get(ins.mnemonic) {
                Some(&idx) => catalog.entries[idx] = ins,
                None => {
                    catalog.index.insert(ins.mnemonic, catalog.entries.len());
                    catalog.entries.push(ins);
                }
            }
        }
        catalog
    }

    /// The built-in Slot instruction set, built once on first use.
    pub fn standard() -> &'static Catalog {
        &STANDARD_CATALOG
    }

    pub fn get(&self, mnemonic: &str) -> Option<&Instruction> {
        self.index.get(mnemonic).map(|&idx| &self.entries[idx])
    }

    /// Entries in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_opcodes() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.get("halt").map(|i| i.opcode), Some(0x00));
        assert_eq!(catalog.get("res").map(|i| i.opcode), Some(0xC4));
        assert_eq!(catalog.get("inc").map(|i| i.opcode), Some(0xC5));
        assert_eq!(catalog.get("jceq").map(|i| i.arity()), Some(2));
        assert_eq!(catalog.get("jmp").map(|i| i.arity()), Some(1));
        assert_eq!(catalog.get("HALT"), None);
        assert_eq!(catalog.get("mul"), None);
        assert_eq!(catalog.len(), STANDARD.len());
    }

    #[test]
    fn test_standard_is_consistent() {
        let catalog = Catalog::standard();
        let mut opcodes: Vec<u8> = catalog.iter().map(|i| i.opcode).collect();
        opcodes.sort_unstable();
        opcodes.dedup();
        assert_eq!(opcodes.len(), catalog.len(), "opcodes must be unique");

        for ins in catalog.iter() {
            assert!(ins.arity() <= INSTRUCTION_WIDTH - 1, "{} has too many operands", ins.mnemonic);
            assert_eq!(ins.width(), INSTRUCTION_WIDTH);
        }
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = Catalog::new(vec![
            Instruction::new("stop", 0xFF, &[]),
            Instruction::new("go",   0x01, &["address"]),
            Instruction::new("stop", 0xFE, &[]),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("stop").map(|i| i.opcode), Some(0xFE));
        assert_eq!(catalog.iter().map(|i| i.mnemonic).collect::<Vec<_>>(), vec!["stop", "go"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Catalog::standard().get("jcne").map(|i| i.to_string()), Some("jcne slot address".to_string()));
    }
}
