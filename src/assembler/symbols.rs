//! Symbol and label tables.
//!
//! Symbols name memory slots and come from the symbol definitions section.
//! Labels name program addresses and are collected in a single pass over
//! the code section, so every label is known before any operand is
//! resolved and forward references need no special handling.
use std::collections::HashMap;

use super::ast::{Statement, SymbolDef};
use super::catalog::Catalog;
use super::error::{Error, Result};

/// The highest memory slot a symbol may name.
pub const MAX_SLOT: u8 = 0x0F;

/// Names mapped to bytes, iterated in insertion order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
struct NameTable {
    entries: Vec<(String, u8)>,
    index:   HashMap<String, usize>,
}

impl NameTable {
    /// Returns false, leaving the table untouched, if `name` is already present.
    fn insert(&mut self, name: &str, value: u8) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), value));
        true
    }

    fn get(&self, name: &str) -> Option<u8> {
        self.index.get(name).map(|&idx| self.entries[idx].1)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Symbol name to memory slot.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SymbolTable {
    table: NameTable,
}

impl SymbolTable {
    /// Builds the table, rejecting any repeated name (even with the
    /// same value) and any slot past `MAX_SLOT`.
    pub fn build(defs: &[SymbolDef]) -> Result<Self> {
        let mut table = NameTable::default();
        for def in defs.iter() {
            if def.value > MAX_SLOT {
                return Err(Error::InvalidSlotValue {
                    name: def.name.clone(), value: def.value, line: def.line,
                });
            }
            if !table.insert(&def.name, def.value) {
                return Err(Error::DuplicateSymbol { name: def.name.clone(), line: def.line });
            }
            trace!("symbol {} => {:02X}", def.name, def.value);
        }
        debug!("symbol table holds {} entries", table.entries.len());
        Ok(SymbolTable { table })
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        self.table.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.table.entries.len()
    }
}

/// Label name to program address, plus the total program size.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LabelTable {
    table: NameTable,
    size:  usize,
}

impl LabelTable {
    /// Scans the code once, left to right. Each label gets the offset of the
    /// instruction it prefixes; every instruction advances the offset by its
    /// catalog width.
    pub fn build(code: &[Statement], catalog: &Catalog) -> Result<Self> {
        let mut table = NameTable::default();
        let mut offset: usize = 0;

        for stmt in code.iter() {
            if let Some(label) = &stmt.label {
                if table.get(label).is_some() {
                    return Err(Error::DuplicateLabel { name: label.clone(), line: stmt.line });
                }
                if offset > u8::MAX as usize {
                    return Err(Error::AddressOverflow { label: label.clone(), address: offset });
                }
                table.insert(label, offset as u8);
                trace!("label {} => {:02X}", label, offset);
            }

            let ins = catalog.get(&stmt.mnemonic).ok_or_else(|| Error::UnknownMnemonic {
                name: stmt.mnemonic.clone(), line: stmt.line,
            })?;
            if stmt.operands.len() != ins.arity() {
                return Err(Error::OperandCount {
                    mnemonic: stmt.mnemonic.clone(),
                    expected: ins.arity(),
                    found: stmt.operands.len(),
                    line: stmt.line,
                });
            }
            offset += ins.width();
        }

        debug!("label table holds {} entries, program is {} bytes", table.entries.len(), offset);
        Ok(LabelTable { table, size: offset })
    }

    pub fn get(&self, name: &str) -> Option<u8> {
        self.table.get(name)
    }

    /// Entries in address order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.table.iter()
    }

    /// Total program size in bytes, as computed by the scan.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.table.entries.len()
    }
}

/// A name may be a symbol or a label, never both.
/// The first label (in address order) that is also a symbol is reported.
pub fn check_disjoint(symbols: &SymbolTable, labels: &LabelTable) -> Result<()> {
    match labels.iter().find(|(name, _)| symbols.contains(name)) {
        Some((name, _)) => Err(Error::AmbiguousName { name: name.to_string() }),
        None => Ok(()),
    }
}
