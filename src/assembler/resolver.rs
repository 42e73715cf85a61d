//! Rewrites the code section into bytes.
//!
//! Substitution runs in three passes: symbol names, then label names,
//! then mnemonics. Only operands are considered by the first two passes
//! and only mnemonics by the third. Whatever is left afterwards must be
//! a hex literal; anything else is an unresolved reference.
use super::ast::Statement;
use super::catalog::Catalog;
use super::error::{Error, Result};
use super::parser::is_hex;
use super::symbols::{LabelTable, SymbolTable};

#[derive(Clone, PartialEq, Eq, Debug)]
enum Field {
    Pending(String),
    Resolved(u8),
}

impl Field {
    /// Replaces a pending field with the value `lookup` returns for it, if any.
    /// Returns true if the field was replaced.
    fn substitute<F: Fn(&str) -> Option<u8>>(&mut self, lookup: F) -> bool {
        let value = match self {
            Field::Pending(tok) => lookup(tok.as_str()),
            Field::Resolved(_) => None,
        };
        match value {
            Some(b) => {
                *self = Field::Resolved(b);
                true
            }
            None => false,
        }
    }
}

/// A code line part way through substitution.
/// The label prefix is dropped here; it has no byte representation.
#[derive(Clone, PartialEq, Eq, Debug)]
struct Line {
    line:     usize,
    source:   String,
    mnemonic: String,
    opcode:   Field,
    operands: Vec<Field>,
}

/// A fully resolved instruction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Resolved {
    pub address: usize,
    pub line:    usize,
    pub source:  String,
    /// Opcode, operands, then zero padding up to the instruction width.
    pub bytes:   Vec<u8>,
}

/// Runs all three passes over `code` and checks nothing is left unresolved.
pub fn resolve(code: &[Statement], symbols: &SymbolTable, labels: &LabelTable, catalog: &Catalog) -> Result<Vec<Resolved>> {
    let mut lines: Vec<Line> = code.iter().map(|stmt| Line {
        line:     stmt.line,
        source:   stmt.to_string(),
        mnemonic: stmt.mnemonic.clone(),
        opcode:   Field::Pending(stmt.mnemonic.clone()),
        operands: stmt.operands.iter().map(|op| Field::Pending(op.text().to_string())).collect(),
    }).collect();

    let n = substitute_operands(&mut lines, |tok| symbols.get(tok));
    trace!("symbol pass replaced {} operand(s)", n);

    let n = substitute_operands(&mut lines, |tok| labels.get(tok));
    trace!("label pass replaced {} operand(s)", n);

    let n = substitute_mnemonics(&mut lines, catalog);
    trace!("mnemonic pass replaced {} opcode(s)", n);

    finish(lines, catalog)
}

fn substitute_operands<F: Fn(&str) -> Option<u8>>(lines: &mut [Line], lookup: F) -> usize {
    let mut count = 0;
    for line in lines.iter_mut() {
        for field in line.operands.iter_mut() {
            if field.substitute(&lookup) {
                count += 1;
            }
        }
    }
    count
}

fn substitute_mnemonics(lines: &mut [Line], catalog: &Catalog) -> usize {
    let mut count = 0;
    for line in lines.iter_mut() {
        if line.opcode.substitute(|tok| catalog.get(tok).map(|ins| ins.opcode)) {
            count += 1;
        }
    }
    count
}

/// Turns remaining hex literals into bytes, pads each instruction to its
/// width and assigns addresses.
fn finish(lines: Vec<Line>, catalog: &Catalog) -> Result<Vec<Resolved>> {
    let mut out = Vec::with_capacity(lines.len());
    let mut address = 0;

    for line in lines {
        let (opcode, ins) = match (&line.opcode, catalog.get(&line.mnemonic)) {
            (Field::Resolved(b), Some(ins)) => (*b, ins),
            _ => return Err(Error::UnknownMnemonic { name: line.mnemonic, line: line.line }),
        };

        let mut bytes = Vec::with_capacity(ins.width());
        bytes.push(opcode);
        for field in line.operands.iter() {
            bytes.push(match field {
                Field::Resolved(b) => *b,
                Field::Pending(tok) => literal(tok, line.line)?,
            });
        }
        if bytes.len() > ins.width() {
            return Err(Error::OperandCount {
                mnemonic: line.mnemonic,
                expected: ins.arity(),
                found: line.operands.len(),
                line: line.line,
            });
        }
        bytes.resize(ins.width(), 0x00);

        out.push(Resolved { address, line: line.line, source: line.source, bytes });
        address += ins.width();
    }

    Ok(out)
}

fn literal(tok: &str, line: usize) -> Result<u8> {
    if !is_hex(tok) {
        return Err(Error::UnresolvedReference { token: tok.to_string(), line });
    }
    u8::from_str_radix(tok, 16).map_err(|_| Error::InvalidLiteral { token: tok.to_string(), line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::ast::{Operand, SymbolDef};

    fn stmt(label: Option<&str>, mnemonic: &str, operands: &[&str], line: usize) -> Statement {
        Statement {
            label: label.map(|l| l.to_string()),
            mnemonic: mnemonic.to_string(),
            operands: operands.iter().map(|o| {
                if is_hex(o) { Operand::Literal(o.to_string()) } else { Operand::Name(o.to_string()) }
            }).collect(),
            line,
        }
    }

    fn tables(defs: &[(&str, u8)], code: &[Statement]) -> (SymbolTable, LabelTable) {
        let defs: Vec<SymbolDef> = defs.iter()
            .map(|(name, value)| SymbolDef { name: name.to_string(), value: *value, line: 1 })
            .collect();
        (
            SymbolTable::build(&defs).unwrap(),
            LabelTable::build(code, Catalog::standard()).unwrap(),
        )
    }

    #[test]
    fn test_field_substitute() {
        let mut f = Field::Pending("A".to_string());
        assert!(!f.substitute(|_| None));
        assert!(f.substitute(|_| Some(0x05)));
        assert_eq!(f, Field::Resolved(0x05));
        // Resolved fields are never reconsidered.
        assert!(!f.substitute(|_| Some(0x06)));
        assert_eq!(f, Field::Resolved(0x05));
    }

    #[test]
    fn test_resolve() {
        let code = vec![
            stmt(None, "set", &["A", "2a"], 10),
            stmt(Some("TOP"), "jz", &["A", "END"], 11),
            stmt(None, "jmp", &["TOP"], 12),
            stmt(Some("END"), "halt", &[], 13),
        ];
        let (symbols, labels) = tables(&[("A", 0x03)], &code);
        let out = resolve(&code, &symbols, &labels, Catalog::standard()).unwrap();

        assert_eq!(out.iter().map(|r| r.bytes.clone()).collect::<Vec<_>>(), vec![
            vec![0x10, 0x03, 0x2A],
            vec![0x31, 0x03, 0x09],
            vec![0x30, 0x03, 0x00],
            vec![0x00, 0x00, 0x00],
        ]);
        assert_eq!(out.iter().map(|r| r.address).collect::<Vec<_>>(), vec![0, 3, 6, 9]);
        assert_eq!(out[1].source, "TOP: jz A END");
        assert_eq!(out[1].line, 11);
    }

    #[test]
    fn test_resolve_forward_matches_backward() {
        // A jump forward to the last instruction...
        let forward = vec![
            stmt(None, "jmp", &["END"], 1),
            stmt(None, "nop", &[], 2),
            stmt(Some("END"), "halt", &[], 3),
        ];
        // ...and a jump backward to an instruction at the same address.
        let backward = vec![
            stmt(None, "nop", &[], 1),
            stmt(None, "nop", &[], 2),
            stmt(Some("END"), "jmp", &["END"], 3),
        ];
        let (s, l) = tables(&[], &forward);
        let f = resolve(&forward, &s, &l, Catalog::standard()).unwrap();
        let (s, l) = tables(&[], &backward);
        let b = resolve(&backward, &s, &l, Catalog::standard()).unwrap();

        assert_eq!(f[0].bytes[1], 0x06);
        assert_eq!(f[0].bytes[1], b[2].bytes[1]);
    }

    #[test]
    fn test_resolve_unresolved() {
        let code = vec![stmt(None, "nop", &[], 4), stmt(None, "out", &["MISSING"], 5)];
        let (symbols, labels) = tables(&[("A", 0x00)], &code);
        assert_eq!(
            resolve(&code, &symbols, &labels, Catalog::standard()),
            Err(Error::UnresolvedReference { token: "MISSING".to_string(), line: 5 })
        );
    }

    #[test]
    fn test_resolve_literal_out_of_range() {
        let code = vec![stmt(None, "set", &["A", "100"], 4)];
        let (symbols, labels) = tables(&[("A", 0x00)], &code);
        assert_eq!(
            resolve(&code, &symbols, &labels, Catalog::standard()),
            Err(Error::InvalidLiteral { token: "100".to_string(), line: 4 })
        );
    }

    #[test]
    fn test_resolve_unknown_mnemonic() {
        // Skips the label scan, which would normally catch this first.
        let code = vec![stmt(None, "mul", &["A", "A"], 2)];
        assert_eq!(
            resolve(&code, &SymbolTable::default(), &LabelTable::default(), Catalog::standard()),
            Err(Error::UnknownMnemonic { name: "mul".to_string(), line: 2 })
        );
    }

    #[test]
    fn test_resolve_pads_short_instructions() {
        let code = vec![stmt(None, "res", &[], 1), stmt(None, "cnt", &["A"], 2)];
        let (symbols, labels) = tables(&[("A", 0x0E)], &code);
        let out = resolve(&code, &symbols, &labels, Catalog::standard()).unwrap();
        assert_eq!(out[0].bytes, vec![0xC4, 0x00, 0x00]);
        assert_eq!(out[1].bytes, vec![0xC6, 0x0E, 0x00]);
    }
}
