//! The Assembler module is in charge of taking a
//! Slot source document and producing the assembled
//! byte sequence.
//!
//! It does this in two passes: a label scan that sizes
//! every instruction, then a substitution pass that
//! replaces names with bytes. Every stage is a pure
//! function and stops at the first error.

pub mod ast;
pub mod catalog;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod section;
pub mod symbols;
pub mod validator;

pub use catalog::{Catalog, Instruction};
pub use encoder::Program;
pub use error::{Error, Result, Section};

use symbols::{LabelTable, SymbolTable};

/// Assembles `document` with the built-in instruction set.
pub fn assemble(document: &str) -> Result<Program> {
    assemble_with(document, Catalog::standard())
}

/// Assembles `document` against `catalog`.
pub fn assemble_with(document: &str, catalog: &Catalog) -> Result<Program> {
    validator::validate(document)?;

    let lines = lexer::strip_comments(document);
    let sections = section::split(&lines)?;
    debug!(
        "sections: {} description, {} symbol, {} code line(s)",
        sections.description.len(), sections.symbols.len(), sections.code.len()
    );

    let defs = parser::parse_symbols(&sections.symbols)?;
    let code = parser::parse_code(&sections.code)?;

    let symbols = SymbolTable::build(&defs)?;
    let labels = LabelTable::build(&code, catalog)?;
    symbols::check_disjoint(&symbols, &labels)?;

    let resolved = resolver::resolve(&code, &symbols, &labels, catalog)?;
    let program = encoder::encode(resolved, labels.size())?;

    info!(
        "assembled {} instruction(s) into {} byte(s), {} symbol(s), {} label(s)",
        program.instructions().len(), program.len(), symbols.len(), labels.len()
    );
    Ok(program)
}
