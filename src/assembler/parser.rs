//! The Parser module takes the tokens of each section line from the lexer
//! and converts them into typed records.
use std::collections::VecDeque;
use super::ast::*;
use super::error::{Error, Result};
use super::lexer::{tokenize_line, Token};

/// The most operands any code line may carry.
pub const MAX_OPERANDS: usize = 2;

/// Parses every non-blank line of the symbol definitions section.
pub fn parse_symbols(lines: &[SourceLine]) -> Result<Vec<SymbolDef>> {
    let mut defs = Vec::with_capacity(lines.len());
    for line in lines.iter().filter(|l| !l.is_blank()) {
        defs.push(Parser::new(line).symbol_def()?);
    }
    debug!("parsed {} symbol definition(s)", defs.len());
    Ok(defs)
}

/// Parses every non-blank line of the code section.
pub fn parse_code(lines: &[SourceLine]) -> Result<Vec<Statement>> {
    let mut statements = Vec::with_capacity(lines.len());
    for line in lines.iter().filter(|l| !l.is_blank()) {
        statements.push(Parser::new(line).statement()?);
    }
    debug!("parsed {} statement(s)", statements.len());
    Ok(statements)
}

/// Parses a single line. A line that fails to tokenize is
/// kept with no tokens and an error flag, and is reported
/// as malformed by whichever record the caller asks for.
pub struct Parser {
    tokens: VecDeque<Token>,
    line:   usize,
    text:   String,
    lexed:  bool,
}

impl Parser {
    pub fn new(source: &SourceLine) -> Self {
        let (tokens, lexed) = match tokenize_line(&source.text, source.number) {
            Ok(tokens) => (tokens, true),
            Err(_) => (VecDeque::new(), false),
        };
        Parser { tokens, line: source.number, text: source.text.trim().to_string(), lexed }
    }

    /// Consumes the parser, producing `NAME BYTE`.
    pub fn symbol_def(mut self) -> Result<SymbolDef> {
        if !self.lexed {
            return Err(self.malformed_symbol());
        }

        let name = match self.consume() {
            Some(Token::Word(w, _)) if is_name(&w) => w,
            _ => return Err(self.malformed_symbol()),
        };

        let value = match self.consume() {
            Some(Token::Word(w, _)) if w.len() == 2 && is_hex(&w) => {
                u8::from_str_radix(&w, 16).map_err(|_| self.malformed_symbol())?
            }
            _ => return Err(self.malformed_symbol()),
        };

        if self.consume().is_some() {
            return Err(self.malformed_symbol());
        }

        Ok(SymbolDef { name, value, line: self.line })
    }

    /// Consumes the parser, producing `[LABEL:] mnemonic [operand [operand]]`.
    pub fn statement(mut self) -> Result<Statement> {
        if !self.lexed {
            return Err(self.malformed_code());
        }

        let mut label = None;
        let mnemonic = match self.consume() {
            Some(Token::Label(name, _)) => {
                if !is_name(&name) {
                    return Err(self.malformed_code());
                }
                label = Some(name);
                self.mnemonic()?
            }
            Some(Token::Word(w, _)) if is_mnemonic(&w) => w,
            _ => return Err(self.malformed_code()),
        };

        let mut operands = Vec::with_capacity(MAX_OPERANDS);
        while let Some(tok) = self.consume() {
            operands.push(self.operand(tok)?);
        }
        if operands.len() > MAX_OPERANDS {
            return Err(self.malformed_code());
        }

        Ok(Statement { label, mnemonic, operands, line: self.line })
    }

    fn mnemonic(&mut self) -> Result<String> {
        match self.consume() {
            Some(Token::Word(w, _)) if is_mnemonic(&w) => Ok(w),
            _ => Err(self.malformed_code()),
        }
    }

    fn operand(&self, tok: Token) -> Result<Operand> {
        match tok {
            Token::Word(w, _) if is_name(&w) => Ok(Operand::Name(w)),
            Token::Word(w, _) if is_hex(&w)  => Ok(Operand::Literal(w)),
            _ => Err(self.malformed_code()),
        }
    }

    fn malformed_symbol(&self) -> Error {
        Error::MalformedSymbolDef { line: self.line, text: self.text.clone() }
    }

    fn malformed_code(&self) -> Error {
        Error::MalformedCodeLine { line: self.line, text: self.text.clone() }
    }

    /// Pops a token off the input stream and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }
}

/// Symbol and label names are `[A-Z_]+`.
pub fn is_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

/// Literals are lower-case hexadecimal, `[0-9a-f]+`.
pub fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Mnemonics are `[a-z]+`.
pub fn is_mnemonic(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_lowercase())
}
