//! This lexer strips comments and splits lines into tokens.
use std::collections::VecDeque;
use super::ast::SourceLine;

// Tokens are Tuples of the token text and the line they appear on.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    /// `NAME:`, with the colon removed.
    Label(String, usize),
    /// Any other whitespace-delimited word.
    Word(String, usize),
}

/// Returns `line` up to the first unescaped `#`, with trailing whitespace trimmed.
pub fn strip_comment(line: &str) -> &str {
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        match c {
            '#' if !escaped => return line[..idx].trim_end(),
            '\\' => escaped = !escaped,
            _ => escaped = false,
        }
    }
    line.trim_end()
}

/// Strips comments from every line of the document, keeping line numbers.
pub fn strip_comments(document: &str) -> Vec<SourceLine> {
    document
        .lines()
        .enumerate()
        .map(|(index, line)| SourceLine::new(index + 1, strip_comment(line)))
        .collect()
}

/// A section separator is three or more hyphens, alone on the line.
pub fn is_separator(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

/// Splits one comment-free line into tokens. A `:` closes a label;
/// a colon with nothing before it is returned as the error.
pub fn tokenize_line(line: &str, line_num: usize) -> Result<VecDeque<Token>, String> {
    let mut out: VecDeque<Token> = VecDeque::with_capacity(4);

    let mut sb = String::new();
    for c in line.chars() {
        match c {
            // Whitespace bounds tokens, so whatever is in the
            // string builder so far is a complete word. This is the same
            // Unicode whitespace class the validator's `\s` matches.
            c if c.is_whitespace() => {
                if !sb.is_empty() {
                    out.push_back(Token::Word(sb.clone(), line_num));
                    sb.clear();
                }
            }

            ':' => {
                if sb.is_empty() {
                    return Err(line.to_string());
                }
                out.push_back(Token::Label(sb.clone(), line_num));
                sb.clear();
            }

            _ => sb.push(c),
        };
    }
    // Process any final token that may be in the buffer.
    if !sb.is_empty() {
        out.push_back(Token::Word(sb, line_num));
    }

    Ok(out)
}
