//! Checks a raw document against the Slot grammar before anything else runs.
//!
//! Comments are stripped with the same routine the rest of the pipeline
//! uses, so the validator and the later stages always agree on what a
//! line contains.
use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{Error, Result, Section};
use super::lexer::{is_separator, strip_comment};

static SYMBOL_DEF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[A-Z_]+\s+[0-9a-f]{2}\s*$").expect("symbol definition grammar")
});

static CODE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Z_]+:)?\s*[a-z]+(\s+([A-Z_]+|[0-9a-f]+)){0,2}\s*$").expect("code line grammar")
});

/// Validates the whole document, returning the first violation
/// found scanning top to bottom.
pub fn validate(document: &str) -> Result<()> {
    let lines: Vec<&str> = document.lines().collect();

    let separators: Vec<usize> = lines.iter()
        .enumerate()
        .filter(|(_, line)| is_separator(strip_comment(line)))
        .map(|(idx, _)| idx)
        .collect();

    if separators.len() != 2 {
        return Err(Error::Structural { separators: separators.len() });
    }
    let (first, second) = (separators[0], separators[1]);
    trace!("separators on lines {} and {}", first + 1, second + 1);

    for idx in first + 1..second {
        check_line(lines[idx], idx + 1, Section::Symbols)?;
    }
    for idx in second + 1..lines.len() {
        check_line(lines[idx], idx + 1, Section::Code)?;
    }

    Ok(())
}

/// Returns true if the comment-free `text` is grammatical for `section`.
/// Blank lines are grammatical everywhere.
pub fn is_valid_line(text: &str, section: Section) -> bool {
    if text.trim().is_empty() {
        return true;
    }
    match section {
        Section::Description => true,
        Section::Symbols     => SYMBOL_DEF.is_match(text),
        Section::Code        => CODE_LINE.is_match(text),
    }
}

fn check_line(line: &str, number: usize, section: Section) -> Result<()> {
    let text = strip_comment(line);
    if is_valid_line(text, section) {
        return Ok(());
    }

    let text = text.trim().to_string();
    match section {
        Section::Symbols => Err(Error::MalformedSymbolDef { line: number, text }),
        _                => Err(Error::MalformedCodeLine { line: number, text }),
    }
}
