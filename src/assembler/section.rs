//! Splits a comment-stripped document into its three sections.
use super::ast::SourceLine;
use super::error::{Error, Result};
use super::lexer::is_separator;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Sections {
    pub description: Vec<SourceLine>,
    pub symbols:     Vec<SourceLine>,
    pub code:        Vec<SourceLine>,
}

/// Splits on the two separator lines. Each section is trimmed of leading
/// and trailing blank lines and every line of it of surrounding whitespace.
pub fn split(lines: &[SourceLine]) -> Result<Sections> {
    let separators: Vec<usize> = lines.iter()
        .enumerate()
        .filter(|(_, line)| is_separator(&line.text))
        .map(|(idx, _)| idx)
        .collect();

    if separators.len() != 2 {
        return Err(Error::Structural { separators: separators.len() });
    }
    let (first, second) = (separators[0], separators[1]);

    Ok(Sections {
        description: trim(&lines[..first]),
        symbols:     trim(&lines[first + 1..second]),
        code:        trim(&lines[second + 1..]),
    })
}

fn trim(lines: &[SourceLine]) -> Vec<SourceLine> {
    let start = lines.iter().position(|l| !l.is_blank()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_blank()).map_or(start, |idx| idx + 1);

    lines[start..end].iter()
        .map(|l| SourceLine::new(l.number, l.text.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::lexer::strip_comments;

    #[test]
    fn test_split() {
        let lines = strip_comments("Adds two slots.\n\n---\n  A 00\n\n  B 01  \n---\n\nadd A B\nhalt\n\n");
        let sections = split(&lines).unwrap();

        assert_eq!(sections.description, vec![SourceLine::new(1, "Adds two slots.")]);
        assert_eq!(sections.symbols, vec![
            SourceLine::new(4, "A 00"),
            SourceLine::new(5, ""),
            SourceLine::new(6, "B 01"),
        ]);
        assert_eq!(sections.code, vec![
            SourceLine::new(9, "add A B"),
            SourceLine::new(10, "halt"),
        ]);
    }

    #[test]
    fn test_split_empty_sections() {
        let lines = strip_comments("---\n---");
        let sections = split(&lines).unwrap();
        assert_eq!(sections, Sections::default());
    }

    #[test]
    fn test_split_structure() {
        let lines = strip_comments("a\n---\nb");
        assert_eq!(split(&lines), Err(Error::Structural { separators: 1 }));

        let lines = strip_comments("---\n---\n---");
        assert_eq!(split(&lines), Err(Error::Structural { separators: 3 }));
    }
}
