//! Layout of generated Go source.
//!
//! The formatter re-lexes the text, rejects unbalanced delimiters and
//! re-indents each line with tabs according to its nesting depth. It does not
//! align columns.

use crate::error::FormatError;
use cfgen_schema::ParseError;
use cfgen_schema::lexer::{TokenKind, tokenize_raw};

#[derive(Debug, Clone, Copy)]
struct LineShape {
    /// Open delimiters before the first token of the line.
    depth: usize,
    /// Closing delimiters at the start of the line.
    leading_closers: usize,
    counting: bool,
}

fn opening(kind: TokenKind) -> Option<char> {
    match kind {
        TokenKind::LParen => Some('('),
        TokenKind::LBrack => Some('['),
        TokenKind::LBrace => Some('{'),
        _ => None,
    }
}

fn closing(kind: TokenKind) -> Option<char> {
    match kind {
        TokenKind::RParen => Some(')'),
        TokenKind::RBrack => Some(']'),
        TokenKind::RBrace => Some('}'),
        _ => None,
    }
}

const fn partner(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Formats generated Go source.
///
/// # Errors
/// Returns `FormatError` if the text does not lex or its delimiters are
/// unbalanced.
pub fn format_source(text: &str) -> Result<String, FormatError> {
    let tokens = tokenize_raw(text).map_err(|err| match err {
        ParseError::Lex { line, column, .. } | ParseError::Syntax { line, column, .. } => {
            FormatError::Lex { line, column }
        }
        _ => FormatError::Lex { line: 0, column: 0 },
    })?;

    let line_count = text.lines().count();
    let mut shapes: Vec<Option<LineShape>> = vec![None; line_count + 2];
    let mut verbatim = vec![false; line_count + 2];
    let mut open: Vec<(char, usize)> = Vec::new();

    for token in &tokens {
        if token.kind == TokenKind::Newline {
            continue;
        }
        let closer = closing(token.kind);

        if let Some(slot) = shapes.get_mut(token.line) {
            match slot {
                None => {
                    *slot = Some(LineShape {
                        depth: open.len(),
                        leading_closers: usize::from(closer.is_some()),
                        counting: closer.is_some(),
                    });
                }
                Some(shape) if shape.counting && closer.is_some() => shape.leading_closers += 1,
                Some(shape) => shape.counting = false,
            }
        }

        // Lines continuing a multi-line comment or raw string are left alone.
        let spanned = token.text.matches('\n').count();
        for line in token.line + 1..=token.line + spanned {
            if let Some(flag) = verbatim.get_mut(line) {
                *flag = true;
            }
        }

        if let Some(delimiter) = opening(token.kind) {
            open.push((delimiter, token.line));
        } else if let Some(found) = closer {
            match open.pop() {
                Some((delimiter, _)) if partner(delimiter) == found => {}
                Some((delimiter, _)) => {
                    return Err(FormatError::Mismatched {
                        line: token.line,
                        found,
                        expected: format!("'{}'", partner(delimiter)),
                    });
                }
                None => {
                    return Err(FormatError::Mismatched {
                        line: token.line,
                        found,
                        expected: "no closing delimiter".to_string(),
                    });
                }
            }
        }
    }

    if let Some(&(delimiter, line)) = open.last() {
        return Err(FormatError::Unclosed { delimiter, line });
    }

    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut pending_blank = false;

    for (idx, line) in text.lines().enumerate() {
        let number = idx + 1;
        if verbatim[number] {
            out.push_str(line);
            out.push('\n');
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }

        if let Some(shape) = shapes[number] {
            let indent = shape.depth.saturating_sub(shape.leading_closers);
            out.extend(std::iter::repeat_n('\t', indent));
        }
        out.push_str(trimmed);
        out.push('\n');
    }

    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
