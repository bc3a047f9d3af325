//! Go tokenizer.
//!
//! Wraps a `logos` DFA with line/column tracking and Go's automatic
//! semicolon insertion, so the parser sees `;` wherever the language
//! grammar places one implicitly.

use crate::error::ParseError;
use logos::{Lexer as LogosLexer, Logos};

/// Token kinds.
///
/// Only the keywords the parser dispatches on get their own variant; the
/// rest of Go's keywords lex as [`TokenKind::Ident`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\f]+")]
pub enum TokenKind {
    #[regex(r"\r\n|\n|\r")]
    Newline,
    #[token("//", line_comment)]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,

    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("type")]
    Type,
    #[token("struct")]
    Struct,
    #[token("interface")]
    Interface,
    #[token("map")]
    Map,
    #[token("chan")]
    Chan,
    #[token("func")]
    Func,
    #[token("const")]
    Const,
    #[token("var")]
    Var,

    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")]
    Ident,
    #[regex(r"[0-9][0-9a-zA-Z_]*")]
    Number,
    #[token("\"", interpreted_string)]
    String,
    #[token("`", raw_string)]
    RawString,
    #[token("'", rune_literal)]
    Rune,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token(":")]
    Colon,
    #[token("=")]
    Assign,
    #[token("*")]
    Star,
    #[token("<-")]
    Arrow,
    #[token("~")]
    Tilde,
    #[token("|")]
    Pipe,
    #[token("++")]
    #[token("--")]
    IncDec,
    #[token("+")]
    #[token("-")]
    #[token("/")]
    #[token("%")]
    #[token("&")]
    #[token("^")]
    #[token("<<")]
    #[token(">>")]
    #[token("&^")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("&^=")]
    #[token("&&")]
    #[token("||")]
    #[token("==")]
    #[token("!=")]
    #[token("<")]
    #[token("<=")]
    #[token(">")]
    #[token(">=")]
    #[token("!")]
    #[token(":=")]
    Operator,

    /// End of input. Never produced by the DFA.
    Eof,
}

impl TokenKind {
    /// Returns true if a newline directly after this token ends a statement.
    #[must_use]
    pub const fn ends_statement(self) -> bool {
        matches!(
            self,
            Self::Ident
                | Self::Number
                | Self::String
                | Self::RawString
                | Self::Rune
                | Self::RParen
                | Self::RBrack
                | Self::RBrace
                | Self::IncDec
        )
    }

    /// Returns true for comment tokens.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

fn line_comment(lex: &mut LogosLexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
    lex.bump(end);
    true
}

fn block_comment(lex: &mut LogosLexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}

fn quoted(lex: &mut LogosLexer<TokenKind>, quote: char) -> bool {
    let rest = lex.remainder();
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        match c {
            '\n' | '\r' => {
                lex.bump(i);
                return false;
            }
            '\\' if !escaped => escaped = true,
            c if c == quote && !escaped => {
                lex.bump(i + c.len_utf8());
                return true;
            }
            _ => escaped = false,
        }
    }
    lex.bump(rest.len());
    false
}

fn interpreted_string(lex: &mut LogosLexer<TokenKind>) -> bool {
    quoted(lex, '"')
}

fn rune_literal(lex: &mut LogosLexer<TokenKind>) -> bool {
    quoted(lex, '\'')
}

fn raw_string(lex: &mut LogosLexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    match rest.find('`') {
        Some(end) => {
            lex.bump(end + 1);
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}

/// A lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// Token kind.
    pub kind: TokenKind,
    /// Source text; `"\n"` for inserted semicolons, empty at end of input.
    pub text: &'src str,
    /// Line (1-based).
    pub line: usize,
    /// Column (1-based, in bytes).
    pub column: usize,
}

/// Maps byte offsets to line/column pairs.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    /// Builds the index for `src`.
    #[must_use]
    pub fn new(src: &str) -> Self {
        let mut starts = vec![0];
        let bytes = src.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => starts.push(i + 1),
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }
        Self { starts }
    }

    /// Returns the 1-based line and column of `offset`.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = match self.starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        (line + 1, offset - self.starts[line] + 1)
    }
}

/// Tokenizes `src` without semicolon insertion, keeping newlines and comments.
///
/// # Errors
/// Returns `ParseError::Lex` at the first input that is not a valid token.
pub fn tokenize_raw(src: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let index = LineIndex::new(src);
    let mut lexer = TokenKind::lexer(src);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let span = lexer.span();
        let (line, column) = index.position(span.start);
        let text = &src[span];
        match kind {
            Ok(kind) => tokens.push(Token {
                kind,
                text,
                line,
                column,
            }),
            Err(()) => {
                return Err(ParseError::Lex {
                    line,
                    column,
                    text: text.chars().take(16).collect(),
                });
            }
        }
    }

    Ok(tokens)
}

/// Tokenizes `src` for parsing.
///
/// Comments and newlines are dropped; newlines that end a statement become
/// [`TokenKind::Semi`]. The returned stream always ends with one
/// [`TokenKind::Eof`] token.
///
/// # Errors
/// Returns `ParseError::Lex` at the first input that is not a valid token.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let raw = tokenize_raw(src)?;
    let mut tokens: Vec<Token<'_>> = Vec::with_capacity(raw.len());

    for token in raw {
        let breaks_line = match token.kind {
            TokenKind::Newline => true,
            TokenKind::BlockComment => token.text.contains(['\n', '\r']),
            TokenKind::LineComment => false,
            _ => {
                tokens.push(token);
                continue;
            }
        };
        if breaks_line && tokens.last().is_some_and(|t| t.kind.ends_statement()) {
            tokens.push(Token {
                kind: TokenKind::Semi,
                text: "\n",
                line: token.line,
                column: token.column,
            });
        }
    }

    let index = LineIndex::new(src);
    let (line, column) = index.position(src.len());
    if tokens.last().is_some_and(|t| t.kind.ends_statement()) {
        tokens.push(Token {
            kind: TokenKind::Semi,
            text: "\n",
            line,
            column,
        });
    }
    tokens.push(Token {
        kind: TokenKind::Eof,
        text: "",
        line,
        column,
    });

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src)
            .expect("Failed to tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keywords_and_idents() {
        assert_eq!(
            kinds("package short"),
            vec![
                TokenKind::Package,
                TokenKind::Ident,
                TokenKind::Semi,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_semicolon_insertion() {
        let src = "type Config struct {\n\tAPIKey string\n}\n";
        assert_eq!(
            kinds(src),
            vec![
                TokenKind::Type,
                TokenKind::Ident,
                TokenKind::Struct,
                TokenKind::LBrace,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Semi,
                TokenKind::RBrace,
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_no_semicolon_after_open_brace() {
        let toks = kinds("struct {\n}");
        assert_eq!(
            toks,
            vec![
                TokenKind::Struct,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Semi,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        let toks = kinds("// header\nx /* inline */ y // trailing\n");
        assert_eq!(
            toks,
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Semi,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_multiline_block_comment_ends_statement() {
        let toks = kinds("x /* a\nb */ y");
        assert_eq!(
            toks,
            vec![
                TokenKind::Ident,
                TokenKind::Semi,
                TokenKind::Ident,
                TokenKind::Semi,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_strings() {
        let tokens = tokenize(r#"import "time"; `raw "x"` 'a' "esc\"aped""#)
            .expect("Failed to tokenize");
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].text, "\"time\"");
        assert_eq!(tokens[3].kind, TokenKind::RawString);
        assert_eq!(tokens[4].kind, TokenKind::Rune);
        assert_eq!(tokens[5].kind, TokenKind::String);
        assert_eq!(tokens[5].text, r#""esc\"aped""#);
    }

    #[test]
    fn test_operators() {
        let toks = kinds("<-chan **T ... := ++");
        assert_eq!(
            toks,
            vec![
                TokenKind::Arrow,
                TokenKind::Chan,
                TokenKind::Star,
                TokenKind::Star,
                TokenKind::Ident,
                TokenKind::Ellipsis,
                TokenKind::Operator,
                TokenKind::IncDec,
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("package p\n\ntype  T int").expect("Failed to tokenize");
        let ty = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Type)
            .expect("type keyword");
        assert_eq!((ty.line, ty.column), (3, 1));
        let name = tokens.iter().find(|t| t.text == "T").expect("name");
        assert_eq!((name.line, name.column), (3, 7));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("x := \"open\n").expect_err("should fail");
        assert!(matches!(err, ParseError::Lex { line: 1, column: 6, .. }));
    }

    #[test]
    fn test_invalid_character() {
        let err = tokenize("a $ b").expect_err("should fail");
        assert!(matches!(err, ParseError::Lex { column: 3, .. }));
    }

    #[test]
    fn test_line_index_crlf() {
        let index = LineIndex::new("a\r\nb\rc");
        assert_eq!(index.position(0), (1, 1));
        assert_eq!(index.position(3), (2, 1));
        assert_eq!(index.position(5), (3, 1));
    }
}
