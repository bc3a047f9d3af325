//! Integer constant expression evaluation.
//!
//! Covers the subset of Go constant expressions that can size an array:
//! integer literals, `iota`, previously declared constants, parentheses,
//! unary `+ - ^`, the binary arithmetic and bit operators, and conversions
//! to basic integer types. Anything else evaluates to `None`.

use crate::ir::parse_int_literal;
use crate::lexer::{Token, TokenKind};
use crate::types::BASIC_TYPES;

/// Evaluates `tokens` as one integer constant expression.
///
/// `lookup` resolves identifiers naming earlier constants.
pub(crate) fn eval(
    tokens: &[Token<'_>],
    iota: i128,
    lookup: &dyn Fn(&str) -> Option<i128>,
) -> Option<i128> {
    let mut evaluator = Evaluator {
        tokens,
        pos: 0,
        iota,
        lookup,
    };
    let value = evaluator.binary(0)?;
    (evaluator.pos == tokens.len()).then_some(value)
}

struct Evaluator<'a, 't, 'src> {
    tokens: &'t [Token<'src>],
    pos: usize,
    iota: i128,
    lookup: &'a dyn Fn(&str) -> Option<i128>,
}

impl<'src> Evaluator<'_, '_, 'src> {
    fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'src>> {
        let tok = self.peek()?;
        self.pos += 1;
        Some(tok)
    }

    /// Go binary precedence for integer operators; 0 if not one.
    fn precedence(tok: &Token<'_>) -> u8 {
        match (tok.kind, tok.text) {
            (TokenKind::Star, _) => 5,
            (TokenKind::Operator, "/" | "%" | "<<" | ">>" | "&" | "&^") => 5,
            (TokenKind::Pipe, _) => 4,
            (TokenKind::Operator, "+" | "-" | "^") => 4,
            _ => 0,
        }
    }

    fn binary(&mut self, min: u8) -> Option<i128> {
        let mut lhs = self.unary()?;
        while let Some(tok) = self.peek() {
            let prec = Self::precedence(&tok);
            if prec == 0 || prec <= min {
                break;
            }
            let op = tok.text;
            self.pos += 1;
            let rhs = self.binary(prec)?;
            lhs = apply(op, lhs, rhs)?;
        }
        Some(lhs)
    }

    fn unary(&mut self) -> Option<i128> {
        let tok = self.bump()?;
        match (tok.kind, tok.text) {
            (TokenKind::Operator, "-") => self.unary()?.checked_neg(),
            (TokenKind::Operator, "+") => self.unary(),
            (TokenKind::Operator, "^") => Some(!self.unary()?),
            (TokenKind::Number, text) => parse_int_literal(text).map(i128::from),
            (TokenKind::LParen, _) => self.group(),
            (TokenKind::Ident, "iota") => Some(self.iota),
            (TokenKind::Ident, name) if BASIC_TYPES.contains(&name) => {
                if self.bump()?.kind != TokenKind::LParen {
                    return None;
                }
                self.group()
            }
            (TokenKind::Ident, name) => (self.lookup)(name),
            _ => None,
        }
    }

    /// Evaluates up to and including the closing `)`.
    fn group(&mut self) -> Option<i128> {
        let value = self.binary(0)?;
        (self.bump()?.kind == TokenKind::RParen).then_some(value)
    }
}

fn apply(op: &str, lhs: i128, rhs: i128) -> Option<i128> {
    match op {
        "*" => lhs.checked_mul(rhs),
        "/" => lhs.checked_div(rhs),
        "%" => lhs.checked_rem(rhs),
        "<<" => u32::try_from(rhs)
            .ok()
            .and_then(|s| lhs.checked_shl(s))
            .filter(|v| v >> rhs == lhs),
        ">>" => u32::try_from(rhs).ok().map(|s| lhs >> s.min(127)),
        "&" => Some(lhs & rhs),
        "&^" => Some(lhs & !rhs),
        "|" => Some(lhs | rhs),
        "+" => lhs.checked_add(rhs),
        "-" => lhs.checked_sub(rhs),
        "^" => Some(lhs ^ rhs),
        _ => None,
    }
}
