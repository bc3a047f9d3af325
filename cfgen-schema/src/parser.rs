//! Go source parser.
//!
//! This module parses the declarations the generator needs out of a Go
//! source file: the package clause, imports, type declarations and integer
//! constants. Function bodies and other declarations are skipped with
//! balanced-delimiter tracking.

use crate::ast::{
    ArrayLen, ConstSpec, FieldExpr, FuncExpr, ImportSpec, InterfaceElem, ParamExpr, SourceFile,
    TypeExpr, TypeSpec, UnionTerm,
};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind, tokenize};
use crate::types::ChanDir;

/// Parses Go source into a [`SourceFile`].
///
/// # Arguments
/// * `src` - Go source text
///
/// # Returns
/// Parsed file or parse error.
///
/// # Errors
/// Returns `ParseError` if the source cannot be tokenized, lacks a package
/// clause, or contains a malformed import, type or constant declaration.
pub fn parse_source(src: &str) -> Result<SourceFile, ParseError> {
    let tokens = tokenize(src)?;
    Parser::new(&tokens).parse_file()
}

/// Parses a Go source file from disk.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_file(path: &std::path::Path) -> Result<SourceFile, ParseError> {
    let src = std::fs::read_to_string(path)?;
    parse_source(&src)
}

struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    pos: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
    fn new(tokens: &'t [Token<'src>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Token<'src> {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> Token<'src> {
        let idx = (self.pos + n).min(self.tokens.len().saturating_sub(1));
        self.tokens.get(idx).copied().unwrap_or(Token {
            kind: TokenKind::Eof,
            text: "",
            line: 1,
            column: 1,
        })
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn bump(&mut self) -> Token<'src> {
        let tok = self.peek();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token<'src>, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error(expected))
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        let tok = self.peek();
        let found = match tok.kind {
            TokenKind::Eof => "end of input",
            TokenKind::Semi if tok.text == "\n" => "newline",
            _ => tok.text,
        };
        ParseError::syntax(tok.line, tok.column, expected, found)
    }

    fn skip_semis(&mut self) {
        while self.eat(TokenKind::Semi) {}
    }

    fn end_decl(&mut self) -> Result<(), ParseError> {
        if self.eat(TokenKind::Semi) || self.at(TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.error("';' or newline"))
        }
    }

    /// Ends an element of a grouped list unless the group closes next.
    fn end_group_item(&mut self, close: TokenKind) -> Result<(), ParseError> {
        if self.at(close) {
            Ok(())
        } else {
            self.end_decl()
        }
    }

    fn parse_file(&mut self) -> Result<SourceFile, ParseError> {
        self.skip_semis();
        if !self.eat(TokenKind::Package) {
            return Err(ParseError::MissingPackage);
        }
        let package = self.expect(TokenKind::Ident, "package name")?;
        self.end_decl()?;

        let mut file = SourceFile {
            package: package.text.to_string(),
            ..SourceFile::default()
        };

        loop {
            self.skip_semis();
            match self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Import => self.parse_import_decl(&mut file)?,
                TokenKind::Type => self.parse_type_decl(&mut file)?,
                TokenKind::Const => self.parse_const_decl(&mut file)?,
                _ => self.skip_decl()?,
            }
        }

        Ok(file)
    }

    fn parse_import_decl(&mut self, file: &mut SourceFile) -> Result<(), ParseError> {
        self.bump();
        if self.eat(TokenKind::LParen) {
            loop {
                self.skip_semis();
                if self.eat(TokenKind::RParen) {
                    break;
                }
                file.imports.push(self.parse_import_spec()?);
                self.end_group_item(TokenKind::RParen)?;
            }
        } else {
            file.imports.push(self.parse_import_spec()?);
        }
        self.end_decl()
    }

    fn parse_import_spec(&mut self) -> Result<ImportSpec, ParseError> {
        let alias = match self.peek().kind {
            TokenKind::Ident => Some(self.bump().text.to_string()),
            TokenKind::Dot => {
                self.bump();
                Some(".".to_string())
            }
            _ => None,
        };
        let tok = self.peek();
        match tok.kind {
            TokenKind::String | TokenKind::RawString => {
                self.bump();
                Ok(ImportSpec {
                    alias,
                    path: unquote(tok.text).to_string(),
                })
            }
            _ => Err(self.error("import path")),
        }
    }

    fn parse_type_decl(&mut self, file: &mut SourceFile) -> Result<(), ParseError> {
        self.bump();
        if self.eat(TokenKind::LParen) {
            loop {
                self.skip_semis();
                if self.eat(TokenKind::RParen) {
                    break;
                }
                file.types.push(self.parse_type_spec()?);
                self.end_group_item(TokenKind::RParen)?;
            }
        } else {
            file.types.push(self.parse_type_spec()?);
        }
        self.end_decl()
    }

    fn parse_type_spec(&mut self) -> Result<TypeSpec, ParseError> {
        let name = self.expect(TokenKind::Ident, "type name")?;
        let type_params = if self.at(TokenKind::LBrack) && self.looks_like_type_params() {
            self.parse_type_params()?
        } else {
            Vec::new()
        };
        let alias = self.eat(TokenKind::Assign);
        let ty = self.parse_type()?;

        Ok(TypeSpec {
            name: name.text.to_string(),
            type_params,
            alias,
            ty,
            line: name.line,
        })
    }

    /// Distinguishes `type T[P any] ...` from `type T [N]E`.
    fn looks_like_type_params(&self) -> bool {
        self.nth(1).kind == TokenKind::Ident
            && !matches!(self.nth(2).kind, TokenKind::RBrack | TokenKind::Dot)
    }

    fn parse_type_params(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(TokenKind::LBrack, "'['")?;
        let mut names = Vec::new();
        let mut expect_name = true;
        let mut depth = 0usize;

        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof => return Err(self.error("']'")),
                TokenKind::RBrack if depth == 0 => {
                    self.bump();
                    break;
                }
                TokenKind::LBrack | TokenKind::LParen | TokenKind::LBrace => {
                    depth += 1;
                    expect_name = false;
                }
                TokenKind::RBrack | TokenKind::RParen | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::Comma if depth == 0 => expect_name = true,
                TokenKind::Ident if depth == 0 && expect_name => {
                    names.push(tok.text.to_string());
                    expect_name = false;
                }
                _ => expect_name = false,
            }
            self.bump();
        }

        Ok(names)
    }

    fn parse_const_decl(&mut self, file: &mut SourceFile) -> Result<(), ParseError> {
        self.bump();
        if self.eat(TokenKind::LParen) {
            let mut previous: &'t [Token<'src>] = &[];
            let mut iota = 0i128;
            loop {
                self.skip_semis();
                if self.eat(TokenKind::RParen) {
                    break;
                }
                previous = self.parse_const_spec(file, iota, previous);
                iota += 1;
            }
            self.end_decl()
        } else {
            self.parse_const_spec(file, 0, &[]);
            Ok(())
        }
    }

    /// Records the integer constants of one spec and returns the value list
    /// an implicit repetition on the next line reuses.
    ///
    /// A spec without `=` repeats `previous` with the current `iota`. Values
    /// that are not integer constant expressions are skipped.
    fn parse_const_spec(
        &mut self,
        file: &mut SourceFile,
        iota: i128,
        previous: &'t [Token<'src>],
    ) -> &'t [Token<'src>] {
        let start = self.pos;
        let mut depth = 0usize;
        let mut assign = None;
        loop {
            match self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::Semi | TokenKind::RParen if depth == 0 => break,
                TokenKind::Assign if depth == 0 && assign.is_none() => assign = Some(self.pos),
                TokenKind::LParen | TokenKind::LBrack | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.bump();
        }
        let tokens = self.tokens;
        let end = self.pos;
        self.eat(TokenKind::Semi);

        let (lhs, values) = match assign {
            Some(at) => (&tokens[start..at], &tokens[at + 1..end]),
            None => (&tokens[start..end], previous),
        };

        // Names are `A, B, C`, optionally followed by a type.
        let mut names = Vec::new();
        for (i, tok) in lhs.iter().enumerate() {
            match (i % 2, tok.kind) {
                (0, TokenKind::Ident) => names.push(tok.text),
                (1, TokenKind::Comma) => {}
                _ => break,
            }
        }

        let exprs = split_top_level(values);
        if exprs.len() == names.len() {
            for (name, expr) in names.into_iter().zip(exprs) {
                if name == "_" {
                    continue;
                }
                let lookup = |ident: &str| {
                    file.get_const(ident).and_then(|c| c.value.parse::<i128>().ok())
                };
                let value = crate::constexpr::eval(expr, iota, &lookup).filter(|v| *v >= 0);
                if let Some(value) = value {
                    file.consts.push(ConstSpec {
                        name: name.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }
        values
    }

    fn skip_decl(&mut self) -> Result<(), ParseError> {
        let mut stack: Vec<TokenKind> = Vec::new();
        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof => {
                    return match stack.last() {
                        Some(_) => Err(self.error("closing delimiter")),
                        None => Ok(()),
                    };
                }
                TokenKind::Semi if stack.is_empty() => {
                    self.bump();
                    return Ok(());
                }
                TokenKind::LParen => stack.push(TokenKind::RParen),
                TokenKind::LBrack => stack.push(TokenKind::RBrack),
                TokenKind::LBrace => stack.push(TokenKind::RBrace),
                TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace => {
                    if stack.pop() != Some(tok.kind) {
                        return Err(self.error("matching delimiter"));
                    }
                }
                _ => {}
            }
            self.bump();
        }
    }

    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        match self.peek().kind {
            TokenKind::Ident => self.parse_type_name(),
            TokenKind::Star => {
                self.bump();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            TokenKind::LBrack => {
                self.bump();
                if self.eat(TokenKind::RBrack) {
                    return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
                }
                let len = self.parse_array_len()?;
                self.expect(TokenKind::RBrack, "']'")?;
                Ok(TypeExpr::Array {
                    len,
                    elem: Box::new(self.parse_type()?),
                })
            }
            TokenKind::Map => {
                self.bump();
                self.expect(TokenKind::LBrack, "'['")?;
                let key = self.parse_type()?;
                self.expect(TokenKind::RBrack, "']'")?;
                let value = self.parse_type()?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            TokenKind::Chan => {
                self.bump();
                let dir = if self.eat(TokenKind::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                })
            }
            TokenKind::Arrow => {
                self.bump();
                self.expect(TokenKind::Chan, "'chan'")?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.parse_type()?),
                })
            }
            TokenKind::Func => {
                self.bump();
                Ok(TypeExpr::Func(self.parse_signature()?))
            }
            TokenKind::Struct => self.parse_struct_type(),
            TokenKind::Interface => self.parse_interface_type(),
            TokenKind::LParen => {
                self.bump();
                let ty = self.parse_type()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(ty)
            }
            _ => Err(self.error("type")),
        }
    }

    fn parse_type_name(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.expect(TokenKind::Ident, "type name")?;
        let (package, name) = if self.eat(TokenKind::Dot) {
            let second = self.expect(TokenKind::Ident, "identifier")?;
            (Some(first.text.to_string()), second.text.to_string())
        } else {
            (None, first.text.to_string())
        };

        let mut args = Vec::new();
        if self.eat(TokenKind::LBrack) {
            loop {
                args.push(self.parse_type()?);
                if !self.eat(TokenKind::Comma) || self.at(TokenKind::RBrack) {
                    break;
                }
            }
            self.expect(TokenKind::RBrack, "']'")?;
        }

        Ok(TypeExpr::Name {
            package,
            name,
            args,
        })
    }

    fn parse_array_len(&mut self) -> Result<ArrayLen, ParseError> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::Number => {
                self.bump();
                Ok(ArrayLen::Literal(tok.text.to_string()))
            }
            TokenKind::Ident => {
                self.bump();
                if self.eat(TokenKind::Dot) {
                    let name = self.expect(TokenKind::Ident, "identifier")?;
                    Ok(ArrayLen::Const {
                        package: Some(tok.text.to_string()),
                        name: name.text.to_string(),
                    })
                } else {
                    Ok(ArrayLen::Const {
                        package: None,
                        name: tok.text.to_string(),
                    })
                }
            }
            _ => Err(self.error("array length")),
        }
    }

    /// Parses `(params) results`, with the opening parenthesis next.
    fn parse_signature(&mut self) -> Result<FuncExpr, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let (params, variadic) = self.parse_params()?;

        let results = if self.eat(TokenKind::LParen) {
            let (results, variadic) = self.parse_params()?;
            if variadic {
                return Err(self.error("result type"));
            }
            results
        } else if self.starts_type() {
            vec![ParamExpr {
                name: None,
                ty: self.parse_type()?,
            }]
        } else {
            Vec::new()
        };

        Ok(FuncExpr {
            params,
            results,
            variadic,
        })
    }

    fn starts_type(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident
                | TokenKind::Star
                | TokenKind::LBrack
                | TokenKind::Map
                | TokenKind::Chan
                | TokenKind::Arrow
                | TokenKind::Func
                | TokenKind::Struct
                | TokenKind::Interface
        )
    }

    /// Parses a parameter list up to and including `)`.
    fn parse_params(&mut self) -> Result<(Vec<ParamExpr>, bool), ParseError> {
        let mut entries: Vec<(Option<String>, TypeExpr)> = Vec::new();
        let mut variadic = false;

        loop {
            if self.eat(TokenKind::RParen) {
                break;
            }
            if variadic {
                return Err(self.error("')' after variadic parameter"));
            }
            let name = if self.at(TokenKind::Ident)
                && !matches!(
                    self.nth(1).kind,
                    TokenKind::Dot | TokenKind::Comma | TokenKind::RParen
                ) {
                Some(self.bump().text.to_string())
            } else {
                None
            };
            variadic = self.eat(TokenKind::Ellipsis);
            let ty = self.parse_type()?;
            entries.push((name, ty));

            if !self.eat(TokenKind::Comma) {
                self.expect(TokenKind::RParen, "',' or ')'")?;
                break;
            }
        }

        if entries.iter().all(|(name, _)| name.is_none()) {
            let params = entries
                .into_iter()
                .map(|(_, ty)| ParamExpr { name: None, ty })
                .collect();
            return Ok((params, variadic));
        }

        // Named form: bare identifiers before a typed name share its type.
        let mut params = Vec::with_capacity(entries.len());
        let mut pending: Vec<String> = Vec::new();
        for (name, ty) in entries {
            match name {
                Some(name) => {
                    for shared in pending.drain(..) {
                        params.push(ParamExpr {
                            name: Some(shared),
                            ty: ty.clone(),
                        });
                    }
                    params.push(ParamExpr {
                        name: Some(name),
                        ty,
                    });
                }
                None => match ty {
                    TypeExpr::Name {
                        package: None,
                        name,
                        args,
                    } if args.is_empty() => pending.push(name),
                    _ => return Err(self.error("named parameter")),
                },
            }
        }
        if !pending.is_empty() {
            return Err(self.error("parameter type"));
        }

        Ok((params, variadic))
    }

    fn parse_struct_type(&mut self) -> Result<TypeExpr, ParseError> {
        self.expect(TokenKind::Struct, "'struct'")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut fields = Vec::new();
        loop {
            self.skip_semis();
            if self.eat(TokenKind::RBrace) {
                break;
            }
            fields.push(self.parse_field_decl()?);
            self.end_group_item(TokenKind::RBrace)?;
        }
        Ok(TypeExpr::Struct(fields))
    }

    fn parse_field_decl(&mut self) -> Result<FieldExpr, ParseError> {
        let mut names = Vec::new();
        let ty = match self.peek().kind {
            TokenKind::Star => self.parse_type()?,
            TokenKind::Ident => match self.nth(1).kind {
                TokenKind::Dot
                | TokenKind::Semi
                | TokenKind::RBrace
                | TokenKind::String
                | TokenKind::RawString => self.parse_type()?,
                TokenKind::Comma => {
                    loop {
                        names.push(self.expect(TokenKind::Ident, "field name")?.text.to_string());
                        if !self.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                    self.parse_type()?
                }
                _ => {
                    names.push(self.bump().text.to_string());
                    self.parse_type()?
                }
            },
            _ => return Err(self.error("field name or embedded type")),
        };

        let tag = match self.peek().kind {
            TokenKind::String | TokenKind::RawString => Some(self.bump().text.to_string()),
            _ => None,
        };

        Ok(FieldExpr { names, ty, tag })
    }

    fn parse_interface_type(&mut self) -> Result<TypeExpr, ParseError> {
        self.expect(TokenKind::Interface, "'interface'")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut elems = Vec::new();
        loop {
            self.skip_semis();
            if self.eat(TokenKind::RBrace) {
                break;
            }
            elems.push(self.parse_interface_elem()?);
            self.end_group_item(TokenKind::RBrace)?;
        }
        Ok(TypeExpr::Interface(elems))
    }

    fn parse_interface_elem(&mut self) -> Result<InterfaceElem, ParseError> {
        if self.at(TokenKind::Ident) && self.nth(1).kind == TokenKind::LParen {
            let name = self.bump().text.to_string();
            let sig = self.parse_signature()?;
            return Ok(InterfaceElem::Method { name, sig });
        }

        let mut terms = vec![self.parse_union_term()?];
        while self.eat(TokenKind::Pipe) {
            terms.push(self.parse_union_term()?);
        }
        if terms.len() == 1 && !terms[0].tilde {
            if let Some(term) = terms.pop() {
                return Ok(InterfaceElem::Embed(term.ty));
            }
        }
        Ok(InterfaceElem::Union(terms))
    }

    fn parse_union_term(&mut self) -> Result<UnionTerm, ParseError> {
        let tilde = self.eat(TokenKind::Tilde);
        Ok(UnionTerm {
            tilde,
            ty: self.parse_type()?,
        })
    }
}

/// Strips the surrounding quotes of a string literal.
fn unquote(lit: &str) -> &str {
    lit.get(1..lit.len().saturating_sub(1)).unwrap_or_default()
}

/// Splits `tokens` at commas outside any delimiter pair.
fn split_top_level<'t, 'src>(tokens: &'t [Token<'src>]) -> Vec<&'t [Token<'src>]> {
    if tokens.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::LParen | TokenKind::LBrack | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace => {
                depth = depth.saturating_sub(1);
            }
            TokenKind::Comma if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: &str = r#"package short

import (
	"time"
)

type Config struct {
	APIKey      string
	APIEndpoint string
	Headers     map[string]string
	NowFn       func() time.Time
}
"#;

    fn only_type(src: &str) -> TypeExpr {
        let file = parse_source(src).expect("Failed to parse");
        file.types
            .into_iter()
            .next()
            .expect("one type declaration")
            .ty
    }

    fn name(n: &str) -> TypeExpr {
        TypeExpr::ident(n)
    }

    #[test]
    fn test_parse_short() {
        let file = parse_source(SHORT).expect("Failed to parse");
        assert_eq!(file.package, "short");
        assert_eq!(file.imports.len(), 1);
        assert_eq!(file.imports[0].path, "time");

        let config = file.get_type("Config").expect("Config declared");
        assert!(!config.alias);
        assert!(config.type_params.is_empty());
        let TypeExpr::Struct(fields) = &config.ty else {
            panic!("expected struct, got {:?}", config.ty);
        };
        let names: Vec<&str> = fields.iter().map(|f| f.names[0].as_str()).collect();
        assert_eq!(names, ["APIKey", "APIEndpoint", "Headers", "NowFn"]);
        assert_eq!(
            fields[3].ty,
            TypeExpr::Func(FuncExpr {
                params: Vec::new(),
                results: vec![ParamExpr {
                    name: None,
                    ty: TypeExpr::Name {
                        package: Some("time".to_string()),
                        name: "Time".to_string(),
                        args: Vec::new(),
                    },
                }],
                variadic: false,
            })
        );
    }

    #[test]
    fn test_missing_package() {
        let err = parse_source("type T int").expect_err("should fail");
        assert!(matches!(err, ParseError::MissingPackage));
    }

    #[test]
    fn test_single_and_aliased_imports() {
        let file = parse_source(
            "package p\nimport \"fmt\"\nimport (\n\tstdhttp \"net/http\"\n\t_ \"embed\"\n\t. \"math\"\n)\n",
        )
        .expect("Failed to parse");
        assert_eq!(file.imports.len(), 4);
        assert_eq!(file.imports[0].alias, None);
        assert_eq!(file.imports[1].alias.as_deref(), Some("stdhttp"));
        assert_eq!(file.imports[1].package_name(), "stdhttp");
        assert_eq!(file.imports[2].alias.as_deref(), Some("_"));
        assert_eq!(file.imports[3].alias.as_deref(), Some("."));
    }

    #[test]
    fn test_skips_functions_and_vars() {
        let src = r#"package p

var registry = map[string]int{"a": 1}

func helper(x int) (int, error) {
	if x > 0 {
		return x, nil
	}
	return 0, fmt.Errorf("bad %d", x)
}

func (c *Config) Method() {}

type Config struct {
	Name string
}
"#;
        let file = parse_source(src).expect("Failed to parse");
        assert_eq!(file.types.len(), 1);
        assert_eq!(file.types[0].name, "Config");
    }

    #[test]
    fn test_grouped_types_and_alias() {
        let src = "package p\ntype (\n\tID = string\n\tCount int\n)\n";
        let file = parse_source(src).expect("Failed to parse");
        assert_eq!(file.types.len(), 2);
        assert!(file.types[0].alias);
        assert_eq!(file.types[0].ty, name("string"));
        assert!(!file.types[1].alias);
    }

    #[test]
    fn test_generic_type_params() {
        let src = "package p\ntype Pair[K comparable, V any] struct { Key K; Value V }\ntype Arr [N]int\n";
        let file = parse_source(src).expect("Failed to parse");
        assert_eq!(file.types[0].type_params, ["K", "V"]);
        assert!(file.types[1].type_params.is_empty());
        assert!(matches!(file.types[1].ty, TypeExpr::Array { .. }));
    }

    #[test]
    fn test_consts() {
        let src = "package p\nconst Size = 16\nconst (\n\tA int = 0x10\n\tB = iota\n\tC = \"s\"\n)\n";
        let file = parse_source(src).expect("Failed to parse");
        assert_eq!(file.consts.len(), 3);
        assert_eq!(file.get_const("Size").map(|c| c.value.as_str()), Some("16"));
        assert_eq!(file.get_const("A").map(|c| c.value.as_str()), Some("16"));
        assert_eq!(file.get_const("B").map(|c| c.value.as_str()), Some("1"));
        assert!(file.get_const("C").is_none());
    }

    #[test]
    fn test_const_expressions() {
        let src = "package p\nconst Shift = 1 << 3\nconst N, K = 2, 9\nconst Words = (Shift + K) * int(N)\nconst Neg = -1\n";
        let file = parse_source(src).expect("Failed to parse");
        let value = |name: &str| file.get_const(name).map(|c| c.value.clone());
        assert_eq!(value("Shift").as_deref(), Some("8"));
        assert_eq!(value("N").as_deref(), Some("2"));
        assert_eq!(value("K").as_deref(), Some("9"));
        assert_eq!(value("Words").as_deref(), Some("34"));
        assert!(value("Neg").is_none());
    }

    #[test]
    fn test_const_iota_repetition() {
        let src = "package p\n\nconst (\n\t_ = iota\n\tKB = 1 << (10 * iota)\n\tMB\n)\n\nconst (\n\tLo, Hi = iota, iota + 10\n\tLo2, Hi2\n\tSkipped\n)\n";
        let file = parse_source(src).expect("Failed to parse");
        let value = |name: &str| file.get_const(name).map(|c| c.value.clone());
        assert!(value("_").is_none());
        assert_eq!(value("KB").as_deref(), Some("1024"));
        assert_eq!(value("MB").as_deref(), Some("1048576"));
        assert_eq!(value("Lo").as_deref(), Some("0"));
        assert_eq!(value("Hi").as_deref(), Some("10"));
        assert_eq!(value("Lo2").as_deref(), Some("1"));
        assert_eq!(value("Hi2").as_deref(), Some("11"));
        assert!(value("Skipped").is_none());
    }

    #[test]
    fn test_composite_types() {
        let ty = only_type("package p\ntype T map[string][]*[4]byte\n");
        assert_eq!(
            ty,
            TypeExpr::Map {
                key: Box::new(name("string")),
                value: Box::new(TypeExpr::Slice(Box::new(TypeExpr::Pointer(Box::new(
                    TypeExpr::Array {
                        len: ArrayLen::Literal("4".to_string()),
                        elem: Box::new(name("byte")),
                    }
                ))))),
            }
        );
    }

    #[test]
    fn test_channel_directions() {
        let ty = only_type("package p\ntype T struct { A chan int; B chan<- int; C <-chan int }\n");
        let TypeExpr::Struct(fields) = ty else {
            panic!("expected struct");
        };
        let dirs: Vec<ChanDir> = fields
            .iter()
            .map(|f| match &f.ty {
                TypeExpr::Chan { dir, .. } => *dir,
                other => panic!("expected chan, got {other:?}"),
            })
            .collect();
        assert_eq!(dirs, [ChanDir::Both, ChanDir::Send, ChanDir::Recv]);
    }

    #[test]
    fn test_named_params_share_type() {
        let ty = only_type("package p\ntype F func(a, b int, rest ...string) (n int, err error)\n");
        let TypeExpr::Func(sig) = ty else {
            panic!("expected func");
        };
        assert!(sig.variadic);
        let params: Vec<(Option<&str>, &TypeExpr)> = sig
            .params
            .iter()
            .map(|p| (p.name.as_deref(), &p.ty))
            .collect();
        assert_eq!(
            params,
            [
                (Some("a"), &name("int")),
                (Some("b"), &name("int")),
                (Some("rest"), &name("string")),
            ]
        );
        assert_eq!(sig.results.len(), 2);
        assert_eq!(sig.results[1].name.as_deref(), Some("err"));
    }

    #[test]
    fn test_unnamed_params() {
        let ty = only_type("package p\ntype F func(int, io.Reader, ...byte) error\n");
        let TypeExpr::Func(sig) = ty else {
            panic!("expected func");
        };
        assert!(sig.variadic);
        assert!(sig.params.iter().all(|p| p.name.is_none()));
        assert_eq!(sig.params.len(), 3);
        assert_eq!(sig.results.len(), 1);
    }

    #[test]
    fn test_struct_fields() {
        let src = r#"package p
type T struct {
	time.Time
	*Inner
	A, B int `json:"ab"`
	Nested struct {
		X float64
	}
}
"#;
        let TypeExpr::Struct(fields) = only_type(src) else {
            panic!("expected struct");
        };
        assert_eq!(fields.len(), 4);
        assert!(fields[0].is_embedded());
        assert_eq!(fields[0].ty.embedded_name(), Some("Time"));
        assert!(fields[1].is_embedded());
        assert_eq!(fields[2].names, ["A", "B"]);
        assert_eq!(fields[2].tag.as_deref(), Some("`json:\"ab\"`"));
        assert!(matches!(fields[3].ty, TypeExpr::Struct(_)));
    }

    #[test]
    fn test_interface_elements() {
        let src = "package p\ntype I interface {\n\tio.Reader\n\tClose() error\n\t~int | string\n}\n";
        let TypeExpr::Interface(elems) = only_type(src) else {
            panic!("expected interface");
        };
        assert!(matches!(elems[0], InterfaceElem::Embed(_)));
        assert!(matches!(elems[1], InterfaceElem::Method { ref name, .. } if name == "Close"));
        assert!(matches!(elems[2], InterfaceElem::Union(ref terms) if terms.len() == 2));
    }

    #[test]
    fn test_instantiated_type() {
        let ty = only_type("package p\ntype T struct { Items list.List[int, string] }\n");
        let TypeExpr::Struct(fields) = ty else {
            panic!("expected struct");
        };
        assert!(matches!(&fields[0].ty, TypeExpr::Name { args, .. } if args.len() == 2));
    }

    #[test]
    fn test_syntax_error_position() {
        let err = parse_source("package p\n\ntype T struct {\n\tA map[string\n}\n").expect_err("should fail");
        match err {
            ParseError::Syntax { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"time\""), "time");
        assert_eq!(unquote("`x`"), "x");
        assert_eq!(unquote(""), "");
    }
}
