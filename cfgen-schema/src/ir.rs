//! Resolved declaration representation for code generation.
//!
//! This module turns the syntax of one struct declaration into a list of
//! fields with fully resolved [`TypeRef`]s, following local type names and
//! aliases and qualifying imported types with their package.

use crate::ast::{ArrayLen, FieldExpr, FuncExpr, InterfaceElem, ParamExpr, SourceFile, TypeExpr};
use crate::error::SchemaError;
use crate::types::{
    InterfaceType, Method, Namespace, Param, Signature, StructField, TypeRef, is_basic_type,
};
use crate::validation::{validate_fields, validate_type_spec};
use std::collections::HashMap;

/// A resolved struct declaration, ready for code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Declared type name.
    pub name: String,
    /// Package the declaration belongs to.
    pub namespace: Namespace,
    /// Fields in declaration order.
    pub fields: Vec<DeclField>,
}

impl StructDecl {
    /// Creates a declaration from already resolved fields.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Namespace, fields: Vec<DeclField>) -> Self {
        Self {
            name: name.into(),
            namespace,
            fields,
        }
    }

    /// Resolves the struct type `name` declared in `file`.
    ///
    /// # Errors
    /// Returns `SchemaError` if the declaration is missing, is not a struct,
    /// is generic, or references types the file does not define or import.
    pub fn resolve(file: &SourceFile, name: &str) -> Result<Self, SchemaError> {
        let spec = file
            .get_type(name)
            .ok_or_else(|| SchemaError::DeclarationNotFound {
                name: name.to_string(),
            })?;
        validate_type_spec(spec)?;

        let resolver = Resolver::new(file);
        let mut fields = Vec::new();
        for field in resolver.underlying_struct(name)? {
            resolver.push_fields(field, &mut fields)?;
        }

        let decl = Self::new(name, resolver.local.clone(), fields);
        validate_fields(&decl)?;
        tracing::debug!(
            "resolved struct {}.{} with {} fields",
            decl.namespace.name,
            decl.name,
            decl.fields.len()
        );
        Ok(decl)
    }
}

/// A resolved field of a [`StructDecl`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclField {
    /// Field name; for embedded fields, the type's identifier.
    pub name: String,
    /// Field type.
    pub ty: TypeRef,
    /// Whether the field is embedded.
    pub embedded: bool,
}

impl DeclField {
    /// Creates a named field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
        }
    }
}

/// Resolves type expressions in the scope of one source file.
#[derive(Debug)]
pub struct Resolver<'a> {
    file: &'a SourceFile,
    local: Namespace,
    imports: HashMap<String, Namespace>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver for `file`.
    #[must_use]
    pub fn new(file: &'a SourceFile) -> Self {
        let imports = file
            .imports
            .iter()
            .filter(|spec| !spec.is_unnamed())
            .map(|spec| {
                let name = spec.package_name();
                (name.clone(), Namespace::new(spec.path.clone(), name))
            })
            .collect();

        Self {
            file,
            local: Namespace::local(file.package.clone()),
            imports,
        }
    }

    /// Follows local defined types and aliases from `name` to a struct body.
    fn underlying_struct(&self, name: &str) -> Result<&'a [FieldExpr], SchemaError> {
        let mut seen = vec![name.to_string()];
        let mut current = name;

        loop {
            let spec = self
                .file
                .get_type(current)
                .ok_or_else(|| SchemaError::undefined(current))?;
            match &spec.ty {
                TypeExpr::Struct(fields) => return Ok(fields.as_slice()),
                TypeExpr::Name {
                    package: None,
                    name: next,
                    args,
                } if args.is_empty() && self.file.get_type(next).is_some() => {
                    if seen.iter().any(|s| s == next) {
                        seen.push(next.clone());
                        return Err(SchemaError::CircularReference {
                            path: seen.join(" -> "),
                        });
                    }
                    seen.push(next.clone());
                    current = next;
                }
                other => {
                    return Err(SchemaError::NotAStruct {
                        name: name.to_string(),
                        kind: other.describe(),
                    });
                }
            }
        }
    }

    fn push_fields(&self, field: &FieldExpr, out: &mut Vec<DeclField>) -> Result<(), SchemaError> {
        let ty = self.resolve(&field.ty)?;
        if field.is_embedded() {
            let name = field.ty.embedded_name().unwrap_or_default();
            out.push(DeclField {
                name: name.to_string(),
                ty,
                embedded: true,
            });
        } else {
            for name in &field.names {
                out.push(DeclField::new(name.clone(), ty.clone()));
            }
        }
        Ok(())
    }

    /// Resolves a type expression.
    ///
    /// # Errors
    /// Returns `SchemaError` for undefined identifiers, unknown package
    /// qualifiers, non-constant array lengths and alias cycles. Shapes that
    /// resolve but cannot be generated become [`TypeRef::Unsupported`].
    pub fn resolve(&self, expr: &TypeExpr) -> Result<TypeRef, SchemaError> {
        self.resolve_in(expr, &mut Vec::new())
    }

    fn resolve_in(&self, expr: &TypeExpr, aliases: &mut Vec<String>) -> Result<TypeRef, SchemaError> {
        match expr {
            TypeExpr::Name {
                package: None,
                name,
                args,
            } => self.resolve_ident(name, args, aliases),
            TypeExpr::Name {
                package: Some(package),
                name,
                args,
            } => {
                let namespace =
                    self.imports
                        .get(package)
                        .ok_or_else(|| SchemaError::UnknownPackage {
                            package: package.clone(),
                            name: name.clone(),
                        })?;
                if !args.is_empty() {
                    return Ok(TypeRef::Unsupported(format!(
                        "instantiated generic type {package}.{name}"
                    )));
                }
                Ok(TypeRef::named(Some(namespace.clone()), name.clone()))
            }
            TypeExpr::Pointer(elem) => Ok(TypeRef::pointer(self.resolve_in(elem, aliases)?)),
            TypeExpr::Array { len, elem } => {
                let len = self.array_len(len)?;
                Ok(TypeRef::array(len, self.resolve_in(elem, aliases)?))
            }
            TypeExpr::Slice(elem) => Ok(TypeRef::slice(self.resolve_in(elem, aliases)?)),
            TypeExpr::Map { key, value } => Ok(TypeRef::map(
                self.resolve_in(key, aliases)?,
                self.resolve_in(value, aliases)?,
            )),
            TypeExpr::Chan { dir, elem } => Ok(TypeRef::chan(*dir, self.resolve_in(elem, aliases)?)),
            TypeExpr::Func(func) => Ok(TypeRef::Signature(self.signature(func, aliases)?)),
            TypeExpr::Struct(fields) => {
                let mut out = Vec::with_capacity(fields.len());
                for field in fields {
                    let ty = self.resolve_in(&field.ty, aliases)?;
                    if field.is_embedded() {
                        let name = field.ty.embedded_name().unwrap_or_default();
                        out.push(StructField::embedded(name, ty));
                    } else {
                        for name in &field.names {
                            out.push(StructField::new(name.clone(), ty.clone()));
                        }
                    }
                }
                Ok(TypeRef::Struct(out))
            }
            TypeExpr::Interface(elems) => {
                let mut iface = InterfaceType::default();
                for elem in elems {
                    match elem {
                        InterfaceElem::Method { name, sig } => iface.methods.push(Method {
                            name: name.clone(),
                            signature: self.signature(sig, aliases)?,
                        }),
                        InterfaceElem::Embed(ty) => iface.embeds.push(self.resolve_in(ty, aliases)?),
                        InterfaceElem::Union(_) => iface
                            .embeds
                            .push(TypeRef::Unsupported("type set union".to_string())),
                    }
                }
                Ok(TypeRef::Interface(iface))
            }
        }
    }

    fn resolve_ident(
        &self,
        name: &str,
        args: &[TypeExpr],
        aliases: &mut Vec<String>,
    ) -> Result<TypeRef, SchemaError> {
        if let Some(spec) = self.file.get_type(name) {
            if !args.is_empty() || !spec.type_params.is_empty() {
                return Ok(TypeRef::Unsupported(format!("generic type {name}")));
            }
            if !spec.alias {
                return Ok(TypeRef::named(Some(self.local.clone()), name));
            }
            if aliases.iter().any(|a| a == name) {
                aliases.push(name.to_string());
                return Err(SchemaError::CircularReference {
                    path: aliases.join(" -> "),
                });
            }
            aliases.push(name.to_string());
            let resolved = self.resolve_in(&spec.ty, aliases);
            aliases.pop();
            return resolved;
        }

        if is_basic_type(name) {
            return Ok(TypeRef::primitive(name));
        }
        match name {
            "error" | "comparable" => Ok(TypeRef::named(None, name)),
            "any" => Ok(TypeRef::empty_interface()),
            _ => Err(SchemaError::undefined(name)),
        }
    }

    fn signature(&self, func: &FuncExpr, aliases: &mut Vec<String>) -> Result<Signature, SchemaError> {
        let mut params = self.params(&func.params, aliases)?;
        if func.variadic {
            if let Some(last) = params.last_mut() {
                last.ty = TypeRef::slice(last.ty.clone());
            }
        }
        Ok(Signature {
            params,
            results: self.params(&func.results, aliases)?,
            variadic: func.variadic,
        })
    }

    fn params(&self, params: &[ParamExpr], aliases: &mut Vec<String>) -> Result<Vec<Param>, SchemaError> {
        params
            .iter()
            .map(|p| {
                Ok(Param::new(
                    p.name.clone().unwrap_or_default(),
                    self.resolve_in(&p.ty, aliases)?,
                ))
            })
            .collect()
    }

    fn array_len(&self, len: &ArrayLen) -> Result<u64, SchemaError> {
        let unsupported = || SchemaError::UnsupportedArrayLength {
            length: len.to_string(),
        };
        let literal = match len {
            ArrayLen::Literal(text) => text.as_str(),
            ArrayLen::Const {
                package: None,
                name,
            } => self
                .file
                .get_const(name)
                .map(|c| c.value.as_str())
                .ok_or_else(unsupported)?,
            ArrayLen::Const { .. } => return Err(unsupported()),
        };
        parse_int_literal(literal).ok_or_else(unsupported)
    }
}

/// Parses a Go integer literal (decimal, `0x`, `0o`, `0b` or legacy octal).
#[must_use]
pub fn parse_int_literal(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|&c| c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };
    u64::from_str_radix(body, radix).ok()
}
