//! Syntax tree for the subset of Go source the generator reads.
//!
//! Only the package clause, imports, type declarations and simple integer
//! constants are kept; everything else in a file is skipped by the parser.

use crate::types::{ChanDir, default_package_name};

/// A parsed Go source file.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    /// Package name from the package clause.
    pub package: String,
    /// Import declarations in source order.
    pub imports: Vec<ImportSpec>,
    /// Type declarations in source order.
    pub types: Vec<TypeSpec>,
    /// Integer constants whose value could be evaluated.
    pub consts: Vec<ConstSpec>,
}

impl SourceFile {
    /// Looks up a type declaration by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeSpec> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Looks up an integer constant by name.
    #[must_use]
    pub fn get_const(&self, name: &str) -> Option<&ConstSpec> {
        self.consts.iter().find(|c| c.name == name)
    }
}

/// An import spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit package name (`_` and `.` included), if any.
    pub alias: Option<String>,
    /// Unquoted import path.
    pub path: String,
}

impl ImportSpec {
    /// Returns the name the file uses to refer to this package.
    #[must_use]
    pub fn package_name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => default_package_name(&self.path),
        }
    }

    /// Returns true for blank (`_`) and dot (`.`) imports, which bind no name.
    #[must_use]
    pub fn is_unnamed(&self) -> bool {
        matches!(self.alias.as_deref(), Some("_" | "."))
    }
}

/// A type declaration.
#[derive(Debug, Clone)]
pub struct TypeSpec {
    /// Declared name.
    pub name: String,
    /// Type parameter names, empty for non-generic declarations.
    pub type_params: Vec<String>,
    /// Whether this is an alias declaration (`type A = B`).
    pub alias: bool,
    /// Declared type.
    pub ty: TypeExpr,
    /// Line of the declared name.
    pub line: usize,
}

/// An integer constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstSpec {
    /// Constant name.
    pub name: String,
    /// Evaluated value in decimal.
    pub value: String,
}

/// A type expression as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Possibly qualified, possibly instantiated type name.
    Name {
        /// Package qualifier.
        package: Option<String>,
        /// Identifier.
        name: String,
        /// Type arguments.
        args: Vec<TypeExpr>,
    },
    /// `*T`.
    Pointer(Box<TypeExpr>),
    /// `[N]T`.
    Array {
        /// Length expression.
        len: ArrayLen,
        /// Element type.
        elem: Box<TypeExpr>,
    },
    /// `[]T`.
    Slice(Box<TypeExpr>),
    /// `map[K]V`.
    Map {
        /// Key type.
        key: Box<TypeExpr>,
        /// Value type.
        value: Box<TypeExpr>,
    },
    /// Channel type.
    Chan {
        /// Direction.
        dir: ChanDir,
        /// Element type.
        elem: Box<TypeExpr>,
    },
    /// `func(...) ...`.
    Func(FuncExpr),
    /// `struct{...}`.
    Struct(Vec<FieldExpr>),
    /// `interface{...}`.
    Interface(Vec<InterfaceElem>),
}

impl TypeExpr {
    /// Describes the shape of this expression for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Name {
                package: Some(pkg),
                name,
                ..
            } => format!("{pkg}.{name}"),
            Self::Name { name, .. } => name.clone(),
            Self::Pointer(_) => "pointer".to_string(),
            Self::Array { .. } => "array".to_string(),
            Self::Slice(_) => "slice".to_string(),
            Self::Map { .. } => "map".to_string(),
            Self::Chan { .. } => "chan".to_string(),
            Self::Func(_) => "func".to_string(),
            Self::Struct(_) => "struct".to_string(),
            Self::Interface(_) => "interface".to_string(),
        }
    }

    /// Creates an unqualified, uninstantiated type name.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Name {
            package: None,
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Returns the identifier an embedded field of this type is named by.
    #[must_use]
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            Self::Name { name, .. } => Some(name),
            Self::Pointer(inner) => inner.embedded_name(),
            _ => None,
        }
    }
}

/// Array length expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayLen {
    /// Integer literal.
    Literal(String),
    /// Constant identifier, possibly qualified.
    Const {
        /// Package qualifier.
        package: Option<String>,
        /// Constant name.
        name: String,
    },
}

impl std::fmt::Display for ArrayLen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Const {
                package: Some(pkg),
                name,
            } => write!(f, "{pkg}.{name}"),
            Self::Const {
                package: None,
                name,
            } => f.write_str(name),
        }
    }
}

/// A function type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncExpr {
    /// Parameters.
    pub params: Vec<ParamExpr>,
    /// Results.
    pub results: Vec<ParamExpr>,
    /// Whether the last parameter is `...T`.
    pub variadic: bool,
}

/// A parameter or result. `name` is `None` in unnamed lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamExpr {
    /// Parameter name.
    pub name: Option<String>,
    /// Parameter type; for a variadic parameter, the element type.
    pub ty: TypeExpr,
}

/// A struct field declaration line, which may declare several names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldExpr {
    /// Field names; empty for an embedded field.
    pub names: Vec<String>,
    /// Field type.
    pub ty: TypeExpr,
    /// Raw tag literal, if any.
    pub tag: Option<String>,
}

impl FieldExpr {
    /// Returns true if this is an embedded field.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// An element of an interface body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElem {
    /// Explicit method.
    Method {
        /// Method name.
        name: String,
        /// Method signature.
        sig: FuncExpr,
    },
    /// Embedded interface or type.
    Embed(TypeExpr),
    /// Type set union such as `~int | string`.
    Union(Vec<UnionTerm>),
}

/// A term of a type set union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionTerm {
    /// Whether the term is `~T`.
    pub tilde: bool,
    /// Term type.
    pub ty: TypeExpr,
}
