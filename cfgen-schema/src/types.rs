//! Resolved type model.
//!
//! This module contains the data structures describing fully resolved Go
//! types: primitives, named types, composites, signatures, interfaces and
//! channels. Every field of a generated configuration carries one of these.

/// A Go package a named type is declared in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    /// Import path (empty for the package being processed).
    pub path: String,
    /// Package name used to qualify identifiers.
    pub name: String,
}

impl Namespace {
    /// Creates a namespace from an import path and package name.
    #[must_use]
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Creates the namespace of the package being processed.
    ///
    /// The local package has no import path, so any imported namespace
    /// compares unequal to it.
    #[must_use]
    pub fn local(name: impl Into<String>) -> Self {
        Self::new(String::new(), name)
    }

    /// Creates a namespace named after its import path.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = default_package_name(&path);
        Self { path, name }
    }

    /// Returns true if this is the namespace of the processed package.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns true if importing this namespace needs an explicit name.
    #[must_use]
    pub fn needs_alias(&self) -> bool {
        self.name != default_package_name(&self.path)
    }
}

/// Guesses the package name of an import path.
///
/// Takes the last path element, skipping a major-version element such as
/// `v2`, then drops everything from the first `.`, a `go-` prefix, and maps
/// `-` to `_`: `gopkg.in/yaml.v3` gives `yaml`, `github.com/mattn/go-sqlite3`
/// gives `sqlite3`.
#[must_use]
pub fn default_package_name(path: &str) -> String {
    let mut parts = path.rsplit('/');
    let mut last = parts.next().unwrap_or(path);
    if is_major_version(last) {
        if let Some(prev) = parts.next() {
            last = prev;
        }
    }
    let last = last.split('.').next().unwrap_or(last);
    let last = last.strip_prefix("go-").unwrap_or(last);
    last.replace('-', "_")
}

fn is_major_version(s: &str) -> bool {
    s.strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChanDir {
    /// `chan T`.
    #[default]
    Both,
    /// `chan<- T`.
    Send,
    /// `<-chan T`.
    Recv,
}

/// A type reference.
///
/// Every composite variant owns fully formed child references; there are no
/// partially resolved nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Predeclared basic type such as `int` or `string`.
    Primitive(String),
    /// Defined type, optionally qualified by the package declaring it.
    Named(NamedType),
    /// Fixed-length array.
    Array {
        /// Array length.
        len: u64,
        /// Element type.
        elem: Box<TypeRef>,
    },
    /// Pointer to the element type.
    Pointer(Box<TypeRef>),
    /// Anonymous struct.
    Struct(Vec<StructField>),
    /// Function signature.
    Signature(Signature),
    /// Slice of the element type.
    Slice(Box<TypeRef>),
    /// Map type.
    Map {
        /// Key type.
        key: Box<TypeRef>,
        /// Value type.
        value: Box<TypeRef>,
    },
    /// Interface type.
    Interface(InterfaceType),
    /// Channel type.
    Chan {
        /// Direction.
        dir: ChanDir,
        /// Element type.
        elem: Box<TypeRef>,
    },
    /// A shape code generation cannot express, with a short description.
    Unsupported(String),
}

impl TypeRef {
    /// Creates a primitive type reference.
    #[must_use]
    pub fn primitive(name: impl Into<String>) -> Self {
        Self::Primitive(name.into())
    }

    /// Creates a named type reference.
    #[must_use]
    pub fn named(namespace: Option<Namespace>, name: impl Into<String>) -> Self {
        Self::Named(NamedType {
            namespace,
            name: name.into(),
        })
    }

    /// Creates a pointer to `elem`.
    #[must_use]
    pub fn pointer(elem: TypeRef) -> Self {
        Self::Pointer(Box::new(elem))
    }

    /// Creates a slice of `elem`.
    #[must_use]
    pub fn slice(elem: TypeRef) -> Self {
        Self::Slice(Box::new(elem))
    }

    /// Creates an array of `len` elements.
    #[must_use]
    pub fn array(len: u64, elem: TypeRef) -> Self {
        Self::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// Creates a map from `key` to `value`.
    #[must_use]
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Creates a channel of `elem`.
    #[must_use]
    pub fn chan(dir: ChanDir, elem: TypeRef) -> Self {
        Self::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    /// Returns the empty interface, `interface{}`.
    #[must_use]
    pub fn empty_interface() -> Self {
        Self::Interface(InterfaceType::default())
    }

    /// Returns a short name for the shape of this type, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Named(_) => "named",
            Self::Array { .. } => "array",
            Self::Pointer(_) => "pointer",
            Self::Struct(_) => "struct",
            Self::Signature(_) => "func",
            Self::Slice(_) => "slice",
            Self::Map { .. } => "map",
            Self::Interface(_) => "interface",
            Self::Chan { .. } => "chan",
            Self::Unsupported(_) => "unsupported",
        }
    }

    /// Returns true if this type, or any type nested in it, is unsupported.
    #[must_use]
    pub fn contains_unsupported(&self) -> bool {
        match self {
            Self::Unsupported(_) => true,
            Self::Primitive(_) | Self::Named(_) => false,
            Self::Array { elem, .. } | Self::Chan { elem, .. } => elem.contains_unsupported(),
            Self::Pointer(elem) | Self::Slice(elem) => elem.contains_unsupported(),
            Self::Map { key, value } => key.contains_unsupported() || value.contains_unsupported(),
            Self::Struct(fields) => fields.iter().any(|f| f.ty.contains_unsupported()),
            Self::Signature(sig) => sig.contains_unsupported(),
            Self::Interface(iface) => {
                iface.embeds.iter().any(TypeRef::contains_unsupported)
                    || iface.methods.iter().any(|m| m.signature.contains_unsupported())
            }
        }
    }
}

/// A defined type together with its declaring package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    /// Declaring package; `None` for universe types such as `error`.
    pub namespace: Option<Namespace>,
    /// Type name.
    pub name: String,
}

/// A field of an anonymous struct type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    /// Field name (the type name for embedded fields).
    pub name: String,
    /// Field type.
    pub ty: TypeRef,
    /// Whether the field is embedded.
    pub embedded: bool,
}

impl StructField {
    /// Creates a named (non-embedded) field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
        }
    }

    /// Creates an embedded field.
    #[must_use]
    pub fn embedded(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: true,
        }
    }
}

/// A parameter or result of a signature. Unnamed entries have an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeRef,
}

impl Param {
    /// Creates a named parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Creates an unnamed parameter.
    #[must_use]
    pub fn unnamed(ty: TypeRef) -> Self {
        Self::new(String::new(), ty)
    }
}

/// A function signature.
///
/// For variadic signatures the last parameter's type is a slice of the
/// variadic element type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// Parameters in order.
    pub params: Vec<Param>,
    /// Results in order.
    pub results: Vec<Param>,
    /// Whether the last parameter is variadic.
    pub variadic: bool,
}

impl Signature {
    /// Creates a non-variadic signature.
    #[must_use]
    pub fn new(params: Vec<Param>, results: Vec<Param>) -> Self {
        Self {
            params,
            results,
            variadic: false,
        }
    }

    fn contains_unsupported(&self) -> bool {
        self.params
            .iter()
            .chain(&self.results)
            .any(|p| p.ty.contains_unsupported())
    }
}

/// An explicitly declared interface method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Method name.
    pub name: String,
    /// Method signature.
    pub signature: Signature,
}

/// An interface type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterfaceType {
    /// Embedded types in declaration order.
    pub embeds: Vec<TypeRef>,
    /// Explicit methods in declaration order.
    pub methods: Vec<Method>,
}

/// Predeclared basic type names.
pub const BASIC_TYPES: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "float32",
    "float64",
    "complex64",
    "complex128",
    "byte",
    "rune",
];

/// Returns true if `name` is a predeclared basic type.
#[must_use]
pub fn is_basic_type(name: &str) -> bool {
    BASIC_TYPES.contains(&name)
}
