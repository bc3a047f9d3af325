//! Error types for source parsing and declaration resolution.

use thiserror::Error;

/// Error type for lexing and parsing Go source.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input that does not form a valid token.
    #[error("{line}:{column}: invalid token '{text}'")]
    Lex {
        /// Line (1-based).
        line: usize,
        /// Column (1-based).
        column: usize,
        /// Offending text.
        text: String,
    },

    /// Unexpected token.
    #[error("{line}:{column}: expected {expected}, found '{found}'")]
    Syntax {
        /// Line (1-based).
        line: usize,
        /// Column (1-based).
        column: usize,
        /// What the parser expected.
        expected: String,
        /// What it found instead.
        found: String,
    },

    /// Missing package clause.
    #[error("missing package clause")]
    MissingPackage,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Creates a syntax error.
    pub fn syntax(
        line: usize,
        column: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            line,
            column,
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Error type for resolving and validating a declaration.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The requested declaration does not exist.
    #[error("struct '{name}' not found")]
    DeclarationNotFound {
        /// Declaration name.
        name: String,
    },

    /// The requested declaration is not a struct type.
    #[error("'{name}' is not a struct type (underlying type is {kind})")]
    NotAStruct {
        /// Declaration name.
        name: String,
        /// Shape of the underlying type.
        kind: String,
    },

    /// Identifier that names no known type.
    #[error("undefined type '{name}'")]
    UndefinedType {
        /// Type name.
        name: String,
    },

    /// Package qualifier with no matching import.
    #[error("undefined package '{package}' in '{package}.{name}'")]
    UnknownPackage {
        /// Package qualifier.
        package: String,
        /// Qualified identifier.
        name: String,
    },

    /// Array length that is not an integer constant known to the file.
    #[error("unsupported array length '{length}'")]
    UnsupportedArrayLength {
        /// Length expression text.
        length: String,
    },

    /// Type parameters on the requested declaration.
    #[error("'{name}' declares type parameters [{params}]; generic declarations are not supported")]
    GenericDeclaration {
        /// Declaration name.
        name: String,
        /// Type parameter names, comma separated.
        params: String,
    },

    /// Circular type reference.
    #[error("circular type reference detected: {path}")]
    CircularReference {
        /// Path of the circular reference.
        path: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an undefined type error.
    pub fn undefined(name: impl Into<String>) -> Self {
        Self::UndefinedType { name: name.into() }
    }
}
