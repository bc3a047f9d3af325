//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Source parsing error.
    #[error("source parse error: {0}")]
    Parse(#[from] cfgen_schema::ParseError),

    /// Declaration resolution error.
    #[error("schema error: {0}")]
    Schema(#[from] cfgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generated text is not well formed.
    #[error("failed to format source: {0}")]
    Format(#[from] FormatError),

    /// A field type has no textual form and strict mode is on.
    #[error("unsupported type in field '{field}': {description}")]
    UnsupportedType {
        /// Field name.
        field: String,
        /// Description of the unsupported shape.
        description: String,
    },
}

/// Error type for formatting generated source.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Text that does not lex as Go.
    #[error("{line}:{column}: invalid token")]
    Lex {
        /// Line (1-based).
        line: usize,
        /// Column (1-based).
        column: usize,
    },

    /// A closing delimiter that does not match the innermost open one.
    #[error("line {line}: found '{found}', expected {expected}")]
    Mismatched {
        /// Line (1-based).
        line: usize,
        /// Closing delimiter found.
        found: char,
        /// What would have been valid instead.
        expected: String,
    },

    /// A delimiter left open at end of input.
    #[error("line {line}: unclosed '{delimiter}'")]
    Unclosed {
        /// Opening delimiter.
        delimiter: char,
        /// Line it was opened on.
        line: usize,
    },
}
