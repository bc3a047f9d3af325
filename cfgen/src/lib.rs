//! # cfgen
//!
//! Generates immutable option-pattern configuration objects from Go struct
//! declarations.
//!
//! Given a struct such as
//!
//! ```text
//! type Config struct {
//!     APIKey  string
//!     Headers map[string]string
//! }
//! ```
//!
//! cfgen emits a `Config` interface with one accessor per field, a zero-value
//! `base` implementation returned by `New()`, and per field a `SetX` function
//! that returns a new value with that field overridden. Existing values are
//! never modified.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cfgen::prelude::*;
//!
//! let code = generate_from_file(Path::new("config.go"), "Config", &GeneratorOptions::default())?;
//! print!("{code}");
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Go source parsing, type model and declaration resolution
//! - [`codegen`] - Type rendering, emission and formatting

pub mod cli;
pub mod prelude;

/// Go source parsing, type model and declaration resolution.
pub mod schema {
    pub use cfgen_schema::*;
}

/// Option-pattern code generation.
pub mod codegen {
    pub use cfgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use cfgen_codegen::{
    CodegenError, Generator, GeneratorOptions, generate_from_file, generate_from_source,
};
pub use cfgen_schema::{StructDecl, TypeRef, parse_source};
