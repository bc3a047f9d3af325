//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use cfgen::prelude::*;
//! ```

// Front-end types
pub use cfgen_schema::{
    ChanDir, DeclField, Namespace, ParseError, SchemaError, SourceFile, StructDecl, TypeRef,
    parse_file, parse_source,
};

// Generation
pub use cfgen_codegen::go::{Field, ImportSet, RenderContext, UNSUPPORTED_TYPE};
pub use cfgen_codegen::{
    CodegenError, FormatError, Generator, GeneratorOptions, generate_from_file,
    generate_from_source,
};

pub use std::path::Path;
