//! # cfgen Codegen
//!
//! Immutable option-pattern code generation from Go struct declarations.
//!
//! This crate provides:
//! - Rendering of resolved types as Go source text
//! - Field extraction and identifier derivation
//! - Emission of the configuration interface, defaults, wrappers and setters
//! - Formatting of the generated unit

pub mod error;
pub mod generator;
pub mod go;

pub use error::{CodegenError, FormatError};
pub use generator::{Generator, GeneratorOptions};

/// Generates an option-pattern unit for struct `type_name` in Go source text.
///
/// # Arguments
/// * `src` - Go source content
/// * `type_name` - Name of the struct declaration
/// * `options` - Output options
///
/// # Returns
/// Generated Go code as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, resolution, generation or formatting
/// fails.
pub fn generate_from_source(
    src: &str,
    type_name: &str,
    options: &GeneratorOptions,
) -> Result<String, CodegenError> {
    let file = cfgen_schema::parse_source(src)?;
    let decl = cfgen_schema::StructDecl::resolve(&file, type_name)?;
    Generator::new(&decl)
        .with_options(options.clone())
        .generate_formatted()
}

/// Generates an option-pattern unit for struct `type_name` in a Go file.
///
/// # Arguments
/// * `path` - Path to the Go source file
/// * `type_name` - Name of the struct declaration
/// * `options` - Output options
///
/// # Returns
/// Generated Go code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, resolution, generation or
/// formatting fails.
pub fn generate_from_file(
    path: &std::path::Path,
    type_name: &str,
    options: &GeneratorOptions,
) -> Result<String, CodegenError> {
    let src = std::fs::read_to_string(path)?;
    generate_from_source(&src, type_name, options)
}
