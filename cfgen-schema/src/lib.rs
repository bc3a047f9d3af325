//! # cfgen Schema
//!
//! Go source front-end and type model for the cfgen generator.
//!
//! This crate provides:
//! - Go source tokenizing and parsing of type declarations
//! - The resolved [`TypeRef`] model for field types
//! - Resolution of a struct declaration into fields ready for code generation
//! - Declaration validation

pub mod ast;
mod constexpr;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod validation;

pub use ast::SourceFile;
pub use error::{ParseError, SchemaError};
pub use ir::{DeclField, Resolver, StructDecl};
pub use parser::{parse_file, parse_source};
pub use types::{
    ChanDir, InterfaceType, Method, NamedType, Namespace, Param, Signature, StructField, TypeRef,
};
pub use validation::{validate_fields, validate_type_spec};
