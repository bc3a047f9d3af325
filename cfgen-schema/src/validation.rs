//! Declaration validation utilities.
//!
//! This module checks that a declaration can be turned into an option-pattern
//! configuration: it must not be generic, and every field needs a unique,
//! non-blank name so it can get its own accessor and setter.

use crate::ast::TypeSpec;
use crate::error::SchemaError;
use crate::ir::StructDecl;
use std::collections::HashSet;

/// Validates the syntax of the requested type declaration.
///
/// # Errors
/// Returns `SchemaError::GenericDeclaration` if the declaration has type
/// parameters.
pub fn validate_type_spec(spec: &TypeSpec) -> Result<(), SchemaError> {
    if !spec.type_params.is_empty() {
        return Err(SchemaError::GenericDeclaration {
            name: spec.name.clone(),
            params: spec.type_params.join(", "),
        });
    }
    Ok(())
}

/// Validates the resolved fields of a declaration.
///
/// # Errors
/// Returns `SchemaError::Validation` for blank or duplicate field names.
pub fn validate_fields(decl: &StructDecl) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for field in &decl.fields {
        if field.name.is_empty() || field.name == "_" {
            return Err(SchemaError::validation(format!(
                "blank field in struct '{}' cannot have an accessor",
                decl.name
            )));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::validation(format!(
                "duplicate field '{}' in struct '{}'",
                field.name, decl.name
            )));
        }
    }

    Ok(())
}
