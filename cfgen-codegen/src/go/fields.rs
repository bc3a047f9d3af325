//! Field extraction.

use super::render::RenderContext;
use cfgen_schema::ir::StructDecl;

/// A field ready for emission: its name and rendered type text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Rendered, package-qualified type text.
    pub ty: String,
}

impl Field {
    /// Creates a field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Renders every field of `decl` in declaration order.
#[must_use]
pub fn extract_fields(decl: &StructDecl, ctx: &mut RenderContext) -> Vec<Field> {
    decl.fields
        .iter()
        .map(|field| Field::new(field.name.clone(), ctx.render(&field.ty)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgen_schema::ir::DeclField;
    use cfgen_schema::types::{Namespace, Param, Signature, TypeRef};

    #[test]
    fn test_extract_preserves_order() {
        let time = Namespace::new("time", "time");
        let decl = StructDecl::new(
            "Config",
            Namespace::local("short"),
            vec![
                DeclField::new("Timeout", TypeRef::named(Some(time.clone()), "Duration")),
                DeclField::new("Name", TypeRef::primitive("string")),
                DeclField::new(
                    "NowFn",
                    TypeRef::Signature(Signature::new(
                        Vec::new(),
                        vec![Param::unnamed(TypeRef::named(Some(time), "Time"))],
                    )),
                ),
            ],
        );
        let mut ctx = RenderContext::new(decl.namespace.clone());
        let fields = extract_fields(&decl, &mut ctx);

        assert_eq!(
            fields,
            vec![
                Field::new("Timeout", "time.Duration"),
                Field::new("Name", "string"),
                Field::new("NowFn", "func () (time.Time,)"),
            ]
        );
        assert_eq!(ctx.imports().len(), 1);
    }

    #[test]
    fn test_extract_empty() {
        let decl = StructDecl::new("Empty", Namespace::local("p"), Vec::new());
        let mut ctx = RenderContext::new(decl.namespace.clone());
        assert!(extract_fields(&decl, &mut ctx).is_empty());
        assert!(ctx.imports().is_empty());
    }
}
