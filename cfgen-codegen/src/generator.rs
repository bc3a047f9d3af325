//! Main code generator.

use crate::error::CodegenError;
use crate::go::{Emitter, RenderContext, extract_fields, format_source};
use cfgen_schema::ir::StructDecl;

/// Options controlling generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Tool name written in the banner.
    pub tool_name: String,
    /// Package clause override; the declaration's package when `None`.
    pub package: Option<String>,
    /// Constructor function name.
    pub constructor: String,
    /// Fail on unsupported types instead of emitting a placeholder.
    pub strict: bool,
    /// Run the formatter over the output.
    pub format: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            tool_name: "cfgen".to_string(),
            package: None,
            constructor: "New".to_string(),
            strict: false,
            format: true,
        }
    }
}

impl GeneratorOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the banner tool name.
    #[must_use]
    pub fn tool_name(mut self, name: impl Into<String>) -> Self {
        self.tool_name = name.into();
        self
    }

    /// Overrides the emitted package name.
    #[must_use]
    pub fn package(mut self, name: impl Into<String>) -> Self {
        self.package = Some(name.into());
        self
    }

    /// Sets the constructor function name.
    #[must_use]
    pub fn constructor(mut self, name: impl Into<String>) -> Self {
        self.constructor = name.into();
        self
    }

    /// Enables or disables strict mode.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enables or disables formatting.
    #[must_use]
    pub fn format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }
}

/// Code generator for option-pattern configuration units.
pub struct Generator<'a> {
    decl: &'a StructDecl,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default options.
    #[must_use]
    pub fn new(decl: &'a StructDecl) -> Self {
        Self {
            decl,
            options: GeneratorOptions::default(),
        }
    }

    /// Replaces the generator options.
    #[must_use]
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the options in use.
    #[must_use]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generates the unformatted source text.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedType` in strict mode if a field type
    /// cannot be spelled.
    pub fn generate(&self) -> Result<String, CodegenError> {
        if self.options.strict {
            if let Some(field) = self.decl.fields.iter().find(|f| f.ty.contains_unsupported()) {
                let mut probe = RenderContext::new(self.decl.namespace.clone());
                probe.render(&field.ty);
                return Err(CodegenError::UnsupportedType {
                    field: field.name.clone(),
                    description: probe.fallbacks().join(", "),
                });
            }
        }

        let mut ctx = RenderContext::new(self.decl.namespace.clone());
        let fields = extract_fields(self.decl, &mut ctx);
        if !ctx.fallbacks().is_empty() {
            tracing::warn!(
                "{} type(s) in {} rendered as placeholders",
                ctx.fallbacks().len(),
                self.decl.name
            );
        }
        let imports = ctx.into_imports();
        tracing::debug!("{} fields, {} imports", fields.len(), imports.len());

        let package = self
            .options
            .package
            .as_deref()
            .unwrap_or(&self.decl.namespace.name);
        let unit = Emitter::new(&self.decl.name, package, &fields, &imports)
            .tool_name(&self.options.tool_name)
            .constructor(&self.options.constructor)
            .emit();

        Ok(unit.into_text())
    }

    /// Generates source text and formats it when the options ask for it.
    ///
    /// # Errors
    /// Returns `CodegenError` if generation or formatting fails.
    pub fn generate_formatted(&self) -> Result<String, CodegenError> {
        let text = self.generate()?;
        if !self.options.format {
            return Ok(text);
        }
        Ok(format_source(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgen_schema::ir::DeclField;
    use cfgen_schema::types::{Namespace, TypeRef};

    fn decl() -> StructDecl {
        StructDecl::new(
            "Config",
            Namespace::local("short"),
            vec![
                DeclField::new("Name", TypeRef::primitive("string")),
                DeclField::new(
                    "Timeout",
                    TypeRef::named(Some(Namespace::from_path("time")), "Duration"),
                ),
            ],
        )
    }

    #[test]
    fn test_generator_defaults() {
        let decl = decl();
        let generator = Generator::new(&decl);
        assert_eq!(generator.options(), &GeneratorOptions::default());

        let text = generator.generate().expect("Failed to generate");
        assert!(text.starts_with("// Code generated by cfgen. DO NOT EDIT.\n"));
        assert!(text.contains("package short\n"));
        assert!(text.contains("\"time\"\n"));
        assert!(text.contains("defaultTimeout time.Duration\n"));
    }

    #[test]
    fn test_generator_options() {
        let decl = decl();
        let options = GeneratorOptions::new()
            .tool_name("optgen")
            .package("generated")
            .constructor("Default");
        let text = Generator::new(&decl)
            .with_options(options)
            .generate_formatted()
            .expect("Failed to generate");

        assert!(text.starts_with("// Code generated by optgen. DO NOT EDIT.\n"));
        assert!(text.contains("package generated\n"));
        assert!(text.contains("func Default() Config {\n\treturn base{}\n}\n"));
    }

    #[test]
    fn test_formatting_toggle() {
        let decl = decl();
        let raw = Generator::new(&decl)
            .with_options(GeneratorOptions::new().format(false))
            .generate_formatted()
            .expect("Failed to generate");
        assert!(raw.contains("\nreturn base{}\n"));

        let formatted = Generator::new(&decl)
            .generate_formatted()
            .expect("Failed to generate");
        assert!(formatted.contains("\n\treturn base{}\n"));
    }

    #[test]
    fn test_placeholder_and_strict() {
        let decl = StructDecl::new(
            "Config",
            Namespace::local("p"),
            vec![DeclField::new(
                "Set",
                TypeRef::Unsupported("type set union".to_string()),
            )],
        );

        let text = Generator::new(&decl).generate().expect("Failed to generate");
        assert!(text.contains("defaultSet nil\n"));

        let err = Generator::new(&decl)
            .with_options(GeneratorOptions::new().strict(true))
            .generate()
            .expect_err("strict mode should fail");
        assert!(matches!(
            err,
            CodegenError::UnsupportedType { ref field, ref description }
                if field == "Set" && description == "type set union"
        ));
    }
}
