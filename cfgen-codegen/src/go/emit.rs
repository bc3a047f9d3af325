//! Emission of the option-pattern configuration unit.
//!
//! The generated unit consists of, in order: the banner, the package clause,
//! the import block, zero-value defaults, the `base` implementation, the
//! constructor, the capability interface and one wrapper type with accessor
//! and setter per field.

use super::fields::Field;
use super::naming::{default_name, derive_names, is_go_keyword, setter_name, wrapper_name};
use super::render::ImportSet;

/// Lines of generated source. Lines are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedUnit {
    lines: Vec<String>,
}

impl GeneratedUnit {
    /// Creates an empty unit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Appends an empty line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Returns the lines emitted so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Joins the lines into source text ending with a newline.
    #[must_use]
    pub fn into_text(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Emits the configuration unit for one declaration.
#[derive(Debug, Clone)]
pub struct Emitter<'a> {
    target: &'a str,
    package: &'a str,
    fields: &'a [Field],
    imports: &'a ImportSet,
    tool_name: &'a str,
    constructor: &'a str,
}

impl<'a> Emitter<'a> {
    /// Creates an emitter for the interface `target` in `package`.
    #[must_use]
    pub fn new(target: &'a str, package: &'a str, fields: &'a [Field], imports: &'a ImportSet) -> Self {
        Self {
            target,
            package,
            fields,
            imports,
            tool_name: "cfgen",
            constructor: "New",
        }
    }

    /// Sets the tool name written in the banner.
    #[must_use]
    pub fn tool_name(mut self, name: &'a str) -> Self {
        self.tool_name = name;
        self
    }

    /// Sets the constructor function name.
    #[must_use]
    pub fn constructor(mut self, name: &'a str) -> Self {
        self.constructor = name;
        self
    }

    /// Emits the whole unit.
    #[must_use]
    pub fn emit(&self) -> GeneratedUnit {
        let mut unit = GeneratedUnit::new();

        self.banner(&mut unit);
        self.package_clause(&mut unit);
        self.import_block(&mut unit);
        self.default_bindings(&mut unit);
        self.base_type(&mut unit);
        self.constructor_func(&mut unit);
        self.capability(&mut unit);
        for field in self.fields {
            self.field_override(field, &mut unit);
        }

        tracing::debug!(
            "emitted {} lines for {} fields of {}",
            unit.len(),
            self.fields.len(),
            self.target
        );
        unit
    }

    /// Emits the generated-code banner.
    pub fn banner(&self, unit: &mut GeneratedUnit) {
        unit.push(format!("// Code generated by {}. DO NOT EDIT.", self.tool_name));
        unit.blank();
    }

    /// Emits the package clause.
    pub fn package_clause(&self, unit: &mut GeneratedUnit) {
        unit.push(format!("package {}", self.package));
        unit.blank();
    }

    /// Emits the import block, one quoted path per line.
    pub fn import_block(&self, unit: &mut GeneratedUnit) {
        unit.push("import (");
        for ns in self.imports.iter() {
            if ns.needs_alias() {
                unit.push(format!("{} {:?}", ns.name, ns.path));
            } else {
                unit.push(format!("{:?}", ns.path));
            }
        }
        unit.push(")");
        unit.blank();
    }

    /// Emits the zero-value variable of every field.
    pub fn default_bindings(&self, unit: &mut GeneratedUnit) {
        unit.push("var (");
        for field in self.fields {
            unit.push(format!("{} {}", default_name(&field.name), field.ty));
        }
        unit.push(")");
        unit.blank();
    }

    /// Emits `base`, whose accessors return the zero values.
    pub fn base_type(&self, unit: &mut GeneratedUnit) {
        unit.push("type base struct{}");
        unit.blank();
        for field in self.fields {
            unit.push(format!(
                "func (base) {}() {} {{ return {} }}",
                field.name,
                field.ty,
                default_name(&field.name)
            ));
        }
        unit.blank();
    }

    /// Emits the constructor returning `base`.
    pub fn constructor_func(&self, unit: &mut GeneratedUnit) {
        unit.push(format!("func {}() {} {{", self.constructor, self.target));
        unit.push("return base{}");
        unit.push("}");
        unit.blank();
    }

    /// Emits the capability interface with one accessor per field.
    pub fn capability(&self, unit: &mut GeneratedUnit) {
        unit.push(format!("type {} interface {{", self.target));
        for field in self.fields {
            unit.push(format!("{}() {}", field.name, field.ty));
        }
        unit.push("}");
        unit.blank();
    }

    /// Emits the wrapper type, accessor override and setter for `field`.
    pub fn field_override(&self, field: &Field, unit: &mut GeneratedUnit) {
        let names = derive_names(&field.name);
        if is_go_keyword(&names.storage) {
            tracing::warn!(
                "storage name '{}' of field {} is a Go keyword, generated code will not compile",
                names.storage,
                field.name
            );
        }
        let wrapper = wrapper_name(&field.name);
        let target = self.target;

        unit.push(format!("type {wrapper} struct {{"));
        unit.push(target);
        unit.push(format!("{} {}", names.storage, field.ty));
        unit.push("}");
        unit.blank();

        unit.push(format!("func (cfg {wrapper}) {}() {} {{", field.name, field.ty));
        unit.push(format!("return cfg.{}", names.storage));
        unit.push("}");
        unit.blank();

        unit.push(format!(
            "func {}(cfg {target}, {} {}) {target} {{",
            setter_name(&field.name),
            names.param,
            field.ty
        ));
        unit.push(format!("return {wrapper}{{"));
        unit.push(format!("{target}: cfg,"));
        unit.push(format!("{}: {},", names.storage, names.param));
        unit.push("}");
        unit.push("}");
        unit.blank();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgen_schema::types::Namespace;

    fn short_fields() -> Vec<Field> {
        vec![
            Field::new("APIKey", "string"),
            Field::new("Headers", "map[string]string"),
            Field::new("NowFn", "func () (time.Time,)"),
        ]
    }

    fn time_imports() -> ImportSet {
        let mut imports = ImportSet::new();
        imports.insert(Namespace::from_path("time"));
        imports
    }

    fn position(lines: &[String], line: &str) -> usize {
        lines
            .iter()
            .position(|l| l == line)
            .unwrap_or_else(|| panic!("missing line {line:?}"))
    }

    #[test]
    fn test_emit_block_order() {
        let fields = short_fields();
        let imports = time_imports();
        let unit = Emitter::new("Config", "short", &fields, &imports).emit();
        let lines = unit.lines();

        assert_eq!(lines[0], "// Code generated by cfgen. DO NOT EDIT.");
        let order = [
            "package short",
            "import (",
            "\"time\"",
            "var (",
            "type base struct{}",
            "func New() Config {",
            "type Config interface {",
            "type cfgAPIKey struct {",
            "type cfgHeaders struct {",
            "type cfgNowFn struct {",
        ];
        let positions: Vec<usize> = order.iter().map(|l| position(lines, l)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_emit_field_units() {
        let fields = short_fields();
        let imports = time_imports();
        let text = Emitter::new("Config", "short", &fields, &imports).emit().into_text();

        assert!(text.contains("defaultHeaders map[string]string\n"));
        assert!(text.contains("func (base) APIKey() string { return defaultAPIKey }\n"));
        assert!(text.contains("NowFn() func () (time.Time,)\n"));
        assert!(text.contains("type cfgAPIKey struct {\nConfig\naPIKey string\n}\n"));
        assert!(text.contains("func (cfg cfgHeaders) Headers() map[string]string {\nreturn cfg.headers\n}\n"));
        assert!(text.contains(
            "func SetNowFn(cfg Config, n func () (time.Time,)) Config {\nreturn cfgNowFn{\nConfig: cfg,\nnowFn: n,\n}\n}\n"
        ));
        assert_eq!(text.matches("type cfg").count(), fields.len());
        assert_eq!(text.matches("func Set").count(), fields.len());
    }

    #[test]
    fn test_emit_keyword_storage() {
        let fields = vec![Field::new("Type", "string")];
        let imports = ImportSet::new();
        let text = Emitter::new("Config", "p", &fields, &imports).emit().into_text();

        assert!(is_go_keyword("type"));
        assert!(text.contains("type cfgType struct {\nConfig\ntype string\n}\n"));
        assert!(text.contains("func SetType(cfg Config, t string) Config {\n"));
    }

    #[test]
    fn test_emit_empty_declaration() {
        let imports = ImportSet::new();
        let unit = Emitter::new("Empty", "p", &[], &imports).emit();
        let text = unit.into_text();

        assert!(text.contains("import (\n)\n"));
        assert!(text.contains("var (\n)\n"));
        assert!(text.contains("type Empty interface {\n}\n"));
        assert!(!text.contains("type cfg"));
    }

    #[test]
    fn test_emit_aliased_import() {
        let mut imports = ImportSet::new();
        imports.insert(Namespace::new("net/http", "stdhttp"));
        imports.insert(Namespace::from_path("time"));
        let fields = vec![Field::new("Client", "*stdhttp.Client")];
        let unit = Emitter::new("Config", "p", &fields, &imports).emit();

        assert_eq!(position(unit.lines(), "stdhttp \"net/http\"") + 1, position(unit.lines(), "\"time\""));
    }

    #[test]
    fn test_emit_options() {
        let fields = vec![Field::new("port", "int")];
        let imports = ImportSet::new();
        let text = Emitter::new("Options", "server", &fields, &imports)
            .tool_name("optgen")
            .constructor("Defaults")
            .emit()
            .into_text();

        assert!(text.starts_with("// Code generated by optgen. DO NOT EDIT.\n"));
        assert!(text.contains("func Defaults() Options {\n"));
        assert!(text.contains("_port int\n"));
        assert!(text.contains("func Setport(cfg Options, p int) Options {\n"));
    }

    #[test]
    fn test_emit_deterministic() {
        let fields = short_fields();
        let imports = time_imports();
        let first = Emitter::new("Config", "short", &fields, &imports).emit();
        let second = Emitter::new("Config", "short", &fields, &imports).emit();
        assert_eq!(first, second);
    }
}
