//! Identifier derivation for generated declarations.

/// Prefix of the package-level variables holding zero values.
pub const DEFAULT_PREFIX: &str = "default";
/// Prefix of the per-field wrapper types.
pub const WRAPPER_PREFIX: &str = "cfg";
/// Prefix of the per-field setter functions.
pub const SETTER_PREFIX: &str = "Set";

/// Go reserved words. None of them can name a struct field or a parameter.
pub const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Returns true if `name` is a Go reserved word.
#[must_use]
pub fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// Identifiers derived from one field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    /// Unexported storage field of the wrapper type.
    pub storage: String,
    /// Parameter name of the setter.
    pub param: String,
}

/// Derives the storage and parameter identifiers for `field`.
///
/// The storage name is `field` with its first character lowercased, prefixed
/// with `_` when that character already was lowercase so it cannot collide
/// with the accessor. The parameter is the lowercased first character.
#[must_use]
pub fn derive_names(field: &str) -> FieldNames {
    let mut chars = field.chars();
    let Some(first) = chars.next() else {
        return FieldNames {
            storage: "_".to_string(),
            param: "_".to_string(),
        };
    };

    let lower: String = first.to_lowercase().collect();
    let already_lower = lower.chars().eq(std::iter::once(first));

    let mut storage = String::with_capacity(field.len() + 1);
    if already_lower {
        storage.push('_');
    }
    storage.push_str(&lower);
    storage.push_str(chars.as_str());

    FieldNames {
        storage,
        param: lower,
    }
}

/// Returns the name of the zero-value variable for `field`.
#[must_use]
pub fn default_name(field: &str) -> String {
    format!("{DEFAULT_PREFIX}{field}")
}

/// Returns the name of the wrapper type for `field`.
#[must_use]
pub fn wrapper_name(field: &str) -> String {
    format!("{WRAPPER_PREFIX}{field}")
}

/// Returns the name of the setter function for `field`.
#[must_use]
pub fn setter_name(field: &str) -> String {
    format!("{SETTER_PREFIX}{field}")
}
