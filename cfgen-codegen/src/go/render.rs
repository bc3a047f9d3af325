//! Type text rendering.
//!
//! Turns a resolved [`TypeRef`] into the text used to spell it in generated
//! source, collecting the packages the text refers to along the way.

use cfgen_schema::types::{ChanDir, InterfaceType, Namespace, Param, Signature, StructField, TypeRef};
use std::collections::BTreeMap;

/// Text emitted for type shapes that cannot be spelled.
pub const UNSUPPORTED_TYPE: &str = "nil";

/// Packages referenced by rendered types, keyed and ordered by import path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    by_path: BTreeMap<String, Namespace>,
}

impl ImportSet {
    /// Creates an empty import set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a namespace. Returns false if its path was already present.
    pub fn insert(&mut self, namespace: Namespace) -> bool {
        if self.by_path.contains_key(&namespace.path) {
            return false;
        }
        self.by_path.insert(namespace.path.clone(), namespace);
        true
    }

    /// Returns true if `path` has been recorded.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// Iterates namespaces in import path order.
    pub fn iter(&self) -> impl Iterator<Item = &Namespace> {
        self.by_path.values()
    }

    /// Returns the number of imports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Returns true if no import was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

/// Per-run rendering state.
///
/// Holds the namespace code is generated into, the imports discovered so far
/// and every fallback the renderer had to take.
#[derive(Debug)]
pub struct RenderContext {
    target: Namespace,
    imports: ImportSet,
    fallbacks: Vec<String>,
}

impl RenderContext {
    /// Creates a context generating into `target`.
    #[must_use]
    pub fn new(target: Namespace) -> Self {
        Self {
            target,
            imports: ImportSet::new(),
            fallbacks: Vec::new(),
        }
    }

    /// Returns the imports collected so far.
    #[must_use]
    pub fn imports(&self) -> &ImportSet {
        &self.imports
    }

    /// Consumes the context, returning the collected imports.
    #[must_use]
    pub fn into_imports(self) -> ImportSet {
        self.imports
    }

    /// Returns descriptions of the shapes rendered as [`UNSUPPORTED_TYPE`].
    #[must_use]
    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    /// Renders `ty` as source text.
    pub fn render(&mut self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(name) => name.clone(),
            TypeRef::Named(named) => match &named.namespace {
                Some(ns) if *ns != self.target => {
                    let text = format!("{}.{}", ns.name, named.name);
                    self.imports.insert(ns.clone());
                    text
                }
                _ => named.name.clone(),
            },
            TypeRef::Array { len, elem } => format!("[{len}]{}", self.render(elem)),
            TypeRef::Pointer(elem) => format!("*{}", self.render(elem)),
            TypeRef::Struct(fields) => self.render_struct(fields),
            TypeRef::Signature(sig) => format!("func {}", self.render_signature(sig)),
            TypeRef::Slice(elem) => format!("[]{}", self.render(elem)),
            TypeRef::Map { key, value } => {
                format!("map[{}]{}", self.render(key), self.render(value))
            }
            TypeRef::Interface(iface) => self.render_interface(iface),
            TypeRef::Chan { dir, elem } => self.render_chan(*dir, elem),
            TypeRef::Unsupported(description) => {
                tracing::warn!("cannot render {description}, using '{UNSUPPORTED_TYPE}'");
                self.fallbacks.push(description.clone());
                UNSUPPORTED_TYPE.to_string()
            }
        }
    }

    fn render_struct(&mut self, fields: &[StructField]) -> String {
        let mut out = String::from("struct{");
        for field in fields {
            let ty = self.render(&field.ty);
            // Embedded fields are rendered bare rather than as `Name T;`, which
            // keeps promoted members and the struct's type identity intact.
            if field.embedded {
                out.push_str(&format!("{ty};"));
            } else {
                out.push_str(&format!("{} {ty};", field.name));
            }
        }
        out.push('}');
        out
    }

    /// Renders a signature without the `func` keyword: `(params) (results)`.
    fn render_signature(&mut self, sig: &Signature) -> String {
        let params = self.render_tuple(&sig.params, sig.variadic);
        let results = self.render_tuple(&sig.results, false);
        format!("{params} {results}")
    }

    fn render_tuple(&mut self, entries: &[Param], variadic: bool) -> String {
        let mut out = String::from("(");
        for (i, param) in entries.iter().enumerate() {
            let ty = match &param.ty {
                TypeRef::Slice(elem) if variadic && i + 1 == entries.len() => {
                    format!("...{}", self.render(elem))
                }
                ty => self.render(ty),
            };
            if param.name.is_empty() {
                out.push_str(&format!("{ty},"));
            } else {
                out.push_str(&format!("{} {ty},", param.name));
            }
        }
        out.push(')');
        out
    }

    fn render_interface(&mut self, iface: &InterfaceType) -> String {
        let mut out = String::from("interface{");
        for embed in &iface.embeds {
            let ty = self.render(embed);
            out.push_str(&format!("{ty};"));
        }
        for method in &iface.methods {
            let sig = self.render_signature(&method.signature);
            out.push_str(&format!("{} {sig};", method.name));
        }
        out.push('}');
        out
    }

    fn render_chan(&mut self, dir: ChanDir, elem: &TypeRef) -> String {
        let elem_text = self.render(elem);
        let elem_text = match elem {
            TypeRef::Chan {
                dir: ChanDir::Recv,
                ..
            } if dir != ChanDir::Recv => format!("({elem_text})"),
            _ => elem_text,
        };
        match dir {
            ChanDir::Both => format!("chan {elem_text}"),
            ChanDir::Send => format!("chan<- {elem_text}"),
            ChanDir::Recv => format!("<-chan {elem_text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgen_schema::types::Method;

    fn time_ns() -> Namespace {
        Namespace::new("time", "time")
    }

    fn context() -> RenderContext {
        RenderContext::new(Namespace::local("short"))
    }

    fn string() -> TypeRef {
        TypeRef::primitive("string")
    }

    #[test]
    fn test_render_primitive_and_map() {
        let mut ctx = context();
        assert_eq!(ctx.render(&TypeRef::primitive("int")), "int");
        assert_eq!(ctx.render(&TypeRef::map(string(), string())), "map[string]string");
        assert!(ctx.imports().is_empty());
    }

    #[test]
    fn test_render_signature_with_unnamed_result() {
        let mut ctx = context();
        let now_fn = TypeRef::Signature(Signature::new(
            Vec::new(),
            vec![Param::unnamed(TypeRef::named(Some(time_ns()), "Time"))],
        ));
        assert_eq!(ctx.render(&now_fn), "func () (time.Time,)");
        assert!(ctx.imports().contains("time"));
    }

    #[test]
    fn test_render_named_params_and_variadic() {
        let mut ctx = context();
        let sig = Signature {
            params: vec![
                Param::new("format", string()),
                Param::new("args", TypeRef::slice(TypeRef::empty_interface())),
            ],
            results: vec![Param::new("n", TypeRef::primitive("int")), Param::new("err", TypeRef::named(None, "error"))],
            variadic: true,
        };
        assert_eq!(
            ctx.render(&TypeRef::Signature(sig)),
            "func (format string,args ...interface{},) (n int,err error,)"
        );
    }

    #[test]
    fn test_imports_deduplicated() {
        let mut ctx = context();
        let time = TypeRef::named(Some(time_ns()), "Time");
        let duration = TypeRef::named(Some(time_ns()), "Duration");
        ctx.render(&time);
        ctx.render(&TypeRef::pointer(duration));
        ctx.render(&TypeRef::slice(time));
        assert_eq!(ctx.imports().len(), 1);
    }

    #[test]
    fn test_local_and_universe_names_are_bare() {
        let mut ctx = context();
        let local = TypeRef::named(Some(Namespace::local("short")), "Level");
        assert_eq!(ctx.render(&local), "Level");
        assert_eq!(ctx.render(&TypeRef::named(None, "error")), "error");
        assert!(ctx.imports().is_empty());
    }

    #[test]
    fn test_render_composites() {
        let mut ctx = context();
        assert_eq!(ctx.render(&TypeRef::array(4, TypeRef::primitive("byte"))), "[4]byte");
        assert_eq!(ctx.render(&TypeRef::pointer(string())), "*string");
        assert_eq!(ctx.render(&TypeRef::slice(string())), "[]string");

        let strct = TypeRef::Struct(vec![
            StructField::embedded("Mutex", TypeRef::named(Some(Namespace::new("sync", "sync")), "Mutex")),
            StructField::new("N", TypeRef::primitive("int")),
        ]);
        assert_eq!(ctx.render(&strct), "struct{sync.Mutex;N int;}");
    }

    #[test]
    fn test_render_embedded_pointer() {
        let mut ctx = context();
        let strct = TypeRef::Struct(vec![StructField::embedded(
            "Buffer",
            TypeRef::pointer(TypeRef::named(Some(Namespace::new("bytes", "bytes")), "Buffer")),
        )]);
        assert_eq!(ctx.render(&strct), "struct{*bytes.Buffer;}");
        assert!(!ctx.render(&strct).contains("Buffer *"));
    }

    #[test]
    fn test_render_interface() {
        let mut ctx = context();
        let iface = TypeRef::Interface(InterfaceType {
            embeds: vec![TypeRef::named(Some(Namespace::new("io", "io")), "Reader")],
            methods: vec![Method {
                name: "Close".to_string(),
                signature: Signature::new(Vec::new(), vec![Param::unnamed(TypeRef::named(None, "error"))]),
            }],
        });
        assert_eq!(ctx.render(&iface), "interface{io.Reader;Close () (error,);}");
        assert_eq!(ctx.render(&TypeRef::empty_interface()), "interface{}");
    }

    #[test]
    fn test_render_channels() {
        let mut ctx = context();
        let int = TypeRef::primitive("int");
        assert_eq!(ctx.render(&TypeRef::chan(ChanDir::Both, int.clone())), "chan int");
        assert_eq!(ctx.render(&TypeRef::chan(ChanDir::Send, int.clone())), "chan<- int");
        assert_eq!(ctx.render(&TypeRef::chan(ChanDir::Recv, int.clone())), "<-chan int");

        let nested = TypeRef::chan(ChanDir::Both, TypeRef::chan(ChanDir::Recv, int.clone()));
        assert_eq!(ctx.render(&nested), "chan (<-chan int)");
        let nested = TypeRef::chan(ChanDir::Recv, TypeRef::chan(ChanDir::Recv, int));
        assert_eq!(ctx.render(&nested), "<-chan <-chan int");
    }

    #[test]
    fn test_unsupported_placeholder() {
        let mut ctx = context();
        let ty = TypeRef::slice(TypeRef::Unsupported("type set union".to_string()));
        assert_eq!(ctx.render(&ty), "[]nil");
        assert_eq!(ctx.fallbacks(), ["type set union".to_string()]);
    }

    #[test]
    fn test_import_set_order() {
        let mut set = ImportSet::new();
        assert!(set.insert(Namespace::from_path("time")));
        assert!(set.insert(Namespace::from_path("net/http")));
        assert!(!set.insert(Namespace::from_path("time")));
        let paths: Vec<&str> = set.iter().map(|ns| ns.path.as_str()).collect();
        assert_eq!(paths, ["net/http", "time"]);
    }
}
