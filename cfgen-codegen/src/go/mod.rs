//! Go code generation modules.

pub mod emit;
pub mod fields;
pub mod format;
pub mod naming;
pub mod render;

pub use emit::{Emitter, GeneratedUnit};
pub use fields::{Field, extract_fields};
pub use format::format_source;
pub use naming::{FieldNames, derive_names};
pub use render::{ImportSet, RenderContext, UNSUPPORTED_TYPE};
