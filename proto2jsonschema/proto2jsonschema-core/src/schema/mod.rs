//! JSON Schema intermediate representation.

mod render;
mod types;

pub use render::{SCHEMA_VERSION, render_document};
pub use types::{EnumValue, Properties, Schema, SchemaKind};
