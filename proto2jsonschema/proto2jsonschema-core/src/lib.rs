//! Protobuf-independent JSON Schema types for `proto2jsonschema`.
//!
//! This crate provides the [`Schema`] tree produced by the converters and
//! the rendering of a finished tree into a self-contained document.

mod error;
mod schema;

pub use error::RenderError;
pub use schema::{
    EnumValue, Properties, SCHEMA_VERSION, Schema, SchemaKind, render_document,
};
