//! Protobuf descriptor to JSON Schema conversion for `proto2jsonschema`.
//!
//! The entry point is [`convert_request`], which takes a protoc
//! `CodeGeneratorRequest`, registers every message it carries in a
//! [`NamespaceTree`] and converts the requested files into one
//! self-contained document per top-level type.  The lower-level
//! [`convert_message_type`] and [`convert_enum_type`] are re-exported for
//! direct use.

mod batch;
mod error;
mod namespace;
mod options;
mod schema;

pub use batch::{BatchOutput, GeneratedFile, convert_file, convert_files, convert_request};
pub use error::{ConvertError, ParameterError};
pub use namespace::{NamespaceTree, PackageId};
pub use options::{ConverterOptions, PluginParameters};
pub use proto2jsonschema_core as core;
pub use schema::{convert_enum_type, convert_message_type};
