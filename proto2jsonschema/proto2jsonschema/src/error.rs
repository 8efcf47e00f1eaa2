//! Error types for descriptor conversion.

use proto2jsonschema_core::RenderError;

/// Error returned while converting a message, enum or file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// A field's type tag is absent or outside the protobuf scalar/enum/message set.
    #[error("unrecognized field type {kind:?} for field '{field}' in message '{message}'")]
    UnrecognizedFieldKind {
        field: String,
        message: String,
        kind: Option<i32>,
    },

    /// A message-typed field refers to a type that is not visible from its scope.
    #[error("no such message type named {type_name} (referenced by '{message}')")]
    UnresolvedTypeReference { type_name: String, message: String },

    /// A file was requested but its package has no registered types.
    #[error("no such package found: {package}")]
    PackageNotFound { package: String },

    /// A required field refers back to a message that is already being inlined.
    #[error("required field '{field}' in '{message}' recursively refers to {type_name}")]
    RecursiveType {
        field: String,
        message: String,
        type_name: String,
    },

    /// The finished schema tree could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Error returned when the plugin parameter string holds an unknown option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plugin parameter '{0}'")]
pub struct ParameterError(pub String);
