//! Request/response handling for the protoc plugin protocol.

use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use proto2jsonschema::{ConverterOptions, ParameterError, PluginParameters, convert_request};
use tracing::debug;

/// Failure to interpret the request before any conversion starts.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Failed to read input: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Invalid plugin parameter: {0}")]
    Parameter(#[from] ParameterError),
}

/// A decoded request together with the options from its parameter string.
#[derive(Debug)]
pub struct Invocation {
    pub request: CodeGeneratorRequest,
    pub parameters: PluginParameters,
}

impl Invocation {
    /// Decode a complete serialized `CodeGeneratorRequest`.
    pub fn decode(input: &[u8]) -> Result<Self, PluginError> {
        let request = CodeGeneratorRequest::decode(input)?;
        let parameters = request.parameter().parse()?;
        Ok(Self {
            request,
            parameters,
        })
    }

    /// Run the conversion. Command line overrides win over the parameter
    /// string.
    pub fn respond(&self, overrides: &Overrides) -> CodeGeneratorResponse {
        let options = overrides.apply(self.parameters.options);
        debug!(
            files = self.request.proto_file.len(),
            targets = self.request.file_to_generate.len(),
            ?options,
            "converting code generator request"
        );
        convert_request(&self.request, &options)
    }
}

/// Options given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub disallow_additional_properties: bool,
}

impl Overrides {
    fn apply(&self, mut options: ConverterOptions) -> ConverterOptions {
        if self.disallow_additional_properties {
            options.allow_additional_properties = false;
        }
        options
    }
}

/// Response that reports `err` to protoc without any generated files.
pub fn error_response(err: &PluginError) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(err.to_string()),
        ..Default::default()
    }
}
