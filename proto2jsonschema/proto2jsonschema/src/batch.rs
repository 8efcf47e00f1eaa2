//! Batch orchestration: register every supplied type, then convert the
//! requested files into named documents.

use std::{collections::HashSet, path::Path};

use prost_types::{
    FileDescriptorProto,
    compiler::{CodeGeneratorRequest, CodeGeneratorResponse, code_generator_response},
};
use proto2jsonschema_core::render_document;
use tracing::{debug, error, info, warn};

use crate::{ConvertError, ConverterOptions, NamespaceTree, convert_enum_type, convert_message_type};

/// One generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// `<TypeName>.jsonschema`
    pub name: String,
    pub content: String,
}

/// Result of a batch run. Documents produced before a failure are kept next
/// to the error describing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchOutput {
    pub files: Vec<GeneratedFile>,
    pub error: Option<String>,
}

impl BatchOutput {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Build the registry from every file in `proto_files`, then convert the
/// files named in `files_to_generate` in the order they appear in
/// `proto_files`.
///
/// Conversion stops at the first failing file; its partial output is
/// dropped, earlier files' documents are returned.
pub fn convert_files(
    proto_files: &[FileDescriptorProto],
    files_to_generate: &[String],
    options: &ConverterOptions,
) -> BatchOutput {
    let targets: HashSet<&str> = files_to_generate.iter().map(String::as_str).collect();

    let mut tree = NamespaceTree::new();
    for file in proto_files {
        for message in &file.message_type {
            tree.register(file.package.as_deref(), message);
        }
    }

    let mut output = BatchOutput::default();
    for file in proto_files.iter().filter(|f| targets.contains(f.name())) {
        debug!(file = file.name(), "converting file");
        match convert_file(&tree, file, options) {
            Ok(files) => output.files.extend(files),
            Err(e) => {
                error!(file = file.name(), "failed to convert file: {e}");
                output.error = Some(format!("Failed to convert {}: {e}", file.name()));
                break;
            }
        }
    }
    output
}

/// Convert a protoc plugin request into its response.
pub fn convert_request(
    request: &CodeGeneratorRequest,
    options: &ConverterOptions,
) -> CodeGeneratorResponse {
    let output = convert_files(&request.proto_file, &request.file_to_generate, options);
    CodeGeneratorResponse {
        error: output.error,
        supported_features: Some(code_generator_response::Feature::Proto3Optional as u64),
        file: output
            .files
            .into_iter()
            .map(|f| code_generator_response::File {
                name: Some(f.name),
                content: Some(f.content),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// Convert the top-level types of one file.
///
/// A file without messages yields one document per top-level enum;
/// otherwise one document per top-level message, and its enums are only
/// reachable through fields.
pub fn convert_file<'a>(
    tree: &NamespaceTree<'a>,
    file: &'a FileDescriptorProto,
    options: &ConverterOptions,
) -> Result<Vec<GeneratedFile>, ConvertError> {
    let proto_file_name = Path::new(file.name())
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if file.message_type.len() > 1 {
        warn!(
            count = file.message_type.len(),
            file = %proto_file_name,
            "creating multiple message schemas from one proto file"
        );
    }
    if file.enum_type.len() > 1 {
        warn!(
            count = file.enum_type.len(),
            file = %proto_file_name,
            "creating multiple enum schemas from one proto file"
        );
    }

    if file.message_type.is_empty() {
        return file
            .enum_type
            .iter()
            .map(|enum_desc| -> Result<GeneratedFile, ConvertError> {
                let name = document_name(enum_desc.name());
                info!(file = %proto_file_name, output = %name, "generating schema for standalone enum");
                let content = render_document(&convert_enum_type(enum_desc))?;
                Ok(GeneratedFile { name, content })
            })
            .collect();
    }

    let package = tree
        .lookup_package(file.package())
        .ok_or_else(|| ConvertError::PackageNotFound {
            package: file.package().to_string(),
        })?;
    file.message_type
        .iter()
        .map(|message| -> Result<GeneratedFile, ConvertError> {
            let name = document_name(message.name());
            info!(file = %proto_file_name, output = %name, "generating schema for message");
            let schema = convert_message_type(tree, package, message, options)?;
            let content = render_document(&schema)?;
            Ok(GeneratedFile { name, content })
        })
        .collect()
}

fn document_name(type_name: &str) -> String {
    format!("{type_name}.jsonschema")
}
