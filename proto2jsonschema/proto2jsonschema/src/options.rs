use std::str::FromStr;

use crate::ParameterError;

/// Settings shared by every conversion in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Value of `additionalProperties` on every converted message.
    ///
    /// `true` (default) lets documents carry fields outside the schema;
    /// `false` makes validators reject them.
    pub allow_additional_properties: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            allow_additional_properties: true,
        }
    }
}

/// Options carried by the protoc plugin parameter string
/// (`--jsonschema_opt=a,b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PluginParameters {
    pub options: ConverterOptions,
    /// Raise log verbosity to debug.
    pub debug: bool,
}

impl FromStr for PluginParameters {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut params = PluginParameters::default();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry {
                "allow_additional_properties" => {
                    params.options.allow_additional_properties = true
                }
                "disallow_additional_properties" => {
                    params.options.allow_additional_properties = false
                }
                "debug" => params.debug = true,
                other => return Err(ParameterError(other.to_string())),
            }
        }
        Ok(params)
    }
}
