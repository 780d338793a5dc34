//! JSON and YAML output, straight from the serde derives

use super::registry::{FormatError, Formatter};
use crate::texttag::pipeline::ParseOutput;

/// `json` format
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON document with text, tags, chunks and diagnostics"
    }

    fn serialize(&self, output: &ParseOutput) -> Result<String, FormatError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(output)
        } else {
            serde_json::to_string(output)
        };
        result.map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}

/// `yaml` format
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "YAML document with text, tags, chunks and diagnostics"
    }

    fn serialize(&self, output: &ParseOutput) -> Result<String, FormatError> {
        serde_yaml::to_string(output).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
