//! Named output formats
//!
//! The CLI looks formats up by the name given on the command line (or `output.format` in the
//! configuration). [FormatRegistry::for_output] builds the set matching an [OutputConfig].

use crate::texttag::config::OutputConfig;
use crate::texttag::pipeline::ParseOutput;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter registered under this name
    FormatNotFound(String),
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Unknown output format '{name}'"),
            FormatError::SerializationError(msg) => write!(f, "Cannot write parse output: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Turns a [ParseOutput] into text
pub trait Formatter: Send + Sync {
    /// Name used to select the format
    fn name(&self) -> &str;

    fn serialize(&self, output: &ParseOutput) -> Result<String, FormatError>;

    /// One line for `list-formats`
    fn description(&self) -> &str {
        ""
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Add `formatter`; a formatter with the same name is replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn serialize(&self, output: &ParseOutput, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(output)
    }

    /// Registered names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// `json` (pretty), `yaml` and `tag`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::JsonFormatter::pretty());
        registry.register(super::YamlFormatter);
        registry.register(super::TagFormatter);

        registry
    }

    /// The default formats, with `json` made compact when `output.pretty` is off.
    pub fn for_output(output: &OutputConfig) -> Self {
        let mut registry = Self::with_defaults();
        if !output.pretty {
            registry.register(super::JsonFormatter::compact());
        }
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
