//! Configuration loading
//!
//! `defaults/texttag.default.toml` is embedded into the crate so that the documented defaults
//! and the runtime behavior stay in sync. Callers layer their own files on top of it via
//! [`Loader`] before deserializing into [`TexttagConfig`].

use crate::texttag::tag_info::TagDefaults;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/texttag.default.toml");

/// Errors from building a configuration
pub type ConfigLoadError = ConfigError;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TexttagConfig {
    pub tags: TagDefaults,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// How parse results are printed
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputConfig {
    /// Name of a registered format
    pub format: String,
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
}

/// Builds a [TexttagConfig] from the embedded defaults, an optional user file and command-line
/// overrides, in that order of precedence.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file over the defaults. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one key, e.g. `output.format` from `--format`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigLoadError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<TexttagConfig, ConfigLoadError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TexttagConfig, ConfigLoadError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.output.format, "json");
        assert!(config.output.pretty);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn embedded_tag_defaults_match_code_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.tags, TagDefaults::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .set_override("tags.ease_in", 0.5)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "yaml");
        assert_eq!(config.tags.ease_in, 0.5);
    }

    #[test]
    fn layers_user_file_under_overrides() {
        let path = std::env::temp_dir().join(format!("texttag-{}.toml", std::process::id()));
        std::fs::write(&path, "[tags]\nv2 = 0.75\n\n[output]\nformat = \"tag\"\n").unwrap();

        let config = Loader::new()
            .with_file(&path)
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .build();
        std::fs::remove_file(&path).ok();

        let config = config.expect("config to build");
        assert_eq!(config.tags.v2, 0.75);
        assert_eq!(config.tags.v3, 1.0);
        assert_eq!(config.output.format, "yaml");
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/texttag.toml").build();
        assert!(result.is_err());
    }
}
