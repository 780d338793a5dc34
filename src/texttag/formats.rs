//! Output formats for parse results
//!
//! - `json`: serde_json, pretty or compact
//! - `yaml`: serde_yaml
//! - `tag`: XML-like listing, one element per chunk, tag and diagnostic

pub mod registry;
pub mod structured;
pub mod tag;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use tag::{serialize_output as serialize_tag, TagFormatter};
