//! Main module for texttag library functionality

pub mod boundaries;
pub mod chunking;
pub mod config;
pub mod diagnostics;
pub mod filtering;
pub mod formats;
pub mod lexing;
pub mod markers;
pub mod pipeline;
pub mod skeleton;
pub mod substitution;
pub mod tag_info;
pub mod timing;
pub mod words;

pub use chunking::ChunkInfo;
pub use diagnostics::{Diagnostic, DiagnosticKind, ParseErrorCode};
pub use pipeline::{ParseOutput, TaggedText, TextTagParser};
pub use tag_info::{CurveType, TagDefaults, TagInfo, TagParseError};
pub use words::WordRecord;
