//! The whole parse, stage by stage
//!
//!     [TextTagParser::parse_text] runs the stages that only need the authored text:
//!
//!         source -> chunks -> punctuation filter -> tag markers
//!
//!     and keeps every intermediate string in a [TaggedText]. [TaggedText::align] then runs the
//!     word stages against a word list:
//!
//!         tag markers -> word markers -> skeleton -> tag boundaries
//!
//!     Aligning does not change the [TaggedText], so the same text can be aligned against
//!     several word lists. [TextTagParser::parse] does both in one go.
//!
//!     No stage fails. Problems end up in the diagnostics of the result, next to everything that
//!     could be parsed.

use crate::texttag::boundaries::resolve_boundaries;
use crate::texttag::chunking::{extract_chunks, ChunkInfo};
use crate::texttag::diagnostics::{Diagnostic, Diagnostics, ParseErrorCode};
use crate::texttag::filtering::filter_punctuation;
use crate::texttag::skeleton::strip_extraneous;
use crate::texttag::substitution::{substitute_tags, substitute_words};
use crate::texttag::tag_info::{TagDefaults, TagInfo};
use serde::{Deserialize, Serialize};

/// Parses annotated dialogue text
#[derive(Debug, Clone, Default)]
pub struct TextTagParser {
    defaults: TagDefaults,
}

impl TextTagParser {
    /// Parser using the built-in tag defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser whose tags start from `defaults` before their parameters are applied
    pub fn with_defaults(defaults: TagDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &TagDefaults {
        &self.defaults
    }

    /// Run the text-only stages
    pub fn parse_text(&self, source: &str) -> TaggedText {
        let chunking = extract_chunks(source);
        let filtered_text = filter_punctuation(&chunking.text);
        let substitution = substitute_tags(&filtered_text, &self.defaults);
        let stripped_text = substitution.stripped_text();

        tracing::debug!(
            chunks = chunking.chunks.len(),
            tags = substitution.tags.len(),
            code = %substitution.diagnostics.code(),
            "parsed tagged text"
        );

        TaggedText {
            source: source.to_string(),
            chunks: chunking.chunks,
            chunk_free_text: chunking.text,
            filtered_text,
            tag_marker_text: substitution.text,
            stripped_text,
            tags: substitution.tags,
            diagnostics: substitution.diagnostics,
        }
    }

    /// Parse `source` and align its tags to `words`
    pub fn parse<W: AsRef<str>>(&self, source: &str, words: &[W]) -> ParseOutput {
        self.parse_text(source).align(words)
    }
}

/// Text after the text-only stages, ready to be aligned
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedText {
    source: String,
    chunks: Vec<ChunkInfo>,
    chunk_free_text: String,
    filtered_text: String,
    tag_marker_text: String,
    stripped_text: String,
    tags: Vec<TagInfo>,
    diagnostics: Diagnostics,
}

impl TaggedText {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn chunks(&self) -> &[ChunkInfo] {
        &self.chunks
    }

    /// The source without chunk markers
    pub fn chunk_free_text(&self) -> &str {
        &self.chunk_free_text
    }

    /// Punctuation-free text with the tags still in it
    pub fn filtered_text(&self) -> &str {
        &self.filtered_text
    }

    /// Filtered text with tags replaced by markers
    pub fn tag_marker_text(&self) -> &str {
        &self.tag_marker_text
    }

    /// Display text: no tags, no chunk markers, no punctuation
    pub fn stripped_text(&self) -> &str {
        &self.stripped_text
    }

    /// Opening tags, not aligned yet
    pub fn tags(&self) -> &[TagInfo] {
        &self.tags
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn error(&self) -> ParseErrorCode {
        self.diagnostics.code()
    }

    /// Align the tags to `words`
    pub fn align<W: AsRef<str>>(&self, words: &[W]) -> ParseOutput {
        let substitution = substitute_words(&self.tag_marker_text, words);
        let skeleton = strip_extraneous(&substitution.text);

        let mut tags = self.tags.clone();
        resolve_boundaries(&mut tags, &skeleton);

        let mut diagnostics = self.diagnostics.clone();
        diagnostics.extend(substitution.diagnostics);

        ParseOutput {
            stripped_text: self.stripped_text.clone(),
            filtered_text: self.filtered_text.clone(),
            tags,
            chunks: self.chunks.clone(),
            error: diagnostics.code(),
            diagnostics: diagnostics.into_entries(),
        }
    }
}

/// Everything a parse produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutput {
    pub stripped_text: String,
    pub filtered_text: String,
    /// Opening tags with their word boundaries
    pub tags: Vec<TagInfo>,
    pub chunks: Vec<ChunkInfo>,
    pub error: ParseErrorCode,
    pub diagnostics: Vec<Diagnostic>,
}
