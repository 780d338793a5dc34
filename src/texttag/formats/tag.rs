//! XML-like tag serialization
//!
//! ```text
//! <parse-output error="none">
//!   <stripped-text>Hi there</stripped-text>
//!   <chunk start="0" end="">[happy]Hi there[/happy]</chunk>
//!   <tag name="happy" type="quad" start-word="0" end-word="1"/>
//!   <diagnostic kind="unmatched-word">...</diagnostic>
//! </parse-output>
//! ```
//!
//! Only the fields a reader checks at a glance are listed; use `json` for everything.

use super::registry::{FormatError, Formatter};
use crate::texttag::diagnostics::DiagnosticKind;
use crate::texttag::pipeline::ParseOutput;
use crate::texttag::tag_info::CurveType;

/// Serialize a parse result to the tag format
pub fn serialize_output(output: &ParseOutput) -> String {
    let mut result = String::new();
    result.push_str(&format!(
        "<parse-output error=\"{}\">\n",
        escape_xml(&output.error.to_string())
    ));

    result.push_str(&format!(
        "  <stripped-text>{}</stripped-text>\n",
        escape_xml(&output.stripped_text)
    ));

    for chunk in &output.chunks {
        let end = chunk.end_time.map(|t| t.to_string()).unwrap_or_default();
        result.push_str(&format!(
            "  <chunk start=\"{}\" end=\"{}\">{}</chunk>\n",
            chunk.start_time,
            end,
            escape_xml(&chunk.text)
        ));
    }

    for tag in &output.tags {
        let index = |word: Option<usize>| word.map(|w| w.to_string()).unwrap_or_default();
        result.push_str(&format!(
            "  <tag name=\"{}\" type=\"{}\" start-word=\"{}\" end-word=\"{}\"/>\n",
            escape_xml(&tag.curve_name),
            curve_keyword(tag.curve_type),
            index(tag.start_word),
            index(tag.end_word)
        ));
    }

    for diagnostic in &output.diagnostics {
        result.push_str(&format!(
            "  <diagnostic kind=\"{}\">{}</diagnostic>\n",
            kind_name(diagnostic.kind),
            escape_xml(&diagnostic.message)
        ));
    }

    result.push_str("</parse-output>");
    result
}

fn curve_keyword(curve_type: CurveType) -> &'static str {
    match curve_type {
        CurveType::Quadruplet => "quad",
        CurveType::LeadingTriplet => "lt",
        CurveType::CenterTriplet => "ct",
        CurveType::TrailingTriplet => "tt",
    }
}

fn kind_name(kind: DiagnosticKind) -> &'static str {
    match kind {
        DiagnosticKind::UnmatchedBracket => "unmatched-bracket",
        DiagnosticKind::UnmatchedTag => "unmatched-tag",
        DiagnosticKind::UnmatchedWord => "unmatched-word",
        DiagnosticKind::MalformedTag => "malformed-tag",
        DiagnosticKind::UnknownParameter => "unknown-parameter",
    }
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}

/// `tag` format
pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn description(&self) -> &str {
        "XML-like listing of chunks, tags and diagnostics"
    }

    fn serialize(&self, output: &ParseOutput) -> Result<String, FormatError> {
        Ok(serialize_output(output))
    }
}
