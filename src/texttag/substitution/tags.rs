//! Tag marker substitution
//!
//!     Scans the filtered text left to right for `[...]` spans and parses each one. Valid opening
//!     tags are appended to the tag list and replaced by their marker. A closing tag is matched
//!     to the most recently opened tag *of the same name* that is still open, which is a stack
//!     per curve name rather than one global stack:
//!
//!         [a][a][/a]text[/a]   ->  the first [/a] closes the second [a]
//!         [a][b][/a][/b]       ->  fine, names do not interfere
//!
//!     The matched closing tag gets its opener's marker.
//!
//!     A closing tag that matches nothing is removed, reported as `UnmatchedTag`, and ends the
//!     scan: the rest of the text is kept exactly as it is, tags included. Tags that fail to parse
//!     are removed and reported but do not stop the scan.
//!
//!     Independently, a quick bracket-balance check reports `UnmatchedBracket`.

use crate::texttag::diagnostics::{DiagnosticKind, Diagnostics};
use crate::texttag::markers::{remove_markers, tag_marker};
use crate::texttag::tag_info::{parse_tag_with, TagDefaults, TagInfo, TagParseError};
use std::collections::HashMap;
use std::ops::Range;

/// Result of [substitute_tags]
#[derive(Debug, Clone, PartialEq)]
pub struct TagSubstitution {
    /// Valid opening tags, in source order
    pub tags: Vec<TagInfo>,
    /// The input with tags replaced by markers
    pub text: String,
    pub diagnostics: Diagnostics,
}

impl TagSubstitution {
    /// Human readable text: no markers, no leftover tags
    pub fn stripped_text(&self) -> String {
        strip_tag_text(&self.text)
    }
}

/// Replace the tags of `text` by markers and collect the opening tags.
pub fn substitute_tags(text: &str, defaults: &TagDefaults) -> TagSubstitution {
    let mut diagnostics = Diagnostics::new();

    if let Some(position) = find_unmatched_bracket(text) {
        diagnostics.report(
            DiagnosticKind::UnmatchedBracket,
            format!("unmatched bracket at byte {position}"),
        );
    }

    let mut tags: Vec<TagInfo> = Vec::new();
    let mut open: HashMap<String, Vec<usize>> = HashMap::new();
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(span) = next_tag_span(text, cursor) {
        output.push_str(&text[cursor..span.start]);
        cursor = span.end;

        let source = &text[span];
        let tag = parse_tag_with(source, defaults);

        if tag.parse_error == TagParseError::MalformedTag {
            diagnostics.report(
                DiagnosticKind::MalformedTag,
                format!("dropped malformed tag `{source}`"),
            );
            continue;
        }

        if tag.is_opening_tag {
            if tag.parse_error == TagParseError::UnknownParameter {
                diagnostics.report(
                    DiagnosticKind::UnknownParameter,
                    format!("dropped tag `{source}` with an unknown parameter"),
                );
                continue;
            }
            let index = tags.len();
            open.entry(tag.curve_name.clone()).or_default().push(index);
            output.push_str(&tag_marker(index));
            tags.push(tag);
            continue;
        }

        if tag.parse_error == TagParseError::UnknownParameter {
            diagnostics.report(
                DiagnosticKind::UnknownParameter,
                format!("ignored unknown parameter in closing tag `{source}`"),
            );
        }

        match open.get_mut(&tag.curve_name).and_then(Vec::pop) {
            Some(index) => output.push_str(&tag_marker(index)),
            None => {
                diagnostics.report(
                    DiagnosticKind::UnmatchedTag,
                    format!(
                        "closing tag `{source}` has no open `{}` tag; remaining tags were not processed",
                        tag.curve_name
                    ),
                );
                break;
            }
        }
    }

    output.push_str(&text[cursor..]);

    tracing::debug!(tags = tags.len(), "substituted tag markers");
    TagSubstitution {
        tags,
        text: output,
        diagnostics,
    }
}

/// Find the next `[` at or after `from` and the first `]` after it.
fn next_tag_span(text: &str, from: usize) -> Option<Range<usize>> {
    let start = from + text[from..].find('[')?;
    let end = start + text[start..].find(']')? + 1;
    Some(start..end)
}

/// Byte position of the first bracket that has no partner, if any.
///
/// A `[` must be followed by a `]` before the next `[`; a `]` must close an open `[`.
pub fn find_unmatched_bracket(text: &str) -> Option<usize> {
    let mut open: Option<usize> = None;
    for (position, c) in text.char_indices() {
        match c {
            '[' => {
                if let Some(previous) = open {
                    return Some(previous);
                }
                open = Some(position);
            }
            ']' => {
                if open.take().is_none() {
                    return Some(position);
                }
            }
            _ => {}
        }
    }
    open
}

/// Remove markers, leftover `[...]` regions and stray brackets from tag-marker text.
pub fn strip_tag_text(text: &str) -> String {
    let text = remove_markers(text);
    let mut output = String::with_capacity(text.len());
    let mut rest = text.as_str();

    while let Some(position) = rest.find(|c: char| c == '[' || c == ']') {
        output.push_str(&rest[..position]);
        let tail = &rest[position..];
        rest = if tail.starts_with('[') {
            match tail.find(']') {
                Some(close) => &tail[close + 1..],
                None => &tail[1..],
            }
        } else {
            &tail[1..]
        };
    }
    output.push_str(rest);

    output
}
