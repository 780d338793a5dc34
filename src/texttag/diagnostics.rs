//! Parse diagnostics
//!
//!     Nothing in the pipeline aborts with an error. Problems are collected here and handed back
//!     next to whatever was parsed, so callers can warn and carry on with the partial result.
//!
//!     Every problem becomes a [Diagnostic]. Three kinds also feed the combined
//!     [ParseErrorCode]: the first of `UnmatchedTag` / `UnmatchedWord` to be detected wins.
//!     `UnmatchedBracket` is found before anything else, but it is informational only, so a
//!     later tag or word problem replaces it in the combined code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Combined result code of a parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParseErrorCode {
    #[default]
    None,
    /// A closing tag had no open tag of the same name; later tags were not processed
    UnmatchedTag,
    /// A `[` without a `]` after it, or a `]` without a `[` before it
    UnmatchedBracket,
    /// Some words of the word list were not found in the text
    UnmatchedWord,
}

impl fmt::Display for ParseErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorCode::None => "none",
            ParseErrorCode::UnmatchedTag => "unmatched tag",
            ParseErrorCode::UnmatchedBracket => "unmatched bracket",
            ParseErrorCode::UnmatchedWord => "unmatched word",
        };
        f.write_str(name)
    }
}

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    UnmatchedBracket,
    UnmatchedTag,
    UnmatchedWord,
    /// A tag that could not be read and was dropped
    MalformedTag,
    /// A tag with a parameter we do not know; the tag was dropped
    UnknownParameter,
}

impl DiagnosticKind {
    /// The combined code this kind contributes to, if any
    pub fn error_code(&self) -> Option<ParseErrorCode> {
        match self {
            DiagnosticKind::UnmatchedBracket => Some(ParseErrorCode::UnmatchedBracket),
            DiagnosticKind::UnmatchedTag => Some(ParseErrorCode::UnmatchedTag),
            DiagnosticKind::UnmatchedWord => Some(ParseErrorCode::UnmatchedWord),
            DiagnosticKind::MalformedTag | DiagnosticKind::UnknownParameter => None,
        }
    }
}

/// One problem found during a parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Collects diagnostics and keeps the combined code up to date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    code: ParseErrorCode,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem
    pub fn report(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(kind = ?kind, "{message}");
        self.push(Diagnostic { kind, message });
    }

    /// Append everything from `other`, in order
    pub fn extend(&mut self, other: Diagnostics) {
        for entry in other.entries {
            self.push(entry);
        }
    }

    fn push(&mut self, entry: Diagnostic) {
        if let Some(code) = entry.kind.error_code() {
            let replace = match self.code {
                ParseErrorCode::None => true,
                ParseErrorCode::UnmatchedBracket => code != ParseErrorCode::UnmatchedBracket,
                _ => false,
            };
            if replace {
                self.code = code;
            }
        }
        self.entries.push(entry);
    }

    pub fn code(&self) -> ParseErrorCode {
        self.code
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_clean() {
        let diagnostics = Diagnostics::new();
        assert_eq!(diagnostics.code(), ParseErrorCode::None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_first_fatal_problem_wins() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(DiagnosticKind::UnmatchedTag, "tag");
        diagnostics.report(DiagnosticKind::UnmatchedWord, "word");
        assert_eq!(diagnostics.code(), ParseErrorCode::UnmatchedTag);
        assert_eq!(diagnostics.entries().len(), 2);
    }

    #[test]
    fn test_bracket_problem_does_not_suppress_later_codes() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(DiagnosticKind::UnmatchedBracket, "bracket");
        assert_eq!(diagnostics.code(), ParseErrorCode::UnmatchedBracket);
        diagnostics.report(DiagnosticKind::UnmatchedWord, "word");
        assert_eq!(diagnostics.code(), ParseErrorCode::UnmatchedWord);
    }

    #[test]
    fn test_bracket_problem_after_fatal_problem_is_ignored_for_code() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(DiagnosticKind::UnmatchedTag, "tag");
        diagnostics.report(DiagnosticKind::UnmatchedBracket, "bracket");
        assert_eq!(diagnostics.code(), ParseErrorCode::UnmatchedTag);
    }

    #[test]
    fn test_tag_level_problems_leave_code_alone() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(DiagnosticKind::MalformedTag, "[]");
        diagnostics.report(DiagnosticKind::UnknownParameter, "[a b=1]");
        assert_eq!(diagnostics.code(), ParseErrorCode::None);
        assert_eq!(diagnostics.entries().len(), 2);
    }
}
