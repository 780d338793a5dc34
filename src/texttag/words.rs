//! Word records
//!
//!     The word list comes from a recognizer: one record per recognized word, in speech order,
//!     optionally with its start and end time in seconds. Alignment only looks at the text.
//!
//!     On disk a word list is JSON, either a plain array of strings or an array of records:
//!
//!         ["Hi", "there"]
//!         [{"text": "Hi", "start": 0.1, "end": 0.3}, {"text": "there", "start": 0.35}]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WordRecord {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f32>,
}

impl WordRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: None,
            end: None,
        }
    }

    pub fn timed(text: impl Into<String>, start: f32, end: f32) -> Self {
        Self {
            text: text.into(),
            start: Some(start),
            end: Some(end),
        }
    }
}

impl AsRef<str> for WordRecord {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&str> for WordRecord {
    fn from(text: &str) -> Self {
        WordRecord::new(text)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WordEntry {
    Text(String),
    Record(WordRecord),
}

impl From<WordEntry> for WordRecord {
    fn from(entry: WordEntry) -> Self {
        match entry {
            WordEntry::Text(text) => WordRecord::new(text),
            WordEntry::Record(record) => record,
        }
    }
}

/// Errors when reading a word list
#[derive(Debug)]
pub enum WordListError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for WordListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordListError::Io(err) => write!(f, "Failed to read word list: {err}"),
            WordListError::Json(err) => write!(f, "Invalid word list: {err}"),
        }
    }
}

impl std::error::Error for WordListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WordListError::Io(err) => Some(err),
            WordListError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for WordListError {
    fn from(err: std::io::Error) -> Self {
        WordListError::Io(err)
    }
}

impl From<serde_json::Error> for WordListError {
    fn from(err: serde_json::Error) -> Self {
        WordListError::Json(err)
    }
}

/// Parse a JSON word list
pub fn parse_word_list(source: &str) -> Result<Vec<WordRecord>, WordListError> {
    let entries: Vec<WordEntry> = serde_json::from_str(source)?;
    Ok(entries.into_iter().map(WordRecord::from).collect())
}

/// Read a JSON word list from `path`
pub fn load_word_list(path: impl AsRef<Path>) -> Result<Vec<WordRecord>, WordListError> {
    let source = fs::read_to_string(path)?;
    parse_word_list(&source)
}
