//! Positional markers
//!
//!     Tags and words are replaced in the working text by a marker: a delimiter character, the
//!     decimal index of the tag (or word) in its list, and the delimiter again. Tags and words
//!     use different delimiters so that a marker's kind survives the skeleton stage, where
//!     everything but the markers is dropped.
//!
//!     The delimiters are control characters. The punctuation filter removes anything that is
//!     not alphanumeric, a hyphen, an apostrophe or a space outside of tag brackets, so they can
//!     never come from the authored text itself.

/// Delimits a tag marker: `\u{1}3\u{1}` stands for the tag at index 3.
pub const TAG_DELIMITER: char = '\u{1}';

/// Delimits a word marker: `\u{2}7\u{2}` stands for the word at index 7.
pub const WORD_DELIMITER: char = '\u{2}';

/// Build the marker for the tag at `index`
pub fn tag_marker(index: usize) -> String {
    format!("{TAG_DELIMITER}{index}{TAG_DELIMITER}")
}

/// Build the marker for the word at `index`
pub fn word_marker(index: usize) -> String {
    format!("{WORD_DELIMITER}{index}{WORD_DELIMITER}")
}

/// True for either marker delimiter
pub fn is_delimiter(c: char) -> bool {
    c == TAG_DELIMITER || c == WORD_DELIMITER
}

/// Remove every marker (delimiters and the index between them) from `text`.
pub fn remove_markers(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut inside_marker = false;
    for c in text.chars() {
        if is_delimiter(c) {
            inside_marker = !inside_marker;
            continue;
        }
        if !inside_marker {
            output.push(c);
        }
    }
    output
}
