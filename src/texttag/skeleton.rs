//! Skeleton extraction
//!
//!     Once tags and words are both replaced by markers, only the order of the markers matters.
//!     The skeleton is the doubly-marked text with everything outside markers dropped.
//!
//!     The stripper toggles an `inside_marker` flag on every delimiter. Characters are copied
//!     while inside a marker, and a delimiter is copied only when it closes one. Each marker
//!     thus shrinks to its index followed by its delimiter:
//!
//!         \u{1}0\u{1}\u{2}0\u{2} \u{2}1\u{2}\u{1}0\u{1}   ->   0\u{1}0\u{2}1\u{2}0\u{1}
//!
//!     The trailing delimiter still tells tag markers and word markers apart, which is all the
//!     boundary resolver needs. [parse_skeleton] turns the skeleton into a list of [Marker]s.

use crate::texttag::markers::is_delimiter;
use logos::Logos;

/// Reduce doubly-marked text to its markers.
pub fn strip_extraneous(text: &str) -> String {
    let mut skeleton = String::new();
    let mut inside_marker = false;

    for c in text.chars() {
        if is_delimiter(c) {
            if inside_marker {
                skeleton.push(c);
            }
            inside_marker = !inside_marker;
        } else if inside_marker {
            skeleton.push(c);
        }
    }

    skeleton
}

/// Tokens of a skeleton string
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
enum SkeletonToken {
    #[regex(r"[0-9]+\x01", |lex| marker_index(lex.slice()))]
    Tag(usize),

    #[regex(r"[0-9]+\x02", |lex| marker_index(lex.slice()))]
    Word(usize),
}

fn marker_index(slice: &str) -> Option<usize> {
    slice[..slice.len() - 1].parse().ok()
}

/// One marker of the skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Tag(usize),
    Word(usize),
}

impl Marker {
    pub fn word_index(&self) -> Option<usize> {
        match self {
            Marker::Word(index) => Some(*index),
            Marker::Tag(_) => None,
        }
    }
}

/// Read the markers of a skeleton in order.
///
/// Anything that is not a complete marker is skipped.
pub fn parse_skeleton(skeleton: &str) -> Vec<Marker> {
    SkeletonToken::lexer(skeleton)
        .filter_map(|token| match token {
            Ok(SkeletonToken::Tag(index)) => Some(Marker::Tag(index)),
            Ok(SkeletonToken::Word(index)) => Some(Marker::Word(index)),
            Err(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texttag::markers::{tag_marker, word_marker, TAG_DELIMITER, WORD_DELIMITER};

    #[test]
    fn test_strip_keeps_only_markers() {
        let text = format!(
            "{}{} {}!{}",
            tag_marker(0),
            word_marker(0),
            word_marker(1),
            tag_marker(0)
        );
        assert_eq!(
            strip_extraneous(&text),
            format!("0{TAG_DELIMITER}0{WORD_DELIMITER}1{WORD_DELIMITER}0{TAG_DELIMITER}")
        );
    }

    #[test]
    fn test_strip_unmarked_text() {
        assert_eq!(strip_extraneous("nothing to see"), "");
    }

    #[test]
    fn test_parse_skeleton() {
        let text = format!(
            "{}hi {} {}{}",
            tag_marker(3),
            word_marker(10),
            word_marker(11),
            tag_marker(3)
        );
        let markers = parse_skeleton(&strip_extraneous(&text));
        assert_eq!(
            markers,
            vec![
                Marker::Tag(3),
                Marker::Word(10),
                Marker::Word(11),
                Marker::Tag(3)
            ]
        );
    }

    #[test]
    fn test_parse_skips_garbage() {
        let skeleton = format!("x0{TAG_DELIMITER}{WORD_DELIMITER}2{WORD_DELIMITER}");
        assert_eq!(
            parse_skeleton(&skeleton),
            vec![Marker::Tag(0), Marker::Word(2)]
        );
    }

    #[test]
    fn test_word_index() {
        assert_eq!(Marker::Word(4).word_index(), Some(4));
        assert_eq!(Marker::Tag(4).word_index(), None);
    }
}
