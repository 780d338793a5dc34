//! Word marker substitution
//!
//!     Replaces the words of an externally recognized word list by markers in the tag-marker
//!     text. The list is ordered like the speech, so matching walks forward: word `i` is looked
//!     for after the marker of the last word that was placed. A repeated word therefore lands on
//!     its own occurrence instead of the first one in the text.
//!
//!     A word always goes to its *nearest* occurrence after the cursor, compared without regard
//!     to case, so one word can never jump over text that later words need:
//!
//!         [a]The cat[/a] sat on the mat     "the" is "The", not the "the" before "mat"
//!         [a]it's[/a] it is                 "it" is the start of "it's"
//!
//!     Substring occurrences count, since recognizers split contractions. Inside the text token
//!     (whitespace-delimited) holding the nearest occurrence, a whole-word occurrence is
//!     preferred. Markers and any leftover `[...]` regions are never searched.
//!
//!     The first pass only places words whose nearest occurrence has the exact case; the others
//!     move the cursor past that occurrence and wait. If some words were not placed, the whole
//!     working text is uppercased and the missing words are retried uppercased, each between
//!     the markers of its placed neighbours. Words still missing after that are reported as
//!     `UnmatchedWord`; the markers that were placed are kept.

use crate::texttag::diagnostics::{DiagnosticKind, Diagnostics};
use crate::texttag::markers::{is_delimiter, word_marker};
use regex::RegexBuilder;
use std::ops::Range;

/// Result of [substitute_words]
#[derive(Debug, Clone, PartialEq)]
pub struct WordSubstitution {
    /// Tag-marker text with word markers added
    pub text: String,
    /// `matched[i]` is true when word `i` was placed
    pub matched: Vec<bool>,
    /// True when the uppercase retry ran
    pub used_case_fallback: bool,
    pub diagnostics: Diagnostics,
}

impl WordSubstitution {
    pub fn matched_count(&self) -> usize {
        self.matched.iter().filter(|matched| **matched).count()
    }
}

/// Replace every word of `words` in `text` by its marker.
pub fn substitute_words<W: AsRef<str>>(text: &str, words: &[W]) -> WordSubstitution {
    let mut working = text.to_string();
    let mut matched = vec![false; words.len()];

    let mut cursor = 0;
    for (index, word) in words.iter().enumerate() {
        let word = word.as_ref();
        let Some(found) = find_word(&working, word, cursor..working.len()) else {
            continue;
        };
        if &working[found.clone()] == word {
            cursor = place_word(&mut working, found, index);
            matched[index] = true;
        } else {
            cursor = found.end;
        }
    }

    let mut count = matched.iter().filter(|m| **m).count();
    let used_case_fallback = count < words.len();

    if used_case_fallback {
        working = working.to_uppercase();
        let mut cursor = 0;
        for (index, word) in words.iter().enumerate() {
            if matched[index] {
                let marker = word_marker(index);
                if let Some(position) = working[cursor..].find(&marker) {
                    cursor += position + marker.len();
                }
                continue;
            }

            let limit = next_placed_marker(&working, &matched, index, cursor);
            let word = word.as_ref().to_uppercase();
            let Some(found) = find_word(&working, &word, cursor..limit) else {
                continue;
            };
            if working[found.clone()] == word {
                cursor = place_word(&mut working, found, index);
                matched[index] = true;
                count += 1;
            }
        }
    }

    let mut diagnostics = Diagnostics::new();
    if count < words.len() {
        let missing: Vec<String> = words
            .iter()
            .zip(&matched)
            .enumerate()
            .filter(|(_, (_, matched))| !**matched)
            .map(|(index, (word, _))| format!("{index}:{:?}", word.as_ref()))
            .collect();
        diagnostics.report(
            DiagnosticKind::UnmatchedWord,
            format!(
                "{} of {} words not found in the text: {}",
                missing.len(),
                words.len(),
                missing.join(", ")
            ),
        );
    }

    tracing::debug!(
        matched = count,
        words = words.len(),
        case_fallback = used_case_fallback,
        "substituted word markers"
    );

    WordSubstitution {
        text: working,
        matched,
        used_case_fallback,
        diagnostics,
    }
}

/// Replace `found` by the marker of `index`; returns the position right after the marker.
fn place_word(working: &mut String, found: Range<usize>, index: usize) -> usize {
    let marker = word_marker(index);
    let end = found.start + marker.len();
    working.replace_range(found, &marker);
    end
}

/// Start of the marker of the next placed word after `index`, or the end of the text.
fn next_placed_marker(working: &str, matched: &[bool], index: usize, cursor: usize) -> usize {
    matched
        .iter()
        .enumerate()
        .skip(index + 1)
        .find(|(_, placed)| **placed)
        .and_then(|(next, _)| working[cursor..].find(&word_marker(next)))
        .map_or(working.len(), |position| cursor + position)
}

/// Nearest occurrence of `word` inside `range`, compared case-insensitively and outside
/// protected regions.
///
/// Among the occurrences starting in the same text token as the nearest one, a whole-word
/// occurrence wins.
pub fn find_word(haystack: &str, word: &str, range: Range<usize>) -> Option<Range<usize>> {
    if word.is_empty() || range.start > range.end || range.end > haystack.len() {
        return None;
    }
    let pattern = RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .build()
        .ok()?;

    let protected = protected_ranges(haystack);
    let is_free = |found: &Range<usize>| {
        !protected
            .iter()
            .any(|region| found.start < region.end && found.end > region.start)
    };

    let window = &haystack[range.clone()];
    let mut candidates = pattern
        .find_iter(window)
        .map(|m| range.start + m.start()..range.start + m.end())
        .filter(|found| is_free(found));

    let nearest = candidates.next()?;
    let token_end = haystack[nearest.start..]
        .find(char::is_whitespace)
        .map_or(haystack.len(), |offset| nearest.start + offset);

    if is_whole_word(haystack, &nearest) {
        return Some(nearest);
    }
    let whole = candidates
        .take_while(|found| found.start < token_end)
        .find(|found| is_whole_word(haystack, found));

    Some(whole.unwrap_or(nearest))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}

fn is_whole_word(haystack: &str, found: &Range<usize>) -> bool {
    let before = haystack[..found.start].chars().next_back();
    let after = haystack[found.end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Byte ranges of markers and closed `[...]` regions.
fn protected_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut open: Option<(usize, char)> = None;

    for (position, c) in text.char_indices() {
        match open {
            Some((start, closer)) => {
                if c == closer {
                    ranges.push(start..position + c.len_utf8());
                    open = None;
                }
            }
            None if is_delimiter(c) => open = Some((position, c)),
            None if c == '[' => open = Some((position, ']')),
            None => {}
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texttag::diagnostics::ParseErrorCode;
    use crate::texttag::markers::tag_marker;

    fn markers(indices: &[usize], separator: &str) -> String {
        indices
            .iter()
            .map(|index| word_marker(*index))
            .collect::<Vec<_>>()
            .join(separator)
    }

    #[test]
    fn test_exact_case_match() {
        let result = substitute_words("Hello world", &["Hello", "world"]);
        assert_eq!(result.text, markers(&[0, 1], " "));
        assert!(!result.used_case_fallback);
        assert_eq!(result.matched_count(), 2);
        assert_eq!(result.diagnostics.code(), ParseErrorCode::None);
    }

    #[test]
    fn test_case_fallback() {
        let result = substitute_words("HELLO world", &["Hello", "world"]);
        assert!(result.used_case_fallback);
        assert_eq!(result.matched, vec![true, true]);
        assert_eq!(result.text, markers(&[0, 1], " "));
        assert_eq!(result.diagnostics.code(), ParseErrorCode::None);
    }

    #[test]
    fn test_case_fallback_retries_only_missing_words() {
        let result = substitute_words("Oh HI there", &["Oh", "hi", "there"]);
        assert!(result.used_case_fallback);
        assert_eq!(result.matched, vec![true, true, true]);
        assert_eq!(result.diagnostics.code(), ParseErrorCode::None);
        assert_eq!(result.text, markers(&[0, 1, 2], " "));
    }

    #[test]
    fn test_capitalised_word_does_not_jump_to_later_repeat() {
        let words = ["the", "cat", "sat", "on", "the", "mat"];
        let result = substitute_words("The cat sat on the mat", &words);
        assert_eq!(result.matched_count(), 6);
        assert_eq!(result.text, markers(&[0, 1, 2, 3, 4, 5], " "));
        assert_eq!(result.diagnostics.code(), ParseErrorCode::None);
    }

    #[test]
    fn test_split_contraction() {
        let result = substitute_words("it's it is", &["it", "'s", "it", "is"]);
        assert_eq!(result.matched_count(), 4);
        assert_eq!(
            result.text,
            format!("{} {}", markers(&[0, 1], ""), markers(&[2, 3], " "))
        );
        assert!(!result.used_case_fallback);
    }

    #[test]
    fn test_case_variant_keeps_its_place() {
        // the first "hi" belongs to "HI", not to the later lowercase "hi"
        let result = substitute_words("HI there hi", &["hi", "there", "hi"]);
        assert!(result.used_case_fallback);
        assert_eq!(result.matched, vec![true, true, true]);
        assert_eq!(result.text, markers(&[0, 1, 2], " "));
    }

    #[test]
    fn test_repeated_words_get_their_own_occurrence() {
        let result = substitute_words("no no no", &["no", "no", "no"]);
        assert_eq!(result.text, markers(&[0, 1, 2], " "));
    }

    #[test]
    fn test_substring_fallback() {
        let result = substitute_words("gonna", &["gon"]);
        assert_eq!(result.text, format!("{}na", word_marker(0)));
    }

    #[test]
    fn test_markers_are_not_searched() {
        let text = format!("{}one{} 1", tag_marker(1), tag_marker(1));
        let result = substitute_words(&text, &["1"]);
        assert_eq!(
            result.text,
            format!("{}one{} {}", tag_marker(1), tag_marker(1), word_marker(0))
        );
    }

    #[test]
    fn test_leftover_tags_are_not_searched() {
        let result = substitute_words("[sad]sad", &["sad"]);
        assert_eq!(result.text, format!("[sad]{}", word_marker(0)));
    }

    #[test]
    fn test_unmatched_word_is_reported() {
        let result = substitute_words("Hello there", &["Hello", "world"]);
        assert_eq!(result.matched, vec![true, false]);
        assert_eq!(result.diagnostics.code(), ParseErrorCode::UnmatchedWord);
        assert_eq!(result.text, format!("{} THERE", word_marker(0)));
    }

    #[test]
    fn test_empty_word_list() {
        let words: [&str; 0] = [];
        let result = substitute_words("Hello", &words);
        assert_eq!(result.text, "Hello");
        assert!(!result.used_case_fallback);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_word_never_matches() {
        let result = substitute_words("Hello", &["", "Hello"]);
        assert_eq!(result.matched, vec![false, true]);
        assert_eq!(result.diagnostics.code(), ParseErrorCode::UnmatchedWord);
    }

    #[test]
    fn test_find_word() {
        assert_eq!(find_word("cat scat cat", "cat", 1..12), Some(5..8));
        assert_eq!(find_word("The cat", "the", 0..7), Some(0..3));
        assert_eq!(find_word("dog", "cat", 0..3), None);
        assert_eq!(find_word("it's its", "it", 0..8), Some(0..2));
        assert_eq!(find_word("cat cat", "cat", 0..3), Some(0..3));
        assert_eq!(find_word("cat cat", "cat", 4..5), None);
    }

    #[test]
    fn test_find_word_prefers_whole_word_within_token() {
        assert_eq!(find_word("xab-ab ab", "ab", 0..9), Some(4..6));
        // a whole word in a later token does not beat a nearer substring
        assert_eq!(find_word("xab ab", "ab", 0..6), Some(1..3));
    }
}
