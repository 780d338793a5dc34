//! Boundary resolution
//!
//!     Assigns every tag the words it spans, using the marker order of the skeleton. For tag `i`:
//!
//!     - `start_word` is the first word marker after the first occurrence of tag marker `i`
//!     - `end_word` is the last word marker before the last occurrence of tag marker `i`
//!
//!     A closed tag has two occurrences of its marker (opener and closer), an unclosed one has
//!     a single occurrence which serves for both ends. Both occurrences are removed once read.
//!
//!     Missing boundaries are inferred in a fixed order: first a missing start takes the end
//!     (or 0), then a missing end takes the start. The order matters for a tag with no words
//!     on either side, which ends up at 0/0.

use crate::texttag::skeleton::{parse_skeleton, Marker};
use crate::texttag::tag_info::TagInfo;

/// Fill in `start_word` / `end_word` of every tag from `skeleton`.
pub fn resolve_boundaries(tags: &mut [TagInfo], skeleton: &str) {
    let mut markers = parse_skeleton(skeleton);

    for (index, tag) in tags.iter_mut().enumerate() {
        let (start, end) = read_boundaries(&mut markers, index);
        let (start, end) = infer_missing(start, end);
        tag.start_word = Some(start);
        tag.end_word = Some(end);
    }

    tracing::debug!(tags = tags.len(), "resolved tag boundaries");
}

/// Read and consume the boundaries of tag `index`.
fn read_boundaries(markers: &mut Vec<Marker>, index: usize) -> (Option<usize>, Option<usize>) {
    let marker = Marker::Tag(index);

    let Some(first) = markers.iter().position(|m| *m == marker) else {
        return (None, None);
    };
    let start = markers[first + 1..].iter().find_map(Marker::word_index);
    markers.remove(first);

    let last = markers.iter().rposition(|m| *m == marker).unwrap_or(first);
    let end = markers[..last.min(markers.len())]
        .iter()
        .rev()
        .find_map(Marker::word_index);
    if last < markers.len() && markers[last] == marker {
        markers.remove(last);
    }

    (start, end)
}

/// Apply the fallbacks for boundaries that were not found.
pub fn infer_missing(start: Option<usize>, end: Option<usize>) -> (usize, usize) {
    let start = start.unwrap_or_else(|| end.unwrap_or(0));
    let end = end.unwrap_or(start);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texttag::markers::{tag_marker, word_marker};
    use crate::texttag::skeleton::strip_extraneous;

    fn tags(count: usize) -> Vec<TagInfo> {
        (0..count)
            .map(|i| TagInfo {
                curve_name: format!("tag{i}"),
                ..TagInfo::default()
            })
            .collect()
    }

    fn resolve(text: &str, count: usize) -> Vec<(Option<usize>, Option<usize>)> {
        let mut tags = tags(count);
        resolve_boundaries(&mut tags, &strip_extraneous(text));
        tags.iter().map(|t| (t.start_word, t.end_word)).collect()
    }

    #[test]
    fn test_closed_tag_spans_inner_words() {
        let text = format!(
            "{}{} {}{}",
            tag_marker(0),
            word_marker(0),
            word_marker(1),
            tag_marker(0)
        );
        assert_eq!(resolve(&text, 1), vec![(Some(0), Some(1))]);
    }

    #[test]
    fn test_tag_in_the_middle() {
        let text = format!(
            "{} {}{}{} {}",
            word_marker(0),
            tag_marker(0),
            word_marker(1),
            tag_marker(0),
            word_marker(2)
        );
        assert_eq!(resolve(&text, 1), vec![(Some(1), Some(1))]);
    }

    #[test]
    fn test_unclosed_tag_at_end_takes_previous_word() {
        let text = format!("{} {}{}", word_marker(0), word_marker(1), tag_marker(0));
        // no word after: start falls back to end
        assert_eq!(resolve(&text, 1), vec![(Some(1), Some(1))]);
    }

    #[test]
    fn test_unclosed_tag_at_start_takes_next_word() {
        let text = format!("{}{} {}", tag_marker(0), word_marker(0), word_marker(1));
        assert_eq!(resolve(&text, 1), vec![(Some(0), Some(0))]);
    }

    #[test]
    fn test_tag_without_words() {
        let text = format!("{}{}", tag_marker(0), tag_marker(0));
        assert_eq!(resolve(&text, 1), vec![(Some(0), Some(0))]);
    }

    #[test]
    fn test_nested_tags() {
        // [a] w0 [b] w1 [/b] w2 [/a]
        let text = format!(
            "{}{} {}{}{} {}",
            tag_marker(0),
            word_marker(0),
            tag_marker(1),
            word_marker(1),
            tag_marker(1),
            word_marker(2)
        ) + &tag_marker(0);
        assert_eq!(resolve(&text, 2), vec![(Some(0), Some(2)), (Some(1), Some(1))]);
    }

    #[test]
    fn test_empty_tag_between_words() {
        // w0 [a][/a] w1
        let text = format!(
            "{} {}{} {}",
            word_marker(0),
            tag_marker(0),
            tag_marker(0),
            word_marker(1)
        );
        assert_eq!(resolve(&text, 1), vec![(Some(1), Some(0))]);
    }

    #[test]
    fn test_missing_marker_resolves_to_zero() {
        assert_eq!(resolve("", 2), vec![(Some(0), Some(0)), (Some(0), Some(0))]);
    }

    #[test]
    fn test_infer_missing_order() {
        assert_eq!(infer_missing(None, Some(3)), (3, 3));
        assert_eq!(infer_missing(Some(2), None), (2, 2));
        assert_eq!(infer_missing(None, None), (0, 0));
        assert_eq!(infer_missing(Some(1), Some(4)), (1, 4));
    }
}
