//! Tag time spans
//!
//!     Converts an aligned tag into the time window it covers, given word timings: from the
//!     start of its first word to the end of its last word, both moved by the tag's time shift.
//!
//!     When a tag opens and closes between the same two words, its start word lies after its
//!     end word and the window comes out reversed; the two times are swapped. A quadruplet with
//!     an explicit duration ignores the end word and lasts exactly that long.

use crate::texttag::tag_info::{CurveType, TagInfo};
use crate::texttag::words::WordRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TagSpan {
    pub start_time: f32,
    pub end_time: f32,
}

impl TagSpan {
    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }
}

/// Time window of `tag` over `words`.
///
/// Missing word times count as 0. With an empty word list every tag collapses onto its time
/// shift. Returns `None` for a tag that was never aligned or points past the word list.
pub fn tag_span(tag: &TagInfo, words: &[WordRecord]) -> Option<TagSpan> {
    let (start_word, end_word) = (tag.start_word?, tag.end_word?);

    let (word_start, word_end) = if words.is_empty() {
        (0.0, 0.0)
    } else {
        let first = words.get(start_word)?;
        let last = words.get(end_word)?;
        (first.start.unwrap_or(0.0), last.end.unwrap_or(0.0))
    };

    let mut start_time = word_start + tag.time_shift;
    let mut end_time = word_end + tag.time_shift;
    if start_time > end_time {
        std::mem::swap(&mut start_time, &mut end_time);
    }

    if let (CurveType::Quadruplet, Some(duration)) = (tag.curve_type, tag.duration) {
        end_time = start_time + duration;
    }

    Some(TagSpan {
        start_time,
        end_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<WordRecord> {
        vec![
            WordRecord::timed("Hi", 0.5, 0.75),
            WordRecord::timed("there", 1.0, 1.5),
            WordRecord::timed("friend", 2.0, 2.5),
        ]
    }

    fn aligned(start: usize, end: usize) -> TagInfo {
        TagInfo {
            curve_name: "happy".to_string(),
            start_word: Some(start),
            end_word: Some(end),
            ..TagInfo::default()
        }
    }

    #[test]
    fn test_span_over_words() {
        let span = tag_span(&aligned(0, 1), &words()).unwrap();
        assert_eq!(span, TagSpan { start_time: 0.5, end_time: 1.5 });
    }

    #[test]
    fn test_time_shift() {
        let tag = TagInfo {
            time_shift: 0.25,
            ..aligned(1, 2)
        };
        let span = tag_span(&tag, &words()).unwrap();
        assert_eq!(span, TagSpan { start_time: 1.25, end_time: 2.75 });
    }

    #[test]
    fn test_reversed_span_is_swapped() {
        let span = tag_span(&aligned(2, 1), &words()).unwrap();
        assert_eq!(span, TagSpan { start_time: 1.5, end_time: 2.0 });
    }

    #[test]
    fn test_duration_overrides_end() {
        let tag = TagInfo {
            duration: Some(0.5),
            ..aligned(0, 2)
        };
        let span = tag_span(&tag, &words()).unwrap();
        assert_eq!(span, TagSpan { start_time: 0.5, end_time: 1.0 });
        assert_eq!(span.duration(), 0.5);
    }

    #[test]
    fn test_duration_ignored_for_triplets() {
        let tag = TagInfo {
            duration: Some(0.5),
            curve_type: CurveType::LeadingTriplet,
            ..aligned(0, 2)
        };
        assert_eq!(tag_span(&tag, &words()).unwrap().end_time, 2.5);
    }

    #[test]
    fn test_empty_word_list() {
        let tag = TagInfo {
            time_shift: 0.5,
            ..aligned(0, 0)
        };
        assert_eq!(
            tag_span(&tag, &[]),
            Some(TagSpan { start_time: 0.5, end_time: 0.5 })
        );
    }

    #[test]
    fn test_unaligned_or_out_of_range() {
        assert_eq!(tag_span(&TagInfo::default(), &words()), None);
        assert_eq!(tag_span(&aligned(0, 7), &words()), None);
    }

    #[test]
    fn test_missing_times_count_as_zero() {
        let words = vec![WordRecord::new("Hi"), WordRecord::timed("there", 1.0, 1.5)];
        let span = tag_span(&aligned(0, 1), &words).unwrap();
        assert_eq!(span, TagSpan { start_time: 0.0, end_time: 1.5 });
    }
}
