//! Chunk extraction
//!
//!     Authors can pin parts of a line to known times with chunk markers: `<` + a real number +
//!     `>`. The text between two markers is one chunk, timed from the preceding marker's value to
//!     the following marker's value. The text before the first marker starts at 0 and the text
//!     after the last marker is open-ended; it runs until whatever end the caller knows (usually
//!     the length of the audio, see [validate_chunks]).
//!
//!     A `<` that is never closed, or whose content is not a single number, is not a marker and
//!     stays in the text untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static CHUNK_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\s*([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)\s*>")
        .expect("chunk marker pattern is valid")
});

/// One timed segment of the source text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkInfo {
    /// Source text of the segment, tags included
    pub text: String,
    pub start_time: f32,
    /// `None` for the last chunk, which runs to the end of the audio
    pub end_time: Option<f32>,
}

impl ChunkInfo {
    pub fn new(text: impl Into<String>, start_time: f32, end_time: Option<f32>) -> Self {
        Self {
            text: text.into(),
            start_time,
            end_time,
        }
    }
}

/// Result of [extract_chunks]
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkExtraction {
    pub chunks: Vec<ChunkInfo>,
    /// The source with every chunk marker removed
    pub text: String,
}

/// Split `source` on chunk markers.
///
/// Without any marker the whole source is a single chunk starting at 0. With `n` markers there
/// are always `n + 1` chunks, even when a segment is empty or only whitespace.
pub fn extract_chunks(source: &str) -> ChunkExtraction {
    let mut chunks = Vec::new();
    let mut text = String::with_capacity(source.len());
    let mut last_end = 0;
    let mut start_time = 0.0_f32;
    let mut found_marker = false;

    for captures in CHUNK_MARKER.captures_iter(source) {
        let Some(marker) = captures.get(0) else {
            continue;
        };
        let time = captures[1].parse::<f32>().unwrap_or(0.0);
        let segment = &source[last_end..marker.start()];

        text.push_str(segment);
        chunks.push(ChunkInfo::new(segment, start_time, Some(time)));

        found_marker = true;
        start_time = time;
        last_end = marker.end();
    }

    let tail = &source[last_end..];
    text.push_str(tail);

    if found_marker {
        chunks.push(ChunkInfo::new(tail, start_time, None));
    } else {
        chunks.push(ChunkInfo::new(source, 0.0, None));
    }

    tracing::debug!(chunks = chunks.len(), "extracted text chunks");
    ChunkExtraction { chunks, text }
}

/// A chunk whose end time is known
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedChunk {
    pub text: String,
    pub start_time: f32,
    pub end_time: f32,
}

/// Errors found when checking chunk times against the audio
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkError {
    /// A chunk starts before 0
    BeforeAudioStart { index: usize, start: f32 },
    /// A chunk starts at or after the end of the audio
    PastAudioEnd { index: usize, start: f32 },
    /// A chunk ends at or before its own start
    EmptyRange { index: usize, start: f32, end: f32 },
    /// A chunk starts before the previous one ended
    Overlap { index: usize, start: f32, previous_end: f32 },
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::BeforeAudioStart { index, start } => write!(
                f,
                "Chunk {index} starts at {start}, before the beginning of the audio"
            ),
            ChunkError::PastAudioEnd { index, start } => write!(
                f,
                "Chunk {index} starts at {start}, past the end of the audio"
            ),
            ChunkError::EmptyRange { index, start, end } => write!(
                f,
                "Chunk {index} ends at {end}, which is not after its start {start}"
            ),
            ChunkError::Overlap {
                index,
                start,
                previous_end,
            } => write!(
                f,
                "Chunk {index} starts at {start} but the previous chunk ends at {previous_end}; \
                 chunk marker times must be strictly increasing"
            ),
        }
    }
}

impl std::error::Error for ChunkError {}

/// Check chunk times against an audio clip `audio_duration` seconds long.
///
/// The open-ended last chunk is closed at `audio_duration`. Any error means the chunk markers
/// cannot be trusted; callers fall back to processing the stripped text as a whole.
pub fn validate_chunks(
    chunks: &[ChunkInfo],
    audio_duration: f32,
) -> Result<Vec<ResolvedChunk>, ChunkError> {
    let mut resolved: Vec<ResolvedChunk> = Vec::with_capacity(chunks.len());

    for (index, chunk) in chunks.iter().enumerate() {
        let start = chunk.start_time;
        let end = chunk.end_time.unwrap_or(audio_duration);

        if start < 0.0 {
            return Err(ChunkError::BeforeAudioStart { index, start });
        }
        if start >= audio_duration {
            return Err(ChunkError::PastAudioEnd { index, start });
        }
        if end <= start {
            return Err(ChunkError::EmptyRange { index, start, end });
        }
        if let Some(previous) = resolved.last() {
            if start < previous.end_time {
                return Err(ChunkError::Overlap {
                    index,
                    start,
                    previous_end: previous.end_time,
                });
            }
        }

        resolved.push(ResolvedChunk {
            text: chunk.text.clone(),
            start_time: start,
            end_time: end,
        });
    }

    Ok(resolved)
}
