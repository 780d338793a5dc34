//! Tag parsing
//!
//!     Turns one bracketed tag, e.g. `[brow TYPE=CT DURATION=1.5 V2=0.8]` or `[/brow]`, into a
//!     [TagInfo]. The steps are:
//!
//!         1. Trim; the tag must be longer than `[]` and keep its brackets.
//!         2. A leading `/` makes it a closing tag.
//!         3. The curve name: either a quoted string (`"brow raise"`) or everything up to the
//!            first whitespace.
//!         4. The rest is lexed (see [lexing](crate::texttag::lexing)) and grouped into
//!            `KEY=VALUE` parameters. Whitespace around a bare `=` is ignored, so
//!            `DURATION = 2` is the same parameter as `DURATION=2`.
//!         5. Keys and `TYPE` values are matched case-insensitively. Numbers are read leniently:
//!            the longest numeric prefix is used and anything unreadable counts as 0.
//!
//!     Parsing never fails. Problems are reported through [TagInfo::parse_error]: a tag that is
//!     structurally broken is [TagParseError::MalformedTag]; a tag with a key we do not know is
//!     [TagParseError::UnknownParameter], and its other parameters are still applied.
//!
//! Grammar: `<parameters> = <parameter> (<ws> <parameter>)*`
//! Where: `<parameter> = <key> [<ws>? "=" <ws>? <value>?]`

use crate::texttag::lexing::{tokenize_with_spans, Token};
use chumsky::{prelude::*, Stream};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Type alias for token with location
type TokenLocation = (Token, Range<usize>);
type ParserError = Simple<TokenLocation>;

static LEADING_REAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("numeric prefix pattern is valid")
});

/// Shape of the curve a tag describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurveType {
    /// Ease in to V2 at the start word, hold, ease out from V3 after the end word
    #[default]
    Quadruplet,
    /// Peak at the start word
    LeadingTriplet,
    /// Peak halfway between the start and end words
    CenterTriplet,
    /// Peak at the end word
    TrailingTriplet,
}

impl CurveType {
    /// Read a `TYPE=` value (case-insensitive)
    pub fn from_keyword(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "QUAD" => Some(CurveType::Quadruplet),
            "LT" => Some(CurveType::LeadingTriplet),
            "CT" => Some(CurveType::CenterTriplet),
            "TT" => Some(CurveType::TrailingTriplet),
            _ => None,
        }
    }

    pub fn is_triplet(&self) -> bool {
        !matches!(self, CurveType::Quadruplet)
    }
}

/// Problems found while parsing a single tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TagParseError {
    #[default]
    None,
    /// A parameter key (or `TYPE` value) that is not recognized
    UnknownParameter,
    /// The tag itself cannot be read: empty, unbalanced quotes, no name
    MalformedTag,
}

/// Default values for tag parameters that an author leaves out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagDefaults {
    pub time_shift: f32,
    pub ease_in: f32,
    pub ease_out: f32,
    pub v1: f32,
    pub v2: f32,
    pub v3: f32,
    pub v4: f32,
}

impl Default for TagDefaults {
    fn default() -> Self {
        Self {
            time_shift: 0.0,
            ease_in: 0.2,
            ease_out: 0.2,
            v1: 0.0,
            v2: 1.0,
            v3: 1.0,
            v4: 0.0,
        }
    }
}

/// One parsed tag occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagInfo {
    pub curve_name: String,
    pub curve_type: CurveType,
    /// Fixed hold length; `None` means the tag spans its words
    pub duration: Option<f32>,
    pub time_shift: f32,
    pub ease_in: f32,
    pub ease_out: f32,
    pub v1: f32,
    pub v2: f32,
    pub v3: f32,
    pub v4: f32,
    /// Index of the first word covered, set by boundary resolution
    pub start_word: Option<usize>,
    /// Index of the last word covered, set by boundary resolution
    pub end_word: Option<usize>,
    pub is_opening_tag: bool,
    pub parse_error: TagParseError,
}

impl TagInfo {
    /// An opening tag with no name and every parameter at its default
    pub fn with_defaults(defaults: &TagDefaults) -> Self {
        Self {
            curve_name: String::new(),
            curve_type: CurveType::Quadruplet,
            duration: None,
            time_shift: defaults.time_shift,
            ease_in: defaults.ease_in,
            ease_out: defaults.ease_out,
            v1: defaults.v1,
            v2: defaults.v2,
            v3: defaults.v3,
            v4: defaults.v4,
            start_word: None,
            end_word: None,
            is_opening_tag: true,
            parse_error: TagParseError::None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.parse_error == TagParseError::None
    }

    fn malformed(mut self) -> Self {
        self.parse_error = TagParseError::MalformedTag;
        self
    }

    fn apply(&mut self, parameter: &TagParameter) {
        let value = parameter.value.as_deref().unwrap_or("");
        match parameter.key.to_uppercase().as_str() {
            "TYPE" => match CurveType::from_keyword(value) {
                Some(curve_type) => {
                    self.curve_type = curve_type;
                    if curve_type.is_triplet() {
                        self.v3 = 0.0;
                    }
                }
                None => self.parse_error = TagParseError::UnknownParameter,
            },
            "DURATION" => self.duration = Some(lenient_real(value)),
            "TIMESHIFT" => self.time_shift = lenient_real(value),
            "EASEIN" => self.ease_in = lenient_real(value),
            "EASEOUT" => self.ease_out = lenient_real(value),
            "V1" => self.v1 = lenient_real(value),
            "V2" => self.v2 = lenient_real(value),
            "V3" => self.v3 = lenient_real(value),
            "V4" => self.v4 = lenient_real(value),
            _ => self.parse_error = TagParseError::UnknownParameter,
        }
    }
}

impl Default for TagInfo {
    fn default() -> Self {
        Self::with_defaults(&TagDefaults::default())
    }
}

/// A `KEY=VALUE` pair as written in the tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagParameter {
    pub key: String,
    /// `None` when the key has no `=` at all
    pub value: Option<String>,
}

/// Parse a bracketed tag using the standard defaults
pub fn parse_tag(source: &str) -> TagInfo {
    parse_tag_with(source, &TagDefaults::default())
}

/// Parse a bracketed tag, filling omitted parameters from `defaults`
pub fn parse_tag_with(source: &str, defaults: &TagDefaults) -> TagInfo {
    let mut info = TagInfo::with_defaults(defaults);

    let trimmed = source.trim();
    if trimmed.chars().count() <= 2 || !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return info.malformed();
    }
    let mut body = trimmed[1..trimmed.len() - 1].trim();

    if let Some(rest) = body.strip_prefix('/') {
        info.is_opening_tag = false;
        body = rest;
    }

    let Some((name, remainder)) = split_curve_name(body) else {
        return info.malformed();
    };
    if name.is_empty() {
        return info.malformed();
    }
    info.curve_name = name.to_string();

    for parameter in parse_parameters(remainder) {
        info.apply(&parameter);
    }

    info
}

/// Split the curve name off the front of a tag body.
///
/// Returns `None` for a quoted name with no closing quote.
fn split_curve_name(body: &str) -> Option<(&str, &str)> {
    if let Some(quoted) = body.strip_prefix('"') {
        let close = quoted.find('"')?;
        return Some((&quoted[..close], &quoted[close + 1..]));
    }

    match body.find(char::is_whitespace) {
        Some(end) => Some((&body[..end], &body[end..])),
        None => Some((body, "")),
    }
}

/// Group the parameter text of a tag into `KEY=VALUE` pairs.
///
/// Every token sequence is accepted: a stray `=` becomes a parameter with an empty key, which
/// is then reported as unknown.
pub fn parse_parameters(source: &str) -> Vec<TagParameter> {
    let tokens = tokenize_with_spans(source);
    if tokens.is_empty() {
        return Vec::new();
    }

    let whitespace0 = filter::<TokenLocation, _, ParserError>(|(token, _): &TokenLocation| {
        token.is_whitespace()
    })
    .ignored()
    .repeated()
    .ignored();

    let key = filter::<TokenLocation, _, ParserError>(|(token, _): &TokenLocation| {
        token.is_text()
    })
    .map(|(_, span)| span);

    let equals = filter::<TokenLocation, _, ParserError>(|(token, _): &TokenLocation| {
        matches!(token, Token::Equals)
    })
    .ignored();

    // A value runs until the next whitespace, so `a=b=c` keeps `b=c` whole
    let value = filter::<TokenLocation, _, ParserError>(|(token, _): &TokenLocation| {
        !token.is_whitespace()
    })
    .map(|(_, span)| span)
    .repeated()
    .at_least(1)
    .map(|segments: Vec<Range<usize>>| {
        let start = segments.first().map(|range| range.start).unwrap_or(0);
        let end = segments.last().map(|range| range.end).unwrap_or(start);
        start..end
    });

    let assignment = whitespace0
        .clone()
        .ignore_then(equals.clone())
        .ignore_then(whitespace0.clone().ignore_then(value.clone()).or_not());

    let keyed = key
        .then(assignment.or_not())
        .map(|(key, assigned)| (Some(key), assigned));

    let unkeyed = equals
        .ignore_then(whitespace0.clone().ignore_then(value).or_not())
        .map(|value| (None, Some(value)));

    let parameter = keyed.or(unkeyed).map(
        |(key, assigned): (Option<Range<usize>>, Option<Option<Range<usize>>>)| {
            let key = key.map(|range| source[range].to_string()).unwrap_or_default();
            let value = assigned.map(|value| {
                value
                    .map(|range| source[range].to_string())
                    .unwrap_or_default()
            });
            TagParameter { key, value }
        },
    );

    let parser = whitespace0
        .clone()
        .ignore_then(parameter.then_ignore(whitespace0).repeated())
        .then_ignore(end());

    let stream = Stream::from_iter(
        0..0,
        tokens
            .iter()
            .cloned()
            .map(|(token, span)| ((token, span.clone()), span)),
    );

    parser.parse(stream).unwrap_or_default()
}

/// Read a real number the forgiving way: leading numeric prefix, or 0.
pub fn lenient_real(value: &str) -> f32 {
    let value = value.trim();
    if let Ok(number) = value.parse::<f32>() {
        if number.is_finite() {
            return number;
        }
    }
    LEADING_REAL
        .find(value)
        .and_then(|prefix| prefix.as_str().parse::<f32>().ok())
        .filter(|number| number.is_finite())
        .unwrap_or(0.0)
}
