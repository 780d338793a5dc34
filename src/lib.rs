//! # texttag
//!
//! A parser for curve tags embedded in dialogue text, and an aligner that maps every tag to the
//! range of recognized words it spans.
//!
//! File Layout
//!
//! The work is a chain of string rewrites. Each stage takes an immutable string (and, for the
//! later stages, the word list) and returns a new one, so every intermediate result can be
//! inspected and tested on its own:
//!
//! src/texttag
//!   ├── chunking       `<1.5>` timing markers -> chunk records + chunk-free text
//!   ├── filtering      allow-listed characters, tag brackets untouched
//!   ├── lexing         logos tokens for a tag body
//!   ├── tag_info       one `[...]` tag -> TagInfo
//!   ├── substitution   tags, then words, replaced by positional markers
//!   ├── skeleton       markers only
//!   ├── boundaries     tag markers -> start/end word indices
//!   └── pipeline       the stages above wired together
//!
//! Tag grammar:
//!
//!     [curvename TYPE=QUAD DURATION=1.0 TIMESHIFT=0 EASEIN=0.2 EASEOUT=0.2 V1=0 V2=1 V3=1 V4=0]
//!     ...
//!     [/curvename]
//!
//! Names containing spaces are quoted: `["brow raise" v2=0.5]`.

pub mod texttag;
