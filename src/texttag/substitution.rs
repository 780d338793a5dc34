//! Marker substitution
//!
//!     Two passes replace things in the working text by positional markers (see
//!     [markers](crate::texttag::markers)):
//!
//!         1. [tags]: every `[...]` tag becomes the marker of its entry in the tag list. An
//!            opening tag and the closing tag matched to it share one marker.
//!         2. [words]: every word of the externally supplied word list becomes the marker of
//!            its index in that list.
//!
//!     After both passes the relative order of tag and word markers is all that is needed to
//!     tell which words each tag covers.

pub mod tags;
pub mod words;

pub use tags::{strip_tag_text, substitute_tags, TagSubstitution};
pub use words::{substitute_words, WordSubstitution};
