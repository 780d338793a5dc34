//! Token definitions for tag bodies
//!
//! The tokens are defined using the logos derive macro. Together they cover every character, so
//! lexing a tag body never fails.
use logos::Logos;

/// All possible tokens in a tag body
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Token {
    // Separates parameters
    #[regex(r"\s+")]
    Whitespace,

    // Binds a key to its value
    #[token("=")]
    Equals,

    // Keys and values (catch-all for everything else)
    #[regex(r"[^\s=]+")]
    Text,
}

impl Token {
    /// Check if this token is whitespace
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace)
    }

    /// Check if this token is text content
    pub fn is_text(&self) -> bool {
        matches!(self, Token::Text)
    }
}
