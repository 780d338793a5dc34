//! Base tokenization for tag bodies
//!
//! This is where a tag body string becomes a token stream. The parser works on the spans, so
//! the text of a `Text` token is always recovered from the source.

use crate::texttag::lexing::tokens::Token;
use logos::Logos;

/// Tokenize a tag body, dropping locations
pub fn tokenize(source: &str) -> Vec<Token> {
    Token::lexer(source)
        .filter_map(|result| result.ok())
        .collect()
}

/// Tokenize a tag body, keeping the byte span of every token
pub fn tokenize_with_spans(source: &str) -> Vec<(Token, logos::Span)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}
