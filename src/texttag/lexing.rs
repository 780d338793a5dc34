//! Tag body lexer
//!
//!     The body of a tag, once the brackets, the closing slash and the curve name are gone, is a
//!     list of `KEY=VALUE` parameters. Tokenization is done by logos; grouping the tokens into
//!     parameters is left to the parser in [tag_info](crate::texttag::tag_info).
//!
//!     Only three tokens exist: runs of whitespace, `=`, and runs of anything else. Keeping `=`
//!     as its own token is what lets the parser glue `KEY = VALUE` (spaces around a bare `=`)
//!     back into a single parameter.

pub mod base_tokenization;
pub mod tokens;

pub use base_tokenization::{tokenize, tokenize_with_spans};
pub use tokens::Token;
