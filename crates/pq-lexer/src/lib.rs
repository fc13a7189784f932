//! Tokenizer for the Power Query M formula language.
//!
//! # Example
//!
//! ```
//! use pq_lexer::{TokenKind, lex};
//!
//! let snapshot = lex("let x = 1 in x // done");
//! assert_eq!(snapshot.kind(0), Some(TokenKind::KwLet));
//! assert_eq!(snapshot.text(1), Some("x"));
//! assert_eq!(snapshot.comments().len(), 1);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod kind;
mod lexer;

#[cfg(test)]
mod lexer_tests;

pub use kind::{TokenKind, TokenSet, token_sets};
pub use lexer::{LexerSnapshot, Token, lex, serialize_text_range, token_text};
