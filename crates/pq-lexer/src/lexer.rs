//! Lexer for the M formula language.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Trivia
//!
//! Whitespace and newlines are dropped. Comments are kept aside in the snapshot so
//! tooling can recover them, but the parser only ever sees significant tokens: a token's
//! index in [`LexerSnapshot::tokens`] is its token index.
//!
//! ## Error handling
//!
//! Consecutive unrecognized characters are coalesced into a single `Garbage` token
//! rather than one error per character. Unterminated text literals end up as garbage too.

use logos::Logos;
use rowan::{TextRange, TextSize};
use serde::{Serialize, Serializer};
use std::ops::Range;

use crate::kind::TokenKind;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(serialize_with = "serialize_text_range")]
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// Serializes a [`TextRange`] as `{ "start": .., "end": .. }`.
pub fn serialize_text_range<S: Serializer>(range: &TextRange, s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeStruct;
    let mut state = s.serialize_struct("TextRange", 2)?;
    state.serialize_field("start", &u32::from(range.start()))?;
    state.serialize_field("end", &u32::from(range.end()))?;
    state.end()
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Immutable result of lexing one source text.
#[derive(Debug, Clone)]
pub struct LexerSnapshot<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    comments: Vec<Token>,
}

impl<'src> LexerSnapshot<'src> {
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Significant tokens in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments(&self) -> &[Token] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn kind(&self, index: usize) -> Option<TokenKind> {
        self.tokens.get(index).map(|t| t.kind)
    }

    pub fn text(&self, index: usize) -> Option<&'src str> {
        self.tokens.get(index).map(|t| token_text(self.source, t))
    }

    /// Offset where the token at `index` starts, or end of source past the last token.
    pub fn offset_of(&self, index: usize) -> TextSize {
        self.tokens
            .get(index)
            .map_or_else(|| self.eof_offset(), |t| t.span.start())
    }

    pub fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    /// Source range covered by the half-open token range `start..end`.
    ///
    /// An empty token range maps to an empty text range at the next token.
    pub fn span_of(&self, start: usize, end: usize) -> TextRange {
        if start >= end {
            return TextRange::empty(self.offset_of(start));
        }
        let first = self.offset_of(start);
        let last = self
            .tokens
            .get(end - 1)
            .map_or_else(|| self.eof_offset(), |t| t.span.end());
        TextRange::new(first, last)
    }
}

/// Tokenizes source, separating trivia from significant tokens.
///
/// Post-processes the Logos output:
/// - Coalesces consecutive lexer errors into single `Garbage` tokens
/// - Drops whitespace, keeps comments aside
pub fn lex(source: &str) -> LexerSnapshot<'_> {
    let mut tokens = Vec::new();
    let mut comments = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }

                let token = Token::new(kind, range_to_text_range(lexer.span()));
                if kind.is_comment() {
                    comments.push(token);
                } else if !kind.is_trivia() {
                    tokens.push(token);
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    LexerSnapshot {
        source,
        tokens,
        comments,
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
