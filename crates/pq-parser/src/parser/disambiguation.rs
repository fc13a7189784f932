//! Choosing between readings of `(` and `[`.
//!
//! `(` opens either a function expression or a parenthesized expression; `[` opens
//! a record expression or a field selector. [`Disambiguation::Strict`] decides by
//! scanning tokens ahead. [`Disambiguation::Thorough`] tries each reading from a
//! checkpoint and keeps the first that succeeds.

use pq_lexer::TokenKind;

use super::core::Parser;
use crate::ast::NodeId;
use crate::settings::Disambiguation;
use crate::{Error, Result};

type Attempt<'a> = (&'static str, for<'p> fn(&'p mut Parser<'a>) -> Result<NodeId>);

impl<'a> Parser<'a> {
    /// `(` at the start of an expression.
    pub(super) fn read_parenthesis_disambiguated(&mut self) -> Result<NodeId> {
        match self.disambiguation() {
            Disambiguation::Strict if self.is_function_expression_ahead() => {
                self.read_function_expression()
            }
            Disambiguation::Strict => self.read_null_coalescing_expression(),
            Disambiguation::Thorough => self.read_first_of(&[
                ("FunctionExpression", Self::read_function_expression),
                ("NullCoalescingExpression", Self::read_null_coalescing_expression),
            ]),
        }
    }

    /// `[` at the start of a primary expression.
    pub(super) fn read_bracket_disambiguated(&mut self) -> Result<NodeId> {
        if self.next_is(TokenKind::BracketOpen) {
            return self.read_field_projection();
        }
        match self.disambiguation() {
            Disambiguation::Strict if self.is_record_expression_ahead() => {
                self.read_record_expression()
            }
            Disambiguation::Strict => self.read_field_selector(),
            Disambiguation::Thorough => self.read_first_of(&[
                ("RecordExpression", Self::read_record_expression),
                ("FieldSelector", Self::read_field_selector),
            ]),
        }
    }

    /// Tries each reading from the same starting point and keeps the first success.
    ///
    /// When every reading fails, the parse error that got furthest is reported;
    /// earlier attempts win ties. Errors other than parse errors end the search.
    fn read_first_of(&mut self, attempts: &[Attempt<'a>]) -> Result<NodeId> {
        let checkpoint = self.checkpoint();
        let mut furthest: Option<Error> = None;

        for (production, attempt) in attempts {
            match attempt(self) {
                Ok(id) => {
                    tracing::trace!(production, "disambiguated");
                    return Ok(id);
                }
                Err(error @ Error::Parse(_)) => {
                    self.restore(checkpoint);
                    furthest = match furthest {
                        Some(previous) if progress(&previous) >= progress(&error) => {
                            Some(previous)
                        }
                        _ => Some(error),
                    };
                }
                Err(other) => return Err(other),
            }
        }

        Err(furthest.unwrap_or_else(|| Error::Invariant("no readings to choose from".into())))
    }

    /// Looks past the matching `)` for `=>`, or for `as` [`nullable`] type `=>`.
    fn is_function_expression_ahead(&self) -> bool {
        let snapshot = self.state.snapshot;
        let Some(close) = self.matching_close(TokenKind::ParenOpen, TokenKind::ParenClose) else {
            return false;
        };

        let mut index = close + 1;
        match snapshot.kind(index) {
            Some(TokenKind::FatArrow) => true,
            Some(TokenKind::KwAs) => {
                index += 1;
                if snapshot.text(index) == Some("nullable") {
                    index += 1;
                }
                snapshot.kind(index + 1) == Some(TokenKind::FatArrow)
            }
            _ => false,
        }
    }

    /// `[]`, or an `=` at bracket depth zero before the matching `]`.
    fn is_record_expression_ahead(&self) -> bool {
        let snapshot = self.state.snapshot;
        let mut depth = 0usize;
        for index in self.state.token_index + 1..snapshot.len() {
            match snapshot.kind(index) {
                Some(TokenKind::BracketClose) if depth == 0 => {
                    return index == self.state.token_index + 1;
                }
                Some(TokenKind::Equal) if depth == 0 => return true,
                Some(
                    TokenKind::BracketOpen | TokenKind::ParenOpen | TokenKind::BraceOpen,
                ) => depth += 1,
                Some(
                    TokenKind::BracketClose | TokenKind::ParenClose | TokenKind::BraceClose,
                ) => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        false
    }

    /// Index of the token closing the `open` at the cursor.
    fn matching_close(&self, open: TokenKind, close: TokenKind) -> Option<usize> {
        let snapshot = self.state.snapshot;
        let mut depth = 0usize;
        for index in self.state.token_index..snapshot.len() {
            match snapshot.kind(index) {
                Some(kind) if kind == open => depth += 1,
                Some(kind) if kind == close => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(index);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

fn progress(error: &Error) -> usize {
    error.as_parse_error().map_or(0, |error| error.token_index)
}
