//! Identifiers, generalized identifiers and literals.

use pq_lexer::TokenKind;
use pq_lexer::token_sets::{IDENTIFIERS, KEYWORD_IDENTIFIERS, LITERALS};
use rowan::TextRange;

use crate::ast::{LiteralKind, NodeData, NodeId, NodeKind};
use crate::error::ParseErrorKind;
use crate::parser::Parser;
use crate::{Error, Result};

impl Parser<'_> {
    /// A plain or quoted identifier. Quoted identifiers keep their `#"..."` spelling.
    pub(crate) fn read_identifier(&mut self) -> Result<NodeId> {
        if !self.is_on_any(IDENTIFIERS) {
            return Err(self.expected(TokenKind::Identifier));
        }
        Ok(self.read_identifier_leaf())
    }

    fn read_identifier_leaf(&mut self) -> NodeId {
        let literal = self.current_text().unwrap_or_default().to_string();
        let id = self.start_context(NodeKind::Identifier);
        self.bump();
        self.end_context(id, NodeData::Identifier { literal })
    }

    /// [`@`] identifier, or a `#`-keyword such as `#date`.
    pub(crate) fn read_identifier_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("IdentifierExpression")?;
        let id = self.start_context(NodeKind::IdentifierExpression);
        let inclusive = self.maybe_read_token_constant(TokenKind::AtSign);
        let identifier = if inclusive.is_none() && self.is_on_any(KEYWORD_IDENTIFIERS) {
            self.read_identifier_leaf()
        } else {
            self.read_identifier()?
        };
        Ok(self.end_context(
            id,
            NodeData::IdentifierExpression {
                inclusive,
                identifier,
            },
        ))
    }

    /// identifier `=` expression
    pub(crate) fn read_identifier_paired_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("IdentifierPairedExpression")?;
        let id = self.start_context(NodeKind::IdentifierPairedExpression);
        let key = self.read_identifier()?;
        let equal = self.read_token_constant(TokenKind::Equal)?;
        let value = self.read_expression()?;
        Ok(self.end_context(id, NodeData::KeyValue { key, equal, value }))
    }

    /// generalized-identifier `=` expression
    pub(crate) fn read_generalized_identifier_paired_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("GeneralizedIdentifierPairedExpression")?;
        let id = self.start_context(NodeKind::GeneralizedIdentifierPairedExpression);
        let key = self.read_generalized_identifier()?;
        let equal = self.read_token_constant(TokenKind::Equal)?;
        let value = self.read_expression()?;
        Ok(self.end_context(id, NodeData::KeyValue { key, equal, value }))
    }

    /// A field name: one quoted identifier, or a run of identifier, keyword and
    /// number tokens spelled with single spaces (`Unit Price`, `1st Quarter`, `type`).
    pub(crate) fn read_generalized_identifier(&mut self) -> Result<NodeId> {
        let _span = self.enter("GeneralizedIdentifier")?;
        let start = self.state.token_index;
        let id = self.start_context(NodeKind::GeneralizedIdentifier);

        if self.is_on(TokenKind::QuotedIdentifier) {
            self.bump();
        } else {
            while self
                .current_kind()
                .is_some_and(is_generalized_identifier_part)
            {
                self.bump();
            }
        }

        let end = self.state.token_index;
        if start == end {
            return Err(self.error(ParseErrorKind::ExpectedGeneralizedIdentifier));
        }

        let range = self.state.snapshot.span_of(start, end);
        let literal = &self.source()[range];
        if !self.is_on_quoted(start) && !is_valid_generalized_identifier(literal) {
            return Err(self.invalid_generalized_identifier(start, range));
        }

        let literal = literal.to_string();
        Ok(self.end_context(id, NodeData::GeneralizedIdentifier { literal }))
    }

    fn is_on_quoted(&self, index: usize) -> bool {
        self.state.snapshot.kind(index) == Some(TokenKind::QuotedIdentifier)
    }

    fn invalid_generalized_identifier(&self, start: usize, range: TextRange) -> Error {
        let mut error = self.parse_error_at(ParseErrorKind::InvalidGeneralizedIdentifier, start);
        error.range = range;
        error.into()
    }

    pub(crate) fn read_literal_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("LiteralExpression")?;
        let Some(kind) = self.current_kind().and_then(LiteralKind::from_token) else {
            return Err(self.expected_any(LITERALS));
        };
        let literal = self.current_text().unwrap_or_default().to_string();
        let id = self.start_context(NodeKind::LiteralExpression);
        self.bump();
        Ok(self.end_context(id, NodeData::Literal { literal, kind }))
    }
}

fn is_generalized_identifier_part(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Identifier | TokenKind::NumericLiteral) || kind.is_keyword()
}

/// Words separated by single spaces. Each word may open with one digit, followed by
/// dot-separated segments that start with a letter or `_`.
fn is_valid_generalized_identifier(text: &str) -> bool {
    !text.is_empty() && text.split(' ').all(is_valid_word)
}

fn is_valid_word(word: &str) -> bool {
    let rest = word
        .strip_prefix(|c: char| c.is_ascii_digit())
        .unwrap_or(word);
    !rest.is_empty()
        && rest.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        })
}
