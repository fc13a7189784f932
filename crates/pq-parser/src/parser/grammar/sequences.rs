//! Comma-separated sequences and delimited content.

use pq_lexer::TokenKind;
use pq_lexer::token_sets::IDENTIFIERS;

use crate::ast::{NodeData, NodeId, NodeKind};
use crate::error::{CsvContinuationKind, ParseErrorKind, closer_of};
use crate::parser::Parser;
use crate::{Error, Result};

impl Parser<'_> {
    /// `open` content `close` [`?`]
    pub(crate) fn read_wrapped(
        &mut self,
        kind: NodeKind,
        open: TokenKind,
        read_content: impl FnOnce(&mut Self) -> Result<NodeId>,
        allow_optional: bool,
    ) -> Result<NodeId> {
        let id = self.start_context(kind);
        let opener = self.state.token_index;
        let open = self.read_token_constant(open)?;
        let content = read_content(self)?;
        let close = self.read_closing(opener)?;
        let optional = if allow_optional {
            self.maybe_read_token_constant(TokenKind::QuestionMark)
        } else {
            None
        };
        Ok(self.end_context(
            id,
            NodeData::Wrapped {
                open,
                content,
                close,
                optional,
            },
        ))
    }

    /// `open` item {`,` item} `close`, possibly empty.
    pub(crate) fn read_wrapped_csv(
        &mut self,
        kind: NodeKind,
        open: TokenKind,
        read_item: impl FnMut(&mut Self) -> Result<NodeId>,
    ) -> Result<NodeId> {
        let close = closer_of(open).unwrap_or(open);
        self.read_wrapped(
            kind,
            open,
            move |p| p.read_csv_array(close, read_item),
            false,
        )
    }

    /// Items up to (not including) `close`. A `,` right before `close` is an error.
    pub(crate) fn read_csv_array(
        &mut self,
        close: TokenKind,
        mut read_item: impl FnMut(&mut Self) -> Result<NodeId>,
    ) -> Result<NodeId> {
        let id = self.start_context(NodeKind::ArrayWrapper);
        let mut elements = Vec::new();
        if !self.eof() && !self.is_on(close) {
            loop {
                let (csv, has_comma) = self.read_csv(&mut read_item)?;
                elements.push(csv);
                if !has_comma {
                    break;
                }
                if self.is_on(close) {
                    return Err(self.dangling_comma_error());
                }
            }
        }
        Ok(self.end_context(id, NodeData::Array { elements }))
    }

    /// One item and the `,` after it, if any.
    pub(crate) fn read_csv(
        &mut self,
        read_item: &mut impl FnMut(&mut Self) -> Result<NodeId>,
    ) -> Result<(NodeId, bool)> {
        let id = self.start_context(NodeKind::Csv);
        let node = read_item(self)?;
        let comma = self.maybe_read_token_constant(TokenKind::Comma);
        let csv = self.end_context(id, NodeData::Csv { node, comma });
        Ok((csv, comma.is_some()))
    }

    /// Bindings of a `let`, up to `in`.
    ///
    /// A binding directly followed by `name =` is reported as a missing `,`
    /// rather than as an unexpected identifier.
    pub(crate) fn read_let_bindings(&mut self) -> Result<NodeId> {
        let _span = self.enter("LetBindings")?;
        let id = self.start_context(NodeKind::ArrayWrapper);
        let mut elements = Vec::new();
        loop {
            let (csv, has_comma) = self.read_csv(&mut Self::read_identifier_paired_expression)?;
            elements.push(csv);
            if !has_comma {
                if self.is_on_any(IDENTIFIERS) && self.next_is(TokenKind::Equal) {
                    return Err(self.error(ParseErrorKind::ExpectedCsvContinuation {
                        continuation: CsvContinuationKind::LetExpression,
                    }));
                }
                break;
            }
            if self.is_on(TokenKind::KwIn) {
                return Err(self.dangling_comma_error());
            }
        }
        Ok(self.end_context(id, NodeData::Array { elements }))
    }

    pub(crate) fn dangling_comma_error(&self) -> Error {
        self.error(ParseErrorKind::ExpectedCsvContinuation {
            continuation: CsvContinuationKind::DanglingComma,
        })
    }

    /// The nodes inside the `Csv` wrappers of a finished array.
    pub(crate) fn csv_elements(&self, array: NodeId) -> Vec<NodeId> {
        let NodeData::Array { elements } = &self.ast(array).data else {
            return Vec::new();
        };
        elements
            .iter()
            .filter_map(|csv| match self.ast(*csv).data {
                NodeData::Csv { node, .. } => Some(node),
                _ => None,
            })
            .collect()
    }
}
