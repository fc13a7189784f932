//! Documents, sections and the literal attributes that decorate them.

use pq_lexer::TokenKind;
use pq_lexer::token_sets::IDENTIFIERS;

use crate::ast::{NodeData, NodeId, NodeKind};
use crate::error::ParseErrorKind;
use crate::parser::{DocumentKind, Parser};
use crate::{Error, Result};

impl Parser<'_> {
    /// A section document when the input opens with `section`; otherwise an
    /// expression document, falling back to a section document.
    ///
    /// When both fail, the error that got further wins. On a tie the expression
    /// error is reported together with the nodes that attempt built.
    pub(crate) fn read_document(&mut self) -> Result<(NodeId, DocumentKind)> {
        let _span = self.enter("Document")?;
        if self.is_on(TokenKind::KwSection) {
            return Ok((self.read_section_document()?, DocumentKind::Section));
        }

        let checkpoint = self.checkpoint();
        let expression_error = match self.read_expression_document() {
            Ok(root) => return Ok((root, DocumentKind::Expression)),
            Err(Error::Parse(error)) => error,
            Err(other) => return Err(other),
        };
        let expression_state = self.state.clone();
        self.restore(checkpoint);

        match self.read_section_document() {
            Ok(root) => Ok((root, DocumentKind::Section)),
            Err(Error::Parse(section_error))
                if section_error.token_index > expression_error.token_index =>
            {
                Err(section_error.into())
            }
            Err(Error::Parse(_)) => {
                self.state = expression_state;
                Err(expression_error.into())
            }
            Err(other) => Err(other),
        }
    }

    /// One expression, and nothing after it.
    pub(crate) fn read_expression_document(&mut self) -> Result<NodeId> {
        let root = self.read_expression()?;
        if !self.eof() {
            let mut error = self.parse_error(ParseErrorKind::UnusedTokensRemain);
            let snapshot = self.state.snapshot;
            error.range = snapshot.span_of(self.state.token_index, snapshot.len());
            return Err(error.into());
        }
        Ok(root)
    }

    /// [literal-attributes] `section` [name] `;` {section-member}
    pub(crate) fn read_section_document(&mut self) -> Result<NodeId> {
        let _span = self.enter("Section")?;
        let id = self.start_context(NodeKind::Section);
        let literal_attributes = self.maybe_read_literal_attributes()?;
        let section_constant = self.read_token_constant(TokenKind::KwSection)?;
        let name = if self.is_on_any(IDENTIFIERS) {
            Some(self.read_identifier()?)
        } else {
            None
        };
        let semicolon = self.read_token_constant(TokenKind::Semicolon)?;

        let members_id = self.start_context(NodeKind::ArrayWrapper);
        let mut members = Vec::new();
        while !self.eof() {
            members.push(self.read_section_member()?);
        }
        self.end_context(members_id, NodeData::Array { elements: members });

        Ok(self.end_context(
            id,
            NodeData::Section {
                literal_attributes,
                section_constant,
                name,
                semicolon,
                members: members_id,
            },
        ))
    }

    /// [literal-attributes] [`shared`] identifier `=` expression `;`
    fn read_section_member(&mut self) -> Result<NodeId> {
        let _span = self.enter("SectionMember")?;
        let id = self.start_context(NodeKind::SectionMember);
        let literal_attributes = self.maybe_read_literal_attributes()?;
        let shared = self.maybe_read_token_constant(TokenKind::KwShared);
        let name_pairing = self.read_identifier_paired_expression()?;
        let semicolon = self.read_token_constant(TokenKind::Semicolon)?;
        Ok(self.end_context(
            id,
            NodeData::SectionMember {
                literal_attributes,
                shared,
                name_pairing,
                semicolon,
            },
        ))
    }

    fn maybe_read_literal_attributes(&mut self) -> Result<Option<NodeId>> {
        if !self.is_on(TokenKind::BracketOpen) {
            return Ok(None);
        }
        self.read_record_literal().map(Some)
    }

    /// `[` generalized-identifier `=` any-literal {`,` ...} `]`
    fn read_record_literal(&mut self) -> Result<NodeId> {
        let _span = self.enter("RecordLiteral")?;
        self.read_wrapped_csv(
            NodeKind::RecordLiteral,
            TokenKind::BracketOpen,
            Self::read_generalized_identifier_paired_any_literal,
        )
    }

    fn read_generalized_identifier_paired_any_literal(&mut self) -> Result<NodeId> {
        let _span = self.enter("GeneralizedIdentifierPairedAnyLiteral")?;
        let id = self.start_context(NodeKind::GeneralizedIdentifierPairedAnyLiteral);
        let key = self.read_generalized_identifier()?;
        let equal = self.read_token_constant(TokenKind::Equal)?;
        let value = self.read_any_literal()?;
        Ok(self.end_context(id, NodeData::KeyValue { key, equal, value }))
    }

    fn read_list_literal(&mut self) -> Result<NodeId> {
        let _span = self.enter("ListLiteral")?;
        self.read_wrapped_csv(
            NodeKind::ListLiteral,
            TokenKind::BraceOpen,
            Self::read_any_literal,
        )
    }

    /// record-literal | list-literal | literal
    fn read_any_literal(&mut self) -> Result<NodeId> {
        let _span = self.enter("AnyLiteral")?;
        match self.current_kind() {
            Some(TokenKind::BracketOpen) => self.read_record_literal(),
            Some(TokenKind::BraceOpen) => self.read_list_literal(),
            _ => self.read_literal_expression(),
        }
    }
}
