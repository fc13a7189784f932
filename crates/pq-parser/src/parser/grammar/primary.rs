use pq_lexer::TokenKind;
use pq_lexer::token_sets::{
    IDENTIFIERS, KEYWORD_IDENTIFIERS, LITERALS, PRIMARY_EXPRESSION_FIRST,
    RECURSIVE_PRIMARY_SUFFIXES, UNARY_OPERATORS,
};

use crate::Result;
use crate::ast::{NodeData, NodeId, NodeKind};
use crate::parser::Parser;

impl Parser<'_> {
    /// {`+` | `-` | `not`} type-expression
    pub(crate) fn read_unary_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("UnaryExpression")?;
        if !self.is_on_any(UNARY_OPERATORS) {
            return self.read_type_expression();
        }

        let id = self.start_context(NodeKind::UnaryExpression);
        let operators_id = self.start_context(NodeKind::ArrayWrapper);
        let mut operators = Vec::new();
        while let Some(kind) = self
            .current_kind()
            .filter(|kind| UNARY_OPERATORS.contains(*kind))
        {
            operators.push(self.read_token_constant(kind)?);
        }
        self.end_context(
            operators_id,
            NodeData::Array {
                elements: operators,
            },
        );

        let operand = self.read_type_expression()?;
        Ok(self.end_context(
            id,
            NodeData::Unary {
                operators: operators_id,
                operand,
            },
        ))
    }

    /// `type` primary-type | primary-expression
    fn read_type_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("TypeExpression")?;
        if !self.is_on(TokenKind::KwType) {
            return self.read_primary_expression();
        }
        let id = self.start_context(NodeKind::TypePrimaryType);
        let constant = self.read_token_constant(TokenKind::KwType)?;
        let paired = self.read_primary_type()?;
        Ok(self.end_context(id, NodeData::Pair { constant, paired }))
    }

    pub(crate) fn read_primary_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("PrimaryExpression")?;
        let head = match self.current_kind() {
            Some(kind) if IDENTIFIERS.contains(kind) || kind == TokenKind::AtSign => {
                self.read_identifier_expression()?
            }
            Some(kind) if KEYWORD_IDENTIFIERS.contains(kind) => self.read_identifier_expression()?,
            Some(kind) if LITERALS.contains(kind) => self.read_literal_expression()?,
            Some(TokenKind::ParenOpen) => self.read_parenthesized_expression()?,
            Some(TokenKind::BracketOpen) => self.read_bracket_disambiguated()?,
            Some(TokenKind::BraceOpen) => self.read_list_expression()?,
            Some(TokenKind::Ellipsis) => self.read_not_implemented_expression()?,
            _ => return Err(self.expected_any(PRIMARY_EXPRESSION_FIRST)),
        };

        if self.is_on_any(RECURSIVE_PRIMARY_SUFFIXES) {
            return self.read_recursive_primary_expression(head);
        }
        Ok(head)
    }

    /// head followed by item accesses, field accesses and invocations.
    fn read_recursive_primary_expression(&mut self, head: NodeId) -> Result<NodeId> {
        let _span = self.enter("RecursivePrimaryExpression")?;
        let id = self.wrap_in_context(NodeKind::RecursivePrimaryExpression, &[head]);
        let suffixes_id = self.start_context(NodeKind::ArrayWrapper);
        let mut suffixes = Vec::new();
        loop {
            let suffix = match self.current_kind() {
                Some(TokenKind::BraceOpen) => self.read_item_access_expression()?,
                Some(TokenKind::BracketOpen) if self.next_is(TokenKind::BracketOpen) => {
                    self.read_field_projection()?
                }
                Some(TokenKind::BracketOpen) => self.read_field_selector()?,
                Some(TokenKind::ParenOpen) => self.read_invoke_expression()?,
                _ => break,
            };
            suffixes.push(suffix);
        }
        self.end_context(suffixes_id, NodeData::Array { elements: suffixes });
        Ok(self.end_context(
            id,
            NodeData::RecursivePrimary {
                head,
                suffixes: suffixes_id,
            },
        ))
    }

    pub(crate) fn read_parenthesized_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("ParenthesizedExpression")?;
        self.read_wrapped(
            NodeKind::ParenthesizedExpression,
            TokenKind::ParenOpen,
            Self::read_expression,
            false,
        )
    }

    /// `{` expression `}` [`?`]
    fn read_item_access_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("ItemAccessExpression")?;
        self.read_wrapped(
            NodeKind::ItemAccessExpression,
            TokenKind::BraceOpen,
            Self::read_expression,
            true,
        )
    }

    fn read_invoke_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("InvokeExpression")?;
        self.read_wrapped_csv(
            NodeKind::InvokeExpression,
            TokenKind::ParenOpen,
            Self::read_expression,
        )
    }

    /// `[` generalized-identifier `]` [`?`]
    pub(crate) fn read_field_selector(&mut self) -> Result<NodeId> {
        self.read_field_selector_with(true)
    }

    fn read_field_selector_with(&mut self, allow_optional: bool) -> Result<NodeId> {
        let _span = self.enter("FieldSelector")?;
        self.read_wrapped(
            NodeKind::FieldSelector,
            TokenKind::BracketOpen,
            Self::read_generalized_identifier,
            allow_optional,
        )
    }

    /// `[` field-selector {`,` field-selector} `]` [`?`]
    pub(crate) fn read_field_projection(&mut self) -> Result<NodeId> {
        let _span = self.enter("FieldProjection")?;
        self.read_wrapped(
            NodeKind::FieldProjection,
            TokenKind::BracketOpen,
            |p| {
                p.read_csv_array(TokenKind::BracketClose, |p| {
                    p.read_field_selector_with(false)
                })
            },
            true,
        )
    }

    /// `[` generalized-identifier `=` expression {`,` ...} `]`
    pub(crate) fn read_record_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("RecordExpression")?;
        self.read_wrapped_csv(
            NodeKind::RecordExpression,
            TokenKind::BracketOpen,
            Self::read_generalized_identifier_paired_expression,
        )
    }

    fn read_list_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("ListExpression")?;
        self.read_wrapped_csv(
            NodeKind::ListExpression,
            TokenKind::BraceOpen,
            Self::read_list_item,
        )
    }

    /// expression [`..` expression]
    pub(crate) fn read_list_item(&mut self) -> Result<NodeId> {
        let _span = self.enter("ListItem")?;
        let id = self.start_context(NodeKind::RangeExpression);
        let left = self.read_expression()?;
        if !self.is_on(TokenKind::DotDot) {
            self.dissolve_context(id);
            return Ok(left);
        }
        let operator = self.read_token_constant(TokenKind::DotDot)?;
        let right = self.read_expression()?;
        Ok(self.end_context(
            id,
            NodeData::Binary {
                left,
                operator,
                right,
            },
        ))
    }

    /// `...`
    fn read_not_implemented_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("NotImplementedExpression")?;
        let id = self.start_context(NodeKind::NotImplementedExpression);
        let ellipsis = self.read_token_constant(TokenKind::Ellipsis)?;
        Ok(self.end_context(id, NodeData::NotImplemented { ellipsis }))
    }
}
