//! Binary-operator expressions, one layer per precedence level.
//!
//! Each layer opens a context before reading its left operand and dissolves it
//! again when no operator of its own follows, so a lone operand is never wrapped.
//! The arithmetic, relational and equality operators share one layer: its operands
//! are read flat and folded with an operator stack, which splits at the loosest
//! operator (rightmost among equals) without recursing on the length of the chain.
//!
//! The layer readers double as the combiner's fallbacks, which replay them on an
//! operand that failed validation.

use pq_lexer::token_sets::TRIO_OPERATORS;
use pq_lexer::{TokenKind, TokenSet};

use crate::Result;
use crate::ast::{BinaryOperator, NodeData, NodeId, NodeKind};
use crate::parser::Parser;
use crate::settings::Strategy;

impl<'a> Parser<'a> {
    /// Entry point for everything from `??` down to unary expressions.
    pub(crate) fn read_null_coalescing_expression(&mut self) -> Result<NodeId> {
        match self.strategy() {
            Strategy::Naive => self.read_naive_null_coalescing_expression(),
            Strategy::Combinatorial => self.read_combined_binary_expression(),
        }
    }

    /// logical-or-expression [`??` null-coalescing-expression]
    fn read_naive_null_coalescing_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("NullCoalescingExpression")?;
        let id = self.start_context(NodeKind::NullCoalescingExpression);
        let left = self.read_logical_expression()?;
        if !self.is_on(TokenKind::NullCoalescingOperator) {
            self.dissolve_context(id);
            return Ok(left);
        }
        let operator = self.read_token_constant(TokenKind::NullCoalescingOperator)?;
        let right = self.read_null_coalescing_expression()?;
        Ok(self.end_context(
            id,
            NodeData::Binary {
                left,
                operator,
                right,
            },
        ))
    }

    /// logical-and-expression {`or` logical-and-expression}
    pub(crate) fn read_logical_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("LogicalOrExpression")?;
        self.read_left_associative(
            NodeKind::LogicalExpression,
            TokenSet::single(TokenKind::KwOr),
            Self::read_logical_and_expression,
            Self::read_logical_and_expression,
        )
    }

    fn read_logical_and_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("LogicalAndExpression")?;
        self.read_left_associative(
            NodeKind::LogicalExpression,
            TokenSet::single(TokenKind::KwAnd),
            Self::read_is_expression,
            Self::read_is_expression,
        )
    }

    /// as-expression {`is` nullable-primitive-type}
    pub(crate) fn read_is_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("IsExpression")?;
        self.read_left_associative(
            NodeKind::IsExpression,
            TokenSet::single(TokenKind::KwIs),
            Self::read_as_expression,
            Self::read_nullable_primitive_type,
        )
    }

    /// equality-expression [`as` nullable-primitive-type]
    fn read_as_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("AsExpression")?;
        let id = self.start_context(NodeKind::AsExpression);
        let left = self.read_equality_expression()?;
        if !self.is_on(TokenKind::KwAs) {
            self.dissolve_context(id);
            return Ok(left);
        }
        let operator = self.read_token_constant(TokenKind::KwAs)?;
        let right = self.read_nullable_primitive_type()?;
        Ok(self.end_context(
            id,
            NodeData::Binary {
                left,
                operator,
                right,
            },
        ))
    }

    /// metadata-expression {trio-operator metadata-expression}, built by precedence.
    pub(crate) fn read_equality_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("EqualityExpression")?;
        let id = self.start_context(NodeKind::EqualityExpression);
        let mut operands = vec![self.read_metadata_expression()?];
        let mut operators = Vec::new();
        while let Some(token) = self.current_operator_in(TRIO_OPERATORS) {
            let Some(operator) = BinaryOperator::from_token(token) else {
                break;
            };
            operators.push((operator, self.read_token_constant(token)?));
            operands.push(self.read_metadata_expression()?);
        }

        self.state.registry.detach_children(id);
        let node = self.fold_by_precedence(&operands, &operators);
        self.state.registry.attach_child(id, node);
        self.dissolve_context(id);
        Ok(node)
    }

    /// Folds detached operands and operators into one detached node.
    ///
    /// An operator reduces every pending operator that binds at least as tightly, so
    /// equal precedences associate to the left.
    fn fold_by_precedence(
        &mut self,
        operands: &[NodeId],
        operators: &[(BinaryOperator, NodeId)],
    ) -> NodeId {
        let mut values = vec![operands[0]];
        let mut pending: Vec<(BinaryOperator, NodeId)> = Vec::with_capacity(operators.len());

        for (&(kind, operator), &operand) in operators.iter().zip(&operands[1..]) {
            while let Some(&(top, _)) = pending.last()
                && top.precedence() >= kind.precedence()
            {
                self.reduce_pending(&mut values, &mut pending);
            }
            pending.push((kind, operator));
            values.push(operand);
        }
        while !pending.is_empty() {
            self.reduce_pending(&mut values, &mut pending);
        }
        values[0]
    }

    fn reduce_pending(
        &mut self,
        values: &mut Vec<NodeId>,
        pending: &mut Vec<(BinaryOperator, NodeId)>,
    ) {
        let Some((kind, operator)) = pending.pop() else {
            return;
        };
        let (Some(right), Some(left)) = (values.pop(), values.pop()) else {
            return;
        };
        let node = self.join_binary(kind.node_kind(), left, operator, right);
        values.push(node);
    }

    /// unary-expression [`meta` unary-expression]
    pub(crate) fn read_metadata_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("MetadataExpression")?;
        let id = self.start_context(NodeKind::MetadataExpression);
        let left = self.read_unary_expression()?;
        if !self.is_on(TokenKind::KwMeta) {
            self.dissolve_context(id);
            return Ok(left);
        }
        let operator = self.read_token_constant(TokenKind::KwMeta)?;
        let right = self.read_unary_expression()?;
        Ok(self.end_context(
            id,
            NodeData::Binary {
                left,
                operator,
                right,
            },
        ))
    }

    /// left {operator right}, folded to the left.
    fn read_left_associative(
        &mut self,
        kind: NodeKind,
        operators: TokenSet,
        read_left: for<'p> fn(&'p mut Parser<'a>) -> Result<NodeId>,
        read_right: for<'p> fn(&'p mut Parser<'a>) -> Result<NodeId>,
    ) -> Result<NodeId> {
        let mut id = self.start_context(kind);
        let mut left = read_left(self)?;
        let Some(mut operator_kind) = self.current_operator_in(operators) else {
            self.dissolve_context(id);
            return Ok(left);
        };

        loop {
            let operator = self.read_token_constant(operator_kind)?;
            let right = read_right(self)?;
            let node = self.end_context(
                id,
                NodeData::Binary {
                    left,
                    operator,
                    right,
                },
            );
            match self.current_operator_in(operators) {
                Some(next) => {
                    operator_kind = next;
                    id = self.wrap_in_context(kind, &[node]);
                    left = node;
                }
                None => return Ok(node),
            }
        }
    }

    pub(crate) fn current_operator_in(&self, operators: TokenSet) -> Option<TokenKind> {
        self.current_kind().filter(|kind| operators.contains(*kind))
    }
}
