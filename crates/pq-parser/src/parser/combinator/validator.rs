//! What each binary operator accepts as operands, and how to re-read one that does not fit.

use crate::Result;
use crate::ast::{BinaryOperator, ConstantKind, NodeData, NodeId, NodeKind};
use crate::parser::Parser;

/// How tightly an operand is bound, loosest first.
///
/// Primitive types sit outside the scale: they only ever appear right of `as` and `is`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum OperandLevel {
    NullCoalescing,
    LogicalOr,
    LogicalAnd,
    Is,
    As,
    Trio,
    Metadata,
    Unary,
    NullablePrimitiveType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Requirement {
    /// The operand binds at least this tightly.
    AtLeast(OperandLevel),
    NullablePrimitiveType,
}

impl Requirement {
    pub(crate) fn accepts(self, level: OperandLevel) -> bool {
        match self {
            Requirement::AtLeast(_) if level == OperandLevel::NullablePrimitiveType => false,
            Requirement::AtLeast(minimum) => level >= minimum,
            Requirement::NullablePrimitiveType => level == OperandLevel::NullablePrimitiveType,
        }
    }
}

/// Naive layer reader that re-reads an operand from its first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fallback {
    Unary,
    Metadata,
    Equality,
    NullablePrimitiveType,
    Is,
    Logical,
}

impl Fallback {
    pub(crate) fn read(self, parser: &mut Parser<'_>) -> Result<NodeId> {
        match self {
            Fallback::Unary => parser.read_unary_expression(),
            Fallback::Metadata => parser.read_metadata_expression(),
            Fallback::Equality => parser.read_equality_expression(),
            Fallback::NullablePrimitiveType => parser.read_nullable_primitive_type(),
            Fallback::Is => parser.read_is_expression(),
            Fallback::Logical => parser.read_logical_expression(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Validator {
    pub left: Requirement,
    pub right: Requirement,
    pub left_fallback: Fallback,
    pub right_fallback: Fallback,
}

impl Validator {
    pub(crate) fn for_operator(operator: BinaryOperator) -> Self {
        use OperandLevel as L;
        use Requirement::{AtLeast, NullablePrimitiveType as Npt};

        let (left, right, left_fallback, right_fallback) = match operator {
            BinaryOperator::Metadata => (
                AtLeast(L::Unary),
                AtLeast(L::Unary),
                Fallback::Unary,
                Fallback::Unary,
            ),
            BinaryOperator::As => (
                AtLeast(L::Trio),
                Npt,
                Fallback::Equality,
                Fallback::NullablePrimitiveType,
            ),
            BinaryOperator::Is => (
                AtLeast(L::Is),
                Npt,
                Fallback::Logical,
                Fallback::NullablePrimitiveType,
            ),
            BinaryOperator::And => (
                AtLeast(L::LogicalOr),
                AtLeast(L::Is),
                Fallback::Is,
                Fallback::Is,
            ),
            BinaryOperator::Or => (
                AtLeast(L::LogicalOr),
                AtLeast(L::LogicalAnd),
                Fallback::Logical,
                Fallback::Logical,
            ),
            BinaryOperator::NullCoalescing => (
                AtLeast(L::LogicalOr),
                AtLeast(L::NullCoalescing),
                Fallback::Logical,
                Fallback::Logical,
            ),
            trio => {
                debug_assert!(trio.is_trio());
                (
                    AtLeast(L::Trio),
                    AtLeast(L::Trio),
                    Fallback::Metadata,
                    Fallback::Metadata,
                )
            }
        };

        Self {
            left,
            right,
            left_fallback,
            right_fallback,
        }
    }
}

impl Parser<'_> {
    pub(crate) fn operand_level(&self, id: NodeId) -> OperandLevel {
        let node = self.ast(id);
        match node.kind {
            NodeKind::NullCoalescingExpression => OperandLevel::NullCoalescing,
            NodeKind::LogicalExpression => match node.data {
                NodeData::Binary { operator, .. } if self.is_constant(operator, ConstantKind::Or) => {
                    OperandLevel::LogicalOr
                }
                _ => OperandLevel::LogicalAnd,
            },
            NodeKind::IsExpression => OperandLevel::Is,
            NodeKind::AsExpression => OperandLevel::As,
            NodeKind::ArithmeticExpression
            | NodeKind::RelationalExpression
            | NodeKind::EqualityExpression => OperandLevel::Trio,
            NodeKind::MetadataExpression => OperandLevel::Metadata,
            NodeKind::PrimitiveType | NodeKind::NullablePrimitiveType => {
                OperandLevel::NullablePrimitiveType
            }
            _ => OperandLevel::Unary,
        }
    }

    fn is_constant(&self, id: NodeId, constant: ConstantKind) -> bool {
        matches!(self.ast(id).data, NodeData::Constant { constant: c } if c == constant)
    }
}
