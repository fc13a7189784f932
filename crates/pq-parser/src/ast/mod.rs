//! Finished syntax nodes.
//!
//! Nodes never own their children: every edge is a [`NodeId`] into the
//! [`NodeRegistry`](crate::registry::NodeRegistry) that produced them. `NodeData` records the
//! kind-specific role of each child (left/operator/right, key/value, ...) in the same
//! order the registry lists them.

mod constants;

pub use constants::{BinaryOperator, ConstantKind, LiteralKind, PrimitiveTypeKind};

use rowan::TextRange;
use serde::Serialize;

use pq_lexer::serialize_text_range;

/// Identity of a node, stable from the moment its context opens through promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NodeKind {
    ArithmeticExpression,
    ArrayWrapper,
    AsExpression,
    AsNullablePrimitiveType,
    AsType,
    CatchExpression,
    Constant,
    Csv,
    EachExpression,
    EqualityExpression,
    ErrorHandlingExpression,
    ErrorRaisingExpression,
    FieldProjection,
    FieldSelector,
    FieldSpecification,
    FieldSpecificationList,
    FieldTypeSpecification,
    FunctionExpression,
    FunctionType,
    GeneralizedIdentifier,
    GeneralizedIdentifierPairedAnyLiteral,
    GeneralizedIdentifierPairedExpression,
    Identifier,
    IdentifierExpression,
    IdentifierPairedExpression,
    IfExpression,
    InvokeExpression,
    IsExpression,
    ItemAccessExpression,
    LetExpression,
    ListExpression,
    ListLiteral,
    ListType,
    LiteralExpression,
    LogicalExpression,
    MetadataExpression,
    NotImplementedExpression,
    NullCoalescingExpression,
    NullablePrimitiveType,
    NullableType,
    OtherwiseExpression,
    Parameter,
    ParameterList,
    ParenthesizedExpression,
    PrimitiveType,
    RangeExpression,
    RecordExpression,
    RecordLiteral,
    RecordType,
    RecursivePrimaryExpression,
    RelationalExpression,
    Section,
    SectionMember,
    TableType,
    TypePrimaryType,
    UnaryExpression,
}

impl NodeKind {
    /// Kinds produced by a binary operator.
    pub fn is_binary_operator_expression(self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            ArithmeticExpression
                | AsExpression
                | EqualityExpression
                | IsExpression
                | LogicalExpression
                | MetadataExpression
                | NullCoalescingExpression
                | RelationalExpression
        )
    }

    pub fn is_leaf(self) -> bool {
        use NodeKind::*;
        matches!(
            self,
            Constant | GeneralizedIdentifier | Identifier | LiteralExpression | PrimitiveType
        )
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Half-open range of token indices, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

impl TokenRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A finished, immutable node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AstNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub tokens: TokenRange,
    #[serde(serialize_with = "serialize_text_range")]
    pub span: TextRange,
    pub is_leaf: bool,
    pub data: NodeData,
}

/// Kind-specific payload of an [`AstNode`].
///
/// Several node kinds share a shape; the kind tag on the node disambiguates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeData {
    Constant {
        constant: ConstantKind,
    },
    Identifier {
        literal: String,
    },
    GeneralizedIdentifier {
        literal: String,
    },
    Literal {
        literal: String,
        kind: LiteralKind,
    },
    PrimitiveType {
        primitive: PrimitiveTypeKind,
    },
    /// Binary operator expressions and `a..b` ranges.
    Binary {
        left: NodeId,
        operator: NodeId,
        right: NodeId,
    },
    /// A leading constant and what it introduces: `each x`, `as number`, `nullable text`.
    Pair {
        constant: NodeId,
        paired: NodeId,
    },
    /// `key = value`
    KeyValue {
        key: NodeId,
        equal: NodeId,
        value: NodeId,
    },
    /// Content between a pair of delimiters, optionally followed by `?`.
    Wrapped {
        open: NodeId,
        content: NodeId,
        close: NodeId,
        optional: Option<NodeId>,
    },
    Array {
        elements: Vec<NodeId>,
    },
    Csv {
        node: NodeId,
        comma: Option<NodeId>,
    },
    ErrorHandling {
        try_constant: NodeId,
        protected: NodeId,
        handler: Option<NodeId>,
    },
    FieldSpecification {
        optional: Option<NodeId>,
        name: NodeId,
        field_type: Option<NodeId>,
    },
    FieldSpecificationList {
        open: NodeId,
        content: NodeId,
        open_record_marker: Option<NodeId>,
        close: NodeId,
    },
    FunctionExpression {
        parameters: NodeId,
        return_type: Option<NodeId>,
        fat_arrow: NodeId,
        body: NodeId,
    },
    FunctionType {
        function_constant: NodeId,
        parameters: NodeId,
        return_type: NodeId,
    },
    IdentifierExpression {
        inclusive: Option<NodeId>,
        identifier: NodeId,
    },
    If {
        if_constant: NodeId,
        condition: NodeId,
        then_constant: NodeId,
        true_expression: NodeId,
        else_constant: NodeId,
        false_expression: NodeId,
    },
    Let {
        let_constant: NodeId,
        bindings: NodeId,
        in_constant: NodeId,
        expression: NodeId,
    },
    Parameter {
        optional: Option<NodeId>,
        name: NodeId,
        parameter_type: Option<NodeId>,
    },
    RecordType {
        fields: NodeId,
    },
    RecursivePrimary {
        head: NodeId,
        suffixes: NodeId,
    },
    Section {
        literal_attributes: Option<NodeId>,
        section_constant: NodeId,
        name: Option<NodeId>,
        semicolon: NodeId,
        members: NodeId,
    },
    SectionMember {
        literal_attributes: Option<NodeId>,
        shared: Option<NodeId>,
        name_pairing: NodeId,
        semicolon: NodeId,
    },
    TableType {
        table_constant: NodeId,
        row_type: NodeId,
    },
    Unary {
        operators: NodeId,
        operand: NodeId,
    },
    NotImplemented {
        ellipsis: NodeId,
    },
}

impl NodeData {
    /// Child ids in source order.
    pub fn children(&self) -> Vec<NodeId> {
        use NodeData::*;
        match self {
            Constant { .. }
            | Identifier { .. }
            | GeneralizedIdentifier { .. }
            | Literal { .. }
            | PrimitiveType { .. } => Vec::new(),
            Binary {
                left,
                operator,
                right,
            } => vec![*left, *operator, *right],
            Pair { constant, paired } => vec![*constant, *paired],
            KeyValue { key, equal, value } => vec![*key, *equal, *value],
            Wrapped {
                open,
                content,
                close,
                optional,
            } => collect([Some(*open), Some(*content), Some(*close), *optional]),
            Array { elements } => elements.clone(),
            Csv { node, comma } => collect([Some(*node), *comma]),
            ErrorHandling {
                try_constant,
                protected,
                handler,
            } => collect([Some(*try_constant), Some(*protected), *handler]),
            FieldSpecification {
                optional,
                name,
                field_type,
            } => collect([*optional, Some(*name), *field_type]),
            FieldSpecificationList {
                open,
                content,
                open_record_marker,
                close,
            } => collect([Some(*open), Some(*content), *open_record_marker, Some(*close)]),
            FunctionExpression {
                parameters,
                return_type,
                fat_arrow,
                body,
            } => collect([Some(*parameters), *return_type, Some(*fat_arrow), Some(*body)]),
            FunctionType {
                function_constant,
                parameters,
                return_type,
            } => vec![*function_constant, *parameters, *return_type],
            IdentifierExpression {
                inclusive,
                identifier,
            } => collect([*inclusive, Some(*identifier)]),
            If {
                if_constant,
                condition,
                then_constant,
                true_expression,
                else_constant,
                false_expression,
            } => vec![
                *if_constant,
                *condition,
                *then_constant,
                *true_expression,
                *else_constant,
                *false_expression,
            ],
            Let {
                let_constant,
                bindings,
                in_constant,
                expression,
            } => vec![*let_constant, *bindings, *in_constant, *expression],
            Parameter {
                optional,
                name,
                parameter_type,
            } => collect([*optional, Some(*name), *parameter_type]),
            RecordType { fields } => vec![*fields],
            RecursivePrimary { head, suffixes } => vec![*head, *suffixes],
            Section {
                literal_attributes,
                section_constant,
                name,
                semicolon,
                members,
            } => collect([
                *literal_attributes,
                Some(*section_constant),
                *name,
                Some(*semicolon),
                Some(*members),
            ]),
            SectionMember {
                literal_attributes,
                shared,
                name_pairing,
                semicolon,
            } => collect([
                *literal_attributes,
                *shared,
                Some(*name_pairing),
                Some(*semicolon),
            ]),
            TableType {
                table_constant,
                row_type,
            } => vec![*table_constant, *row_type],
            Unary { operators, operand } => vec![*operators, *operand],
            NotImplemented { ellipsis } => vec![*ellipsis],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeData::Constant { .. }
                | NodeData::Identifier { .. }
                | NodeData::GeneralizedIdentifier { .. }
                | NodeData::Literal { .. }
                | NodeData::PrimitiveType { .. }
        )
    }
}

fn collect<const N: usize>(ids: [Option<NodeId>; N]) -> Vec<NodeId> {
    ids.into_iter().flatten().collect()
}
