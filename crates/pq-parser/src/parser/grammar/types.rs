use pq_lexer::TokenKind;
use pq_lexer::token_sets::{GENERALIZED_IDENTIFIER_END, IDENTIFIERS, TYPE_CLOSERS};

use crate::Result;
use crate::ast::{ConstantKind, NodeData, NodeId, NodeKind, PrimitiveTypeKind};
use crate::error::ParseErrorKind;
use crate::parser::Parser;

/// How parameter types are written in a parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParameterTyping {
    /// Function expressions: optional `as` nullable-primitive-type.
    NullablePrimitive,
    /// Function types: mandatory `as` type.
    Type,
}

impl Parser<'_> {
    /// parenthesized-expression | primary-type
    pub(crate) fn read_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("Type")?;
        if self.is_on(TokenKind::ParenOpen) {
            self.read_parenthesized_expression()
        } else {
            self.read_primary_type()
        }
    }

    pub(crate) fn read_primary_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("PrimaryType")?;
        match self.current_kind() {
            Some(TokenKind::BracketOpen) => self.read_record_type(),
            Some(TokenKind::BraceOpen) => self.read_list_type(),
            Some(TokenKind::Identifier) if self.is_table_type_ahead() => self.read_table_type(),
            Some(TokenKind::Identifier)
                if self.is_on_contextual("function") && self.next_is(TokenKind::ParenOpen) =>
            {
                self.read_function_type()
            }
            Some(TokenKind::Identifier) if self.is_nullable_type_ahead() => {
                self.read_nullable_type()
            }
            _ => self.read_primitive_type_speculatively(),
        }
    }

    /// `table` followed by a row type. A bare `table` is the primitive type.
    fn is_table_type_ahead(&self) -> bool {
        self.is_on_contextual("table")
            && self.nth_kind(1).is_some_and(|kind| {
                IDENTIFIERS.contains(kind)
                    || matches!(
                        kind,
                        TokenKind::BracketOpen | TokenKind::ParenOpen | TokenKind::AtSign
                    )
            })
    }

    fn is_nullable_type_ahead(&self) -> bool {
        self.is_on_contextual("nullable")
            && self
                .nth_kind(1)
                .is_some_and(|kind| !TYPE_CLOSERS.contains(kind))
    }

    fn read_primitive_type_speculatively(&mut self) -> Result<NodeId> {
        let checkpoint = self.checkpoint();
        match self.read_primitive_type() {
            Ok(id) => Ok(id),
            Err(error) => {
                self.restore(checkpoint);
                Err(error)
            }
        }
    }

    pub(crate) fn read_primitive_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("PrimitiveType")?;
        let primitive = match self.current_kind() {
            Some(TokenKind::KwType) => Some(PrimitiveTypeKind::Type),
            Some(TokenKind::KwNull) => Some(PrimitiveTypeKind::Null),
            Some(TokenKind::Identifier) => self.current_text().and_then(PrimitiveTypeKind::from_name),
            _ => None,
        };
        let Some(primitive) = primitive else {
            return Err(self.error(ParseErrorKind::InvalidPrimitiveType));
        };

        let id = self.start_context(NodeKind::PrimitiveType);
        self.bump();
        Ok(self.end_context(id, NodeData::PrimitiveType { primitive }))
    }

    /// [`nullable`] primitive-type
    pub(crate) fn read_nullable_primitive_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("NullablePrimitiveType")?;
        if !self.is_on_contextual("nullable") {
            return self.read_primitive_type();
        }
        let id = self.start_context(NodeKind::NullablePrimitiveType);
        let constant = self.read_contextual_constant(ConstantKind::Nullable);
        let paired = self.read_primitive_type()?;
        Ok(self.end_context(id, NodeData::Pair { constant, paired }))
    }

    pub(crate) fn read_as_nullable_primitive_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("AsNullablePrimitiveType")?;
        let id = self.start_context(NodeKind::AsNullablePrimitiveType);
        let constant = self.read_token_constant(TokenKind::KwAs)?;
        let paired = self.read_nullable_primitive_type()?;
        Ok(self.end_context(id, NodeData::Pair { constant, paired }))
    }

    fn read_as_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("AsType")?;
        let id = self.start_context(NodeKind::AsType);
        let constant = self.read_token_constant(TokenKind::KwAs)?;
        let paired = self.read_type()?;
        Ok(self.end_context(id, NodeData::Pair { constant, paired }))
    }

    fn read_nullable_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("NullableType")?;
        let id = self.start_context(NodeKind::NullableType);
        let constant = self.read_contextual_constant(ConstantKind::Nullable);
        let paired = self.read_type()?;
        Ok(self.end_context(id, NodeData::Pair { constant, paired }))
    }

    pub(crate) fn read_record_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("RecordType")?;
        let id = self.start_context(NodeKind::RecordType);
        let fields = self.read_field_specification_list()?;
        Ok(self.end_context(id, NodeData::RecordType { fields }))
    }

    fn read_list_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("ListType")?;
        self.read_wrapped(NodeKind::ListType, TokenKind::BraceOpen, Self::read_type, false)
    }

    /// `table` (field-specification-list | primary-expression)
    fn read_table_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("TableType")?;
        let id = self.start_context(NodeKind::TableType);
        let table_constant = self.read_contextual_constant(ConstantKind::Table);
        let row_type = if self.is_on(TokenKind::BracketOpen) {
            self.read_field_specification_list()?
        } else {
            self.read_primary_expression()?
        };
        Ok(self.end_context(
            id,
            NodeData::TableType {
                table_constant,
                row_type,
            },
        ))
    }

    /// `function` `(` parameters `)` `as` type
    fn read_function_type(&mut self) -> Result<NodeId> {
        let _span = self.enter("FunctionType")?;
        let id = self.start_context(NodeKind::FunctionType);
        let function_constant = self.read_contextual_constant(ConstantKind::Function);
        let parameters = self.read_parameter_list(ParameterTyping::Type)?;
        let return_type = self.read_as_type()?;
        Ok(self.end_context(
            id,
            NodeData::FunctionType {
                function_constant,
                parameters,
                return_type,
            },
        ))
    }

    /// `[` field-specifications [`,`] [`...`] `]`
    pub(crate) fn read_field_specification_list(&mut self) -> Result<NodeId> {
        let _span = self.enter("FieldSpecificationList")?;
        let id = self.start_context(NodeKind::FieldSpecificationList);
        let opener = self.state.token_index;
        let open = self.read_token_constant(TokenKind::BracketOpen)?;

        let content = self.start_context(NodeKind::ArrayWrapper);
        let mut elements = Vec::new();
        while !self.eof() && !self.is_on(TokenKind::BracketClose) && !self.is_on(TokenKind::Ellipsis)
        {
            let (csv, has_comma) = self.read_csv(&mut Self::read_field_specification)?;
            elements.push(csv);
            if !has_comma {
                break;
            }
            if self.is_on(TokenKind::BracketClose) {
                return Err(self.dangling_comma_error());
            }
        }
        self.end_context(content, NodeData::Array { elements });

        let open_record_marker = self.maybe_read_token_constant(TokenKind::Ellipsis);
        let close = self.read_closing(opener)?;
        Ok(self.end_context(
            id,
            NodeData::FieldSpecificationList {
                open,
                content,
                open_record_marker,
                close,
            },
        ))
    }

    /// [`optional`] generalized-identifier [`=` type]
    pub(crate) fn read_field_specification(&mut self) -> Result<NodeId> {
        let _span = self.enter("FieldSpecification")?;
        let id = self.start_context(NodeKind::FieldSpecification);
        let optional = if self.is_on_contextual("optional")
            && self
                .nth_kind(1)
                .is_some_and(|kind| !GENERALIZED_IDENTIFIER_END.contains(kind))
        {
            Some(self.read_contextual_constant(ConstantKind::Optional))
        } else {
            None
        };
        let name = self.read_generalized_identifier()?;
        let field_type = if self.is_on(TokenKind::Equal) {
            let pair = self.start_context(NodeKind::FieldTypeSpecification);
            let constant = self.read_token_constant(TokenKind::Equal)?;
            let paired = self.read_type()?;
            Some(self.end_context(pair, NodeData::Pair { constant, paired }))
        } else {
            None
        };
        Ok(self.end_context(
            id,
            NodeData::FieldSpecification {
                optional,
                name,
                field_type,
            },
        ))
    }

    /// `(` parameters `)`, with every optional parameter after the required ones.
    pub(crate) fn read_parameter_list(&mut self, typing: ParameterTyping) -> Result<NodeId> {
        let _span = self.enter("ParameterList")?;
        let id = self.read_wrapped_csv(NodeKind::ParameterList, TokenKind::ParenOpen, |p| {
            p.read_parameter(typing)
        })?;

        let mut seen_optional = false;
        for parameter in self.parameters_of(id) {
            let is_optional = matches!(
                self.ast(parameter).data,
                NodeData::Parameter {
                    optional: Some(_),
                    ..
                }
            );
            if seen_optional && !is_optional {
                return Err(self.error_at_node(
                    ParseErrorKind::RequiredParameterAfterOptionalParameter,
                    parameter,
                ));
            }
            seen_optional |= is_optional;
        }
        Ok(id)
    }

    fn read_parameter(&mut self, typing: ParameterTyping) -> Result<NodeId> {
        let _span = self.enter("Parameter")?;
        let id = self.start_context(NodeKind::Parameter);
        let optional = if self.is_on_contextual("optional")
            && self.nth_kind(1).is_some_and(|kind| IDENTIFIERS.contains(kind))
        {
            Some(self.read_contextual_constant(ConstantKind::Optional))
        } else {
            None
        };
        let name = self.read_identifier()?;
        let parameter_type = match typing {
            ParameterTyping::NullablePrimitive if self.is_on(TokenKind::KwAs) => {
                Some(self.read_as_nullable_primitive_type()?)
            }
            ParameterTyping::NullablePrimitive => None,
            ParameterTyping::Type => Some(self.read_as_type()?),
        };
        Ok(self.end_context(
            id,
            NodeData::Parameter {
                optional,
                name,
                parameter_type,
            },
        ))
    }

    /// Parameter nodes of a finished parameter list, in order.
    pub(crate) fn parameters_of(&self, list: NodeId) -> Vec<NodeId> {
        let NodeData::Wrapped { content, .. } = &self.ast(list).data else {
            return Vec::new();
        };
        self.csv_elements(*content)
    }
}
