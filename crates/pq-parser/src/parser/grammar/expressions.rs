use pq_lexer::TokenKind;

use super::types::ParameterTyping;
use crate::Result;
use crate::ast::{NodeData, NodeId, NodeKind};
use crate::error::ParseErrorKind;
use crate::parser::Parser;

impl Parser<'_> {
    /// `each` | `let` | `if` | `error` | `try` | `(`-disambiguated | binary-operator expression
    pub(crate) fn read_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("Expression")?;
        match self.current_kind() {
            Some(TokenKind::KwEach) => self.read_each_expression(),
            Some(TokenKind::KwLet) => self.read_let_expression(),
            Some(TokenKind::KwIf) => self.read_if_expression(),
            Some(TokenKind::KwError) => self.read_error_raising_expression(),
            Some(TokenKind::KwTry) => self.read_error_handling_expression(),
            Some(TokenKind::ParenOpen) => self.read_parenthesis_disambiguated(),
            _ => self.read_null_coalescing_expression(),
        }
    }

    pub(crate) fn read_each_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("EachExpression")?;
        let id = self.start_context(NodeKind::EachExpression);
        let constant = self.read_token_constant(TokenKind::KwEach)?;
        let paired = self.read_expression()?;
        Ok(self.end_context(id, NodeData::Pair { constant, paired }))
    }

    /// `let` bindings `in` expression
    fn read_let_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("LetExpression")?;
        let id = self.start_context(NodeKind::LetExpression);
        let let_constant = self.read_token_constant(TokenKind::KwLet)?;
        let bindings = self.read_let_bindings()?;
        let in_constant = self.read_token_constant(TokenKind::KwIn)?;
        let expression = self.read_expression()?;
        Ok(self.end_context(
            id,
            NodeData::Let {
                let_constant,
                bindings,
                in_constant,
                expression,
            },
        ))
    }

    fn read_if_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("IfExpression")?;
        let id = self.start_context(NodeKind::IfExpression);
        let if_constant = self.read_token_constant(TokenKind::KwIf)?;
        let condition = self.read_expression()?;
        let then_constant = self.read_token_constant(TokenKind::KwThen)?;
        let true_expression = self.read_expression()?;
        let else_constant = self.read_token_constant(TokenKind::KwElse)?;
        let false_expression = self.read_expression()?;
        Ok(self.end_context(
            id,
            NodeData::If {
                if_constant,
                condition,
                then_constant,
                true_expression,
                else_constant,
                false_expression,
            },
        ))
    }

    pub(crate) fn read_error_raising_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("ErrorRaisingExpression")?;
        let id = self.start_context(NodeKind::ErrorRaisingExpression);
        let constant = self.read_token_constant(TokenKind::KwError)?;
        let paired = self.read_expression()?;
        Ok(self.end_context(id, NodeData::Pair { constant, paired }))
    }

    /// `try` expression [`otherwise` expression | `catch` function-expression]
    fn read_error_handling_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("ErrorHandlingExpression")?;
        let id = self.start_context(NodeKind::ErrorHandlingExpression);
        let try_constant = self.read_token_constant(TokenKind::KwTry)?;
        let protected = self.read_expression()?;
        let handler = match self.current_kind() {
            Some(TokenKind::KwOtherwise) => Some(self.read_otherwise_expression()?),
            Some(TokenKind::KwCatch) => Some(self.read_catch_expression()?),
            _ => None,
        };
        Ok(self.end_context(
            id,
            NodeData::ErrorHandling {
                try_constant,
                protected,
                handler,
            },
        ))
    }

    pub(crate) fn read_otherwise_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("OtherwiseExpression")?;
        let id = self.start_context(NodeKind::OtherwiseExpression);
        let constant = self.read_token_constant(TokenKind::KwOtherwise)?;
        let paired = self.read_expression()?;
        Ok(self.end_context(id, NodeData::Pair { constant, paired }))
    }

    pub(crate) fn read_catch_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("CatchExpression")?;
        let id = self.start_context(NodeKind::CatchExpression);
        let constant = self.read_token_constant(TokenKind::KwCatch)?;
        let paired = self.read_function_expression()?;
        self.validate_catch_function(paired)?;
        Ok(self.end_context(id, NodeData::Pair { constant, paired }))
    }

    /// A catch handler takes at most one parameter, which is neither optional nor typed,
    /// and declares no return type.
    fn validate_catch_function(&self, function: NodeId) -> Result<()> {
        let NodeData::FunctionExpression {
            parameters,
            return_type,
            ..
        } = &self.ast(function).data
        else {
            return Ok(());
        };
        let parameters = self.parameters_of(*parameters);

        let is_valid = return_type.is_none()
            && parameters.len() <= 1
            && parameters.iter().all(|parameter| {
                matches!(
                    self.ast(*parameter).data,
                    NodeData::Parameter {
                        optional: None,
                        parameter_type: None,
                        ..
                    }
                )
            });
        if is_valid {
            return Ok(());
        }
        Err(self.error_at_node(ParseErrorKind::InvalidCatchFunction, function))
    }

    /// `(` parameters `)` [`as` nullable-primitive-type] `=>` expression
    pub(crate) fn read_function_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("FunctionExpression")?;
        let id = self.start_context(NodeKind::FunctionExpression);
        let parameters = self.read_parameter_list(ParameterTyping::NullablePrimitive)?;
        let return_type = if self.is_on(TokenKind::KwAs) {
            Some(self.read_as_nullable_primitive_type()?)
        } else {
            None
        };
        let fat_arrow = self.read_token_constant(TokenKind::FatArrow)?;
        let body = self.read_expression()?;
        Ok(self.end_context(
            id,
            NodeData::FunctionExpression {
                parameters,
                return_type,
                fat_arrow,
                body,
            },
        ))
    }
}
