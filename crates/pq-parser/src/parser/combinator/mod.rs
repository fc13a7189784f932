//! Binary-expression combiner.
//!
//! Reads a whole run of operands and binary operators in one flat pass, then
//! combines it by precedence: the tightest operator (leftmost among equals) is
//! merged with its two operands until a single node remains. Precedences never
//! change while merging, so the merge order is a stable sort of the operators and
//! the operands merged so far are tracked as groups of adjacent slots. Each merge
//! is validated first. An operand that cannot stand on that side of the operator is
//! re-read by the naive layer reader named in the operator's [`Validator`], which
//! reports the error a layer-by-layer read would have produced.
//!
//! The run stops where the layered grammar would stop reading, so both strategies
//! build the same tree:
//! - a `??` operand is itself a full null-coalescing expression and ends the run;
//! - after `as` or `is` only `is`, `and`, `or` and `??` may follow;
//! - `meta` does not chain.

mod validator;


use std::cmp::Reverse;

use validator::{Fallback, Validator};

use crate::ast::{BinaryOperator, NodeId, NodeKind};
use crate::parser::Parser;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunOperator {
    pub kind: BinaryOperator,
    /// The operator's constant leaf.
    pub id: NodeId,
}

/// Operands and the operators between them, in source order.
///
/// Operand slot `i` sits left of operator `i`. Merging operator `i` joins the group
/// holding slot `i` with the group holding slot `i + 1`; a group is named by its
/// leftmost slot, which holds the group's current node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OperatorRun {
    operands: Vec<NodeId>,
    operators: Vec<RunOperator>,
    /// Slot that absorbed each slot, pointing at itself for a group's leftmost slot.
    absorbed_by: Vec<usize>,
    merged: Vec<bool>,
}

impl OperatorRun {
    pub(crate) fn new(first: NodeId) -> Self {
        Self {
            operands: vec![first],
            operators: Vec::new(),
            absorbed_by: vec![0],
            merged: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, operator: RunOperator, operand: NodeId) {
        self.operators.push(operator);
        self.merged.push(false);
        self.absorbed_by.push(self.operands.len());
        self.operands.push(operand);
    }

    pub(crate) fn operator_count(&self) -> usize {
        self.operators.len()
    }

    /// Operator indices, tightest first and leftmost among equals.
    fn merge_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.operators.len()).collect();
        order.sort_by_key(|index| Reverse(self.operators[*index].kind.precedence()));
        order
    }

    /// Leftmost slot of the group holding `slot`.
    fn group_of(&mut self, slot: usize) -> usize {
        let mut group = slot;
        while self.absorbed_by[group] != group {
            group = self.absorbed_by[group];
        }
        let mut current = slot;
        while self.absorbed_by[current] != group {
            let next = self.absorbed_by[current];
            self.absorbed_by[current] = group;
            current = next;
        }
        group
    }

    /// Current nodes on both sides of operator `index`.
    fn sides(&mut self, index: usize) -> (NodeId, NodeId) {
        let left = self.group_of(index);
        let right = self.group_of(index + 1);
        (self.operands[left], self.operands[right])
    }

    /// Joins the groups around operator `index` under `combined`.
    fn merge(&mut self, index: usize, combined: NodeId) {
        let left = self.group_of(index);
        let right = self.group_of(index + 1);
        self.absorbed_by[right] = left;
        self.operands[left] = combined;
        self.merged[index] = true;
    }

    /// Unmerged nodes in source order: each group's node and the operators between groups.
    fn remaining(&mut self) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        for slot in 0..self.operands.len() {
            if self.group_of(slot) == slot {
                nodes.push(self.operands[slot]);
            }
            if slot < self.operators.len() && !self.merged[slot] {
                nodes.push(self.operators[slot].id);
            }
        }
        nodes
    }

    fn into_single(mut self) -> Result<NodeId> {
        let remaining = self.remaining();
        match remaining.as_slice() {
            [single] => Ok(*single),
            _ => Err(Error::Invariant(format!(
                "operator run did not combine to one node: {} nodes left",
                remaining.len()
            ))),
        }
    }
}

/// Shape of the operand read last, which limits the operators that may follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastOperand {
    Unary,
    Metadata,
    Type,
    Coalesced,
}

impl LastOperand {
    fn allows(self, next: BinaryOperator) -> bool {
        match self {
            LastOperand::Unary => true,
            LastOperand::Metadata => next != BinaryOperator::Metadata,
            LastOperand::Type => matches!(
                next,
                BinaryOperator::Is
                    | BinaryOperator::And
                    | BinaryOperator::Or
                    | BinaryOperator::NullCoalescing
            ),
            LastOperand::Coalesced => false,
        }
    }
}

impl Parser<'_> {
    pub(crate) fn read_combined_binary_expression(&mut self) -> Result<NodeId> {
        let _span = self.enter("BinaryExpression")?;
        let run_context = self.start_context(NodeKind::NullCoalescingExpression);
        let run = self.read_operator_run()?;
        tracing::trace!(operators = run.operator_count(), "combining operator run");
        let combined = self.combine_operator_run(run_context, run)?;
        self.dissolve_context(run_context);
        Ok(combined)
    }

    /// Reads operands and operators into the current context as flat siblings.
    pub(crate) fn read_operator_run(&mut self) -> Result<OperatorRun> {
        let mut run = OperatorRun::new(self.read_unary_expression()?);
        let mut last = LastOperand::Unary;

        while let Some(token) = self.current_kind() {
            let Some(kind) = BinaryOperator::from_token(token) else {
                break;
            };
            if !last.allows(kind) {
                break;
            }

            // Holds the operator and its operand until both are read.
            let scratch = self.start_context(kind.node_kind());
            let id = self.read_token_constant(token)?;
            let (operand, shape) = match kind {
                BinaryOperator::As | BinaryOperator::Is => {
                    (self.read_nullable_primitive_type()?, LastOperand::Type)
                }
                BinaryOperator::NullCoalescing => (
                    self.read_null_coalescing_expression()?,
                    LastOperand::Coalesced,
                ),
                BinaryOperator::Metadata => (self.read_unary_expression()?, LastOperand::Metadata),
                _ => (self.read_unary_expression()?, LastOperand::Unary),
            };
            self.dissolve_context(scratch);

            run.push(RunOperator { kind, id }, operand);
            last = shape;
        }
        Ok(run)
    }

    /// Merges `run`, whose nodes are the children of `run_context`, into one node.
    ///
    /// The run's nodes are detached while merging and the result is attached back.
    /// When an operand fails validation the unmerged nodes are attached back first,
    /// so the fallback reads after them.
    pub(crate) fn combine_operator_run(
        &mut self,
        run_context: NodeId,
        mut run: OperatorRun,
    ) -> Result<NodeId> {
        self.state.registry.detach_children(run_context);

        for index in run.merge_order() {
            let operator = run.operators[index];
            let (left, right) = run.sides(index);
            let validator = Validator::for_operator(operator.kind);

            let failed = if !validator.left.accepts(self.operand_level(left)) {
                Some((left, validator.left_fallback))
            } else if !validator.right.accepts(self.operand_level(right)) {
                Some((right, validator.right_fallback))
            } else {
                None
            };
            if let Some((operand, fallback)) = failed {
                self.reattach(run_context, run.remaining());
                return self.replay_operand(run_context, operand, fallback);
            }

            let combined = self.join_binary(operator.kind.node_kind(), left, operator.id, right);
            run.merge(index, combined);
        }

        let combined = run.into_single()?;
        self.reattach(run_context, vec![combined]);
        Ok(combined)
    }

    fn reattach(&mut self, run_context: NodeId, nodes: Vec<NodeId>) {
        for node in nodes {
            self.state.registry.attach_child(run_context, node);
        }
        self.state.current_context = Some(run_context);
    }

    /// Re-reads `operand` from its first token with a naive layer reader.
    ///
    /// The reader is expected to fail; its error is the one reported. Success means
    /// the run was combined into something the layered grammar cannot produce.
    fn replay_operand(
        &mut self,
        run_context: NodeId,
        operand: NodeId,
        fallback: Fallback,
    ) -> Result<NodeId> {
        let start = self.ast(operand).tokens.start;
        tracing::debug!(%operand, ?fallback, token_index = start, "operand failed validation");

        self.state.token_index = start;
        self.state.current_context = Some(run_context);
        match fallback.read(self) {
            Ok(read) => Err(Error::Invariant(format!(
                "{fallback:?} reader accepted operand {operand} (read as {read}) that failed validation"
            ))),
            Err(error) => Err(error),
        }
    }
}
