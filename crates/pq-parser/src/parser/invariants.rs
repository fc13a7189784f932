//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use pq_lexer::{Token, TokenKind};

use super::core::Parser;
use crate::ast::{AstNode, ConstantKind, NodeId};
use crate::registry::{ContextNode, NodeRef};

impl<'a> Parser<'a> {
    #[inline]
    pub(super) fn assert_not_eof(&self) {
        assert!(
            !self.eof(),
            "broken parser invariant: bump called at end of stream (upstream caller's responsibility)"
        );
    }

    #[inline]
    pub(super) fn assert_current_text(&self, expected: &str) {
        let current = self.current_text();
        assert_eq!(
            current,
            Some(expected),
            "broken parser invariant: expected `{expected}` but found {current:?} (upstream caller's responsibility)"
        );
    }

    pub(super) fn ensure_context(&self, id: NodeId) -> &ContextNode {
        self.state.registry.context(id).unwrap_or_else(|| {
            panic!(
                "broken parser invariant: {id} is not an open context (state {:?})",
                self.state.registry.state(id)
            )
        })
    }

    pub(super) fn ensure_ast(&self, id: NodeId) -> &AstNode {
        self.state.registry.ast(id).unwrap_or_else(|| {
            panic!(
                "broken parser invariant: {id} is not a finished node (state {:?})",
                self.state.registry.state(id)
            )
        })
    }

    pub(super) fn ensure_node(&self, id: NodeId) -> NodeRef<'_> {
        self.state
            .registry
            .get(id)
            .unwrap_or_else(|| panic!("broken parser invariant: {id} is not a live node"))
    }

    pub(super) fn ensure_constant(&self, kind: TokenKind) -> ConstantKind {
        ConstantKind::from_token(kind)
            .unwrap_or_else(|| panic!("broken parser invariant: {kind:?} is not a constant token"))
    }

    pub(super) fn ensure_opener(&self, token_index: usize) -> Token {
        self.state
            .snapshot
            .token(token_index)
            .copied()
            .unwrap_or_else(|| {
                panic!("broken parser invariant: no opener at token index {token_index}")
            })
    }
}
