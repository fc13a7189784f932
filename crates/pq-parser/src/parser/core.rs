//! Parser state machine and low-level operations.

use std::cell::Cell;
use std::rc::Rc;

use pq_lexer::{LexerSnapshot, Token, TokenKind, TokenSet};
use rowan::TextRange;
use tracing::span::EnteredSpan;

use super::state::{Checkpoint, ParseState};
use crate::ast::{AstNode, ConstantKind, NodeData, NodeId, NodeKind, TokenRange};
use crate::error::{ParseError, ParseErrorKind, closer_of};
use crate::settings::{CancellationToken, Disambiguation, ParseSettings, Strategy};
use crate::{Error, Result};

/// Recursive-descent reader over one lexer snapshot.
///
/// Every read opens a context for its production, reads children into it and
/// promotes it to a finished node. Errors abort the read; speculative callers
/// restore a checkpoint, everyone else propagates.
pub struct Parser<'a> {
    pub(super) state: ParseState<'a>,
    pub(super) settings: ParseSettings,
    /// Production reads currently open.
    depth: Rc<Cell<u32>>,
}

/// An open production read. Dropping it leaves the production.
pub(super) struct Production {
    depth: Rc<Cell<u32>>,
    _span: EnteredSpan,
}

impl Drop for Production {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

impl<'a> Parser<'a> {
    pub fn new(snapshot: &'a LexerSnapshot<'a>) -> Self {
        Self {
            state: ParseState::new(snapshot),
            settings: ParseSettings::default(),
            depth: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_settings(mut self, settings: ParseSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.settings.strategy = strategy;
        self
    }

    pub fn with_disambiguation(mut self, disambiguation: Disambiguation) -> Self {
        self.settings.disambiguation = disambiguation;
        self
    }

    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.settings.recursion_limit = limit;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.state.cancellation = Some(token);
        self
    }

    pub fn settings(&self) -> &ParseSettings {
        &self.settings
    }

    pub fn state(&self) -> &ParseState<'a> {
        &self.state
    }

    pub(super) fn source(&self) -> &'a str {
        self.state.snapshot.source()
    }

    pub(super) fn current_kind(&self) -> Option<TokenKind> {
        self.state.current_kind()
    }

    pub(super) fn nth_kind(&self, lookahead: usize) -> Option<TokenKind> {
        self.state.snapshot.kind(self.state.token_index + lookahead)
    }

    pub(super) fn current_text(&self) -> Option<&'a str> {
        self.state.snapshot.text(self.state.token_index)
    }

    pub(super) fn is_on(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    pub(super) fn is_on_any(&self, set: TokenSet) -> bool {
        self.current_kind().is_some_and(|kind| set.contains(kind))
    }

    pub(super) fn next_is(&self, kind: TokenKind) -> bool {
        self.nth_kind(1) == Some(kind)
    }

    /// Identifier token spelled `word`: `optional`, `nullable`, `table`, `function`.
    pub(super) fn is_on_contextual(&self, word: &str) -> bool {
        self.is_on(TokenKind::Identifier) && self.current_text() == Some(word)
    }

    pub(super) fn eof(&self) -> bool {
        self.state.is_at_end()
    }

    pub(super) fn bump(&mut self) {
        self.assert_not_eof();
        self.state.advance();
    }

    /// Production entry: honours cancellation, counts the read against the
    /// recursion limit and opens a trace span.
    ///
    /// Every production goes through here, so the limit bounds the number of reads
    /// on the call stack however the input nests.
    pub(super) fn enter(&self, production: &'static str) -> Result<Production> {
        if self.state.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let depth = self.depth.get();
        if let Some(limit) = self.settings.recursion_limit
            && depth >= limit
        {
            tracing::debug!(production, depth, "recursion limit reached");
            return Err(Error::RecursionLimitExceeded);
        }
        self.depth.set(depth + 1);
        Ok(Production {
            depth: Rc::clone(&self.depth),
            _span: tracing::trace_span!("read", production, token_index = self.state.token_index)
                .entered(),
        })
    }

    #[cfg(test)]
    pub(super) fn depth(&self) -> u32 {
        self.depth.get()
    }

    pub(super) fn checkpoint(&self) -> Checkpoint {
        self.state.checkpoint()
    }

    pub(super) fn restore(&mut self, checkpoint: Checkpoint) {
        tracing::debug!(
            from = self.state.token_index,
            to = checkpoint.token_index(),
            "backtracking"
        );
        self.state.restore(checkpoint);
    }

    pub(super) fn start_context(&mut self, kind: NodeKind) -> NodeId {
        let id = self.state.registry.open_context(
            kind,
            self.state.token_index,
            self.state.current_context,
        );
        self.state.current_context = Some(id);
        id
    }

    /// Promotes `id` with a token range ending at the cursor.
    pub(super) fn end_context(&mut self, id: NodeId, data: NodeData) -> NodeId {
        let end = self.state.token_index;
        self.end_context_at(id, end, data)
    }

    pub(super) fn end_context_at(&mut self, id: NodeId, end: usize, data: NodeData) -> NodeId {
        let context = self.ensure_context(id);
        let (kind, start) = (context.kind, context.token_start);
        let node = AstNode {
            id,
            kind,
            tokens: TokenRange::new(start, end),
            span: self.state.snapshot.span_of(start, end),
            is_leaf: data.is_leaf(),
            data,
        };
        self.state.registry.promote(id, node);
        self.state.current_context = self.state.registry.parent_of(id);
        id
    }

    /// Drops a context that turned out to be unnecessary, handing its children to its parent.
    pub(super) fn dissolve_context(&mut self, id: NodeId) {
        let parent = self.state.registry.parent_of(id);
        self.state.registry.dissolve(id);
        self.state.current_context = parent;
    }

    /// Finishes a binary node over the detached `left`, `operator` and `right`.
    ///
    /// The node is left detached; the caller attaches it and restores the current context.
    pub(super) fn join_binary(
        &mut self,
        kind: NodeKind,
        left: NodeId,
        operator: NodeId,
        right: NodeId,
    ) -> NodeId {
        let start = self.token_start_of(left);
        let end = self.ast(right).tokens.end;
        let id = self
            .state
            .registry
            .adopt(kind, start, &[left, operator, right]);
        self.end_context_at(
            id,
            end,
            NodeData::Binary {
                left,
                operator,
                right,
            },
        )
    }

    /// Opens a context in place of `children` (consecutive siblings) and makes it current.
    pub(super) fn wrap_in_context(&mut self, kind: NodeKind, children: &[NodeId]) -> NodeId {
        let start = self.token_start_of(children[0]);
        let id = self.state.registry.wrap(kind, start, children);
        self.state.current_context = Some(id);
        id
    }

    pub(super) fn token_start_of(&self, id: NodeId) -> usize {
        self.ensure_node(id).token_start()
    }

    pub(super) fn ast(&self, id: NodeId) -> &AstNode {
        self.ensure_ast(id)
    }

    /// Reads the current token as a constant leaf if it is `kind`.
    pub(super) fn read_token_constant(&mut self, kind: TokenKind) -> Result<NodeId> {
        if !self.is_on(kind) {
            return Err(self.expected(kind));
        }
        let constant = self.ensure_constant(kind);
        Ok(self.read_constant_leaf(constant))
    }

    pub(super) fn maybe_read_token_constant(&mut self, kind: TokenKind) -> Option<NodeId> {
        if !self.is_on(kind) {
            return None;
        }
        let constant = self.ensure_constant(kind);
        Some(self.read_constant_leaf(constant))
    }

    /// Reads an identifier token used as a keyword, e.g. `optional`.
    pub(super) fn read_contextual_constant(&mut self, constant: ConstantKind) -> NodeId {
        self.assert_current_text(constant.as_str());
        self.read_constant_leaf(constant)
    }

    fn read_constant_leaf(&mut self, constant: ConstantKind) -> NodeId {
        let id = self.start_context(NodeKind::Constant);
        self.bump();
        self.end_context(id, NodeData::Constant { constant })
    }

    /// Reads the closing delimiter for the opener at `opener_index`.
    ///
    /// Running out of input reports the sequence as unterminated, pointing back at the opener.
    pub(super) fn read_closing(&mut self, opener_index: usize) -> Result<NodeId> {
        let opener = self.ensure_opener(opener_index);
        let closer = closer_of(opener.kind).unwrap_or(opener.kind);

        if self.is_on(closer) {
            return self.read_token_constant(closer);
        }
        if self.eof() {
            let open_range = opener.span;
            let error = self
                .parse_error(ParseErrorKind::UnterminatedSequence {
                    opener: opener.kind,
                })
                .with_related(open_range, format!("{} opened here", opener.kind));
            let error = ParseError {
                range: TextRange::new(open_range.start(), error.range.end()),
                ..error
            };
            return Err(error.into());
        }
        Err(self.error(ParseErrorKind::ExpectedClosingTokenKind { expected: closer }))
    }

    pub(super) fn parse_error(&self, kind: ParseErrorKind) -> ParseError {
        self.parse_error_at(kind, self.state.token_index)
    }

    pub(super) fn parse_error_at(&self, kind: ParseErrorKind, token_index: usize) -> ParseError {
        let snapshot = self.state.snapshot;
        let token: Option<Token> = snapshot.token(token_index).copied();
        let range = token.map_or_else(|| TextRange::empty(snapshot.eof_offset()), |t| t.span);
        ParseError::new(kind, token, token_index, range)
    }

    /// Error at the current token.
    pub(super) fn error(&self, kind: ParseErrorKind) -> Error {
        self.parse_error(kind).into()
    }

    /// Error covering a finished node, reported at its first token.
    pub(super) fn error_at_node(&self, kind: ParseErrorKind, id: NodeId) -> Error {
        let node = self.ast(id);
        let mut error = self.parse_error_at(kind, node.tokens.start);
        error.range = node.span;
        error.into()
    }

    pub(super) fn expected(&self, kind: TokenKind) -> Error {
        self.error(ParseErrorKind::ExpectedTokenKind { expected: kind })
    }

    pub(super) fn expected_any(&self, set: TokenSet) -> Error {
        self.error(ParseErrorKind::ExpectedAnyTokenKind {
            expected: set.iter().collect(),
        })
    }

    pub(super) fn strategy(&self) -> Strategy {
        self.settings.strategy
    }

    pub(super) fn disambiguation(&self) -> Disambiguation {
        self.settings.disambiguation
    }
}
