//! Token cursor plus the node registry, with checkpoint/restore.

use pq_lexer::{LexerSnapshot, Token, TokenKind};

use crate::ast::NodeId;
use crate::registry::{Mark, NodeRegistry};
use crate::settings::CancellationToken;

/// Everything a speculative read may change.
///
/// Restoring a checkpoint rewinds the cursor, rolls the registry back to its mark
/// and reopens the context that was current when it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    token_index: usize,
    mark: Mark,
    current_context: Option<NodeId>,
}

impl Checkpoint {
    pub fn token_index(&self) -> usize {
        self.token_index
    }
}

#[derive(Debug, Clone)]
pub struct ParseState<'a> {
    pub(crate) snapshot: &'a LexerSnapshot<'a>,
    pub(crate) token_index: usize,
    pub(crate) registry: NodeRegistry,
    pub(crate) current_context: Option<NodeId>,
    pub(crate) cancellation: Option<CancellationToken>,
}

impl<'a> ParseState<'a> {
    pub fn new(snapshot: &'a LexerSnapshot<'a>) -> Self {
        Self {
            snapshot,
            token_index: 0,
            registry: NodeRegistry::new(),
            current_context: None,
            cancellation: None,
        }
    }

    pub fn snapshot(&self) -> &'a LexerSnapshot<'a> {
        self.snapshot
    }

    pub fn token_index(&self) -> usize {
        self.token_index
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn current_context(&self) -> Option<NodeId> {
        self.current_context
    }

    pub fn current_token(&self) -> Option<&'a Token> {
        self.snapshot.token(self.token_index)
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.snapshot.kind(self.token_index)
    }

    pub fn is_at_end(&self) -> bool {
        self.token_index >= self.snapshot.len()
    }

    /// Moves past the current token. Past the last token the cursor stays at end of stream.
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.token_index += 1;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            token_index: self.token_index,
            mark: self.registry.mark(),
            current_context: self.current_context,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.registry.truncate(checkpoint.mark);
        self.token_index = checkpoint.token_index;
        self.current_context = checkpoint.current_context;
    }
}
