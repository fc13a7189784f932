//! Parser for M documents.
//!
//! # Architecture
//!
//! Reads are plain recursive descent over the significant tokens of a
//! [`LexerSnapshot`](pq_lexer::LexerSnapshot). Instead of a green tree, nodes go into a
//! [`NodeRegistry`]: a read opens a context, reads its children into it, and promotes it
//! to a finished node under the same id.
//!
//! - Binary-operator expressions have two readers selected by [`Strategy`](crate::Strategy).
//!   The naive one descends one layer per precedence level; the combiner reads the whole
//!   operator run flat and folds it by precedence, replaying a naive read whenever an
//!   operand fails validation.
//! - Ambiguous `(` and `[` openers are resolved by lookahead ([`Disambiguation::Strict`](crate::Disambiguation))
//!   or by speculative reads restored through checkpoints.
//! - A document is a section document or an expression document. When neither reads, the
//!   error from the attempt that got further is reported.
//!
//! There is no error recovery: the first error ends the parse. [`Parser::try_parse_document`]
//! keeps the nodes built up to that point.

mod combinator;
mod core;
mod disambiguation;
mod grammar;
mod invariants;
mod state;

#[cfg(test)]
mod tests;

pub use core::Parser;
pub use state::{Checkpoint, ParseState};

use serde::Serialize;

use crate::ast::NodeId;
use crate::dump::TreePrinter;
use crate::registry::NodeRegistry;
use crate::{DocumentResult, Error, PartialResult, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentKind {
    Expression,
    Section,
}

/// A fully parsed document.
#[derive(Debug, Clone)]
pub struct Document {
    pub root: NodeId,
    pub kind: DocumentKind,
    pub registry: NodeRegistry,
}

impl Document {
    pub fn printer<'d, 's>(&'d self, source: &'s str) -> TreePrinter<'d, 's> {
        TreePrinter::new(&self.registry, source).root(self.root)
    }
}

/// Nodes built before a parse error.
#[derive(Debug, Clone)]
pub struct PartialDocument {
    pub registry: NodeRegistry,
    /// Innermost context that was still open when the error hit.
    pub open_context: Option<NodeId>,
    pub token_index: usize,
}

impl<'a> Parser<'a> {
    /// Reads a section document or an expression document, whichever fits.
    pub fn parse_document(mut self) -> Result<Document> {
        let (root, kind) = self.read_document()?;
        Ok(self.into_document(root, kind))
    }

    /// Reads an expression document: one expression consuming every token.
    pub fn parse_expression(mut self) -> Result<Document> {
        let _span = self.enter("ExpressionDocument")?;
        let root = self.read_expression_document()?;
        Ok(self.into_document(root, DocumentKind::Expression))
    }

    pub fn parse_section(mut self) -> Result<Document> {
        let _span = self.enter("SectionDocument")?;
        let root = self.read_section_document()?;
        Ok(self.into_document(root, DocumentKind::Section))
    }

    /// Like [`Parser::parse_document`], but hands back the partial tree on a parse error.
    pub fn try_parse_document(mut self) -> DocumentResult {
        match self.read_document() {
            Ok((root, kind)) => PartialResult::Ok(self.into_document(root, kind)),
            Err(error @ Error::Parse(_)) if !self.state.registry.is_empty() => {
                self.state.registry.clear_journal();
                let open_context = self
                    .state
                    .current_context
                    .filter(|id| self.state.registry.context(*id).is_some())
                    .or_else(|| self.state.registry.deepest_open_context());
                PartialResult::Partial {
                    partial: PartialDocument {
                        registry: self.state.registry,
                        open_context,
                        token_index: self.state.token_index,
                    },
                    error,
                }
            }
            Err(error) => PartialResult::Err(error),
        }
    }

    fn into_document(mut self, root: NodeId, kind: DocumentKind) -> Document {
        self.state.registry.clear_journal();
        Document {
            root,
            kind,
            registry: self.state.registry,
        }
    }
}
