//! Parsing engine for the Power Query M formula language.
//!
//! Documents are read into a [`NodeRegistry`]: an arena of open contexts and
//! finished nodes keyed by [`NodeId`]. Binary-operator expressions can be read by
//! a per-precedence recursive descent ([`Strategy::Naive`]) or by reading a flat
//! operator run and rebuilding it by precedence ([`Strategy::Combinatorial`]); both
//! produce the same tree.
//!
//! # Example
//!
//! ```
//! use pq_parser::{DocumentKind, NodeKind};
//!
//! let document = pq_parser::parse("let x = 1 + 2 * 3 in x").expect("valid document");
//! assert_eq!(document.kind, DocumentKind::Expression);
//!
//! let root = document.registry.ast(document.root).unwrap();
//! assert_eq!(root.kind, NodeKind::LetExpression);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod dump;
pub mod error;
pub mod parser;
pub mod registry;

mod result;
mod settings;

#[cfg(test)]
mod test_utils;

pub use ast::{AstNode, BinaryOperator, ConstantKind, NodeData, NodeId, NodeKind, TokenRange};
pub use dump::TreePrinter;
pub use error::{CsvContinuationKind, ParseError, ParseErrorKind};
pub use parser::{Document, DocumentKind, PartialDocument, Parser};
pub use registry::{Mark, NodeRegistry, NodeState};
pub use result::PartialResult;
pub use settings::{
    CancellationToken, DEFAULT_RECURSION_LIMIT, Disambiguation, ParseSettings, Strategy,
};

/// Errors that can stop a parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The cancellation token was triggered.
    #[error("parsing was cancelled")]
    Cancelled,

    /// Input nested deeper than the configured recursion limit.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// An engine bug, never a property of the input.
    #[error("broken parser invariant: {0}")]
    Invariant(String),
}

impl Error {
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(error) => Some(error),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of [`try_parse`] and [`Parser::try_parse_document`].
pub type DocumentResult = PartialResult<Document, PartialDocument, Error>;

/// Lexes and parses `source` as a document with default settings.
pub fn parse(source: &str) -> Result<Document> {
    parse_with(source, ParseSettings::default())
}

pub fn parse_with(source: &str, settings: ParseSettings) -> Result<Document> {
    let snapshot = pq_lexer::lex(source);
    Parser::new(&snapshot)
        .with_settings(settings)
        .parse_document()
}

/// Like [`parse`], but keeps the nodes built before a parse error.
pub fn try_parse(source: &str) -> DocumentResult {
    let snapshot = pq_lexer::lex(source);
    Parser::new(&snapshot).try_parse_document()
}
