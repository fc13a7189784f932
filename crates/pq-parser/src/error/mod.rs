//! Positioned parse errors.

mod printer;

pub use printer::ErrorPrinter;

use pq_lexer::{Token, TokenKind, serialize_text_range};
use rowan::TextRange;
use serde::Serialize;

/// What a comma-separated sequence expected after an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CsvContinuationKind {
    /// A trailing `,` right before the closing token.
    DanglingComma,
    /// A `let` binding followed by another binding without a `,`.
    LetExpression,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseErrorKind {
    ExpectedTokenKind { expected: TokenKind },
    ExpectedClosingTokenKind { expected: TokenKind },
    ExpectedAnyTokenKind { expected: Vec<TokenKind> },
    InvalidPrimitiveType,
    InvalidGeneralizedIdentifier,
    ExpectedGeneralizedIdentifier,
    RequiredParameterAfterOptionalParameter,
    InvalidCatchFunction,
    ExpectedCsvContinuation { continuation: CsvContinuationKind },
    UnterminatedSequence { opener: TokenKind },
    UnusedTokensRemain,
}

impl ParseErrorKind {
    pub fn message(&self) -> String {
        match self {
            ParseErrorKind::ExpectedTokenKind { expected } => format!("expected {expected}"),
            ParseErrorKind::ExpectedClosingTokenKind { expected } => {
                format!("expected closing {expected}")
            }
            ParseErrorKind::ExpectedAnyTokenKind { expected } => {
                format!("expected {}", describe_alternatives(expected))
            }
            ParseErrorKind::InvalidPrimitiveType => "expected a primitive type".to_string(),
            ParseErrorKind::InvalidGeneralizedIdentifier => {
                "invalid generalized identifier".to_string()
            }
            ParseErrorKind::ExpectedGeneralizedIdentifier => {
                "expected a generalized identifier".to_string()
            }
            ParseErrorKind::RequiredParameterAfterOptionalParameter => {
                "required parameter follows an optional parameter".to_string()
            }
            ParseErrorKind::InvalidCatchFunction => {
                "catch handler must be a function with at most one untyped parameter".to_string()
            }
            ParseErrorKind::ExpectedCsvContinuation {
                continuation: CsvContinuationKind::DanglingComma,
            } => "expected another item after `,`".to_string(),
            ParseErrorKind::ExpectedCsvContinuation {
                continuation: CsvContinuationKind::LetExpression,
            } => "expected `,` between let bindings".to_string(),
            ParseErrorKind::UnterminatedSequence { opener } => match closer_of(*opener) {
                Some(closer) => format!("missing closing {closer}"),
                None => format!("unterminated {opener}"),
            },
            ParseErrorKind::UnusedTokensRemain => {
                "unexpected tokens after the end of the document".to_string()
            }
        }
    }

    /// Whether the message should name the token that was found instead.
    fn mentions_found_token(&self) -> bool {
        matches!(
            self,
            ParseErrorKind::ExpectedTokenKind { .. }
                | ParseErrorKind::ExpectedClosingTokenKind { .. }
                | ParseErrorKind::ExpectedAnyTokenKind { .. }
                | ParseErrorKind::InvalidPrimitiveType
                | ParseErrorKind::ExpectedGeneralizedIdentifier
        )
    }
}

pub(crate) fn closer_of(opener: TokenKind) -> Option<TokenKind> {
    match opener {
        TokenKind::ParenOpen => Some(TokenKind::ParenClose),
        TokenKind::BracketOpen => Some(TokenKind::BracketClose),
        TokenKind::BraceOpen => Some(TokenKind::BraceClose),
        _ => None,
    }
}

fn describe_alternatives(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => "a token".to_string(),
        [only] => only.describe().to_string(),
        [init @ .., last] => {
            let init: Vec<_> = init.iter().map(|k| k.describe()).collect();
            format!("{} or {}", init.join(", "), last.describe())
        }
    }
}

/// Secondary location, e.g. where an unterminated sequence was opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedSpan {
    #[serde(serialize_with = "serialize_text_range")]
    pub range: TextRange,
    pub message: String,
}

/// A parse error at a token. `token` is `None` at end of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub token: Option<Token>,
    pub token_index: usize,
    #[serde(serialize_with = "serialize_text_range")]
    pub range: TextRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<RelatedSpan>,
}

impl ParseError {
    pub fn new(
        kind: ParseErrorKind,
        token: Option<Token>,
        token_index: usize,
        range: TextRange,
    ) -> Self {
        Self {
            kind,
            token,
            token_index,
            range,
            related: None,
        }
    }

    pub fn with_related(mut self, range: TextRange, message: impl Into<String>) -> Self {
        self.related = Some(RelatedSpan {
            range,
            message: message.into(),
        });
        self
    }

    /// Full message, naming the offending token where that helps.
    pub fn message(&self) -> String {
        let message = self.kind.message();
        if !self.kind.mentions_found_token() {
            return message;
        }
        match &self.token {
            Some(token) => format!("{message}, found {}", token.kind),
            None => format!("{message}, found end of input"),
        }
    }

    /// Annotated snippet of this error against its source.
    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn printer(&self) -> ErrorPrinter<'_, '_> {
        ErrorPrinter::new(self)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message()
        )
    }
}

impl std::error::Error for ParseError {}
