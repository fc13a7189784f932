//! Leaf vocabularies: constants, operators, primitive types and literal kinds.

use pq_lexer::TokenKind;
use serde::Serialize;

use super::NodeKind;

/// Keyword or punctuation carried by a `Constant` leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConstantKind {
    LeftParenthesis,
    RightParenthesis,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    AtSign,
    Equal,
    NotEqual,
    LessThan,
    LessThanEqualTo,
    GreaterThan,
    GreaterThanEqualTo,
    Plus,
    Minus,
    Asterisk,
    Division,
    Ampersand,
    NullCoalescing,
    QuestionMark,
    FatArrow,
    DotDot,
    Ellipsis,
    And,
    As,
    Catch,
    Each,
    Else,
    Error,
    If,
    In,
    Is,
    Let,
    Meta,
    Not,
    Or,
    Otherwise,
    Section,
    Shared,
    Then,
    Try,
    Type,
    // Contextual keywords, lexed as identifiers.
    Optional,
    Nullable,
    Table,
    Function,
}

impl ConstantKind {
    /// Constant for a token that is always read as a constant leaf.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use ConstantKind as C;
        use TokenKind as T;
        Some(match kind {
            T::ParenOpen => C::LeftParenthesis,
            T::ParenClose => C::RightParenthesis,
            T::BracketOpen => C::LeftBracket,
            T::BracketClose => C::RightBracket,
            T::BraceOpen => C::LeftBrace,
            T::BraceClose => C::RightBrace,
            T::Comma => C::Comma,
            T::Semicolon => C::Semicolon,
            T::AtSign => C::AtSign,
            T::Equal => C::Equal,
            T::NotEqual => C::NotEqual,
            T::LessThan => C::LessThan,
            T::LessThanEqualTo => C::LessThanEqualTo,
            T::GreaterThan => C::GreaterThan,
            T::GreaterThanEqualTo => C::GreaterThanEqualTo,
            T::Plus => C::Plus,
            T::Minus => C::Minus,
            T::Asterisk => C::Asterisk,
            T::Division => C::Division,
            T::Ampersand => C::Ampersand,
            T::NullCoalescingOperator => C::NullCoalescing,
            T::QuestionMark => C::QuestionMark,
            T::FatArrow => C::FatArrow,
            T::DotDot => C::DotDot,
            T::Ellipsis => C::Ellipsis,
            T::KwAnd => C::And,
            T::KwAs => C::As,
            T::KwCatch => C::Catch,
            T::KwEach => C::Each,
            T::KwElse => C::Else,
            T::KwError => C::Error,
            T::KwIf => C::If,
            T::KwIn => C::In,
            T::KwIs => C::Is,
            T::KwLet => C::Let,
            T::KwMeta => C::Meta,
            T::KwNot => C::Not,
            T::KwOr => C::Or,
            T::KwOtherwise => C::Otherwise,
            T::KwSection => C::Section,
            T::KwShared => C::Shared,
            T::KwThen => C::Then,
            T::KwTry => C::Try,
            T::KwType => C::Type,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        use ConstantKind::*;
        match self {
            LeftParenthesis => "(",
            RightParenthesis => ")",
            LeftBracket => "[",
            RightBracket => "]",
            LeftBrace => "{",
            RightBrace => "}",
            Comma => ",",
            Semicolon => ";",
            AtSign => "@",
            Equal => "=",
            NotEqual => "<>",
            LessThan => "<",
            LessThanEqualTo => "<=",
            GreaterThan => ">",
            GreaterThanEqualTo => ">=",
            Plus => "+",
            Minus => "-",
            Asterisk => "*",
            Division => "/",
            Ampersand => "&",
            NullCoalescing => "??",
            QuestionMark => "?",
            FatArrow => "=>",
            DotDot => "..",
            Ellipsis => "...",
            And => "and",
            As => "as",
            Catch => "catch",
            Each => "each",
            Else => "else",
            Error => "error",
            If => "if",
            In => "in",
            Is => "is",
            Let => "let",
            Meta => "meta",
            Not => "not",
            Or => "or",
            Otherwise => "otherwise",
            Section => "section",
            Shared => "shared",
            Then => "then",
            Try => "try",
            Type => "type",
            Optional => "optional",
            Nullable => "nullable",
            Table => "table",
            Function => "function",
        }
    }
}

/// Binary operators with their binding strength.
///
/// The arithmetic, relational and equality operators share one numeric scale;
/// the combiner resolves any mix of them by precedence alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    Metadata,
    Multiplication,
    Division,
    Addition,
    Subtraction,
    Concatenation,
    LessThan,
    LessThanEqualTo,
    GreaterThan,
    GreaterThanEqualTo,
    Equal,
    NotEqual,
    As,
    Is,
    And,
    Or,
    NullCoalescing,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use BinaryOperator as B;
        use TokenKind as T;
        Some(match kind {
            T::KwMeta => B::Metadata,
            T::Asterisk => B::Multiplication,
            T::Division => B::Division,
            T::Plus => B::Addition,
            T::Minus => B::Subtraction,
            T::Ampersand => B::Concatenation,
            T::LessThan => B::LessThan,
            T::LessThanEqualTo => B::LessThanEqualTo,
            T::GreaterThan => B::GreaterThan,
            T::GreaterThanEqualTo => B::GreaterThanEqualTo,
            T::Equal => B::Equal,
            T::NotEqual => B::NotEqual,
            T::KwAs => B::As,
            T::KwIs => B::Is,
            T::KwAnd => B::And,
            T::KwOr => B::Or,
            T::NullCoalescingOperator => B::NullCoalescing,
            _ => return None,
        })
    }

    /// Higher binds tighter.
    pub fn precedence(self) -> u8 {
        use BinaryOperator::*;
        match self {
            Metadata => 110,
            Multiplication | Division => 100,
            Addition | Subtraction | Concatenation => 90,
            LessThan | LessThanEqualTo | GreaterThan | GreaterThanEqualTo => 80,
            Equal | NotEqual => 70,
            As => 60,
            Is => 50,
            And => 40,
            Or => 30,
            NullCoalescing => 20,
        }
    }

    pub fn node_kind(self) -> NodeKind {
        use BinaryOperator::*;
        match self {
            Metadata => NodeKind::MetadataExpression,
            Multiplication | Division | Addition | Subtraction | Concatenation => {
                NodeKind::ArithmeticExpression
            }
            LessThan | LessThanEqualTo | GreaterThan | GreaterThanEqualTo => {
                NodeKind::RelationalExpression
            }
            Equal | NotEqual => NodeKind::EqualityExpression,
            As => NodeKind::AsExpression,
            Is => NodeKind::IsExpression,
            And | Or => NodeKind::LogicalExpression,
            NullCoalescing => NodeKind::NullCoalescingExpression,
        }
    }

    pub fn constant(self) -> ConstantKind {
        use BinaryOperator::*;
        match self {
            Metadata => ConstantKind::Meta,
            Multiplication => ConstantKind::Asterisk,
            Division => ConstantKind::Division,
            Addition => ConstantKind::Plus,
            Subtraction => ConstantKind::Minus,
            Concatenation => ConstantKind::Ampersand,
            LessThan => ConstantKind::LessThan,
            LessThanEqualTo => ConstantKind::LessThanEqualTo,
            GreaterThan => ConstantKind::GreaterThan,
            GreaterThanEqualTo => ConstantKind::GreaterThanEqualTo,
            Equal => ConstantKind::Equal,
            NotEqual => ConstantKind::NotEqual,
            As => ConstantKind::As,
            Is => ConstantKind::Is,
            And => ConstantKind::And,
            Or => ConstantKind::Or,
            NullCoalescing => ConstantKind::NullCoalescing,
        }
    }

    /// Arithmetic, relational and equality operators.
    pub fn is_trio(self) -> bool {
        matches!(
            self.node_kind(),
            NodeKind::ArithmeticExpression
                | NodeKind::RelationalExpression
                | NodeKind::EqualityExpression
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveTypeKind {
    Action,
    Any,
    AnyNonNull,
    Binary,
    Date,
    DateTime,
    DateTimeZone,
    Duration,
    Function,
    List,
    Logical,
    None,
    Null,
    Number,
    Record,
    Table,
    Text,
    Time,
    Type,
}

impl PrimitiveTypeKind {
    /// Primitive type named by an identifier. `type` and `null` are keywords
    /// and are matched on their token kinds instead.
    pub fn from_name(name: &str) -> Option<Self> {
        use PrimitiveTypeKind as P;
        Some(match name {
            "action" => P::Action,
            "any" => P::Any,
            "anynonnull" => P::AnyNonNull,
            "binary" => P::Binary,
            "date" => P::Date,
            "datetime" => P::DateTime,
            "datetimezone" => P::DateTimeZone,
            "duration" => P::Duration,
            "function" => P::Function,
            "list" => P::List,
            "logical" => P::Logical,
            "none" => P::None,
            "number" => P::Number,
            "record" => P::Record,
            "table" => P::Table,
            "text" => P::Text,
            "time" => P::Time,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    Numeric,
    Text,
    Logical,
    Null,
}

impl LiteralKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        use TokenKind::*;
        Some(match kind {
            NumericLiteral | HexLiteral | KwHashInfinity | KwHashNan => LiteralKind::Numeric,
            TextLiteral => LiteralKind::Text,
            KwTrue | KwFalse => LiteralKind::Logical,
            KwNull => LiteralKind::Null,
            _ => return None,
        })
    }
}
