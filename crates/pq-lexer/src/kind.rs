//! Token kinds of the M formula language.
//!
//! Logos derives recognition directly on the enum. Keyword tokens are declared
//! before `Identifier` so the literal match wins over the identifier regex.

use logos::Logos;
use serde::Serialize;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum TokenKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    /// Inclusive identifier marker: `@x`
    #[token("@")]
    AtSign,

    #[token("=")]
    Equal,

    #[token("<>")]
    NotEqual,

    #[token("<")]
    LessThan,

    #[token("<=")]
    LessThanEqualTo,

    #[token(">")]
    GreaterThan,

    #[token(">=")]
    GreaterThanEqualTo,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Asterisk,

    #[token("/")]
    Division,

    #[token("&")]
    Ampersand,

    #[token("??")]
    NullCoalescingOperator,

    /// Optional item access / field access suffix.
    #[token("?")]
    QuestionMark,

    #[token("=>")]
    FatArrow,

    #[token("..")]
    DotDot,

    #[token("...")]
    Ellipsis,

    #[token("and")]
    KwAnd,

    #[token("as")]
    KwAs,

    #[token("catch")]
    KwCatch,

    #[token("each")]
    KwEach,

    #[token("else")]
    KwElse,

    #[token("error")]
    KwError,

    #[token("false")]
    KwFalse,

    #[token("if")]
    KwIf,

    #[token("in")]
    KwIn,

    #[token("is")]
    KwIs,

    #[token("let")]
    KwLet,

    #[token("meta")]
    KwMeta,

    #[token("not")]
    KwNot,

    #[token("null")]
    KwNull,

    #[token("or")]
    KwOr,

    #[token("otherwise")]
    KwOtherwise,

    #[token("section")]
    KwSection,

    #[token("shared")]
    KwShared,

    #[token("then")]
    KwThen,

    #[token("true")]
    KwTrue,

    #[token("try")]
    KwTry,

    #[token("type")]
    KwType,

    #[token("#binary")]
    KwHashBinary,

    #[token("#date")]
    KwHashDate,

    #[token("#datetime")]
    KwHashDateTime,

    #[token("#datetimezone")]
    KwHashDateTimeZone,

    #[token("#duration")]
    KwHashDuration,

    #[token("#infinity")]
    KwHashInfinity,

    #[token("#nan")]
    KwHashNan,

    #[token("#sections")]
    KwHashSections,

    #[token("#shared")]
    KwHashShared,

    #[token("#table")]
    KwHashTable,

    #[token("#time")]
    KwHashTime,

    /// Dotted identifiers (`Table.AddColumn`) are a single token.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*")]
    Identifier,

    #[regex(r#"#"([^"]|"")*""#)]
    QuotedIdentifier,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    NumericLiteral,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexLiteral,

    /// Doubled quotes escape a quote: `"say ""hi"""`
    #[regex(r#""([^"]|"")*""#)]
    TextLiteral,

    #[regex(r"[ \t\x0C]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    #[token("\r")]
    Newline,

    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
}

use TokenKind::*;

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, LineComment | BlockComment)
    }

    /// Reserved words, including the `#`-prefixed ones.
    #[inline]
    pub fn is_keyword(self) -> bool {
        (KwAnd as u8..=KwHashTime as u8).contains(&(self as u8))
    }

    /// Human-readable name used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            ParenOpen => "`(`",
            ParenClose => "`)`",
            BracketOpen => "`[`",
            BracketClose => "`]`",
            BraceOpen => "`{`",
            BraceClose => "`}`",
            Comma => "`,`",
            Semicolon => "`;`",
            AtSign => "`@`",
            Equal => "`=`",
            NotEqual => "`<>`",
            LessThan => "`<`",
            LessThanEqualTo => "`<=`",
            GreaterThan => "`>`",
            GreaterThanEqualTo => "`>=`",
            Plus => "`+`",
            Minus => "`-`",
            Asterisk => "`*`",
            Division => "`/`",
            Ampersand => "`&`",
            NullCoalescingOperator => "`??`",
            QuestionMark => "`?`",
            FatArrow => "`=>`",
            DotDot => "`..`",
            Ellipsis => "`...`",
            KwAnd => "`and`",
            KwAs => "`as`",
            KwCatch => "`catch`",
            KwEach => "`each`",
            KwElse => "`else`",
            KwError => "`error`",
            KwFalse => "`false`",
            KwIf => "`if`",
            KwIn => "`in`",
            KwIs => "`is`",
            KwLet => "`let`",
            KwMeta => "`meta`",
            KwNot => "`not`",
            KwNull => "`null`",
            KwOr => "`or`",
            KwOtherwise => "`otherwise`",
            KwSection => "`section`",
            KwShared => "`shared`",
            KwThen => "`then`",
            KwTrue => "`true`",
            KwTry => "`try`",
            KwType => "`type`",
            KwHashBinary => "`#binary`",
            KwHashDate => "`#date`",
            KwHashDateTime => "`#datetime`",
            KwHashDateTimeZone => "`#datetimezone`",
            KwHashDuration => "`#duration`",
            KwHashInfinity => "`#infinity`",
            KwHashNan => "`#nan`",
            KwHashSections => "`#sections`",
            KwHashShared => "`#shared`",
            KwHashTable => "`#table`",
            KwHashTime => "`#time`",
            Identifier => "identifier",
            QuotedIdentifier => "quoted identifier",
            NumericLiteral => "number",
            HexLiteral => "hexadecimal number",
            TextLiteral => "text",
            Whitespace => "whitespace",
            Newline => "newline",
            LineComment | BlockComment => "comment",
            Garbage => "unrecognized input",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// 128-bit set of [`TokenKind`]s for O(1) membership tests.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u8;
            assert!(kind < 128, "TokenKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: TokenKind) -> Self {
        TokenSet::new(&[kind])
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        let kind = kind as u8;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = TokenKind> {
        ALL_KINDS.iter().copied().filter(move |kind| self.contains(*kind))
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

const ALL_KINDS: &[TokenKind] = &[
    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,
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
    NullCoalescingOperator,
    QuestionMark,
    FatArrow,
    DotDot,
    Ellipsis,
    KwAnd,
    KwAs,
    KwCatch,
    KwEach,
    KwElse,
    KwError,
    KwFalse,
    KwIf,
    KwIn,
    KwIs,
    KwLet,
    KwMeta,
    KwNot,
    KwNull,
    KwOr,
    KwOtherwise,
    KwSection,
    KwShared,
    KwThen,
    KwTrue,
    KwTry,
    KwType,
    KwHashBinary,
    KwHashDate,
    KwHashDateTime,
    KwHashDateTimeZone,
    KwHashDuration,
    KwHashInfinity,
    KwHashNan,
    KwHashSections,
    KwHashShared,
    KwHashTable,
    KwHashTime,
    Identifier,
    QuotedIdentifier,
    NumericLiteral,
    HexLiteral,
    TextLiteral,
    Whitespace,
    Newline,
    LineComment,
    BlockComment,
    Garbage,
];

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const TRIVIA: TokenSet = TokenSet::new(&[Whitespace, Newline, LineComment, BlockComment]);

    pub const UNARY_OPERATORS: TokenSet = TokenSet::new(&[Plus, Minus, KwNot]);

    /// Operators combined by the shared arithmetic/relational/equality scale.
    pub const TRIO_OPERATORS: TokenSet = TokenSet::new(&[
        Asterisk,
        Division,
        Plus,
        Minus,
        Ampersand,
        LessThan,
        LessThanEqualTo,
        GreaterThan,
        GreaterThanEqualTo,
        Equal,
        NotEqual,
    ]);

    pub const BINARY_OPERATORS: TokenSet = TRIO_OPERATORS.union(TokenSet::new(&[
        KwMeta,
        KwAs,
        KwIs,
        KwAnd,
        KwOr,
        NullCoalescingOperator,
    ]));

    pub const LITERALS: TokenSet = TokenSet::new(&[
        NumericLiteral,
        HexLiteral,
        TextLiteral,
        KwTrue,
        KwFalse,
        KwNull,
        KwHashInfinity,
        KwHashNan,
    ]);

    /// `#`-keywords that read as identifier expressions: `#date(2024, 1, 1)`.
    pub const KEYWORD_IDENTIFIERS: TokenSet = TokenSet::new(&[
        KwHashBinary,
        KwHashDate,
        KwHashDateTime,
        KwHashDateTimeZone,
        KwHashDuration,
        KwHashSections,
        KwHashShared,
        KwHashTable,
        KwHashTime,
    ]);

    pub const IDENTIFIERS: TokenSet = TokenSet::new(&[Identifier, QuotedIdentifier]);

    pub const PRIMARY_EXPRESSION_FIRST: TokenSet = LITERALS
        .union(KEYWORD_IDENTIFIERS)
        .union(IDENTIFIERS)
        .union(TokenSet::new(&[
            AtSign,
            ParenOpen,
            BracketOpen,
            BraceOpen,
            Ellipsis,
        ]));

    /// Suffixes that turn a primary expression into a recursive primary expression.
    pub const RECURSIVE_PRIMARY_SUFFIXES: TokenSet =
        TokenSet::new(&[BraceOpen, BracketOpen, ParenOpen]);

    /// Tokens after which `nullable` is not a type prefix.
    pub const TYPE_CLOSERS: TokenSet = TokenSet::new(&[
        ParenClose,
        BracketClose,
        BraceClose,
        Comma,
        Semicolon,
        Equal,
        FatArrow,
    ]);

    /// Terminators of a generalized identifier inside brackets.
    pub const GENERALIZED_IDENTIFIER_END: TokenSet =
        TokenSet::new(&[Equal, BracketClose, Comma]);
}
