use crate::{TokenKind, lex, token_text};
use indoc::indoc;

fn snapshot(input: &str) -> String {
    let snapshot = lex(input);
    let mut out = String::new();
    for token in snapshot.tokens() {
        out.push_str(&format!(
            "{:?} {:?}\n",
            token.kind,
            token_text(input, token)
        ));
    }
    out
}

#[test]
fn punctuation() {
    insta::assert_snapshot!(snapshot("( ) [ ] { } , ; @ ? ?? => .. ..."), @r#"
    ParenOpen "("
    ParenClose ")"
    BracketOpen "["
    BracketClose "]"
    BraceOpen "{"
    BraceClose "}"
    Comma ","
    Semicolon ";"
    AtSign "@"
    QuestionMark "?"
    NullCoalescingOperator "??"
    FatArrow "=>"
    DotDot ".."
    Ellipsis "..."
    "#);
}

#[test]
fn operators() {
    insta::assert_snapshot!(snapshot("= <> < <= > >= + - * / &"), @r#"
    Equal "="
    NotEqual "<>"
    LessThan "<"
    LessThanEqualTo "<="
    GreaterThan ">"
    GreaterThanEqualTo ">="
    Plus "+"
    Minus "-"
    Asterisk "*"
    Division "/"
    Ampersand "&"
    "#);
}

#[test]
fn keywords_and_identifiers() {
    insta::assert_snapshot!(snapshot("let letter in index Table.AddColumn _x"), @r#"
    KwLet "let"
    Identifier "letter"
    KwIn "in"
    Identifier "index"
    Identifier "Table.AddColumn"
    Identifier "_x"
    "#);
}

#[test]
fn hash_keywords() {
    insta::assert_snapshot!(snapshot("#date #datetime #datetimezone #infinity #nan #sections #shared"), @r##"
    KwHashDate "#date"
    KwHashDateTime "#datetime"
    KwHashDateTimeZone "#datetimezone"
    KwHashInfinity "#infinity"
    KwHashNan "#nan"
    KwHashSections "#sections"
    KwHashShared "#shared"
    "##);
}

#[test]
fn quoted_identifier() {
    insta::assert_snapshot!(snapshot(r#"#"Column 1" #"say ""hi""""#), @r##"
    QuotedIdentifier "#\"Column 1\""
    QuotedIdentifier "#\"say \"\"hi\"\"\""
    "##);
}

#[test]
fn numbers() {
    insta::assert_snapshot!(snapshot("1 1.5 .5 1e10 2.5E-3 0xFF"), @r#"
    NumericLiteral "1"
    NumericLiteral "1.5"
    NumericLiteral ".5"
    NumericLiteral "1e10"
    NumericLiteral "2.5E-3"
    HexLiteral "0xFF"
    "#);
}

#[test]
fn range_between_numbers() {
    insta::assert_snapshot!(snapshot("{1..10}"), @r#"
    BraceOpen "{"
    NumericLiteral "1"
    DotDot ".."
    NumericLiteral "10"
    BraceClose "}"
    "#);
}

#[test]
fn text_literal_with_escaped_quote() {
    insta::assert_snapshot!(snapshot(r#""a ""b"" c""#), @r#"
    TextLiteral "\"a \"\"b\"\" c\""
    "#);
}

#[test]
fn comments_are_kept_aside() {
    let input = indoc! {r#"
    // leading
    1 /* inline */ + 2
    "#};

    let snapshot = lex(input);
    let kinds: Vec<_> = snapshot.tokens().iter().map(|t| t.kind).collect();
    let comments: Vec<_> = snapshot
        .comments()
        .iter()
        .map(|t| token_text(input, t))
        .collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::NumericLiteral,
            TokenKind::Plus,
            TokenKind::NumericLiteral
        ]
    );
    assert_eq!(comments, vec!["// leading", "/* inline */"]);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("1 $$$ 2"), @r#"
    NumericLiteral "1"
    Garbage "$$$"
    NumericLiteral "2"
    "#);
}

#[test]
fn span_of_token_range() {
    let snapshot = lex("a + bc");

    assert_eq!(u32::from(snapshot.span_of(0, 3).start()), 0);
    assert_eq!(u32::from(snapshot.span_of(0, 3).end()), 6);
    assert!(snapshot.span_of(1, 1).is_empty());
    assert_eq!(u32::from(snapshot.span_of(1, 1).start()), 2);
    assert_eq!(u32::from(snapshot.span_of(3, 3).start()), 6);
}

#[test]
fn keyword_classification() {
    assert!(TokenKind::KwMeta.is_keyword());
    assert!(TokenKind::KwHashTime.is_keyword());
    assert!(!TokenKind::Identifier.is_keyword());
    assert!(!TokenKind::Ellipsis.is_keyword());
}

#[test]
fn token_json() {
    let snapshot = lex("x");
    let json = serde_json::to_string(&snapshot.tokens()[0]).unwrap();

    insta::assert_snapshot!(json, @r#"{"kind":"Identifier","span":{"start":0,"end":1}}"#);
}
