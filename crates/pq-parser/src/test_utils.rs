use pq_lexer::lex;

use crate::{
    Disambiguation, Document, DocumentResult, Error, ParseError, ParseSettings, Parser, Strategy,
};

pub fn parse_with(source: &str, strategy: Strategy, disambiguation: Disambiguation) -> Result<Document, Error> {
    let snapshot = lex(source);
    Parser::new(&snapshot)
        .with_settings(ParseSettings {
            strategy,
            disambiguation,
            ..ParseSettings::default()
        })
        .parse_document()
}

pub fn try_parse_with(source: &str, strategy: Strategy) -> DocumentResult {
    let snapshot = lex(source);
    Parser::new(&snapshot)
        .with_strategy(strategy)
        .try_parse_document()
}

pub fn dump(document: &Document, source: &str) -> String {
    document.printer(source).dump()
}

#[track_caller]
fn expect_document(source: &str, strategy: Strategy, disambiguation: Disambiguation) -> Document {
    match parse_with(source, strategy, disambiguation) {
        Ok(document) => document,
        Err(Error::Parse(error)) => panic!(
            "Expected valid document with {strategy:?}/{disambiguation:?}, got error:\n{}",
            error.render(source)
        ),
        Err(error) => panic!("Expected valid document, got {error}"),
    }
}

/// Parses `source` with every strategy and disambiguation mode, checks that all
/// of them build the same tree, and returns the dump.
#[track_caller]
pub fn expect_tree(source: &str) -> String {
    let reference = expect_document(source, Strategy::Naive, Disambiguation::Strict);
    let reference_dump = reference.printer(source).with_spans(true).dump();

    for (strategy, disambiguation) in [
        (Strategy::Naive, Disambiguation::Thorough),
        (Strategy::Combinatorial, Disambiguation::Strict),
        (Strategy::Combinatorial, Disambiguation::Thorough),
    ] {
        let document = expect_document(source, strategy, disambiguation);
        let document_dump = document.printer(source).with_spans(true).dump();
        assert_eq!(
            reference_dump, document_dump,
            "{strategy:?}/{disambiguation:?} disagrees with Naive/Strict for {source:?}"
        );
        assert_eq!(reference.kind, document.kind);
    }

    dump(&reference, source)
}

/// Like [`expect_tree`], with token ranges.
#[track_caller]
pub fn expect_tree_with_spans(source: &str) -> String {
    expect_tree(source);
    let document = expect_document(source, Strategy::Combinatorial, Disambiguation::Thorough);
    document.printer(source).with_spans(true).dump()
}

/// Parses `source` with both strategies, checks that they fail identically, and
/// returns the parse error.
#[track_caller]
pub fn expect_parse_error(source: &str) -> ParseError {
    let naive = parse_with(source, Strategy::Naive, Disambiguation::Thorough);
    let combined = parse_with(source, Strategy::Combinatorial, Disambiguation::Thorough);

    let naive = match naive {
        Err(Error::Parse(error)) => error,
        Err(error) => panic!("Expected parse error, got {error}"),
        Ok(document) => panic!(
            "Expected parse error, got document:\n{}",
            dump(&document, source)
        ),
    };
    let combined = match combined {
        Err(Error::Parse(error)) => error,
        other => panic!("Combinatorial strategy disagrees: {other:?}"),
    };
    assert_eq!(naive, combined, "strategies report different errors for {source:?}");
    naive
}

/// Rendered diagnostic for `source`, which must fail to parse.
#[track_caller]
pub fn expect_error(source: &str) -> String {
    expect_parse_error(source).render(source)
}
