use pq_lexer::TokenKind;

use crate::test_utils::*;
use crate::{CsvContinuationKind, ParseErrorKind};

#[test]
fn unterminated_list() {
    let input = "{1, 2";

    let error = expect_parse_error(input);

    assert_eq!(
        error.kind,
        ParseErrorKind::UnterminatedSequence {
            opener: TokenKind::BraceOpen
        }
    );
    assert_eq!(error.token, None);
    let related = error.related.as_ref().unwrap();
    assert_eq!(related.message, "`{` opened here");
    insta::assert_snapshot!(error.to_string(), @"error at 0..5: missing closing `}`");
}

#[test]
fn unterminated_list_rendered() {
    let res = expect_error("{1, 2");

    insta::assert_snapshot!(res, @r"
    error: missing closing `}`
      |
    1 | {1, 2
      | -^^^^
      | |
      | `{` opened here
    ");
}

#[test]
fn wrong_closing_token() {
    let input = "(1 2)";

    let error = expect_parse_error(input);

    assert_eq!(
        error.kind,
        ParseErrorKind::ExpectedClosingTokenKind {
            expected: TokenKind::ParenClose
        }
    );
    insta::assert_snapshot!(error.to_string(), @"error at 3..4: expected closing `)`, found number");
}

#[test]
fn dangling_comma_in_list() {
    let input = "{1, }";

    let error = expect_parse_error(input);

    assert_eq!(
        error.kind,
        ParseErrorKind::ExpectedCsvContinuation {
            continuation: CsvContinuationKind::DanglingComma
        }
    );
    insta::assert_snapshot!(error.to_string(), @"error at 4..5: expected another item after `,`");
}

#[test]
fn dangling_comma_before_in() {
    let input = "let a = 1, in a";

    let error = expect_parse_error(input);

    assert_eq!(
        error.kind,
        ParseErrorKind::ExpectedCsvContinuation {
            continuation: CsvContinuationKind::DanglingComma
        }
    );
    assert_eq!(error.token_index, 5);
}

#[test]
fn missing_comma_between_let_bindings() {
    let res = expect_error("let a = 1 b = 2 in a");

    insta::assert_snapshot!(res, @r"
    error: expected `,` between let bindings
      |
    1 | let a = 1 b = 2 in a
      |           ^
    ");
}

#[test]
fn missing_in() {
    let input = "let a = 1";

    let error = expect_parse_error(input);

    assert_eq!(
        error.kind,
        ParseErrorKind::ExpectedTokenKind {
            expected: TokenKind::KwIn
        }
    );
    insta::assert_snapshot!(error.to_string(), @"error at 9..9: expected `in`, found end of input");
}

#[test]
fn required_parameter_after_optional() {
    let input = "(optional a, b) => a";

    let error = expect_parse_error(input);

    assert_eq!(
        error.kind,
        ParseErrorKind::RequiredParameterAfterOptionalParameter
    );
    assert_eq!(error.token_index, 4);
    insta::assert_snapshot!(error.to_string(), @"error at 13..14: required parameter follows an optional parameter");
}

#[test]
fn catch_handler_with_two_parameters() {
    let input = "try x catch (a, b) => a";

    let error = expect_parse_error(input);

    assert_eq!(error.kind, ParseErrorKind::InvalidCatchFunction);
    assert_eq!(error.token_index, 3);
    insta::assert_snapshot!(error.to_string(), @"error at 12..23: catch handler must be a function with at most one untyped parameter");
}

#[test]
fn catch_handler_with_typed_parameter() {
    let input = "try x catch (e as record) => e";

    let error = expect_parse_error(input);

    assert_eq!(error.kind, ParseErrorKind::InvalidCatchFunction);
}

#[test]
fn catch_handler_without_parameters() {
    let res = expect_tree("try x catch () => 0");

    insta::assert_snapshot!(res, @r#"
    ErrorHandlingExpression
      Constant "try"
      IdentifierExpression
        Identifier "x"
      CatchExpression
        Constant "catch"
        FunctionExpression
          ParameterList
            Constant "("
            ArrayWrapper
            Constant ")"
          Constant "=>"
          LiteralExpression "0"
    "#);
}

#[test]
fn invalid_generalized_identifier() {
    let input = "[Column 1]";

    let error = expect_parse_error(input);

    assert_eq!(error.kind, ParseErrorKind::InvalidGeneralizedIdentifier);
    assert_eq!(error.token_index, 1);
    insta::assert_snapshot!(error.to_string(), @"error at 1..9: invalid generalized identifier");
}

#[test]
fn missing_generalized_identifier() {
    let input = "[= 1]";

    let error = expect_parse_error(input);

    assert_eq!(error.kind, ParseErrorKind::ExpectedGeneralizedIdentifier);
    insta::assert_snapshot!(error.to_string(), @"error at 1..2: expected a generalized identifier, found `=`");
}

#[test]
fn trailing_tokens() {
    let res = expect_error("1 2");

    insta::assert_snapshot!(res, @r"
    error: unexpected tokens after the end of the document
      |
    1 | 1 2
      |   ^
    ");
}

#[test]
fn unrecognized_input() {
    let input = "1 + $";

    let error = expect_parse_error(input);

    assert!(matches!(
        error.kind,
        ParseErrorKind::ExpectedAnyTokenKind { .. }
    ));
    assert_eq!(error.token.map(|token| token.kind), Some(TokenKind::Garbage));
    assert_eq!(error.token_index, 2);
}

#[test]
fn empty_input() {
    let input = "";

    let error = expect_parse_error(input);

    assert_eq!(error.token_index, 0);
    assert_eq!(error.token, None);
    assert!(matches!(
        error.kind,
        ParseErrorKind::ExpectedAnyTokenKind { .. }
    ));
}
