use crate::test_utils::*;
use crate::{ParseSettings, parse};

#[test]
fn error_json_serialization() {
    let error = expect_parse_error("1 2");
    let json = serde_json::to_string_pretty(&error).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "kind": "UnusedTokensRemain",
      "token": {
        "kind": "NumericLiteral",
        "span": {
          "start": 2,
          "end": 3
        }
      },
      "token_index": 1,
      "range": {
        "start": 2,
        "end": 3
      }
    }
    "#);
}

#[test]
fn error_json_serialization_with_related_span() {
    let error = expect_parse_error("{1");
    let json = serde_json::to_string_pretty(&error).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "kind": {
        "UnterminatedSequence": {
          "opener": "BraceOpen"
        }
      },
      "token": null,
      "token_index": 2,
      "range": {
        "start": 0,
        "end": 2
      },
      "related": {
        "range": {
          "start": 0,
          "end": 1
        },
        "message": "`{` opened here"
      }
    }
    "#);
}

#[test]
fn node_json_serialization() {
    let document = parse("1").unwrap();
    let root = document.registry.ast(document.root).unwrap();
    let json = serde_json::to_string_pretty(root).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "id": 1,
      "kind": "LiteralExpression",
      "tokens": {
        "start": 0,
        "end": 1
      },
      "span": {
        "start": 0,
        "end": 1
      },
      "is_leaf": true,
      "data": {
        "Literal": {
          "literal": "1",
          "kind": "Numeric"
        }
      }
    }
    "#);
}

#[test]
fn settings_round_trip_through_json() {
    let json = serde_json::to_string(&ParseSettings::default()).unwrap();
    insta::assert_snapshot!(json, @r#"{"strategy":"Combinatorial","disambiguation":"Thorough","recursion_limit":256}"#);

    let settings: ParseSettings = serde_json::from_str(
        r#"{"strategy":"Naive","disambiguation":"Strict","recursion_limit":null}"#,
    )
    .unwrap();
    assert_eq!(settings.recursion_limit, None);
    assert_eq!(settings.strategy, crate::Strategy::Naive);
}
