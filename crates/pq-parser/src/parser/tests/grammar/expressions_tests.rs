use crate::test_utils::*;
use indoc::indoc;

#[test]
fn let_expression() {
    let input = "let x = 1, y = x + 1 in y";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    LetExpression
      Constant "let"
      ArrayWrapper
        Csv
          IdentifierPairedExpression
            Identifier "x"
            Constant "="
            LiteralExpression "1"
          Constant ","
        Csv
          IdentifierPairedExpression
            Identifier "y"
            Constant "="
            ArithmeticExpression
              IdentifierExpression
                Identifier "x"
              Constant "+"
              LiteralExpression "1"
      Constant "in"
      IdentifierExpression
        Identifier "y"
    "#);
}

#[test]
fn let_expression_over_lines() {
    let input = indoc! {r#"
    let
        Source = 1,
        Doubled = Source * 2
    in
        Doubled
    "#};

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    LetExpression
      Constant "let"
      ArrayWrapper
        Csv
          IdentifierPairedExpression
            Identifier "Source"
            Constant "="
            LiteralExpression "1"
          Constant ","
        Csv
          IdentifierPairedExpression
            Identifier "Doubled"
            Constant "="
            ArithmeticExpression
              IdentifierExpression
                Identifier "Source"
              Constant "*"
              LiteralExpression "2"
      Constant "in"
      IdentifierExpression
        Identifier "Doubled"
    "#);
}

#[test]
fn if_expression() {
    let input = "if x > 0 then \"pos\" else \"neg\"";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    IfExpression
      Constant "if"
      RelationalExpression
        IdentifierExpression
          Identifier "x"
        Constant ">"
        LiteralExpression "0"
      Constant "then"
      LiteralExpression "\"pos\""
      Constant "else"
      LiteralExpression "\"neg\""
    "#);
}

#[test]
fn each_with_implicit_field_access() {
    let input = "each [Price] * 2";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    EachExpression
      Constant "each"
      ArithmeticExpression
        FieldSelector
          Constant "["
          GeneralizedIdentifier "Price"
          Constant "]"
        Constant "*"
        LiteralExpression "2"
    "#);
}

#[test]
fn function_expression() {
    let input = "(x, optional y as number) => x";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    FunctionExpression
      ParameterList
        Constant "("
        ArrayWrapper
          Csv
            Parameter
              Identifier "x"
            Constant ","
          Csv
            Parameter
              Constant "optional"
              Identifier "y"
              AsNullablePrimitiveType
                Constant "as"
                PrimitiveType "number"
        Constant ")"
      Constant "=>"
      IdentifierExpression
        Identifier "x"
    "#);
}

#[test]
fn function_expression_with_return_type() {
    let input = "(x) as nullable text => x";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    FunctionExpression
      ParameterList
        Constant "("
        ArrayWrapper
          Csv
            Parameter
              Identifier "x"
        Constant ")"
      AsNullablePrimitiveType
        Constant "as"
        NullablePrimitiveType
          Constant "nullable"
          PrimitiveType "text"
      Constant "=>"
      IdentifierExpression
        Identifier "x"
    "#);
}

#[test]
fn function_without_parameters() {
    let input = "() => 1";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    FunctionExpression
      ParameterList
        Constant "("
        ArrayWrapper
        Constant ")"
      Constant "=>"
      LiteralExpression "1"
    "#);
}

#[test]
fn parenthesized_expression_at_expression_start() {
    let input = "(1 + 2) * 3";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    ArithmeticExpression
      ParenthesizedExpression
        Constant "("
        ArithmeticExpression
          LiteralExpression "1"
          Constant "+"
          LiteralExpression "2"
        Constant ")"
      Constant "*"
      LiteralExpression "3"
    "#);
}

#[test]
fn try_otherwise() {
    let input = "try Number.From(x) otherwise 0";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    ErrorHandlingExpression
      Constant "try"
      RecursivePrimaryExpression
        IdentifierExpression
          Identifier "Number.From"
        ArrayWrapper
          InvokeExpression
            Constant "("
            ArrayWrapper
              Csv
                IdentifierExpression
                  Identifier "x"
            Constant ")"
      OtherwiseExpression
        Constant "otherwise"
        LiteralExpression "0"
    "#);
}

#[test]
fn try_catch_with_error() {
    let input = "try error \"boom\" catch (e) => e[Message]";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    ErrorHandlingExpression
      Constant "try"
      ErrorRaisingExpression
        Constant "error"
        LiteralExpression "\"boom\""
      CatchExpression
        Constant "catch"
        FunctionExpression
          ParameterList
            Constant "("
            ArrayWrapper
              Csv
                Parameter
                  Identifier "e"
            Constant ")"
          Constant "=>"
          RecursivePrimaryExpression
            IdentifierExpression
              Identifier "e"
            ArrayWrapper
              FieldSelector
                Constant "["
                GeneralizedIdentifier "Message"
                Constant "]"
    "#);
}

#[test]
fn try_without_handler() {
    let input = "try x";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    ErrorHandlingExpression
      Constant "try"
      IdentifierExpression
        Identifier "x"
    "#);
}

#[test]
fn record_with_nested_list_and_range() {
    let input = "[a = 1, b = {1, 2..3}]";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    RecordExpression
      Constant "["
      ArrayWrapper
        Csv
          GeneralizedIdentifierPairedExpression
            GeneralizedIdentifier "a"
            Constant "="
            LiteralExpression "1"
          Constant ","
        Csv
          GeneralizedIdentifierPairedExpression
            GeneralizedIdentifier "b"
            Constant "="
            ListExpression
              Constant "{"
              ArrayWrapper
                Csv
                  LiteralExpression "1"
                  Constant ","
                Csv
                  RangeExpression
                    LiteralExpression "2"
                    Constant ".."
                    LiteralExpression "3"
              Constant "}"
      Constant "]"
    "#);
}

#[test]
fn empty_record_and_list() {
    insta::assert_snapshot!(expect_tree("[]"), @r#"
    RecordExpression
      Constant "["
      ArrayWrapper
      Constant "]"
    "#);
    insta::assert_snapshot!(expect_tree("{}"), @r#"
    ListExpression
      Constant "{"
      ArrayWrapper
      Constant "}"
    "#);
}

#[test]
fn record_with_generalized_identifier_keys() {
    let input = "[Unit Price = 1, type = 2]";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    RecordExpression
      Constant "["
      ArrayWrapper
        Csv
          GeneralizedIdentifierPairedExpression
            GeneralizedIdentifier "Unit Price"
            Constant "="
            LiteralExpression "1"
          Constant ","
        Csv
          GeneralizedIdentifierPairedExpression
            GeneralizedIdentifier "type"
            Constant "="
            LiteralExpression "2"
      Constant "]"
    "#);
}

#[test]
fn item_access_then_optional_field() {
    let input = "Source{0}[Name]?";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    RecursivePrimaryExpression
      IdentifierExpression
        Identifier "Source"
      ArrayWrapper
        ItemAccessExpression
          Constant "{"
          LiteralExpression "0"
          Constant "}"
        FieldSelector
          Constant "["
          GeneralizedIdentifier "Name"
          Constant "]"
          Constant "?"
    "#);
}

#[test]
fn field_projection() {
    let input = "x[[a], [b]]";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    RecursivePrimaryExpression
      IdentifierExpression
        Identifier "x"
      ArrayWrapper
        FieldProjection
          Constant "["
          ArrayWrapper
            Csv
              FieldSelector
                Constant "["
                GeneralizedIdentifier "a"
                Constant "]"
              Constant ","
            Csv
              FieldSelector
                Constant "["
                GeneralizedIdentifier "b"
                Constant "]"
          Constant "]"
    "#);
}

#[test]
fn implicit_field_projection() {
    let input = "[[a]]?";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    FieldProjection
      Constant "["
      ArrayWrapper
        Csv
          FieldSelector
            Constant "["
            GeneralizedIdentifier "a"
            Constant "]"
      Constant "]"
      Constant "?"
    "#);
}

#[test]
fn keyword_identifier_invocation() {
    let input = "#date(2024, 1, 1)";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r##"
    RecursivePrimaryExpression
      IdentifierExpression
        Identifier "#date"
      ArrayWrapper
        InvokeExpression
          Constant "("
          ArrayWrapper
            Csv
              LiteralExpression "2024"
              Constant ","
            Csv
              LiteralExpression "1"
              Constant ","
            Csv
              LiteralExpression "1"
          Constant ")"
    "##);
}

#[test]
fn inclusive_identifier() {
    let input = "@Fib";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    IdentifierExpression
      Constant "@"
      Identifier "Fib"
    "#);
}

#[test]
fn quoted_identifier() {
    let input = r##"#"Column 1" + 1"##;

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r##"
    ArithmeticExpression
      IdentifierExpression
        Identifier "#\"Column 1\""
      Constant "+"
      LiteralExpression "1"
    "##);
}

#[test]
fn not_implemented() {
    insta::assert_snapshot!(expect_tree("..."), @r#"
    NotImplementedExpression
      Constant "..."
    "#);
}

#[test]
fn stacked_unary_operators() {
    let input = "- -1";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    UnaryExpression
      ArrayWrapper
        Constant "-"
        Constant "-"
      LiteralExpression "1"
    "#);
}

#[test]
fn literals() {
    let input = "{null, true, 0xFF, 1.5e3, \"a\"\"b\"}";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    ListExpression
      Constant "{"
      ArrayWrapper
        Csv
          LiteralExpression "null"
          Constant ","
        Csv
          LiteralExpression "true"
          Constant ","
        Csv
          LiteralExpression "0xFF"
          Constant ","
        Csv
          LiteralExpression "1.5e3"
          Constant ","
        Csv
          LiteralExpression "\"a\"\"b\""
      Constant "}"
    "#);
}

#[test]
fn token_ranges() {
    let input = "let x = 1 in x";

    let res = expect_tree_with_spans(input);

    insta::assert_snapshot!(res, @r#"
    LetExpression [0..6]
      Constant "let" [0..1]
      ArrayWrapper [1..4]
        Csv [1..4]
          IdentifierPairedExpression [1..4]
            Identifier "x" [1..2]
            Constant "=" [2..3]
            LiteralExpression "1" [3..4]
      Constant "in" [4..5]
      IdentifierExpression [5..6]
        Identifier "x" [5..6]
    "#);
}
