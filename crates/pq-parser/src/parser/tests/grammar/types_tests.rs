use crate::ParseErrorKind;
use crate::test_utils::*;

#[test]
fn primitive_type_expression() {
    let input = "type text";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    TypePrimaryType
      Constant "type"
      PrimitiveType "text"
    "#);
}

#[test]
fn bare_table_is_primitive() {
    let input = "type table";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    TypePrimaryType
      Constant "type"
      PrimitiveType "table"
    "#);
}

#[test]
fn nullable_type() {
    let input = "type nullable number";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    TypePrimaryType
      Constant "type"
      NullableType
        Constant "nullable"
        PrimitiveType "number"
    "#);
}

#[test]
fn list_type() {
    let input = "type {number}";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    TypePrimaryType
      Constant "type"
      ListType
        Constant "{"
        PrimitiveType "number"
        Constant "}"
    "#);
}

#[test]
fn record_type_with_untyped_field() {
    let input = "type [a, b = text]";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    TypePrimaryType
      Constant "type"
      RecordType
        FieldSpecificationList
          Constant "["
          ArrayWrapper
            Csv
              FieldSpecification
                GeneralizedIdentifier "a"
              Constant ","
            Csv
              FieldSpecification
                GeneralizedIdentifier "b"
                FieldTypeSpecification
                  Constant "="
                  PrimitiveType "text"
          Constant "]"
    "#);
}

#[test]
fn open_table_type() {
    let input = "type table [a = number, optional b = nullable text, ...]";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    TypePrimaryType
      Constant "type"
      TableType
        Constant "table"
        FieldSpecificationList
          Constant "["
          ArrayWrapper
            Csv
              FieldSpecification
                GeneralizedIdentifier "a"
                FieldTypeSpecification
                  Constant "="
                  PrimitiveType "number"
              Constant ","
            Csv
              FieldSpecification
                Constant "optional"
                GeneralizedIdentifier "b"
                FieldTypeSpecification
                  Constant "="
                  NullableType
                    Constant "nullable"
                    PrimitiveType "text"
              Constant ","
          Constant "..."
          Constant "]"
    "#);
}

#[test]
fn table_type_from_row_expression() {
    let input = "type table Row";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    TypePrimaryType
      Constant "type"
      TableType
        Constant "table"
        IdentifierExpression
          Identifier "Row"
    "#);
}

#[test]
fn function_type() {
    let input = "type function (x as number, optional y as text) as logical";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    TypePrimaryType
      Constant "type"
      FunctionType
        Constant "function"
        ParameterList
          Constant "("
          ArrayWrapper
            Csv
              Parameter
                Identifier "x"
                AsType
                  Constant "as"
                  PrimitiveType "number"
              Constant ","
            Csv
              Parameter
                Constant "optional"
                Identifier "y"
                AsType
                  Constant "as"
                  PrimitiveType "text"
          Constant ")"
        AsType
          Constant "as"
          PrimitiveType "logical"
    "#);
}

#[test]
fn field_named_optional() {
    let input = "type [optional]";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    TypePrimaryType
      Constant "type"
      RecordType
        FieldSpecificationList
          Constant "["
          ArrayWrapper
            Csv
              FieldSpecification
                GeneralizedIdentifier "optional"
          Constant "]"
    "#);
}

#[test]
fn unknown_primitive_type() {
    let input = "type foo";

    let error = expect_parse_error(input);

    assert_eq!(error.kind, ParseErrorKind::InvalidPrimitiveType);
    insta::assert_snapshot!(error.to_string(), @"error at 5..8: expected a primitive type, found identifier");
}

#[test]
fn function_type_requires_parameter_types() {
    let input = "type function (x) as number";

    let error = expect_parse_error(input);

    assert_eq!(
        error.kind,
        ParseErrorKind::ExpectedTokenKind {
            expected: pq_lexer::TokenKind::KwAs
        }
    );
    assert_eq!(error.token_index, 4);
}

#[test]
fn dangling_comma_in_record_type() {
    let input = "type [a = number,]";

    let error = expect_parse_error(input);

    insta::assert_snapshot!(error.to_string(), @"error at 17..18: expected another item after `,`");
}
