use crate::test_utils::*;
use crate::{Disambiguation, Document, NodeKind, ParseErrorKind, Strategy, TokenRange};

/// Kinds and token ranges in preorder, walked without recursion.
fn preorder(document: &Document) -> Vec<(NodeKind, TokenRange)> {
    let mut nodes = Vec::new();
    let mut stack = vec![document.root];
    while let Some(id) = stack.pop() {
        let node = document.registry.ast(id).unwrap();
        nodes.push((node.kind, node.tokens));
        stack.extend(document.registry.children_of(id).iter().rev());
    }
    nodes
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let input = "1 + 2 * 3";

    let res = expect_tree_with_spans(input);

    insta::assert_snapshot!(res, @r#"
    ArithmeticExpression [0..5]
      LiteralExpression "1" [0..1]
      Constant "+" [1..2]
      ArithmeticExpression [2..5]
        LiteralExpression "2" [2..3]
        Constant "*" [3..4]
        LiteralExpression "3" [4..5]
    "#);
}

#[test]
fn subtraction_is_left_associative() {
    let input = "1 - 2 - 3";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    ArithmeticExpression
      ArithmeticExpression
        LiteralExpression "1"
        Constant "-"
        LiteralExpression "2"
      Constant "-"
      LiteralExpression "3"
    "#);
}

#[test]
fn arithmetic_relational_equality_levels() {
    let input = "a = b + 1 < c";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    EqualityExpression
      IdentifierExpression
        Identifier "a"
      Constant "="
      RelationalExpression
        ArithmeticExpression
          IdentifierExpression
            Identifier "b"
          Constant "+"
          LiteralExpression "1"
        Constant "<"
        IdentifierExpression
          Identifier "c"
    "#);
}

#[test]
fn concatenation_shares_additive_level() {
    let input = "a & b + c";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    ArithmeticExpression
      ArithmeticExpression
        IdentifierExpression
          Identifier "a"
        Constant "&"
        IdentifierExpression
          Identifier "b"
      Constant "+"
      IdentifierExpression
        Identifier "c"
    "#);
}

#[test]
fn and_binds_tighter_than_or() {
    let input = "a or b and c";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    LogicalExpression
      IdentifierExpression
        Identifier "a"
      Constant "or"
      LogicalExpression
        IdentifierExpression
          Identifier "b"
        Constant "and"
        IdentifierExpression
          Identifier "c"
    "#);
}

#[test]
fn or_is_left_associative() {
    let input = "a or b or c";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    LogicalExpression
      LogicalExpression
        IdentifierExpression
          Identifier "a"
        Constant "or"
        IdentifierExpression
          Identifier "b"
      Constant "or"
      IdentifierExpression
        Identifier "c"
    "#);
}

#[test]
fn null_coalescing_is_right_associative() {
    let input = "a ?? b ?? c";

    let res = expect_tree_with_spans(input);

    insta::assert_snapshot!(res, @r#"
    NullCoalescingExpression [0..5]
      IdentifierExpression [0..1]
        Identifier "a" [0..1]
      Constant "??" [1..2]
      NullCoalescingExpression [2..5]
        IdentifierExpression [2..3]
          Identifier "b" [2..3]
        Constant "??" [3..4]
        IdentifierExpression [4..5]
          Identifier "c" [4..5]
    "#);
}

#[test]
fn null_coalescing_is_loosest() {
    let input = "a or b ?? c";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    NullCoalescingExpression
      LogicalExpression
        IdentifierExpression
          Identifier "a"
        Constant "or"
        IdentifierExpression
          Identifier "b"
      Constant "??"
      IdentifierExpression
        Identifier "c"
    "#);
}

#[test]
fn as_then_is() {
    let input = "x as number is logical";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    IsExpression
      AsExpression
        IdentifierExpression
          Identifier "x"
        Constant "as"
        PrimitiveType "number"
      Constant "is"
      PrimitiveType "logical"
    "#);
}

#[test]
fn is_nullable_type() {
    let input = "x is nullable number";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    IsExpression
      IdentifierExpression
        Identifier "x"
      Constant "is"
      NullablePrimitiveType
        Constant "nullable"
        PrimitiveType "number"
    "#);
}

#[test]
fn as_takes_arithmetic_left_operand() {
    let input = "a + b as number";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    AsExpression
      ArithmeticExpression
        IdentifierExpression
          Identifier "a"
        Constant "+"
        IdentifierExpression
          Identifier "b"
      Constant "as"
      PrimitiveType "number"
    "#);
}

#[test]
fn is_then_and() {
    let input = "x is text and y";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    LogicalExpression
      IsExpression
        IdentifierExpression
          Identifier "x"
        Constant "is"
        PrimitiveType "text"
      Constant "and"
      IdentifierExpression
        Identifier "y"
    "#);
}

#[test]
fn metadata_binds_tighter_than_arithmetic() {
    let input = "a meta b + c";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    ArithmeticExpression
      MetadataExpression
        IdentifierExpression
          Identifier "a"
        Constant "meta"
        IdentifierExpression
          Identifier "b"
      Constant "+"
      IdentifierExpression
        Identifier "c"
    "#);
}

#[test]
fn unary_binds_tightest() {
    let input = "not a and -b * c";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    LogicalExpression
      UnaryExpression
        ArrayWrapper
          Constant "not"
        IdentifierExpression
          Identifier "a"
      Constant "and"
      ArithmeticExpression
        UnaryExpression
          ArrayWrapper
            Constant "-"
          IdentifierExpression
            Identifier "b"
        Constant "*"
        IdentifierExpression
          Identifier "c"
    "#);
}

#[test]
fn type_keyword_is_a_primitive_type() {
    let input = "x is type";

    let res = expect_tree(input);

    insta::assert_snapshot!(res, @r#"
    IsExpression
      IdentifierExpression
        Identifier "x"
      Constant "is"
      PrimitiveType "type"
    "#);
}

#[test]
fn unknown_type_after_is() {
    let input = "x is foo";

    let error = expect_parse_error(input);

    assert_eq!(error.kind, ParseErrorKind::InvalidPrimitiveType);
    assert_eq!(error.token_index, 2);
    insta::assert_snapshot!(error.to_string(), @"error at 5..8: expected a primitive type, found identifier");
}

#[test]
fn arithmetic_after_as_is_left_over() {
    let input = "1 as number + 2";

    let error = expect_parse_error(input);

    assert_eq!(error.kind, ParseErrorKind::UnusedTokensRemain);
    insta::assert_snapshot!(error.to_string(), @"error at 12..15: unexpected tokens after the end of the document");
}

#[test]
fn metadata_does_not_chain() {
    let input = "a meta b meta c";

    let error = expect_parse_error(input);

    assert_eq!(error.kind, ParseErrorKind::UnusedTokensRemain);
    assert_eq!(error.token_index, 3);
    insta::assert_snapshot!(error.to_string(), @"error at 9..15: unexpected tokens after the end of the document");
}

#[test]
fn as_does_not_chain() {
    let input = "x as number as text";

    let error = expect_parse_error(input);

    assert_eq!(error.kind, ParseErrorKind::UnusedTokensRemain);
    assert_eq!(error.token_index, 3);
}

#[test]
fn missing_right_operand() {
    let input = "1 +";

    let error = expect_parse_error(input);

    assert!(matches!(error.kind, ParseErrorKind::ExpectedAnyTokenKind { .. }));
    assert_eq!(error.token_index, 2);
    assert_eq!(error.token, None);
}

#[test]
fn missing_type_after_as() {
    let input = "1 as";

    let error = expect_parse_error(input);

    assert_eq!(error.kind, ParseErrorKind::InvalidPrimitiveType);
    assert_eq!(error.token_index, 2);
    insta::assert_snapshot!(error.to_string(), @"error at 4..4: expected a primitive type, found end of input");
}

#[test]
fn thousands_of_operators_fold_with_both_strategies() {
    let input = format!("1{}", " + 2 * 3 = 4".repeat(1000));
    let token_count = 1 + 6 * 1000;

    let naive = parse_with(&input, Strategy::Naive, Disambiguation::Strict).unwrap();
    let combined = parse_with(&input, Strategy::Combinatorial, Disambiguation::Thorough).unwrap();

    let root = naive.registry.ast(naive.root).unwrap();
    assert_eq!(root.kind, NodeKind::EqualityExpression);
    assert_eq!(root.tokens, TokenRange::new(0, token_count));
    assert_eq!(naive.registry.ids_of_kind(NodeKind::ArithmeticExpression).count(), 2000);
    assert_eq!(naive.registry.ids_of_kind(NodeKind::EqualityExpression).count(), 1000);
    assert_eq!(preorder(&naive), preorder(&combined));
}

#[test]
fn long_left_associative_chain_keeps_its_shape() {
    let input = format!("1{}", " - 1".repeat(4000));

    for strategy in [Strategy::Naive, Strategy::Combinatorial] {
        let document = parse_with(&input, strategy, Disambiguation::Thorough).unwrap();

        let mut current = document.root;
        let mut depth = 0;
        while let Some(node) = document.registry.ast(current)
            && node.kind == NodeKind::ArithmeticExpression
        {
            assert_eq!(node.tokens.start, 0, "{strategy:?}");
            current = document.registry.children_of(current)[0];
            depth += 1;
        }
        assert_eq!(depth, 4000, "{strategy:?}");
    }
}
