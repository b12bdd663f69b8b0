use pretty_assertions::assert_eq;
use satchel_core::Value;
use satchel_sql::{Condition, WhereBuilder};

#[test]
fn chained_equality_predicates() {
    let builder = WhereBuilder::create()
        .and_where_equal_to("a", 1)
        .and_where_equal_to("b", "x");

    assert_eq!(builder.selection(), Some("a=? AND b=?"));
    assert_eq!(builder.selection_args(), vec!["1", "x"]);
}

#[test]
fn first_predicate_drops_its_connective() {
    let builder = WhereBuilder::create().or_where_equal_to("a", 1);
    assert_eq!(builder.selection(), Some("a=?"));
}

#[test]
fn comparison_operators() {
    let builder = WhereBuilder::create()
        .add_where_greater_than("age", 18)
        .and_where_less_than_or_equal_to("age", 65)
        .or_where_not_equal_to("name", "root")
        .and_where_greater_than_or_equal_to("score", 1.5)
        .and_where_less_than("score", 9.5);

    assert_eq!(
        builder.selection(),
        Some("age>? AND age<=? OR name!=? AND score>=? AND score<?")
    );
    assert_eq!(
        builder.selection_args(),
        vec!["18", "65", "root", "1.5", "9.5"]
    );
}

#[test]
fn in_clause_placeholder_arity_matches_values() {
    let builder = WhereBuilder::create().add_where_in("col", ["a", "b", "c"]);

    let selection = builder.selection().unwrap();
    assert_eq!(selection, "col IN (?,?,?)");
    // One leading placeholder plus one comma-placeholder per remaining value.
    assert_eq!(selection.matches(",?").count(), 2);
    assert_eq!(builder.selection_args(), vec!["a", "b", "c"]);
}

#[test]
fn and_where_in_appends_with_connective() {
    let builder = WhereBuilder::create()
        .add_where_equal_to("kind", 2)
        .and_where_in("state", [1, 2]);

    assert_eq!(builder.selection(), Some("kind=? AND state IN (?,?)"));
    assert_eq!(builder.selection_args(), vec!["2", "1", "2"]);
}

#[test]
fn build_prefixes_where_keyword() {
    let builder = WhereBuilder::create().add_where_equal_to("a", 1);
    assert_eq!(builder.build(), " WHERE a=?");
}

#[test]
fn build_returns_single_space_sentinel_when_empty() {
    // The sentinel is a literal single space, not the empty string.
    assert_eq!(WhereBuilder::create().build(), " ");
}

#[test]
fn explicit_parentheses_are_literal() {
    let builder = WhereBuilder::create()
        .parentheses_left()
        .add_where_equal_to("a", 1)
        .or_where_equal_to("b", 2)
        .parentheses_right()
        .and_where_equal_to("c", 3);

    assert_eq!(builder.selection(), Some("(a=? OR b=?) AND c=?"));
}

#[test]
fn not_clause_wraps_and_negates() {
    let builder = WhereBuilder::create()
        .add_where_equal_to("a", 1)
        .and_not_clause("b=?", vec![Value::from(2)]);

    assert_eq!(builder.selection(), Some("a=? AND  NOT (b=?)"));
    assert_eq!(builder.selection_args(), vec!["1", "2"]);
}

#[test]
fn nested_builder_joins_as_fragment() {
    let nested = WhereBuilder::create()
        .add_where_equal_to("b", 2)
        .or_where_equal_to("c", 3);
    let builder = WhereBuilder::create()
        .add_where_equal_to("a", 1)
        .and_group(nested);

    assert_eq!(builder.selection(), Some("a=? AND b=? OR c=?"));
    assert_eq!(builder.selection_args(), vec!["1", "2", "3"]);
}

#[test]
fn not_group_parenthesizes_nested_clause() {
    let nested = WhereBuilder::create().add_where_equal_to("b", 2);
    let builder = WhereBuilder::create()
        .add_where_equal_to("a", 1)
        .and_not_group(nested);

    assert_eq!(builder.selection(), Some("a=? AND  NOT (b=?)"));
}

#[test]
fn condition_replaces_accumulated_state() {
    let condition = Condition::new("x=?", vec!["9".to_string()]);
    let builder = WhereBuilder::create()
        .add_where_equal_to("a", 1)
        .where_condition(&condition);

    assert_eq!(builder.selection(), Some("x=?"));
    assert_eq!(builder.selection_args(), vec!["9"]);
}

#[test]
fn args_are_stringified_in_append_order() {
    let builder = WhereBuilder::create()
        .add_where_equal_to("a", true)
        .and_where_equal_to("b", 7i64)
        .and_where_equal_to("c", 'z');

    assert_eq!(builder.selection_args(), vec!["true", "7", "z"]);
}
