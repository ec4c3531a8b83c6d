//! Builder tests: SQL text to query descriptors

use model::{
    core::value::Value,
    query::{
        descriptor::{FilterClause, QueryDescriptor},
        join::{JoinPredicate, JoinSpec},
    },
};
use sql_syntax::{ParseError, parse};

#[test]
fn test_simple_select() {
    let query = parse("SELECT id, name FROM people").unwrap();
    assert_eq!(
        query,
        QueryDescriptor::new("people", vec!["id".into(), "name".into()])
    );
}

#[test]
fn test_where_clauses_keep_order_and_literal_types() {
    let query = parse(
        "SELECT name FROM people WHERE id > 1 AND score <= 2.5 AND name = 'O''Brien' \
         AND city != Paris AND boss = null",
    )
    .unwrap();

    assert_eq!(
        query.where_clauses,
        vec![
            FilterClause::new("id", ">", Value::Int(1)),
            FilterClause::new("score", "<=", Value::Float(2.5)),
            FilterClause::new("name", "=", Value::from("O'Brien")),
            FilterClause::new("city", "!=", Value::from("Paris")),
            FilterClause::new("boss", "=", Value::Null),
        ]
    );
}

#[test]
fn test_quoted_numbers_stay_strings() {
    let query = parse("SELECT id FROM t WHERE code = '007'").unwrap();
    assert_eq!(query.where_clauses[0].value, Value::from("007"));
}

#[test]
fn test_unsupported_operator_is_kept_verbatim() {
    let query = parse("SELECT id FROM t WHERE id == 1").unwrap();
    assert_eq!(query.where_clauses[0].operator, "==");
}

#[test]
fn test_join_types() {
    let cases = [
        ("JOIN", "INNER"),
        ("INNER JOIN", "INNER"),
        ("left join", "LEFT"),
        ("LEFT OUTER JOIN", "LEFT"),
        ("Right Join", "RIGHT"),
        ("RIGHT OUTER JOIN", "RIGHT"),
    ];

    for (clause, expected) in cases {
        let sql = format!(
            "SELECT orders.id, customers.name FROM orders {clause} customers \
             ON orders.cust = customers.id"
        );
        let query = parse(&sql).unwrap();
        assert_eq!(
            query.join,
            Some(JoinSpec::new(
                expected,
                "customers",
                JoinPredicate::new("orders.cust", "customers.id"),
            )),
            "{clause}"
        );
    }
}

#[test]
fn test_join_with_where() {
    let query = parse(
        "SELECT orders.id FROM orders LEFT JOIN customers ON orders.cust = customers.id \
         WHERE customers.name = 'x';",
    )
    .unwrap();
    assert_eq!(query.fields, vec!["orders.id"]);
    assert_eq!(query.joined_table(), Some("customers"));
    assert_eq!(
        query.where_clauses,
        vec![FilterClause::new("customers.name", "=", Value::from("x"))]
    );
}

#[test]
fn test_descriptor_serializes_to_json() {
    let query = parse("SELECT id FROM t WHERE id > 1").unwrap();
    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "fields": ["id"],
            "table": "t",
            "where_clauses": [{"field": "id", "operator": ">", "value": 1}],
            "join": null
        })
    );
}

#[test]
fn test_syntax_errors_carry_position() {
    let err = parse("SELECT id\nFROM people\nWHERE id >").unwrap_err();
    match &err {
        ParseError::Syntax { line, .. } => assert_eq!(*line, 3),
        other => panic!("Expected syntax error, got {other:?}"),
    }
    assert!(err.format_error().contains('^'));
}
