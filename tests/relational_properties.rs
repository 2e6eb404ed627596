//! Property-style checks of the relational operations through the public
//! API, using the tutorial's own sample datasets.

use sqltutor::datasets;
use sqltutor::error::Error;
use sqltutor::ops::aggregate::{aggregate, group_aggregate, having_gt, AggregateFunc};
use sqltutor::ops::constraint::{check_insert, Rule};
use sqltutor::ops::join::{cross_join, join, JoinKind};
use sqltutor::ops::query::{filter_eq_input, project};
use sqltutor::ops::setop::{set_op, SetOpKind};
use sqltutor::ops::txn::Session;
use sqltutor::table::Table;
use sqltutor::value::Value;

fn employees() -> Table {
    datasets::employees().unwrap()
}

fn salaries() -> Table {
    datasets::salaries().unwrap()
}

#[test]
fn inner_join_is_bounded_by_the_smaller_match_set() {
    let e = employees();
    let s = salaries();
    let inner = join(&e, &s, "emp_id", "emp_id", JoinKind::Inner, ("_e", "_s")).unwrap();
    assert!(inner.row_count() <= e.row_count().min(s.row_count()) * s.row_count());
    assert_eq!(inner.row_count(), 3);
}

#[test]
fn left_join_covers_every_left_row() {
    let e = employees();
    let s = salaries();
    let left = join(&e, &s, "emp_id", "emp_id", JoinKind::Left, ("_e", "_s")).unwrap();
    assert_eq!(left.row_count(), e.row_count());
    // every left key appears in the output
    let out_keys = left.column_values("emp_id").unwrap();
    for key in e.column_values("emp_id").unwrap() {
        assert!(out_keys.contains(&key));
    }
}

#[test]
fn full_join_counts_matched_pairs_once() {
    let e = employees();
    let s = salaries();
    let full = join(&e, &s, "emp_id", "emp_id", JoinKind::Full, ("_e", "_s")).unwrap();
    // |A| + |B| - matched pairs = 5 + 4 - 3
    assert_eq!(full.row_count(), 6);
    assert!(full.row_count() >= e.row_count().max(s.row_count()));
}

#[test]
fn cross_join_cardinality_is_exact() {
    let e = employees();
    let d = datasets::departments().unwrap();
    let cross = cross_join(&e, &d, ("_e", "_d")).unwrap();
    assert_eq!(cross.row_count(), e.row_count() * d.row_count());
}

#[test]
fn set_operation_cardinalities() {
    let a = datasets::employees_a().unwrap();
    let b = datasets::employees_b().unwrap();

    let union = set_op(SetOpKind::Union, &a, &b).unwrap();
    assert!(union.row_count() <= a.row_count() + b.row_count());

    let union_all = set_op(SetOpKind::UnionAll, &a, &b).unwrap();
    assert_eq!(union_all.row_count(), a.row_count() + b.row_count());

    let intersect = set_op(SetOpKind::Intersect, &a, &b).unwrap();
    for row in intersect.rows() {
        assert!(a.rows().contains(row) && b.rows().contains(row));
    }

    let except = set_op(SetOpKind::Except, &a, &b).unwrap();
    for row in except.rows() {
        assert!(a.rows().contains(row) && !b.rows().contains(row));
    }
}

#[test]
fn ungrouped_aggregates_match_the_worked_example() {
    // salaries 50000, 60000, 55000, 70000
    let s = salaries();
    assert_eq!(
        aggregate(&s, AggregateFunc::Sum, "salary").unwrap(),
        Value::Int(235_000)
    );
    assert_eq!(
        aggregate(&s, AggregateFunc::Avg, "salary").unwrap(),
        Value::Float(58_750.0)
    );
    assert_eq!(
        aggregate(&s, AggregateFunc::Min, "salary").unwrap(),
        Value::Int(50_000)
    );
    assert_eq!(
        aggregate(&s, AggregateFunc::Max, "salary").unwrap(),
        Value::Int(70_000)
    );
    assert_eq!(
        aggregate(&s, AggregateFunc::Count, "salary").unwrap(),
        Value::Int(4)
    );
}

#[test]
fn having_keeps_only_engineering() {
    let mut staff = datasets::small_employees().unwrap();
    staff
        .push_row(vec![
            Value::Int(4),
            Value::Str("David".into()),
            Value::Str("Engineering".into()),
            Value::Int(70_000),
        ])
        .unwrap();
    let grouped =
        group_aggregate(&staff, "department", AggregateFunc::Sum, "salary", "total").unwrap();
    let kept = having_gt(&grouped, 100_000.0).unwrap();
    assert_eq!(kept.row_count(), 1);
    assert_eq!(kept.rows()[0][0], Value::Str("Engineering".into()));
    assert_eq!(kept.rows()[0][1], Value::Int(130_000));
}

#[test]
fn duplicate_primary_key_leaves_table_unchanged() {
    let mut t = datasets::small_employees().unwrap();
    let before = t.rows().to_vec();
    let rule = Rule::PrimaryKey {
        column: "emp_id".to_string(),
    };
    let row = vec![
        Value::Int(2),
        Value::Str("Mallory".into()),
        Value::Str("HR".into()),
        Value::Int(45_000),
    ];
    let err = check_insert(&mut t, &rule, row).unwrap_err();
    assert!(matches!(err, Error::PrimaryKeyViolation(_)));
    assert_eq!(t.rows(), before.as_slice());
}

#[test]
fn rollback_restores_the_starting_stock() {
    let mut session = Session::new(datasets::products().unwrap());
    let laptop = Value::Str("Laptop".into());
    session.deduct_stock(&laptop, 3).unwrap();
    assert_eq!(session.working().rows()[0][2], Value::Int(7));
    session.rollback();
    assert_eq!(session.working().rows()[0][2], Value::Int(10));
}

#[test]
fn invalid_numeric_filter_input_is_an_error_not_an_empty_result() {
    let t = datasets::people().unwrap();
    let err = filter_eq_input(&t, "age", "thirty").unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
    // the same text against a text column is a plain (empty) match
    let ok = filter_eq_input(&t, "name", "thirty").unwrap();
    assert_eq!(ok.row_count(), 0);
}

#[test]
fn projection_then_set_op_requires_matching_schemas() {
    let a = datasets::employees_a().unwrap();
    let b = datasets::employees_b().unwrap();
    let pa = project(&a, &["name"]).unwrap();
    let err = set_op(SetOpKind::Union, &pa, &b).unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch(_)));
}
