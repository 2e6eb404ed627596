//! Row mutation helpers for the data-modification demos. These operate on
//! a page-owned working copy of the seed table; leaving the page discards
//! the changes.

use crate::error::Result;
use crate::table::{Row, Table};
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Updated,
}

/// INSERT INTO: append a validated row.
pub fn insert(table: &mut Table, row: Row) -> Result<()> {
    table.push_row(row)
}

/// UPDATE ... SET set_column = value WHERE key_column = key.
/// Returns the number of rows changed.
pub fn update_where(
    table: &mut Table,
    key_column: &str,
    key: &Value,
    set_column: &str,
    value: Value,
) -> Result<usize> {
    let key_idx = table.column_index(key_column)?;
    let set_idx = table.column_index(set_column)?;
    let mut changed = 0;
    for row in table.rows_mut() {
        if row[key_idx] == *key {
            row[set_idx] = value.clone();
            changed += 1;
        }
    }
    Ok(changed)
}

/// DELETE FROM ... WHERE key_column = key. Returns the number of rows removed.
pub fn delete_where(table: &mut Table, key_column: &str, key: &Value) -> Result<usize> {
    let key_idx = table.column_index(key_column)?;
    let before = table.row_count();
    table.retain_rows(|row| row[key_idx] != *key);
    Ok(before - table.row_count())
}

/// MERGE / UPSERT on a key column: update the matching row in place, or
/// append when no row matches.
pub fn merge(table: &mut Table, key_column: &str, row: Row) -> Result<MergeOutcome> {
    let key_idx = table.column_index(key_column)?;
    let key = row
        .get(key_idx)
        .cloned()
        .unwrap_or(Value::Null);
    let existing = table
        .rows()
        .iter()
        .position(|r| r[key_idx] == key);
    match existing {
        Some(i) => {
            // append first so type checking stays in one place, then swap
            // the validated row into place
            table.push_row(row)?;
            let last = table.row_count() - 1;
            table.rows_mut().swap(i, last);
            table.rows_mut().truncate(last);
            Ok(MergeOutcome::Updated)
        }
        None => {
            table.push_row(row)?;
            Ok(MergeOutcome::Inserted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    #[test]
    fn update_changes_matching_row_only() {
        let mut t = datasets::small_employees().unwrap();
        let n = update_where(&mut t, "emp_id", &Value::Int(2), "salary", Value::Int(65000)).unwrap();
        assert_eq!(n, 1);
        assert_eq!(t.rows()[1][3], Value::Int(65000));
        assert_eq!(t.rows()[0][3], Value::Int(50000));
    }

    #[test]
    fn delete_removes_matching_row() {
        let mut t = datasets::small_employees().unwrap();
        let n = delete_where(&mut t, "emp_id", &Value::Int(3)).unwrap();
        assert_eq!(n, 1);
        assert_eq!(t.row_count(), 2);
        assert_eq!(delete_where(&mut t, "emp_id", &Value::Int(99)).unwrap(), 0);
    }

    #[test]
    fn merge_updates_or_inserts() {
        let mut t = datasets::small_employees().unwrap();
        let updated = merge(
            &mut t,
            "emp_id",
            vec![
                Value::Int(2),
                Value::Str("Bob".into()),
                Value::Str("Finance".into()),
                Value::Int(61000),
            ],
        )
        .unwrap();
        assert_eq!(updated, MergeOutcome::Updated);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.rows()[1][2], Value::Str("Finance".into()));

        let inserted = merge(
            &mut t,
            "emp_id",
            vec![
                Value::Int(4),
                Value::Str("Dana".into()),
                Value::Str("HR".into()),
                Value::Int(52000),
            ],
        )
        .unwrap();
        assert_eq!(inserted, MergeOutcome::Inserted);
        assert_eq!(t.row_count(), 4);
    }
}
