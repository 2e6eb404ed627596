//! Join operations: inner/left/right/full nested-loop joins plus cross,
//! natural, self and semi joins.

use std::collections::HashSet;

use strum_macros::{Display, EnumIter};

use crate::error::Result;
use crate::table::{Column, Row, Table};
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, Display)]
pub enum JoinKind {
    #[strum(serialize = "INNER JOIN")]
    Inner,
    #[strum(serialize = "LEFT JOIN")]
    Left,
    #[strum(serialize = "RIGHT JOIN")]
    Right,
    #[strum(serialize = "FULL JOIN")]
    Full,
}

/// Output schema of a keyed join. When both sides use the same key column
/// name the key is emitted once (USING semantics); other colliding names
/// get the caller's role suffixes.
fn joined_columns(
    left: &Table,
    right: &Table,
    on_left: &str,
    on_right: &str,
    suffixes: (&str, &str),
) -> Result<(Vec<Column>, bool)> {
    let shared_key = on_left == on_right;
    let right_names: Vec<&str> = right.column_names();
    let left_names: Vec<&str> = left.column_names();

    let mut columns = Vec::new();
    for col in left.columns() {
        let collides = right_names.contains(&col.name.as_str())
            && !(shared_key && col.name == on_left);
        let name = if collides {
            format!("{}{}", col.name, suffixes.0)
        } else {
            col.name.clone()
        };
        columns.push(Column {
            name,
            ty: col.ty,
        });
    }
    for col in right.columns() {
        if shared_key && col.name == on_right {
            continue;
        }
        let collides = left_names.contains(&col.name.as_str());
        let name = if collides {
            format!("{}{}", col.name, suffixes.1)
        } else {
            col.name.clone()
        };
        columns.push(Column {
            name,
            ty: col.ty,
        });
    }
    Ok((columns, shared_key))
}

fn splice(
    left_row: Option<&Row>,
    right_row: Option<&Row>,
    left_width: usize,
    right_width: usize,
    shared_key: bool,
    key_left: usize,
    key_right: usize,
) -> Row {
    let mut out: Row = match left_row {
        Some(r) => r.clone(),
        None => vec![Value::Null; left_width],
    };
    // With a shared key column the left slot carries the key; an unmatched
    // right row still has to surface its key value there.
    if shared_key && left_row.is_none() {
        if let Some(r) = right_row {
            out[key_left] = r[key_right].clone();
        }
    }
    match right_row {
        Some(r) => {
            for (i, v) in r.iter().enumerate() {
                if shared_key && i == key_right {
                    continue;
                }
                out.push(v.clone());
            }
        }
        None => {
            let pad = if shared_key {
                right_width - 1
            } else {
                right_width
            };
            out.extend(std::iter::repeat(Value::Null).take(pad));
        }
    }
    out
}

/// Keyed join. Rows pair when the key values are equal; NULL keys never
/// match. Left/Full preserve unmatched left rows, Right/Full preserve
/// unmatched right rows, padding the other side with NULL.
pub fn join(
    left: &Table,
    right: &Table,
    on_left: &str,
    on_right: &str,
    kind: JoinKind,
    suffixes: (&str, &str),
) -> Result<Table> {
    let key_left = left.column_index(on_left)?;
    let key_right = right.column_index(on_right)?;
    let (columns, shared_key) = joined_columns(left, right, on_left, on_right, suffixes)?;

    let left_width = left.columns().len();
    let right_width = right.columns().len();
    let mut rows = Vec::new();
    let mut matched_right: HashSet<usize> = HashSet::new();

    for lrow in left.rows() {
        let mut matched = false;
        for (ri, rrow) in right.rows().iter().enumerate() {
            let lk = &lrow[key_left];
            if lk.is_null() || rrow[key_right].is_null() || lk != &rrow[key_right] {
                continue;
            }
            matched = true;
            matched_right.insert(ri);
            rows.push(splice(
                Some(lrow),
                Some(rrow),
                left_width,
                right_width,
                shared_key,
                key_left,
                key_right,
            ));
        }
        if !matched && matches!(kind, JoinKind::Left | JoinKind::Full) {
            rows.push(splice(
                Some(lrow),
                None,
                left_width,
                right_width,
                shared_key,
                key_left,
                key_right,
            ));
        }
    }

    if matches!(kind, JoinKind::Right | JoinKind::Full) {
        for (ri, rrow) in right.rows().iter().enumerate() {
            if matched_right.contains(&ri) {
                continue;
            }
            rows.push(splice(
                None,
                Some(rrow),
                left_width,
                right_width,
                shared_key,
                key_left,
                key_right,
            ));
        }
    }

    Table::new(columns, rows)
}

/// Full pairwise product; no key.
pub fn cross_join(left: &Table, right: &Table, suffixes: (&str, &str)) -> Result<Table> {
    let left_names = left.column_names();
    let right_names = right.column_names();
    let mut columns = Vec::new();
    for col in left.columns() {
        let name = if right_names.contains(&col.name.as_str()) {
            format!("{}{}", col.name, suffixes.0)
        } else {
            col.name.clone()
        };
        columns.push(Column { name, ty: col.ty });
    }
    for col in right.columns() {
        let name = if left_names.contains(&col.name.as_str()) {
            format!("{}{}", col.name, suffixes.1)
        } else {
            col.name.clone()
        };
        columns.push(Column { name, ty: col.ty });
    }
    let mut rows = Vec::new();
    for lrow in left.rows() {
        for rrow in right.rows() {
            let mut row = lrow.clone();
            row.extend(rrow.iter().cloned());
            rows.push(row);
        }
    }
    Table::new(columns, rows)
}

/// Inner join on every identically named column, each emitted once.
pub fn natural_join(left: &Table, right: &Table) -> Result<Table> {
    let common: Vec<String> = left
        .column_names()
        .into_iter()
        .filter(|n| right.column_names().contains(n))
        .map(|n| n.to_string())
        .collect();

    let mut columns: Vec<Column> = left.columns().to_vec();
    for col in right.columns() {
        if !common.contains(&col.name) {
            columns.push(col.clone());
        }
    }

    let left_common: Vec<usize> = common
        .iter()
        .map(|n| left.column_index(n))
        .collect::<Result<_>>()?;
    let right_common: Vec<usize> = common
        .iter()
        .map(|n| right.column_index(n))
        .collect::<Result<_>>()?;
    let right_rest: Vec<usize> = (0..right.columns().len())
        .filter(|i| !right_common.contains(i))
        .collect();

    let mut rows = Vec::new();
    for lrow in left.rows() {
        for rrow in right.rows() {
            let agrees = left_common.iter().zip(&right_common).all(|(&li, &ri)| {
                !lrow[li].is_null() && lrow[li] == rrow[ri]
            });
            if agrees {
                let mut row = lrow.clone();
                row.extend(right_rest.iter().map(|&i| rrow[i].clone()));
                rows.push(row);
            }
        }
    }
    Table::new(columns, rows)
}

/// Rows of `table` whose `column` value appears in `other.other_column`
/// (the EXISTS / IN-subquery shape).
pub fn semi_join(table: &Table, column: &str, other: &Table, other_column: &str) -> Result<Table> {
    let wanted: HashSet<Value> = other
        .column_values(other_column)?
        .into_iter()
        .filter(|v| !v.is_null())
        .collect();
    let idx = table.column_index(column)?;
    let rows = table
        .rows()
        .iter()
        .filter(|r| wanted.contains(&r[idx]))
        .cloned()
        .collect();
    Table::new(table.columns().to_vec(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use crate::ops::query::project;

    #[test]
    fn inner_join_keeps_matches_only() {
        let e = datasets::employees().unwrap();
        let d = datasets::departments().unwrap();
        let j = join(&e, &d, "dept_id", "dept_id", JoinKind::Inner, ("_x", "_y")).unwrap();
        // every employee has a department, Finance matches nobody
        assert_eq!(j.row_count(), 5);
        assert_eq!(
            j.column_names(),
            vec!["emp_id", "name", "dept_id", "manager_id", "department_name"]
        );
    }

    #[test]
    fn left_join_preserves_left_rows() {
        let e = datasets::employees().unwrap();
        let s = datasets::salaries().unwrap();
        let j = join(&e, &s, "emp_id", "emp_id", JoinKind::Left, ("_x", "_y")).unwrap();
        assert_eq!(j.row_count(), e.row_count());
        // David and Eva have no salary row
        let nulls = j
            .rows()
            .iter()
            .filter(|r| r.last().unwrap().is_null())
            .count();
        assert_eq!(nulls, 2);
    }

    #[test]
    fn right_join_preserves_right_rows() {
        let e = datasets::employees().unwrap();
        let s = datasets::salaries().unwrap();
        let j = join(&e, &s, "emp_id", "emp_id", JoinKind::Right, ("_x", "_y")).unwrap();
        assert_eq!(j.row_count(), s.row_count());
        // the orphan salary row (emp_id 6) keeps its key in the shared slot
        let orphan = j
            .rows()
            .iter()
            .find(|r| r[1].is_null())
            .expect("unmatched salary row");
        assert_eq!(orphan[0], Value::Int(6));
    }

    #[test]
    fn full_join_row_count() {
        let e = datasets::employees().unwrap();
        let s = datasets::salaries().unwrap();
        // 3 matched pairs + 2 unmatched left + 1 unmatched right
        let j = join(&e, &s, "emp_id", "emp_id", JoinKind::Full, ("_x", "_y")).unwrap();
        assert_eq!(j.row_count(), 6);
    }

    #[test]
    fn cross_join_is_cartesian() {
        let e = datasets::employees().unwrap();
        let d = datasets::departments().unwrap();
        let j = cross_join(&e, &d, ("_e", "_d")).unwrap();
        assert_eq!(j.row_count(), e.row_count() * d.row_count());
    }

    #[test]
    fn self_join_skips_null_keys() {
        let e = datasets::employees().unwrap();
        let j = join(
            &e,
            &e,
            "manager_id",
            "emp_id",
            JoinKind::Inner,
            ("_employee", "_manager"),
        )
        .unwrap();
        // Alice has no manager and is excluded
        assert_eq!(j.row_count(), 4);
        let pairs = project(&j, &["name_employee", "name_manager"]).unwrap();
        assert_eq!(pairs.rows()[0][0], Value::Str("Bob".into()));
        assert_eq!(pairs.rows()[0][1], Value::Str("Alice".into()));
    }

    #[test]
    fn natural_join_matches_inner_join_on_common_key() {
        let e = datasets::employees().unwrap();
        let d = datasets::departments().unwrap();
        let nat = natural_join(&e, &d).unwrap();
        let inner = join(&e, &d, "dept_id", "dept_id", JoinKind::Inner, ("_x", "_y")).unwrap();
        assert_eq!(nat.row_count(), inner.row_count());
        assert_eq!(nat.column_names(), inner.column_names());
    }

    #[test]
    fn semi_join_filters_by_membership() {
        let d = datasets::budgeted_departments().unwrap();
        let e = datasets::subquery_employees().unwrap();
        let existing = semi_join(&d, "department_name", &e, "department").unwrap();
        // Finance has no employees
        assert_eq!(existing.row_count(), 3);
    }
}
