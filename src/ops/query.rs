//! Projection, filtering, ordering and row-limit operations.

use std::collections::HashSet;

use strum_macros::{Display, EnumIter};

use crate::error::Result;
use crate::table::{Column, Table};
use crate::value::Value;

/// LIKE-style pattern modes. Matching is case-sensitive literal text; no
/// wildcard escaping is implemented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, Display)]
pub enum PatternMode {
    #[strum(serialize = "Contains")]
    Contains,
    #[strum(serialize = "Begins with")]
    Prefix,
    #[strum(serialize = "Ends with")]
    Suffix,
    #[strum(serialize = "Exact match")]
    Exact,
}

impl PatternMode {
    /// The LIKE pattern (or equality literal) this mode renders to.
    pub fn sql_pattern(&self, input: &str) -> String {
        match self {
            PatternMode::Contains => format!("'%{}%'", input),
            PatternMode::Prefix => format!("'{}%'", input),
            PatternMode::Suffix => format!("'%{}'", input),
            PatternMode::Exact => format!("'{}'", input),
        }
    }

    fn matches(&self, cell: &str, input: &str) -> bool {
        match self {
            PatternMode::Contains => cell.contains(input),
            PatternMode::Prefix => cell.starts_with(input),
            PatternMode::Suffix => cell.ends_with(input),
            PatternMode::Exact => cell == input,
        }
    }
}

/// Column subset in the requested order.
pub fn project(table: &Table, names: &[&str]) -> Result<Table> {
    let indices = names
        .iter()
        .map(|n| table.column_index(n))
        .collect::<Result<Vec<_>>>()?;
    let columns = indices
        .iter()
        .map(|&i| table.columns()[i].clone())
        .collect();
    let rows = table
        .rows()
        .iter()
        .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
        .collect();
    Table::new(columns, rows)
}

fn filter_by<F: Fn(&Value) -> bool>(table: &Table, column: &str, keep: F) -> Result<Table> {
    let idx = table.column_index(column)?;
    let rows = table
        .rows()
        .iter()
        .filter(|r| keep(&r[idx]))
        .cloned()
        .collect();
    Table::new(table.columns().to_vec(), rows)
}

/// WHERE column = value, with the raw widget text coerced to the column's
/// declared type first. Bad numeric input surfaces as an error rather than
/// an empty result.
pub fn filter_eq_input(table: &Table, column: &str, raw: &str) -> Result<Table> {
    let target = table.column(column)?.ty.parse_input(column, raw)?;
    filter_eq(table, column, &target)
}

pub fn filter_eq(table: &Table, column: &str, target: &Value) -> Result<Table> {
    filter_by(table, column, |v| v == target)
}

/// WHERE column > value. NULL never satisfies the comparison.
pub fn filter_gt(table: &Table, column: &str, threshold: &Value) -> Result<Table> {
    let threshold = threshold.clone();
    filter_by(table, column, move |v| {
        !v.is_null() && v.compare(&threshold) == std::cmp::Ordering::Greater
    })
}

/// LIKE-style pattern filter over a text column.
pub fn filter_like(table: &Table, column: &str, mode: PatternMode, input: &str) -> Result<Table> {
    filter_by(table, column, |v| {
        v.as_str().map(|s| mode.matches(s, input)).unwrap_or(false)
    })
}

/// WHERE column IN (...), the list given as comma-separated widget text with
/// each item coerced to the column type.
pub fn filter_in_input(table: &Table, column: &str, raw_list: &str) -> Result<Table> {
    let ty = table.column(column)?.ty;
    let targets = raw_list
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| ty.parse_input(column, s))
        .collect::<Result<Vec<_>>>()?;
    filter_in(table, column, &targets)
}

pub fn filter_in(table: &Table, column: &str, targets: &[Value]) -> Result<Table> {
    filter_by(table, column, |v| targets.contains(v))
}

/// Inclusive numeric range filter.
pub fn filter_between(table: &Table, column: &str, lo: i64, hi: i64) -> Result<Table> {
    filter_by(table, column, |v| {
        v.as_f64()
            .map(|n| n >= lo as f64 && n <= hi as f64)
            .unwrap_or(false)
    })
}

/// ORDER BY one column; stable with respect to the original row order.
pub fn sort_by(table: &Table, column: &str, ascending: bool) -> Result<Table> {
    let idx = table.column_index(column)?;
    let mut rows = table.rows().to_vec();
    rows.sort_by(|a, b| {
        let ord = a[idx].compare(&b[idx]);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
    Table::new(table.columns().to_vec(), rows)
}

/// SELECT DISTINCT column: single-column result, first occurrence order.
pub fn distinct(table: &Table, column: &str) -> Result<Table> {
    let idx = table.column_index(column)?;
    let col = table.columns()[idx].clone();
    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for row in table.rows() {
        if seen.insert(row[idx].clone()) {
            rows.push(vec![row[idx].clone()]);
        }
    }
    Table::new(vec![col], rows)
}

/// First n rows.
pub fn limit(table: &Table, n: usize) -> Result<Table> {
    let rows = table.rows().iter().take(n).cloned().collect();
    Table::new(table.columns().to_vec(), rows)
}

/// Rename columns; pairs are (old, new). Unmentioned columns keep their name.
pub fn rename(table: &Table, pairs: &[(&str, &str)]) -> Result<Table> {
    let columns = table
        .columns()
        .iter()
        .map(|c| {
            let name = pairs
                .iter()
                .find(|(old, _)| *old == c.name)
                .map(|(_, new)| new.to_string())
                .unwrap_or_else(|| c.name.clone());
            Column {
                name,
                ty: c.ty,
            }
        })
        .collect();
    Table::new(columns, table.rows().to_vec())
}

/// The distinct values of a column as display strings, for enumerated
/// widget domains.
pub fn distinct_strings(table: &Table, column: &str) -> Result<Vec<String>> {
    Ok(distinct(table, column)?
        .rows()
        .iter()
        .map(|r| r[0].to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use crate::error::Error;

    #[test]
    fn project_reorders() {
        let t = datasets::people().unwrap();
        let p = project(&t, &["city", "name"]).unwrap();
        assert_eq!(p.column_names(), vec!["city", "name"]);
        assert_eq!(p.rows()[0][1], Value::Str("Alice".into()));
    }

    #[test]
    fn filter_eq_coerces_input() {
        let t = datasets::people().unwrap();
        let hits = filter_eq_input(&t, "age", "30").unwrap();
        assert_eq!(hits.row_count(), 1);
        assert_eq!(hits.rows()[0][1], Value::Str("Charlie".into()));
    }

    #[test]
    fn filter_eq_rejects_bad_numeric_input() {
        let t = datasets::people().unwrap();
        let err = filter_eq_input(&t, "age", "thirty").unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn like_modes() {
        let t = datasets::people().unwrap();
        assert_eq!(
            filter_like(&t, "name", PatternMode::Prefix, "A").unwrap().row_count(),
            1
        );
        assert_eq!(
            filter_like(&t, "name", PatternMode::Suffix, "e").unwrap().row_count(),
            2 // Alice, Charlie
        );
        assert_eq!(
            filter_like(&t, "city", PatternMode::Contains, "New").unwrap().row_count(),
            2
        );
        // case-sensitive literal matching
        assert_eq!(
            filter_like(&t, "name", PatternMode::Prefix, "a").unwrap().row_count(),
            0
        );
    }

    #[test]
    fn in_and_between() {
        let t = datasets::people().unwrap();
        let r = filter_in_input(&t, "department", "Engineering, HR").unwrap();
        assert_eq!(r.row_count(), 4);
        let r = filter_between(&t, "age", 29, 35).unwrap();
        assert_eq!(r.row_count(), 3);
    }

    #[test]
    fn sort_is_stable() {
        let t = datasets::staff().unwrap();
        // Bob and Frank share age 35; Bob precedes Frank in the seed and
        // must still precede him after sorting on age.
        let sorted = sort_by(&t, "age", true).unwrap();
        let names: Vec<String> = sorted
            .rows()
            .iter()
            .map(|r| r[1].to_string())
            .collect();
        assert_eq!(names, vec!["Alice", "Eva", "Charlie", "Bob", "Frank", "David"]);
    }

    #[test]
    fn distinct_keeps_first_occurrence_order() {
        let t = datasets::people().unwrap();
        let d = distinct(&t, "department").unwrap();
        let vals: Vec<String> = d.rows().iter().map(|r| r[0].to_string()).collect();
        assert_eq!(vals, vec!["HR", "Engineering", "Marketing"]);
    }

    #[test]
    fn limit_truncates() {
        let t = datasets::people().unwrap();
        assert_eq!(limit(&t, 2).unwrap().row_count(), 2);
        assert_eq!(limit(&t, 10).unwrap().row_count(), 5);
    }
}
