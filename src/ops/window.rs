//! Window-function and pivot demos for the advanced page.

use crate::error::{Error, Result};
use crate::table::{Column, Table};
use crate::value::{ColumnType, Value};

/// Append ROW_NUMBER / RANK / DENSE_RANK columns computed per partition,
/// ordered by `order_column` descending. Row order of the input is kept.
pub fn ranks(table: &Table, partition_column: &str, order_column: &str) -> Result<Table> {
    let part_idx = table.column_index(partition_column)?;
    let order_idx = table.column_index(order_column)?;

    let mut columns = table.columns().to_vec();
    for name in ["row_number", "rank", "dense_rank"] {
        columns.push(Column::new(name, ColumnType::Int));
    }

    let mut rows = Vec::with_capacity(table.row_count());
    for (i, row) in table.rows().iter().enumerate() {
        // peers share this row's partition value
        let mut peers: Vec<(usize, &Value)> = table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, r)| r[part_idx] == row[part_idx])
            .map(|(j, r)| (j, &r[order_idx]))
            .collect();
        // descending by the order column, original position breaking ties
        peers.sort_by(|a, b| b.1.compare(a.1).then(a.0.cmp(&b.0)));

        let position = peers.iter().position(|(j, _)| *j == i).unwrap_or(0);
        let row_number = position as i64 + 1;
        let rank = peers
            .iter()
            .position(|(_, v)| **v == row[order_idx])
            .unwrap_or(0) as i64
            + 1;
        let mut distinct_higher: i64 = 0;
        let mut last: Option<&Value> = None;
        for &(_, v) in &peers {
            if *v == row[order_idx] {
                break;
            }
            if last.map(|l| l != v).unwrap_or(true) {
                distinct_higher += 1;
            }
            last = Some(v);
        }
        let dense_rank = distinct_higher + 1;

        let mut out = row.clone();
        out.push(Value::Int(row_number));
        out.push(Value::Int(rank));
        out.push(Value::Int(dense_rank));
        rows.push(out);
    }
    Table::new(columns, rows)
}

/// Pivot: one row per `group_column` value, one SUM(value_column) column
/// per requested `pivot_values` entry of `pivot_column`.
pub fn pivot_sum(
    table: &Table,
    group_column: &str,
    pivot_column: &str,
    value_column: &str,
    pivot_values: &[&str],
) -> Result<Table> {
    let group_idx = table.column_index(group_column)?;
    let pivot_idx = table.column_index(pivot_column)?;
    let value_idx = table.column_index(value_column)?;

    let mut columns = vec![table.columns()[group_idx].clone()];
    for v in pivot_values {
        columns.push(Column::new(
            &format!("{}_{}", v.to_lowercase(), value_column),
            ColumnType::Int,
        ));
    }

    let mut keys: Vec<Value> = Vec::new();
    let mut sums: Vec<Vec<i64>> = Vec::new();
    for row in table.rows() {
        let key = &row[group_idx];
        let slot = match keys.iter().position(|k| k == key) {
            Some(i) => i,
            None => {
                keys.push(key.clone());
                sums.push(vec![0; pivot_values.len()]);
                keys.len() - 1
            }
        };
        let amount = match row[value_idx].as_f64() {
            Some(v) => v as i64,
            None => {
                return Err(Error::TypeMismatch {
                    expected: "a numeric value column".to_string(),
                    found: row[value_idx].type_name().to_string(),
                })
            }
        };
        if let Some(pv) = row[pivot_idx].as_str() {
            if let Some(col) = pivot_values.iter().position(|v| *v == pv) {
                sums[slot][col] += amount;
            }
        }
    }

    let rows = keys
        .into_iter()
        .zip(sums)
        .map(|(key, totals)| {
            let mut row = vec![key];
            row.extend(totals.into_iter().map(Value::Int));
            row
        })
        .collect();
    Table::new(columns, rows)
}

/// The recursive-CTE sequence demo: integers 1..=n as a one-column table.
pub fn number_sequence(n: i64) -> Result<Table> {
    let columns = vec![Column::new("num", ColumnType::Int)];
    let rows = (1..=n).map(|i| vec![Value::Int(i)]).collect();
    Table::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    #[test]
    fn ranks_partition_by_region() {
        let t = datasets::sales().unwrap();
        let r = ranks(&t, "region", "quantity").unwrap();
        assert_eq!(
            r.column_names(),
            vec!["sale_id", "product", "category", "region", "quantity", "price", "row_number", "rank", "dense_rank"]
        );
        // North has quantities 2 and 1: the 2 ranks first
        let north_first = r
            .rows()
            .iter()
            .find(|row| row[0] == Value::Int(1))
            .unwrap();
        assert_eq!(north_first[6], Value::Int(1));
        let north_second = r
            .rows()
            .iter()
            .find(|row| row[0] == Value::Int(3))
            .unwrap();
        assert_eq!(north_second[6], Value::Int(2));
        // single-row partitions rank first
        let east = r
            .rows()
            .iter()
            .find(|row| row[0] == Value::Int(4))
            .unwrap();
        assert_eq!(east[7], Value::Int(1));
    }

    #[test]
    fn pivot_sums_by_product() {
        let t = datasets::sales().unwrap();
        let p = pivot_sum(&t, "region", "product", "quantity", &["Laptop", "Phone"]).unwrap();
        assert_eq!(p.column_names(), vec!["region", "laptop_quantity", "phone_quantity"]);
        let north = p
            .rows()
            .iter()
            .find(|r| r[0] == Value::Str("North".into()))
            .unwrap();
        assert_eq!(north[1], Value::Int(2));
        assert_eq!(north[2], Value::Int(0));
    }

    #[test]
    fn sequence_counts_up() {
        let s = number_sequence(10).unwrap();
        assert_eq!(s.row_count(), 10);
        assert_eq!(s.rows()[9][0], Value::Int(10));
    }
}
