//! Aggregation: scalar aggregates, GROUP BY and HAVING.

use strum_macros::{Display, EnumIter};

use crate::error::{Error, Result};
use crate::table::{Column, Table};
use crate::value::{ColumnType, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, Display)]
pub enum AggregateFunc {
    #[strum(serialize = "COUNT")]
    Count,
    #[strum(serialize = "SUM")]
    Sum,
    #[strum(serialize = "AVG")]
    Avg,
    #[strum(serialize = "MIN")]
    Min,
    #[strum(serialize = "MAX")]
    Max,
}

impl AggregateFunc {
    fn result_type(&self, input: ColumnType) -> ColumnType {
        match self {
            AggregateFunc::Count => ColumnType::Int,
            AggregateFunc::Avg => ColumnType::Float,
            AggregateFunc::Sum | AggregateFunc::Min | AggregateFunc::Max => input,
        }
    }

    fn requires_numeric(&self) -> bool {
        matches!(self, AggregateFunc::Sum | AggregateFunc::Avg)
    }
}

fn fold(func: AggregateFunc, values: &[Value]) -> Result<Value> {
    let present: Vec<&Value> = values.iter().filter(|v| !v.is_null()).collect();
    match func {
        // COUNT counts non-null values only
        AggregateFunc::Count => Ok(Value::Int(present.len() as i64)),
        AggregateFunc::Sum | AggregateFunc::Avg => {
            let mut sum = 0.0;
            let mut all_int = true;
            for v in &present {
                match v {
                    Value::Int(i) => sum += *i as f64,
                    Value::Float(f) => {
                        all_int = false;
                        sum += f;
                    }
                    other => {
                        return Err(Error::TypeMismatch {
                            expected: "number".to_string(),
                            found: other.type_name().to_string(),
                        })
                    }
                }
            }
            if present.is_empty() {
                return Ok(Value::Null);
            }
            if func == AggregateFunc::Avg {
                Ok(Value::Float(sum / present.len() as f64))
            } else if all_int {
                Ok(Value::Int(sum as i64))
            } else {
                Ok(Value::Float(sum))
            }
        }
        AggregateFunc::Min | AggregateFunc::Max => {
            let mut best: Option<&Value> = None;
            for v in present {
                best = Some(match best {
                    None => v,
                    Some(b) => {
                        let ord = v.compare(b);
                        let take = if func == AggregateFunc::Min {
                            ord == std::cmp::Ordering::Less
                        } else {
                            ord == std::cmp::Ordering::Greater
                        };
                        if take {
                            v
                        } else {
                            b
                        }
                    }
                });
            }
            Ok(best.cloned().unwrap_or(Value::Null))
        }
    }
}

/// Ungrouped aggregate: one scalar for the whole column.
pub fn aggregate(table: &Table, func: AggregateFunc, column: &str) -> Result<Value> {
    let col = table.column(column)?;
    if func.requires_numeric() && !col.ty.is_numeric() {
        return Err(Error::TypeMismatch {
            expected: "a numeric column".to_string(),
            found: format!("{} ({})", column, col.ty.name()),
        });
    }
    fold(func, &table.column_values(column)?)
}

/// GROUP BY one column: one row per group in first-occurrence order, the
/// aggregate of `target` under `alias`.
pub fn group_aggregate(
    table: &Table,
    group_column: &str,
    func: AggregateFunc,
    target: &str,
    alias: &str,
) -> Result<Table> {
    let group_idx = table.column_index(group_column)?;
    let target_idx = table.column_index(target)?;
    let target_ty = table.columns()[target_idx].ty;
    if func.requires_numeric() && !target_ty.is_numeric() {
        return Err(Error::TypeMismatch {
            expected: "a numeric column".to_string(),
            found: format!("{} ({})", target, target_ty.name()),
        });
    }

    // first-occurrence bucket order keeps the output deterministic
    let mut keys: Vec<Value> = Vec::new();
    let mut buckets: Vec<Vec<Value>> = Vec::new();
    for row in table.rows() {
        let key = &row[group_idx];
        let slot = match keys.iter().position(|k| k == key) {
            Some(i) => i,
            None => {
                keys.push(key.clone());
                buckets.push(Vec::new());
                keys.len() - 1
            }
        };
        buckets[slot].push(row[target_idx].clone());
    }

    let columns = vec![
        table.columns()[group_idx].clone(),
        Column::new(alias, func.result_type(target_ty)),
    ];
    let rows = keys
        .into_iter()
        .zip(buckets)
        .map(|(key, values)| Ok(vec![key, fold(func, &values)?]))
        .collect::<Result<Vec<_>>>()?;
    Table::new(columns, rows)
}

/// HAVING aggregate > threshold, applied to an already-grouped table whose
/// second column holds the aggregate.
pub fn having_gt(grouped: &Table, threshold: f64) -> Result<Table> {
    let rows = grouped
        .rows()
        .iter()
        .filter(|r| r[1].as_f64().map(|v| v > threshold).unwrap_or(false))
        .cloned()
        .collect();
    Table::new(grouped.columns().to_vec(), rows)
}

/// Rows whose `target` exceeds the average of `target` within their own
/// `group_column` group (the correlated-subquery demo).
pub fn filter_above_group_avg(table: &Table, group_column: &str, target: &str) -> Result<Table> {
    let averages = group_aggregate(table, group_column, AggregateFunc::Avg, target, "avg")?;
    let group_idx = table.column_index(group_column)?;
    let target_idx = table.column_index(target)?;
    let rows = table
        .rows()
        .iter()
        .filter(|r| {
            let avg = averages
                .rows()
                .iter()
                .find(|a| a[0] == r[group_idx])
                .and_then(|a| a[1].as_f64());
            match (r[target_idx].as_f64(), avg) {
                (Some(v), Some(a)) => v > a,
                _ => false,
            }
        })
        .cloned()
        .collect();
    Table::new(table.columns().to_vec(), rows)
}

/// GROUP BY with SUM(a * b) per group (the CTE revenue demo).
pub fn group_sum_product(
    table: &Table,
    group_column: &str,
    a: &str,
    b: &str,
    alias: &str,
) -> Result<Table> {
    let group_idx = table.column_index(group_column)?;
    let a_idx = table.column_index(a)?;
    let b_idx = table.column_index(b)?;

    let mut keys: Vec<Value> = Vec::new();
    let mut sums: Vec<i64> = Vec::new();
    for row in table.rows() {
        let (av, bv) = match (row[a_idx].as_f64(), row[b_idx].as_f64()) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                return Err(Error::TypeMismatch {
                    expected: "numeric columns".to_string(),
                    found: format!("{}, {}", a, b),
                })
            }
        };
        let key = &row[group_idx];
        let slot = match keys.iter().position(|k| k == key) {
            Some(i) => i,
            None => {
                keys.push(key.clone());
                sums.push(0);
                keys.len() - 1
            }
        };
        sums[slot] += (av * bv) as i64;
    }

    let columns = vec![
        table.columns()[group_idx].clone(),
        Column::new(alias, ColumnType::Int),
    ];
    let rows = keys
        .into_iter()
        .zip(sums)
        .map(|(key, sum)| vec![key, Value::Int(sum)])
        .collect();
    Table::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    fn four_salaries() -> Table {
        let mut t = datasets::small_employees().unwrap();
        t.push_row(vec![
            Value::Int(4),
            Value::Str("David".into()),
            Value::Str("Engineering".into()),
            Value::Int(70000),
        ])
        .unwrap();
        t
    }

    #[test]
    fn ungrouped_aggregates() {
        // salaries 50000, 60000, 55000, 70000
        let t = four_salaries();
        assert_eq!(aggregate(&t, AggregateFunc::Sum, "salary").unwrap(), Value::Int(235000));
        assert_eq!(aggregate(&t, AggregateFunc::Avg, "salary").unwrap(), Value::Float(58750.0));
        assert_eq!(aggregate(&t, AggregateFunc::Min, "salary").unwrap(), Value::Int(50000));
        assert_eq!(aggregate(&t, AggregateFunc::Max, "salary").unwrap(), Value::Int(70000));
        assert_eq!(aggregate(&t, AggregateFunc::Count, "salary").unwrap(), Value::Int(4));
    }

    #[test]
    fn count_skips_nulls() {
        let t = datasets::employees().unwrap();
        assert_eq!(
            aggregate(&t, AggregateFunc::Count, "manager_id").unwrap(),
            Value::Int(4)
        );
    }

    #[test]
    fn sum_rejects_text_columns() {
        let t = datasets::small_employees().unwrap();
        let err = aggregate(&t, AggregateFunc::Sum, "name").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn group_sums_in_first_occurrence_order() {
        let t = four_salaries();
        let g = group_aggregate(&t, "department", AggregateFunc::Sum, "salary", "total").unwrap();
        let rows: Vec<(String, Value)> = g
            .rows()
            .iter()
            .map(|r| (r[0].to_string(), r[1].clone()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("HR".to_string(), Value::Int(50000)),
                ("Engineering".to_string(), Value::Int(130000)),
                ("Marketing".to_string(), Value::Int(55000)),
            ]
        );
    }

    #[test]
    fn having_keeps_groups_over_threshold() {
        // HR:50000, Engineering:60000+70000, Marketing:55000
        let t = four_salaries();
        let g = group_aggregate(&t, "department", AggregateFunc::Sum, "salary", "total").unwrap();
        let h = having_gt(&g, 100000.0).unwrap();
        assert_eq!(h.row_count(), 1);
        assert_eq!(h.rows()[0][0], Value::Str("Engineering".into()));
        assert_eq!(h.rows()[0][1], Value::Int(130000));
    }

    #[test]
    fn above_group_average() {
        let t = datasets::subquery_employees().unwrap();
        let r = filter_above_group_avg(&t, "department", "salary").unwrap();
        // HR avg 49000 -> Alice; Engineering avg 65000 -> David
        let names: Vec<String> = r.rows().iter().map(|row| row[1].to_string()).collect();
        assert_eq!(names, vec!["Alice", "David"]);
    }

    #[test]
    fn revenue_per_region() {
        let t = datasets::sales().unwrap();
        let g = group_sum_product(&t, "region", "quantity", "price", "total_revenue").unwrap();
        let north = g
            .rows()
            .iter()
            .find(|r| r[0] == Value::Str("North".into()))
            .unwrap();
        // 2*1000 + 1*300
        assert_eq!(north[1], Value::Int(2300));
    }
}
