//! Integrity-rule simulation: a candidate row is validated against one
//! named rule before it may be appended. Rejection leaves the table
//! untouched and names the violated rule.

use crate::error::{Error, Result};
use crate::table::{Row, Table};

/// One integrity rule, with whatever context it needs to evaluate.
#[derive(Clone, Debug)]
pub enum Rule {
    PrimaryKey {
        column: String,
    },
    ForeignKey {
        column: String,
        parent: Table,
        parent_column: String,
    },
    Unique {
        column: String,
    },
    /// CHECK (column > minimum)
    Check {
        column: String,
        minimum_exclusive: f64,
    },
    NotNull {
        column: String,
    },
}

impl Rule {
    /// The CREATE TABLE clause this rule corresponds to, for display.
    pub fn describe(&self) -> String {
        match self {
            Rule::PrimaryKey { column } => format!("{} PRIMARY KEY", column),
            Rule::ForeignKey {
                column,
                parent_column,
                ..
            } => format!("FOREIGN KEY ({}) REFERENCES parent({})", column, parent_column),
            Rule::Unique { column } => format!("{} UNIQUE", column),
            Rule::Check {
                column,
                minimum_exclusive,
            } => format!("CHECK ({} > {})", column, minimum_exclusive),
            Rule::NotNull { column } => format!("{} NOT NULL", column),
        }
    }
}

/// Validate `row` against `rule` in the context of `table`. Ok(()) means
/// the row may be appended.
pub fn check(table: &Table, rule: &Rule, row: &Row) -> Result<()> {
    match rule {
        Rule::PrimaryKey { column } => {
            let idx = table.column_index(column)?;
            let key = &row[idx];
            if key.is_null() {
                return Err(Error::NotNullViolation(column.clone()));
            }
            if table.rows().iter().any(|r| r[idx] == *key) {
                return Err(Error::PrimaryKeyViolation(format!(
                    "duplicate value {} in column {}",
                    key, column
                )));
            }
            Ok(())
        }
        Rule::ForeignKey {
            column,
            parent,
            parent_column,
        } => {
            let idx = table.column_index(column)?;
            let value = &row[idx];
            // a NULL foreign key means "no relationship" and is allowed
            if value.is_null() {
                return Ok(());
            }
            let referenced = parent.column_values(parent_column)?;
            if referenced.contains(value) {
                Ok(())
            } else {
                Err(Error::ForeignKeyViolation(format!(
                    "value {} not present in {}",
                    value, parent_column
                )))
            }
        }
        Rule::Unique { column } => {
            let idx = table.column_index(column)?;
            let value = &row[idx];
            if !value.is_null() && table.rows().iter().any(|r| r[idx] == *value) {
                Err(Error::UniqueViolation(format!(
                    "value {} already present in column {}",
                    value, column
                )))
            } else {
                Ok(())
            }
        }
        Rule::Check {
            column,
            minimum_exclusive,
        } => {
            let idx = table.column_index(column)?;
            match row[idx].as_f64() {
                Some(v) if v > *minimum_exclusive => Ok(()),
                _ => Err(Error::CheckViolation(format!(
                    "{} must be greater than {}",
                    column, minimum_exclusive
                ))),
            }
        }
        Rule::NotNull { column } => {
            let idx = table.column_index(column)?;
            if row[idx].is_null() {
                Err(Error::NotNullViolation(column.clone()))
            } else {
                Ok(())
            }
        }
    }
}

/// Validate and append in one step.
pub fn check_insert(table: &mut Table, rule: &Rule, row: Row) -> Result<()> {
    check(table, rule, &row)?;
    table.push_row(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use crate::value::Value;

    fn candidate(id: i64, name: &str, dept: &str, salary: i64) -> Row {
        vec![
            Value::Int(id),
            Value::Str(name.into()),
            Value::Str(dept.into()),
            Value::Int(salary),
        ]
    }

    #[test]
    fn duplicate_primary_key_rejected_and_table_unchanged() {
        let mut t = datasets::small_employees().unwrap();
        let before = t.row_count();
        let rule = Rule::PrimaryKey {
            column: "emp_id".into(),
        };
        let err = check_insert(&mut t, &rule, candidate(2, "Dana", "HR", 52000)).unwrap_err();
        assert!(matches!(err, Error::PrimaryKeyViolation(_)));
        assert_eq!(t.row_count(), before);

        check_insert(&mut t, &rule, candidate(4, "Dana", "HR", 52000)).unwrap();
        assert_eq!(t.row_count(), before + 1);
    }

    #[test]
    fn foreign_key_checks_parent_and_allows_null() {
        let mut t = datasets::small_employees().unwrap();
        let rule = Rule::ForeignKey {
            column: "department".into(),
            parent: datasets::department_names().unwrap(),
            parent_column: "department_name".into(),
        };
        let err =
            check_insert(&mut t, &rule, candidate(4, "Dana", "Logistics", 52000)).unwrap_err();
        assert!(matches!(err, Error::ForeignKeyViolation(_)));

        let mut no_dept = candidate(4, "Dana", "", 52000);
        no_dept[2] = Value::Null;
        check_insert(&mut t, &rule, no_dept).unwrap();
    }

    #[test]
    fn unique_name_rejected() {
        let mut t = datasets::small_employees().unwrap();
        let rule = Rule::Unique {
            column: "name".into(),
        };
        let err = check_insert(&mut t, &rule, candidate(4, "Alice", "HR", 52000)).unwrap_err();
        assert!(matches!(err, Error::UniqueViolation(_)));
    }

    #[test]
    fn check_constraint_enforces_threshold() {
        let mut t = datasets::small_employees().unwrap();
        let rule = Rule::Check {
            column: "salary".into(),
            minimum_exclusive: 30000.0,
        };
        let err = check_insert(&mut t, &rule, candidate(4, "Dana", "HR", 30000)).unwrap_err();
        assert!(matches!(err, Error::CheckViolation(_)));
        check_insert(&mut t, &rule, candidate(4, "Dana", "HR", 30001)).unwrap();
    }

    #[test]
    fn not_null_rejects_blank_name() {
        let mut t = datasets::small_employees().unwrap();
        let rule = Rule::NotNull {
            column: "name".into(),
        };
        let mut row = candidate(4, "", "HR", 52000);
        row[1] = Value::Null;
        let err = check_insert(&mut t, &rule, row).unwrap_err();
        assert!(matches!(err, Error::NotNullViolation(_)));
    }
}
