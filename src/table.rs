//! In-memory sample tables with a declared schema.

use crate::error::{Error, Result};
use crate::value::{ColumnType, Value};

pub type Row = Vec<Value>;

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: &str, ty: ColumnType) -> Self {
        Column {
            name: name.to_string(),
            ty,
        }
    }
}

/// A small relation: ordered columns with declared types plus row-major
/// data. Derived tables are fresh `Table` values; operations never mutate
/// their sources.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, validating column names, row widths and cell types.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Result<Self> {
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(Error::DuplicateColumn(col.name.clone()));
            }
        }
        let table = Table {
            columns,
            rows: Vec::new(),
        };
        rows.into_iter().try_fold(table, |mut t, row| {
            t.push_row(row)?;
            Ok(t)
        })
    }

    pub fn empty(columns: Vec<Column>) -> Result<Self> {
        Table::new(columns, Vec::new())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        let idx = self.column_index(name)?;
        Ok(&self.columns[idx])
    }

    /// Values of one column, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<Value>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| r[idx].clone()).collect())
    }

    /// Names of columns whose declared type is numeric.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.ty.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Names of text columns.
    pub fn text_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.ty == ColumnType::Text)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn push_row(&mut self, row: Row) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        for (col, cell) in self.columns.iter().zip(&row) {
            if !col.ty.admits(cell) {
                return Err(Error::TypeMismatch {
                    expected: format!("{} for column {}", col.ty.name(), col.name),
                    found: cell.type_name().to_string(),
                });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn retain_rows<F: FnMut(&Row) -> bool>(&mut self, keep: F) {
        self.rows.retain(keep);
    }

    pub fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    /// A copy of this table extended with one extra column holding the same
    /// scalar in every row (the scalar-subquery-in-SELECT demo).
    pub fn with_constant_column(&self, name: &str, ty: ColumnType, value: Value) -> Result<Table> {
        let mut columns = self.columns.clone();
        columns.push(Column::new(name, ty));
        let rows = self
            .rows
            .iter()
            .map(|r| {
                let mut row = r.clone();
                row.push(value.clone());
                row
            })
            .collect();
        Table::new(columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Table {
        Table::new(
            vec![
                Column::new("id", ColumnType::Int),
                Column::new("name", ColumnType::Text),
            ],
            vec![
                vec![Value::Int(1), Value::Str("Alice".into())],
                vec![Value::Int(2), Value::Str("Bob".into())],
            ],
        )
        .unwrap()
    }

    #[test]
    fn duplicate_column_rejected() {
        let err = Table::empty(vec![
            Column::new("id", ColumnType::Int),
            Column::new("id", ColumnType::Int),
        ])
        .unwrap_err();
        assert_eq!(err, Error::DuplicateColumn("id".into()));
    }

    #[test]
    fn type_mismatch_rejected() {
        let mut t = people();
        let err = t
            .push_row(vec![Value::Str("three".into()), Value::Str("Carol".into())])
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn null_admitted_anywhere() {
        let mut t = people();
        t.push_row(vec![Value::Null, Value::Null]).unwrap();
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn row_width_checked() {
        let mut t = people();
        let err = t.push_row(vec![Value::Int(3)]).unwrap_err();
        assert_eq!(
            err,
            Error::RowWidth {
                expected: 2,
                found: 1
            }
        );
    }
}
