//! Transaction simulation. A session owns two copies of its table: the
//! committed state and a working copy. Deductions apply to the working
//! copy; COMMIT publishes it, ROLLBACK restores the committed copy
//! verbatim. Savepoints are additional snapshots of the working copy.

use crate::error::{Error, Result};
use crate::table::Table;
use crate::value::Value;

/// Deduct `quantity` from the stock of the product named `product` in
/// place, refusing to drive stock negative.
pub fn deduct_stock(table: &mut Table, product: &Value, quantity: i64) -> Result<()> {
    let name_idx = table.column_index("product_name")?;
    let stock_idx = table.column_index("stock")?;
    for row in table.rows_mut() {
        if row[name_idx] == *product {
            let have = match row[stock_idx] {
                Value::Int(i) => i,
                _ => 0,
            };
            if quantity > have {
                return Err(Error::InsufficientStock {
                    have,
                    want: quantity,
                });
            }
            row[stock_idx] = Value::Int(have - quantity);
            return Ok(());
        }
    }
    Err(Error::UnknownProduct(product.to_string()))
}

pub struct Session {
    committed: Table,
    working: Table,
    savepoints: Vec<Table>,
}

impl Session {
    /// Copy-on-start: the seed becomes both the committed state and the
    /// initial working copy.
    pub fn new(seed: Table) -> Self {
        Session {
            working: seed.clone(),
            committed: seed,
            savepoints: Vec::new(),
        }
    }

    pub fn working(&self) -> &Table {
        &self.working
    }

    pub fn committed(&self) -> &Table {
        &self.committed
    }

    pub fn deduct_stock(&mut self, product: &Value, quantity: i64) -> Result<()> {
        deduct_stock(&mut self.working, product, quantity)
    }

    /// COMMIT: the working copy becomes the committed state.
    pub fn commit(&mut self) {
        self.committed = self.working.clone();
        self.savepoints.clear();
    }

    /// ROLLBACK: replace the working copy with the committed state.
    pub fn rollback(&mut self) {
        self.working = self.committed.clone();
        self.savepoints.clear();
    }

    /// SAVEPOINT: snapshot the current working copy.
    pub fn savepoint(&mut self) {
        self.savepoints.push(self.working.clone());
    }

    /// ROLLBACK TO SAVEPOINT: restore the most recent snapshot. Returns
    /// false when no savepoint exists.
    pub fn rollback_to_savepoint(&mut self) -> bool {
        match self.savepoints.pop() {
            Some(snapshot) => {
                self.working = snapshot;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    fn laptop() -> Value {
        Value::Str("Laptop".into())
    }

    fn laptop_stock(t: &Table) -> Value {
        t.rows()[0][2].clone()
    }

    #[test]
    fn rollback_restores_exact_committed_state() {
        let mut s = Session::new(datasets::products().unwrap());
        s.deduct_stock(&laptop(), 3).unwrap();
        assert_eq!(laptop_stock(s.working()), Value::Int(7));
        s.rollback();
        assert_eq!(laptop_stock(s.working()), Value::Int(10));
        assert_eq!(laptop_stock(s.committed()), Value::Int(10));
    }

    #[test]
    fn commit_publishes_working_copy() {
        let mut s = Session::new(datasets::products().unwrap());
        s.deduct_stock(&laptop(), 3).unwrap();
        s.commit();
        assert_eq!(laptop_stock(s.committed()), Value::Int(7));
        // a later rollback returns to the committed 7, not the seed 10
        s.deduct_stock(&laptop(), 2).unwrap();
        s.rollback();
        assert_eq!(laptop_stock(s.working()), Value::Int(7));
    }

    #[test]
    fn savepoint_restores_intermediate_state() {
        let mut s = Session::new(datasets::products().unwrap());
        s.deduct_stock(&laptop(), 1).unwrap();
        s.savepoint();
        s.deduct_stock(&laptop(), 4).unwrap();
        assert_eq!(laptop_stock(s.working()), Value::Int(5));
        assert!(s.rollback_to_savepoint());
        assert_eq!(laptop_stock(s.working()), Value::Int(9));
        assert!(!s.rollback_to_savepoint());
    }

    #[test]
    fn deduction_never_overdraws() {
        let mut t = datasets::products().unwrap();
        let err = deduct_stock(&mut t, &laptop(), 11).unwrap_err();
        assert_eq!(
            err,
            Error::InsufficientStock {
                have: 10,
                want: 11
            }
        );
        assert_eq!(laptop_stock(&t), Value::Int(10));
    }
}
