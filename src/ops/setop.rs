//! UNION / UNION ALL / INTERSECT / EXCEPT over identically-shaped tables.

use std::collections::HashSet;

use strum_macros::{Display, EnumIter};

use crate::error::{Error, Result};
use crate::table::{Row, Table};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, Display)]
pub enum SetOpKind {
    #[strum(serialize = "UNION")]
    Union,
    #[strum(serialize = "UNION ALL")]
    UnionAll,
    #[strum(serialize = "INTERSECT")]
    Intersect,
    #[strum(serialize = "EXCEPT")]
    Except,
}

fn check_compatible(a: &Table, b: &Table) -> Result<()> {
    if a.columns().len() != b.columns().len() {
        return Err(Error::SchemaMismatch(format!(
            "{} columns vs {}",
            a.columns().len(),
            b.columns().len()
        )));
    }
    for (ca, cb) in a.columns().iter().zip(b.columns()) {
        if ca.name != cb.name || ca.ty != cb.ty {
            return Err(Error::SchemaMismatch(format!(
                "column {} vs {}",
                ca.name, cb.name
            )));
        }
    }
    Ok(())
}

/// Row equality is full-tuple equality over the (already projected)
/// columns. UNION, INTERSECT and EXCEPT deduplicate their output; UNION
/// ALL retains every row.
pub fn set_op(kind: SetOpKind, a: &Table, b: &Table) -> Result<Table> {
    check_compatible(a, b)?;
    let b_set: HashSet<&Row> = b.rows().iter().collect();
    let mut seen: HashSet<Row> = HashSet::new();
    let mut rows = Vec::new();

    match kind {
        SetOpKind::Union => {
            for row in a.rows().iter().chain(b.rows()) {
                if seen.insert(row.clone()) {
                    rows.push(row.clone());
                }
            }
        }
        SetOpKind::UnionAll => {
            rows.extend(a.rows().iter().cloned());
            rows.extend(b.rows().iter().cloned());
        }
        SetOpKind::Intersect => {
            for row in a.rows() {
                if b_set.contains(row) && seen.insert(row.clone()) {
                    rows.push(row.clone());
                }
            }
        }
        SetOpKind::Except => {
            for row in a.rows() {
                if !b_set.contains(row) && seen.insert(row.clone()) {
                    rows.push(row.clone());
                }
            }
        }
    }
    Table::new(a.columns().to_vec(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use crate::ops::query::project;

    fn operands() -> (Table, Table) {
        (
            datasets::employees_a().unwrap(),
            datasets::employees_b().unwrap(),
        )
    }

    #[test]
    fn union_drops_the_shared_row() {
        let (a, b) = operands();
        let u = set_op(SetOpKind::Union, &a, &b).unwrap();
        assert_eq!(u.row_count(), 5); // Charlie appears once
        assert!(u.row_count() <= a.row_count() + b.row_count());
    }

    #[test]
    fn union_all_keeps_duplicates() {
        let (a, b) = operands();
        let u = set_op(SetOpKind::UnionAll, &a, &b).unwrap();
        assert_eq!(u.row_count(), a.row_count() + b.row_count());
    }

    #[test]
    fn intersect_is_subset_of_both() {
        let (a, b) = operands();
        let i = set_op(SetOpKind::Intersect, &a, &b).unwrap();
        assert_eq!(i.row_count(), 1);
        for row in i.rows() {
            assert!(a.rows().contains(row));
            assert!(b.rows().contains(row));
        }
    }

    #[test]
    fn except_is_disjoint_from_second_operand() {
        let (a, b) = operands();
        let e = set_op(SetOpKind::Except, &a, &b).unwrap();
        assert_eq!(e.row_count(), 2);
        for row in e.rows() {
            assert!(a.rows().contains(row));
            assert!(!b.rows().contains(row));
        }
    }

    #[test]
    fn column_subsets_change_the_outcome() {
        let (a, b) = operands();
        // on department alone the operands overlap more than on full rows
        let pa = project(&a, &["department"]).unwrap();
        let pb = project(&b, &["department"]).unwrap();
        let i = set_op(SetOpKind::Intersect, &pa, &pb).unwrap();
        assert_eq!(i.row_count(), 3);
    }

    #[test]
    fn mismatched_schemas_rejected() {
        let (a, b) = operands();
        let pb = project(&b, &["name", "department"]).unwrap();
        let err = set_op(SetOpKind::Union, &a, &pb).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch(_)));
    }
}
