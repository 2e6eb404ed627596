//! Set operations: UNION, UNION ALL, INTERSECT, EXCEPT.

use crate::datasets;
use crate::error::Result;
use crate::ops::setop::SetOpKind;
use crate::panels::setop::SetOpPanel;
use crate::panels::{Panel, QuizPanel, StaticPanel};
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let a = datasets::employees_a()?;
    let b = datasets::employees_b()?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(
            StaticPanel::new(
                "Tables",
                "Set operations combine the results of two queries over the\n\
                 same column list. Charlie appears in both operands.",
            )
            .with_table("employees_a", a.clone())
            .with_table("employees_b", b.clone()),
        ),
        Box::new(SetOpPanel::new(
            "UNION",
            "UNION combines both results and removes duplicate rows.\n\
             Narrow the column list to see more rows collapse together.",
            SetOpKind::Union,
            "employees_a",
            a.clone(),
            "employees_b",
            b.clone(),
        )),
        Box::new(SetOpPanel::new(
            "UNION ALL",
            "UNION ALL combines both results and keeps every row,\n\
             duplicates included.",
            SetOpKind::UnionAll,
            "employees_a",
            a.clone(),
            "employees_b",
            b.clone(),
        )),
        Box::new(SetOpPanel::new(
            "INTERSECT",
            "INTERSECT keeps only the rows present in both results.",
            SetOpKind::Intersect,
            "employees_a",
            a.clone(),
            "employees_b",
            b.clone(),
        )),
        Box::new(SetOpPanel::new(
            "EXCEPT",
            "EXCEPT (MINUS in some databases) keeps the rows of the first\n\
             result that are absent from the second.",
            SetOpKind::Except,
            "employees_a",
            a,
            "employees_b",
            b,
        )),
        Box::new(QuizPanel::new(Quiz::single(
            "Which SQL operation includes all rows from both queries, even duplicates?",
            &["UNION", "UNION ALL", "INTERSECT", "EXCEPT"],
            "UNION ALL",
        ))),
    ];

    Ok(Page::new("Set Ops", panels))
}
