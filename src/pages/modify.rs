//! Data modification: INSERT, UPDATE, DELETE and MERGE over one shared
//! working table. Leaving the page discards the changes.

use crate::datasets;
use crate::error::Result;
use crate::panels::mutate::{shared, DeletePanel, FormMode, RowFormPanel, UpdatePanel};
use crate::panels::{Panel, QuizPanel};
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let employees = shared(datasets::small_employees()?);

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(
            RowFormPanel::new(
                "INSERT INTO",
                "INSERT INTO adds a new row. Fill the fields and press the\n\
                 button; values are checked against the column types.",
                "employees",
                employees.clone(),
                FormMode::Insert,
            )
            .with_example_sql(
                "INSERT INTO employees (emp_id, name, department, salary)\n\
                 VALUES (4, 'Dana', 'Finance', 52000);",
            ),
        ),
        Box::new(UpdatePanel::new(
            "UPDATE",
            "UPDATE modifies existing rows: pick an employee and set a new\n\
             salary.",
            "employees",
            employees.clone(),
            "emp_id",
            "salary",
        )),
        Box::new(DeletePanel::new(
            "DELETE",
            "DELETE removes the rows matching the condition.",
            "employees",
            employees.clone(),
            "emp_id",
        )),
        Box::new(
            RowFormPanel::new(
                "MERGE",
                "MERGE (UPSERT) updates the row whose key matches, or inserts\n\
                 a new row when none does.",
                "employees",
                employees,
                FormMode::Merge,
            )
            .with_merge_key("emp_id"),
        ),
        Box::new(QuizPanel::new(Quiz::single(
            "Which SQL statement is used to update existing rows or insert new rows if they don't exist?",
            &["INSERT INTO", "UPDATE", "DELETE", "MERGE (UPSERT)"],
            "MERGE (UPSERT)",
        ))),
    ];

    Ok(Page::new("Modify", panels))
}
