//! Integrity constraints: each tab guards the shared employee table with
//! one named rule and reports the specific violation on rejection.

use crate::datasets;
use crate::error::Result;
use crate::ops::constraint::Rule;
use crate::panels::mutate::{shared, FormMode, RowFormPanel};
use crate::panels::{Panel, QuizPanel};
use crate::quiz::Quiz;
use crate::value::Value;

use super::Page;

pub fn page() -> Result<Page> {
    let employees = shared(datasets::small_employees()?);
    let departments = datasets::department_names()?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(
            RowFormPanel::new(
                "PRIMARY KEY",
                "A primary key uniquely identifies each row. Inserting a row\n\
                 whose emp_id already exists is rejected.",
                "employees",
                employees.clone(),
                FormMode::Insert,
            )
            .with_example_sql(
                "CREATE TABLE employees (\n\
                 \x20   emp_id INT PRIMARY KEY,\n\
                 \x20   name VARCHAR(50),\n\
                 \x20   department VARCHAR(50),\n\
                 \x20   salary DECIMAL(10, 2)\n\
                 );",
            )
            .with_rule(Rule::PrimaryKey {
                column: "emp_id".to_string(),
            }),
        ),
        Box::new(
            RowFormPanel::new(
                "FOREIGN KEY",
                "A foreign key must reference an existing department name.\n\
                 Leave the department blank for NULL, which is allowed.",
                "employees",
                employees.clone(),
                FormMode::Insert,
            )
            .with_example_sql(
                "CREATE TABLE employees (\n\
                 \x20   ...,\n\
                 \x20   FOREIGN KEY (department)\n\
                 \x20       REFERENCES departments(department_name)\n\
                 );",
            )
            .with_rule(Rule::ForeignKey {
                column: "department".to_string(),
                parent: departments,
                parent_column: "department_name".to_string(),
            }),
        ),
        Box::new(
            RowFormPanel::new(
                "UNIQUE",
                "UNIQUE forbids duplicate values in a column: a second Alice\n\
                 is rejected.",
                "employees",
                employees.clone(),
                FormMode::Insert,
            )
            .with_example_sql(
                "CREATE TABLE employees (\n\
                 \x20   emp_id INT PRIMARY KEY,\n\
                 \x20   name VARCHAR(50) UNIQUE,\n\
                 \x20   ...\n\
                 );",
            )
            .with_rule(Rule::Unique {
                column: "name".to_string(),
            }),
        ),
        Box::new(
            RowFormPanel::new(
                "CHECK",
                "CHECK enforces a condition on the column value: a salary of\n\
                 30000 or less is rejected.",
                "employees",
                employees.clone(),
                FormMode::Insert,
            )
            .with_example_sql(
                "CREATE TABLE employees (\n\
                 \x20   ...,\n\
                 \x20   salary DECIMAL(10, 2) CHECK (salary > 30000)\n\
                 );",
            )
            .with_rule(Rule::Check {
                column: "salary".to_string(),
                minimum_exclusive: 30000.0,
            }),
        ),
        Box::new(
            RowFormPanel::new(
                "NOT NULL",
                "NOT NULL requires a value: leaving the name blank is\n\
                 rejected.",
                "employees",
                employees.clone(),
                FormMode::Insert,
            )
            .with_example_sql(
                "CREATE TABLE employees (\n\
                 \x20   emp_id INT PRIMARY KEY,\n\
                 \x20   name VARCHAR(50) NOT NULL,\n\
                 \x20   ...\n\
                 );",
            )
            .with_rule(Rule::NotNull {
                column: "name".to_string(),
            }),
        ),
        Box::new(
            RowFormPanel::new(
                "DEFAULT",
                "DEFAULT fills a column when the field is left blank; typing\n\
                 a value, even 40000 itself, uses the typed value.",
                "employees",
                employees,
                FormMode::Insert,
            )
            .with_example_sql(
                "CREATE TABLE employees (\n\
                 \x20   ...,\n\
                 \x20   salary DECIMAL(10, 2) DEFAULT 40000\n\
                 );",
            )
            .with_default("salary", Value::Int(40000)),
        ),
        Box::new(QuizPanel::new(Quiz::multi(
            "Which constraint cannot have a NULL value?",
            &["PRIMARY KEY", "NOT NULL", "UNIQUE", "DEFAULT"],
            &["PRIMARY KEY", "NOT NULL"],
        ))),
    ];

    Ok(Page::new("Constraints", panels))
}
