//! Views: creating, updating and materializing views over the employee
//! table.

use crate::datasets;
use crate::error::Result;
use crate::ops::query::filter_gt;
use crate::panels::query::SelectFilterPanel;
use crate::panels::showcase::ThresholdFilterPanel;
use crate::panels::{Panel, QuizPanel, StaticPanel};
use crate::quiz::Quiz;
use crate::value::Value;
use crate::widgets::NumberInput;

use super::Page;

pub fn page() -> Result<Page> {
    let employees = datasets::view_employees()?;
    let departments = datasets::managed_departments()?;
    let materialized = filter_gt(&employees, "salary", &Value::Int(60_000))?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(
            StaticPanel::new(
                "Tables",
                "A view is a saved query that behaves like a virtual table:\n\
                 it stores no data and is evaluated on demand.",
            )
            .with_table("employees", employees.clone())
            .with_table("departments", departments),
        ),
        Box::new(SelectFilterPanel::new(
            "Creating Views",
            "CREATE VIEW names a query. Pick a department to define the view\n\
             over; its contents follow the underlying table.",
            employees.clone(),
            "department",
            "Department",
            "CREATE VIEW department_employees AS\n\
             SELECT emp_id, name, salary\n\
             FROM employees\n\
             WHERE department = '{value}';",
            "View contents",
        )?),
        Box::new(ThresholdFilterPanel::new(
            "Updating Views",
            "CREATE OR REPLACE VIEW redefines an existing view, here the\n\
             Engineering view narrowed to employee ids above a threshold.",
            employees.clone(),
            "department",
            Value::Str("Engineering".to_string()),
            "emp_id",
            NumberInput::new("Minimum emp_id", 1, 1, 4, 1),
            "CREATE OR REPLACE VIEW engineering_employees AS\n\
             SELECT emp_id, name, salary\n\
             FROM employees\n\
             WHERE department = 'Engineering' AND emp_id > {value};",
        )),
        Box::new(
            StaticPanel::new(
                "Materialized Views",
                "A materialized view stores the query result physically and\n\
                 must be refreshed; a plain view is computed on every read.",
            )
            .with_sql(
                "CREATE MATERIALIZED VIEW high_salary_employees AS\n\
                 SELECT emp_id, name, department, salary\n\
                 FROM employees\n\
                 WHERE salary > 60000;",
            )
            .with_table("Materialized rows", materialized),
        ),
        Box::new(StaticPanel::new(
            "Pros & Cons",
            "Advantages: views abstract complex queries, restrict access to\n\
             the underlying tables, and give reusable, consistent results.\n\
             Disadvantages: they are recomputed on demand, complex views may\n\
             not be updatable, and materialized views need storage and\n\
             refreshing.",
        )),
        Box::new(
            StaticPanel::new(
                "Dropping Views",
                "DROP VIEW removes the view definition; the underlying table\n\
                 is untouched.",
            )
            .with_sql("DROP VIEW engineering_employees;"),
        ),
        Box::new(QuizPanel::new(Quiz::multi(
            "Which of the following statements about views are true? (Select all that apply)",
            &[
                "A view is a virtual table.",
                "Materialized views store data physically.",
                "Views always improve query performance.",
                "Views can enhance security.",
            ],
            &[
                "A view is a virtual table.",
                "Materialized views store data physically.",
                "Views can enhance security.",
            ],
        ))),
    ];

    Ok(Page::new("Views", panels))
}
