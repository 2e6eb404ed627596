//! Subqueries: scalar subqueries, derived tables, correlated subqueries,
//! EXISTS and IN. The derived results are fixed for the sample data.

use crate::datasets;
use crate::error::Result;
use crate::ops::aggregate::{aggregate, filter_above_group_avg, group_aggregate, AggregateFunc};
use crate::ops::join::semi_join;
use crate::ops::query::{distinct, filter_gt, project};
use crate::panels::{Panel, QuizPanel, StaticPanel};
use crate::quiz::Quiz;
use crate::value::{ColumnType, Value};

use super::Page;

pub fn page() -> Result<Page> {
    let employees = datasets::subquery_employees()?;
    let departments = datasets::budgeted_departments()?;

    let avg_salary = aggregate(&employees, AggregateFunc::Avg, "salary")?;
    let with_avg =
        employees.with_constant_column("avg_salary", ColumnType::Float, avg_salary.clone())?;
    let above_avg = filter_gt(&employees, "salary", &avg_salary)?;
    let by_department = group_aggregate(
        &employees,
        "department",
        AggregateFunc::Sum,
        "salary",
        "total_salary",
    )?;
    let correlated = filter_above_group_avg(&employees, "department", "salary")?;
    let existing = semi_join(&departments, "department_name", &employees, "department")?;
    let high_budget = distinct(
        &project(&filter_gt(&departments, "budget", &Value::Int(200_000))?, &["department_name"])?,
        "department_name",
    )?;
    let in_result = semi_join(&employees, "department", &high_budget, "department_name")?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(
            StaticPanel::new(
                "Tables",
                "A subquery is a query embedded inside another query.\n\
                 These tables drive every example on this page.",
            )
            .with_table("employees", employees.clone())
            .with_table("departments", departments.clone()),
        ),
        Box::new(
            StaticPanel::new(
                "In SELECT",
                "A scalar subquery in the SELECT list computes one value for\n\
                 every row, here the company-wide average salary.",
            )
            .with_sql(
                "SELECT emp_id, name, salary,\n\
                 \x20      (SELECT AVG(salary) FROM employees) AS avg_salary\n\
                 FROM employees;",
            )
            .with_table("Result", with_avg),
        ),
        Box::new(
            StaticPanel::new(
                "In WHERE",
                "A subquery in WHERE filters against a computed value:\n\
                 employees earning above the average salary.",
            )
            .with_sql(
                "SELECT emp_id, name, salary\n\
                 FROM employees\n\
                 WHERE salary > (SELECT AVG(salary) FROM employees);",
            )
            .with_table("Result", above_avg),
        ),
        Box::new(
            StaticPanel::new(
                "In FROM",
                "A subquery in FROM acts as a derived table, here the total\n\
                 salary per department.",
            )
            .with_sql(
                "SELECT department, total_salary\n\
                 FROM (SELECT department, SUM(salary) AS total_salary\n\
                 \x20     FROM employees GROUP BY department) AS derived;",
            )
            .with_table("Result", by_department),
        ),
        Box::new(
            StaticPanel::new(
                "Correlated",
                "A correlated subquery references the outer row: employees\n\
                 earning more than their own department's average.",
            )
            .with_sql(
                "SELECT emp_id, name, salary\n\
                 FROM employees outer_e\n\
                 WHERE salary > (SELECT AVG(salary) FROM employees inner_e\n\
                 \x20              WHERE inner_e.department = outer_e.department);",
            )
            .with_table("Result", correlated),
        ),
        Box::new(
            StaticPanel::new(
                "EXISTS",
                "EXISTS is true when the subquery returns at least one row:\n\
                 departments that actually have employees. Finance does not.",
            )
            .with_sql(
                "SELECT department_name FROM departments d\n\
                 WHERE EXISTS (SELECT 1 FROM employees e\n\
                 \x20            WHERE e.department = d.department_name);",
            )
            .with_table("Result", existing),
        ),
        Box::new(
            StaticPanel::new(
                "IN",
                "IN tests membership in the subquery's result: employees in\n\
                 departments whose budget exceeds 200000.",
            )
            .with_sql(
                "SELECT emp_id, name, department\n\
                 FROM employees\n\
                 WHERE department IN (SELECT department_name FROM departments\n\
                 \x20                   WHERE budget > 200000);",
            )
            .with_table("Result", in_result),
        ),
        Box::new(QuizPanel::new(Quiz::single(
            "Which statement about subqueries is correct?",
            &[
                "Subqueries can only be used in the WHERE clause.",
                "A subquery can return multiple columns and rows.",
                "The EXISTS operator in a subquery returns actual data from the table.",
                "Subqueries cannot be nested inside another subquery.",
            ],
            "A subquery can return multiple columns and rows.",
        ))),
    ];

    Ok(Page::new("Subqueries", panels))
}
