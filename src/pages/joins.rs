//! Join variants over the employees/departments/salaries trio. The join
//! results are fixed, so each variant renders as a computed walkthrough.

use crate::datasets;
use crate::error::Result;
use crate::ops::join::{cross_join, join, natural_join, JoinKind};
use crate::ops::query::{project, rename};
use crate::panels::{Panel, QuizPanel, StaticPanel};
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let employees = datasets::employees()?;
    let departments = datasets::departments()?;
    let salaries = datasets::salaries()?;

    let inner = join(
        &employees,
        &departments,
        "dept_id",
        "dept_id",
        JoinKind::Inner,
        ("_emp", "_dept"),
    )?;
    let left = join(
        &employees,
        &salaries,
        "emp_id",
        "emp_id",
        JoinKind::Left,
        ("_emp", "_sal"),
    )?;
    let right = join(
        &employees,
        &salaries,
        "emp_id",
        "emp_id",
        JoinKind::Right,
        ("_emp", "_sal"),
    )?;
    let full = join(
        &employees,
        &salaries,
        "emp_id",
        "emp_id",
        JoinKind::Full,
        ("_emp", "_sal"),
    )?;
    let cross = cross_join(&employees, &departments, ("_emp", "_dept"))?;
    let self_joined = rename(
        &project(
            &join(
                &employees,
                &employees,
                "manager_id",
                "emp_id",
                JoinKind::Inner,
                ("_employee", "_manager"),
            )?,
            &["name_employee", "name_manager"],
        )?,
        &[("name_employee", "Employee"), ("name_manager", "Manager")],
    )?;
    let natural = natural_join(&employees, &departments)?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(
            StaticPanel::new(
                "Tables",
                "Joins combine rows from two tables through a related column.\n\
                 These are the sample tables every variant below works with.",
            )
            .with_table("employees", employees.clone())
            .with_table("departments", departments.clone())
            .with_table("salaries", salaries.clone()),
        ),
        Box::new(
            StaticPanel::new(
                "INNER JOIN",
                "INNER JOIN returns only the rows with a match in both tables.\n\
                 Finance has no employees, so it does not appear.",
            )
            .with_sql(
                "SELECT e.emp_id, e.name, d.department_name\n\
                 FROM employees e\n\
                 INNER JOIN departments d ON e.dept_id = d.dept_id;",
            )
            .with_table("Result", inner),
        ),
        Box::new(
            StaticPanel::new(
                "LEFT JOIN",
                "LEFT JOIN keeps every row of the left table; right-side\n\
                 columns are NULL where no salary row matches.",
            )
            .with_sql(
                "SELECT e.emp_id, e.name, s.salary\n\
                 FROM employees e\n\
                 LEFT JOIN salaries s ON e.emp_id = s.emp_id;",
            )
            .with_table("Result", left),
        ),
        Box::new(
            StaticPanel::new(
                "RIGHT JOIN",
                "RIGHT JOIN keeps every row of the right table; the salary\n\
                 row for emp_id 6 has no employee, so its name is NULL.",
            )
            .with_sql(
                "SELECT e.emp_id, e.name, s.salary\n\
                 FROM employees e\n\
                 RIGHT JOIN salaries s ON e.emp_id = s.emp_id;",
            )
            .with_table("Result", right),
        ),
        Box::new(
            StaticPanel::new(
                "FULL JOIN",
                "FULL JOIN keeps all rows from both sides, padding whichever\n\
                 side has no match with NULL.",
            )
            .with_sql(
                "SELECT e.emp_id, e.name, s.salary\n\
                 FROM employees e\n\
                 FULL OUTER JOIN salaries s ON e.emp_id = s.emp_id;",
            )
            .with_table("Result", full),
        ),
        Box::new(
            StaticPanel::new(
                "CROSS JOIN",
                "CROSS JOIN produces the Cartesian product: every employee\n\
                 paired with every department, 5 x 4 = 20 rows.",
            )
            .with_sql(
                "SELECT e.name, d.department_name\n\
                 FROM employees e\n\
                 CROSS JOIN departments d;",
            )
            .with_table("Result", cross),
        ),
        Box::new(
            StaticPanel::new(
                "SELF JOIN",
                "A self join pairs a table with itself. Here each employee's\n\
                 manager_id is matched against emp_id to find their manager;\n\
                 Alice has no manager and is absent.",
            )
            .with_sql(
                "SELECT e1.name AS Employee, e2.name AS Manager\n\
                 FROM employees e1\n\
                 INNER JOIN employees e2 ON e1.manager_id = e2.emp_id;",
            )
            .with_table("Result", self_joined),
        ),
        Box::new(
            StaticPanel::new(
                "NATURAL JOIN",
                "NATURAL JOIN matches automatically on every identically named\n\
                 column (here dept_id) and emits the shared column once.",
            )
            .with_sql("SELECT * FROM employees NATURAL JOIN departments;")
            .with_table("Result", natural),
        ),
        Box::new(QuizPanel::new(Quiz::single(
            "Which join returns all rows from both tables, even when there are no matches?",
            &["INNER JOIN", "LEFT JOIN", "RIGHT JOIN", "FULL JOIN"],
            "FULL JOIN",
        ))),
    ];

    Ok(Page::new("Joins", panels))
}
