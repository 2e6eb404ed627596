//! Stored procedures and functions.

use crate::datasets;
use crate::error::Result;
use crate::panels::query::SelectFilterPanel;
use crate::panels::{Panel, QuizPanel, StaticPanel};
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let employees = datasets::view_employees()?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(
            StaticPanel::new(
                "Procedures",
                "A stored procedure is precompiled SQL invoked by name. It\n\
                 can take parameters and run several statements as one unit.",
            )
            .with_sql(
                "CREATE PROCEDURE get_employees_by_dept(IN dept VARCHAR(50))\n\
                 BEGIN\n\
                 \x20   SELECT * FROM employees WHERE department = dept;\n\
                 END;",
            )
            .with_table("employees", employees.clone()),
        ),
        Box::new(
            StaticPanel::new(
                "Functions",
                "A function returns a single value and can appear inside a\n\
                 SELECT list or a WHERE clause.",
            )
            .with_sql(
                "CREATE FUNCTION annual_salary(monthly DECIMAL(10, 2))\n\
                 RETURNS DECIMAL(10, 2)\n\
                 RETURN monthly * 12;",
            ),
        ),
        Box::new(
            StaticPanel::new(
                "Parameters",
                "Procedures take IN parameters for input, OUT parameters for\n\
                 results, and INOUT parameters for both.",
            )
            .with_sql(
                "CREATE PROCEDURE raise_salary(IN emp INT, IN amount DECIMAL,\n\
                 \x20                            OUT new_salary DECIMAL)\n\
                 BEGIN\n\
                 \x20   UPDATE employees SET salary = salary + amount\n\
                 \x20   WHERE emp_id = emp;\n\
                 \x20   SELECT salary INTO new_salary FROM employees\n\
                 \x20   WHERE emp_id = emp;\n\
                 END;",
            ),
        ),
        Box::new(
            StaticPanel::new(
                "Error Handling",
                "Procedures handle errors explicitly with handlers; functions\n\
                 surface errors to the calling statement.",
            )
            .with_sql(
                "DECLARE EXIT HANDLER FOR SQLEXCEPTION\n\
                 BEGIN\n\
                 \x20   ROLLBACK;\n\
                 END;",
            ),
        ),
        Box::new(SelectFilterPanel::new(
            "CALL",
            "CALL runs a procedure. Pick the department argument and watch\n\
             the procedure's result set.",
            employees,
            "department",
            "Department",
            "CALL get_employees_by_dept('{value}');",
            "Procedure result",
        )?),
        Box::new(StaticPanel::new(
            "Differences",
            "Procedures perform actions, are invoked with CALL, may return\n\
             several result sets, and cannot appear inside a query.\n\
             Functions return one value, plug into SELECT statements, and\n\
             are meant for reusable calculations.",
        )),
        Box::new(QuizPanel::new(Quiz::multi(
            "Which statements about procedures and functions are true? (Select all that apply)",
            &[
                "A procedure can return multiple values.",
                "A function can return multiple values.",
                "Functions can be used in SELECT statements.",
                "Procedures can handle complex operations.",
            ],
            &[
                "A procedure can return multiple values.",
                "Functions can be used in SELECT statements.",
                "Procedures can handle complex operations.",
            ],
        ))),
    ];

    Ok(Page::new("Procedures", panels))
}
