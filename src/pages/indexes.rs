//! Indexes: an index-backed filter demo, the index-kind explorer and the
//! trade-off notes.

use crate::datasets;
use crate::error::Result;
use crate::panels::query::SelectFilterPanel;
use crate::panels::{ChooserPanel, Panel, QuizPanel, StaticPanel};
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let data = datasets::people()?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(SelectFilterPanel::new(
            "Creating Indexes",
            "An index lets the database locate rows without scanning the\n\
             whole table. With idx_department in place, this lookup becomes\n\
             an index probe.",
            data,
            "department",
            "Department",
            "CREATE INDEX idx_department ON employees(department);\n\
             SELECT * FROM employees WHERE department = '{value}';",
            "Filtered rows",
        )?),
        Box::new(
            ChooserPanel::new(
                "Types of Indexes",
                "SQL supports several index types, each serving a purpose.",
                "Index type",
                vec![
                    (
                        "Unique".to_string(),
                        "Ensures no duplicate values in the indexed column.".to_string(),
                    ),
                    (
                        "Full-text".to_string(),
                        "Speeds up searches inside text data.".to_string(),
                    ),
                    (
                        "Composite".to_string(),
                        "Covers queries filtering on several columns at once.".to_string(),
                    ),
                ],
            )
            .with_sqls(vec![
                "CREATE UNIQUE INDEX idx_unique_name ON employees(name);".to_string(),
                "CREATE FULLTEXT INDEX idx_fulltext_name ON employees(name);".to_string(),
                "CREATE INDEX idx_dept_salary ON employees(department, salary);".to_string(),
            ]),
        ),
        Box::new(
            StaticPanel::new(
                "Performance",
                "Indexes speed up SELECT, filtering and sorting, but slow\n\
                 down INSERT, UPDATE and DELETE because the index must be\n\
                 maintained, and they cost storage. Index the columns you\n\
                 query often; avoid indexing everything.",
            )
            .with_sql(
                "CREATE INDEX idx_salary ON employees(salary);\n\
                 SELECT * FROM employees WHERE salary > 55000;",
            ),
        ),
        Box::new(
            StaticPanel::new(
                "DROP INDEX",
                "An index that is no longer used can be dropped to reclaim\n\
                 storage and speed up writes.",
            )
            .with_sql("DROP INDEX idx_department ON employees;"),
        ),
        Box::new(
            StaticPanel::new(
                "Optimization",
                "Remove unused indexes, prefer composite indexes for\n\
                 multi-column filters, and review usage statistics regularly.",
            )
            .with_sql("ANALYZE TABLE employees;\nOPTIMIZE TABLE employees;"),
        ),
        Box::new(QuizPanel::new(Quiz::multi(
            "Which statements about SQL indexes are true? (Select all that apply)",
            &[
                "Indexes improve SELECT query performance.",
                "Indexes always improve INSERT performance.",
                "Full-text indexes are used for text search.",
                "Unique indexes allow duplicate values.",
            ],
            &[
                "Indexes improve SELECT query performance.",
                "Full-text indexes are used for text search.",
            ],
        ))),
    ];

    Ok(Page::new("Indexes", panels))
}
