//! Normal forms walkthrough and the denormalization trade-off notes.

use crate::datasets;
use crate::error::Result;
use crate::panels::{ChooserPanel, Panel, QuizPanel, StaticPanel};
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let unnormalized = datasets::unnormalized()?;
    let first_nf = datasets::first_normal_form()?;
    let assignments = datasets::project_assignments()?;
    let managers = datasets::department_managers()?;
    let employees = datasets::employee_departments()?;
    let courses = datasets::courses()?;
    let enrollments = datasets::enrollments()?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(
            StaticPanel::new(
                "1NF",
                "First Normal Form requires atomic values and unique rows.\n\
                 Bob's combined project list violates atomicity; splitting it\n\
                 into one row per project restores 1NF.",
            )
            .with_table("Unnormalized", unnormalized)
            .with_table("Normalized to 1NF", first_nf),
        ),
        Box::new(
            StaticPanel::new(
                "2NF",
                "Second Normal Form additionally demands that non-key columns\n\
                 depend on the whole composite key. Department and manager\n\
                 depend only on the department, so they move to their own\n\
                 table.",
            )
            .with_sql(
                "CREATE TABLE project_details (emp_id INT, project VARCHAR(50),\n\
                 \x20                            salary DECIMAL(10, 2));\n\
                 CREATE TABLE department_manager (department VARCHAR(50),\n\
                 \x20                              manager VARCHAR(50));",
            )
            .with_table("Employee-project", assignments)
            .with_table("Department-manager", managers.clone()),
        ),
        Box::new(
            StaticPanel::new(
                "3NF",
                "Third Normal Form removes transitive dependencies: the\n\
                 manager depends on the department, not on the employee, so\n\
                 the manager column leaves the employee table.",
            )
            .with_table("Employees", employees)
            .with_table("Managers", managers),
        ),
        Box::new(
            StaticPanel::new(
                "BCNF",
                "Boyce-Codd Normal Form requires every determinant to be a\n\
                 candidate key. With course -> instructor, the course table\n\
                 splits away from the enrollment table.",
            )
            .with_sql(
                "CREATE TABLE courses (course VARCHAR(50) PRIMARY KEY,\n\
                 \x20                    instructor VARCHAR(50));\n\
                 CREATE TABLE enrollments (student_id INT, course VARCHAR(50),\n\
                 \x20   FOREIGN KEY (course) REFERENCES courses(course));",
            )
            .with_table("Courses", courses)
            .with_table("Enrollments", enrollments),
        ),
        Box::new(
            StaticPanel::new(
                "Denormalization",
                "Denormalization reintroduces redundancy to cut down joins:\n\
                 merging tables, duplicating columns or storing computed\n\
                 values. It trades write safety for read speed.",
            )
            .with_sql(
                "SELECT e.emp_id, e.name, e.department, m.manager\n\
                 FROM employees e\n\
                 JOIN managers m ON e.department = m.department;",
            ),
        ),
        Box::new(ChooserPanel::new(
            "Trade-offs",
            "Normalization protects integrity in write-heavy systems;\n\
             denormalization speeds up read-heavy ones. Pick a scenario:",
            "Scenario",
            vec![
                (
                    "Transaction processing (banking system)".to_string(),
                    "Normalization is preferred: consistency and integrity matter most under heavy writes.".to_string(),
                ),
                (
                    "Data analysis (reporting dashboard)".to_string(),
                    "Denormalization is better: fewer joins make read-heavy dashboards fast.".to_string(),
                ),
            ],
        )),
        Box::new(QuizPanel::titled(
            "Quiz 1",
            Quiz::multi(
                "Which of the following are advantages of normalization? (Select all that apply)",
                &[
                    "Minimizes data redundancy",
                    "Improves query performance in read-heavy systems",
                    "Ensures data consistency",
                    "Simplifies queries",
                ],
                &["Minimizes data redundancy", "Ensures data consistency"],
            ),
        )),
        Box::new(QuizPanel::titled(
            "Quiz 2",
            Quiz::multi(
                "Which normalization form ensures no partial dependency?",
                &["1NF", "2NF", "3NF", "BCNF"],
                &["2NF"],
            ),
        )),
    ];

    Ok(Page::new("Normal Forms", panels))
}
