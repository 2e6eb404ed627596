//! Embedded sample datasets.
//!
//! Each page seeds its tables from a small CSV document compiled into the
//! binary and parsed against a declared schema. Blank fields load as NULL.

use crate::error::{Error, Result};
use crate::table::{Column, Table};
use crate::value::ColumnType;

/// Parse an embedded CSV document against a declared schema.
pub fn from_csv(schema: &[(&str, ColumnType)], data: &str) -> Result<Table> {
    let columns: Vec<Column> = schema.iter().map(|(n, t)| Column::new(n, *t)).collect();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| Error::Dataset(e.to_string()))?
        .clone();
    if headers.len() != columns.len() {
        return Err(Error::Dataset(format!(
            "seed has {} columns, schema declares {}",
            headers.len(),
            columns.len()
        )));
    }
    for (header, col) in headers.iter().zip(&columns) {
        if header != col.name {
            return Err(Error::Dataset(format!(
                "seed column '{}' does not match schema column '{}'",
                header, col.name
            )));
        }
    }

    let mut table = Table::empty(columns.clone())?;
    for record in reader.records() {
        let record = record.map_err(|e| Error::Dataset(e.to_string()))?;
        let row = record
            .iter()
            .zip(&columns)
            .map(|(field, col)| col.ty.parse_input(&col.name, field))
            .collect::<Result<Vec<_>>>()?;
        table.push_row(row)?;
    }
    Ok(table)
}

const INT: ColumnType = ColumnType::Int;
const TEXT: ColumnType = ColumnType::Text;

/// id/name/age/department/city roster for the basics page.
pub fn people() -> Result<Table> {
    from_csv(
        &[
            ("id", INT),
            ("name", TEXT),
            ("age", INT),
            ("department", TEXT),
            ("city", TEXT),
        ],
        "\
id,name,age,department,city
1,Alice,25,HR,New York
2,Bob,35,Engineering,Los Angeles
3,Charlie,30,Marketing,Chicago
4,David,40,Engineering,San Francisco
5,Eva,29,HR,New York
",
    )
}

/// Six-row staff table with salaries for the aggregation page.
pub fn staff() -> Result<Table> {
    from_csv(
        &[
            ("id", INT),
            ("name", TEXT),
            ("age", INT),
            ("department", TEXT),
            ("salary", INT),
        ],
        "\
id,name,age,department,salary
1,Alice,25,HR,50000
2,Bob,35,Engineering,60000
3,Charlie,30,Marketing,55000
4,David,40,Engineering,70000
5,Eva,29,HR,48000
6,Frank,35,Marketing,62000
",
    )
}

/// Employees with a manager reference; the blank manager_id is NULL.
pub fn employees() -> Result<Table> {
    from_csv(
        &[
            ("emp_id", INT),
            ("name", TEXT),
            ("dept_id", INT),
            ("manager_id", INT),
        ],
        "\
emp_id,name,dept_id,manager_id
1,Alice,101,
2,Bob,102,1
3,Charlie,103,1
4,David,101,2
5,Eva,102,3
",
    )
}

pub fn departments() -> Result<Table> {
    from_csv(
        &[("dept_id", INT), ("department_name", TEXT)],
        "\
dept_id,department_name
101,HR
102,Engineering
103,Marketing
104,Finance
",
    )
}

/// Salary rows; emp_id 6 has no employee on purpose.
pub fn salaries() -> Result<Table> {
    from_csv(
        &[("emp_id", INT), ("salary", INT)],
        "\
emp_id,salary
1,50000
2,60000
3,55000
6,70000
",
    )
}

/// Five-row employee table for the subqueries page.
pub fn subquery_employees() -> Result<Table> {
    from_csv(
        &[
            ("emp_id", INT),
            ("name", TEXT),
            ("age", INT),
            ("department", TEXT),
            ("salary", INT),
        ],
        "\
emp_id,name,age,department,salary
1,Alice,25,HR,50000
2,Bob,35,Engineering,60000
3,Charlie,30,Marketing,55000
4,David,40,Engineering,70000
5,Eva,29,HR,48000
",
    )
}

pub fn budgeted_departments() -> Result<Table> {
    from_csv(
        &[
            ("dept_id", INT),
            ("department_name", TEXT),
            ("budget", INT),
        ],
        "\
dept_id,department_name,budget
101,HR,150000
102,Engineering,300000
103,Marketing,200000
104,Finance,100000
",
    )
}

/// First operand for the set-operations page; Charlie appears in both.
pub fn employees_a() -> Result<Table> {
    from_csv(
        &[
            ("emp_id", INT),
            ("name", TEXT),
            ("department", TEXT),
            ("salary", INT),
        ],
        "\
emp_id,name,department,salary
1,Alice,HR,50000
2,Bob,Engineering,60000
3,Charlie,Marketing,55000
",
    )
}

pub fn employees_b() -> Result<Table> {
    from_csv(
        &[
            ("emp_id", INT),
            ("name", TEXT),
            ("department", TEXT),
            ("salary", INT),
        ],
        "\
emp_id,name,department,salary
3,Charlie,Marketing,55000
4,David,Engineering,70000
5,Eva,HR,48000
",
    )
}

/// Three-row roster used by the modification and constraints pages.
pub fn small_employees() -> Result<Table> {
    from_csv(
        &[
            ("emp_id", INT),
            ("name", TEXT),
            ("department", TEXT),
            ("salary", INT),
        ],
        "\
emp_id,name,department,salary
1,Alice,HR,50000
2,Bob,Engineering,60000
3,Charlie,Marketing,55000
",
    )
}

pub fn department_names() -> Result<Table> {
    from_csv(
        &[("dept_id", INT), ("department_name", TEXT)],
        "\
dept_id,department_name
101,HR
102,Engineering
103,Marketing
",
    )
}

/// Four-row roster for the views page.
pub fn view_employees() -> Result<Table> {
    from_csv(
        &[
            ("emp_id", INT),
            ("name", TEXT),
            ("department", TEXT),
            ("salary", INT),
        ],
        "\
emp_id,name,department,salary
1,Alice,HR,50000
2,Bob,Engineering,60000
3,Charlie,Marketing,55000
4,David,Engineering,70000
",
    )
}

pub fn managed_departments() -> Result<Table> {
    from_csv(
        &[
            ("dept_id", INT),
            ("department_name", TEXT),
            ("manager", TEXT),
        ],
        "\
dept_id,department_name,manager
101,HR,Eve
102,Engineering,Tom
103,Marketing,Susan
",
    )
}

/// Product stock for the transactions and triggers pages.
pub fn products() -> Result<Table> {
    from_csv(
        &[
            ("product_id", INT),
            ("product_name", TEXT),
            ("stock", INT),
            ("price", INT),
        ],
        "\
product_id,product_name,stock,price
1,Laptop,10,1000
2,Phone,15,500
3,Tablet,8,300
",
    )
}

/// Empty audit log appended to by the AFTER-trigger demo.
pub fn audit_log() -> Result<Table> {
    Table::empty(vec![
        Column::new("action", TEXT),
        Column::new("product_id", INT),
        Column::new("seq", INT),
    ])
}

/// Sales figures for the advanced-SQL page.
pub fn sales() -> Result<Table> {
    from_csv(
        &[
            ("sale_id", INT),
            ("product", TEXT),
            ("category", TEXT),
            ("region", TEXT),
            ("quantity", INT),
            ("price", INT),
        ],
        "\
sale_id,product,category,region,quantity,price
1,Laptop,Electronics,North,2,1000
2,Phone,Electronics,South,3,500
3,Tablet,Electronics,North,1,300
4,Laptop,Electronics,East,5,1000
5,Phone,Electronics,West,4,500
",
    )
}

/// Unnormalized project assignments for the normalization walkthrough.
pub fn unnormalized() -> Result<Table> {
    from_csv(
        &[
            ("emp_id", INT),
            ("name", TEXT),
            ("department", TEXT),
            ("project", TEXT),
            ("salary", INT),
            ("manager", TEXT),
        ],
        "\
emp_id,name,department,project,salary,manager
1,Alice,HR,Recruitment,50000,Eve
2,Bob,Engineering,\"Project A, Project B\",60000,Tom
3,Charlie,Engineering,Project B,55000,Tom
4,David,Marketing,Ad Campaign,70000,Susan
",
    )
}

pub fn first_normal_form() -> Result<Table> {
    from_csv(
        &[
            ("emp_id", INT),
            ("name", TEXT),
            ("department", TEXT),
            ("project", TEXT),
            ("salary", INT),
            ("manager", TEXT),
        ],
        "\
emp_id,name,department,project,salary,manager
1,Alice,HR,Recruitment,50000,Eve
2,Bob,Engineering,Project A,60000,Tom
2,Bob,Engineering,Project B,60000,Tom
3,Charlie,Engineering,Project B,55000,Tom
4,David,Marketing,Ad Campaign,70000,Susan
",
    )
}

pub fn project_assignments() -> Result<Table> {
    from_csv(
        &[("emp_id", INT), ("project", TEXT), ("salary", INT)],
        "\
emp_id,project,salary
1,Recruitment,50000
2,Project A,60000
2,Project B,60000
3,Project B,55000
4,Ad Campaign,70000
",
    )
}

pub fn department_managers() -> Result<Table> {
    from_csv(
        &[("department", TEXT), ("manager", TEXT)],
        "\
department,manager
HR,Eve
Engineering,Tom
Marketing,Susan
",
    )
}

pub fn employee_departments() -> Result<Table> {
    from_csv(
        &[("emp_id", INT), ("name", TEXT), ("department", TEXT)],
        "\
emp_id,name,department
1,Alice,HR
2,Bob,Engineering
3,Charlie,Engineering
4,David,Marketing
",
    )
}

pub fn courses() -> Result<Table> {
    from_csv(
        &[("course", TEXT), ("instructor", TEXT)],
        "\
course,instructor
Math,Dr. Smith
Science,Dr. Brown
History,Dr. Johnson
",
    )
}

pub fn enrollments() -> Result<Table> {
    from_csv(
        &[("student_id", INT), ("course", TEXT)],
        "\
student_id,course
1,Math
2,Science
3,History
",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn seeds_load() {
        for table in [
            people(),
            staff(),
            employees(),
            departments(),
            salaries(),
            subquery_employees(),
            budgeted_departments(),
            employees_a(),
            employees_b(),
            small_employees(),
            department_names(),
            view_employees(),
            managed_departments(),
            products(),
            sales(),
            unnormalized(),
            first_normal_form(),
            project_assignments(),
            department_managers(),
            employee_departments(),
            courses(),
            enrollments(),
        ] {
            let table = table.unwrap();
            assert!(table.row_count() > 0);
        }
    }

    #[test]
    fn blank_field_loads_as_null() {
        let emp = employees().unwrap();
        let managers = emp.column_values("manager_id").unwrap();
        assert_eq!(managers[0], Value::Null);
        assert_eq!(managers[1], Value::Int(1));
    }

    #[test]
    fn header_mismatch_rejected() {
        let err = from_csv(&[("id", INT)], "identifier\n1\n").unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }
}
