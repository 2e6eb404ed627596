//! Advanced SQL: CTEs, window functions, recursive queries, pivoting and
//! tuning notes.

use crate::datasets;
use crate::error::Result;
use crate::ops::aggregate::group_sum_product;
use crate::ops::window::{number_sequence, pivot_sum, ranks};
use crate::panels::{Panel, QuizPanel, StaticPanel};
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let sales = datasets::sales()?;
    let revenue = group_sum_product(&sales, "region", "quantity", "price", "total_revenue")?;
    let ranked = ranks(&sales, "region", "quantity")?;
    let sequence = number_sequence(10)?;
    let pivoted = pivot_sum(&sales, "region", "product", "quantity", &["Laptop", "Phone"])?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(
            StaticPanel::new(
                "CTEs",
                "A common table expression names a temporary result set for\n\
                 the query that follows, here the revenue per region.",
            )
            .with_sql(
                "WITH region_revenue AS (\n\
                 \x20   SELECT region, SUM(quantity * price) AS total_revenue\n\
                 \x20   FROM sales\n\
                 \x20   GROUP BY region\n\
                 )\n\
                 SELECT * FROM region_revenue;",
            )
            .with_table("sales", sales)
            .with_table("Region revenue", revenue),
        ),
        Box::new(
            StaticPanel::new(
                "Window Functions",
                "Window functions compute over rows related to the current\n\
                 one. ROW_NUMBER numbers peers, RANK leaves gaps after ties,\n\
                 DENSE_RANK does not. Partitioned by region, ordered by\n\
                 quantity descending.",
            )
            .with_sql(
                "SELECT sale_id, region, product, quantity,\n\
                 \x20   ROW_NUMBER() OVER (PARTITION BY region\n\
                 \x20                      ORDER BY quantity DESC) AS row_number,\n\
                 \x20   RANK()       OVER (...) AS rank,\n\
                 \x20   DENSE_RANK() OVER (...) AS dense_rank\n\
                 FROM sales;",
            )
            .with_table("Ranked sales", ranked),
        ),
        Box::new(
            StaticPanel::new(
                "Recursive",
                "A recursive CTE feeds its own output back in until the\n\
                 condition stops it, here generating the numbers 1 to 10.",
            )
            .with_sql(
                "WITH RECURSIVE numbers AS (\n\
                 \x20   SELECT 1 AS num\n\
                 \x20   UNION ALL\n\
                 \x20   SELECT num + 1 FROM numbers WHERE num < 10\n\
                 )\n\
                 SELECT * FROM numbers;",
            )
            .with_table("Sequence", sequence),
        ),
        Box::new(
            StaticPanel::new(
                "Pivoting",
                "Pivoting turns rows into columns: the quantity sold per\n\
                 region, one column per product.",
            )
            .with_sql(
                "SELECT region,\n\
                 \x20   SUM(CASE WHEN product = 'Laptop' THEN quantity ELSE 0 END)\n\
                 \x20       AS laptop_quantity,\n\
                 \x20   SUM(CASE WHEN product = 'Phone' THEN quantity ELSE 0 END)\n\
                 \x20       AS phone_quantity\n\
                 FROM sales\n\
                 GROUP BY region;",
            )
            .with_table("Pivoted", pivoted),
        ),
        Box::new(StaticPanel::new(
            "Analytical",
            "Analytical functions such as LAG, LEAD and NTILE compare each\n\
             row with its neighbours inside a window, powering running\n\
             totals, deltas and percentile buckets.",
        )),
        Box::new(
            StaticPanel::new(
                "Tuning",
                "Read the query plan before optimizing: index the filtering\n\
                 columns, select only the columns you need, and prefer set\n\
                 operations over row-by-row loops.",
            )
            .with_sql("EXPLAIN SELECT * FROM sales WHERE region = 'North';"),
        ),
        Box::new(QuizPanel::new(Quiz::multi(
            "Which of the following statements about advanced SQL concepts are true? (Select all that apply)",
            &[
                "CTEs simplify complex queries.",
                "Window functions calculate values across rows.",
                "Recursive queries cannot generate sequences.",
                "Pivoting transforms rows into columns.",
            ],
            &[
                "CTEs simplify complex queries.",
                "Window functions calculate values across rows.",
                "Pivoting transforms rows into columns.",
            ],
        ))),
    ];

    Ok(Page::new("Advanced", panels))
}
