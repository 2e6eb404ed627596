//! Aggregation: COUNT/SUM/AVG/MIN/MAX, GROUP BY and HAVING.

use crate::datasets;
use crate::error::Result;
use crate::ops::aggregate::AggregateFunc;
use crate::panels::aggregate::{GroupByPanel, HavingPanel, ScalarAggregatePanel};
use crate::panels::{Panel, QuizPanel};
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let data = datasets::staff()?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(ScalarAggregatePanel::new(
            "COUNT",
            "COUNT() returns how many non-null values a column holds.",
            AggregateFunc::Count,
            "employees",
            data.clone(),
        )),
        Box::new(ScalarAggregatePanel::new(
            "SUM",
            "SUM() totals a numeric column.",
            AggregateFunc::Sum,
            "employees",
            data.clone(),
        )),
        Box::new(ScalarAggregatePanel::new(
            "AVG",
            "AVG() computes the mean of a numeric column.",
            AggregateFunc::Avg,
            "employees",
            data.clone(),
        )),
        Box::new(ScalarAggregatePanel::new(
            "MIN",
            "MIN() returns the smallest value in a column.",
            AggregateFunc::Min,
            "employees",
            data.clone(),
        )),
        Box::new(ScalarAggregatePanel::new(
            "MAX",
            "MAX() returns the largest value in a column.",
            AggregateFunc::Max,
            "employees",
            data.clone(),
        )),
        Box::new(GroupByPanel::new(
            "GROUP BY",
            "GROUP BY collapses rows sharing a value into summary rows,\n\
             one aggregate of the salary column per group.",
            "employees",
            data.clone(),
            "salary",
        )),
        Box::new(HavingPanel::new(
            "HAVING",
            "HAVING filters the groups after aggregation, unlike WHERE,\n\
             which filters rows before it. Only groups whose aggregate\n\
             exceeds the threshold remain.",
            "employees",
            data,
            "salary",
        )),
        Box::new(QuizPanel::new(Quiz::single(
            "Which clause is used to filter groups of rows based on aggregate functions?",
            &["GROUP BY", "WHERE", "HAVING"],
            "HAVING",
        ))),
    ];

    Ok(Page::new("Aggregates", panels))
}
