//! Basic queries: SELECT, WHERE, ORDER BY, DISTINCT, LIMIT, LIKE, IN,
//! BETWEEN.

use crate::datasets;
use crate::error::Result;
use crate::panels::query::{
    BetweenPanel, DistinctPanel, FilterPanel, InListPanel, LikePanel, LimitPanel, ProjectPanel,
    SortPanel,
};
use crate::panels::QuizPanel;
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let data = datasets::people()?;

    let panels: Vec<Box<dyn crate::panels::Panel>> = vec![
        Box::new(ProjectPanel::new(
            "SELECT",
            "The SELECT statement retrieves data from a table.\n\
             Pick the columns to include in the result.",
            "employees",
            data.clone(),
        )),
        Box::new(FilterPanel::new(
            "WHERE",
            "The WHERE clause filters rows based on a condition.\n\
             Choose a column and type a value to match (e.g. Engineering or 30).",
            "employees",
            data.clone(),
        )),
        Box::new(SortPanel::new(
            "ORDER BY",
            "ORDER BY sorts query results by a column, ascending or descending.",
            "employees",
            data.clone(),
        )),
        Box::new(DistinctPanel::new(
            "DISTINCT",
            "DISTINCT returns the unique values of a column.",
            "employees",
            data.clone(),
        )),
        Box::new(LimitPanel::new(
            "LIMIT",
            "LIMIT restricts how many rows the query returns.",
            "employees",
            data.clone(),
        )),
        Box::new(LikePanel::new(
            "LIKE",
            "LIKE filters text by pattern: containment, prefix, suffix or\n\
             exact match. Matching is case-sensitive.",
            "employees",
            data.clone(),
        )),
        Box::new(InListPanel::new(
            "IN",
            "IN keeps rows whose column matches any value in a list.",
            "employees",
            data.clone(),
            "Engineering, HR",
        )),
        Box::new(BetweenPanel::new(
            "BETWEEN",
            "BETWEEN keeps rows whose numeric value falls inside an\n\
             inclusive range.",
            "employees",
            data,
        )),
        Box::new(QuizPanel::new(Quiz::single(
            "Which SQL clause is used to filter rows based on conditions?",
            &["SELECT", "WHERE", "DISTINCT", "LIMIT"],
            "WHERE",
        ))),
    ];

    Ok(Page::new("Basics", panels))
}
