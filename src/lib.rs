//! sqltutor: an interactive terminal tutorial for SQL concepts.
//!
//! Fourteen topic pages, each a row of panel tabs over tiny in-memory
//! sample tables. A relational-operations library drives the demos; one
//! quiz evaluator scores every page's closing quiz.

pub mod app;
pub mod datasets;
pub mod error;
pub mod ops;
pub mod pages;
pub mod panels;
pub mod quiz;
pub mod table;
pub mod value;
pub mod widgets;
