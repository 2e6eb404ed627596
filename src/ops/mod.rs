//! Relational operations over sample tables.
//!
//! Every operation is a pure function of its inputs: it borrows one or two
//! tables, returns a fresh derived table (or a scalar), and never mutates a
//! source. The mutation helpers in [`modify`] and the transaction session in
//! [`txn`] are the only exceptions, and they operate on page-owned working
//! copies.

pub mod aggregate;
pub mod constraint;
pub mod join;
pub mod modify;
pub mod query;
pub mod setop;
pub mod txn;
pub mod window;
