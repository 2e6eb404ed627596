//! Transactions: atomicity, COMMIT/ROLLBACK, SAVEPOINT, isolation levels
//! and locking.

use crate::datasets;
use crate::error::Result;
use crate::panels::txn::{AtomicPanel, CommitRollbackPanel, SavepointPanel};
use crate::panels::{ChooserPanel, Panel, QuizPanel};
use crate::quiz::Quiz;

use super::Page;

pub fn page() -> Result<Page> {
    let products = datasets::products()?;

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(AtomicPanel::new(
            "ACID",
            "A transaction is atomic: the stock update either applies in\n\
             full or not at all. Deducting more than the available stock\n\
             fails and leaves the table unchanged.",
            products.clone(),
        )),
        Box::new(CommitRollbackPanel::new(
            "COMMIT / ROLLBACK",
            "Deductions change only the working copy. COMMIT makes them\n\
             permanent; ROLLBACK restores the committed state exactly.",
            products.clone(),
        )),
        Box::new(SavepointPanel::new(
            "SAVEPOINT",
            "A savepoint snapshots the transaction mid-flight. ROLLBACK TO\n\
             SAVEPOINT returns to the snapshot without abandoning the whole\n\
             transaction.",
            products,
        )),
        Box::new(ChooserPanel::new(
            "Isolation Levels",
            "Isolation levels control how concurrent transactions see each\n\
             other's work:",
            "Isolation level",
            vec![
                (
                    "Read Uncommitted".to_string(),
                    "Transactions can read uncommitted data, allowing dirty reads.".to_string(),
                ),
                (
                    "Read Committed".to_string(),
                    "Only committed data is visible, preventing dirty reads.".to_string(),
                ),
                (
                    "Repeatable Read".to_string(),
                    "Rows read once stay stable for the transaction, preventing non-repeatable reads.".to_string(),
                ),
                (
                    "Serializable".to_string(),
                    "The strictest level: transactions behave as if executed one after another.".to_string(),
                ),
            ],
        )),
        Box::new(ChooserPanel::new(
            "Locking",
            "Locks keep conflicting transactions apart:",
            "Lock type",
            vec![
                (
                    "Shared lock".to_string(),
                    "Others may still read the locked rows, but not modify them.".to_string(),
                ),
                (
                    "Exclusive lock".to_string(),
                    "The locked rows are unavailable to every other transaction.".to_string(),
                ),
            ],
        )),
        Box::new(QuizPanel::new(Quiz::multi(
            "Which of the following statements about transactions are true? (Select all that apply)",
            &[
                "COMMIT makes changes permanent.",
                "ROLLBACK undoes all changes since the last COMMIT.",
                "SAVEPOINT allows rolling back to intermediate states.",
                "Read Uncommitted is the highest isolation level.",
            ],
            &[
                "COMMIT makes changes permanent.",
                "ROLLBACK undoes all changes since the last COMMIT.",
                "SAVEPOINT allows rolling back to intermediate states.",
            ],
        ))),
    ];

    Ok(Page::new("Transactions", panels))
}
