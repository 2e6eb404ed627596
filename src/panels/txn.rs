//! Transaction-simulation panels: atomic deduction, COMMIT/ROLLBACK and
//! SAVEPOINT over a page-owned session.

use crossterm::event::KeyCode;
use ratatui::{layout::Constraint, layout::Rect, Frame};

use crate::ops::txn::{deduct_stock, Session};
use crate::table::Table;
use crate::value::Value;
use crate::widgets::{Button, NumberInput, SelectInput};

use super::{
    draw_prose, draw_status, draw_table, prose_height, table_height, vsplit, Panel, Status,
};

/// Atomic stock deduction: either the whole update applies or none of it.
pub struct AtomicPanel {
    title: String,
    prose: String,
    products: Table,
    product: SelectInput,
    quantity: NumberInput,
    button: Button,
    focus: usize,
    status: Status,
}

impl AtomicPanel {
    pub fn new(title: &str, prose: &str, products: Table) -> Self {
        let names = products
            .column_values("product_name")
            .unwrap_or_default()
            .iter()
            .map(|v| v.to_string())
            .collect();
        AtomicPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            products,
            product: SelectInput::new("Product", names),
            quantity: NumberInput::new("Deduct", 1, 1, 50, 1),
            button: Button::new("Perform transaction"),
            focus: 0,
            status: Status::None,
        }
    }

    fn submit(&mut self) {
        let product = Value::Str(self.product.value().to_string());
        match deduct_stock(&mut self.products, &product, self.quantity.value) {
            Ok(()) => {
                self.status = Status::Ok(format!(
                    "Transaction successful: stock updated for {}",
                    self.product.value()
                ));
            }
            Err(err) => self.status = Status::Error(format!("transaction failed: {}", err)),
        }
    }
}

impl Panel for AtomicPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.focus = (self.focus + 1) % 3,
            KeyCode::BackTab => self.focus = (self.focus + 2) % 3,
            KeyCode::Enter if self.focus == 2 => self.submit(),
            other => {
                match self.focus {
                    0 => self.product.handle_key(other),
                    1 => self.quantity.handle_key(other),
                    _ => false,
                };
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(table_height(&self.products)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.product.render(frame, chunks[1], self.focus == 0);
        self.quantity.render(frame, chunks[2], self.focus == 1);
        self.button.render(frame, chunks[3], self.focus == 2);
        draw_status(frame, chunks[4], &self.status);
        draw_table(frame, chunks[5], &self.products, "Product table");
    }
}

/// COMMIT / ROLLBACK over an explicit session: deductions hit the working
/// copy, COMMIT publishes it, ROLLBACK restores the committed state.
pub struct CommitRollbackPanel {
    title: String,
    prose: String,
    session: Session,
    quantity: NumberInput,
    deduct: Button,
    commit: Button,
    rollback: Button,
    focus: usize,
    status: Status,
}

impl CommitRollbackPanel {
    pub fn new(title: &str, prose: &str, seed: Table) -> Self {
        CommitRollbackPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            session: Session::new(seed),
            quantity: NumberInput::new("Laptop stock to deduct", 1, 1, 50, 1),
            deduct: Button::new("Start transaction (deduct)"),
            commit: Button::new("COMMIT"),
            rollback: Button::new("ROLLBACK"),
            focus: 0,
            status: Status::None,
        }
    }

    fn press(&mut self) {
        match self.focus {
            1 => {
                let laptop = Value::Str("Laptop".to_string());
                match self.session.deduct_stock(&laptop, self.quantity.value) {
                    Ok(()) => {
                        self.status = Status::Ok(
                            "Transaction in progress: COMMIT to keep, ROLLBACK to undo".to_string(),
                        )
                    }
                    Err(err) => {
                        self.status = Status::Error(format!("transaction failed: {}", err))
                    }
                }
            }
            2 => {
                self.session.commit();
                self.status = Status::Ok("Committed: changes saved permanently".to_string());
            }
            3 => {
                self.session.rollback();
                self.status = Status::Ok("Rolled back: no changes were made".to_string());
            }
            _ => {}
        }
    }
}

impl Panel for CommitRollbackPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.focus = (self.focus + 1) % 4,
            KeyCode::BackTab => self.focus = (self.focus + 3) % 4,
            KeyCode::Enter if self.focus > 0 => self.press(),
            other => {
                if self.focus == 0 {
                    self.quantity.handle_key(other);
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let working = self.session.working().clone();
        let committed = self.session.committed().clone();
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(table_height(&working)),
                Constraint::Length(table_height(&committed)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.quantity.render(frame, chunks[1], self.focus == 0);
        self.deduct.render(frame, chunks[2], self.focus == 1);
        self.commit.render(frame, chunks[3], self.focus == 2);
        self.rollback.render(frame, chunks[4], self.focus == 3);
        draw_status(frame, chunks[5], &self.status);
        draw_table(frame, chunks[6], &working, "Working copy");
        draw_table(frame, chunks[7], &committed, "Committed state");
    }
}

/// SAVEPOINT: snapshot the working copy mid-transaction, then roll back to
/// the snapshot without abandoning the whole transaction.
pub struct SavepointPanel {
    title: String,
    prose: String,
    session: Session,
    quantity: NumberInput,
    deduct: Button,
    save: Button,
    restore: Button,
    focus: usize,
    status: Status,
}

impl SavepointPanel {
    pub fn new(title: &str, prose: &str, seed: Table) -> Self {
        SavepointPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            session: Session::new(seed),
            quantity: NumberInput::new("Laptop stock to deduct", 1, 1, 50, 1),
            deduct: Button::new("Deduct"),
            save: Button::new("SAVEPOINT"),
            restore: Button::new("ROLLBACK TO SAVEPOINT"),
            focus: 0,
            status: Status::None,
        }
    }

    fn press(&mut self) {
        match self.focus {
            1 => {
                let laptop = Value::Str("Laptop".to_string());
                match self.session.deduct_stock(&laptop, self.quantity.value) {
                    Ok(()) => self.status = Status::Ok("Stock deducted".to_string()),
                    Err(err) => {
                        self.status = Status::Error(format!("transaction failed: {}", err))
                    }
                }
            }
            2 => {
                self.session.savepoint();
                self.status = Status::Ok("Savepoint created".to_string());
            }
            3 => {
                if self.session.rollback_to_savepoint() {
                    self.status = Status::Ok("Rolled back to savepoint".to_string());
                } else {
                    self.status = Status::Error("no savepoint to roll back to".to_string());
                }
            }
            _ => {}
        }
    }
}

impl Panel for SavepointPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.focus = (self.focus + 1) % 4,
            KeyCode::BackTab => self.focus = (self.focus + 3) % 4,
            KeyCode::Enter if self.focus > 0 => self.press(),
            other => {
                if self.focus == 0 {
                    self.quantity.handle_key(other);
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let working = self.session.working().clone();
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(table_height(&working)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.quantity.render(frame, chunks[1], self.focus == 0);
        self.deduct.render(frame, chunks[2], self.focus == 1);
        self.save.render(frame, chunks[3], self.focus == 2);
        self.restore.render(frame, chunks[4], self.focus == 3);
        draw_status(frame, chunks[5], &self.status);
        draw_table(frame, chunks[6], &working, "Working copy");
    }
}
