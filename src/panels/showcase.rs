//! One-off demo panels: the updating-views threshold demo and the trigger
//! simulations.

use crossterm::event::KeyCode;
use ratatui::{layout::Constraint, layout::Rect, Frame};

use crate::ops::modify;
use crate::ops::query::{filter_eq, filter_gt};
use crate::table::Table;
use crate::value::Value;
use crate::widgets::{Button, NumberInput, TextInput};

use super::mutate::SharedTable;
use super::{
    draw_prose, draw_sql, draw_status, draw_table, prose_height, sql_height, table_height,
    vsplit, Panel, Status,
};

/// CREATE OR REPLACE VIEW demo: a fixed equality filter plus an adjustable
/// numeric threshold.
pub struct ThresholdFilterPanel {
    title: String,
    prose: String,
    table: Table,
    fixed_column: String,
    fixed_value: Value,
    threshold_column: String,
    threshold: NumberInput,
    output: Table,
    sql_template: String,
    sql: String,
}

impl ThresholdFilterPanel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: &str,
        prose: &str,
        table: Table,
        fixed_column: &str,
        fixed_value: Value,
        threshold_column: &str,
        threshold: NumberInput,
        sql_template: &str,
    ) -> Self {
        let mut panel = ThresholdFilterPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            output: table.clone(),
            table,
            fixed_column: fixed_column.to_string(),
            fixed_value,
            threshold_column: threshold_column.to_string(),
            threshold,
            sql_template: sql_template.to_string(),
            sql: String::new(),
        };
        panel.recompute();
        panel
    }

    fn recompute(&mut self) {
        if let Ok(out) = filter_eq(&self.table, &self.fixed_column, &self.fixed_value)
            .and_then(|t| filter_gt(&t, &self.threshold_column, &Value::Int(self.threshold.value)))
        {
            self.output = out;
        }
        self.sql = self
            .sql_template
            .replace("{value}", &self.threshold.value.to_string());
    }
}

impl Panel for ThresholdFilterPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.threshold.handle_key(key) {
            self.recompute();
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(1),
                Constraint::Length(sql_height(&self.sql)),
                Constraint::Length(table_height(&self.output)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.threshold.render(frame, chunks[1], true);
        draw_sql(frame, chunks[2], &self.sql);
        draw_table(frame, chunks[3], &self.output, "View contents");
    }
}

/// BEFORE-trigger demo: the insert is validated before it happens, and a
/// negative stock quantity never reaches the table.
pub struct BeforeTriggerPanel {
    title: String,
    prose: String,
    example_sql: String,
    products: SharedTable,
    name: TextInput,
    stock: NumberInput,
    price: NumberInput,
    button: Button,
    focus: usize,
    status: Status,
}

impl BeforeTriggerPanel {
    pub fn new(title: &str, prose: &str, example_sql: &str, products: SharedTable) -> Self {
        BeforeTriggerPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            example_sql: example_sql.to_string(),
            products,
            name: TextInput::new("Product name"),
            stock: NumberInput::new("Stock", 10, -10, 100, 1),
            price: NumberInput::new("Price", 1000, 1, 10_000, 100),
            button: Button::new("Insert product"),
            focus: 0,
            status: Status::None,
        }
    }

    fn submit(&mut self) {
        if self.stock.value < 0 {
            self.status =
                Status::Error("BEFORE trigger fired: stock cannot be negative".to_string());
            return;
        }
        let name = self.name.buffer.trim().to_string();
        if name.is_empty() {
            self.status = Status::Error("enter a product name".to_string());
            return;
        }
        let mut products = self.products.borrow_mut();
        let next_id = products.row_count() as i64 + 1;
        let row = vec![
            Value::Int(next_id),
            Value::Str(name),
            Value::Int(self.stock.value),
            Value::Int(self.price.value),
        ];
        match modify::insert(&mut products, row) {
            Ok(()) => self.status = Status::Ok("Product inserted".to_string()),
            Err(err) => self.status = Status::Error(err.to_string()),
        }
    }
}

impl Panel for BeforeTriggerPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.focus = (self.focus + 1) % 4,
            KeyCode::BackTab => self.focus = (self.focus + 3) % 4,
            KeyCode::Enter if self.focus == 3 => self.submit(),
            other => {
                match self.focus {
                    0 => self.name.handle_key(other),
                    1 => self.stock.handle_key(other),
                    2 => self.price.handle_key(other),
                    _ => false,
                };
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let products = self.products.borrow().clone();
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(sql_height(&self.example_sql)),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(table_height(&products)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        draw_sql(frame, chunks[1], &self.example_sql);
        self.name.render(frame, chunks[2], self.focus == 0);
        self.stock.render(frame, chunks[3], self.focus == 1);
        self.price.render(frame, chunks[4], self.focus == 2);
        self.button.render(frame, chunks[5], self.focus == 3);
        draw_status(frame, chunks[6], &self.status);
        draw_table(frame, chunks[7], &products, "Product table");
    }
}

/// AFTER-trigger demo: a successful insert appends an entry to the audit
/// log as a side effect.
pub struct AfterTriggerPanel {
    title: String,
    prose: String,
    example_sql: String,
    products: SharedTable,
    audit: SharedTable,
    name: TextInput,
    stock: NumberInput,
    price: NumberInput,
    button: Button,
    focus: usize,
    seq: i64,
    status: Status,
}

impl AfterTriggerPanel {
    pub fn new(
        title: &str,
        prose: &str,
        example_sql: &str,
        products: SharedTable,
        audit: SharedTable,
    ) -> Self {
        AfterTriggerPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            example_sql: example_sql.to_string(),
            products,
            audit,
            name: TextInput::new("Product name"),
            stock: NumberInput::new("Stock", 10, 0, 100, 1),
            price: NumberInput::new("Price", 1000, 1, 10_000, 100),
            button: Button::new("Insert product"),
            focus: 0,
            seq: 0,
            status: Status::None,
        }
    }

    fn submit(&mut self) {
        let name = self.name.buffer.trim().to_string();
        if name.is_empty() {
            self.status = Status::Error("enter a product name".to_string());
            return;
        }
        let mut products = self.products.borrow_mut();
        let next_id = products.row_count() as i64 + 1;
        let row = vec![
            Value::Int(next_id),
            Value::Str(name),
            Value::Int(self.stock.value),
            Value::Int(self.price.value),
        ];
        if let Err(err) = modify::insert(&mut products, row) {
            self.status = Status::Error(err.to_string());
            return;
        }
        self.seq += 1;
        let mut audit = self.audit.borrow_mut();
        let log_row = vec![
            Value::Str("INSERT".to_string()),
            Value::Int(next_id),
            Value::Int(self.seq),
        ];
        match modify::insert(&mut audit, log_row) {
            Ok(()) => self.status = Status::Ok("Product inserted and audit log updated".to_string()),
            Err(err) => self.status = Status::Error(err.to_string()),
        }
    }
}

impl Panel for AfterTriggerPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.focus = (self.focus + 1) % 4,
            KeyCode::BackTab => self.focus = (self.focus + 3) % 4,
            KeyCode::Enter if self.focus == 3 => self.submit(),
            other => {
                match self.focus {
                    0 => self.name.handle_key(other),
                    1 => self.stock.handle_key(other),
                    2 => self.price.handle_key(other),
                    _ => false,
                };
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let products = self.products.borrow().clone();
        let audit = self.audit.borrow().clone();
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(sql_height(&self.example_sql)),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(table_height(&products)),
                Constraint::Length(table_height(&audit)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        draw_sql(frame, chunks[1], &self.example_sql);
        self.name.render(frame, chunks[2], self.focus == 0);
        self.stock.render(frame, chunks[3], self.focus == 1);
        self.price.render(frame, chunks[4], self.focus == 2);
        self.button.render(frame, chunks[5], self.focus == 3);
        draw_status(frame, chunks[6], &self.status);
        draw_table(frame, chunks[7], &products, "Product table");
        draw_table(frame, chunks[8], &audit, "Audit log");
    }
}
