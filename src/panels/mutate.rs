//! Row-mutation panels: insert/merge forms (optionally guarded by an
//! integrity rule), update and delete. Panels on the same page share one
//! working table; leaving the page discards it.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::KeyCode;
use ratatui::{layout::Constraint, layout::Rect, Frame};

use crate::error::Result;
use crate::ops::constraint::{check_insert, Rule};
use crate::ops::modify::{self, MergeOutcome};
use crate::table::{Row, Table};
use crate::value::{sql_literal, Value};
use crate::widgets::{Button, NumberInput, SelectInput, TextInput};

use super::{
    draw_prose, draw_sql, draw_status, draw_table, prose_height, sql_height, table_height,
    vsplit, Panel, Status,
};

pub type SharedTable = Rc<RefCell<Table>>;

pub fn shared(table: Table) -> SharedTable {
    Rc::new(RefCell::new(table))
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Insert,
    Merge,
}

/// A one-row entry form over the shared table's schema. Each column gets a
/// text field coerced to the declared type on submission; an optional
/// integrity rule guards the append, and an optional default fills a field
/// left at its empty sentinel.
pub struct RowFormPanel {
    title: String,
    prose: String,
    example_sql: Option<String>,
    table: SharedTable,
    table_name: String,
    mode: FormMode,
    merge_key: String,
    rule: Option<Rule>,
    default: Option<(String, Value)>,
    fields: Vec<TextInput>,
    button: Button,
    focus: usize,
    sql: String,
    status: Status,
}

impl RowFormPanel {
    pub fn new(
        title: &str,
        prose: &str,
        table_name: &str,
        table: SharedTable,
        mode: FormMode,
    ) -> Self {
        let fields = table
            .borrow()
            .columns()
            .iter()
            .map(|c| TextInput::new(&c.name))
            .collect();
        let label = match mode {
            FormMode::Insert => "Insert row",
            FormMode::Merge => "Merge row",
        };
        RowFormPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            example_sql: None,
            table,
            table_name: table_name.to_string(),
            mode,
            merge_key: String::new(),
            rule: None,
            default: None,
            fields,
            button: Button::new(label),
            focus: 0,
            sql: String::new(),
            status: Status::None,
        }
    }

    pub fn with_example_sql(mut self, sql: &str) -> Self {
        self.example_sql = Some(sql.to_string());
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn with_default(mut self, column: &str, value: Value) -> Self {
        self.default = Some((column.to_string(), value));
        self
    }

    pub fn with_merge_key(mut self, key: &str) -> Self {
        self.merge_key = key.to_string();
        self
    }

    fn build_row(&self) -> Result<Row> {
        let table = self.table.borrow();
        let mut row = Vec::with_capacity(table.columns().len());
        for (col, field) in table.columns().iter().zip(&self.fields) {
            let raw = field.buffer.trim();
            let value = match (&self.default, raw.is_empty()) {
                // default substitution applies only to the unset sentinel
                (Some((name, value)), true) if *name == col.name => value.clone(),
                _ => col.ty.parse_input(&col.name, raw)?,
            };
            row.push(value);
        }
        Ok(row)
    }

    fn submit(&mut self) {
        let row = match self.build_row() {
            Ok(row) => row,
            Err(err) => {
                self.status = Status::Error(err.to_string());
                self.sql = "-- invalid input, no command generated".to_string();
                return;
            }
        };
        let names = self
            .table
            .borrow()
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let values = row
            .iter()
            .map(sql_literal)
            .collect::<Vec<_>>()
            .join(", ");

        let outcome = {
            let mut table = self.table.borrow_mut();
            match (self.mode, &self.rule) {
                (FormMode::Insert, Some(rule)) => {
                    check_insert(&mut table, rule, row).map(|_| "Row accepted".to_string())
                }
                (FormMode::Insert, None) => {
                    modify::insert(&mut table, row).map(|_| "Row inserted".to_string())
                }
                (FormMode::Merge, _) => {
                    modify::merge(&mut table, &self.merge_key, row).map(|o| match o {
                        MergeOutcome::Inserted => "No match: row inserted".to_string(),
                        MergeOutcome::Updated => "Match found: row updated".to_string(),
                    })
                }
            }
        };

        match outcome {
            Ok(message) => {
                self.sql = match self.mode {
                    FormMode::Insert => format!(
                        "INSERT INTO {} ({})\nVALUES ({});",
                        self.table_name, names, values
                    ),
                    FormMode::Merge => format!(
                        "MERGE INTO {} AS target\nUSING (VALUES ({})) AS source ({})\nON target.{} = source.{}\nWHEN MATCHED THEN UPDATE ...\nWHEN NOT MATCHED THEN INSERT ...;",
                        self.table_name, values, names, self.merge_key, self.merge_key
                    ),
                };
                self.status = Status::Ok(message);
            }
            Err(err) => {
                self.sql = format!(
                    "INSERT INTO {} ({})\nVALUES ({}); -- rejected",
                    self.table_name, names, values
                );
                self.status = Status::Error(err.to_string());
            }
        }
    }
}

impl Panel for RowFormPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        let slots = self.fields.len() + 1;
        match key {
            KeyCode::Tab => self.focus = (self.focus + 1) % slots,
            KeyCode::BackTab => self.focus = (self.focus + slots - 1) % slots,
            KeyCode::Enter if self.focus == self.fields.len() => self.submit(),
            other => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.handle_key(other);
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let table = self.table.borrow().clone();
        let mut constraints = vec![Constraint::Length(prose_height(&self.prose) + 1)];
        if let Some(sql) = &self.example_sql {
            constraints.push(Constraint::Length(sql_height(sql)));
        }
        constraints.extend([
            Constraint::Length(self.fields.len() as u16),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(if self.sql.is_empty() {
                0
            } else {
                sql_height(&self.sql)
            }),
            Constraint::Length(table_height(&table)),
            Constraint::Min(0),
        ]);
        let chunks = vsplit(area, constraints);

        let mut slot = 0;
        draw_prose(frame, chunks[slot], &self.prose);
        slot += 1;
        if let Some(sql) = &self.example_sql {
            draw_sql(frame, chunks[slot], sql);
            slot += 1;
        }
        let field_area = chunks[slot];
        for (i, field) in self.fields.iter().enumerate() {
            let line = Rect {
                x: field_area.x,
                y: field_area.y + i as u16,
                width: field_area.width,
                height: 1,
            };
            if line.y < field_area.y + field_area.height {
                field.render(frame, line, self.focus == i);
            }
        }
        slot += 1;
        self.button
            .render(frame, chunks[slot], self.focus == self.fields.len());
        slot += 1;
        draw_status(frame, chunks[slot], &self.status);
        slot += 1;
        if !self.sql.is_empty() {
            draw_sql(frame, chunks[slot], &self.sql);
        }
        slot += 1;
        draw_table(frame, chunks[slot], &table, "Current table");
    }
}

/// UPDATE one column of the row picked by key.
pub struct UpdatePanel {
    title: String,
    prose: String,
    table: SharedTable,
    table_name: String,
    key_column: String,
    set_column: String,
    key: SelectInput,
    value: NumberInput,
    button: Button,
    focus: usize,
    sql: String,
    status: Status,
}

impl UpdatePanel {
    pub fn new(
        title: &str,
        prose: &str,
        table_name: &str,
        table: SharedTable,
        key_column: &str,
        set_column: &str,
    ) -> Self {
        let keys = Self::keys(&table, key_column);
        UpdatePanel {
            title: title.to_string(),
            prose: prose.to_string(),
            table,
            table_name: table_name.to_string(),
            key_column: key_column.to_string(),
            set_column: set_column.to_string(),
            key: SelectInput::new(key_column, keys),
            value: NumberInput::new(set_column, 50_000, 1, 1_000_000, 1_000),
            button: Button::new("Update"),
            focus: 0,
            sql: String::new(),
            status: Status::None,
        }
    }

    fn keys(table: &SharedTable, key_column: &str) -> Vec<String> {
        table
            .borrow()
            .column_values(key_column)
            .unwrap_or_default()
            .iter()
            .map(|v| v.to_string())
            .collect()
    }

    fn refresh_keys(&mut self) {
        let keys = Self::keys(&self.table, &self.key_column);
        if !keys.is_empty() && keys != self.key.options {
            let keep = self.key.index.min(keys.len() - 1);
            self.key = SelectInput::new(&self.key_column, keys);
            self.key.index = keep;
        }
    }

    fn submit(&mut self) {
        let raw_key = self.key.value().to_string();
        let mut table = self.table.borrow_mut();
        let key = match table
            .column(&self.key_column)
            .and_then(|c| c.ty.parse_input(&self.key_column, &raw_key))
        {
            Ok(v) => v,
            Err(err) => {
                self.status = Status::Error(err.to_string());
                return;
            }
        };
        match modify::update_where(
            &mut table,
            &self.key_column,
            &key,
            &self.set_column,
            Value::Int(self.value.value),
        ) {
            Ok(n) => {
                self.sql = format!(
                    "UPDATE {}\nSET {} = {}\nWHERE {} = {};",
                    self.table_name, self.set_column, self.value.value, self.key_column, raw_key
                );
                self.status = Status::Ok(format!("{} row(s) updated", n));
            }
            Err(err) => self.status = Status::Error(err.to_string()),
        }
    }
}

impl Panel for UpdatePanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        self.refresh_keys();
        match key {
            KeyCode::Tab => self.focus = (self.focus + 1) % 3,
            KeyCode::BackTab => self.focus = (self.focus + 2) % 3,
            KeyCode::Enter if self.focus == 2 => self.submit(),
            other => {
                match self.focus {
                    0 => self.key.handle_key(other),
                    1 => self.value.handle_key(other),
                    _ => false,
                };
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let table = self.table.borrow().clone();
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(if self.sql.is_empty() {
                    0
                } else {
                    sql_height(&self.sql)
                }),
                Constraint::Length(table_height(&table)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.key.render(frame, chunks[1], self.focus == 0);
        self.value.render(frame, chunks[2], self.focus == 1);
        self.button.render(frame, chunks[3], self.focus == 2);
        draw_status(frame, chunks[4], &self.status);
        if !self.sql.is_empty() {
            draw_sql(frame, chunks[5], &self.sql);
        }
        draw_table(frame, chunks[6], &table, "Current table");
    }
}

/// DELETE the row picked by key.
pub struct DeletePanel {
    title: String,
    prose: String,
    table: SharedTable,
    table_name: String,
    key_column: String,
    key: SelectInput,
    button: Button,
    focus: usize,
    sql: String,
    status: Status,
}

impl DeletePanel {
    pub fn new(
        title: &str,
        prose: &str,
        table_name: &str,
        table: SharedTable,
        key_column: &str,
    ) -> Self {
        let keys = UpdatePanel::keys(&table, key_column);
        DeletePanel {
            title: title.to_string(),
            prose: prose.to_string(),
            table,
            table_name: table_name.to_string(),
            key_column: key_column.to_string(),
            key: SelectInput::new(key_column, keys),
            button: Button::new("Delete"),
            focus: 0,
            sql: String::new(),
            status: Status::None,
        }
    }

    fn refresh_keys(&mut self) {
        let keys = UpdatePanel::keys(&self.table, &self.key_column);
        if !keys.is_empty() && keys != self.key.options {
            let keep = self.key.index.min(keys.len() - 1);
            self.key = SelectInput::new(&self.key_column, keys);
            self.key.index = keep;
        }
    }

    fn submit(&mut self) {
        let raw_key = self.key.value().to_string();
        let mut table = self.table.borrow_mut();
        if table.row_count() == 0 {
            self.status = Status::Error("table is empty".to_string());
            return;
        }
        let key = match table
            .column(&self.key_column)
            .and_then(|c| c.ty.parse_input(&self.key_column, &raw_key))
        {
            Ok(v) => v,
            Err(err) => {
                self.status = Status::Error(err.to_string());
                return;
            }
        };
        match modify::delete_where(&mut table, &self.key_column, &key) {
            Ok(n) => {
                self.sql = format!(
                    "DELETE FROM {}\nWHERE {} = {};",
                    self.table_name, self.key_column, raw_key
                );
                self.status = Status::Ok(format!("{} row(s) deleted", n));
            }
            Err(err) => self.status = Status::Error(err.to_string()),
        }
    }
}

impl Panel for DeletePanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        self.refresh_keys();
        match key {
            KeyCode::Tab | KeyCode::BackTab => self.focus = 1 - self.focus,
            KeyCode::Enter if self.focus == 1 => self.submit(),
            other => {
                if self.focus == 0 {
                    self.key.handle_key(other);
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let table = self.table.borrow().clone();
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(if self.sql.is_empty() {
                    0
                } else {
                    sql_height(&self.sql)
                }),
                Constraint::Length(table_height(&table)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.key.render(frame, chunks[1], self.focus == 0);
        self.button.render(frame, chunks[2], self.focus == 1);
        draw_status(frame, chunks[3], &self.status);
        if !self.sql.is_empty() {
            draw_sql(frame, chunks[4], &self.sql);
        }
        draw_table(frame, chunks[5], &table, "Current table");
    }
}
