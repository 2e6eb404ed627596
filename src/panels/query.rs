//! Interactive panels for the single-table query operations.

use crossterm::event::KeyCode;
use ratatui::{layout::Constraint, layout::Rect, Frame};
use strum::IntoEnumIterator;

use crate::error::Result;
use crate::ops::query::{self, PatternMode};
use crate::table::Table;
use crate::widgets::{MultiSelect, NumberInput, SelectInput, TextInput};

use super::{
    draw_prose, draw_sql, draw_status, draw_table, prose_height, sql_height, table_height,
    vsplit, Panel, Status,
};

/// SELECT with a multi-select column list.
pub struct ProjectPanel {
    title: String,
    prose: String,
    table: Table,
    table_name: String,
    columns: MultiSelect,
    output: Option<Table>,
    sql: String,
}

impl ProjectPanel {
    pub fn new(title: &str, prose: &str, table_name: &str, table: Table) -> Self {
        let options = table.column_names().iter().map(|s| s.to_string()).collect();
        let mut panel = ProjectPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            table,
            table_name: table_name.to_string(),
            columns: MultiSelect::with_all_selected("Columns", options),
            output: None,
            sql: String::new(),
        };
        panel.recompute();
        panel
    }

    fn recompute(&mut self) {
        let chosen = self.columns.selected_values();
        if chosen.is_empty() {
            self.output = None;
            self.sql = "-- select at least one column".to_string();
            return;
        }
        self.sql = format!("SELECT {} FROM {};", chosen.join(", "), self.table_name);
        self.output = query::project(&self.table, &chosen).ok();
    }
}

impl Panel for ProjectPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.columns.handle_key(key) {
            self.recompute();
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let result_height = self.output.as_ref().map(table_height).unwrap_or(1);
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(self.columns.height() + 1),
                Constraint::Length(sql_height(&self.sql)),
                Constraint::Length(result_height),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.columns.render(frame, chunks[1], true);
        draw_sql(frame, chunks[2], &self.sql);
        if let Some(out) = &self.output {
            draw_table(frame, chunks[3], out, "Result");
        }
    }
}

/// WHERE column = typed value. Bad input for a numeric column surfaces as
/// an error with the unfiltered table shown, and the SQL block carries a
/// comment instead of a command.
pub struct FilterPanel {
    title: String,
    prose: String,
    table: Table,
    table_name: String,
    column: SelectInput,
    value: TextInput,
    focus: usize,
    output: Table,
    sql: String,
    status: Status,
}

impl FilterPanel {
    pub fn new(title: &str, prose: &str, table_name: &str, table: Table) -> Self {
        let options = table.column_names().iter().map(|s| s.to_string()).collect();
        let mut panel = FilterPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            output: table.clone(),
            table,
            table_name: table_name.to_string(),
            column: SelectInput::new("Column", options),
            value: TextInput::new("Value"),
            focus: 0,
            sql: String::new(),
            status: Status::None,
        };
        panel.recompute();
        panel
    }

    fn recompute(&mut self) {
        let raw = self.value.buffer.trim().to_string();
        if raw.is_empty() {
            self.output = self.table.clone();
            self.sql = format!("SELECT * FROM {}; -- no filter applied", self.table_name);
            self.status = Status::None;
            return;
        }
        match query::filter_eq_input(&self.table, self.column.value(), &raw) {
            Ok(out) => {
                let literal = match self.table.column(self.column.value()) {
                    Ok(col) if col.ty.is_numeric() => raw.clone(),
                    _ => format!("'{}'", raw),
                };
                self.sql = format!(
                    "SELECT * FROM {} WHERE {} = {};",
                    self.table_name,
                    self.column.value(),
                    literal
                );
                self.output = out;
                self.status = Status::None;
            }
            Err(err) => {
                self.output = self.table.clone();
                self.sql = "-- invalid input, no command generated".to_string();
                self.status = Status::Error(err.to_string());
            }
        }
    }
}

impl Panel for FilterPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = 1 - self.focus;
            }
            other => {
                let handled = if self.focus == 0 {
                    self.column.handle_key(other)
                } else {
                    self.value.handle_key(other)
                };
                if handled {
                    self.recompute();
                }
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
                Constraint::Length(sql_height(&self.sql)),
                Constraint::Length(table_height(&self.output)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.column.render(frame, chunks[1], self.focus == 0);
        self.value.render(frame, chunks[2], self.focus == 1);
        draw_status(frame, chunks[3], &self.status);
        draw_sql(frame, chunks[4], &self.sql);
        draw_table(frame, chunks[5], &self.output, "Result");
    }
}

/// Equality filter whose value is picked from the column's distinct values
/// (the view / CALL / index demos). The SQL text comes from a template
/// with a `{value}` placeholder.
pub struct SelectFilterPanel {
    title: String,
    prose: String,
    table: Table,
    column: String,
    choice: SelectInput,
    sql_template: String,
    output: Table,
    sql: String,
    result_caption: String,
}

impl SelectFilterPanel {
    pub fn new(
        title: &str,
        prose: &str,
        table: Table,
        column: &str,
        label: &str,
        sql_template: &str,
        result_caption: &str,
    ) -> Result<Self> {
        let options = query::distinct_strings(&table, column)?;
        let mut panel = SelectFilterPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            output: table.clone(),
            table,
            column: column.to_string(),
            choice: SelectInput::new(label, options),
            sql_template: sql_template.to_string(),
            sql: String::new(),
            result_caption: result_caption.to_string(),
        };
        panel.recompute()?;
        Ok(panel)
    }

    fn recompute(&mut self) -> Result<()> {
        let chosen = self.choice.value().to_string();
        self.output = query::filter_eq_input(&self.table, &self.column, &chosen)?;
        self.sql = self.sql_template.replace("{value}", &chosen);
        Ok(())
    }
}

impl Panel for SelectFilterPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.choice.handle_key(key) {
            // choices come from the column itself, so coercion cannot fail
            let _ = self.recompute();
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
        self.choice.render(frame, chunks[1], true);
        draw_sql(frame, chunks[2], &self.sql);
        draw_table(frame, chunks[3], &self.output, &self.result_caption);
    }
}

/// ORDER BY with column and direction selects.
pub struct SortPanel {
    title: String,
    prose: String,
    table: Table,
    table_name: String,
    column: SelectInput,
    direction: SelectInput,
    focus: usize,
    output: Table,
    sql: String,
}

impl SortPanel {
    pub fn new(title: &str, prose: &str, table_name: &str, table: Table) -> Self {
        let options = table.column_names().iter().map(|s| s.to_string()).collect();
        let mut panel = SortPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            output: table.clone(),
            table,
            table_name: table_name.to_string(),
            column: SelectInput::new("Sort by", options),
            direction: SelectInput::new(
                "Direction",
                vec!["Ascending".to_string(), "Descending".to_string()],
            ),
            focus: 0,
            sql: String::new(),
        };
        panel.recompute();
        panel
    }

    fn recompute(&mut self) {
        let ascending = self.direction.index == 0;
        if let Ok(out) = query::sort_by(&self.table, self.column.value(), ascending) {
            self.output = out;
        }
        self.sql = format!(
            "SELECT * FROM {} ORDER BY {} {};",
            self.table_name,
            self.column.value(),
            if ascending { "ASC" } else { "DESC" }
        );
    }
}

impl Panel for SortPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::BackTab => self.focus = 1 - self.focus,
            other => {
                let handled = if self.focus == 0 {
                    self.column.handle_key(other)
                } else {
                    self.direction.handle_key(other)
                };
                if handled {
                    self.recompute();
                }
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
                Constraint::Length(sql_height(&self.sql)),
                Constraint::Length(table_height(&self.output)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.column.render(frame, chunks[1], self.focus == 0);
        self.direction.render(frame, chunks[2], self.focus == 1);
        draw_sql(frame, chunks[3], &self.sql);
        draw_table(frame, chunks[4], &self.output, "Result");
    }
}

/// SELECT DISTINCT column.
pub struct DistinctPanel {
    title: String,
    prose: String,
    table: Table,
    table_name: String,
    column: SelectInput,
    output: Table,
    sql: String,
}

impl DistinctPanel {
    pub fn new(title: &str, prose: &str, table_name: &str, table: Table) -> Self {
        let options = table.column_names().iter().map(|s| s.to_string()).collect();
        let mut panel = DistinctPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            output: table.clone(),
            table,
            table_name: table_name.to_string(),
            column: SelectInput::new("Column", options),
            sql: String::new(),
        };
        panel.recompute();
        panel
    }

    fn recompute(&mut self) {
        if let Ok(out) = query::distinct(&self.table, self.column.value()) {
            self.output = out;
        }
        self.sql = format!(
            "SELECT DISTINCT {} FROM {};",
            self.column.value(),
            self.table_name
        );
    }
}

impl Panel for DistinctPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.column.handle_key(key) {
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
        self.column.render(frame, chunks[1], true);
        draw_sql(frame, chunks[2], &self.sql);
        draw_table(frame, chunks[3], &self.output, "Distinct values");
    }
}

/// LIMIT with a bounded row count.
pub struct LimitPanel {
    title: String,
    prose: String,
    table: Table,
    table_name: String,
    count: NumberInput,
    output: Table,
    sql: String,
}

impl LimitPanel {
    pub fn new(title: &str, prose: &str, table_name: &str, table: Table) -> Self {
        let max = table.row_count() as i64;
        let mut panel = LimitPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            output: table.clone(),
            table,
            table_name: table_name.to_string(),
            count: NumberInput::new("Rows", max, 1, max, 1),
            sql: String::new(),
        };
        panel.recompute();
        panel
    }

    fn recompute(&mut self) {
        if let Ok(out) = query::limit(&self.table, self.count.value as usize) {
            self.output = out;
        }
        self.sql = format!("SELECT * FROM {} LIMIT {};", self.table_name, self.count.value);
    }
}

impl Panel for LimitPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.count.handle_key(key) {
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
        self.count.render(frame, chunks[1], true);
        draw_sql(frame, chunks[2], &self.sql);
        draw_table(frame, chunks[3], &self.output, "Result");
    }
}

/// LIKE with pattern mode and text input, over text columns only.
pub struct LikePanel {
    title: String,
    prose: String,
    table: Table,
    table_name: String,
    column: SelectInput,
    mode: SelectInput,
    pattern: TextInput,
    focus: usize,
    output: Table,
    sql: String,
}

impl LikePanel {
    pub fn new(title: &str, prose: &str, table_name: &str, table: Table) -> Self {
        let options = table
            .text_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let modes = PatternMode::iter().map(|m| m.to_string()).collect();
        let mut panel = LikePanel {
            title: title.to_string(),
            prose: prose.to_string(),
            output: table.clone(),
            table,
            table_name: table_name.to_string(),
            column: SelectInput::new("Column", options),
            mode: SelectInput::new("Pattern type", modes),
            pattern: TextInput::new("Pattern"),
            focus: 0,
            sql: String::new(),
        };
        panel.recompute();
        panel
    }

    fn current_mode(&self) -> PatternMode {
        PatternMode::iter()
            .nth(self.mode.index)
            .unwrap_or(PatternMode::Contains)
    }

    fn recompute(&mut self) {
        let input = self.pattern.buffer.trim().to_string();
        let mode = self.current_mode();
        if input.is_empty() {
            self.output = self.table.clone();
            self.sql = format!("SELECT * FROM {}; -- no pattern applied", self.table_name);
            return;
        }
        if let Ok(out) = query::filter_like(&self.table, self.column.value(), mode, &input) {
            self.output = out;
        }
        self.sql = match mode {
            PatternMode::Exact => format!(
                "SELECT * FROM {} WHERE {} = '{}';",
                self.table_name,
                self.column.value(),
                input
            ),
            other => format!(
                "SELECT * FROM {} WHERE {} LIKE {};",
                self.table_name,
                self.column.value(),
                other.sql_pattern(&input)
            ),
        };
    }
}

impl Panel for LikePanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.focus = (self.focus + 1) % 3,
            KeyCode::BackTab => self.focus = (self.focus + 2) % 3,
            other => {
                let handled = match self.focus {
                    0 => self.column.handle_key(other),
                    1 => self.mode.handle_key(other),
                    _ => self.pattern.handle_key(other),
                };
                if handled {
                    self.recompute();
                }
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
                Constraint::Length(sql_height(&self.sql)),
                Constraint::Length(table_height(&self.output)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.column.render(frame, chunks[1], self.focus == 0);
        self.mode.render(frame, chunks[2], self.focus == 1);
        self.pattern.render(frame, chunks[3], self.focus == 2);
        draw_sql(frame, chunks[4], &self.sql);
        draw_table(frame, chunks[5], &self.output, "Result");
    }
}

/// IN with a comma-separated value list.
pub struct InListPanel {
    title: String,
    prose: String,
    table: Table,
    table_name: String,
    column: SelectInput,
    values: TextInput,
    focus: usize,
    output: Table,
    sql: String,
    status: Status,
}

impl InListPanel {
    pub fn new(title: &str, prose: &str, table_name: &str, table: Table, seed: &str) -> Self {
        let options = table.column_names().iter().map(|s| s.to_string()).collect();
        let mut values = TextInput::new("Values (comma-separated)");
        values.buffer = seed.to_string();
        let mut panel = InListPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            output: table.clone(),
            table,
            table_name: table_name.to_string(),
            column: SelectInput::new("Column", options),
            values,
            focus: 0,
            sql: String::new(),
            status: Status::None,
        };
        panel.recompute();
        panel
    }

    fn recompute(&mut self) {
        let raw = self.values.buffer.trim().to_string();
        if raw.is_empty() {
            self.output = self.table.clone();
            self.sql = format!("SELECT * FROM {}; -- no filter applied", self.table_name);
            self.status = Status::None;
            return;
        }
        match query::filter_in_input(&self.table, self.column.value(), &raw) {
            Ok(out) => {
                let quoted: Vec<String> = raw
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| format!("'{}'", s.trim()))
                    .collect();
                self.sql = format!(
                    "SELECT * FROM {} WHERE {} IN ({});",
                    self.table_name,
                    self.column.value(),
                    quoted.join(", ")
                );
                self.output = out;
                self.status = Status::None;
            }
            Err(err) => {
                self.output = self.table.clone();
                self.sql = "-- invalid input, no command generated".to_string();
                self.status = Status::Error(err.to_string());
            }
        }
    }
}

impl Panel for InListPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::BackTab => self.focus = 1 - self.focus,
            other => {
                let handled = if self.focus == 0 {
                    self.column.handle_key(other)
                } else {
                    self.values.handle_key(other)
                };
                if handled {
                    self.recompute();
                }
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
                Constraint::Length(sql_height(&self.sql)),
                Constraint::Length(table_height(&self.output)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.column.render(frame, chunks[1], self.focus == 0);
        self.values.render(frame, chunks[2], self.focus == 1);
        draw_status(frame, chunks[3], &self.status);
        draw_sql(frame, chunks[4], &self.sql);
        draw_table(frame, chunks[5], &self.output, "Result");
    }
}

/// BETWEEN over a numeric column with low/high bounds.
pub struct BetweenPanel {
    title: String,
    prose: String,
    table: Table,
    table_name: String,
    column: SelectInput,
    low: NumberInput,
    high: NumberInput,
    focus: usize,
    output: Table,
    sql: String,
}

impl BetweenPanel {
    pub fn new(title: &str, prose: &str, table_name: &str, table: Table) -> Self {
        let options: Vec<String> = table
            .numeric_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (lo, hi) = Self::bounds(&table, &options[0]);
        let mut panel = BetweenPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            output: table.clone(),
            table,
            table_name: table_name.to_string(),
            column: SelectInput::new("Column", options),
            low: NumberInput::new("Low", lo, lo, hi, 1),
            high: NumberInput::new("High", hi, lo, hi, 1),
            focus: 0,
            sql: String::new(),
        };
        panel.recompute();
        panel
    }

    fn bounds(table: &Table, column: &str) -> (i64, i64) {
        let values: Vec<i64> = table
            .column_values(column)
            .unwrap_or_default()
            .iter()
            .filter_map(|v| v.as_f64())
            .map(|v| v as i64)
            .collect();
        let lo = values.iter().min().copied().unwrap_or(0);
        let hi = values.iter().max().copied().unwrap_or(0);
        (lo, hi)
    }

    fn recompute(&mut self) {
        if let Ok(out) = query::filter_between(
            &self.table,
            self.column.value(),
            self.low.value,
            self.high.value,
        ) {
            self.output = out;
        }
        self.sql = format!(
            "SELECT * FROM {} WHERE {} BETWEEN {} AND {};",
            self.table_name,
            self.column.value(),
            self.low.value,
            self.high.value
        );
    }
}

impl Panel for BetweenPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.focus = (self.focus + 1) % 3,
            KeyCode::BackTab => self.focus = (self.focus + 2) % 3,
            other => {
                let handled = match self.focus {
                    0 => {
                        let handled = self.column.handle_key(other);
                        if handled {
                            let (lo, hi) = Self::bounds(&self.table, self.column.value());
                            self.low = NumberInput::new("Low", lo, lo, hi, 1);
                            self.high = NumberInput::new("High", hi, lo, hi, 1);
                        }
                        handled
                    }
                    1 => self.low.handle_key(other),
                    _ => self.high.handle_key(other),
                };
                if handled {
                    self.recompute();
                }
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
                Constraint::Length(sql_height(&self.sql)),
                Constraint::Length(table_height(&self.output)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.column.render(frame, chunks[1], self.focus == 0);
        self.low.render(frame, chunks[2], self.focus == 1);
        self.high.render(frame, chunks[3], self.focus == 2);
        draw_sql(frame, chunks[4], &self.sql);
        draw_table(frame, chunks[5], &self.output, "Result");
    }
}
