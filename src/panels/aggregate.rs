//! Aggregation panels: single-function scalar aggregates, GROUP BY and
//! HAVING.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use strum::IntoEnumIterator;

use crate::ops::aggregate::{aggregate, group_aggregate, having_gt, AggregateFunc};
use crate::table::Table;
use crate::value::Value;
use crate::widgets::{NumberInput, SelectInput};

use super::{
    draw_prose, draw_sql, draw_table, prose_height, sql_height, table_height, vsplit, Panel,
};

/// One aggregate function applied to a selectable column, reporting a
/// single scalar.
pub struct ScalarAggregatePanel {
    title: String,
    prose: String,
    func: AggregateFunc,
    table: Table,
    table_name: String,
    column: SelectInput,
    output: Value,
    sql: String,
}

impl ScalarAggregatePanel {
    pub fn new(
        title: &str,
        prose: &str,
        func: AggregateFunc,
        table_name: &str,
        table: Table,
    ) -> Self {
        // COUNT may target any column; the arithmetic functions only make
        // sense on numeric ones, so only those are offered
        let options: Vec<String> = if func == AggregateFunc::Count {
            table.column_names().iter().map(|s| s.to_string()).collect()
        } else {
            table
                .numeric_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect()
        };
        let mut panel = ScalarAggregatePanel {
            title: title.to_string(),
            prose: prose.to_string(),
            func,
            table,
            table_name: table_name.to_string(),
            column: SelectInput::new("Column", options),
            output: Value::Null,
            sql: String::new(),
        };
        panel.recompute();
        panel
    }

    fn recompute(&mut self) {
        if let Ok(v) = aggregate(&self.table, self.func, self.column.value()) {
            self.output = v;
        }
        self.sql = format!(
            "SELECT {}({}) FROM {};",
            self.func,
            self.column.value(),
            self.table_name
        );
    }
}

impl Panel for ScalarAggregatePanel {
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
                Constraint::Length(table_height(&self.table)),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(sql_height(&self.sql)),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        draw_table(frame, chunks[1], &self.table, "Sample table");
        self.column.render(frame, chunks[2], true);
        let result = Line::from(vec![
            Span::raw(format!("{}({}) = ", self.func, self.column.value())),
            Span::styled(
                self.output.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(result), chunks[3]);
        draw_sql(frame, chunks[4], &self.sql);
    }
}

/// GROUP BY with a selectable grouping column and aggregate function over
/// a fixed target column.
pub struct GroupByPanel {
    title: String,
    prose: String,
    table: Table,
    table_name: String,
    target: String,
    group: SelectInput,
    func: SelectInput,
    focus: usize,
    output: Option<Table>,
    sql: String,
}

impl GroupByPanel {
    pub fn new(title: &str, prose: &str, table_name: &str, table: Table, target: &str) -> Self {
        let group_options: Vec<String> = table
            .column_names()
            .iter()
            .filter(|n| **n != target)
            .map(|s| s.to_string())
            .collect();
        let funcs = AggregateFunc::iter().map(|f| f.to_string()).collect();
        let mut panel = GroupByPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            table,
            table_name: table_name.to_string(),
            target: target.to_string(),
            group: SelectInput::new("Group by", group_options),
            func: SelectInput::new("Function", funcs),
            focus: 0,
            output: None,
            sql: String::new(),
        };
        panel.recompute();
        panel
    }

    fn current_func(&self) -> AggregateFunc {
        AggregateFunc::iter()
            .nth(self.func.index)
            .unwrap_or(AggregateFunc::Count)
    }

    fn recompute(&mut self) {
        let func = self.current_func();
        let alias = format!("{}_{}", func.to_string().to_lowercase(), self.target);
        self.output =
            group_aggregate(&self.table, self.group.value(), func, &self.target, &alias).ok();
        self.sql = format!(
            "SELECT {}, {}({}) AS {}\nFROM {}\nGROUP BY {};",
            self.group.value(),
            func,
            self.target,
            alias,
            self.table_name,
            self.group.value()
        );
    }
}

impl Panel for GroupByPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::BackTab => self.focus = 1 - self.focus,
            other => {
                let handled = if self.focus == 0 {
                    self.group.handle_key(other)
                } else {
                    self.func.handle_key(other)
                };
                if handled {
                    self.recompute();
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let result_height = self.output.as_ref().map(table_height).unwrap_or(1);
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(sql_height(&self.sql)),
                Constraint::Length(result_height),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.group.render(frame, chunks[1], self.focus == 0);
        self.func.render(frame, chunks[2], self.focus == 1);
        draw_sql(frame, chunks[3], &self.sql);
        if let Some(out) = &self.output {
            draw_table(frame, chunks[4], out, "Grouped result");
        }
    }
}

/// HAVING: group, aggregate, then keep groups over a threshold. Only the
/// greater-than comparison is offered.
pub struct HavingPanel {
    title: String,
    prose: String,
    table: Table,
    table_name: String,
    target: String,
    group: SelectInput,
    func: SelectInput,
    threshold: NumberInput,
    focus: usize,
    output: Option<Table>,
    sql: String,
}

impl HavingPanel {
    pub fn new(title: &str, prose: &str, table_name: &str, table: Table, target: &str) -> Self {
        let group_options: Vec<String> = table
            .column_names()
            .iter()
            .filter(|n| **n != target)
            .map(|s| s.to_string())
            .collect();
        // COUNT is omitted here, matching the four functions the demo offers
        let funcs = AggregateFunc::iter()
            .filter(|f| *f != AggregateFunc::Count)
            .map(|f| f.to_string())
            .collect();
        let mut panel = HavingPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            table,
            table_name: table_name.to_string(),
            target: target.to_string(),
            group: SelectInput::new("Group by", group_options),
            func: SelectInput::new("Function", funcs),
            threshold: NumberInput::new("Threshold", 100_000, 0, 1_000_000, 10_000),
            focus: 0,
            output: None,
            sql: String::new(),
        };
        panel.recompute();
        panel
    }

    fn current_func(&self) -> AggregateFunc {
        AggregateFunc::iter()
            .filter(|f| *f != AggregateFunc::Count)
            .nth(self.func.index)
            .unwrap_or(AggregateFunc::Sum)
    }

    fn recompute(&mut self) {
        let func = self.current_func();
        let alias = format!("{}_{}", func.to_string().to_lowercase(), self.target);
        self.output =
            group_aggregate(&self.table, self.group.value(), func, &self.target, &alias)
                .and_then(|g| having_gt(&g, self.threshold.value as f64))
                .ok();
        self.sql = format!(
            "SELECT {}, {}({}) AS {}\nFROM {}\nGROUP BY {}\nHAVING {}({}) > {};",
            self.group.value(),
            func,
            self.target,
            alias,
            self.table_name,
            self.group.value(),
            func,
            self.target,
            self.threshold.value
        );
    }
}

impl Panel for HavingPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.focus = (self.focus + 1) % 3,
            KeyCode::BackTab => self.focus = (self.focus + 2) % 3,
            other => {
                let handled = match self.focus {
                    0 => self.group.handle_key(other),
                    1 => self.func.handle_key(other),
                    _ => self.threshold.handle_key(other),
                };
                if handled {
                    self.recompute();
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let result_height = self.output.as_ref().map(table_height).unwrap_or(1);
        let chunks = vsplit(
            area,
            vec![
                Constraint::Length(prose_height(&self.prose) + 1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(sql_height(&self.sql)),
                Constraint::Length(result_height),
                Constraint::Min(0),
            ],
        );
        draw_prose(frame, chunks[0], &self.prose);
        self.group.render(frame, chunks[1], self.focus == 0);
        self.func.render(frame, chunks[2], self.focus == 1);
        self.threshold.render(frame, chunks[3], self.focus == 2);
        draw_sql(frame, chunks[4], &self.sql);
        if let Some(out) = &self.output {
            draw_table(frame, chunks[5], out, "Groups kept");
        }
    }
}
