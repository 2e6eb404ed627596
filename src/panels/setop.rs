//! Set-operation panel: two fixed operands, a column-subset multi-select,
//! and one of UNION / UNION ALL / INTERSECT / EXCEPT.

use crossterm::event::KeyCode;
use ratatui::{layout::Constraint, layout::Rect, Frame};

use crate::ops::query::project;
use crate::ops::setop::{set_op, SetOpKind};
use crate::table::Table;
use crate::widgets::MultiSelect;

use super::{
    draw_prose, draw_sql, draw_table, prose_height, sql_height, table_height, vsplit, Panel,
};

pub struct SetOpPanel {
    title: String,
    prose: String,
    kind: SetOpKind,
    left: Table,
    right: Table,
    left_name: String,
    right_name: String,
    columns: MultiSelect,
    output: Option<Table>,
    sql: String,
}

impl SetOpPanel {
    pub fn new(
        title: &str,
        prose: &str,
        kind: SetOpKind,
        left_name: &str,
        left: Table,
        right_name: &str,
        right: Table,
    ) -> Self {
        let options = left.column_names().iter().map(|s| s.to_string()).collect();
        let mut panel = SetOpPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            kind,
            left,
            right,
            left_name: left_name.to_string(),
            right_name: right_name.to_string(),
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
        let cols = chosen.join(", ");
        self.sql = format!(
            "SELECT {} FROM {}\n{}\nSELECT {} FROM {};",
            cols, self.left_name, self.kind, cols, self.right_name
        );
        self.output = project(&self.left, &chosen)
            .and_then(|a| project(&self.right, &chosen).map(|b| (a, b)))
            .and_then(|(a, b)| set_op(self.kind, &a, &b))
            .ok();
    }
}

impl Panel for SetOpPanel {
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
