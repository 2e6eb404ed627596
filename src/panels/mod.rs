//! Topic panels.
//!
//! A panel is one tab of a topic page: prose, an optional SQL example, an
//! optional interactive demo and its derived output. Panels own their
//! widget state and recompute their output on every handled key.

pub mod aggregate;
pub mod mutate;
pub mod query;
pub mod setop;
pub mod showcase;
pub mod txn;

use std::collections::BTreeSet;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table as TableWidget, Wrap},
    Frame,
};

use crate::quiz::{evaluate, Quiz, QuizResult};
use crate::table::Table;

/// One tab of a topic page.
pub trait Panel {
    fn title(&self) -> &str;
    fn handle_key(&mut self, key: KeyCode);
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Rows needed to show a table widget: rows + header + borders.
pub fn table_height(table: &Table) -> u16 {
    table.row_count() as u16 + 3
}

pub fn prose_height(text: &str) -> u16 {
    text.lines().count() as u16
}

pub fn sql_height(sql: &str) -> u16 {
    sql.trim().lines().count() as u16 + 2
}

/// Render a sample or derived table: bold underlined yellow headers,
/// content-sized columns.
pub fn draw_table(frame: &mut Frame, area: Rect, table: &Table, title: &str) {
    let header_cells = table.column_names().into_iter().map(|name| {
        Cell::from(name.to_string()).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
    });
    let header = TableRow::new(header_cells).height(1);

    let rows = table.rows().iter().map(|row| {
        let cells = row.iter().map(|v| Cell::from(v.to_string()));
        TableRow::new(cells).height(1)
    });

    let widths: Vec<Constraint> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let content = table
                .rows()
                .iter()
                .map(|r| r[i].to_string().len())
                .max()
                .unwrap_or(0)
                .max(col.name.len()) as u16;
            Constraint::Length(content + 2)
        })
        .collect();

    let widget = TableWidget::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .column_spacing(2);
    frame.render_widget(widget, area);
}

pub fn draw_prose(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
}

pub fn draw_sql(frame: &mut Frame, area: Rect, sql: &str) {
    let widget = Paragraph::new(sql.trim().to_string())
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title("SQL"));
    frame.render_widget(widget, area);
}

/// Status line: errors in red, confirmations in green.
pub fn draw_status(frame: &mut Frame, area: Rect, status: &Status) {
    let line = match status {
        Status::None => Line::default(),
        Status::Error(msg) => Line::from(Span::styled(
            format!("error: {}", msg),
            Style::default().fg(Color::Red),
        )),
        Status::Ok(msg) => Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Green),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[derive(Clone, Debug, Default)]
pub enum Status {
    #[default]
    None,
    Ok(String),
    Error(String),
}

/// Vertical layout helper used by every panel.
pub fn vsplit(area: Rect, constraints: Vec<Constraint>) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
}

/// Prose, optional SQL example, optional fixed tables. No interaction.
pub struct StaticPanel {
    title: String,
    prose: String,
    sql: Option<String>,
    tables: Vec<(String, Table)>,
}

impl StaticPanel {
    pub fn new(title: &str, prose: &str) -> Self {
        StaticPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            sql: None,
            tables: Vec::new(),
        }
    }

    pub fn with_sql(mut self, sql: &str) -> Self {
        self.sql = Some(sql.to_string());
        self
    }

    pub fn with_table(mut self, caption: &str, table: Table) -> Self {
        self.tables.push((caption.to_string(), table));
        self
    }
}

impl Panel for StaticPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, _key: KeyCode) {}

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut constraints = vec![Constraint::Length(prose_height(&self.prose) + 1)];
        if let Some(sql) = &self.sql {
            constraints.push(Constraint::Length(sql_height(sql)));
        }
        for (_, table) in &self.tables {
            constraints.push(Constraint::Length(table_height(table)));
        }
        constraints.push(Constraint::Min(0));
        let chunks = vsplit(area, constraints);

        let mut slot = 0;
        draw_prose(frame, chunks[slot], &self.prose);
        slot += 1;
        if let Some(sql) = &self.sql {
            draw_sql(frame, chunks[slot], sql);
            slot += 1;
        }
        for (caption, table) in &self.tables {
            draw_table(frame, chunks[slot], table, caption);
            slot += 1;
        }
    }
}

/// A select input whose choice switches an explanation (and optionally a
/// SQL snippet): isolation levels, lock types, index kinds, scenarios.
pub struct ChooserPanel {
    title: String,
    prose: String,
    select: crate::widgets::SelectInput,
    notes: Vec<String>,
    sqls: Option<Vec<String>>,
}

impl ChooserPanel {
    pub fn new(title: &str, prose: &str, label: &str, entries: Vec<(String, String)>) -> Self {
        let (options, notes): (Vec<String>, Vec<String>) = entries.into_iter().unzip();
        ChooserPanel {
            title: title.to_string(),
            prose: prose.to_string(),
            select: crate::widgets::SelectInput::new(label, options),
            notes,
            sqls: None,
        }
    }

    pub fn with_sqls(mut self, sqls: Vec<String>) -> Self {
        self.sqls = Some(sqls);
        self
    }
}

impl Panel for ChooserPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        self.select.handle_key(key);
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let sql = self
            .sqls
            .as_ref()
            .map(|s| s[self.select.index].clone());
        let mut constraints = vec![
            Constraint::Length(prose_height(&self.prose) + 1),
            Constraint::Length(1),
            Constraint::Length(2),
        ];
        if let Some(sql) = &sql {
            constraints.push(Constraint::Length(sql_height(sql)));
        }
        constraints.push(Constraint::Min(0));
        let chunks = vsplit(area, constraints);

        draw_prose(frame, chunks[0], &self.prose);
        self.select.render(frame, chunks[1], true);
        let note = Paragraph::new(self.notes[self.select.index].clone())
            .style(Style::default().fg(Color::Cyan))
            .wrap(Wrap { trim: false });
        frame.render_widget(note, chunks[2]);
        if let Some(sql) = &sql {
            draw_sql(frame, chunks[3], sql);
        }
    }
}

/// The quiz tab. Two states: awaiting submission and result shown;
/// resubmitting recomputes from scratch.
pub struct QuizPanel {
    title: String,
    quiz: Quiz,
    cursor: usize,
    selected: BTreeSet<usize>,
    result: Option<QuizResult>,
}

impl QuizPanel {
    pub fn new(quiz: Quiz) -> Self {
        QuizPanel {
            title: "Quiz".to_string(),
            quiz,
            cursor: 0,
            selected: BTreeSet::new(),
            result: None,
        }
    }

    pub fn titled(title: &str, quiz: Quiz) -> Self {
        QuizPanel {
            title: title.to_string(),
            ..QuizPanel::new(quiz)
        }
    }

    fn submission(&self) -> BTreeSet<String> {
        self.selected
            .iter()
            .map(|&i| self.quiz.options[i].clone())
            .collect()
    }
}

impl Panel for QuizPanel {
    fn title(&self) -> &str {
        &self.title
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => {
                self.cursor = if self.cursor == 0 {
                    self.quiz.options.len() - 1
                } else {
                    self.cursor - 1
                };
            }
            KeyCode::Down => {
                self.cursor = (self.cursor + 1) % self.quiz.options.len();
            }
            KeyCode::Char(' ') => {
                if self.quiz.single_choice {
                    self.selected.clear();
                    self.selected.insert(self.cursor);
                } else if !self.selected.insert(self.cursor) {
                    self.selected.remove(&self.cursor);
                }
            }
            KeyCode::Enter => {
                self.result = Some(evaluate(&self.submission(), &self.quiz.correct));
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                self.quiz.prompt.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        for (i, option) in self.quiz.options.iter().enumerate() {
            let mark = match (self.quiz.single_choice, self.selected.contains(&i)) {
                (true, true) => "(o)",
                (true, false) => "( )",
                (false, true) => "[x]",
                (false, false) => "[ ]",
            };
            let cursor = if i == self.cursor { ">" } else { " " };
            let style = if i == self.cursor {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{} {} {}", cursor, mark, option),
                style,
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::raw(
            "space selects, enter submits",
        )));

        if let Some(result) = &self.result {
            lines.push(Line::default());
            if result.is_correct {
                lines.push(Line::from(Span::styled(
                    "Correct!",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    "Not quite:",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
                for item in &result.missing {
                    lines.push(Line::from(Span::styled(
                        format!("  missing: {}", item),
                        Style::default().fg(Color::Red),
                    )));
                }
                for item in &result.extra {
                    lines.push(Line::from(Span::styled(
                        format!("  extra: {}", item),
                        Style::default().fg(Color::Red),
                    )));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }
}
