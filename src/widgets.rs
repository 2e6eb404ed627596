//! Input widget state and rendering.
//!
//! Each widget is a plain state struct with a key handler and a one-line
//! (or list) renderer. Panels own their widgets, track which one has
//! focus, and recompute their derived output after every handled key.

use std::collections::HashSet;

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

pub fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// Selection from an enumerated list; Space cycles forward.
pub struct SelectInput {
    pub label: String,
    pub options: Vec<String>,
    pub index: usize,
}

impl SelectInput {
    pub fn new(label: &str, options: Vec<String>) -> Self {
        SelectInput {
            label: label.to_string(),
            options,
            index: 0,
        }
    }

    pub fn value(&self) -> &str {
        self.options
            .get(self.index)
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(' ') if !self.options.is_empty() => {
                self.index = (self.index + 1) % self.options.len();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let line = Line::from(vec![
            Span::styled(format!("{}: ", self.label), focus_style(focused)),
            Span::raw("< "),
            Span::styled(self.value().to_string(), Style::default().fg(Color::Cyan)),
            Span::raw(" >  (space cycles)"),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Free-text value; printable keys edit it while focused.
pub struct TextInput {
    pub label: String,
    pub buffer: String,
}

impl TextInput {
    pub fn new(label: &str) -> Self {
        TextInput {
            label: label.to_string(),
            buffer: String::new(),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => {
                self.buffer.push(c);
                true
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let cursor = if focused { "_" } else { "" };
        let line = Line::from(vec![
            Span::styled(format!("{}: ", self.label), focus_style(focused)),
            Span::styled(
                format!("[{}{}]", self.buffer, cursor),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Bounded numeric value stepped with + and -.
pub struct NumberInput {
    pub label: String,
    pub value: i64,
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

impl NumberInput {
    pub fn new(label: &str, value: i64, min: i64, max: i64, step: i64) -> Self {
        NumberInput {
            label: label.to_string(),
            value,
            min,
            max,
            step,
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('+') => {
                self.value = (self.value + self.step).min(self.max);
                true
            }
            KeyCode::Char('-') => {
                self.value = (self.value - self.step).max(self.min);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let line = Line::from(vec![
            Span::styled(format!("{}: ", self.label), focus_style(focused)),
            Span::styled(self.value.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw("  (+/- adjusts)"),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Multi-select list with a cursor; Space toggles the entry under the
/// cursor.
pub struct MultiSelect {
    pub label: String,
    pub options: Vec<String>,
    pub cursor: usize,
    pub selected: HashSet<usize>,
}

impl MultiSelect {
    pub fn new(label: &str, options: Vec<String>) -> Self {
        MultiSelect {
            label: label.to_string(),
            options,
            cursor: 0,
            selected: HashSet::new(),
        }
    }

    pub fn with_all_selected(label: &str, options: Vec<String>) -> Self {
        let selected = (0..options.len()).collect();
        MultiSelect {
            label: label.to_string(),
            options,
            cursor: 0,
            selected,
        }
    }

    pub fn selected_values(&self) -> Vec<&str> {
        self.options
            .iter()
            .enumerate()
            .filter(|(i, _)| self.selected.contains(i))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Up => {
                self.cursor = if self.cursor == 0 {
                    self.options.len() - 1
                } else {
                    self.cursor - 1
                };
                true
            }
            KeyCode::Down => {
                self.cursor = if self.cursor + 1 >= self.options.len() {
                    0
                } else {
                    self.cursor + 1
                };
                true
            }
            KeyCode::Char(' ') => {
                if !self.selected.insert(self.cursor) {
                    self.selected.remove(&self.cursor);
                }
                true
            }
            _ => false,
        }
    }

    pub fn height(&self) -> u16 {
        self.options.len() as u16 + 1
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let mut lines: Vec<ListItem> = vec![ListItem::new(Line::from(Span::styled(
            format!("{}:", self.label),
            focus_style(focused),
        )))];
        for (i, option) in self.options.iter().enumerate() {
            let checkbox = if self.selected.contains(&i) { "[x]" } else { "[ ]" };
            let marker = if focused && i == self.cursor { ">" } else { " " };
            let style = if focused && i == self.cursor {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            lines.push(ListItem::new(Line::from(Span::styled(
                format!("{} {} {}", marker, checkbox, option),
                style,
            ))));
        }
        frame.render_widget(List::new(lines), area);
    }
}

/// A press-to-act control.
pub struct Button {
    pub label: String,
}

impl Button {
    pub fn new(label: &str) -> Self {
        Button {
            label: label.to_string(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let line = Line::from(vec![
            Span::styled(format!("[ {} ]", self.label), style),
            Span::raw("  (enter presses)"),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_cycles_with_space() {
        let mut s = SelectInput::new("col", vec!["a".into(), "b".into()]);
        assert_eq!(s.value(), "a");
        s.handle_key(KeyCode::Char(' '));
        assert_eq!(s.value(), "b");
        s.handle_key(KeyCode::Char(' '));
        assert_eq!(s.value(), "a");
    }

    #[test]
    fn text_edits_and_backspaces() {
        let mut t = TextInput::new("name");
        for c in "Eva".chars() {
            t.handle_key(KeyCode::Char(c));
        }
        t.handle_key(KeyCode::Backspace);
        assert_eq!(t.buffer, "Ev");
    }

    #[test]
    fn number_respects_bounds() {
        let mut n = NumberInput::new("rows", 5, 1, 5, 1);
        n.handle_key(KeyCode::Char('+'));
        assert_eq!(n.value, 5);
        for _ in 0..10 {
            n.handle_key(KeyCode::Char('-'));
        }
        assert_eq!(n.value, 1);
    }

    #[test]
    fn multiselect_toggles_under_cursor() {
        let mut m = MultiSelect::new("cols", vec!["a".into(), "b".into()]);
        m.handle_key(KeyCode::Down);
        m.handle_key(KeyCode::Char(' '));
        assert_eq!(m.selected_values(), vec!["b"]);
        m.handle_key(KeyCode::Char(' '));
        assert!(m.selected_values().is_empty());
    }
}
