//! Topic pages. Each submodule assembles one page: sample data, panels
//! and the closing quiz, in the order the tutorial presents them.

mod advanced;
mod aggregates;
mod basics;
mod constraints;
mod indexes;
mod joins;
mod modify;
mod normalization;
mod procedures;
mod setops;
mod subqueries;
mod transactions;
mod triggers;
mod views;

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::error::Result;
use crate::panels::Panel;

/// One topic: a titled row of panel tabs.
pub struct Page {
    title: String,
    panels: Vec<Box<dyn Panel>>,
    active: usize,
}

impl Page {
    pub fn new(title: &str, panels: Vec<Box<dyn Panel>>) -> Self {
        Page {
            title: title.to_string(),
            panels,
            active: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn next_panel(&mut self) {
        if !self.panels.is_empty() {
            self.active = (self.active + 1) % self.panels.len();
        }
    }

    pub fn prev_panel(&mut self) {
        if !self.panels.is_empty() {
            self.active = (self.active + self.panels.len() - 1) % self.panels.len();
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        if let Some(panel) = self.panels.get_mut(self.active) {
            panel.handle_key(key);
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let titles: Vec<String> = self.panels.iter().map(|p| p.title().to_string()).collect();
        let tabs = Tabs::new(titles)
            .select(self.active)
            .block(Block::default().borders(Borders::BOTTOM))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        if let Some(panel) = self.panels.get_mut(self.active) {
            panel.render(frame, chunks[1]);
        }
    }
}

/// All fourteen topics, in course order.
pub fn pages() -> Result<Vec<Page>> {
    Ok(vec![
        basics::page()?,
        joins::page()?,
        aggregates::page()?,
        subqueries::page()?,
        setops::page()?,
        modify::page()?,
        constraints::page()?,
        indexes::page()?,
        normalization::page()?,
        views::page()?,
        transactions::page()?,
        procedures::page()?,
        triggers::page()?,
        advanced::page()?,
    ])
}
