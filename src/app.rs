//! The application shell: a topic bar over the current page, driven by a
//! draw/poll/handle loop.

use std::error::Error;

use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};

use crate::pages::Page;

const HELP: &str = "Esc quit | PgUp/PgDn topic | Left/Right panel | Tab focus | Space select | Enter act";

pub struct App {
    pages: Vec<Page>,
    active: usize,
}

impl App {
    pub fn new(pages: Vec<Page>, start: usize) -> Self {
        let active = start.min(pages.len().saturating_sub(1));
        App { pages, active }
    }

    pub fn main_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), Box<dyn Error>> {
        loop {
            self.draw_ui(terminal)?;

            if crossterm::event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Esc => return Ok(()),
                        KeyCode::PageDown => {
                            self.active = (self.active + 1) % self.pages.len();
                        }
                        KeyCode::PageUp => {
                            self.active =
                                (self.active + self.pages.len() - 1) % self.pages.len();
                        }
                        KeyCode::Right => self.pages[self.active].next_panel(),
                        KeyCode::Left => self.pages[self.active].prev_panel(),
                        other => self.pages[self.active].handle_key(other),
                    }
                }
            }
        }
    }

    fn draw_ui<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), Box<dyn Error>> {
        terminal.draw(|f| self.draw(f))?;
        Ok(())
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let titles: Vec<String> = self.pages.iter().map(|p| p.title().to_string()).collect();
        let tabs = Tabs::new(titles)
            .select(self.active)
            .block(Block::default().borders(Borders::BOTTOM).title("sqltutor"))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        self.pages[self.active].render(frame, chunks[1]);

        let help = Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
