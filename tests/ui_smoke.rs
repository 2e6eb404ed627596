//! Renders every page and panel into a test backend and drives a few
//! interactions, checking nothing panics and the screens hold content.

use crossterm::event::KeyCode;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use sqltutor::app::App;
use sqltutor::pages::pages;

#[test]
fn every_panel_renders() {
    let mut terminal = Terminal::new(TestBackend::new(100, 45)).unwrap();
    for mut page in pages().unwrap() {
        // walk well past the number of panels so each tab renders at least once
        for _ in 0..16 {
            terminal
                .draw(|f| {
                    let area = f.area();
                    page.render(f, area);
                })
                .unwrap();
            page.next_panel();
        }
    }
}

#[test]
fn panels_survive_arbitrary_interaction() {
    let keys = [
        KeyCode::Tab,
        KeyCode::Char(' '),
        KeyCode::Down,
        KeyCode::Char(' '),
        KeyCode::Char('4'),
        KeyCode::Char('x'),
        KeyCode::Char('+'),
        KeyCode::Enter,
        KeyCode::Backspace,
        KeyCode::BackTab,
        KeyCode::Enter,
    ];
    let mut terminal = Terminal::new(TestBackend::new(100, 45)).unwrap();
    for mut page in pages().unwrap() {
        for _ in 0..16 {
            for key in keys {
                page.handle_key(key);
            }
            terminal
                .draw(|f| {
                    let area = f.area();
                    page.render(f, area);
                })
                .unwrap();
            page.next_panel();
        }
    }
}

#[test]
fn app_draws_the_topic_bar_and_help_line() {
    let pages = pages().unwrap();
    assert_eq!(pages.len(), 14);
    let mut app = App::new(pages, 0);
    let mut terminal = Terminal::new(TestBackend::new(100, 45)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let screen: String = buffer.content.iter().map(|c| c.symbol()).collect();
    assert!(screen.contains("sqltutor"));
    assert!(screen.contains("Basics"));
    assert!(screen.contains("Esc quit"));
}

