use std::env;
use std::error::Error;
use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use sqltutor::app::App;
use sqltutor::pages::pages;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    let mut topic = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-t" => {
                if i + 1 < args.len() {
                    topic = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Error: '-t' option requires a topic name");
                    return Ok(());
                }
            }
            other => {
                eprintln!("Error: unknown argument '{}'", other);
                eprintln!("Usage: sqltutor [-t topic]");
                return Ok(());
            }
        }
        i += 1;
    }

    let pages = pages()?;

    let start = match topic {
        Some(wanted) => {
            let needle = wanted.to_lowercase();
            match pages
                .iter()
                .position(|p| p.title().to_lowercase().contains(&needle))
            {
                Some(idx) => idx,
                None => {
                    eprintln!("Error: no topic matches '{}'. Topics:", wanted);
                    for page in &pages {
                        eprintln!("  {}", page.title());
                    }
                    return Ok(());
                }
            }
        }
        None => 0,
    };

    let mut app = App::new(pages, start);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.hide_cursor()?;

    let result = app.main_loop(&mut terminal);

    terminal.show_cursor()?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}
