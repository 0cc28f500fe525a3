//! Spanmark CLI - terminal-based span annotation tool

mod app;
mod editor;
mod io;
mod ui;

use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use spanmark_core::HttpAnnotationService;

use app::{App, Focus, Mode};

fn main() -> Result<()> {
    io::init_logging()?;

    // Load the project: JSON project file, plain text file, or the
    // built-in sample
    let args: Vec<String> = std::env::args().collect();
    let project = match args.get(1) {
        Some(path) if path.ends_with(".json") => io::load_project(path)?,
        Some(path) => io::load_text(path)?,
        None => io::sample_project(),
    };

    tracing::info!(
        "loaded project {} with {} documents",
        project.id,
        project.documents.len()
    );

    let service = HttpAnnotationService::from_env()
        .map_err(|e| anyhow::anyhow!("service setup failed: {}", e))?;

    let mut app = App::new(
        project.id,
        project.schema,
        project.documents,
        Box::new(service),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Clear transient messages on any key
            app.clear_status();

            match app.mode {
                Mode::Normal => handle_normal_mode(app, key.code),
                Mode::Visual => handle_visual_mode(app, key.code),
                Mode::Help => {
                    app.mode = Mode::Normal;
                }
            }
        }
    }
    Ok(())
}

fn handle_normal_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('?') => app.mode = Mode::Help,
        KeyCode::Tab => app.toggle_focus(),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            if app.focus == Focus::Editor {
                app.editor.move_down();
            } else {
                app.sidebar_down();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.focus == Focus::Editor {
                app.editor.move_up();
            } else {
                app.sidebar_up();
            }
        }
        KeyCode::Char('h') | KeyCode::Left => app.editor.move_left(),
        KeyCode::Char('l') | KeyCode::Right => app.editor.move_right(),
        KeyCode::Char('w') => app.editor.move_word_forward(),
        KeyCode::Char('b') => app.editor.move_word_back(),
        KeyCode::Char('g') => app.editor.move_to_top(),
        KeyCode::Char('G') => app.editor.move_to_bottom(),

        // Annotation navigation
        KeyCode::Char(']') => app.next_annotation(),
        KeyCode::Char('[') => app.prev_annotation(),

        // Selecting and labeling
        KeyCode::Char('v') => app.enter_visual_mode(),
        KeyCode::Char(c @ '1'..='9') => app.assign_digit(c),
        KeyCode::Esc => {
            app.session.clear_selection();
        }

        // Documents and batch
        KeyCode::Enter => {
            if app.focus == Focus::Sidebar {
                app.open_document(app.sidebar_selected);
            }
        }
        KeyCode::Char(' ') => {
            if app.focus == Focus::Sidebar {
                app.toggle_batch_mark();
            }
        }
        KeyCode::Char('m') => app.toggle_model(),
        KeyCode::Char('S') => app.submit_batch(),

        // Persistence
        KeyCode::Char('s') => app.save(),
        KeyCode::Char('e') => {
            match io::export_document(&app.session.document) {
                Ok(path) => app.set_status(&format!("Exported to {}", path.display())),
                Err(e) => app.set_status(&format!("Export failed: {}", e)),
            }
        }

        _ => {}
    }
}

fn handle_visual_mode(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_visual_mode(),
        KeyCode::Enter => app.commit_selection(),
        KeyCode::Char('j') | KeyCode::Down => app.editor.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.editor.move_up(),
        KeyCode::Char('h') | KeyCode::Left => app.editor.move_left(),
        KeyCode::Char('l') | KeyCode::Right => app.editor.move_right(),
        KeyCode::Char('w') => app.editor.move_word_forward(),
        KeyCode::Char('b') => app.editor.move_word_back(),
        KeyCode::Char('g') => app.editor.move_to_top(),
        KeyCode::Char('G') => app.editor.move_to_bottom(),
        // Labeling straight out of visual mode commits the selection first
        KeyCode::Char(c @ '1'..='9') => app.assign_digit(c),
        _ => {}
    }
}
