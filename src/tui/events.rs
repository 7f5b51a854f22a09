use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::app::App;
use super::models::{ExitIntent, WizardStep};
use super::rendering::ui;

pub async fn run_tui(directory: Option<String>) -> Result<ExitIntent, Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = match directory {
        Some(dir) => App::with_directory(dir),
        None => App::new(),
    };

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(res?)
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<ExitIntent> {
    loop {
        app.clear_status_message_if_expired();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Esc => {
                        if app.show_help {
                            app.toggle_help();
                        } else {
                            return Ok(ExitIntent::Quit);
                        }
                    }
                    KeyCode::Char('q') if !app.in_text_input() => {
                        if app.show_help {
                            app.toggle_help();
                        } else {
                            return Ok(ExitIntent::Quit);
                        }
                    }
                    KeyCode::Char('h') if !app.in_text_input() => app.toggle_help(),
                    KeyCode::Down => {
                        if !app.show_config {
                            app.next();
                        }
                    }
                    KeyCode::Up => {
                        if !app.show_config {
                            app.previous();
                        }
                    }
                    KeyCode::Char('j') if !app.show_config => app.next(),
                    KeyCode::Char('k') if !app.show_config => app.previous(),
                    KeyCode::Char(' ') if !app.show_config && !app.finished => {
                        app.toggle_selected();
                    }
                    KeyCode::Char('a') if !app.show_config && !app.finished => {
                        app.select_all();
                    }
                    KeyCode::Char('c') if !app.show_config && !app.finished => {
                        app.clear_selection();
                    }
                    KeyCode::Enter => {
                        if app.show_config {
                            match app.wizard_step {
                                WizardStep::Directory => {
                                    if app.directory_input.trim().is_empty() {
                                        app.set_status_message(
                                            "Directory must not be empty".to_string(),
                                        );
                                    } else {
                                        app.advance_step();
                                    }
                                }
                                // Single-key steps advance on their own key
                                WizardStep::ItemKind | WizardStep::Pattern => {}
                                WizardStep::SortChoice => {
                                    // Enter keeps the listing order
                                    app.sort_key = None;
                                    if let Some(intent) = app.load_entries() {
                                        return Ok(intent);
                                    }
                                }
                                WizardStep::Term => app.advance_step(),
                                WizardStep::Confirm => {
                                    app.show_config = false;
                                    app.process_selection().await;
                                }
                            }
                        } else if !app.finished {
                            app.begin_pattern_config();
                        }
                    }
                    KeyCode::Left => {
                        if app.show_config {
                            app.go_back_step();
                        }
                    }
                    KeyCode::Backspace => {
                        if app.show_config {
                            app.handle_backspace();
                        }
                    }
                    KeyCode::Char(c) => {
                        if app.show_config && app.handle_config_input(c) {
                            if let Some(intent) = app.load_entries() {
                                return Ok(intent);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
