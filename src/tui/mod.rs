// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::controller::TaskController;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration, time::Instant};

const WELCOME: &str = "Hello! Type a command below, or Esc to leave.";

pub fn run(config: &Config, controller: TaskController) -> Result<()> {
    // --- 1. STATE INIT ---
    let mut app_state = AppState::new(controller, Duration::from_millis(config.exit_delay_ms));
    if config.show_welcome {
        app_state.message = WELCOME.to_string();
    }

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // --- 3. UI LOOP ---
    let result = event_loop(&mut terminal, &mut app_state);

    // --- 4. CLEANUP ---
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    log::info!("TUI closed");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app_state))?;

        if app_state.should_exit(Instant::now()) {
            return Ok(());
        }

        if crossterm::event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            // Filter out KeyRelease events to prevent double input on Windows
            if key.kind == event::KeyEventKind::Release {
                continue;
            }
            if let Some(Action::Quit) = handlers::handle_key_event(key, app_state) {
                return Ok(());
            }
        }
    }
}
