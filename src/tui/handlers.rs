// File: ./src/tui/handlers.rs
// Key handling for the TUI. Everything typed goes through the controller;
// only the `edit` line is interpreted here.
use crate::model::{EditRequest, KEEP_FIELD, Task, TaskKind, datetime};
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

pub const EDIT_PREFIX: &str = "edit ";

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    // Input is frozen while the farewell is on screen
    if state.exit_at.is_some() {
        return None;
    }

    match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            prefill_edit(state);
        }
        KeyCode::Enter => submit(state),
        KeyCode::Char(c) => state.enter_char(c),
        KeyCode::Backspace => state.delete_char(),
        KeyCode::Left => state.move_cursor_left(),
        KeyCode::Right => state.move_cursor_right(),
        KeyCode::Up => state.previous(),
        KeyCode::Down => state.next(),
        _ => {}
    }
    None
}

fn submit(state: &mut AppState) {
    let line = state.input_buffer.clone();
    state.reset_input();

    if line.starts_with(EDIT_PREFIX) {
        state.message = match parse_edit_line(&line) {
            Some((number, edit)) => state.controller.edit(number, &edit).text,
            None => "Usage: edit <n> <name>|<first date>|<second date>".to_string(),
        };
    } else {
        let response = state.controller.process(&line);
        state.message = response.text;
        if response.exit {
            state.exit_at = Some(Instant::now() + state.exit_delay);
        }
    }
    state.sync_selection();
}

fn prefill_edit(state: &mut AppState) {
    let Some(number) = state.selected_number() else {
        state.message = "Select a task to edit first.".to_string();
        return;
    };
    if let Ok(task) = state.controller.tasks().get(number) {
        let line = edit_line_for(number, task);
        state.set_input(line);
    }
}

/// `edit <n> <name>|<first>|<second>` with the task's current values;
/// fields a task kind does not have are `_`.
pub fn edit_line_for(number: i64, task: &Task) -> String {
    let (first, second) = match &task.kind {
        TaskKind::Todo => (KEEP_FIELD.to_string(), KEEP_FIELD.to_string()),
        TaskKind::Deadline { due } => (datetime::format_input(due), KEEP_FIELD.to_string()),
        TaskKind::Event { start, end } => {
            (datetime::format_input(start), datetime::format_input(end))
        }
    };
    format!("{}{} {}|{}|{}", EDIT_PREFIX, number, task.name, first, second)
}

/// Splits an edit line into the task number and the requested changes.
/// The two date fields are taken from the right, so a name may itself
/// contain `|` as long as both date fields are present (as in the prefill).
/// A line without any `|` only renames.
pub fn parse_edit_line(line: &str) -> Option<(i64, EditRequest)> {
    let rest = line.strip_prefix(EDIT_PREFIX)?.trim_start();
    let (number, fields) = rest.split_once(' ').unwrap_or((rest, ""));
    let number = number.parse::<i64>().ok()?;

    let mut parts: Vec<&str> = fields.rsplitn(3, '|').collect();
    parts.reverse();
    let (name, first, second) = match parts.as_slice() {
        [name, first, second] => (*name, *first, *second),
        [name, first] => (*name, *first, ""),
        [name] => (*name, "", ""),
        _ => ("", "", ""),
    };
    Some((number, EditRequest::from_fields(name, first, second)))
}
