// File: ./src/tui/state.rs
use crate::controller::TaskController;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

pub struct AppState {
    pub controller: TaskController,
    pub list_state: ListState,
    pub input_buffer: String,
    /// Cursor position in chars, not bytes.
    pub cursor_position: usize,
    /// Last reply from the controller.
    pub message: String,
    /// Set after `bye`; the loop closes once it passes.
    pub exit_at: Option<Instant>,
    pub exit_delay: Duration,
}

impl AppState {
    pub fn new(controller: TaskController, exit_delay: Duration) -> Self {
        let mut list_state = ListState::default();
        if !controller.tasks().is_empty() {
            list_state.select(Some(0));
        }
        Self {
            controller,
            list_state,
            input_buffer: String::new(),
            cursor_position: 0,
            message: String::new(),
            exit_at: None,
            exit_delay,
        }
    }

    pub fn task_count(&self) -> usize {
        self.controller.tasks().len()
    }

    /// 1-based number of the highlighted task.
    pub fn selected_number(&self) -> Option<i64> {
        self.list_state
            .selected()
            .filter(|&i| i < self.task_count())
            .map(|i| i as i64 + 1)
    }

    /// Keeps the selection valid after the list grew or shrank.
    pub fn sync_selection(&mut self) {
        let len = self.task_count();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn should_exit(&self, now: Instant) -> bool {
        self.exit_at.is_some_and(|t| now >= t)
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }

    pub fn enter_char(&mut self, new_char: char) {
        let byte_index = self
            .input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len());

        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.input_buffer.chars().take(current_index - 1);
            let after = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }

    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Replaces the input line and puts the cursor at its end.
    pub fn set_input(&mut self, text: String) {
        self.cursor_position = text.chars().count();
        self.input_buffer = text;
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    pub fn next(&mut self) {
        let len = self.task_count();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.task_count();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }
}
