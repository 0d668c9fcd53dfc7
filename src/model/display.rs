// File: ./src/model/display.rs
use crate::model::datetime;
use crate::model::item::{Task, TaskKind};
use std::fmt;

pub trait TaskDisplay {
    fn render(&self) -> String;
    fn checkbox_symbol(&self) -> &'static str;
    fn kind_symbol(&self) -> String;
}

impl TaskDisplay for Task {
    fn checkbox_symbol(&self) -> &'static str {
        if self.done { "[X]" } else { "[ ]" }
    }

    fn kind_symbol(&self) -> String {
        format!("[{}]", self.tag().symbol())
    }

    /// Canonical one-line form, shared by responses and the storage file.
    fn render(&self) -> String {
        let head = format!(
            "{}{} {}",
            self.kind_symbol(),
            self.checkbox_symbol(),
            self.name
        );
        match &self.kind {
            TaskKind::Todo => head,
            TaskKind::Deadline { due } => {
                format!("{} (by: {})", head, datetime::format(due))
            }
            TaskKind::Event { start, end } => format!(
                "{} (from: {} to: {})",
                head,
                datetime::format(start),
                datetime::format(end)
            ),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
