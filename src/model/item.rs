// File: ./src/model/item.rs
use crate::error::{TaskError, TaskResult};
use crate::model::datetime;
use chrono::NaiveDateTime;
use strum::{Display, EnumIter};

/// Variant-specific payload of a task.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TaskKind {
    Todo,
    Deadline {
        due: NaiveDateTime,
    },
    // start <= end is not enforced
    Event {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Field-less mirror of [`TaskKind`], mostly for the single-letter tag used
/// in rendered lines.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, EnumIter)]
pub enum TaskKindTag {
    Todo,
    Deadline,
    Event,
}

impl TaskKindTag {
    pub fn symbol(&self) -> char {
        match self {
            TaskKindTag::Todo => 'T',
            TaskKindTag::Deadline => 'D',
            TaskKindTag::Event => 'E',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'T' => Some(TaskKindTag::Todo),
            'D' => Some(TaskKindTag::Deadline),
            'E' => Some(TaskKindTag::Event),
            _ => None,
        }
    }
}

impl TaskKind {
    pub fn tag(&self) -> TaskKindTag {
        match self {
            TaskKind::Todo => TaskKindTag::Todo,
            TaskKind::Deadline { .. } => TaskKindTag::Deadline,
            TaskKind::Event { .. } => TaskKindTag::Event,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Task {
    pub name: String,
    pub done: bool,
    pub kind: TaskKind,
}

impl Task {
    pub fn new(name: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            name: name.into(),
            done: false,
            kind,
        }
    }

    pub fn todo(name: impl Into<String>) -> Self {
        Self::new(name, TaskKind::Todo)
    }

    pub fn deadline(name: impl Into<String>, due: NaiveDateTime) -> Self {
        Self::new(name, TaskKind::Deadline { due })
    }

    pub fn event(name: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(name, TaskKind::Event { start, end })
    }

    pub fn tag(&self) -> TaskKindTag {
        self.kind.tag()
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_not_done(&mut self) {
        self.done = false;
    }

    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(&keyword.to_lowercase())
    }

    /// Applies an [`EditRequest`]. Everything is validated before the task is
    /// touched, so a failed edit leaves it as it was.
    pub fn apply_edit(&mut self, edit: &EditRequest) -> TaskResult<()> {
        let name = match &edit.name {
            Some(n) if n.trim().is_empty() => {
                return Err(TaskError::BadTask("Empty task name".to_string()));
            }
            Some(n) => Some(n.trim().to_string()),
            None => None,
        };
        let first = edit.first.as_deref().map(datetime::parse).transpose()?;
        let second = edit.second.as_deref().map(datetime::parse).transpose()?;

        let kind = match (&self.kind, first, second) {
            (TaskKind::Todo, None, None) => TaskKind::Todo,
            (TaskKind::Todo, _, _) => {
                return Err(TaskError::BadTask("A todo has no dates to edit".to_string()));
            }
            (TaskKind::Deadline { .. }, _, Some(_)) => {
                return Err(TaskError::BadTask("A deadline has a single date".to_string()));
            }
            (TaskKind::Deadline { due }, first, None) => TaskKind::Deadline {
                due: first.unwrap_or(*due),
            },
            (TaskKind::Event { start, end }, first, second) => TaskKind::Event {
                start: first.unwrap_or(*start),
                end: second.unwrap_or(*end),
            },
        };

        if let Some(n) = name {
            self.name = n;
        }
        self.kind = kind;
        Ok(())
    }
}

/// Text used in edit fields to mean "leave this one alone".
pub const KEEP_FIELD: &str = "_";

/// Field-level replacement for an existing task. `None` keeps the current
/// value. For a deadline `first` is the due date; for an event `first` and
/// `second` are start and end.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct EditRequest {
    pub name: Option<String>,
    pub first: Option<String>,
    pub second: Option<String>,
}

impl EditRequest {
    /// Builds a request from raw text fields where [`KEEP_FIELD`] (or an
    /// empty field) means unchanged.
    pub fn from_fields(name: &str, first: &str, second: &str) -> Self {
        fn keep_or(s: &str) -> Option<String> {
            let t = s.trim();
            if t.is_empty() || t == KEEP_FIELD {
                None
            } else {
                Some(t.to_string())
            }
        }
        Self {
            name: keep_or(name),
            first: keep_or(first),
            second: keep_or(second),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.name.is_none() && self.first.is_none() && self.second.is_none()
    }
}
