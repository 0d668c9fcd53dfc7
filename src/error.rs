// Error taxonomy for command parsing and task list operations.
use thiserror::Error;

/// A date/time literal that matched none of the accepted shapes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct DateFormatError(pub String);

/// Every failure the command core can produce.
///
/// None of these is fatal: the controller turns each one into a single
/// response line and leaves the task list untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Undefined command")]
    UndefinedCommand,

    #[error("Bad task: {0}")]
    BadTask(String),

    #[error("{0}")]
    Marking(String),

    #[error("Task number {index} out of range (1..={len})")]
    Range { index: i64, len: usize },

    #[error("Not a task number: '{0}'")]
    NumberFormat(String),
}

impl From<DateFormatError> for TaskError {
    // Date problems always reach callers as a malformed task.
    fn from(err: DateFormatError) -> Self {
        TaskError::BadTask(err.0)
    }
}

impl TaskError {
    /// The single line shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            TaskError::UndefinedCommand => "I don't understand that command. Please try again.",
            TaskError::BadTask(_) => "Invalid task format. Please check your input.",
            TaskError::Marking(_) => "Unable to change task status. Please check the task number.",
            TaskError::Range { .. } | TaskError::NumberFormat(_) => "No such task",
        }
    }
}

pub type TaskResult<T> = std::result::Result<T, TaskError>;
