// File: src/model/parser.rs
//! Turns one line of user input into a [`Command`].
//!
//! Keywords are case-sensitive. Index arguments are only checked for being
//! integers here; range checks belong to the task list.
use crate::error::{TaskError, TaskResult};
use crate::model::datetime;
use crate::model::item::Task;

pub const BYE_COMMAND: &str = "bye";
pub const LIST_COMMAND: &str = "List";
pub const MARK_COMMAND: &str = "mark ";
pub const UNMARK_COMMAND: &str = "unmark ";
pub const DELETE_COMMAND: &str = "delete ";
pub const FIND_COMMAND: &str = "find ";
pub const TODO_COMMAND: &str = "todo";
pub const DEADLINE_COMMAND: &str = "deadline";
pub const EVENT_COMMAND: &str = "event";

/// Separator between a task name and its dates.
pub const FIELD_SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bye,
    List,
    Mark(i64),
    Unmark(i64),
    Delete(i64),
    Find(String),
    Add(Task),
}

impl Command {
    /// Whether a successful run of this command changes the stored list.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Mark(_) | Command::Unmark(_) | Command::Delete(_) | Command::Add(_)
        )
    }
}

pub fn parse_command(input: &str) -> TaskResult<Command> {
    if input == BYE_COMMAND {
        Ok(Command::Bye)
    } else if input == LIST_COMMAND {
        Ok(Command::List)
    } else if input.starts_with(MARK_COMMAND) {
        parse_task_number(input, MARK_COMMAND.len()).map(Command::Mark)
    } else if input.starts_with(UNMARK_COMMAND) {
        parse_task_number(input, UNMARK_COMMAND.len()).map(Command::Unmark)
    } else if input.starts_with(DELETE_COMMAND) {
        parse_task_number(input, DELETE_COMMAND.len()).map(Command::Delete)
    } else if input.starts_with(FIND_COMMAND) {
        parse_find(input).map(Command::Find)
    } else if input.starts_with(TODO_COMMAND)
        || input.starts_with(DEADLINE_COMMAND)
        || input.starts_with(EVENT_COMMAND)
    {
        parse_task(input).map(Command::Add)
    } else {
        Err(TaskError::UndefinedCommand)
    }
}

/// Reads the integer following a fixed-length keyword.
pub fn parse_task_number(input: &str, keyword_len: usize) -> TaskResult<i64> {
    let raw = input.get(keyword_len..).unwrap_or("").trim();
    raw.parse::<i64>()
        .map_err(|_| TaskError::NumberFormat(raw.to_string()))
}

/// Builds a task from a `todo`, `deadline` or `event` line.
pub fn parse_task(input: &str) -> TaskResult<Task> {
    if input.starts_with(TODO_COMMAND) {
        parse_todo(input)
    } else if input.starts_with(DEADLINE_COMMAND) {
        parse_deadline(input)
    } else if input.starts_with(EVENT_COMMAND) {
        parse_event(input)
    } else {
        Err(TaskError::BadTask("Unknown task type".to_string()))
    }
}

pub fn parse_find(input: &str) -> TaskResult<String> {
    let keyword = arguments_after(input, "find")
        .ok_or_else(|| TaskError::BadTask("Invalid find format".to_string()))?;
    if keyword.is_empty() {
        return Err(TaskError::BadTask("Empty search keyword".to_string()));
    }
    Ok(keyword.to_string())
}

/// Returns the trimmed text after `keyword` when the keyword is followed by a
/// space; `None` when the separator is missing.
fn arguments_after<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let len = keyword.len();
    if input.as_bytes().get(len) != Some(&b' ') {
        return None;
    }
    input.get(len + 1..).map(str::trim)
}

fn parse_todo(input: &str) -> TaskResult<Task> {
    let name = arguments_after(input, TODO_COMMAND)
        .ok_or_else(|| TaskError::BadTask("Invalid todo format".to_string()))?;
    if name.is_empty() {
        return Err(TaskError::BadTask("Empty task name".to_string()));
    }
    Ok(Task::todo(name))
}

fn parse_deadline(input: &str) -> TaskResult<Task> {
    let invalid = || TaskError::BadTask("Invalid deadline format".to_string());
    let remaining = arguments_after(input, DEADLINE_COMMAND).ok_or_else(invalid)?;

    // Split on the last separator only
    let (name, due) = remaining.rsplit_once(FIELD_SEPARATOR).ok_or_else(invalid)?;
    let (name, due) = (name.trim(), due.trim());
    if name.is_empty() || due.is_empty() {
        return Err(TaskError::BadTask(
            "Empty task name or deadline".to_string(),
        ));
    }

    Ok(Task::deadline(name, datetime::parse(due)?))
}

fn parse_event(input: &str) -> TaskResult<Task> {
    let invalid = || TaskError::BadTask("Invalid event format".to_string());
    let remaining = arguments_after(input, EVENT_COMMAND).ok_or_else(invalid)?;

    let mut parts: Vec<&str> = remaining.split(FIELD_SEPARATOR).collect();
    // Trailing empty pieces do not count as fields
    while parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    let [name, start, end] = parts.as_slice() else {
        return Err(invalid());
    };
    let (name, start, end) = (name.trim(), start.trim(), end.trim());
    if name.is_empty() || start.is_empty() || end.is_empty() {
        return Err(TaskError::BadTask(
            "Empty task name, start date, or end date".to_string(),
        ));
    }

    Ok(Task::event(
        name,
        datetime::parse(start)?,
        datetime::parse(end)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::TaskKind;

    #[test]
    fn test_exact_keywords() {
        assert_eq!(parse_command("bye"), Ok(Command::Bye));
        assert_eq!(parse_command("List"), Ok(Command::List));
        assert_eq!(parse_command("list"), Err(TaskError::UndefinedCommand));
        assert_eq!(parse_command("bye now"), Err(TaskError::UndefinedCommand));
        assert_eq!(parse_command("BYE"), Err(TaskError::UndefinedCommand));
        assert_eq!(parse_command(""), Err(TaskError::UndefinedCommand));
    }

    #[test]
    fn test_task_numbers() {
        assert_eq!(parse_command("mark 1"), Ok(Command::Mark(1)));
        assert_eq!(parse_command("unmark  42 "), Ok(Command::Unmark(42)));
        assert_eq!(parse_command("delete 999"), Ok(Command::Delete(999)));
        // Out of range values are accepted here
        assert_eq!(parse_command("delete 0"), Ok(Command::Delete(0)));
        assert_eq!(parse_command("mark -3"), Ok(Command::Mark(-3)));
        assert!(matches!(
            parse_command("mark one"),
            Err(TaskError::NumberFormat(_))
        ));
        assert!(matches!(
            parse_command("delete "),
            Err(TaskError::NumberFormat(_))
        ));
        // "mark" without a separator is not a mark command at all
        assert_eq!(parse_command("mark"), Err(TaskError::UndefinedCommand));
    }

    #[test]
    fn test_find() {
        assert_eq!(
            parse_command("find  milk "),
            Ok(Command::Find("milk".to_string()))
        );
        assert_eq!(
            parse_command("find "),
            Err(TaskError::BadTask("Empty search keyword".to_string()))
        );
        assert_eq!(
            parse_find("findmilk"),
            Err(TaskError::BadTask("Invalid find format".to_string()))
        );
    }

    #[test]
    fn test_todo() {
        let Ok(Command::Add(task)) = parse_command("todo buy groceries") else {
            panic!("expected a todo");
        };
        assert_eq!(task.name, "buy groceries");
        assert!(!task.done);
        assert_eq!(task.kind, TaskKind::Todo);

        for bad in ["todo", "todo ", "todo    ", "todox"] {
            assert!(
                matches!(parse_command(bad), Err(TaskError::BadTask(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_deadline_splits_on_last_separator() {
        let task = parse_task("deadline a | b | 2023-12-25 1400").unwrap();
        assert_eq!(task.name, "a | b");
        assert!(matches!(task.kind, TaskKind::Deadline { .. }));

        for bad in [
            "deadline submit assignment",
            "deadline | 2023-12-25",
            "deadline submit assignment |",
            "deadline submit assignment | invalid-date",
            "deadline submit | 2023-12-25 2570",
            "deadlinesubmit | 2023-12-25",
        ] {
            assert!(
                matches!(parse_command(bad), Err(TaskError::BadTask(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_event_needs_three_fields() {
        let task = parse_task("event team meeting | 2023-12-25 1400 | 2023-12-25 1600").unwrap();
        assert_eq!(task.name, "team meeting");
        assert!(matches!(task.kind, TaskKind::Event { .. }));

        for bad in [
            "event team meeting | 2023-12-25",
            "event | 2023-12-25 1400 | 2023-12-25 1600",
            "event team meeting | | 2023-12-25 1600",
            "event team meeting | 2023-12-25 1400 |",
            "event a | 2023-12-25 | 2023-12-26 | 2023-12-27",
        ] {
            assert!(
                matches!(parse_command(bad), Err(TaskError::BadTask(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_event_end_before_start_is_allowed() {
        assert!(parse_task("event rewind | 2024-01-02 | 2024-01-01").is_ok());
    }

    #[test]
    fn test_mutating_commands() {
        assert!(Command::Delete(1).is_mutating());
        assert!(!Command::List.is_mutating());
        assert!(!Command::Find("x".into()).is_mutating());
    }
}
