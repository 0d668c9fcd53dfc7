// File: src/controller.rs
//! Central logic controller for task operations.
//! Both front ends (line console and TUI) hand raw input to this controller and
//! show whatever text comes back, so wording and persistence rules live here
//! and nowhere else.
use crate::error::TaskError;
use crate::model::{Command, EditRequest, TaskDisplay, parse_command};
use crate::storage::LocalStorage;
use crate::store::TaskList;
use std::path::PathBuf;

pub const FAREWELL: &str = "Bye.";
pub const EMPTY_LIST: &str = "No tasks in your list.";
const LAZY_DELETE_SUFFIX: &str = "Guess ur not locked-in enough for this";

/// What a front end should do after one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    /// Set only by `bye`.
    pub exit: bool,
}

impl Response {
    fn reply(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit: false,
        }
    }
}

#[derive(Debug)]
pub struct TaskController {
    tasks: TaskList,
    storage_path: PathBuf,
}

impl TaskController {
    pub fn new(tasks: TaskList, storage_path: PathBuf) -> Self {
        Self {
            tasks,
            storage_path,
        }
    }

    /// Loads the task file. A file that cannot be read is logged and the
    /// session starts empty.
    pub fn load(storage_path: PathBuf) -> Self {
        let tasks = match LocalStorage::load(&storage_path) {
            Ok(tasks) => {
                log::info!("Loaded {} tasks from {:?}", tasks.len(), storage_path);
                tasks
            }
            Err(e) => {
                log::error!("Could not load tasks, starting empty: {:#}", e);
                TaskList::new()
            }
        };
        Self::new(tasks, storage_path)
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Runs one line of user input and produces the reply.
    pub fn process(&mut self, input: &str) -> Response {
        log::debug!("Input: {:?}", input);
        let command = match parse_command(input) {
            Ok(c) => c,
            Err(e) => return Self::failure(&e),
        };
        let mutating = command.is_mutating();

        let mut response = match self.execute(command) {
            Ok(r) => r,
            Err(e) => return Self::failure(&e),
        };
        if mutating {
            self.persist(&mut response.text);
        }
        response
    }

    /// Replaces fields of an existing task and saves.
    pub fn edit(&mut self, number: i64, edit: &EditRequest) -> Response {
        if edit.is_noop() {
            return Response::reply("Nothing to change.");
        }
        let mut text = match self.tasks.edit(number, edit) {
            Ok(task) => format!("Updated:\n  {}", task.render()),
            Err(e) => return Self::failure(&e),
        };
        self.persist(&mut text);
        Response::reply(text)
    }

    fn execute(&mut self, command: Command) -> Result<Response, TaskError> {
        let text = match command {
            Command::Bye => {
                return Ok(Response {
                    text: FAREWELL.to_string(),
                    exit: true,
                });
            }
            Command::List => {
                if self.tasks.is_empty() {
                    EMPTY_LIST.to_string()
                } else {
                    self.tasks.numbered_lines().join("\n")
                }
            }
            Command::Mark(n) => format!("done:\n  {}", self.tasks.mark(n)?.render()),
            Command::Unmark(n) => format!("not done:\n  {}", self.tasks.unmark(n)?.render()),
            Command::Delete(n) => {
                let removed = self.tasks.delete(n)?;
                let mut text = format!("Deleted task {}", removed.render());
                if !removed.done {
                    text.push('\n');
                    text.push_str(LAZY_DELETE_SUFFIX);
                }
                text
            }
            Command::Find(keyword) => {
                let found = self.tasks.find(&keyword);
                if found.is_empty() {
                    format!("No tasks found containing: {}", keyword)
                } else {
                    format!("Found:\n{}", found.numbered_lines().join("\n"))
                }
            }
            Command::Add(task) => {
                let rendered = task.render();
                self.tasks.add(task);
                format!(
                    "Got it. I've added this task:\n  {}\nNow you have {} tasks in the list.",
                    rendered,
                    self.tasks.len()
                )
            }
        };
        Ok(Response::reply(text))
    }

    /// Saves after a change. A failed save keeps the in-memory change and
    /// tells the user.
    fn persist(&self, text: &mut String) {
        if let Err(e) = LocalStorage::save(&self.storage_path, &self.tasks) {
            log::error!("Save failed: {:#}", e);
            text.push_str(&format!("\nWarning: change not persisted: {}", e));
        }
    }

    fn failure(err: &TaskError) -> Response {
        log::debug!("Command failed: {:?}", err);
        Response::reply(err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AppContext, TestContext};

    #[test]
    fn test_first_add_and_list() {
        let ctx = TestContext::new();
        let mut c = TaskController::load(ctx.get_task_file_path());
        assert_eq!(c.process("List").text, EMPTY_LIST);

        let r = c.process("todo buy milk");
        assert_eq!(
            r.text,
            "Got it. I've added this task:\n  [T][ ] buy milk\nNow you have 1 tasks in the list."
        );
        assert!(!r.exit);
        assert_eq!(c.process("List").text, "1. [T][ ] buy milk");
    }

    #[test]
    fn test_errors_map_to_user_messages() {
        let ctx = TestContext::new();
        let mut c = TaskController::load(ctx.get_task_file_path());
        assert_eq!(
            c.process("hello").text,
            "I don't understand that command. Please try again."
        );
        assert_eq!(
            c.process("todo").text,
            "Invalid task format. Please check your input."
        );
        assert_eq!(c.process("mark 1").text, "No such task");
        assert_eq!(c.process("mark x").text, "No such task");
        c.process("todo a");
        assert_eq!(
            c.process("unmark 1").text,
            "Unable to change task status. Please check the task number."
        );
    }

    #[test]
    fn test_delete_suffix_depends_on_done() {
        let ctx = TestContext::new();
        let mut c = TaskController::load(ctx.get_task_file_path());
        c.process("todo a");
        c.process("todo b");
        c.process("mark 2");
        assert_eq!(
            c.process("delete 2").text,
            "Deleted task [T][X] b"
        );
        assert_eq!(
            c.process("delete 1").text,
            "Deleted task [T][ ] a\nGuess ur not locked-in enough for this"
        );
    }

    #[test]
    fn test_bye_sets_exit() {
        let ctx = TestContext::new();
        let mut c = TaskController::load(ctx.get_task_file_path());
        let r = c.process("bye");
        assert_eq!(r.text, FAREWELL);
        assert!(r.exit);
    }

    #[test]
    fn test_edit_is_saved() {
        let ctx = TestContext::new();
        let path = ctx.get_task_file_path();
        let mut c = TaskController::load(path.clone());
        c.process("deadline submit | 2023-12-25 1400");
        let r = c.edit(1, &EditRequest::from_fields("hand in", "_", "_"));
        assert_eq!(r.text, "Updated:\n  [D][ ] hand in (by: Dec 25 2023 14:00)");

        let reloaded = TaskController::load(path);
        assert_eq!(reloaded.tasks().get(1).unwrap().name, "hand in");
        assert_eq!(c.edit(1, &EditRequest::default()).text, "Nothing to change.");
    }

    #[test]
    fn test_save_failure_keeps_change_and_warns() {
        let ctx = TestContext::new();
        // A directory where the file should be makes the rename fail
        let path = ctx.root().join("blocked");
        std::fs::create_dir_all(&path).unwrap();
        let mut c = TaskController::new(TaskList::new(), path);
        let r = c.process("todo a");
        assert!(r.text.contains("Warning: change not persisted"));
        assert_eq!(c.tasks().len(), 1);
    }
}
