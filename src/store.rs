// File: src/store.rs
//! The ordered, in-memory task list.
//!
//! Callers address tasks by their 1-based position as shown to the user; the
//! bounds check lives in one place (`position`) and every accessor goes
//! through it.
use crate::error::{TaskError, TaskResult};
use crate::model::{EditRequest, Task};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Appends a task. Duplicates are fine.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Maps a 1-based task number onto a vector index.
    fn position(&self, number: i64) -> TaskResult<usize> {
        let len = self.tasks.len();
        if number < 1 || number as u64 > len as u64 {
            return Err(TaskError::Range { index: number, len });
        }
        Ok((number - 1) as usize)
    }

    pub fn get(&self, number: i64) -> TaskResult<&Task> {
        let idx = self.position(number)?;
        Ok(&self.tasks[idx])
    }

    /// Removes and returns the task; later tasks move up by one.
    pub fn delete(&mut self, number: i64) -> TaskResult<Task> {
        let idx = self.position(number)?;
        Ok(self.tasks.remove(idx))
    }

    pub fn mark(&mut self, number: i64) -> TaskResult<&Task> {
        let idx = self.position(number)?;
        let task = &mut self.tasks[idx];
        if task.done {
            return Err(TaskError::Marking("Task already done".to_string()));
        }
        task.mark_done();
        Ok(&self.tasks[idx])
    }

    pub fn unmark(&mut self, number: i64) -> TaskResult<&Task> {
        let idx = self.position(number)?;
        let task = &mut self.tasks[idx];
        if !task.done {
            return Err(TaskError::Marking("Task already not done".to_string()));
        }
        task.mark_not_done();
        Ok(&self.tasks[idx])
    }

    /// Case-insensitive name search. The result is a fresh list in the
    /// original relative order.
    pub fn find(&self, keyword: &str) -> TaskList {
        let matches = self
            .tasks
            .iter()
            .filter(|t| t.name_contains(keyword))
            .cloned()
            .collect();
        TaskList::from_tasks(matches)
    }

    pub fn edit(&mut self, number: i64, edit: &EditRequest) -> TaskResult<&Task> {
        let idx = self.position(number)?;
        self.tasks[idx].apply_edit(edit)?;
        Ok(&self.tasks[idx])
    }

    /// Numbered, one task per line. Used for `List` and `find` output.
    pub fn numbered_lines(&self) -> Vec<String> {
        use crate::model::TaskDisplay;
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {}", i + 1, t.render()))
            .collect()
    }
}
