// File: ./src/storage.rs
// Manages the plain-text task file.
//
// One task per line, written exactly as `List` shows it:
//   1. [T][ ] buy milk
//   2. [D][X] submit (by: Dec 25 2023 14:00)
//   3. [E][ ] meeting (from: Dec 25 2023 14:00 to: Dec 25 2023 16:00)
// The leading number is ignored on load; order in the file is list order.
use crate::model::{Task, TaskKindTag, datetime};
use crate::store::TaskList;
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;

const DEADLINE_MARKER: &str = " (by: ";
const EVENT_FROM_MARKER: &str = " (from: ";
const EVENT_TO_MARKER: &str = " to: ";
const NUMBER_SEPARATOR: &str = ". ";

/// Width of the `[T][X]` prefix plus the following space.
const PREFIX_LEN: usize = 7;

/// Renders every task as a numbered line, newline-terminated.
pub fn serialize(tasks: &TaskList) -> String {
    tasks
        .numbered_lines()
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}

/// Rebuilds a task list from file text. Lines that cannot be understood are
/// logged and skipped; the rest still load.
pub fn deserialize(text: &str) -> TaskList {
    let mut tasks = Vec::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(task) => tasks.push(task),
            Err(e) => log::warn!("Skipping line {} of task file: {} ({:?})", lineno + 1, e, line),
        }
    }
    TaskList::from_tasks(tasks)
}

/// Parses a single non-empty stored line.
pub fn parse_line(line: &str) -> Result<Task> {
    let (_, rest) = line
        .split_once(NUMBER_SEPARATOR)
        .ok_or_else(|| anyhow!("missing task number"))?;

    let head: Vec<char> = rest.chars().take(6).collect();
    if head.len() < 6 || head[0] != '[' || head[2] != ']' || head[3] != '[' || head[5] != ']' {
        return Err(anyhow!("malformed status prefix"));
    }
    let tag = TaskKindTag::from_symbol(head[1])
        .ok_or_else(|| anyhow!("unknown task type '{}'", head[1]))?;
    let done = head[4] == 'X';

    // The line was trimmed, so an empty todo leaves only the six prefix chars
    let body = rest
        .char_indices()
        .nth(PREFIX_LEN - 1)
        .map(|(i, _)| &rest[i..])
        .unwrap_or("")
        .trim();

    let mut task = match tag {
        TaskKindTag::Todo => Task::todo(body),
        TaskKindTag::Deadline => {
            let (name, due) = split_suffix(body, DEADLINE_MARKER)?;
            Task::deadline(name, datetime::parse_display(due)?)
        }
        TaskKindTag::Event => {
            let (name, range) = split_suffix(body, EVENT_FROM_MARKER)?;
            let (start, end) = range
                .split_once(EVENT_TO_MARKER)
                .ok_or_else(|| anyhow!("event without end date"))?;
            Task::event(
                name,
                datetime::parse_display(start)?,
                datetime::parse_display(end)?,
            )
        }
    };

    if task.name.trim().is_empty() {
        return Err(anyhow!("empty task name"));
    }
    task.done = done;
    Ok(task)
}

/// Splits `name<marker>payload)` on the last occurrence of `marker`.
fn split_suffix<'a>(body: &'a str, marker: &str) -> Result<(&'a str, &'a str)> {
    let inner = body
        .strip_suffix(')')
        .ok_or_else(|| anyhow!("missing closing parenthesis"))?;
    let idx = inner
        .rfind(marker)
        .ok_or_else(|| anyhow!("missing {:?}", marker.trim()))?;
    Ok((inner[..idx].trim(), &inner[idx + marker.len()..]))
}

pub struct LocalStorage;

impl LocalStorage {
    /// Reads the task file. A missing file is an empty list, not an error.
    /// Invalid UTF-8 is replaced per character so one damaged line cannot
    /// take the rest of the file with it.
    pub fn load(path: &Path) -> Result<TaskList> {
        if !path.exists() {
            return Ok(TaskList::new());
        }
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read task file {:?}", path))?;
        let text = String::from_utf8_lossy(&bytes);
        if let std::borrow::Cow::Owned(_) = text {
            log::warn!("Task file {:?} contains invalid UTF-8", path);
        }
        Ok(deserialize(&text))
    }

    /// Writes the whole list, creating the parent directory on demand.
    pub fn save(path: &Path, tasks: &TaskList) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        Self::atomic_write(path, serialize(tasks))
            .with_context(|| format!("Failed to write task file {:?}", path))
    }

    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AppContext, TestContext};
    use chrono::NaiveDate;
    use strum::IntoEnumIterator;

    fn sample_for(tag: TaskKindTag, name: &str) -> Task {
        let a = NaiveDate::from_ymd_opt(2023, 12, 25)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        match tag {
            TaskKindTag::Todo => Task::todo(name),
            TaskKindTag::Deadline => Task::deadline(name, a),
            TaskKindTag::Event => Task::event(name, a, b),
        }
    }

    #[test]
    fn test_every_kind_survives_the_file_format() {
        let mut list = TaskList::new();
        for tag in TaskKindTag::iter() {
            for done in [false, true] {
                let mut t = sample_for(tag, &format!("{} task", tag));
                t.done = done;
                list.add(t);
            }
        }
        assert_eq!(deserialize(&serialize(&list)), list);
    }

    #[test]
    fn test_names_containing_markers() {
        let mut list = TaskList::new();
        list.add(sample_for(TaskKindTag::Deadline, "read (by: later)"));
        list.add(sample_for(TaskKindTag::Event, "a (from: x to: y) b"));
        list.add(sample_for(TaskKindTag::Todo, "1. [T][X] nested"));
        assert_eq!(deserialize(&serialize(&list)), list);
    }

    #[test]
    fn test_serialized_layout() {
        let mut list = TaskList::new();
        list.add(Task::todo("buy milk"));
        let mut dl = sample_for(TaskKindTag::Deadline, "submit");
        dl.mark_done();
        list.add(dl);
        assert_eq!(
            serialize(&list),
            "1. [T][ ] buy milk\n2. [D][X] submit (by: Dec 25 2023 14:00)\n"
        );
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "\
1. [T][ ] keep me
garbage
2. [Q][ ] unknown type
3. [D][ ] no date
4. [D][ ] bad date (by: tomorrow)
5. [E][ ] half (from: Dec 25 2023 14:00)
6. [T][ ]

7. [E][X] party (from: Dec 25 2023 14:00 to: Dec 25 2023 16:00)
";
        let list = deserialize(text);
        let names: Vec<&str> = list.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["keep me", "party"]);
        assert!(list.get(2).unwrap().done);
    }

    #[test]
    fn test_done_flag_only_for_x() {
        assert!(parse_line("1. [T][X] a").unwrap().done);
        assert!(!parse_line("1. [T][ ] a").unwrap().done);
        assert!(!parse_line("1. [T][x] a").unwrap().done);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let ctx = TestContext::new();
        let list = LocalStorage::load(&ctx.get_task_file_path()).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_save_creates_directory_and_reloads() {
        let ctx = TestContext::new();
        let path = ctx.root().join("nested").join("dir").join("tasks.txt");
        let mut list = TaskList::new();
        list.add(Task::todo("buy milk"));
        LocalStorage::save(&path, &list).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(LocalStorage::load(&path).unwrap(), list);
    }
}
