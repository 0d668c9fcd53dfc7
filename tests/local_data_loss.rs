// Tests ensuring hand-edited or damaged task files lose as little as possible.
use taskline::context::{AppContext, TestContext};
use taskline::controller::TaskController;
use taskline::storage::LocalStorage;

#[test]
fn test_damaged_lines_are_dropped_on_next_save() {
    let ctx = TestContext::new();
    let path = ctx.get_task_file_path();
    ctx.get_data_dir().unwrap();

    std::fs::write(
        &path,
        "1. [T][ ] read book\n\
         2. [D][ ] broken (by: someday)\n\
         \n\
         3. [D][X] return book (by: Jan 05 2024 18:00)\n",
    )
    .unwrap();

    let mut c = TaskController::load(path.clone());
    assert_eq!(c.tasks().len(), 2);
    assert_eq!(
        c.process("List").text,
        "1. [T][ ] read book\n2. [D][X] return book (by: Jan 05 2024 18:00)"
    );

    // The next write renumbers and omits the bad line
    c.process("todo write review");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "1. [T][ ] read book\n\
         2. [D][X] return book (by: Jan 05 2024 18:00)\n\
         3. [T][ ] write review\n"
    );
}

#[test]
fn test_numbers_in_file_are_ignored() {
    let ctx = TestContext::new();
    let path = ctx.get_task_file_path();
    ctx.get_data_dir().unwrap();
    std::fs::write(&path, "7. [T][ ] first\n3. [T][X] second\n").unwrap();

    let list = LocalStorage::load(&path).unwrap();
    let names: Vec<&str> = list.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn test_unreadable_file_starts_empty() {
    let ctx = TestContext::new();
    // A directory cannot be read as a file
    let path = ctx.root().join("is_a_dir");
    std::fs::create_dir_all(&path).unwrap();

    assert!(LocalStorage::load(&path).is_err());
    let c = TaskController::load(path);
    assert!(c.tasks().is_empty());
}

#[test]
fn test_crlf_line_endings() {
    let ctx = TestContext::new();
    let path = ctx.get_task_file_path();
    ctx.get_data_dir().unwrap();
    std::fs::write(&path, "1. [T][ ] windows\r\n2. [T][X] file\r\n").unwrap();

    let list = LocalStorage::load(&path).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.get(1).unwrap().name, "windows");
    assert!(list.get(2).unwrap().done);
}

#[test]
fn test_invalid_utf8_byte_does_not_wipe_the_file() {
    let ctx = TestContext::new();
    let path = ctx.get_task_file_path();
    ctx.get_data_dir().unwrap();
    std::fs::write(
        &path,
        b"1. [T][ ] keep me\n2. [T][ ] caf\xE9\n3. [T][X] keep me too\n",
    )
    .unwrap();

    let mut c = TaskController::load(path.clone());
    let names: Vec<&str> = c.tasks().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["keep me", "caf\u{FFFD}", "keep me too"]);

    c.process("todo new");
    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("1. [T][ ] keep me\n"));
    assert!(saved.contains("3. [T][X] keep me too\n"));
    assert!(saved.ends_with("4. [T][ ] new\n"));
}
