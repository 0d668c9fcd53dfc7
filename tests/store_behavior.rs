// File: tests/store_behavior.rs
use chrono::NaiveDate;
use taskline::error::TaskError;
use taskline::model::{EditRequest, Task, TaskKind};
use taskline::store::TaskList;

fn make_list() -> TaskList {
    let due = NaiveDate::from_ymd_opt(2023, 12, 25)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap();
    let mut list = TaskList::new();
    list.add(Task::todo("buy milk"));
    list.add(Task::deadline("submit report", due));
    list.add(Task::todo("buy milk"));
    list
}

#[test]
fn test_duplicates_are_kept() {
    let list = make_list();
    assert_eq!(list.len(), 3);
    assert_eq!(list.find("milk").len(), 2);
}

#[test]
fn test_mark_twice_is_a_marking_error() {
    let mut list = make_list();
    list.mark(2).unwrap();
    assert!(matches!(list.mark(2), Err(TaskError::Marking(_))));
    list.unmark(2).unwrap();
    assert!(matches!(list.unmark(2), Err(TaskError::Marking(_))));
    assert!(!list.get(2).unwrap().done);
}

#[test]
fn test_find_result_is_independent() {
    let list = make_list();
    let mut found = list.find("MILK");
    found.mark(1).unwrap();
    assert!(!list.get(1).unwrap().done);
}

#[test]
fn test_edit_through_list() {
    let mut list = make_list();
    let edit = EditRequest::from_fields("submit final report", "2023-12-31 2359", "_");
    let task = list.edit(2, &edit).unwrap();
    assert_eq!(task.name, "submit final report");
    let TaskKind::Deadline { due } = task.kind else {
        panic!("kind changed");
    };
    assert_eq!(
        due,
        NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap()
    );

    assert!(matches!(
        list.edit(9, &edit),
        Err(TaskError::Range { index: 9, len: 3 })
    ));
}
