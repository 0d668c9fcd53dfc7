// File: ./src/model/mod.rs
pub mod datetime;
pub mod display;
pub mod item;
pub mod parser;

pub use display::TaskDisplay;
pub use item::{EditRequest, KEEP_FIELD, Task, TaskKind, TaskKindTag};
pub use parser::{Command, parse_command};
