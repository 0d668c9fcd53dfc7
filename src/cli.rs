// File: ./src/cli.rs
//! Shared command-line interface logic: flag parsing and help text.
use crate::config::Config;
use crate::context::StandardContext;
use crate::controller::TaskController;
use crate::logging;
use anyhow::Result;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Flags accepted by both binaries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub help: bool,
    pub root: Option<PathBuf>,
    pub file: Option<PathBuf>,
}

/// Parses `-h/--help`, `-r/--root <path>` and `-f/--file <path>`.
/// `args` excludes the binary name.
pub fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = CliArgs::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => out.help = true,
            "-r" | "--root" => {
                let value = iter.next().ok_or("--root requires a path")?;
                out.root = Some(PathBuf::from(value));
            }
            "-f" | "--file" => {
                let value = iter.next().ok_or("--file requires a path")?;
                out.file = Some(PathBuf::from(value));
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(out)
}

/// Reads one input line without its line ending; `None` at end of input.
/// Bytes that are not UTF-8 become U+FFFD instead of ending the session.
pub fn read_input_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    if matches!(line, std::borrow::Cow::Owned(_)) {
        log::warn!("Input line was not valid UTF-8");
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Shared startup for both binaries: config, logging, then the task file.
/// `--file` beats `storage_file` from the config, which beats the default.
pub fn bootstrap(args: &CliArgs) -> Result<(Config, TaskController)> {
    let ctx = StandardContext::new(args.root.clone());
    let config = Config::load_or_default(&ctx)?;

    if let Err(e) = logging::init(&ctx, &config.log_level) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let path = args
        .file
        .clone()
        .unwrap_or_else(|| config.task_file_path(&ctx));
    log::info!("Using task file {:?}", path);
    Ok((config, TaskController::load(path)))
}

pub fn print_help(binary_name: &str) {
    let is_tui = binary_name.contains("tui");

    println!(
        "Taskline v{} - a chat-style task tracker ({})",
        env!("CARGO_PKG_VERSION"),
        if is_tui { "TUI" } else { "console" }
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--file <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -f, --file <path>     Read and write tasks in this file.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    todo <name>                          Add a todo");
    println!("    deadline <name> | <date>             Add a deadline");
    println!("    event <name> | <start> | <end>       Add an event");
    println!("    List                                 Show all tasks");
    println!("    mark <n> / unmark <n>                Change the status of task n");
    println!("    delete <n>                           Remove task n");
    println!("    find <keyword>                       Search task names");
    println!("    bye                                  Quit");
    println!();
    println!("DATES:");
    println!("    yyyy-MM-dd, yyyy/MM/dd, dd-MM-yyyy, dd/MM/yyyy, MM-dd-yyyy, MM/dd/yyyy");
    println!("    optionally followed by a 24h time such as 900 or 1430");
    if is_tui {
        println!();
        println!("KEYS:");
        println!("    Enter      Send the input line");
        println!("    Up/Down    Select a task");
        println!("    Ctrl+E     Edit the selected task (name|first date|second date, _ keeps)");
        println!("    Esc        Quit without saying bye");
    }
}
