// File: ./src/context.rs
/*! Application context abstraction for filesystem paths.

`AppContext` decides where the task file, the log file and the config file
live. Two implementations exist:

- `StandardContext`: `./data` for data (relative to the working directory)
  and the OS config directory from `directories::ProjectDirs`, or everything
  under an explicit override root.
- `TestContext`: a unique temporary directory, removed on drop.

Nothing here reads environment variables; callers pass the context down.
*/

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const TASK_FILE_NAME: &str = "tasks.txt";
pub const LOG_FILE_NAME: &str = "taskline.log";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Relative data directory used when no override root is given.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Defines the file system context for the application.
pub trait AppContext: std::fmt::Debug {
    fn get_data_dir(&self) -> Result<PathBuf>;
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Path of the task file. The directory is not created here; storage
    /// creates it right before writing.
    fn get_task_file_path(&self) -> PathBuf;

    fn get_log_path(&self) -> Option<PathBuf> {
        self.get_data_dir().ok().map(|p| p.join(LOG_FILE_NAME))
    }
}

pub(crate) fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
    if !path.exists() {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {:?}", path))?;
    }
    Ok(path)
}

// --- Production Implementation ---

#[derive(Clone, Debug, Default)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// With `Some(root)`, data and config live in `root/data` and
    /// `root/config`.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "taskline", "taskline")
    }

    fn data_dir_path(&self) -> PathBuf {
        match &self.override_root {
            Some(root) => root.join("data"),
            None => PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        ensure_exists(self.data_dir_path())
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return ensure_exists(root.join("config"));
        }
        let proj = Self::get_proj_dirs().ok_or_else(|| anyhow::anyhow!("No home directory"))?;
        ensure_exists(proj.config_dir().to_path_buf())
    }

    fn get_task_file_path(&self) -> PathBuf {
        self.data_dir_path().join(TASK_FILE_NAME)
    }
}

// --- Test Implementation ---

#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    /// Creates a new TestContext backed by a unique temporary directory.
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let root = std::env::temp_dir().join(format!("taskline_test_{}", uuid));
        std::fs::create_dir_all(&root).expect("failed to create TestContext temp dir");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        let p = self.root.join("data");
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        let p = self.root.join("config");
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }

    fn get_task_file_path(&self) -> PathBuf {
        self.root.join("data").join(TASK_FILE_NAME)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
