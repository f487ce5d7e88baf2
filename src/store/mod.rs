use anyhow::{Context, Result};
use directories::ProjectDirs;
use fs_err as fs;
use std::path::PathBuf;

pub mod history;
pub mod templates;

pub use history::{HistoryItem, HistoryStore, MAX_HISTORY_ITEMS};
pub use templates::{CustomTemplate, TemplateStore, TemplateUpdate};

/// Resolve the on-disk data directory, creating it if needed. All
/// persisted state (history, custom templates, request artifacts) lives
/// under this one directory.
pub fn data_dir(override_path: Option<&str>) -> Result<PathBuf> {
    let dir = match override_path {
        Some(p) => PathBuf::from(p),
        None => ProjectDirs::from("com", "devforge", "devforge")
            .context("failed to determine data directory")?
            .data_dir()
            .to_path_buf(),
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}
