use anyhow::{Context, Result};
use std::path::PathBuf;

const DB_FILE_NAME: &str = "budget.db";

/// `<platform data dir>/budget.db`, creating the directory if needed.
pub fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "budget", "Budget")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join(DB_FILE_NAME))
}
