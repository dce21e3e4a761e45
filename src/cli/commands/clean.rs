use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::config::AppConfig;

/// Totals for a directory tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub files: u64,
    pub bytes: u64,
}

/// Count regular files and their sizes under `root`. Unreadable entries are skipped.
pub fn usage(root: &Path) -> Usage {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .fold(Usage::default(), |acc, meta| Usage {
            files: acc.files + 1,
            bytes: acc.bytes + meta.len(),
        })
}

/// Remove `dir` and everything below it, returning what was freed.
pub fn remove_tree(dir: &Path) -> Result<Usage> {
    if !dir.exists() {
        return Ok(Usage::default());
    }
    let freed = usage(dir);
    fs::remove_dir_all(dir).with_context(|| format!("cannot remove {}", dir.display()))?;
    Ok(freed)
}

/// Remove the download cache.
pub fn run(config: &AppConfig) -> Result<()> {
    let freed = remove_tree(&config.cache_dir)?;
    if freed.files == 0 {
        log::info!("nothing to clean in {}", config.cache_dir.display());
    } else {
        log::info!(
            "removed {} file(s), {} bytes from {}",
            freed.files,
            freed.bytes,
            config.cache_dir.display()
        );
    }
    Ok(())
}
