use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::config::{AppConfig, ENV_REGISTRY_URL};
use crate::registry::{fetch, Registry};

const STAGING_SUFFIX: &str = ".new";

fn staging_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

/// Fetch a fresh registry into `target`.
///
/// The download is parsed before it replaces `target`, so a broken upstream
/// file never clobbers a working registry.
pub fn run(from: Option<&str>, config: &AppConfig, target: &Path) -> Result<()> {
    let source = from
        .or(config.registry_source.as_deref())
        .ok_or_else(|| anyhow!("no registry source: pass --from or set {}", ENV_REGISTRY_URL))?;

    let staging = staging_path(target);
    fetch::fetch(source, &staging)
        .with_context(|| format!("failed to fetch the registry from {}", source))?;

    let registry = match Registry::load(&staging) {
        Ok(registry) => registry,
        Err(e) => {
            let _ = fs::remove_file(&staging);
            return Err(e).context("downloaded registry is invalid");
        }
    };

    fs::rename(&staging, target)
        .with_context(|| format!("cannot replace {}", target.display()))?;
    log::info!(
        "registry updated: {} packages in {}",
        registry.len(),
        target.display()
    );
    Ok(())
}
