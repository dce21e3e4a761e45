//! Shim creation.
//!
//! A shim is a tiny launcher in a single, PATH-friendly directory that
//! forwards its arguments to an installed executable. Windows gets `.cmd`
//! scripts; other hosts get executable `sh` scripts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::arch::Arch;
use crate::error::{Error, Result};
use crate::platform::expand_env;

/// Placeholder replaced by the run's architecture in shim targets.
pub const ARCH_PLACEHOLDER: &str = "{arch}";

/// Script flavour of a shim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShimStyle {
    /// `name.cmd` batch file.
    Cmd,
    /// Extension-less POSIX shell script.
    Sh,
}

impl ShimStyle {
    /// The flavour for the host this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) {
            ShimStyle::Cmd
        } else {
            ShimStyle::Sh
        }
    }

    /// Shim file name for an executable called `stem`.
    pub fn file_name(self, stem: &str) -> String {
        match self {
            ShimStyle::Cmd => format!("{stem}.cmd"),
            ShimStyle::Sh => stem.to_owned(),
        }
    }

    /// Script body forwarding all arguments to `target`.
    pub fn script(self, target: &str) -> String {
        match self {
            ShimStyle::Cmd => format!("@echo off\r\n\"{target}\" %*\r\n"),
            ShimStyle::Sh => format!("#!/bin/sh\nexec \"{target}\" \"$@\"\n"),
        }
    }
}

/// Executable name a shim for `target` is called by: the file stem.
pub fn shim_stem(target: &str) -> Option<&str> {
    let name = target.rsplit(['/', '\\']).next().unwrap_or(target);
    let stem = match name.rfind('.') {
        Some(0) | None => name,
        Some(pos) => &name[..pos],
    };
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}

/// Write one shim per target into `shims_dir`.
///
/// Targets have `{arch}` and `%VAR%` placeholders expanded. Existing shims
/// are overwritten. Returns the paths written, in target order.
///
/// # Errors
///
/// [`Error::Registry`] for a target with no usable file name, [`Error::Io`]
/// when the directory or a script cannot be written.
pub fn write_shims(
    shims_dir: &Path,
    targets: &[String],
    arch: Arch,
    style: ShimStyle,
) -> Result<Vec<PathBuf>> {
    if targets.is_empty() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(shims_dir)?;

    let mut written = Vec::with_capacity(targets.len());
    for raw in targets {
        let target = expand_env(&raw.replace(ARCH_PLACEHOLDER, arch.as_str()));
        let stem = shim_stem(&target)
            .ok_or_else(|| Error::Registry(format!("cannot name a shim for {:?}", raw)))?;
        let path = shims_dir.join(style.file_name(stem));

        fs::write(&path, style.script(&target))?;
        make_executable(&path)?;
        log::info!("created shim {} -> {}", path.display(), target);
        written.push(path);
    }
    Ok(written)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
