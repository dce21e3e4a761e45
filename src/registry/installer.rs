//! Running downloaded installers unattended.
//!
//! Each [`InstallerKind`] maps to a command line (or, for `copy`, a file
//! copy). The launcher waits for the installer to exit; a non-zero status is
//! an [`Error::InstallerFailed`].

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::platform::expand_env;
use crate::registry::schema::{InstallerKind, InstallerOptions};

/// Placeholder replaced by the downloaded installer's path in `custom` arguments.
pub const INSTALLER_PLACEHOLDER: &str = "{installer}";

const INNOSETUP_ARGS: [&str; 4] = ["/VERYSILENT", "/SUPPRESSMSGBOXES", "/NORESTART", "/SP-"];
const NSIS_ARGS: [&str; 1] = ["/S"];

/// Program and arguments that run an installer unattended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

/// Build the command line for `kind`.
///
/// Returns `Ok(None)` for [`InstallerKind::Copy`], which runs nothing.
///
/// # Errors
///
/// [`Error::Registry`] when a `custom` installer declares no arguments.
pub fn command_line(
    package: &str,
    kind: InstallerKind,
    installer: &Path,
    options: &InstallerOptions,
) -> Result<Option<CommandLine>> {
    let direct = |args: &[&str]| CommandLine {
        program: installer.to_path_buf(),
        args: args.iter().map(OsString::from).collect(),
    };

    let line = match kind {
        InstallerKind::Copy => return Ok(None),
        InstallerKind::AsIs => direct(&[]),
        InstallerKind::InnoSetup => direct(&INNOSETUP_ARGS),
        InstallerKind::Nsis => direct(&NSIS_ARGS),
        InstallerKind::Msi => {
            let mut args: Vec<OsString> = vec!["/i".into(), installer.as_os_str().to_owned()];
            args.extend(["/qn", "/norestart"].map(OsString::from));
            CommandLine {
                program: PathBuf::from("msiexec.exe"),
                args,
            }
        }
        InstallerKind::Custom => {
            let installer_str = installer.to_string_lossy();
            let mut expanded = options
                .arguments
                .iter()
                .map(|a| a.replace(INSTALLER_PLACEHOLDER, &installer_str));
            let program = expanded.next().ok_or_else(|| {
                Error::Registry(format!("{}: custom installer has no arguments", package))
            })?;
            CommandLine {
                program: PathBuf::from(program),
                args: expanded.map(OsString::from).collect(),
            }
        }
    };
    Ok(Some(line))
}

/// Install `installer` for `package`.
///
/// # Errors
///
/// [`Error::InstallerFailed`] if the installer exits unsuccessfully,
/// [`Error::Io`] if it cannot be started or copied.
pub fn run(
    package: &str,
    kind: InstallerKind,
    installer: &Path,
    options: &InstallerOptions,
) -> Result<()> {
    match command_line(package, kind, installer, options)? {
        Some(line) => execute(&line),
        None => copy_into_destination(package, installer, options).map(|_| ()),
    }
}

fn execute(line: &CommandLine) -> Result<()> {
    log::debug!("running {} {:?}", line.program.display(), line.args);
    let status = Command::new(&line.program).args(&line.args).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::InstallerFailed {
            program: line.program.clone(),
            status: status.to_string(),
        })
    }
}

/// Copy `installer` into the `destination` directory from `options`.
///
/// Returns the path written.
pub fn copy_into_destination(
    package: &str,
    installer: &Path,
    options: &InstallerOptions,
) -> Result<PathBuf> {
    let destination = options.destination.as_deref().ok_or_else(|| {
        Error::Registry(format!("{}: copy installer has no destination", package))
    })?;
    let dir = PathBuf::from(expand_env(destination));
    let name = installer.file_name().ok_or_else(|| {
        Error::Registry(format!("{}: installer path has no file name", package))
    })?;

    fs::create_dir_all(&dir)?;
    let target = dir.join(name);
    fs::copy(installer, &target)?;
    log::info!("copied {} to {}", installer.display(), target.display());
    Ok(target)
}
