use std::path::PathBuf;

use thiserror::Error;

/// The crate-wide error type.
///
/// Variants fall into three groups, matching how the launcher treats them:
///
/// ## Self-image errors
/// - [`Error::InvalidImage`] - the running executable could not be parsed
/// - [`Error::NoOverlayData`] - nothing is appended after the last section
///
/// Both are swallowed by the argument bootstrapper, which falls back to the
/// real process arguments.
///
/// ## Startup errors
/// - [`Error::UnknownArchitecture`] / [`Error::UnsupportedArchitecture`]
/// - [`Error::Registry`] - the registry could not be loaded or fetched
///
/// These abort a run before any package is touched.
///
/// ## Package errors
/// - [`Error::NoInstaller`], [`Error::Download`], [`Error::InstallerFailed`]
/// - [`Error::InstallFailed`] - the aggregate raised once at the end of an
///   install run
#[derive(Error, Debug)]
pub enum Error {
    /// The executable image is truncated, has an unknown magic, or its section
    /// table points past the end of the file.
    #[error("invalid executable image: {0}")]
    InvalidImage(String),

    /// The region after the last section is empty.
    #[error("no overlay data found")]
    NoOverlayData,

    /// The `--arch` token is not one of `x86` / `x86_64`.
    #[error("unknown architecture: {0}")]
    UnknownArchitecture(String),

    /// `x86_64` was requested on a host that cannot run 64-bit software.
    #[error("this machine cannot run 64-bit software")]
    UnsupportedArchitecture,

    /// A name was looked up that the registry does not know.
    #[error("unknown package: {0}")]
    UnknownPackage(String),

    /// The registry entry has no installer usable for the requested architecture.
    #[error("{package}: no installer available for {arch}")]
    NoInstaller {
        /// Package name.
        package: String,
        /// Requested architecture token.
        arch: String,
    },

    /// Fetching an installer or registry file failed.
    #[error("failed to download {source_location}: {message}")]
    Download {
        /// URL or path that was being fetched.
        source_location: String,
        /// What went wrong.
        message: String,
    },

    /// The native installer ran but reported failure.
    #[error("installer {} exited with {status}", .program.display())]
    InstallerFailed {
        /// Program that was launched.
        program: PathBuf,
        /// Exit status as reported by the OS.
        status: String,
    },

    /// One or more packages failed during an install run.
    #[error("one or more packages failed to install: {}", .packages.join(", "))]
    InstallFailed {
        /// Failed package names, in request order.
        packages: Vec<String>,
    },

    /// The registry file is missing, unreadable or has no source to fetch from.
    #[error("registry error: {0}")]
    Registry(String),

    /// Filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed registry JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
