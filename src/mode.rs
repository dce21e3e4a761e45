//! Operation mode selection for the root action.
//!
//! - [`Mode`] - what the orchestrator does with each requested package.
//! - [`Mode::from_flags`] - derives the mode from `--shim` / `--download-only`.

use std::fmt;

/// What the root action does with each requested package.
///
/// The three modes are mutually exclusive for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Download, run the installer, create shims. Failures are logged and
    /// make the run fail.
    #[default]
    Install,
    /// Only fetch installers into the cache. Failures are discarded.
    DownloadOnly,
    /// Only (re)create shims. Failures are discarded.
    ShimOnly,
}

impl Mode {
    /// Derive the mode from the command-line flags.
    ///
    /// `--shim` takes precedence over `--download-only` when both are given;
    /// neither selects [`Mode::Install`].
    pub fn from_flags(download_only: bool, shim_only: bool) -> Self {
        if shim_only {
            Mode::ShimOnly
        } else if download_only {
            Mode::DownloadOnly
        } else {
            Mode::Install
        }
    }

    /// Whether per-package failures in this mode are logged and aggregated.
    ///
    /// Only [`Mode::Install`] reports failures. Download-only and shim-only
    /// runs discard them; this asymmetry is deliberate and kept as observed.
    pub fn reports_failures(self) -> bool {
        self == Mode::Install
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Install => "install",
            Mode::DownloadOnly => "download-only",
            Mode::ShimOnly => "shim-only",
        })
    }
}
