//! Sequential dispatch of requested packages.
//!
//! A run has two passes over the request list, both in request order:
//!
//! 1. every known interactive package is announced up front, so the user
//!    sees all prompts coming before any installer starts;
//! 2. each name is dispatched according to the run's [`Mode`].
//!
//! Outcomes are collected per request into an [`OrchestrationResult`] and
//! reduced to success or failure only at the end. Only [`Mode::Install`]
//! reports failures. Shim-only and download-only runs discard them; the
//! asymmetry is kept as observed rather than guessed at.

use crate::arch::Arch;
use crate::error::{Error, Result};
use crate::mode::Mode;
use crate::registry::{Catalog, PackageEntry};

/// Header logged before the list of interactive packages.
pub const INTERACTIVE_HEADER: &str =
    "these packages might require user interaction to complete their installation";

/// What happened to one requested name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The entry's operation ran. In shim-only and download-only runs this
    /// is recorded whatever the operation returned.
    Completed,
    /// The registry has no entry with this name.
    SkippedUnknown,
    /// Installation failed; holds the rendered error.
    Failed(String),
}

/// Outcome of one entry in the request list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    pub name: String,
    pub outcome: Outcome,
}

/// Per-request outcomes of a run, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationResult {
    pub mode: Mode,
    pub outcomes: Vec<RequestOutcome>,
}

impl OrchestrationResult {
    /// Names whose installation failed, in request order.
    pub fn failures(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Failed(_)))
            .map(|o| o.name.as_str())
            .collect()
    }

    /// Whether the run as a whole failed.
    pub fn has_failures(&self) -> bool {
        self.mode.reports_failures()
            && self
                .outcomes
                .iter()
                .any(|o| matches!(o.outcome, Outcome::Failed(_)))
    }

    /// Reduce to a single result.
    ///
    /// # Errors
    ///
    /// [`Error::InstallFailed`] listing the failed names when
    /// [`has_failures`](Self::has_failures) is true.
    pub fn into_result(self) -> Result<()> {
        if !self.has_failures() {
            return Ok(());
        }
        Err(Error::InstallFailed {
            packages: self.failures().into_iter().map(str::to_owned).collect(),
        })
    }
}

/// Requested names that are known and flagged interactive, in request order.
///
/// Duplicates in `names` are kept.
pub fn interactive_packages<'a, C: Catalog>(catalog: &C, names: &'a [String]) -> Vec<&'a str> {
    names
        .iter()
        .filter(|name| {
            catalog
                .lookup(name)
                .is_some_and(|entry| entry.is_interactive())
        })
        .map(String::as_str)
        .collect()
}

fn announce_interactive(names: &[&str]) {
    if names.is_empty() {
        return;
    }
    log::warn!("{}", INTERACTIVE_HEADER);
    for name in names {
        log::warn!("    {}", name);
    }
    log::warn!("");
}

/// Process `names` against `catalog`, one at a time.
///
/// Never stops early: a failed install is logged and recorded, then the next
/// name is processed.
pub fn run<C: Catalog>(
    catalog: &C,
    names: &[String],
    mode: Mode,
    arch: Arch,
    force: bool,
) -> OrchestrationResult {
    announce_interactive(&interactive_packages(catalog, names));

    let mut outcomes = Vec::with_capacity(names.len());
    for name in names {
        let outcome = match catalog.lookup(name) {
            None => {
                log::warn!("{}", Error::UnknownPackage(name.clone()));
                Outcome::SkippedUnknown
            }
            Some(entry) => dispatch(entry, name, mode, arch, force),
        };
        outcomes.push(RequestOutcome {
            name: name.clone(),
            outcome,
        });
    }

    OrchestrationResult { mode, outcomes }
}

fn dispatch<E: PackageEntry>(entry: &E, name: &str, mode: Mode, arch: Arch, force: bool) -> Outcome {
    match mode {
        Mode::ShimOnly => {
            let _ = entry.create_shims(arch);
            Outcome::Completed
        }
        Mode::DownloadOnly => {
            let _ = entry.download_installer(arch, force);
            Outcome::Completed
        }
        Mode::Install => match entry.install(arch, force) {
            Ok(()) => Outcome::Completed,
            Err(e) => {
                log::error!("error installing {}: {}", name, e);
                Outcome::Failed(e.to_string())
            }
        },
    }
}
