//! On-disk registry schema.
//!
//! ```json
//! {
//!   "version": 1,
//!   "packages": {
//!     "7zip": {
//!       "version": "24.08",
//!       "installer": {
//!         "kind": "msi",
//!         "x86": "https://example.invalid/7z{version}.msi",
//!         "x86_64": "https://example.invalid/7z{version}-x64.msi"
//!       },
//!       "shims": ["%ProgramFiles%\\7-Zip\\7z.exe"]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::arch::Arch;
use crate::error::{Error, Result};

/// Highest registry schema version this build understands.
pub const SUPPORTED_VERSION: u32 = 1;

/// Placeholder replaced by the package version in installer sources.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Top-level registry document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    #[serde(default = "default_version")]
    pub version: u32,
    pub packages: BTreeMap<String, PackageSpec>,
}

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

/// One package description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    pub version: String,
    pub installer: InstallerSpec,
    /// Executables to expose through shims; `%VAR%` placeholders allowed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shims: Vec<String>,
}

/// How to obtain and run a package's installer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerSpec {
    pub kind: InstallerKind,
    /// The installer may stop and wait for user input.
    #[serde(default)]
    pub interactive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x86: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x86_64: Option<String>,
    #[serde(default)]
    pub options: InstallerOptions,
}

/// Kind-specific installer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerOptions {
    /// Command line for `custom` installers; the first item is the program.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    /// Target directory for `copy` installers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Name to store the download under, when the URL does not end in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Installer technologies the launcher knows how to drive unattended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallerKind {
    #[serde(rename = "as-is")]
    AsIs,
    #[serde(rename = "copy")]
    Copy,
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "innosetup")]
    InnoSetup,
    #[serde(rename = "msi")]
    Msi,
    #[serde(rename = "nsis")]
    Nsis,
}

impl InstallerSpec {
    /// Raw source for `arch`.
    ///
    /// 64-bit hosts run 32-bit installers, so `x86_64` falls back to the `x86`
    /// source. The reverse is never true.
    pub fn source_for(&self, arch: Arch) -> Option<&str> {
        match arch {
            Arch::X86_64 => self.x86_64.as_deref().or(self.x86.as_deref()),
            Arch::X86 => self.x86.as_deref(),
        }
    }

    /// All declared sources, x86 first.
    pub fn sources(&self) -> impl Iterator<Item = (Arch, &str)> {
        [(Arch::X86, self.x86.as_deref()), (Arch::X86_64, self.x86_64.as_deref())]
            .into_iter()
            .filter_map(|(arch, src)| src.map(|s| (arch, s)))
    }
}

impl PackageSpec {
    /// Installer source for `arch` with `{version}` substituted.
    ///
    /// # Errors
    ///
    /// [`Error::NoInstaller`] if the entry declares nothing usable for `arch`.
    pub fn installer_source(&self, name: &str, arch: Arch) -> Result<String> {
        self.installer
            .source_for(arch)
            .map(|src| self.expand_version(src))
            .ok_or_else(|| Error::NoInstaller {
                package: name.to_owned(),
                arch: arch.to_string(),
            })
    }

    /// Substitute `{version}` in `text`.
    pub fn expand_version(&self, text: &str) -> String {
        text.replace(VERSION_PLACEHOLDER, &self.version)
    }
}
