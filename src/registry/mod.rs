//! Package registry.
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`schema`]    | JSON schema of the registry file                    |
//! | [`fetch`]     | Copying and downloading installers / registry files |
//! | [`installer`] | Running installers unattended                       |
//! | [`shim`]      | Writing shim scripts                                |
//! | [`package`]   | [`Package`] / [`LocalCatalog`], the live entries    |
//!
//! The orchestrator only sees the [`Catalog`] and [`PackageEntry`] traits, so
//! it can be driven by a scripted catalog in tests.

pub mod fetch;
pub mod installer;
pub mod package;
pub mod schema;
pub mod shim;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::arch::Arch;
use crate::error::{Error, Result};

pub use package::{LocalCatalog, Package, Workspace};
pub use schema::{InstallerKind, PackageSpec, RegistryFile, SUPPORTED_VERSION};

/// One installable entry as seen by the orchestrator.
pub trait PackageEntry {
    /// The installer may need user input to complete.
    fn is_interactive(&self) -> bool;

    /// Download (if needed), run the installer, then create shims.
    fn install(&self, arch: Arch, force: bool) -> Result<()>;

    /// Fetch the installer into the cache and return its path.
    fn download_installer(&self, arch: Arch, force: bool) -> Result<PathBuf>;

    /// Write this package's shims.
    fn create_shims(&self, arch: Arch) -> Result<()>;
}

/// Name-keyed view of the registry.
pub trait Catalog {
    type Entry: PackageEntry;

    /// The entry registered under `name`, if any.
    fn lookup(&self, name: &str) -> Option<&Self::Entry>;
}

/// A parsed registry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    file: RegistryFile,
}

impl Registry {
    /// Read and parse the registry at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Registry`] if the file cannot be read, is not valid JSON for
    /// the schema, or declares a newer schema version than this build knows.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Registry(format!("cannot read {}: {}", path.display(), e)))?;
        let registry = Self::from_json(&text)
            .map_err(|e| Error::Registry(format!("{}: {}", path.display(), e)))?;
        log::debug!(
            "loaded {} packages from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Parse a registry document.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: RegistryFile = serde_json::from_str(text)?;
        if file.version > SUPPORTED_VERSION {
            return Err(Error::Registry(format!(
                "registry version {} is newer than supported version {}",
                file.version, SUPPORTED_VERSION
            )));
        }
        Ok(Registry { file })
    }

    pub fn get(&self, name: &str) -> Option<&PackageSpec> {
        self.file.packages.get(name)
    }

    /// Package names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.file.packages.keys().map(String::as_str)
    }

    /// `(name, spec)` pairs in sorted order.
    pub fn packages(&self) -> impl Iterator<Item = (&str, &PackageSpec)> {
        self.file.packages.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.file.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.packages.is_empty()
    }

    /// Turn the document into live entries operating inside `workspace`.
    pub fn into_catalog(self, workspace: Workspace) -> LocalCatalog {
        let workspace = Arc::new(workspace);
        let packages = self
            .file
            .packages
            .into_iter()
            .map(|(name, spec)| {
                let package = Package::new(name.clone(), spec, Arc::clone(&workspace));
                (name, package)
            })
            .collect();
        LocalCatalog::new(packages)
    }
}
