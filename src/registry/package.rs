use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::arch::Arch;
use crate::error::{Error, Result};
use crate::registry::fetch::{cached_fetch, file_name_from_source};
use crate::registry::schema::PackageSpec;
use crate::registry::shim::{write_shims, ShimStyle};
use crate::registry::{installer, Catalog, PackageEntry};

/// Directories a run writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub cache_dir: PathBuf,
    pub shims_dir: PathBuf,
}

impl Workspace {
    pub fn new(cache_dir: impl Into<PathBuf>, shims_dir: impl Into<PathBuf>) -> Self {
        Workspace {
            cache_dir: cache_dir.into(),
            shims_dir: shims_dir.into(),
        }
    }
}

/// A registry entry bound to a workspace.
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    spec: PackageSpec,
    workspace: Arc<Workspace>,
}

impl Package {
    pub fn new(name: String, spec: PackageSpec, workspace: Arc<Workspace>) -> Self {
        Package {
            name,
            spec,
            workspace,
        }
    }

    /// Cache location of the installer for `arch`:
    /// `<cache>/<name>/<arch>/<file name>`.
    pub fn cache_path(&self, arch: Arch, source: &str) -> Result<PathBuf> {
        let options = &self.spec.installer.options;
        let file_name = match options.filename.as_deref() {
            Some(name) => self.spec.expand_version(name),
            None => file_name_from_source(source)
                .map(str::to_owned)
                .ok_or_else(|| Error::Download {
                    source_location: source.to_owned(),
                    message: "cannot derive a file name; set options.filename".to_owned(),
                })?,
        };
        Ok(self
            .workspace
            .cache_dir
            .join(&self.name)
            .join(arch.as_str())
            .join(file_name))
    }
}

impl PackageEntry for Package {
    fn is_interactive(&self) -> bool {
        self.spec.installer.interactive
    }

    fn install(&self, arch: Arch, force: bool) -> Result<()> {
        let installer = self.download_installer(arch, force)?;
        log::info!("installing {} {}", self.name, self.spec.version);
        installer::run(
            &self.name,
            self.spec.installer.kind,
            &installer,
            &self.spec.installer.options,
        )?;
        self.create_shims(arch)
    }

    fn download_installer(&self, arch: Arch, force: bool) -> Result<PathBuf> {
        let source = self.spec.installer_source(&self.name, arch)?;
        let dest = self.cache_path(arch, &source)?;
        cached_fetch(&source, &dest, force)
    }

    fn create_shims(&self, arch: Arch) -> Result<()> {
        let targets: Vec<String> = self
            .spec
            .shims
            .iter()
            .map(|t| self.spec.expand_version(t))
            .collect();
        write_shims(
            &self.workspace.shims_dir,
            &targets,
            arch,
            ShimStyle::native(),
        )?;
        Ok(())
    }
}

/// Catalog backed by a loaded registry file.
#[derive(Debug, Clone, Default)]
pub struct LocalCatalog {
    packages: BTreeMap<String, Package>,
}

impl LocalCatalog {
    pub fn new(packages: BTreeMap<String, Package>) -> Self {
        LocalCatalog { packages }
    }
}

impl Catalog for LocalCatalog {
    type Entry = Package;

    fn lookup(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }
}
