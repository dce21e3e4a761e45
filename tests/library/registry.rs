// Registry loading and the live catalog built from it.

use std::fs;

use embark::registry::{Catalog, PackageEntry, Registry, Workspace};
use embark::{Arch, Error};
use tempfile::TempDir;

#[test]
fn load_and_download_through_catalog() {
    let dir = TempDir::new().unwrap();
    let installer = dir.path().join("tool-1.4.exe");
    fs::write(&installer, b"MZ").unwrap();
    let source = dir
        .path()
        .join("tool-{version}.exe")
        .display()
        .to_string()
        .replace('\\', "\\\\");
    let path = dir.path().join("registry.json");
    fs::write(
        &path,
        format!(
            r#"{{"version": 1, "packages": {{"tool": {{"version": "1.4", "installer": {{"kind": "nsis", "x86": "{source}"}}}}}}}}"#
        ),
    )
    .unwrap();

    let registry = Registry::load(&path).unwrap();
    assert_eq!(registry.len(), 1);

    let cache = dir.path().join("cache");
    let catalog = registry.into_catalog(Workspace::new(&cache, dir.path().join("shims")));
    let tool = catalog.lookup("tool").unwrap();

    let cached = tool.download_installer(Arch::X86_64, false).unwrap();
    assert_eq!(cached, cache.join("tool").join("x86_64").join("tool-1.4.exe"));
    assert_eq!(fs::read(&cached).unwrap(), b"MZ");
}

#[test]
fn x86_only_request_without_x86_source_fails() {
    let registry = Registry::from_json(
        r#"{"packages": {"wide": {"version": "1", "installer": {"kind": "msi", "x86_64": "w.msi"}}}}"#,
    )
    .unwrap();
    let dir = TempDir::new().unwrap();
    let catalog = registry.into_catalog(Workspace::new(dir.path(), dir.path()));

    let err = catalog
        .lookup("wide")
        .unwrap()
        .download_installer(Arch::X86, false)
        .unwrap_err();
    assert!(matches!(err, Error::NoInstaller { .. }));
    assert_eq!(err.to_string(), "wide: no installer available for x86");
}

#[test]
fn unknown_installer_kind_is_rejected() {
    assert!(Registry::from_json(
        r#"{"packages": {"x": {"version": "1", "installer": {"kind": "zip", "x86": "x"}}}}"#
    )
    .is_err());
}
