// A copy of the binary with a command line appended after its last section
// runs that command line instead of its real arguments.

#![cfg(any(target_os = "linux", windows))]

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::common::{command_for, embark_bin, registry_dir, run, stderr, stdout, SMALL_REGISTRY};

fn copy_with_overlay(dir: &Path, overlay: &[u8]) -> PathBuf {
    let name = embark_bin().file_name().unwrap().to_owned();
    let copy = dir.join(name);
    fs::copy(embark_bin(), &copy).unwrap();
    let mut f = OpenOptions::new().append(true).open(&copy).unwrap();
    f.write_all(overlay).unwrap();
    f.sync_all().unwrap();
    copy
}

#[test]
fn embedded_arguments_replace_real_ones() {
    let home = TempDir::new().unwrap();
    let bin_dir = TempDir::new().unwrap();
    let (_dir, registry) = registry_dir(SMALL_REGISTRY);
    let line = format!("  list -r {}\r\n", registry.display());
    let exe = copy_with_overlay(bin_dir.path(), line.as_bytes());

    // The real arguments would fail; the embedded ones win.
    let out = run(command_for(&exe, home.path()).args(["-a", "arm", "zip"]));

    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stderr(&out).contains(&format!("using embedded arguments: list -r {}", registry.display())));
    assert_eq!(stdout(&out), "7zip  24.08\nzip   3.0\n");
}

#[test]
fn embedded_flags_before_subcommand_survive_quiet_logging() {
    let home = TempDir::new().unwrap();
    let bin_dir = TempDir::new().unwrap();
    let (_dir, registry) = registry_dir(SMALL_REGISTRY);
    let line = format!("--force -r {} list", registry.display());
    let exe = copy_with_overlay(bin_dir.path(), line.as_bytes());

    let out = run(command_for(&exe, home.path()).env("RUST_LOG", "error"));

    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stderr(&out).contains("using embedded arguments: --force -r"));
    assert_eq!(stdout(&out), "7zip  24.08\nzip   3.0\n");
}

#[test]
fn blank_overlay_uses_real_arguments() {
    let home = TempDir::new().unwrap();
    let bin_dir = TempDir::new().unwrap();
    let exe = copy_with_overlay(bin_dir.path(), b" \r\n ");

    let out = run(command_for(&exe, home.path()).arg("--version"));

    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).starts_with("embark "));
    assert!(!stderr(&out).contains("using embedded arguments"));
}
