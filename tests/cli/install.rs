// End-to-end root action on a POSIX host: installers are shell scripts run
// "as-is", so the whole download / run / aggregate path executes for real.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tempfile::TempDir;

use super::common::{embark, run, stderr};

fn script(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.display().to_string()
}

fn registry(dir: &Path, marker: &Path) -> std::path::PathBuf {
    let ok = script(dir, "ok.sh", &format!("echo run >> '{}'", marker.display()));
    let bad = script(dir, "bad.sh", "exit 7");
    let json = format!(
        r#"{{
            "packages": {{
                "a": {{"version": "1", "installer": {{"kind": "as-is", "x86": "{ok}"}}, "shims": ["/opt/a/bin/a-tool"]}},
                "b": {{"version": "2", "installer": {{"kind": "as-is", "interactive": true, "x86": "{bad}"}}}}
            }}
        }}"#
    );
    let path = dir.join("registry.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn mixed_request_reports_failure_after_all_packages() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let marker = work.path().join("runs.log");
    let registry = registry(work.path(), &marker);

    let out = run(embark(home.path())
        .arg("-r")
        .arg(&registry)
        .args(["a", "b", "missing", "a"]));
    let err = stderr(&out);

    assert_eq!(out.status.code(), Some(1), "{err}");

    // "a" ran twice, once per request.
    assert_eq!(fs::read_to_string(&marker).unwrap(), "run\nrun\n");

    let header = err
        .find("these packages might require user interaction")
        .expect("interactive header");
    assert_eq!(err.matches("might require user interaction").count(), 1);
    let listed = err.find("    b").expect("interactive list");
    let first_install = err.find("installing a").expect("install of a");
    let failed = err.find("error installing b:").expect("install error");
    let unknown = err.find("unknown package: missing").expect("unknown warning");
    let aggregate = err
        .find("one or more packages failed to install: b")
        .expect("aggregate error");
    assert!(header < listed && listed < first_install);
    assert!(first_install < failed && failed < unknown && unknown < aggregate);

    // A message-less line separates the interactive list from installer output.
    let after_list = err[listed..].lines().nth(1).expect("line after the list");
    assert!(after_list.trim_end().ends_with(']'), "{after_list:?}");
    assert_eq!(err.matches("error installing").count(), 1);

    // The cached installer and the shim for "a" are in place.
    assert!(home.path().join("cache").join("a").is_dir());
    assert!(home.path().join("shims").join("a-tool").is_file());
}

#[test]
fn successful_run_exits_zero() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let marker = work.path().join("runs.log");
    let registry = registry(work.path(), &marker);

    let out = run(embark(home.path()).arg("-r").arg(&registry).args(["a", "nope"]));

    assert!(out.status.success(), "{}", stderr(&out));
    assert!(!stderr(&out).contains("user interaction"));
    assert_eq!(fs::read_to_string(&marker).unwrap(), "run\n");
}

#[test]
fn shim_only_writes_shims_without_installing() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let marker = work.path().join("runs.log");
    let registry = registry(work.path(), &marker);

    let out = run(embark(home.path()).arg("-r").arg(&registry).args(["-s", "a", "b"]));

    assert!(out.status.success(), "{}", stderr(&out));
    assert!(!marker.exists());
    let shim = fs::read_to_string(home.path().join("shims").join("a-tool")).unwrap();
    assert!(shim.contains("/opt/a/bin/a-tool"));
}
