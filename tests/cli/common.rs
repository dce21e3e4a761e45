// Shared helpers for tests that drive the compiled `embark` binary.
//
// Cargo sets `CARGO_BIN_EXE_embark` to the path of the compiled binary when
// running integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Path to the compiled `embark` binary under test.
pub fn embark_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_embark"))
}

/// A `Command` for `program` with a private data directory and no inherited
/// launcher configuration.
pub fn command_for(program: &Path, home: &Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.env("EMBARK_HOME", home)
        .env_remove("EMBARK_SHIMS")
        .env_remove("EMBARK_REGISTRY_URL")
        .env_remove("RUST_LOG");
    cmd
}

pub fn embark(home: &Path) -> Command {
    command_for(&embark_bin(), home)
}

/// Run `cmd`, retrying while the freshly written executable is still busy.
pub fn run(cmd: &mut Command) -> Output {
    for _ in 0..20 {
        match cmd.output() {
            // ETXTBSY: another test thread forked while our write handle was open.
            Err(e) if e.raw_os_error() == Some(26) => {
                std::thread::sleep(std::time::Duration::from_millis(50))
            }
            other => return other.expect("spawn embark"),
        }
    }
    panic!("executable stayed busy");
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

/// Write `json` as `registry.json` inside a new temp dir.
pub fn registry_dir(json: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("TempDir::new");
    let path = dir.path().join("registry.json");
    fs::write(&path, json).expect("write registry");
    (dir, path)
}

pub const SMALL_REGISTRY: &str = r#"{
    "version": 1,
    "packages": {
        "zip": {"version": "3.0", "installer": {"kind": "nsis", "x86": "https://example.invalid/zip.exe"}},
        "7zip": {"version": "24.08", "installer": {"kind": "msi", "x86": "https://example.invalid/7z.msi"}}
    }
}"#;
