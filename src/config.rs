// config.rs - Identity constants and the per-process configuration value.
//
// Everything a run needs to know about its environment is gathered once in
// `main` into an `AppConfig` and passed down by reference. Nothing here is
// mutated after construction.

use std::path::{Path, PathBuf};

use crate::platform;

// Program name used when argv[0] is unavailable and in help output.
pub const PROGRAM_NAME: &str = "embark";

// Version stamped by build.rs. Set `EMBARK_VERSION` at build time to override
// the Cargo package version.
pub const BUILD_VERSION: &str = env!("EMBARK_BUILD_VERSION");

// Root directory for the registry, download cache and shims.
pub const ENV_HOME: &str = "EMBARK_HOME";

// Directory where shims are written. Defaults to `<data dir>/shims`.
pub const ENV_SHIMS: &str = "EMBARK_SHIMS";

// URL or path the `update` subcommand (and a missing default registry) fetches from.
pub const ENV_REGISTRY_URL: &str = "EMBARK_REGISTRY_URL";

pub const REGISTRY_FILE_NAME: &str = "registry.json";
pub const CACHE_DIR_NAME: &str = "cache";
pub const SHIMS_DIR_NAME: &str = "shims";

/// Configuration for one process, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Version string reported by `--version`.
    pub version: &'static str,
    /// Root of all state written by the launcher.
    pub data_dir: PathBuf,
    /// Registry file used when `--registry` is not given.
    pub registry_path: PathBuf,
    /// Downloaded installers live under here.
    pub cache_dir: PathBuf,
    /// Shim scripts are written here.
    pub shims_dir: PathBuf,
    /// Where to fetch the registry from, if configured.
    pub registry_source: Option<String>,
    /// Whether the host can run 64-bit software.
    pub host_is_64_bit: bool,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), platform::host_is_64_bit())
    }

    /// Testable core of [`from_env`](Self::from_env): `lookup` stands in for
    /// `std::env::var`, so tests never touch the real process environment.
    pub fn from_lookup<F>(lookup: F, host_is_64_bit: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = non_empty(ENV_HOME)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(PROGRAM_NAME));
        let shims_dir = non_empty(ENV_SHIMS)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(SHIMS_DIR_NAME));

        AppConfig {
            version: BUILD_VERSION,
            registry_path: data_dir.join(REGISTRY_FILE_NAME),
            cache_dir: data_dir.join(CACHE_DIR_NAME),
            shims_dir,
            registry_source: non_empty(ENV_REGISTRY_URL),
            host_is_64_bit,
            data_dir,
        }
    }

    /// Registry file for this run: the explicit `--registry` path if any,
    /// otherwise the default under the data directory.
    pub fn registry_file<'a>(&'a self, explicit: Option<&'a Path>) -> &'a Path {
        explicit.unwrap_or(&self.registry_path)
    }
}
