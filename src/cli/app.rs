use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::mode::Mode;

/// embark - the package launcher that can carry its own command line
#[derive(Debug, Parser)]
#[command(name = "embark", about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Packages to install, processed in the order given.
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,
}

impl Cli {
    /// Parse `args`, reporting `version` for `--version`.
    ///
    /// # Errors
    ///
    /// The clap error for invalid arguments, and for `--help` / `--version`,
    /// which the caller renders with [`clap::Error::exit`].
    pub fn try_parse_versioned<I, T>(args: I, version: &'static str) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().version(version).try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }
}

/// Options shared by the root action and all subcommands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Force installation for a specific architecture (if supported by the host).
    #[arg(short, long, global = true, value_name = "ARCH")]
    pub arch: Option<String>,

    /// Only download packages, do not install them.
    #[arg(short, long, global = true)]
    pub download_only: bool,

    /// Force package re-download.
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Use the specified registry file.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Create shims only.
    #[arg(short, long, global = true)]
    pub shim: bool,
}

impl GlobalOptions {
    /// Operation mode selected by `--shim` / `--download-only`.
    pub fn mode(&self) -> Mode {
        Mode::from_flags(self.download_only, self.shim)
    }

    /// The `--arch` token; empty when not given.
    pub fn arch_token(&self) -> &str {
        self.arch.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Check that every installer in the registry is reachable.
    Audit,

    /// Remove cached downloads.
    Clean,

    /// List all known packages.
    List,

    /// Fetch a fresh copy of the registry.
    Update {
        /// URL or path to fetch from (defaults to $EMBARK_REGISTRY_URL).
        #[arg(long, value_name = "URL|PATH")]
        from: Option<String>,
    },
}
