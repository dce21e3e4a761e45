//! Binary entry point for the `embark` launcher.
//!
//! # Control flow
//!
//! 1. Logging is set up first so the embedded-arguments notice is visible.
//! 2. [`effective_args`] picks the real arguments or the ones appended to
//!    this executable.
//! 3. clap parses them into a [`Cli`], reporting [`AppConfig::version`]
//!    for `--version`.
//! 4. [`dispatch::run`] executes the root action or a subcommand.
//!
//! Any error ends the process with status 1 after its chain is logged.

use embark::cli::app::Cli;
use embark::cli::bootstrap::effective_args;
use embark::cli::dispatch;
use embark::config::AppConfig;
use embark::platform;

// ── Logging ──────────────────────────────────────────────────────────────────

fn init_logging() {
    // info+ for the launcher on stderr. A bare RUST_LOG level does not lower
    // this; only an `embark=` directive does, and warn+ keeps the notices.
    env_logger::Builder::new()
        .filter_module("embark", log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() {
    init_logging();

    // Installers and shim targets refer to %ProgramFiles%; make it native.
    platform::normalise_program_files_env();

    let config = AppConfig::from_env();
    let cli = Cli::try_parse_versioned(effective_args().args, config.version)
        .unwrap_or_else(|e| e.exit());

    if let Err(e) = dispatch::run(cli, &config) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
