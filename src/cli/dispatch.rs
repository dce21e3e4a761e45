//! Post-parse dispatch.
//!
//! The root action resolves the architecture before the registry is opened,
//! so a bad `--arch` never touches the disk or the network.

use std::path::Path;

use anyhow::{Context, Result};

use crate::arch;
use crate::cli::app::{Cli, Command, GlobalOptions};
use crate::cli::commands;
use crate::config::AppConfig;
use crate::orchestrator;
use crate::registry::fetch;
use crate::registry::{Registry, Workspace};

/// Execute the parsed command line.
pub fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    let Cli {
        global,
        command,
        packages,
    } = cli;

    match command {
        None => install(&global, &packages, config),
        Some(Command::List) => commands::list::run(&load_registry(&global, config)?),
        Some(Command::Audit) => commands::audit::run(&load_registry(&global, config)?),
        Some(Command::Clean) => commands::clean::run(config),
        Some(Command::Update { from }) => {
            let target = config.registry_file(global.registry.as_deref());
            commands::update::run(from.as_deref(), config, target)
        }
    }
}

fn install(global: &GlobalOptions, packages: &[String], config: &AppConfig) -> Result<()> {
    let arch = arch::resolve(global.arch_token(), config.host_is_64_bit)?;
    let registry = load_registry(global, config)?;
    log::debug!(
        "{} package(s), mode {}, arch {}",
        packages.len(),
        global.mode(),
        arch
    );

    let catalog = registry.into_catalog(Workspace::new(&config.cache_dir, &config.shims_dir));
    orchestrator::run(&catalog, packages, global.mode(), arch, global.force).into_result()?;
    Ok(())
}

/// Load the registry for this run.
///
/// An explicit `--registry` path is read as-is. The default registry is
/// fetched first when it does not exist yet and a source is configured, or
/// when `--force` is given.
pub fn load_registry(global: &GlobalOptions, config: &AppConfig) -> Result<Registry> {
    let explicit = global.registry.as_deref();
    let path = config.registry_file(explicit);

    if explicit.is_none() {
        refresh_default(path, config, global.force)?;
    }

    Registry::load(path).context("failed to load the registry")
}

fn refresh_default(path: &Path, config: &AppConfig, force: bool) -> Result<()> {
    if path.is_file() && !force {
        return Ok(());
    }
    let Some(source) = config.registry_source.as_deref() else {
        return Ok(());
    };
    log::info!("updating registry from {}", source);
    fetch::fetch(source, path)
        .with_context(|| format!("failed to fetch the registry from {}", source))
}
