use anyhow::{bail, Result};

use crate::arch::Arch;
use crate::registry::{fetch, Registry};

/// One unreachable installer source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenSource {
    pub package: String,
    pub arch: Arch,
    pub source: String,
    pub reason: String,
}

/// Probe every declared installer source with `probe`.
pub fn find_broken<F>(registry: &Registry, probe: F) -> Vec<BrokenSource>
where
    F: Fn(&str) -> crate::Result<()>,
{
    let mut broken = Vec::new();
    for (name, spec) in registry.packages() {
        for (arch, raw) in spec.installer.sources() {
            let source = spec.expand_version(raw);
            log::debug!("checking {} ({}): {}", name, arch, source);
            if let Err(e) = probe(&source) {
                broken.push(BrokenSource {
                    package: name.to_owned(),
                    arch,
                    source,
                    reason: e.to_string(),
                });
            }
        }
    }
    broken
}

/// Check that every installer in the registry is reachable.
pub fn run(registry: &Registry) -> Result<()> {
    let broken = find_broken(registry, fetch::probe);
    for b in &broken {
        log::warn!("{} ({}): {}", b.package, b.arch, b.reason);
    }
    if !broken.is_empty() {
        bail!("{} broken installer source(s)", broken.len());
    }
    log::info!("all {} packages are reachable", registry.len());
    Ok(())
}
