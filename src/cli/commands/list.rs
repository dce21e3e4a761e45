use std::io::{self, Write};

use anyhow::Result;

use crate::registry::Registry;

/// Print `name version` for every package, sorted by name, to stdout.
pub fn run(registry: &Registry) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_listing(registry, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Listing with the name column padded to the longest name.
pub fn write_listing<W: Write>(registry: &Registry, out: &mut W) -> io::Result<()> {
    let width = registry.names().map(str::len).max().unwrap_or(0);
    for (name, spec) in registry.packages() {
        writeln!(out, "{:<width$}  {}", name, spec.version, width = width)?;
    }
    Ok(())
}
