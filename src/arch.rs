//! Target architecture selection.
//!
//! A run installs every package for one architecture. [`resolve`] turns the
//! `--arch` token and the host's 64-bit capability into that architecture
//! before the registry is touched; any error here ends the run.

use std::fmt;

use crate::error::{Error, Result};

/// Architecture a run installs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// 32-bit x86.
    X86,
    /// 64-bit x86.
    X86_64,
}

impl Arch {
    /// Token used on the command line and in the registry.
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a requested architecture token to a concrete [`Arch`].
///
/// | `requested` | 64-bit host | 32-bit host                      |
/// |-------------|-------------|----------------------------------|
/// | `""`        | `x86_64`    | `x86`                            |
/// | `"x86"`     | `x86`       | `x86`                            |
/// | `"x86_64"`  | `x86_64`    | [`Error::UnsupportedArchitecture`] |
/// | other       | [`Error::UnknownArchitecture`] | same          |
pub fn resolve(requested: &str, host_is_64_bit: bool) -> Result<Arch> {
    match requested {
        "" if host_is_64_bit => Ok(Arch::X86_64),
        "" => Ok(Arch::X86),
        "x86" => Ok(Arch::X86),
        "x86_64" if host_is_64_bit => Ok(Arch::X86_64),
        "x86_64" => Err(Error::UnsupportedArchitecture),
        other => Err(Error::UnknownArchitecture(other.to_owned())),
    }
}
