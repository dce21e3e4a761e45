//! Effective argument selection at process start.
//!
//! A copy of the binary can carry its own command line: text appended after
//! the last section of the executable image (see [`crate::image`]). When such
//! an overlay is present and non-blank it replaces the real process
//! arguments for the whole run; otherwise the real arguments are used.
//!
//! The policy lives in [`select_args`], which takes the overlay lookup result
//! as a value and so never touches the filesystem. [`effective_args`] wires
//! it to the running executable.
//!
//! The embedded text is split on single spaces. There is no quoting or
//! escaping, and consecutive spaces produce empty tokens.

use std::ffi::OsString;

use crate::config::PROGRAM_NAME;
use crate::error::Result;
use crate::image::{read_overlay, ExecutableFile};

/// Prefix of the informational notice emitted when embedded arguments are used.
pub const EMBEDDED_NOTICE: &str = "using embedded arguments: ";

/// Where the effective arguments came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgSource {
    /// The arguments the OS passed to the process.
    Process,
    /// The overlay; holds the trimmed text it was split from.
    Embedded(String),
}

/// Argument list handed to the command-line parser, program name first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveArgs {
    pub args: Vec<OsString>,
    pub source: ArgSource,
}

/// Decode overlay bytes into the embedded command line.
///
/// Bytes are decoded as UTF-8 (invalid sequences replaced) and trimmed of
/// leading and trailing `\r`, `\n` and space. Returns `None` if nothing is left.
pub fn decode_embedded(overlay: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(overlay);
    let trimmed = text.trim_matches(|c| matches!(c, '\r' | '\n' | ' '));
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Split an embedded command line on single spaces.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(' ').map(str::to_owned).collect()
}

/// Decide between the real process arguments and the overlay.
///
/// `overlay` is `None` when the running executable's path could not be
/// determined; `Some(Err(_))` when the image could not be parsed or carries
/// no overlay. Both fall back to `process_args` without any diagnostic.
pub fn select_args(process_args: Vec<OsString>, overlay: Option<Result<Vec<u8>>>) -> EffectiveArgs {
    let embedded = match overlay {
        Some(Ok(bytes)) => decode_embedded(&bytes),
        Some(Err(e)) => {
            log::debug!("ignoring self-image: {}", e);
            None
        }
        None => None,
    };

    let Some(line) = embedded else {
        return EffectiveArgs {
            args: process_args,
            source: ArgSource::Process,
        };
    };

    log::warn!("{}{}", EMBEDDED_NOTICE, line);

    let program = process_args
        .into_iter()
        .next()
        .unwrap_or_else(|| OsString::from(PROGRAM_NAME));
    let tokens = tokenize(&line);
    let mut args = Vec::with_capacity(tokens.len() + 1);
    args.push(program);
    args.extend(tokens.into_iter().map(OsString::from));

    EffectiveArgs {
        args,
        source: ArgSource::Embedded(line),
    }
}

/// Effective arguments for this process.
///
/// Reads the running executable once; the file is closed again before this
/// returns.
pub fn effective_args() -> EffectiveArgs {
    let process_args: Vec<OsString> = std::env::args_os().collect();
    let overlay = ExecutableFile::current()
        .ok()
        .map(|exe| read_overlay(&exe));
    select_args(process_args, overlay)
}
