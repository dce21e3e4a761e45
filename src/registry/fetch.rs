//! Fetching installers and registry files.
//!
//! A *source* is either a local path, a `file://` URL, or an `http(s)://` URL.
//! Local sources are copied; remote ones are downloaded by spawning `curl`,
//! which ships with every supported OS. Data is written next to the
//! destination as `<name>.part` and renamed into place once complete, so an
//! interrupted download never looks like a finished one.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Suffix of in-progress downloads.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Where a source lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location<'a> {
    Local(PathBuf),
    Remote(&'a str),
}

/// Classify `source`.
pub fn locate(source: &str) -> Location<'_> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return Location::Remote(source);
    }
    match source.strip_prefix("file://") {
        // file:///C:/x on Windows, file:///x elsewhere.
        Some(rest) if cfg!(windows) => Location::Local(PathBuf::from(rest.trim_start_matches('/'))),
        Some(rest) => Location::Local(PathBuf::from(rest)),
        None => Location::Local(PathBuf::from(source)),
    }
}

/// Last path component of `source`, ignoring any query string or fragment.
///
/// Handles both `/` and `\` separators. Returns `None` when the source ends in
/// a separator.
pub fn file_name_from_source(source: &str) -> Option<&str> {
    let path = source
        .split(['?', '#'])
        .next()
        .unwrap_or(source);
    let after_slash = match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    let name = match after_slash.rfind('\\') {
        Some(pos) => &after_slash[pos + 1..],
        None => after_slash,
    };
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn download_error(source: &str, message: impl Into<String>) -> Error {
    Error::Download {
        source_location: source.to_owned(),
        message: message.into(),
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// Fetch `source` into `dest`, replacing any existing file.
///
/// # Errors
///
/// [`Error::Download`] if the source cannot be read or `curl` fails;
/// [`Error::Io`] if the destination cannot be written.
pub fn fetch(source: &str, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let part = partial_path(dest);

    let fetched = match locate(source) {
        Location::Local(path) => fs::copy(&path, &part)
            .map(|_| ())
            .map_err(|e| download_error(source, e.to_string())),
        Location::Remote(url) => curl_download(url, &part),
    };
    if let Err(e) = fetched {
        let _ = fs::remove_file(&part);
        return Err(e);
    }

    fs::rename(&part, dest)?;
    Ok(())
}

fn curl_download(url: &str, part: &Path) -> Result<()> {
    log::debug!("curl -fsSL -o {} {}", part.display(), url);
    let status = Command::new("curl")
        .args(["-fsSL", "--retry", "2", "-o"])
        .arg(part)
        .arg(url)
        .stdin(Stdio::null())
        .status()
        .map_err(|e| download_error(url, format!("cannot run curl: {}", e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(download_error(url, format!("curl exited with {}", status)))
    }
}

/// Fetch `source` into `dest` unless it is already there.
///
/// With `force` the cached copy is always replaced. Returns `dest`.
pub fn cached_fetch(source: &str, dest: &Path, force: bool) -> Result<PathBuf> {
    if !force && dest.is_file() {
        log::info!("using cached {}", dest.display());
        return Ok(dest.to_path_buf());
    }
    log::info!("downloading {}", source);
    fetch(source, dest)?;
    Ok(dest.to_path_buf())
}

/// Check that `source` is reachable without downloading it.
///
/// # Errors
///
/// [`Error::Download`] describing why the source is unreachable.
pub fn probe(source: &str) -> Result<()> {
    match locate(source) {
        Location::Local(path) if path.is_file() => Ok(()),
        Location::Local(path) => Err(download_error(
            source,
            format!("{} is not a file", path.display()),
        )),
        Location::Remote(url) => {
            let status = Command::new("curl")
                .args(["-fsIL", "--retry", "2"])
                .arg(url)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .status()
                .map_err(|e| download_error(url, format!("cannot run curl: {}", e)))?;
            if status.success() {
                Ok(())
            } else {
                Err(download_error(url, format!("curl exited with {}", status)))
            }
        }
    }
}
