//! Self-image introspection: recovering bytes appended to an executable.
//!
//! Executable containers describe their loaded content with a table of
//! `(file offset, size)` regions. Anything a file carries past the furthest
//! end of those regions is ignored by the loader and is called the
//! *overlay*. This module finds it.
//!
//! The work is split into layers that can be tested and swapped on their own:
//!
//! | Item                   | Role |
//! |------------------------|------|
//! | [`SelfImage`]          | Capability to read the raw bytes of an image (the running executable, or a buffer in tests). |
//! | [`SectionTableReader`] | Per-format section table parser: [`pe::PeReader`], [`elf::ElfReader`], [`macho::MachReader`]. |
//! | [`overlay_from_sections`] | Pure cut: image bytes + section table in, overlay slice or absence out. |
//! | [`extract_overlay`]    | Detects the format, parses the table and cuts. |
//! | [`read_overlay`]       | Reads a [`SelfImage`] once and returns an owned overlay. |
//!
//! # Examples
//!
//! ```rust,no_run
//! use embark::image::{read_overlay, ExecutableFile};
//!
//! let exe = ExecutableFile::current()?;
//! match read_overlay(&exe) {
//!     Ok(bytes) => println!("{} overlay bytes", bytes.len()),
//!     Err(e) => println!("no usable overlay: {e}"),
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod elf;
pub mod macho;
pub mod pe;

use std::path::PathBuf;

use crate::error::{Error, Result};

/// A `(file offset, size)` region from an image's section table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Offset of the region's first byte in the file.
    pub offset: u64,
    /// Number of bytes the region occupies in the file.
    pub size: u64,
}

impl Section {
    pub fn new(offset: u64, size: u64) -> Self {
        Section { offset, size }
    }

    /// One past the last byte of the region, saturating on overflow.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }
}

/// Source of raw executable bytes.
///
/// Implemented for the running executable by [`ExecutableFile`]. Tests and
/// other callers can implement it for in-memory buffers.
pub trait SelfImage {
    /// Read the whole image. Called once per extraction.
    fn read_image(&self) -> Result<Vec<u8>>;
}

/// Parses the file-backed regions of one container format.
pub trait SectionTableReader {
    /// Human-readable format name, used in diagnostics.
    fn format(&self) -> &'static str;

    /// Returns `true` if `data` starts with this format's magic.
    fn matches(&self, data: &[u8]) -> bool;

    /// Parse the section table of `data`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidImage`] if the headers are truncated or malformed.
    fn sections(&self, data: &[u8]) -> Result<Vec<Section>>;
}

/// The executable file at a fixed path, read on demand.
#[derive(Debug, Clone)]
pub struct ExecutableFile {
    path: PathBuf,
}

impl ExecutableFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ExecutableFile { path: path.into() }
    }

    /// The currently running executable.
    ///
    /// # Errors
    ///
    /// Fails when the platform cannot report the path (deleted on exec,
    /// restricted procfs, ...).
    pub fn current() -> std::io::Result<Self> {
        std::env::current_exe().map(Self::new)
    }
}

impl SelfImage for ExecutableFile {
    fn read_image(&self) -> Result<Vec<u8>> {
        // The handle is opened, fully read and closed here, before anything else runs.
        std::fs::read(&self.path).map_err(|e| {
            Error::InvalidImage(format!("cannot read {}: {}", self.path.display(), e))
        })
    }
}

impl SelfImage for [u8] {
    fn read_image(&self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl SelfImage for Vec<u8> {
    fn read_image(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

/// Largest `offset + size` over `sections`; `0` for an empty table.
///
/// Sections may overlap or appear in any order; only the maximum matters.
pub fn last_section_end(sections: &[Section]) -> u64 {
    sections.iter().map(Section::end).max().unwrap_or(0)
}

/// Cut the overlay out of `data` given its section table.
///
/// # Errors
///
/// - [`Error::NoOverlayData`] when the file ends exactly at the last section.
/// - [`Error::InvalidImage`] when the table reaches past the end of the file.
pub fn overlay_from_sections<'a>(data: &'a [u8], sections: &[Section]) -> Result<&'a [u8]> {
    let end = last_section_end(sections);
    let len = data.len() as u64;

    if end > len {
        return Err(Error::InvalidImage(format!(
            "section table ends at {end:#x} but the file is only {len:#x} bytes"
        )));
    }

    let overlay = &data[end as usize..];
    if overlay.is_empty() {
        return Err(Error::NoOverlayData);
    }
    Ok(overlay)
}

/// All section table readers, in detection order.
pub fn readers() -> [&'static dyn SectionTableReader; 3] {
    [&pe::PeReader, &elf::ElfReader, &macho::MachReader]
}

/// Pick the reader whose magic matches `data`.
///
/// # Errors
///
/// [`Error::InvalidImage`] when no supported format matches.
pub fn detect(data: &[u8]) -> Result<&'static dyn SectionTableReader> {
    readers()
        .into_iter()
        .find(|r| r.matches(data))
        .ok_or_else(|| Error::InvalidImage("unrecognised executable format".to_owned()))
}

/// Return the overlay of the executable image held in `data`.
///
/// # Errors
///
/// [`Error::InvalidImage`] if `data` is not a parseable executable,
/// [`Error::NoOverlayData`] if nothing follows the last section.
pub fn extract_overlay(data: &[u8]) -> Result<&[u8]> {
    let reader = detect(data)?;
    let sections = reader.sections(data)?;
    log::debug!(
        "{} image: {} sections, last section ends at {:#x} of {:#x} bytes",
        reader.format(),
        sections.len(),
        last_section_end(&sections),
        data.len()
    );
    overlay_from_sections(data, &sections)
}

/// Read `image` once and return its overlay as an owned buffer.
///
/// # Errors
///
/// See [`extract_overlay`]; read failures surface as [`Error::InvalidImage`]
/// for [`ExecutableFile`].
pub fn read_overlay<I: SelfImage + ?Sized>(image: &I) -> Result<Vec<u8>> {
    let data = image.read_image()?;
    extract_overlay(&data).map(<[u8]>::to_vec)
}
