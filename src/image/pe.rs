//! Portable Executable section table reader.
//!
//! Only the headers needed to locate the section table are parsed: DOS
//! header, PE signature and COFF file header. The optional header is skipped
//! by its declared size, so images without one still parse.
//!
//! Each section contributes `PointerToRawData .. PointerToRawData + SizeOfRawData`.

use goblin::pe::header::Header;

use super::{Section, SectionTableReader};
use crate::error::{Error, Result};

/// `MZ`, the DOS header magic every PE image starts with.
pub const DOS_MAGIC: &[u8; 2] = b"MZ";

/// Size of the `PE\0\0` signature that precedes the COFF header.
pub const PE_SIGNATURE_SIZE: usize = 4;

/// Size of the COFF file header.
pub const COFF_HEADER_SIZE: usize = 20;

/// Section table reader for PE/COFF images.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeReader;

impl SectionTableReader for PeReader {
    fn format(&self) -> &'static str {
        "PE"
    }

    fn matches(&self, data: &[u8]) -> bool {
        data.starts_with(DOS_MAGIC)
    }

    fn sections(&self, data: &[u8]) -> Result<Vec<Section>> {
        let header = Header::parse(data).map_err(|e| Error::InvalidImage(e.to_string()))?;

        let mut offset = header.dos_header.pe_pointer as usize
            + PE_SIGNATURE_SIZE
            + COFF_HEADER_SIZE
            + header.coff_header.size_of_optional_header as usize;

        let table = header
            .coff_header
            .sections(data, &mut offset)
            .map_err(|e| Error::InvalidImage(e.to_string()))?;

        Ok(table
            .iter()
            .map(|s| Section::new(u64::from(s.pointer_to_raw_data), u64::from(s.size_of_raw_data)))
            .collect())
    }
}
