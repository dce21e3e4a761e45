//! Mach-O reader.
//!
//! A thin image reports one region per segment (`fileoff .. fileoff + filesize`);
//! the code signature lives inside `__LINKEDIT` and is covered by it. A fat
//! (universal) image reports one region per embedded architecture slice.

use goblin::mach::Mach;

use super::{Section, SectionTableReader};
use crate::error::{Error, Result};

const MAGICS: [[u8; 4]; 5] = [
    [0xfe, 0xed, 0xfa, 0xce], // MH_MAGIC, big endian
    [0xce, 0xfa, 0xed, 0xfe], // MH_CIGAM
    [0xfe, 0xed, 0xfa, 0xcf], // MH_MAGIC_64, big endian
    [0xcf, 0xfa, 0xed, 0xfe], // MH_CIGAM_64
    [0xca, 0xfe, 0xba, 0xbe], // FAT_MAGIC
];

/// Section table reader for Mach-O and universal images.
#[derive(Debug, Clone, Copy, Default)]
pub struct MachReader;

impl SectionTableReader for MachReader {
    fn format(&self) -> &'static str {
        "Mach-O"
    }

    fn matches(&self, data: &[u8]) -> bool {
        data.get(..4).is_some_and(|m| MAGICS.iter().any(|x| x == m))
    }

    fn sections(&self, data: &[u8]) -> Result<Vec<Section>> {
        let invalid = |e: goblin::error::Error| Error::InvalidImage(e.to_string());

        match Mach::parse(data).map_err(invalid)? {
            Mach::Binary(macho) => Ok(macho
                .segments
                .iter()
                .map(|seg| Section::new(seg.fileoff, seg.filesize))
                .collect()),
            Mach::Fat(fat) => fat
                .iter_arches()
                .map(|arch| {
                    arch.map(|a| Section::new(u64::from(a.offset), u64::from(a.size)))
                        .map_err(invalid)
                })
                .collect(),
        }
    }
}
