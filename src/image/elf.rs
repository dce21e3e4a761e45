//! ELF section table reader.
//!
//! ELF files keep their section header table (and often the program header
//! table) outside any section, usually at the very end of the file, so the
//! section list alone would misreport those tables as overlay. The regions
//! reported here are therefore:
//!
//! - the ELF header itself,
//! - the program header table and every segment's file image,
//! - the section header table and every section that occupies file space
//!   (`SHT_NOBITS` sections such as `.bss` do not).

use goblin::elf::section_header::SHT_NOBITS;
use goblin::elf::Elf;

use super::{Section, SectionTableReader};
use crate::error::{Error, Result};

/// `\x7fELF`.
pub const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Section table reader for ELF images.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElfReader;

impl SectionTableReader for ElfReader {
    fn format(&self) -> &'static str {
        "ELF"
    }

    fn matches(&self, data: &[u8]) -> bool {
        data.starts_with(ELF_MAGIC)
    }

    fn sections(&self, data: &[u8]) -> Result<Vec<Section>> {
        let elf = Elf::parse(data).map_err(|e| Error::InvalidImage(e.to_string()))?;
        let h = &elf.header;
        // e_shnum is 0 under extended numbering; goblin has already resolved the real count.
        let shnum = u64::from(h.e_shnum).max(elf.section_headers.len() as u64);

        let mut regions = vec![
            Section::new(0, u64::from(h.e_ehsize)),
            Section::new(h.e_phoff, u64::from(h.e_phnum) * u64::from(h.e_phentsize)),
            Section::new(h.e_shoff, shnum * u64::from(h.e_shentsize)),
        ];

        regions.extend(
            elf.program_headers
                .iter()
                .map(|ph| Section::new(ph.p_offset, ph.p_filesz)),
        );
        regions.extend(
            elf.section_headers
                .iter()
                .filter(|sh| sh.sh_type != SHT_NOBITS)
                .map(|sh| Section::new(sh.sh_offset, sh.sh_size)),
        );

        Ok(regions)
    }
}
