// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! ELF64 file header validation and decoding.
//!
//! Only the three fields needed to reach the section table are decoded:
//! `e_shoff`, `e_shnum` and `e_shstrndx`. Class, encoding and machine bytes
//! are not checked; the input is produced by a known toolchain and the layout
//! is always 64-bit little-endian.

use log::debug;

use crate::bytes::{read_u16_le, read_u64_le};
use crate::error::{malformed, Error, ErrorKind};

/// ELF magic bytes: `\x7fELF`.
pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// Size of an ELF64 file header.
pub const ELF64_EHDR_SIZE: usize = 64;

/// Size of an ELF64 section header entry.
pub const ELF64_SHDR_SIZE: u64 = 64;

const E_SHOFF: u64 = 40;
const E_SHNUM: u64 = 60;
const E_SHSTRNDX: u64 = 62;

/// Checks that `buf` is large enough to hold a file header and starts with
/// the ELF magic.
pub fn validate_header(buf: &[u8]) -> Result<(), Error> {
    if buf.len() < ELF64_EHDR_SIZE {
        return Err(malformed(format!(
            "buffer of {} bytes is too small for a {} byte ELF64 header",
            buf.len(),
            ELF64_EHDR_SIZE
        )));
    }
    if buf[..4] != ELF_MAGIC {
        return Err(Error::new(
            ErrorKind::InvalidFormat,
            format!(
                "expected magic {:02x?}, found {:02x?}",
                ELF_MAGIC,
                &buf[..4]
            ),
        ));
    }
    Ok(())
}

/// The subset of the file header used to locate the section table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Byte offset of the section descriptor table (`e_shoff`).
    pub section_table_offset: u64,
    /// Number of section descriptors (`e_shnum`).
    pub section_count: u16,
    /// Index of the section-name string table descriptor (`e_shstrndx`).
    pub string_table_index: u16,
}

impl FileHeader {
    /// Validates `buf` and decodes the section table location.
    ///
    /// The decoded values are not checked against the buffer length here;
    /// every later access performs its own bounds check.
    pub fn read(buf: &[u8]) -> Result<FileHeader, Error> {
        validate_header(buf)?;

        let header = FileHeader {
            section_table_offset: read_u64_le(buf, E_SHOFF)?,
            section_count: read_u16_le(buf, E_SHNUM)?,
            string_table_index: read_u16_le(buf, E_SHSTRNDX)?,
        };

        debug!(
            "ELF header: shoff={:#x}, shnum={}, shstrndx={}",
            header.section_table_offset, header.section_count, header.string_table_index
        );

        Ok(header)
    }

    /// File offset of the descriptor at `index` in the section table.
    pub fn descriptor_offset(&self, index: u16) -> Result<u64, Error> {
        (index as u64)
            .checked_mul(ELF64_SHDR_SIZE)
            .and_then(|rel| self.section_table_offset.checked_add(rel))
            .ok_or_else(|| {
                malformed(format!(
                    "section descriptor {} offset overflows (shoff {:#x})",
                    index, self.section_table_offset
                ))
            })
    }
}
