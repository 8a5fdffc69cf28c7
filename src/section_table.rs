// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! Section descriptor decoding and the name-based section scan.

use core::ops::Range;

use alloc::vec::Vec;
use log::debug;

use crate::bytes::{checked_range, read_u32_le, read_u64_le, slice_at};
use crate::error::{malformed, Error, ErrorKind};
use crate::header::{FileHeader, ELF64_SHDR_SIZE};
use crate::string_table::StringTable;

const SH_NAME: u64 = 0;
const SH_OFFSET: u64 = 24;
const SH_SIZE: u64 = 32;

/// The fields of an ELF64 section header that the extractor consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDescriptor {
    /// Offset of the section name in the string table (`sh_name`).
    pub name_offset: u32,
    /// File offset of the section contents (`sh_offset`).
    pub file_offset: u64,
    /// Size of the section contents in bytes (`sh_size`).
    pub size: u64,
}

impl SectionDescriptor {
    /// Decodes descriptor `index` of the section table.
    ///
    /// Fails with [`ErrorKind::MalformedFile`] if the 64 byte entry does not
    /// lie entirely inside `buf`.
    pub fn read(buf: &[u8], header: &FileHeader, index: u16) -> Result<SectionDescriptor, Error> {
        let offset = header.descriptor_offset(index)?;
        checked_range(buf.len(), offset, ELF64_SHDR_SIZE).map_err(|e| {
            malformed(format!(
                "section descriptor {} at {:#x}: {}",
                index,
                offset,
                e.message()
            ))
        })?;

        Ok(SectionDescriptor {
            name_offset: read_u32_le(buf, offset + SH_NAME)?,
            file_offset: read_u64_le(buf, offset + SH_OFFSET)?,
            size: read_u64_le(buf, offset + SH_SIZE)?,
        })
    }
}

/// Location of a section's contents inside the object buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRange {
    pub offset: u64,
    pub size: u64,
}

impl SectionRange {
    pub fn new(offset: u64, size: u64) -> Self {
        Self { offset, size }
    }

    /// The section's byte range.
    ///
    /// Fails with [`ErrorKind::MalformedFile`] if the end overflows or does
    /// not fit in a `usize`; the range is not checked against any buffer.
    pub fn range(&self) -> Result<Range<usize>, Error> {
        let end = self.offset.checked_add(self.size).ok_or_else(|| {
            malformed(format!(
                "section at offset {:#x} with size {:#x} overflows",
                self.offset, self.size
            ))
        })?;
        let end = usize::try_from(end)
            .map_err(|_| malformed(format!("section end {:#x} exceeds the address space", end)))?;
        Ok(self.offset as usize..end)
    }

    /// Borrows the section contents from `buf`.
    pub fn bytes<'a>(&self, buf: &'a [u8]) -> Result<&'a [u8], Error> {
        slice_at(buf, self.offset, self.size)
    }

    /// Copies the section contents out of `buf`.
    pub fn to_vec(&self, buf: &[u8]) -> Result<Vec<u8>, Error> {
        Ok(self.bytes(buf)?.to_vec())
    }
}

/// Iterates over the descriptors of the section table in table order.
///
/// Yields an error (and then stops) at the first descriptor that does not
/// fit in the buffer.
pub struct SectionIter<'a> {
    buf: &'a [u8],
    header: FileHeader,
    index: u16,
    failed: bool,
}

impl<'a> SectionIter<'a> {
    pub fn new(buf: &'a [u8], header: FileHeader) -> Self {
        SectionIter {
            buf,
            header,
            index: 0,
            failed: false,
        }
    }
}

impl Iterator for SectionIter<'_> {
    type Item = Result<SectionDescriptor, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.index >= self.header.section_count {
            return None;
        }
        let descriptor = SectionDescriptor::read(self.buf, &self.header, self.index);
        self.failed = descriptor.is_err();
        self.index += 1;
        Some(descriptor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.header.section_count.saturating_sub(self.index) as usize;
        (0, Some(remaining))
    }
}

/// Scans the section table for the first section called `name`.
///
/// Names are resolved through `strings`; the first descriptor whose name
/// matches wins, even if later descriptors carry the same name.
pub fn scan_sections(
    buf: &[u8],
    header: &FileHeader,
    strings: &StringTable<'_>,
    name: &str,
) -> Result<SectionRange, Error> {
    for (index, descriptor) in SectionIter::new(buf, *header).enumerate() {
        let descriptor = descriptor?;
        let section_name = strings.name_at(descriptor.name_offset);
        debug!(
            "Section {}: name={:?}, offset={:#x}, size={:#x}",
            index, section_name, descriptor.file_offset, descriptor.size
        );
        if section_name != name {
            continue;
        }

        checked_range(buf.len(), descriptor.file_offset, descriptor.size).map_err(|e| {
            malformed(format!(
                "contents of section {} ({}): {}",
                index,
                name,
                e.message()
            ))
        })?;
        return Ok(SectionRange::new(descriptor.file_offset, descriptor.size));
    }

    Err(Error::new(
        ErrorKind::SectionNotFound,
        format!(
            "no section named {} among {} section descriptors",
            name, header.section_count
        ),
    ))
}
