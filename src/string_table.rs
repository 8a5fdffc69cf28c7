// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! Section-name string table (`.shstrtab`) resolution and lookup.

use alloc::string::String;
use log::debug;

use crate::bytes::slice_at;
use crate::error::{malformed, Error};
use crate::header::FileHeader;
use crate::section_table::SectionDescriptor;

/// A borrowed view of the section-name string table.
#[derive(Debug, Clone, Copy)]
pub struct StringTable<'a> {
    data: &'a [u8],
}

impl<'a> StringTable<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Locates the string table through the descriptor at
    /// `header.string_table_index` and borrows its bytes from `buf`.
    ///
    /// An index past the end of the section table is caught by the same
    /// bounds check as a truncated table.
    pub fn resolve(buf: &'a [u8], header: &FileHeader) -> Result<StringTable<'a>, Error> {
        let index = header.string_table_index;
        let descriptor = SectionDescriptor::read(buf, header, index)
            .map_err(|e| malformed(format!("string table descriptor: {}", e.message())))?;

        let data = slice_at(buf, descriptor.file_offset, descriptor.size).map_err(|e| {
            malformed(format!(
                "string table contents (section {}): {}",
                index,
                e.message()
            ))
        })?;

        debug!(
            "String table: section {}, offset {:#x}, size {:#x}",
            index, descriptor.file_offset, descriptor.size
        );

        Ok(StringTable { data })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the NUL-terminated name starting at `offset`.
    ///
    /// Never fails: a missing terminator ends the name at the end of the
    /// table, an offset outside the table yields an empty name, and bytes
    /// outside the ASCII range are dropped.
    pub fn name_at(&self, offset: u32) -> String {
        let start = offset as usize;
        if start >= self.data.len() {
            return String::new();
        }
        let remaining = &self.data[start..];
        let end = remaining
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(remaining.len());
        remaining[..end]
            .iter()
            .filter(|b| b.is_ascii())
            .map(|&b| b as char)
            .collect()
    }
}
