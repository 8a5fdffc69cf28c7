// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! Extracts the executable payload (the `.text` section) of 64-bit
//! little-endian relocatable object files, so that kernel loaders can copy
//! raw instruction bytes into device memory without pulling in a full
//! object-file parser.
//!
//! Extraction is a single pass over a borrowed buffer:
//! header validation, header decoding, string table resolution and a section
//! table scan. Nothing is cached between calls.
//!
//! ```
//! # fn load(object: &[u8]) -> Result<(), ktext::Error> {
//! let text = ktext::extract_text_section(object, "kernel.o")?;
//! let instructions: &[u8] = text.bytes(object)?;
//! # let _ = instructions;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg_attr(not(feature = "std"), macro_use)]
extern crate alloc;

use log::info;

pub mod binary_layouts;
mod bytes;
mod error;
pub mod header;
pub mod kernel_binary;
#[cfg(feature = "std")]
pub mod loader;
pub mod section_table;
pub mod string_table;


pub use binary_layouts::{BinaryLayout, ObjectFileBinary, SectionAccessor, TextSectionOnlyBinary};
pub use bytes::{read_u16_le, read_u32_le, read_u64_le};
pub use error::{Error, ErrorKind};
pub use header::{validate_header, FileHeader};
pub use kernel_binary::KernelBinaryCache;
#[cfg(feature = "std")]
pub use loader::load_text_section;
pub use section_table::{scan_sections, SectionDescriptor, SectionIter, SectionRange};
pub use string_table::StringTable;

/// Name of the section holding the executable instructions.
pub const TEXT_SECTION_NAME: &str = ".text";

/// The location of the `.text` payload inside the object buffer.
pub type TextSection = SectionRange;

/// Locates the first section called `name` in the object file `buf`.
///
/// A file without section descriptors has no string table either
/// (`e_shstrndx` is `SHN_UNDEF`), so it is reported as missing the section
/// without looking at `e_shoff`.
pub fn find_section(buf: &[u8], name: &str) -> Result<SectionRange, Error> {
    let header = FileHeader::read(buf)?;
    if header.section_count == 0 {
        return Err(Error::new(
            ErrorKind::SectionNotFound,
            format!("no section named {}, the file has no section descriptors", name),
        ));
    }
    let strings = StringTable::resolve(buf, &header)?;
    scan_sections(buf, &header, &strings, name)
}

/// Locates the `.text` section of the object file `buf`.
///
/// `source` identifies the buffer (usually the object file path) in the
/// record logged on success.
pub fn extract_text_section(buf: &[u8], source: &str) -> Result<TextSection, Error> {
    let text = find_section(buf, TEXT_SECTION_NAME)?;
    info!(
        "Loaded .text section from {} (size: {} bytes)",
        source, text.size
    );
    Ok(text)
}

/// Borrows the `.text` payload of the object file `buf`.
pub fn text_section_bytes<'a>(buf: &'a [u8], source: &str) -> Result<&'a [u8], Error> {
    extract_text_section(buf, source)?.bytes(buf)
}
