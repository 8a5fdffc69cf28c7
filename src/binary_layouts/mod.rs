//! This module defines the supported layouts of the kernel binaries that are
//! handed to the device loader:
//! - a relocatable object file straight out of the compiler. The executable
//!   instructions have to be sliced out of its `.text` section before they
//!   can be copied to device memory.
//! - only the `.text` section - the binary has already been stripped down to
//!   the raw instruction bytes and is used as-is.
//!
//! Callers that accept both kinds of input use [`BinaryLayout::detect`] to
//! pick the right strategy and then only talk to the [`SectionAccessor`]
//! trait, so the rest of the loading path does not care which layout it got.

use crate::error::Error;
use crate::header::ELF_MAGIC;

mod object_file_binary;
pub use self::object_file_binary::ObjectFileBinary;

mod text_section_only_binary;
pub use self::text_section_only_binary::TextSectionOnlyBinary;

/// Implementations of this trait provide access to the executable
/// instructions of a kernel binary, whatever layout it was shipped in.
pub trait SectionAccessor {
    fn get_text_section<'a>(&self, program: &'a [u8]) -> Result<&'a [u8], Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryLayout {
    ObjectFile,
    TextSectionOnly,
}

impl BinaryLayout {
    /// Anything that starts with the ELF magic is treated as an object file;
    /// everything else is assumed to be raw instruction bytes.
    pub fn detect(program: &[u8]) -> BinaryLayout {
        if program.starts_with(&ELF_MAGIC) {
            BinaryLayout::ObjectFile
        } else {
            BinaryLayout::TextSectionOnly
        }
    }

    /// Builds the accessor for `program` and returns its instruction bytes.
    pub fn text_section<'a>(&self, program: &'a [u8], source: &str) -> Result<&'a [u8], Error> {
        match self {
            BinaryLayout::ObjectFile => {
                ObjectFileBinary::new(program, source)?.get_text_section(program)
            }
            BinaryLayout::TextSectionOnly => TextSectionOnlyBinary {}.get_text_section(program),
        }
    }
}
