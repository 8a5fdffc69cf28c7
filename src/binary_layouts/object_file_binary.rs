use crate::error::Error;
use crate::extract_text_section;
use crate::section_table::SectionRange;

use super::SectionAccessor;

/// Responsible for binaries that are relocatable object files emitted by
/// the kernel compiler. The file is parsed once on construction; accessing
/// the text section afterwards only slices the program buffer.
pub struct ObjectFileBinary {
    text_section: SectionRange,
}

impl ObjectFileBinary {
    pub fn new(program: &[u8], source: &str) -> Result<ObjectFileBinary, Error> {
        let text_section = extract_text_section(program, source)?;
        Ok(Self { text_section })
    }

    pub fn text_section(&self) -> SectionRange {
        self.text_section
    }
}

impl SectionAccessor for ObjectFileBinary {
    fn get_text_section<'a>(&self, program: &'a [u8]) -> Result<&'a [u8], Error> {
        self.text_section.bytes(program)
    }
}
