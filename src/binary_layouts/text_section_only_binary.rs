use crate::error::{malformed, Error};

use super::SectionAccessor;

/// The program buffer already holds nothing but the instruction bytes.
pub struct TextSectionOnlyBinary {}

impl SectionAccessor for TextSectionOnlyBinary {
    fn get_text_section<'a>(&self, program: &'a [u8]) -> Result<&'a [u8], Error> {
        if program.is_empty() {
            return Err(malformed("empty program, no instructions to load"));
        }
        Ok(program)
    }
}
