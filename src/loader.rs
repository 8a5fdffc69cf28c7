// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! Loading `.text` payloads straight from object files on disk.

use std::fs;
use std::path::Path;

use crate::error::{Error, ErrorKind};
use crate::extract_text_section;

/// Reads the object file at `path` and returns a copy of its `.text`
/// section.
pub fn load_text_section<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, Error> {
    let path = path.as_ref();
    let program = fs::read(path).map_err(|e| {
        Error::new(
            ErrorKind::ResourceUnavailable,
            format!("cannot read object file {}: {}", path.display(), e),
        )
    })?;

    let source = path.display().to_string();
    extract_text_section(&program, &source)?.to_vec(&program)
}
