// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! Bounds-checked little-endian field accessors.
//!
//! Every read performed by the extractor goes through these helpers, so a
//! corrupted offset surfaces as [`ErrorKind::MalformedFile`] instead of a
//! slice panic. Offsets are taken as `u64` because they come straight out of
//! 64-bit header fields; the arithmetic is checked before any narrowing.
//!
//! [`ErrorKind::MalformedFile`]: crate::ErrorKind::MalformedFile

use byteorder::{ByteOrder, LittleEndian};
use core::ops::Range;

use crate::error::{malformed, Error};

/// Returns the byte range `offset..offset + len` if it lies inside a buffer
/// of `buf_len` bytes.
pub fn checked_range(buf_len: usize, offset: u64, len: u64) -> Result<Range<usize>, Error> {
    let end = offset.checked_add(len).ok_or_else(|| {
        malformed(format!(
            "range at offset {:#x} with length {:#x} overflows",
            offset, len
        ))
    })?;
    if end > buf_len as u64 {
        return Err(malformed(format!(
            "range {:#x}..{:#x} exceeds buffer length {:#x}",
            offset, end, buf_len
        )));
    }
    // Both ends are bounded by `buf_len`, so they fit in a usize.
    Ok(offset as usize..end as usize)
}

/// Borrows `len` bytes starting at `offset`.
pub fn slice_at(buf: &[u8], offset: u64, len: u64) -> Result<&[u8], Error> {
    let range = checked_range(buf.len(), offset, len)?;
    Ok(&buf[range])
}

pub fn read_u16_le(buf: &[u8], offset: u64) -> Result<u16, Error> {
    Ok(LittleEndian::read_u16(slice_at(buf, offset, 2)?))
}

pub fn read_u32_le(buf: &[u8], offset: u64) -> Result<u32, Error> {
    Ok(LittleEndian::read_u32(slice_at(buf, offset, 4)?))
}

pub fn read_u64_le(buf: &[u8], offset: u64) -> Result<u64, Error> {
    Ok(LittleEndian::read_u64(slice_at(buf, offset, 8)?))
}
