// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! Packing of extracted kernel payloads into a single device-memory image.
//!
//! The packed image is laid out as
//!
//! ```text
//! [data_size: u64][num_kernels: u64][offset_0: u64] .. [offset_n-1: u64][bin_0] .. [bin_n-1]
//! ```
//!
//! where every `bin_i` is `[size: u64][payload]` and `offset_i` is relative to
//! the start of the first bin. `data_size` counts the bin region only. All
//! integers are little-endian.

use alloc::vec::Vec;
use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use crate::bytes::{read_u64_le, slice_at};
use crate::error::{malformed, Error, ErrorKind};

const CACHE_HEADER_SIZE: u64 = 16;
const OFFSET_SIZE: u64 = 8;
const BIN_SIZE_FIELD: u64 = 8;

#[derive(Debug, Clone, Default)]
pub struct KernelBinaryCache {
    offsets: Vec<u64>,
    data: Vec<u8>,
}

impl KernelBinaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a kernel payload and returns its index in the cache.
    pub fn push(&mut self, payload: &[u8]) -> usize {
        let offset = self.data.len();
        let mut size = [0u8; BIN_SIZE_FIELD as usize];
        LittleEndian::write_u64(&mut size, payload.len() as u64);
        self.data.extend_from_slice(&size);
        self.data.extend_from_slice(payload);
        self.offsets.push(offset as u64);

        debug!(
            "Kernel {} packed at offset {:#x} (size: {} bytes)",
            self.offsets.len() - 1,
            offset,
            payload.len()
        );
        self.offsets.len() - 1
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Size of the bin region, excluding the header and offset table.
    pub fn data_size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn total_size(&self) -> u64 {
        CACHE_HEADER_SIZE + self.offsets.len() as u64 * OFFSET_SIZE + self.data_size()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let bins_start = (self.total_size() - self.data_size()) as usize;
        let mut image = vec![0u8; bins_start];
        LittleEndian::write_u64(&mut image[0..8], self.data_size());
        LittleEndian::write_u64(&mut image[8..16], self.offsets.len() as u64);
        LittleEndian::write_u64_into(&self.offsets, &mut image[16..bins_start]);
        image.extend_from_slice(&self.data);
        image
    }

    /// Reads kernel `index` back out of a packed image.
    pub fn kernel_at(image: &[u8], index: usize) -> Result<&[u8], Error> {
        let data_size = read_u64_le(image, 0)?;
        let num_kernels = read_u64_le(image, 8)?;
        if index as u64 >= num_kernels {
            return Err(Error::new(
                ErrorKind::SectionNotFound,
                format!(
                    "kernel index {} out of range, cache holds {} kernels",
                    index, num_kernels
                ),
            ));
        }

        let bins_start = num_kernels
            .checked_mul(OFFSET_SIZE)
            .and_then(|table| table.checked_add(CACHE_HEADER_SIZE))
            .ok_or_else(|| malformed(format!("kernel count {} overflows", num_kernels)))?;
        let bins = slice_at(image, bins_start, data_size)
            .map_err(|e| malformed(format!("kernel bin region: {}", e.message())))?;

        let offset = read_u64_le(image, CACHE_HEADER_SIZE + index as u64 * OFFSET_SIZE)?;
        let size = read_u64_le(bins, offset)
            .map_err(|e| malformed(format!("kernel {} size field: {}", index, e.message())))?;
        slice_at(bins, offset + BIN_SIZE_FIELD, size)
            .map_err(|e| malformed(format!("kernel {} payload: {}", index, e.message())))
    }
}
