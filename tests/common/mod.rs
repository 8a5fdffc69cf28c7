// Shared helpers for building relocatable object files in integration tests.
//
// Mirrors the crate's internal test builder (`src/testing.rs`); keep the two
// in step.

#![allow(dead_code)]

use std::ops::Range;

pub const SHT_PROGBITS: u32 = 1;
pub const SHT_STRTAB: u32 = 3;
pub const SHF_ALLOC: u64 = 0x2;
pub const SHF_EXECINSTR: u64 = 0x4;

struct Section {
    name: String,
    sh_type: u32,
    flags: u64,
    data: Vec<u8>,
}

pub struct BuiltObject {
    pub bytes: Vec<u8>,
    /// File range of each section added to the builder, in insertion order.
    pub placements: Vec<Range<usize>>,
    pub section_table_offset: u64,
    pub string_table: Range<usize>,
}

impl BuiltObject {
    pub fn contents(&self, index: usize) -> &[u8] {
        &self.bytes[self.placements[index].clone()]
    }
}

/// Builds an ELF64 little-endian `ET_REL` file laid out as
/// `[header][section payloads][.shstrtab][section table]`, with a null
/// descriptor first and the `.shstrtab` descriptor last.
pub struct ObjectBuilder {
    sections: Vec<Section>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        ObjectBuilder {
            sections: Vec::new(),
        }
    }

    pub fn text(self, data: &[u8]) -> Self {
        self.typed_section(".text", SHT_PROGBITS, SHF_ALLOC | SHF_EXECINSTR, data)
    }

    pub fn data(self, name: &str, data: &[u8]) -> Self {
        self.typed_section(name, SHT_PROGBITS, SHF_ALLOC, data)
    }

    pub fn section(self, name: &str, data: &[u8]) -> Self {
        self.typed_section(name, SHT_PROGBITS, 0, data)
    }

    pub fn typed_section(mut self, name: &str, sh_type: u32, flags: u64, data: &[u8]) -> Self {
        self.sections.push(Section {
            name: name.to_string(),
            sh_type,
            flags,
            data: data.to_vec(),
        });
        self
    }

    pub fn build(&self) -> BuiltObject {
        let mut bytes = vec![0u8; 64];

        let mut placements = Vec::new();
        for section in &self.sections {
            align(&mut bytes, 8);
            let start = bytes.len();
            bytes.extend_from_slice(&section.data);
            placements.push(start..bytes.len());
        }

        let mut strtab = vec![0u8];
        let mut name_offsets = Vec::new();
        for section in &self.sections {
            name_offsets.push(strtab.len() as u32);
            strtab.extend_from_slice(section.name.as_bytes());
            strtab.push(0);
        }
        let shstrtab_name = strtab.len() as u32;
        strtab.extend_from_slice(b".shstrtab\0");

        let strtab_start = bytes.len();
        bytes.extend_from_slice(&strtab);
        let string_table = strtab_start..bytes.len();

        align(&mut bytes, 8);
        let shoff = bytes.len() as u64;

        // null descriptor
        bytes.extend_from_slice(&[0u8; 64]);
        for (i, section) in self.sections.iter().enumerate() {
            push_descriptor(
                &mut bytes,
                name_offsets[i],
                section.sh_type,
                section.flags,
                &placements[i],
            );
        }
        push_descriptor(&mut bytes, shstrtab_name, SHT_STRTAB, 0, &string_table);

        let shnum = (self.sections.len() + 2) as u16;
        write_header(&mut bytes, shoff, shnum, shnum - 1);

        BuiltObject {
            bytes,
            placements,
            section_table_offset: shoff,
            string_table,
        }
    }
}

pub fn write_header(buf: &mut [u8], shoff: u64, shnum: u16, shstrndx: u16) {
    buf[0..4].copy_from_slice(b"\x7fELF");
    // ELFCLASS64, little-endian, version 1
    buf[4] = 2;
    buf[5] = 1;
    buf[6] = 1;
    // ET_REL
    buf[16..18].copy_from_slice(&1u16.to_le_bytes());
    // EM_BPF
    buf[18..20].copy_from_slice(&247u16.to_le_bytes());
    buf[20..24].copy_from_slice(&1u32.to_le_bytes());
    buf[40..48].copy_from_slice(&shoff.to_le_bytes());
    buf[52..54].copy_from_slice(&64u16.to_le_bytes());
    buf[58..60].copy_from_slice(&64u16.to_le_bytes());
    buf[60..62].copy_from_slice(&shnum.to_le_bytes());
    buf[62..64].copy_from_slice(&shstrndx.to_le_bytes());
}

fn align(bytes: &mut Vec<u8>, to: usize) {
    while bytes.len() % to != 0 {
        bytes.push(0);
    }
}

fn push_descriptor(buf: &mut Vec<u8>, name: u32, sh_type: u32, flags: u64, range: &Range<usize>) {
    let mut desc = [0u8; 64];
    desc[0..4].copy_from_slice(&name.to_le_bytes());
    desc[4..8].copy_from_slice(&sh_type.to_le_bytes());
    desc[8..16].copy_from_slice(&flags.to_le_bytes());
    desc[24..32].copy_from_slice(&(range.start as u64).to_le_bytes());
    desc[32..40].copy_from_slice(&((range.end - range.start) as u64).to_le_bytes());
    desc[48..56].copy_from_slice(&1u64.to_le_bytes());
    buf.extend_from_slice(&desc);
}
