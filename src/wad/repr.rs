use std::ffi::{CString, IntoStringError};
use std::mem::size_of;
use std::string::{String, ToString};

use crate::common::{slice_to_cstring, Junk, NAME_LEN};
use crate::error;

pub const MAGIC: [u8; 4] = *b"WAD2";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct Head {
    magic: [u8; 4],
    entry_count: u32,
    directory_offset: u32,
}

impl Head {
    pub fn new(entry_count: u32, directory_offset: u32) -> Self {
        Head {
            magic: MAGIC,
            entry_count,
            directory_offset,
        }
    }

    pub fn entry_count(&self) -> u32 {
        self.entry_count
    }

    pub fn directory_offset(&self) -> u32 {
        self.directory_offset
    }
}

impl TryFrom<[u8; size_of::<Head>()]> for Head {
    type Error = error::BinParse;

    fn try_from(bytes: [u8; size_of::<Head>()]) -> Result<Self, Self::Error> {
        let (magic, rest) = bytes.split_at(4);

        if magic != &MAGIC[..] {
            let magic_str: String =
                MAGIC.iter().copied().map(char::from).collect();

            return Err(error::BinParse::Parse(format!(
                "Magic number does not match `{magic_str}`"
            )));
        }

        let (count_bytes, offset_bytes) = rest.split_at(4);
        let entry_count = le_u32(count_bytes);
        let directory_offset = le_u32(offset_bytes);

        Ok(Head::new(entry_count, directory_offset))
    }
}

/// Provides the location of a lump within a WAD archive, length of the lump,
/// name (16 bytes, null-terminated), and lump kind
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct Entry {
    offset: u32,
    length: u32,
    uncompressed_length: u32,
    lump_kind: u8,
    compression: u8, // always 0, compression is unsupported
    _padding: Junk<u16>,
    name: [u8; NAME_LEN],
}

impl Entry {
    pub(crate) fn new(config: EntryConfig) -> Entry {
        Entry {
            offset: config.offset,
            length: config.length,
            uncompressed_length: config.length,
            lump_kind: config.lump_kind,
            compression: 0u8,
            _padding: Junk::default(),
            name: config.name,
        }
    }

    /// Obtain the name as a C string.  If the name is not already
    /// null-terminated (in which case the entry is not well-formed) a null byte
    /// is appended to make a valid C string.
    pub fn name_to_cstring(&self) -> CString {
        slice_to_cstring(&self.name)
    }

    /// Attempt to interpret the name as UTF-8 encoded string
    pub fn name_to_string(&self) -> Result<String, IntoStringError> {
        self.name_to_cstring().into_string()
    }

    /// Name in raw bytes
    pub fn name(&self) -> [u8; NAME_LEN] {
        self.name
    }

    /// WAD offset of lump
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length of lump in bytes
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Always equal to [`Entry::length`]
    pub fn uncompressed_length(&self) -> u32 {
        self.uncompressed_length
    }

    /// Lump kind as a byte
    pub fn kind(&self) -> u8 {
        self.lump_kind
    }

    /// The 32-byte directory record
    pub fn to_bytes(&self) -> [u8; size_of::<Entry>()] {
        let mut bytes = [0u8; size_of::<Entry>()];
        bytes[0..4].copy_from_slice(&self.offset.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.length.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.uncompressed_length.to_le_bytes());
        bytes[12] = self.lump_kind;
        bytes[13] = self.compression;
        bytes[16..].copy_from_slice(&self.name);
        bytes
    }
}

impl TryFrom<[u8; size_of::<Entry>()]> for Entry {
    type Error = error::BinParse;

    // Attempt to read an entry from a block of bytes.  Fails if compression
    // flag is on (unsupported).
    fn try_from(bytes: [u8; size_of::<Entry>()]) -> Result<Self, Self::Error> {
        let offset = le_u32(&bytes[0..4]);
        let length = le_u32(&bytes[4..8]);
        let uncompressed_length = le_u32(&bytes[8..12]);
        let lump_kind = bytes[12];
        let compression = bytes[13];

        if compression != 0 {
            return Err(error::BinParse::Parse(
                "Compression is unsupported".to_string(),
            ));
        }

        if uncompressed_length != length {
            return Err(error::BinParse::Parse(format!(
                "Uncompressed length {uncompressed_length} != length {length}"
            )));
        }

        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&bytes[16..]);

        Ok(Entry::new(EntryConfig {
            offset,
            length,
            lump_kind,
            name,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntryConfig {
    pub offset: u32,
    pub length: u32,
    pub lump_kind: u8,
    pub name: [u8; NAME_LEN],
}

// Callers always pass exactly four bytes
fn le_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
