use std::boxed::Box;
use std::io::{self, Read, Seek, SeekFrom};
use std::mem::size_of;
use std::string::ToString;
use std::vec::Vec;

use crate::error::{self, BinParseResult};
use crate::lump::{self, MipTexture};
use crate::palette::{Palette, PALETTE_LEN};
use crate::wad::{Entry, Head};

/// Reads lumps out of a WAD2 archive through its directory
#[derive(Debug)]
pub struct Parser<'a, Reader: Seek + Read> {
    cursor: &'a mut Reader,
    start: u64,
    head: Head,
    directory: Vec<Entry>,
}

impl<'a, Reader: Seek + Read> Parser<'a, Reader> {
    /// Parse the header and directory.  Offsets are taken relative to the
    /// cursor position on entry.
    pub fn new(cursor: &'a mut Reader) -> BinParseResult<Self> {
        let start = cursor.stream_position()?;
        let (head, directory) = parse_directory(cursor, start)?;

        Ok(Self {
            cursor,
            start,
            head,
            directory,
        })
    }

    pub fn head(&self) -> Head {
        self.head
    }

    /// Entries in the order they appear in the directory
    pub fn directory(&self) -> &[Entry] {
        &self.directory[..]
    }

    pub fn parse_mip_texture(
        &mut self,
        entry: &Entry,
    ) -> BinParseResult<MipTexture> {
        self.check_kind(entry, lump::kind::MIPTEX)?;
        self.seek_to_entry(entry)?;
        lump::parse_mip_texture_within(self.cursor, entry.length().into())
    }

    pub fn parse_palette(&mut self, entry: &Entry) -> BinParseResult<Palette> {
        self.check_kind(entry, lump::kind::PALETTE)?;

        if entry.length() as usize != PALETTE_LEN {
            return Err(error::BinParse::Parse(format!(
                "Palette lump is {} bytes",
                entry.length()
            )));
        }

        let bytes = self.read_raw(entry)?;
        Palette::from_bytes(&bytes)
            .map_err(|e| error::BinParse::Parse(e.to_string()))
    }

    pub fn read_raw(&mut self, entry: &Entry) -> BinParseResult<Box<[u8]>> {
        self.seek_to_entry(entry)?;
        let length = usize::try_from(entry.length()).map_err(|_| {
            error::BinParse::Parse("Length too large".to_string())
        })?;
        lump::read_raw(self.cursor, length)
    }

    fn check_kind(&self, entry: &Entry, kind: u8) -> BinParseResult<()> {
        if entry.kind() == kind {
            Ok(())
        } else {
            Err(error::BinParse::Parse(format!(
                "Expected lump kind {:#04x}, found {:#04x}",
                kind,
                entry.kind()
            )))
        }
    }

    fn seek_to_entry(&mut self, entry: &Entry) -> BinParseResult<()> {
        let offset = self
            .start
            .checked_add(entry.offset().into())
            .ok_or(error::BinParse::Parse("Offset too large".to_string()))?;

        self.cursor.seek(SeekFrom::Start(offset))?;
        Ok(())
    }
}

fn parse_directory(
    cursor: &mut (impl Seek + Read),
    start: u64,
) -> BinParseResult<(Head, Vec<Entry>)> {
    let mut header_bytes = [0u8; size_of::<Head>()];
    cursor.read_exact(&mut header_bytes[..])?;
    let head = Head::try_from(header_bytes)?;
    let entry_ct = head.entry_count();

    let dir_pos = start
        .checked_add(head.directory_offset().into())
        .ok_or(error::BinParse::Parse("Offset too large".to_string()))?;

    cursor.seek(SeekFrom::Start(dir_pos))?;

    let capacity = usize::try_from(entry_ct).map_err(|_| {
        error::BinParse::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            "Too many entries",
        ))
    })?;

    // The count comes straight from the file
    let mut entries = Vec::<Entry>::with_capacity(capacity.min(4096));

    for _ in 0..entry_ct {
        const WAD_ENTRY_SIZE: usize = size_of::<Entry>();
        let mut entry_bytes = [0u8; WAD_ENTRY_SIZE];
        cursor.read_exact(&mut entry_bytes[..])?;
        entries.push(Entry::try_from(entry_bytes)?);
    }

    Ok((head, entries))
}
