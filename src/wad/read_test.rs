use super::{Entry, Parser, TextureWad};
use crate::common::Rgba;
use crate::error;
use crate::lump::kind;
use crate::palette::{Palette, PaletteColor};
use crate::source::SourceImage;
use crate::Silent;
use std::io::Cursor;
use std::mem::size_of;

fn warm_palette() -> Palette {
    Palette::new(core::array::from_fn(|i| {
        let i = i as u8;
        PaletteColor::new(i, i / 2, i / 4)
    }))
}

fn striped(name: &str, width: u32, height: u32) -> SourceImage {
    let pixels = (0..width * height)
        .map(|i| {
            let v = ((i % width) * 16) as u8;
            Rgba::opaque(v, v / 2, v / 4)
        })
        .collect();

    SourceImage::new(name, width, height, pixels).unwrap()
}

fn built_wad() -> (TextureWad, Vec<u8>) {
    let mut wad = TextureWad::new(warm_palette());
    wad.add(&striped("stripes", 16, 8), &mut Silent).unwrap();
    wad.add(&striped("narrow", 6, 12), &mut Silent).unwrap();
    let bytes = wad.to_bytes().unwrap();
    (wad, bytes)
}

fn entry_bytes(offset: u32, length: u32, kind: u8, name: [u8; 16]) -> Vec<u8> {
    let mut entry = Vec::new();

    entry.extend(offset.to_le_bytes());
    entry.extend(length.to_le_bytes());
    entry.extend(length.to_le_bytes());
    entry.push(kind);
    entry.push(0u8);
    entry.extend([0; 2]);
    entry.extend(name);

    entry
}

#[test]
fn parse_built_archive() {
    let (wad, bytes) = built_wad();
    let layout = wad.write_to(&mut Cursor::new(Vec::new())).unwrap();
    let mut cursor = Cursor::new(bytes);
    let mut parser = Parser::new(&mut cursor).unwrap();

    assert_eq!(parser.head().entry_count(), 3);
    assert_eq!(parser.head().directory_offset(), layout.directory_offset());
    assert_eq!(parser.directory(), layout.entries());

    let entries = parser.directory().to_vec();

    for (entry, texture) in entries.iter().zip(wad.textures()) {
        assert_eq!(entry.kind(), kind::MIPTEX);

        let miptex = parser.parse_mip_texture(entry).unwrap();
        assert_eq!(miptex.name_to_string(), texture.name());

        for level in 0..4 {
            assert_eq!(miptex.mip(level), &texture.downsample(level));
        }
    }

    let palette = parser.parse_palette(&entries[2]).unwrap();
    assert_eq!(palette.to_bytes(), wad.palette().to_bytes());
}

#[test]
fn directory_offset_points_at_first_record() {
    let (wad, bytes) = built_wad();
    let dir_offset = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
    let start = dir_offset as usize;
    let raw: [u8; 32] = bytes[start..(start + size_of::<Entry>())]
        .try_into()
        .unwrap();

    let first = Entry::try_from(raw).unwrap();
    assert_eq!(first.offset(), 12);
    assert_eq!(first.name_to_string(), Ok(wad.textures()[0].name().into()));
    assert_eq!(bytes.len(), start + 3 * size_of::<Entry>());
}

#[test]
fn parse_empty_archive() {
    let bytes = TextureWad::new(warm_palette()).to_bytes().unwrap();
    let mut cursor = Cursor::new(bytes);
    let parser = Parser::new(&mut cursor).unwrap();

    assert_eq!(parser.head().entry_count(), 1);
    assert_eq!(parser.directory().len(), 1);
    assert_eq!(parser.directory()[0].kind(), kind::PALETTE);
}

#[test]
fn parse_archive_after_other_data() {
    let (_, bytes) = built_wad();
    let mut prefixed = b"junk".to_vec();
    prefixed.extend(&bytes);

    let mut cursor = Cursor::new(prefixed);
    cursor.set_position(4);
    let mut parser = Parser::new(&mut cursor).unwrap();
    let entry = parser.directory()[1];

    let miptex = parser.parse_mip_texture(&entry).unwrap();
    assert_eq!(miptex.name_to_string(), "narrow");
    assert_eq!(miptex.mip(3).width(), 1);
}

#[test]
fn parse_lump_of_wrong_kind() {
    let (_, bytes) = built_wad();
    let mut cursor = Cursor::new(bytes);
    let mut parser = Parser::new(&mut cursor).unwrap();
    let entries = parser.directory().to_vec();

    let e = parser.parse_palette(&entries[0]).unwrap_err();
    assert!(matches!(e, error::BinParse::Parse(_)));

    let e = parser.parse_mip_texture(&entries[2]).unwrap_err();
    assert!(matches!(e, error::BinParse::Parse(_)));
}

#[test]
fn parse_bad_magic_wad() {
    let mut wad_file = Cursor::new(b"WART\0\0\0\0\0\0\0\0");
    let e = Parser::new(&mut wad_file).unwrap_err();

    assert!(matches!(e, error::BinParse::Parse(_)));
}

#[test]
fn parse_bad_short_wad() {
    let mut wad_file = Cursor::new(b"WAD2");
    let e = Parser::new(&mut wad_file).unwrap_err();

    assert!(matches!(e, error::BinParse::Io(_)));
}

#[test]
fn parse_bad_directory() {
    let mut wad_file = Cursor::new(b"WAD2\x01\0\0\0\0\0\0\0");
    let e = Parser::new(&mut wad_file).unwrap_err();

    assert!(matches!(e, error::BinParse::Io(_)));
}

#[test]
fn parse_bad_compression_entry() {
    let mut wad = Vec::<u8>::new();
    wad.extend(b"WAD2\x01\0\0\0\x0c\0\0\0");
    let mut entry = entry_bytes(12, 0, kind::PALETTE, *b"compressed\0\0\0\0\0\0");
    entry[13] = 1;
    wad.extend(entry);
    let mut wad_file = Cursor::new(wad);
    let e = Parser::new(&mut wad_file).unwrap_err();

    assert!(matches!(e, error::BinParse::Parse(_)));
}

#[test]
fn parse_truncated_palette_lump() {
    let mut wad = Vec::<u8>::new();
    wad.extend(b"WAD2\x01\0\0\0\x0f\0\0\0");
    wad.extend(b"\xBA\xDB\xAD");
    wad.extend(entry_bytes(12, 768, kind::PALETTE, *b"PALETTE\0\0\0\0\0\0\0\0\0"));

    let mut wad_file = Cursor::new(wad);
    let mut parser = Parser::new(&mut wad_file).unwrap();
    let entry = parser.directory()[0];

    assert!(matches!(
        parser.parse_palette(&entry),
        Err(error::BinParse::Io(_))
    ));
}

#[test]
fn parse_mip_texture_larger_than_lump() {
    let mut lump = Vec::<u8>::new();
    lump.extend(*b"huge\0\0\0\0\0\0\0\0\0\0\0\0");
    lump.extend(65535u32.to_le_bytes());
    lump.extend(65535u32.to_le_bytes());

    for _ in 0..4 {
        lump.extend(40u32.to_le_bytes());
    }

    let mut wad = Vec::<u8>::new();
    wad.extend(b"WAD2\x01\0\0\0\x34\0\0\0");
    wad.extend(&lump);
    wad.extend(entry_bytes(12, 40, kind::MIPTEX, *b"huge\0\0\0\0\0\0\0\0\0\0\0\0"));

    let mut wad_file = Cursor::new(wad);
    let mut parser = Parser::new(&mut wad_file).unwrap();
    let entry = parser.directory()[0];

    assert!(matches!(
        parser.parse_mip_texture(&entry),
        Err(error::BinParse::Parse(_))
    ));
}
