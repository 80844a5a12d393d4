use std::boxed::Box;
use std::io::{self, Read, Seek, SeekFrom};
use std::mem::size_of;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::common::slice_to_cstring;
use crate::error::{self, BinParseResult};
use crate::lump::{
    mip_dimensions, MipTexture, MipTextureHead, Texture, MIP_LEVELS,
};

// Initial buffer for raw reads
const READ_CHUNK: usize = 64 * 1024;

/// Attempt to parse bytes into a mip-mapped texture.  Level sizes follow
/// [`mip_dimensions`].
pub fn parse_mip_texture(
    cursor: &mut (impl Seek + Read),
) -> BinParseResult<MipTexture> {
    parse_mip_texture_within(cursor, u64::MAX)
}

/// Same as [`parse_mip_texture`], but fails before reading any pixels if a
/// mip level reaches past `lump_length` bytes from the lump start
pub fn parse_mip_texture_within(
    cursor: &mut (impl Seek + Read),
    lump_length: u64,
) -> BinParseResult<MipTexture> {
    let mut head_bytes = [0u8; size_of::<MipTextureHead>()];
    let lump_start = cursor.stream_position()?;

    cursor.read_exact(&mut head_bytes)?;

    let head = MipTextureHead::try_from(head_bytes)?;
    let offsets = head.offsets();

    for (level, &offset) in offsets.iter().enumerate() {
        let (width, height) = mip_dimensions(head.width(), head.height(), level);
        let end = u64::from(offset) + u64::from(width) * u64::from(height);

        if end > lump_length {
            return Err(error::BinParse::Parse(format!(
                "Mip level {level} ends at {end}, past lump length {lump_length}"
            )));
        }
    }

    let mut mips = Vec::with_capacity(offsets.len());

    for (level, offset) in offsets.into_iter().enumerate() {
        let (width, height) = mip_dimensions(head.width(), head.height(), level);
        let length = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| error::BinParse::Parse("Mip too large".to_string()))?;

        cursor.seek(SeekFrom::Start(
            lump_start
                .checked_add(offset.into())
                .ok_or(error::BinParse::Parse("Bad offset".to_string()))?,
        ))?;

        let pixels = read_raw(cursor, length)?;
        let name = slice_name(&head);
        mips.push(Texture::from_parts(name, width, height, pixels));
    }

    let mips: [Texture; MIP_LEVELS] = mips
        .try_into()
        .map_err(|_| error::BinParse::Parse("Missing mip levels".to_string()))?;

    Ok(MipTexture::from_parts(head, mips))
}

/// Read `length` bytes into a boxed slice.  The buffer grows with the data
/// actually read, so a bogus length fails at end of input instead of
/// allocating up front.
pub fn read_raw(
    reader: &mut impl Read,
    length: usize,
) -> BinParseResult<Box<[u8]>> {
    let mut bytes = Vec::with_capacity(length.min(READ_CHUNK));
    reader.take(length as u64).read_to_end(&mut bytes)?;

    if bytes.len() != length {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Expected {length} bytes, found {}", bytes.len()),
        )
        .into());
    }

    Ok(bytes.into_boxed_slice())
}

fn slice_name(head: &MipTextureHead) -> String {
    slice_to_cstring(&head.name())
        .to_string_lossy()
        .into_owned()
}
