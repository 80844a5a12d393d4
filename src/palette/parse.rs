use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{Palette, PaletteColor, PALETTE_LEN};
use crate::error::{self, BuildResult};

/// Read a raw 768-byte palette.  Anything past the first 768 bytes is left
/// unread.
pub fn parse_palette(reader: &mut impl Read) -> BuildResult<Palette> {
    let mut bytes = Vec::with_capacity(PALETTE_LEN);
    reader.take(PALETTE_LEN as u64).read_to_end(&mut bytes)?;
    Palette::from_bytes(&bytes)
}

impl Palette {
    /// Build a palette from the first 768 bytes of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> BuildResult<Self> {
        if bytes.len() < PALETTE_LEN {
            return Err(error::Build::MalformedPalette(bytes.len()));
        }

        let colors = core::array::from_fn(|idx| {
            let rgb = &bytes[(3 * idx)..(3 * idx + 3)];
            PaletteColor::new(rgb[0], rgb[1], rgb[2])
        });

        Ok(Palette::new(colors))
    }

    pub fn from_file(path: impl AsRef<Path>) -> BuildResult<Self> {
        let file = File::open(path)?;
        parse_palette(&mut BufReader::new(file))
    }
}
