use std::boxed::Box;
use std::mem::size_of;
use std::string::{String, ToString};

use log::warn;

use crate::common::{
    long, name_field, slice_to_cstring, truncate_name, Progress, NAME_LEN,
};
use crate::error::{self, BuildResult};
use crate::lump::kind;
use crate::palette::Palette;
use crate::source::SourceImage;
use crate::wad::{Entry, EntryConfig};

/// Every mip texture stores exactly this many levels
pub const MIP_LEVELS: usize = 4;

/// Smallest width and height for which every mip level is at least 1x1
pub const MIN_DIMENSION: u32 = 2 * (MIP_LEVELS as u32 - 1);

// Pixels quantized between progress reports
const PROGRESS_STRIDE: usize = 500;

/// Dimensions of mip `level`: level 0 is full size, level `n` divides both
/// sides by `2n`, rounding down
pub fn mip_dimensions(width: u32, height: u32, level: usize) -> (u32, u32) {
    if level == 0 {
        (width, height)
    } else {
        let divisor = 2 * level as u32;
        (width / divisor, height / divisor)
    }
}

/// An image reduced to indices into a palette
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Texture {
    name: String,
    width: u32,
    height: u32,
    pixels: Box<[u8]>,
}

impl Texture {
    /// Build a texture from already-quantized palette indices.  Names longer
    /// than 15 characters are truncated with a warning.
    pub fn from_indices(
        name: &str,
        width: u32,
        height: u32,
        pixels: Box<[u8]>,
    ) -> BuildResult<Self> {
        let pixel_ct = checked_pixel_count(name, width, height)?;

        if pixels.len() != pixel_ct {
            return Err(error::Build::BadImage(format!(
                "`{name}` has {} pixels, expected {width}x{height}",
                pixels.len()
            )));
        }

        Ok(Self::from_parts(checked_name(name), width, height, pixels))
    }

    pub(crate) fn from_parts(
        name: String,
        width: u32,
        height: u32,
        pixels: Box<[u8]>,
    ) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);

        Texture {
            name,
            width,
            height,
            pixels,
        }
    }

    /// Map every pixel of `image` to its nearest palette entry, row by row
    pub fn quantize(
        image: &SourceImage,
        palette: &mut Palette,
        progress: &mut impl Progress,
    ) -> BuildResult<Self> {
        let name = checked_name(image.name());
        checked_pixel_count(&name, image.width(), image.height())?;

        let source = image.pixels();
        let total = source.len();
        let mut pixels = vec![0u8; total].into_boxed_slice();

        progress.begin(&name, total);

        for (idx, (index, &pixel)) in
            pixels.iter_mut().zip(source.iter()).enumerate()
        {
            *index = palette.nearest_entry(pixel);

            if idx % PROGRESS_STRIDE == 0 {
                progress.advance(idx, total);
            }
        }

        progress.advance(total, total);
        progress.finish();

        Ok(Self::from_parts(name, image.width(), image.height(), pixels))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..]
    }

    /// Name as a null-padded 16-byte field
    pub fn name_field(&self) -> [u8; NAME_LEN] {
        name_field(&self.name)
    }

    /// Whether any mip level would come out with a zero side
    pub fn is_undersized(&self) -> bool {
        self.width < MIN_DIMENSION || self.height < MIN_DIMENSION
    }

    /// Nearest-neighbor copy at mip `level`.  Level 0 is an identical copy.
    pub fn downsample(&self, level: usize) -> Texture {
        if level >= MIP_LEVELS {
            panic!("Outside mip bounds ([0..{}])", MIP_LEVELS);
        }

        if level == 0 {
            return self.clone();
        }

        let (new_width, new_height) =
            mip_dimensions(self.width, self.height, level);
        let columns = nearest_steps(self.width, new_width);
        let rows = nearest_steps(self.height, new_height);
        let stride = self.width as usize;

        let pixels: Box<[u8]> = rows
            .iter()
            .flat_map(|&row| {
                columns.iter().map(move |&col| self.pixels[row * stride + col])
            })
            .collect();

        Texture::from_parts(self.name.clone(), new_width, new_height, pixels)
    }

    /// Serialize into a mip texture lump: name, dimensions, four offsets
    /// relative to the start of the lump, then each level's indices from
    /// largest to smallest.  The length of the returned block is the lump
    /// size recorded in the directory.
    pub fn mip_block(&self) -> BuildResult<Vec<u8>> {
        if self.is_undersized() {
            return Err(error::Build::UndersizedImage {
                name: self.name.clone(),
                width: self.width,
                height: self.height,
            });
        }

        let mips: [Texture; MIP_LEVELS] =
            core::array::from_fn(|level| self.downsample(level));

        let mut offsets = [0u32; MIP_LEVELS];
        let mut cursor = size_of::<MipTextureHead>();

        for (offset, mip) in offsets.iter_mut().zip(&mips) {
            *offset = long(cursor, "mip offset")?;
            cursor += mip.pixels.len();
        }

        long(cursor, "mip texture size")?;

        let head = MipTextureHead {
            name: self.name_field(),
            width: long(self.width as usize, "texture width")?,
            height: long(self.height as usize, "texture height")?,
            offsets,
        };

        let mut block = Vec::with_capacity(cursor);
        block.extend(head.to_bytes());

        for mip in &mips {
            block.extend_from_slice(mip.pixels());
        }

        Ok(block)
    }

    /// Directory record for this texture's lump of `length` bytes at
    /// `offset`
    pub fn directory_entry(&self, offset: u32, length: u32) -> Entry {
        Entry::new(EntryConfig {
            offset,
            length,
            lump_kind: kind::MIPTEX,
            name: self.name_field(),
        })
    }
}

fn checked_name(name: &str) -> String {
    match truncate_name(name) {
        Some(short) => {
            warn!("\"{name}\" will be truncated to \"{short}\"");
            short
        }
        None => name.to_string(),
    }
}

fn checked_pixel_count(name: &str, width: u32, height: u32) -> BuildResult<usize> {
    if width == 0 || height == 0 {
        return Err(error::Build::BadImage(format!(
            "`{name}` has no pixels ({width}x{height})"
        )));
    }

    usize::try_from(u64::from(width) * u64::from(height))
        .map_err(|_| error::Build::TooLarge(format!("`{name}` pixel count")))
}

// Source index sampled for each destination cell.  Positions are counted in
// halves of a destination cell starting half a source pixel in, and the
// remainder rounds up once it passes 127/255 of a cell, matching ChunkyPNG's
// `resample_nearest_neighbor`.
pub(crate) fn nearest_steps(from: u32, to: u32) -> Vec<usize> {
    let (from, to) = (u64::from(from), u64::from(to));
    let denominator = 2 * to;

    (0..to)
        .map(|i| {
            let scaled = (2 * i + 1) * from - to;
            let (index, residue) = (scaled / denominator, scaled % denominator);
            let round_up = 255 * residue > 127 * denominator;
            (index + u64::from(round_up)) as usize
        })
        .collect()
}

/// Fixed-size head of a mip texture lump
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct MipTextureHead {
    pub(crate) name: [u8; NAME_LEN],
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) offsets: [u32; MIP_LEVELS],
}

impl MipTextureHead {
    pub fn name(&self) -> [u8; NAME_LEN] {
        self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn offsets(&self) -> [u32; MIP_LEVELS] {
        self.offsets
    }

    pub fn to_bytes(&self) -> [u8; size_of::<MipTextureHead>()] {
        let mut bytes = [0u8; size_of::<MipTextureHead>()];
        let offsets = self.offsets;
        bytes[..16].copy_from_slice(&self.name);
        bytes[16..20].copy_from_slice(&self.width.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.height.to_le_bytes());

        for (i, offset) in offsets.iter().enumerate() {
            bytes[(24 + 4 * i)..(28 + 4 * i)]
                .copy_from_slice(&offset.to_le_bytes());
        }

        bytes
    }
}

impl TryFrom<[u8; size_of::<MipTextureHead>()]> for MipTextureHead {
    type Error = error::BinParse;

    fn try_from(
        bytes: [u8; size_of::<MipTextureHead>()],
    ) -> Result<Self, Self::Error> {
        let (name_bytes, rest) = bytes.split_at(NAME_LEN);
        let mut words = rest
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));

        let mut next = || words.next().unwrap_or_default();

        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(name_bytes);
        let width = next();
        let height = next();
        let offsets = [next(), next(), next(), next()];

        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(error::BinParse::Parse(format!(
                "Invalid dimensions {width}x{height}"
            )));
        }

        width
            .checked_mul(height)
            .ok_or(error::BinParse::Parse("Texture too large".to_string()))?;

        Ok(MipTextureHead {
            name,
            width,
            height,
            offsets,
        })
    }
}

/// A mip texture lump read back from an archive
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MipTexture {
    head: MipTextureHead,
    mips: [Texture; MIP_LEVELS],
}

impl MipTexture {
    pub(crate) fn from_parts(
        head: MipTextureHead,
        mips: [Texture; MIP_LEVELS],
    ) -> Self {
        MipTexture { head, mips }
    }

    pub fn head(&self) -> &MipTextureHead {
        &self.head
    }

    /// Name up to the first null byte, with invalid UTF-8 replaced
    pub fn name_to_string(&self) -> String {
        slice_to_cstring(&self.head.name)
            .to_string_lossy()
            .into_owned()
    }

    pub fn mip(&self, index: usize) -> &Texture {
        if index < MIP_LEVELS {
            &self.mips[index]
        } else {
            panic!("Outside mip bounds ([0..{}])", MIP_LEVELS);
        }
    }

    pub fn mips(&self) -> &[Texture] {
        &self.mips[..]
    }
}
