use hashbrown::HashMap;

use super::{COLOR_COUNT, PALETTE_LEN};
use crate::common::{name_field, Rgba};
use crate::lump::kind;
use crate::wad::{Entry, EntryConfig};

/// Name given to the palette lump in the directory
pub const PALETTE_NAME: &str = "PALETTE";

/// One opaque palette color
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PaletteColor {
    r: u8,
    g: u8,
    b: u8,
    packed: Rgba,
}

impl PaletteColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        PaletteColor {
            r,
            g,
            b,
            packed: Rgba::opaque(r, g, b),
        }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    /// Packed form with alpha fixed at fully opaque
    pub fn to_rgba(&self) -> Rgba {
        self.packed
    }

    // Squared Euclidean distance over all four channels.  Skipping the square
    // root keeps the ordering, and so keeps which entry wins.
    fn distance_sq(&self, pixel: Rgba) -> u32 {
        self.packed
            .channels()
            .into_iter()
            .zip(pixel.channels())
            .map(|(ours, theirs)| {
                let d = i32::from(ours) - i32::from(theirs);
                (d * d) as u32
            })
            .sum()
    }
}

/// 256 colors that textures are quantized against
#[derive(Clone, Debug)]
pub struct Palette {
    colors: [PaletteColor; COLOR_COUNT],
    cache: HashMap<Rgba, u8>,
}

impl Palette {
    pub fn new(colors: [PaletteColor; COLOR_COUNT]) -> Self {
        Palette {
            colors,
            cache: HashMap::new(),
        }
    }

    pub fn colors(&self) -> &[PaletteColor] {
        &self.colors[..]
    }

    pub fn color(&self, index: u8) -> PaletteColor {
        self.colors[usize::from(index)]
    }

    /// Index of the closest color to `pixel`.  Fully transparent pixels always
    /// map to index 0; ties resolve to the lowest index.
    pub fn nearest_entry(&mut self, pixel: Rgba) -> u8 {
        if pixel.a() == 0 {
            return 0;
        }

        if let Some(&index) = self.cache.get(&pixel) {
            return index;
        }

        let mut best_match = 0u8;
        let mut best_distance = u32::MAX;

        for (idx, color) in self.colors.iter().enumerate() {
            let distance = color.distance_sq(pixel);

            if distance < best_distance {
                best_distance = distance;
                best_match = idx as u8;
            }
        }

        self.cache.insert(pixel, best_match);
        best_match
    }

    /// Number of distinct pixel values looked up so far
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Raw lump bytes: R, G, B for each entry in index order
    pub fn to_bytes(&self) -> [u8; PALETTE_LEN] {
        let mut bytes = [0u8; PALETTE_LEN];

        for (chunk, color) in bytes.chunks_exact_mut(3).zip(self.colors.iter())
        {
            chunk.copy_from_slice(&[color.r, color.g, color.b]);
        }

        bytes
    }

    /// Directory record for the palette lump starting at `offset`
    pub fn directory_entry(&self, offset: u32) -> Entry {
        Entry::new(EntryConfig {
            offset,
            length: PALETTE_LEN as u32,
            lump_kind: kind::PALETTE,
            name: name_field(PALETTE_NAME),
        })
    }
}
