mod parse;
mod repr;

pub use parse::parse_palette;
pub use repr::{Palette, PaletteColor};

/// Number of colors in every palette
pub const COLOR_COUNT: usize = 256;

/// Size in bytes of a raw palette lump
pub const PALETTE_LEN: usize = COLOR_COUNT * 3;
