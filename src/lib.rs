//! Build Quake WAD2 texture archives from RGBA images.  Every image is
//! quantized against a 256-color palette and stored as a four-level mip
//! texture, followed by the palette lump and a trailing directory.

pub mod build;
pub mod common;
pub mod error;
pub mod lump;
pub mod palette;
pub mod source;
pub mod wad;

#[cfg(test)]
mod test_util;

pub use build::{build, BuildConfig, BuildSummary};
pub use common::{Progress, Rgba, Silent};
pub use error::{BinParse, BinParseResult, Build as BuildError, BuildResult};
pub use palette::{Palette, PaletteColor};
pub use source::SourceImage;
pub use wad::TextureWad;
