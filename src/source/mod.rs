mod decode;
mod find;

pub use self::decode::{decode_png, load_png};
pub use self::find::find_images;

use std::string::String;

use crate::common::Rgba;
use crate::error::{self, BuildResult};
use crate::lump::MIN_DIMENSION;

/// A decoded source image: row-major RGBA pixels plus the identifier the
/// texture will be named after
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SourceImage {
    name: String,
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl SourceImage {
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        pixels: Vec<Rgba>,
    ) -> BuildResult<Self> {
        let name = name.into();
        let expected = u64::from(width) * u64::from(height);

        if pixels.len() as u64 != expected {
            return Err(error::Build::BadImage(format!(
                "`{name}` has {} pixels, expected {width}x{height}",
                pixels.len()
            )));
        }

        Ok(SourceImage {
            name,
            width,
            height,
            pixels,
        })
    }

    /// An image where every pixel is `pixel`
    pub fn filled(
        name: impl Into<String>,
        width: u32,
        height: u32,
        pixel: Rgba,
    ) -> BuildResult<Self> {
        let count = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| error::Build::TooLarge("pixel count".into()))?;
        Self::new(name, width, height, vec![pixel; count])
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

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels[..]
    }

    /// Too small for every mip level to keep at least one pixel
    pub fn is_undersized(&self) -> bool {
        self.width < MIN_DIMENSION || self.height < MIN_DIMENSION
    }
}

#[cfg(test)]
mod source_test;
