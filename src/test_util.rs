use crate::common::Rgba;
use crate::palette::{Palette, PaletteColor};
use crate::source::SourceImage;

/// Palette where entry `i` is the grey `(i, i, i)`
pub fn greyscale() -> Palette {
    Palette::new(core::array::from_fn(|i| {
        let v = i as u8;
        PaletteColor::new(v, v, v)
    }))
}

pub fn grey_image(name: &str, width: u32, height: u32, value: u8) -> SourceImage {
    SourceImage::filled(name, width, height, Rgba::opaque(value, value, value))
        .unwrap()
}
