mod parse;
mod repr;

pub use parse::{parse_mip_texture, parse_mip_texture_within, read_raw};

pub use repr::{
    mip_dimensions, MipTexture, MipTextureHead, Texture, MIN_DIMENSION,
    MIP_LEVELS,
};

#[cfg(test)]
pub(crate) use repr::nearest_steps;

pub mod kind {
    pub const PALETTE: u8 = b'@';
    pub const MIPTEX: u8 = b'D';
}
