use std::path::PathBuf;

use log::info;

use crate::common::Progress;
use crate::error::BuildResult;
use crate::palette::Palette;
use crate::wad::{Layout, TextureWad};

/// Inputs and output of a WAD build
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BuildConfig {
    /// Searched recursively for `.png` files
    pub texture_dir: PathBuf,
    /// Raw 768-byte palette
    pub palette_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            texture_dir: PathBuf::from("textures"),
            palette_path: PathBuf::from("palettes/palette.lmp"),
            output_path: PathBuf::from("textures.wad"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BuildSummary {
    pub output_path: PathBuf,
    pub texture_count: usize,
    pub layout: Layout,
}

/// Load the palette, quantize every texture under the texture directory, and
/// write the archive
pub fn build(
    config: &BuildConfig,
    progress: &mut impl Progress,
) -> BuildResult<BuildSummary> {
    let palette = Palette::from_file(&config.palette_path)?;
    let mut wad = TextureWad::new(palette);
    let texture_count = wad.add_directory(&config.texture_dir, progress)?;

    info!("Building WAD...");
    let layout = wad.to_file(&config.output_path)?;
    info!("WAD successfully created at {}", config.output_path.display());

    Ok(BuildSummary {
        output_path: config.output_path.clone(),
        texture_count,
        layout,
    })
}
