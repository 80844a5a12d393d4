use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use png::{ColorType, Decoder, Transformations};

use super::SourceImage;
use crate::common::Rgba;
use crate::error::{self, BuildResult};

/// Decode the PNG at `path`, naming the image after the file stem
pub fn load_png(path: impl AsRef<Path>) -> BuildResult<SourceImage> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = File::open(path)?;

    decode_png(name, BufReader::new(file)).map_err(|e| match e {
        error::Build::BadImage(msg) => {
            error::Build::BadImage(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

/// Decode PNG data of any color type or bit depth into 8-bit RGBA
pub fn decode_png(
    name: impl Into<String>,
    reader: impl Read,
) -> BuildResult<SourceImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());

    let mut reader = decoder.read_info().map_err(bad_png)?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(bad_png)?;
    let bytes = &buf[..info.buffer_size()];

    let pixels: Vec<Rgba> = match info.color_type {
        ColorType::Rgba => bytes
            .chunks_exact(4)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect(),
        ColorType::Rgb => bytes
            .chunks_exact(3)
            .map(|p| Rgba::opaque(p[0], p[1], p[2]))
            .collect(),
        ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .map(|p| Rgba::new(p[0], p[0], p[0], p[1]))
            .collect(),
        ColorType::Grayscale => {
            bytes.iter().map(|&v| Rgba::opaque(v, v, v)).collect()
        }
        ColorType::Indexed => {
            return Err(error::Build::BadImage(
                "indexed PNG was not expanded".into(),
            ))
        }
    };

    SourceImage::new(name, info.width, info.height, pixels)
}

fn bad_png(err: png::DecodingError) -> error::Build {
    match err {
        png::DecodingError::IoError(e) => error::Build::Io(e),
        other => error::Build::BadImage(other.to_string()),
    }
}
