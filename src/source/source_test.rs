use super::{decode_png, find_images, load_png, SourceImage};
use crate::common::Rgba;
use crate::error;
use std::fs;
use std::path::Path;

fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();

    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }

    out
}

fn write_png(path: &Path, width: u32, height: u32) {
    let data = vec![128u8; (width * height * 4) as usize];
    fs::write(path, encode_png(width, height, png::ColorType::Rgba, &data))
        .unwrap();
}

#[test]
fn decode_rgba_png() {
    let bytes = encode_png(2, 1, png::ColorType::Rgba, &[1, 2, 3, 4, 5, 6, 7, 8]);
    let image = decode_png("pair", &bytes[..]).unwrap();

    assert_eq!(image.name(), "pair");
    assert_eq!((image.width(), image.height()), (2, 1));
    assert_eq!(image.pixels(), &[Rgba::new(1, 2, 3, 4), Rgba::new(5, 6, 7, 8)][..]);
}

#[test]
fn decode_rgb_png_is_opaque() {
    let bytes = encode_png(1, 2, png::ColorType::Rgb, &[10, 20, 30, 40, 50, 60]);
    let image = decode_png("rgb", &bytes[..]).unwrap();

    assert_eq!(
        image.pixels(),
        &[Rgba::opaque(10, 20, 30), Rgba::opaque(40, 50, 60)][..]
    );
}

#[test]
fn decode_grayscale_pngs() {
    let bytes = encode_png(2, 1, png::ColorType::Grayscale, &[7, 250]);
    let image = decode_png("grey", &bytes[..]).unwrap();
    assert_eq!(image.pixels(), &[Rgba::opaque(7, 7, 7), Rgba::opaque(250, 250, 250)][..]);

    let bytes = encode_png(1, 1, png::ColorType::GrayscaleAlpha, &[90, 0]);
    let image = decode_png("ghost", &bytes[..]).unwrap();
    assert_eq!(image.pixels(), &[Rgba::new(90, 90, 90, 0)][..]);
}

#[test]
fn decode_garbage() {
    let e = decode_png("junk", &b"definitely not a png"[..]).unwrap_err();
    assert!(matches!(e, error::Build::BadImage(_)));
}

#[test]
fn load_png_names_after_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brick_wall.png");
    write_png(&path, 8, 6);

    let image = load_png(&path).unwrap();
    assert_eq!(image.name(), "brick_wall");
    assert_eq!((image.width(), image.height()), (8, 6));
    assert!(image.pixels().iter().all(|&p| p == Rgba::new(128, 128, 128, 128)));
}

#[test]
fn load_missing_png() {
    let dir = tempfile::tempdir().unwrap();
    let e = load_png(dir.path().join("nope.png")).unwrap_err();
    assert!(matches!(e, error::Build::Io(_)));
}

#[test]
fn find_images_recursive_and_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("sub")).unwrap();

    for name in ["b.png", "a.png", "sub/c.png"] {
        write_png(&root.join(name), 6, 6);
    }

    fs::write(root.join("notes.txt"), b"not an image").unwrap();

    let found = find_images(root).unwrap();
    assert_eq!(
        found,
        [root.join("a.png"), root.join("b.png"), root.join("sub/c.png")]
    );
}

#[test]
fn find_images_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(find_images(dir.path()).unwrap().is_empty());
}

#[test]
fn find_images_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let e = find_images(dir.path().join("gone")).unwrap_err();
    assert!(matches!(e, error::Build::Io(_)));
}

#[test]
fn source_image_rejects_mismatched_pixels() {
    let e = SourceImage::new("odd", 3, 3, vec![Rgba(0); 8]).unwrap_err();
    assert!(matches!(e, error::Build::BadImage(_)));
}

#[test]
fn undersized_source_images() {
    let pixel = Rgba::opaque(1, 2, 3);
    assert!(SourceImage::filled("small", 5, 64, pixel).unwrap().is_undersized());
    assert!(SourceImage::filled("flat", 64, 5, pixel).unwrap().is_undersized());
    assert!(!SourceImage::filled("ok", 6, 6, pixel).unwrap().is_undersized());
}
