use makewad::{lump, wad, Palette};

use std::env::args;
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use png::{ColorType, Encoder};

// Writes every mip level of every texture in a WAD as an RGB PNG, colored
// through the archive's own palette, into `dump/`
fn main() {
    let wad_path = if let Some(wad_path) = args().nth(1) {
        wad_path
    } else {
        panic!("No arguments");
    };

    let file = File::open(wad_path).expect("Could not open file");
    let mut reader = BufReader::new(file);
    let mut parser = wad::Parser::new(&mut reader).unwrap();
    let entries = parser.directory().to_vec();

    let palette_entry = entries
        .iter()
        .find(|entry| entry.kind() == lump::kind::PALETTE)
        .expect("No palette lump");
    let palette = parser.parse_palette(palette_entry).unwrap();

    println!("Writing palette...");
    new_writer("PALETTE.lmp")
        .write_all(&palette.to_bytes())
        .unwrap();

    for entry in entries.iter().filter(|e| e.kind() == lump::kind::MIPTEX) {
        let name = entry.name_to_cstring();
        let name = name.to_string_lossy();

        let tex = parser
            .parse_mip_texture(entry)
            .map_err(|e| format!("`{}`: {}", name, e))
            .unwrap();

        println!("Writing texture `{}`...", name);

        for (idx, image) in tex.mips().iter().enumerate() {
            write_png(
                &format!("{}.{}", &name, idx),
                image.width(),
                image.pixels(),
                &palette,
            );
        }
    }
}

fn new_writer(file_name: &str) -> impl Write {
    let mut path = PathBuf::from("dump");
    create_dir_all(&path).unwrap();
    path.push(file_name);
    let file = File::create(path).unwrap();
    BufWriter::new(file)
}

fn write_png(name: &str, width: u32, pixels: &[u8], palette: &Palette) {
    let height = pixels.len() as u32 / width;
    let writer = new_writer(&format!("{}.png", name));
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    let mut writer = encoder.write_header().unwrap();

    let colors: Vec<u8> = pixels
        .iter()
        .flat_map(|&index| {
            let color = palette.color(index);
            [color.r(), color.g(), color.b()]
        })
        .collect();

    writer.write_image_data(&colors).unwrap();
}
