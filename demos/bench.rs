use std::time::Duration;

use benchmarking::measure_function_with_times;

use makewad::{Palette, PaletteColor, Rgba, Silent, SourceImage, TextureWad};

const SIDE: u32 = 256;

fn palette() -> Palette {
    Palette::new(core::array::from_fn(|i| {
        let i = i as u8;
        PaletteColor::new(i, i.wrapping_mul(3), i.wrapping_mul(7))
    }))
}

// Every pixel distinct, so the lookup cache never helps
fn noisy_image() -> SourceImage {
    let pixels = (0..SIDE * SIDE)
        .map(|i| {
            Rgba::opaque((i % 251) as u8, (i / 7 % 241) as u8, (i / 13) as u8)
        })
        .collect();

    SourceImage::new("noise", SIDE, SIDE, pixels).unwrap()
}

fn flat_image() -> SourceImage {
    SourceImage::filled("flat", SIDE, SIDE, Rgba::opaque(90, 60, 30)).unwrap()
}

fn measure_build(image: &SourceImage) -> Duration {
    let image = image.clone();

    let results = measure_function_with_times(3, move |measurer| {
        measurer.measure(|| {
            let mut wad = TextureWad::new(palette());
            wad.add(&image, &mut Silent).unwrap();
            let _ = wad.to_bytes().unwrap();
        });
    })
    .unwrap();

    results.elapsed()
}

fn main() {
    let noisy = noisy_image();
    let flat = flat_image();

    println!("Noisy {SIDE}x{SIDE}: {:?}", measure_build(&noisy));
    println!("Flat {SIDE}x{SIDE}: {:?}", measure_build(&flat));
}
