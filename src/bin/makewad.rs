use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use makewad::{build, lump, wad, BuildConfig, Progress};

/// Create a Quake1 WAD from a folder of PNG files
#[derive(Parser, Debug)]
#[command(name = "makewad", version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quantize every PNG under a directory into a WAD
    Build {
        /// Directory searched recursively for .png files
        #[arg(long, default_value_os_t = BuildConfig::default().texture_dir)]
        textures: PathBuf,

        /// Raw 768-byte palette lump
        #[arg(long, default_value_os_t = BuildConfig::default().palette_path)]
        palette: PathBuf,

        /// Where to write the WAD
        #[arg(long, default_value_os_t = BuildConfig::default().output_path)]
        output: PathBuf,
    },
    /// Print the directory of a WAD
    List { wad: PathBuf },
}

#[derive(Default)]
struct BarProgress {
    bar: Option<ProgressBar>,
}

impl Progress for BarProgress {
    fn begin(&mut self, name: &str, total: usize) {
        let style = ProgressStyle::with_template(
            "Processing {msg:15} [{bar:60}] {pos}/{len}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");

        let bar = ProgressBar::new(total as u64).with_style(style);
        bar.set_message(name.to_string());
        self.bar = Some(bar);
    }

    fn advance(&mut self, processed: usize, _total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_position(processed as u64);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    match Args::parse().command {
        Command::Build {
            textures,
            palette,
            output,
        } => {
            let config = BuildConfig {
                texture_dir: textures,
                palette_path: palette,
                output_path: output,
            };

            let summary = build(&config, &mut BarProgress::default())
                .with_context(|| {
                    format!("Failed to build {}", config.output_path.display())
                })?;

            info!(
                "{} textures, directory at offset {}",
                summary.texture_count,
                summary.layout.directory_offset()
            );
        }
        Command::List { wad } => list(&wad)?,
    }

    Ok(())
}

fn list(path: &Path) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("Could not open {}", path.display()))?;
    let mut cursor = BufReader::new(file);
    let mut parser = wad::Parser::new(&mut cursor)
        .with_context(|| format!("Bad WAD directory in {}", path.display()))?;

    let entries = parser.directory().to_vec();

    for entry in &entries {
        let name = entry.name_to_cstring();
        let name = name.to_string_lossy();
        print!("Entry `{}` at {}: ", name, entry.offset());

        match entry.kind() {
            lump::kind::MIPTEX => {
                let tex = parser
                    .parse_mip_texture(entry)
                    .with_context(|| format!("Bad texture `{name}`"))?;
                println!("Texture");

                for image in tex.mips() {
                    println!(
                        "\t{}x{}: {} bytes",
                        image.width(),
                        image.height(),
                        image.pixels().len()
                    );
                }
            }
            lump::kind::PALETTE => {
                parser
                    .parse_palette(entry)
                    .with_context(|| format!("Bad palette `{name}`"))?;
                println!("Palette");
                println!("\t{} bytes", entry.length());
            }
            kind => {
                println!("Unknown kind {:#04x}", kind);
                println!("\t{} bytes", entry.length());
            }
        }
    }

    Ok(())
}
