use std::io::{BufWriter, Cursor, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::common::{long, Progress};
use crate::error::{self, BuildResult};
use crate::lump::Texture;
use crate::palette::Palette;
use crate::source::{self, SourceImage};
use crate::wad::{Entry, MAGIC};

/// Where every lump landed in a serialized archive
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Layout {
    directory_offset: u32,
    entries: Vec<Entry>,
}

impl Layout {
    /// Offset of the first directory record, relative to the archive start
    pub fn directory_offset(&self) -> u32 {
        self.directory_offset
    }

    /// Directory records in archive order, textures first and the palette
    /// last
    pub fn entries(&self) -> &[Entry] {
        &self.entries[..]
    }
}

/// A collection of textures whose colors are mapped to a palette
#[derive(Clone, Debug)]
pub struct TextureWad {
    palette: Palette,
    textures: Vec<Texture>,
}

impl TextureWad {
    pub fn new(palette: Palette) -> Self {
        TextureWad {
            palette,
            textures: Vec::new(),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn textures(&self) -> &[Texture] {
        &self.textures[..]
    }

    /// Textures plus the trailing palette lump
    pub fn lump_count(&self) -> usize {
        self.textures.len() + 1
    }

    /// Quantize `image` against the palette right away and append it.  Images
    /// too small for four mip levels are refused before any pixel is touched.
    pub fn add(
        &mut self,
        image: &SourceImage,
        progress: &mut impl Progress,
    ) -> BuildResult<&Texture> {
        if image.is_undersized() {
            return Err(error::Build::UndersizedImage {
                name: image.name().to_string(),
                width: image.width(),
                height: image.height(),
            });
        }

        let texture = Texture::quantize(image, &mut self.palette, progress)?;

        debug!(
            "Added texture `{}` ({}x{})",
            texture.name(),
            texture.width(),
            texture.height()
        );

        self.textures.push(texture);
        Ok(&self.textures[self.textures.len() - 1])
    }

    /// Decode a PNG file and add it, named after the file stem
    pub fn add_file(
        &mut self,
        path: impl AsRef<Path>,
        progress: &mut impl Progress,
    ) -> BuildResult<&Texture> {
        let image = source::load_png(path)?;
        self.add(&image, progress)
    }

    /// Add every PNG under `dir`, recursively, in path order.  Returns how
    /// many textures were added.
    pub fn add_directory(
        &mut self,
        dir: impl AsRef<Path>,
        progress: &mut impl Progress,
    ) -> BuildResult<usize> {
        let paths = source::find_images(dir)?;

        for path in &paths {
            self.add_file(path, progress)?;
        }

        Ok(paths.len())
    }

    /// Write the archive: header with a placeholder directory offset, every
    /// texture lump, the palette lump, the directory, and finally the patched
    /// directory offset.  Offsets are relative to the sink position on entry
    /// and the sink is left at the end of the archive.
    pub fn write_to<W: Write + Seek>(
        &self,
        sink: &mut W,
    ) -> BuildResult<Layout> {
        let start = sink.stream_position()?;

        sink.write_all(&MAGIC)?;
        sink.write_all(&long(self.lump_count(), "lump count")?.to_le_bytes())?;

        let dir_offset_pos = sink.stream_position()?;
        // Placeholder until we come back to write the actual value
        sink.write_all(&[0u8; 4])?;

        let mut entries = Vec::with_capacity(self.lump_count());

        for texture in &self.textures {
            let offset = relative_position(sink, start)?;
            let block = texture.mip_block()?;
            sink.write_all(&block)?;
            let length = long(block.len(), "texture lump")?;
            entries.push(texture.directory_entry(offset, length));
        }

        let palette_offset = relative_position(sink, start)?;
        sink.write_all(&self.palette.to_bytes())?;
        entries.push(self.palette.directory_entry(palette_offset));

        let directory_offset = relative_position(sink, start)?;

        for entry in &entries {
            sink.write_all(&entry.to_bytes())?;
        }

        let end = sink.stream_position()?;
        sink.seek(SeekFrom::Start(dir_offset_pos))?;
        sink.write_all(&directory_offset.to_le_bytes())?;
        sink.seek(SeekFrom::Start(end))?;

        Ok(Layout {
            directory_offset,
            entries,
        })
    }

    /// Serialize the whole archive into memory
    pub fn to_bytes(&self) -> BuildResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Write the archive to `path`.  Bytes go to a temporary file next to
    /// `path` first, which only replaces `path` once fully written.
    pub fn to_file(&self, path: impl AsRef<Path>) -> BuildResult<Layout> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;

        let layout = {
            let mut writer = BufWriter::new(temp.as_file_mut());
            let layout = self.write_to(&mut writer)?;
            writer.flush()?;
            layout
        };

        temp.persist(path).map_err(|e| error::Build::Io(e.error))?;
        Ok(layout)
    }
}

fn relative_position(sink: &mut impl Seek, start: u64) -> BuildResult<u32> {
    let position = sink.stream_position()? - start;
    let position = usize::try_from(position)
        .map_err(|_| error::Build::TooLarge(format!("offset {position}")))?;
    long(position, "lump offset")
}
