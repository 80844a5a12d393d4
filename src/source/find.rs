use std::io;
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};

use crate::error::BuildResult;

/// Every `.png` file below `dir`, at any depth, sorted by path
pub fn find_images(dir: impl AsRef<Path>) -> BuildResult<Vec<PathBuf>> {
    let dir = dir.as_ref();

    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a directory", dir.display()),
        )
        .into());
    }

    let root = Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{root}/**/*.png");

    let entries = glob(&pattern).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let mut paths = entries
        .map(|entry| entry.map_err(|e| e.into_error()))
        .collect::<Result<Vec<_>, io::Error>>()?;

    paths.retain(|path| path.is_file());
    paths.sort();

    Ok(paths)
}
