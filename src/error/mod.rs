use std::io;
use std::string::String;

use thiserror::Error;

/// Failure while building an archive
#[derive(Debug, Error)]
pub enum Build {
    #[error("Palette needs 768 bytes, found {0}")]
    MalformedPalette(usize),

    #[error("Image `{name}` is {width}x{height}, mip levels need at least 6x6")]
    UndersizedImage {
        name: String,
        width: u32,
        height: u32,
    },

    #[error("Bad image: {0}")]
    BadImage(String),

    #[error("{0} does not fit in a WAD field")]
    TooLarge(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure while reading an archive back
#[derive(Debug, Error)]
pub enum BinParse {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{0}")]
    Parse(String),
}

impl From<String> for BinParse {
    fn from(msg: String) -> BinParse {
        BinParse::Parse(msg)
    }
}

pub type BuildResult<T> = Result<T, Build>;

pub type BinParseResult<T> = Result<T, BinParse>;
