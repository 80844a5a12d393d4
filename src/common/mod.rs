use std::ffi::CString;

use crate::error::{self, BuildResult};

mod progress;

pub use progress::{Progress, Silent};

/// Width of every name field in the archive, null terminator included
pub const NAME_LEN: usize = 16;

/// Longest name that still leaves room for a null terminator
pub const MAX_NAME_LEN: usize = NAME_LEN - 1;

/// A 32-bit pixel packed as `0xRRGGBBAA`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba(u32::from_be_bytes([r, g, b, a]))
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    pub const fn channels(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub const fn r(self) -> u8 {
        self.channels()[0]
    }

    pub const fn g(self) -> u8 {
        self.channels()[1]
    }

    pub const fn b(self) -> u8 {
        self.channels()[2]
    }

    pub const fn a(self) -> u8 {
        self.channels()[3]
    }
}

#[derive(Clone, Copy)]
pub struct Junk<T: Copy + Default + Sized> {
    _value: T,
}

impl<T: Copy + Default> PartialEq<Junk<T>> for Junk<T> {
    fn eq(&self, _: &Junk<T>) -> bool {
        true
    }
}

impl<T: Copy + Default> Eq for Junk<T> {}

impl<T: Copy + Default> Default for Junk<T> {
    fn default() -> Self {
        Self {
            _value: T::default(),
        }
    }
}

impl<T: Copy + Default> core::fmt::Debug for Junk<T> {
    fn fmt(
        &self,
        _formatter: &mut core::fmt::Formatter,
    ) -> Result<(), core::fmt::Error> {
        Ok(())
    }
}

pub fn slice_to_cstring(slice: &[u8]) -> CString {
    let len = slice.iter().position(|&b| b == 0).unwrap_or(slice.len());

    CString::new(&slice[..len]).unwrap_or_default()
}

/// Cut `name` down to at most 15 characters, and to no more than 15 bytes
/// once encoded.  Returns `None` if the name already fits.
pub fn truncate_name(name: &str) -> Option<String> {
    let mut end = 0;

    for (count, (idx, ch)) in name.char_indices().enumerate() {
        if count == MAX_NAME_LEN || idx + ch.len_utf8() > MAX_NAME_LEN {
            return Some(String::from(&name[..end]));
        }

        end = idx + ch.len_utf8();
    }

    None
}

/// Null-pad a name into a fixed-width field.  Names must already be
/// truncated.
pub fn name_field(name: &str) -> [u8; NAME_LEN] {
    let mut field = [0u8; NAME_LEN];
    let bytes = name.as_bytes();
    field[..bytes.len()].copy_from_slice(bytes);
    field
}

/// Convert a size or offset to a value that fits a signed 32-bit field
pub fn long(value: usize, what: &str) -> BuildResult<u32> {
    i32::try_from(value)
        .map(|v| v as u32)
        .map_err(|_| error::Build::TooLarge(format!("{what} ({value})")))
}
