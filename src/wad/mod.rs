mod read;
mod repr;
mod write;

pub use read::Parser;

pub use repr::{Entry, Head, MAGIC};

pub(crate) use repr::EntryConfig;

pub use write::{Layout, TextureWad};



#[cfg(test)]
mod read_test;
