// src/reader/mod.rs
mod element_names;
mod sync_reader;

pub use element_names::ElementNames;
pub use sync_reader::{OutReader, ReadSeek};
