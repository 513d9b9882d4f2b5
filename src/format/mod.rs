// src/format/mod.rs
mod epilogue;
mod header;
mod layout;

pub use epilogue::Epilogue;
pub use header::FileHeader;
pub use layout::{ResultsLayout, VariableCounts};

/// Record unit for integers and floats in the file.
pub const RECORD_SIZE: u64 = 4;

/// Record unit for the encoded date double stored with each period.
pub const DATE_SIZE: u64 = 8;
