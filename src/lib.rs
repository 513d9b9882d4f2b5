// src/lib.rs
//! # swmm-out
//!
//! A Rust library for reading SWMM (Storm Water Management Model) binary
//! output (`.out`) files: the epilogue-indexed container the simulation
//! engine writes its per-period results into.
//!
//! ## Features
//!
//! - 🚀 **Random access**: every query is offset arithmetic plus one small
//!   positioned read; files larger than memory stay cheap
//! - ✅ **O(1) validation**: head/tail magic, run error code, and period
//!   count are checked from the fixed 24-byte epilogue, never by scanning
//! - 📦 **Large-file safe**: all offsets are 64-bit; multi-gigabyte output
//!   files from long simulations are routine
//! - 🎯 **Type safe**: element classes and attribute codes are closed
//!   enums validated against the file's own variable counts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use swmm_out::*;
//!
//! fn main() -> Result<()> {
//!     let mut reader = OutReader::open("model.out")?;
//!
//!     println!("{} links, {} periods", reader.n_links()?, reader.n_periods()?);
//!
//!     // Name of the first node
//!     let name = reader.element_name(ElementType::Node, 0)?.to_string();
//!
//!     // Flow series for the first link over every period
//!     let n = reader.n_periods()?;
//!     let flows = reader.link_series(0, LinkAttribute::FlowRate, 0, n)?;
//!     println!("{name}: {} samples", flows.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! One `OutReader` drives one file cursor, so accessors take `&mut self`
//! and exclusive access is enforced by the borrow checker. Independent
//! opens of the same path each own their own cursor and may run in
//! parallel freely.

// Modules
pub mod error;
pub mod format;
pub mod reader;
pub mod types;

// Re-export commonly used types at the crate root for convenience
pub use error::{message_for_code, Result, SmoError};

// Type exports
pub use types::{
    ConcUnits, ElementCount, ElementType, FlowUnits, LinkAttribute, NodeAttribute,
    SubcatchAttribute, SystemAttribute,
};

// Format exports
pub use format::{Epilogue, FileHeader, ResultsLayout, VariableCounts};

// Reader exports
pub use reader::{OutReader, ReadSeek};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use swmm_out::prelude::*;
    //! ```

    pub use crate::error::{Result, SmoError};
    pub use crate::reader::OutReader;
    pub use crate::types::{
        ElementCount, ElementType, LinkAttribute, NodeAttribute, SubcatchAttribute,
        SystemAttribute,
    };
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
