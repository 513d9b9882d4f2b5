// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("unable to open output file {path}: {source}")]
    OpenFailed { path: PathBuf, source: io::Error },

    #[error("file is corrupt or the producing run terminated abnormally")]
    CorruptFile,

    #[error("output file contains no results")]
    NoResults,

    #[error("output file has not been opened")]
    NotOpen,

    #[error("invalid parameter or attribute code")]
    InvalidParameter,

    #[error("element index {index} out of range (count {count})")]
    InvalidIndex { index: usize, count: usize },

    #[error("time index {index} out of range ({n_periods} reporting periods)")]
    InvalidTimeIndex { index: u64, n_periods: u64 },

    #[error("requested result buffer is empty")]
    EmptyBuffer,

    #[error("invalid UTF-8 in element name table")]
    InvalidName,
}

impl SmoError {
    /// Numeric error code matching the EPA SWMM output API error table,
    /// or `None` for failures that have no counterpart there.
    pub fn code(&self) -> Option<u32> {
        match self {
            SmoError::EmptyBuffer => Some(411),
            SmoError::NotOpen => Some(412),
            SmoError::InvalidParameter => Some(421),
            SmoError::InvalidTimeIndex { .. } => Some(421),
            SmoError::InvalidIndex { .. } => Some(423),
            SmoError::OpenFailed { .. } => Some(434),
            SmoError::CorruptFile => Some(435),
            SmoError::NoResults => Some(436),
            SmoError::Io(_) | SmoError::InvalidName => None,
        }
    }
}

/// Message text for a numeric SWMM Output API error code.
pub fn message_for_code(code: u32) -> Option<&'static str> {
    match code {
        411 => Some("Input Error 411: no memory allocated for results."),
        412 => Some("Input Error 412: no results; binary file hasn't been opened."),
        421 => Some("Input Error 421: invalid parameter code."),
        423 => Some("Input Error 423: invalid element index."),
        434 => Some("File Error  434: unable to open binary output file."),
        435 => Some("File Error  435: run terminated; no results in binary file."),
        436 => Some("File Error  436: no results in binary file."),
        _ => None,
    }
}

pub type Result<T> = std::result::Result<T, SmoError>;
