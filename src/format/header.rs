// src/format/header.rs
use crate::error::{Result, SmoError};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// Leading header fields of a SWMM output file.
///
/// Follows the 4-byte magic number at offset zero. The version integer is
/// stored but not gated against a supported set; the engine has kept this
/// layout stable across releases.
#[derive(Debug, Clone, Copy)]
pub struct FileHeader {
    pub version: i32,
    pub flow_units_code: i32,
    pub n_subcatch: usize,
    pub n_nodes: usize,
    pub n_links: usize,
    pub n_polluts: usize,
}

impl FileHeader {
    /// Magic number written by the SWMM engine at both ends of the file.
    pub const MAGIC: i32 = 516114522;

    /// Read the six header integers. The stream must be positioned just
    /// past the leading magic number.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let version = reader.read_i32::<LittleEndian>()?;
        let flow_units_code = reader.read_i32::<LittleEndian>()?;
        let n_subcatch = reader.read_i32::<LittleEndian>()?;
        let n_nodes = reader.read_i32::<LittleEndian>()?;
        let n_links = reader.read_i32::<LittleEndian>()?;
        let n_polluts = reader.read_i32::<LittleEndian>()?;

        if n_subcatch < 0 || n_nodes < 0 || n_links < 0 || n_polluts < 0 {
            return Err(SmoError::CorruptFile);
        }

        Ok(FileHeader {
            version,
            flow_units_code,
            n_subcatch: n_subcatch as usize,
            n_nodes: n_nodes as usize,
            n_links: n_links as usize,
            n_polluts: n_polluts as usize,
        })
    }

    /// Total entries in the element-name table.
    pub fn name_count(&self) -> usize {
        self.n_subcatch + self.n_nodes + self.n_links + self.n_polluts
    }
}
