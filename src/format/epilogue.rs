// src/format/epilogue.rs
use crate::error::{Result, SmoError};
use crate::format::RECORD_SIZE;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// Fixed-size trailer at the end of every SWMM output file.
///
/// The epilogue carries the byte offsets of the three embedded regions,
/// the reporting period count, and two integrity fields. Reading it costs
/// two seeks and two small reads regardless of file size, so a
/// multi-gigabyte file validates as fast as a tiny one.
#[derive(Debug, Clone, Copy)]
pub struct Epilogue {
    /// Start of the element-name region.
    pub names_pos: u64,
    /// Start of the saved input-properties region.
    pub properties_pos: u64,
    /// Start of the per-period results region.
    pub results_pos: u64,
    /// Number of reporting periods stored.
    pub n_periods: u64,
    /// Error code left by the producing run; nonzero means the run
    /// terminated abnormally and the results are not trustworthy.
    pub error_code: i32,
    /// Trailing copy of the leading magic number.
    pub magic: i32,
}

impl Epilogue {
    /// Six 4-byte records at the tail of the file.
    pub const SIZE: u64 = 6 * RECORD_SIZE;

    /// Read the six trailing fields. Leaves the stream position just past
    /// end of file.
    pub fn read_from<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        reader.seek(SeekFrom::End(-(Self::SIZE as i64)))?;

        let names_pos = reader.read_i32::<LittleEndian>()?;
        let properties_pos = reader.read_i32::<LittleEndian>()?;
        let results_pos = reader.read_i32::<LittleEndian>()?;
        let n_periods = reader.read_i32::<LittleEndian>()?;
        let error_code = reader.read_i32::<LittleEndian>()?;
        let magic = reader.read_i32::<LittleEndian>()?;

        // Region offsets are written as signed ints; a negative one can only
        // come from a truncated or mangled file.
        if names_pos < 0 || properties_pos < 0 || results_pos < 0 {
            return Err(SmoError::CorruptFile);
        }

        Ok(Epilogue {
            names_pos: names_pos as u64,
            properties_pos: properties_pos as u64,
            results_pos: results_pos as u64,
            n_periods: n_periods.max(0) as u64,
            error_code,
            magic,
        })
    }

    /// Validate the stream as a complete, well-formed output file and
    /// return its epilogue.
    ///
    /// Checks in order: head magic equals tail magic (`CorruptFile`),
    /// at least one reporting period (`NoResults`), and a zero stored run
    /// error code (`CorruptFile`).
    pub fn validate<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let epilogue = Self::read_from(reader)?;

        reader.seek(SeekFrom::Start(0))?;
        let leading_magic = reader.read_i32::<LittleEndian>()?;

        if leading_magic != epilogue.magic {
            return Err(SmoError::CorruptFile);
        }
        if epilogue.n_periods == 0 {
            return Err(SmoError::NoResults);
        }
        if epilogue.error_code != 0 {
            return Err(SmoError::CorruptFile);
        }

        Ok(epilogue)
    }
}
