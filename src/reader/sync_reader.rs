// src/reader/sync_reader.rs
use crate::error::{Result, SmoError};
use crate::format::{Epilogue, FileHeader, ResultsLayout, VariableCounts, RECORD_SIZE};
use crate::reader::element_names::ElementNames;
use crate::types::{
    ConcUnits, ElementCount, ElementType, FlowUnits, LinkAttribute, NodeAttribute,
    SubcatchAttribute, SystemAttribute,
};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::io::Cursor;

/// Trait alias for Read + Seek
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Random-access reader for one SWMM binary output file.
///
/// Opening validates the file, caches the header and epilogue fields, and
/// computes the per-period layout; every later query is a single seek plus
/// a small positioned read, so files far larger than memory stay cheap.
///
/// Every accessor takes `&mut self` because each read moves the shared
/// file cursor. That makes the one-caller-at-a-time contract of the
/// underlying handle a compile-time fact: to read the same file from
/// several threads, open it once per consumer.
#[derive(Debug)]
pub struct OutReader<R: ReadSeek> {
    file: Option<R>,
    layout: ResultsLayout,
    version: i32,
    flow_units_code: i32,
    start_date: f64,
    report_step: i32,
    element_names: Option<ElementNames>,
}

/// Constructor for standard file I/O
impl OutReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SmoError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::with_capacity(65536, file))
    }
}

/// Constructor for memory-mapped file I/O (requires "mmap" feature)
#[cfg(feature = "mmap")]
impl OutReader<Cursor<Mmap>> {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SmoError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_reader(Cursor::new(mmap))
    }
}

/// Generic implementation for all OutReader variants
impl<R: ReadSeek> OutReader<R> {
    /// Validate an already-open stream and read its metadata.
    ///
    /// The stream must behave like the whole file: position 0 is the
    /// leading magic number and the epilogue sits at the end.
    pub fn from_reader(mut file: R) -> Result<Self> {
        let epilogue = Epilogue::validate(&mut file)?;

        // validate() leaves the cursor just past the leading magic
        let header = FileHeader::read_from(&mut file)?;

        let vars = Self::read_variable_counts(&mut file, &header, &epilogue)?;

        let date_pos = epilogue
            .results_pos
            .checked_sub(3 * RECORD_SIZE)
            .ok_or(SmoError::CorruptFile)?;
        file.seek(SeekFrom::Start(date_pos))?;
        let start_date = file.read_f64::<LittleEndian>()?;
        let report_step = file.read_i32::<LittleEndian>()?;

        Ok(OutReader {
            file: Some(file),
            layout: ResultsLayout::new(&header, &epilogue, vars),
            version: header.version,
            flow_units_code: header.flow_units_code,
            start_date,
            report_step,
            element_names: None,
        })
    }

    /// Skip the saved input properties and read the four per-class
    /// reported-variable counts. The attribute code lists between them are
    /// positional and carry no extra information, so they are skipped.
    fn read_variable_counts(
        file: &mut R,
        header: &FileHeader,
        epilogue: &Epilogue,
    ) -> Result<VariableCounts> {
        let skip = ResultsLayout::properties_skip(header);
        file.seek(SeekFrom::Start(epilogue.properties_pos + skip))?;

        let subcatch = Self::read_count_skipping_codes(file)?;
        let node = Self::read_count_skipping_codes(file)?;
        let link = Self::read_count_skipping_codes(file)?;

        let system = file.read_i32::<LittleEndian>()?;
        if system < 0 {
            return Err(SmoError::CorruptFile);
        }

        Ok(VariableCounts {
            subcatch,
            node,
            link,
            system: system as usize,
        })
    }

    fn read_count_skipping_codes(file: &mut R) -> Result<usize> {
        let count = file.read_i32::<LittleEndian>()?;
        if count < 0 {
            return Err(SmoError::CorruptFile);
        }
        file.seek(SeekFrom::Current(count as i64 * RECORD_SIZE as i64))?;
        Ok(count as usize)
    }

    fn file(&mut self) -> Result<&mut R> {
        self.file.as_mut().ok_or(SmoError::NotOpen)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.file.is_none() {
            return Err(SmoError::NotOpen);
        }
        Ok(())
    }

    /// Whether the reader still holds its file handle.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Release the file handle and the cached name table.
    ///
    /// Safe to call more than once; later accessor calls fail with
    /// [`SmoError::NotOpen`].
    pub fn close(&mut self) -> Result<()> {
        self.file = None;
        self.element_names = None;
        Ok(())
    }

    // ---- project metadata ----------------------------------------------

    pub fn project_size(&self, which: ElementCount) -> Result<usize> {
        self.ensure_open()?;
        Ok(match which {
            ElementCount::Subcatchments => self.layout.n_subcatch,
            ElementCount::Nodes => self.layout.n_nodes,
            ElementCount::Links => self.layout.n_links,
            ElementCount::Pollutants => self.layout.n_polluts,
        })
    }

    pub fn n_subcatchments(&self) -> Result<usize> {
        self.project_size(ElementCount::Subcatchments)
    }

    pub fn n_nodes(&self) -> Result<usize> {
        self.project_size(ElementCount::Nodes)
    }

    pub fn n_links(&self) -> Result<usize> {
        self.project_size(ElementCount::Links)
    }

    pub fn n_pollutants(&self) -> Result<usize> {
        self.project_size(ElementCount::Pollutants)
    }

    /// File format version integer, stored but not gated.
    pub fn version(&self) -> Result<i32> {
        self.ensure_open()?;
        Ok(self.version)
    }

    /// Raw flow-unit code from the header.
    pub fn flow_units_code(&self) -> Result<i32> {
        self.ensure_open()?;
        Ok(self.flow_units_code)
    }

    pub fn flow_units(&self) -> Result<FlowUnits> {
        self.ensure_open()?;
        FlowUnits::from_code(self.flow_units_code).ok_or(SmoError::InvalidParameter)
    }

    /// Simulation start date as the engine's encoded real number: integer
    /// part is days since the engine epoch, fraction is time of day. The
    /// value is opaque to this crate; decoding is the caller's concern.
    pub fn start_date(&self) -> Result<f64> {
        self.ensure_open()?;
        Ok(self.start_date)
    }

    /// Reporting time step in seconds.
    pub fn report_step(&self) -> Result<i32> {
        self.ensure_open()?;
        Ok(self.report_step)
    }

    /// Number of reporting periods stored in the file.
    pub fn n_periods(&self) -> Result<u64> {
        self.ensure_open()?;
        Ok(self.layout.n_periods)
    }

    /// Number of reported variables per element of the given class.
    pub fn var_count(&self, class: ElementType) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.layout.var_count(class))
    }

    /// Layout constants computed at open time.
    pub fn layout(&self) -> Result<&ResultsLayout> {
        self.ensure_open()?;
        Ok(&self.layout)
    }

    /// Per-pollutant concentration unit codes, stored as the block of ints
    /// immediately before the properties region.
    pub fn pollutant_units(&mut self) -> Result<Vec<ConcUnits>> {
        self.ensure_open()?;
        let n = self.layout.n_polluts;
        if n == 0 {
            return Ok(Vec::new());
        }
        let offset = self
            .layout
            .properties_pos
            .checked_sub(n as u64 * RECORD_SIZE)
            .ok_or(SmoError::CorruptFile)?;

        let file = self.file()?;
        file.seek(SeekFrom::Start(offset))?;
        let mut units = Vec::with_capacity(n);
        for _ in 0..n {
            let code = file.read_i32::<LittleEndian>()?;
            units.push(ConcUnits::from_code(code).ok_or(SmoError::CorruptFile)?);
        }
        Ok(units)
    }

    // ---- element names -------------------------------------------------

    fn ensure_names(&mut self) -> Result<&ElementNames> {
        if self.element_names.is_none() {
            let file = self.file.as_mut().ok_or(SmoError::NotOpen)?;
            self.element_names = Some(ElementNames::load_from(file, &self.layout)?);
        }
        self.element_names.as_ref().ok_or(SmoError::NotOpen)
    }

    /// Name of one element. The first call loads the whole name table;
    /// later calls are served from the cache without touching the file.
    ///
    /// For [`ElementType::System`] the index addresses the pollutant
    /// sub-range, matching the writer's concatenation order.
    pub fn element_name(&mut self, class: ElementType, index: usize) -> Result<&str> {
        self.ensure_names()?.get(class, index)
    }

    /// Like [`element_name`](Self::element_name) but capped at `max_chars`
    /// characters; also returns the true length so truncation is
    /// detectable.
    pub fn element_name_limited(
        &mut self,
        class: ElementType,
        index: usize,
        max_chars: usize,
    ) -> Result<(&str, usize)> {
        self.ensure_names()?.get_limited(class, index, max_chars)
    }

    // ---- single values -------------------------------------------------

    fn read_value(
        &mut self,
        time_index: u64,
        class: ElementType,
        element_index: usize,
        attr_index: usize,
    ) -> Result<f32> {
        let offset = self
            .layout
            .value_offset(time_index, class, element_index, attr_index)?;
        let file = self.file()?;
        file.seek(SeekFrom::Start(offset))?;
        Ok(file.read_f32::<LittleEndian>()?)
    }

    pub fn subcatch_value(
        &mut self,
        time_index: u64,
        index: usize,
        attr: SubcatchAttribute,
    ) -> Result<f32> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::Subcatchment, attr.index(), attr.pollutant())?;
        self.read_value(time_index, ElementType::Subcatchment, index, attr.index())
    }

    pub fn node_value(
        &mut self,
        time_index: u64,
        index: usize,
        attr: NodeAttribute,
    ) -> Result<f32> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::Node, attr.index(), attr.pollutant())?;
        self.read_value(time_index, ElementType::Node, index, attr.index())
    }

    pub fn link_value(
        &mut self,
        time_index: u64,
        index: usize,
        attr: LinkAttribute,
    ) -> Result<f32> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::Link, attr.index(), attr.pollutant())?;
        self.read_value(time_index, ElementType::Link, index, attr.index())
    }

    pub fn system_value(&mut self, time_index: u64, attr: SystemAttribute) -> Result<f32> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::System, attr.index(), None)?;
        self.read_value(time_index, ElementType::System, 0, attr.index())
    }

    /// The stored date record at the head of one period block, in the same
    /// encoded-day units as [`start_date`](Self::start_date).
    pub fn period_timestamp(&mut self, time_index: u64) -> Result<f64> {
        self.ensure_open()?;
        let offset = self.layout.period_offset(time_index)?;
        let file = self.file()?;
        file.seek(SeekFrom::Start(offset))?;
        Ok(file.read_f64::<LittleEndian>()?)
    }

    /// Encoded date of one period derived by arithmetic alone:
    /// `start_date + (time_index + 1) * report_step` converted to days.
    /// The first period is reported one full step after the start date.
    pub fn period_date(&self, time_index: u64) -> Result<f64> {
        self.ensure_open()?;
        self.layout.check_time(time_index)?;
        let seconds = (time_index + 1) as f64 * self.report_step as f64;
        Ok(self.start_date + seconds / 86_400.0)
    }

    // ---- series --------------------------------------------------------

    fn series(
        &mut self,
        class: ElementType,
        element_index: usize,
        attr_index: usize,
        start_time: u64,
        length: u64,
    ) -> Result<Vec<f32>> {
        self.layout.check_element(class, element_index)?;
        self.layout.check_time(start_time)?;

        let length = length.min(self.layout.n_periods - start_time);
        if length == 0 {
            return Err(SmoError::EmptyBuffer);
        }

        // One value per period: period blocks interleave all elements, so
        // this is one seek + read per time step, the only safe stride.
        let mut out = vec![0.0f32; length as usize];
        for (k, slot) in out.iter_mut().enumerate() {
            *slot = self.read_value(start_time + k as u64, class, element_index, attr_index)?;
        }
        Ok(out)
    }

    /// Time series of one subcatchment attribute. `length` is clamped to
    /// the periods remaining after `start_time`.
    pub fn subcatch_series(
        &mut self,
        index: usize,
        attr: SubcatchAttribute,
        start_time: u64,
        length: u64,
    ) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::Subcatchment, attr.index(), attr.pollutant())?;
        self.series(
            ElementType::Subcatchment,
            index,
            attr.index(),
            start_time,
            length,
        )
    }

    /// Time series of one node attribute.
    pub fn node_series(
        &mut self,
        index: usize,
        attr: NodeAttribute,
        start_time: u64,
        length: u64,
    ) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::Node, attr.index(), attr.pollutant())?;
        self.series(ElementType::Node, index, attr.index(), start_time, length)
    }

    /// Time series of one link attribute.
    pub fn link_series(
        &mut self,
        index: usize,
        attr: LinkAttribute,
        start_time: u64,
        length: u64,
    ) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::Link, attr.index(), attr.pollutant())?;
        self.series(ElementType::Link, index, attr.index(), start_time, length)
    }

    /// Time series of one system-wide attribute.
    pub fn system_series(
        &mut self,
        attr: SystemAttribute,
        start_time: u64,
        length: u64,
    ) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::System, attr.index(), None)?;
        self.series(ElementType::System, 0, attr.index(), start_time, length)
    }

    // ---- one attribute across all elements -----------------------------

    fn attribute_across(
        &mut self,
        time_index: u64,
        class: ElementType,
        attr_index: usize,
    ) -> Result<Vec<f32>> {
        self.layout.check_time(time_index)?;
        let count = self.layout.element_count(class);
        let mut out = vec![0.0f32; count];
        for (k, slot) in out.iter_mut().enumerate() {
            *slot = self.read_value(time_index, class, k, attr_index)?;
        }
        Ok(out)
    }

    /// One subcatchment attribute for every subcatchment at one time step.
    pub fn subcatch_attribute(
        &mut self,
        time_index: u64,
        attr: SubcatchAttribute,
    ) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::Subcatchment, attr.index(), attr.pollutant())?;
        self.attribute_across(time_index, ElementType::Subcatchment, attr.index())
    }

    /// One node attribute for every node at one time step.
    pub fn node_attribute(&mut self, time_index: u64, attr: NodeAttribute) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::Node, attr.index(), attr.pollutant())?;
        self.attribute_across(time_index, ElementType::Node, attr.index())
    }

    /// One link attribute for every link at one time step.
    pub fn link_attribute(&mut self, time_index: u64, attr: LinkAttribute) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::Link, attr.index(), attr.pollutant())?;
        self.attribute_across(time_index, ElementType::Link, attr.index())
    }

    /// The single system value of one attribute at one time step, returned
    /// as a length-1 vector for symmetry with the other classes.
    pub fn system_attribute(
        &mut self,
        time_index: u64,
        attr: SystemAttribute,
    ) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.layout
            .check_attr(ElementType::System, attr.index(), None)?;
        self.attribute_across(time_index, ElementType::System, attr.index())
    }

    // ---- all attributes of one element ---------------------------------

    fn element_result(
        &mut self,
        time_index: u64,
        class: ElementType,
        element_index: usize,
    ) -> Result<Vec<f32>> {
        let offset = self
            .layout
            .element_offset(time_index, class, element_index)?;
        let count = self.layout.var_count(class);

        // All of one element's attributes at one time step are contiguous,
        // so this is a single positioned read.
        let mut out = vec![0.0f32; count];
        let file = self.file()?;
        file.seek(SeekFrom::Start(offset))?;
        file.read_f32_into::<LittleEndian>(&mut out)?;
        Ok(out)
    }

    /// Every reported attribute of one subcatchment at one time step.
    pub fn subcatch_result(&mut self, time_index: u64, index: usize) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.element_result(time_index, ElementType::Subcatchment, index)
    }

    /// Every reported attribute of one node at one time step.
    pub fn node_result(&mut self, time_index: u64, index: usize) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.element_result(time_index, ElementType::Node, index)
    }

    /// Every reported attribute of one link at one time step.
    pub fn link_result(&mut self, time_index: u64, index: usize) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.element_result(time_index, ElementType::Link, index)
    }

    /// Every system-wide attribute at one time step.
    pub fn system_result(&mut self, time_index: u64) -> Result<Vec<f32>> {
        self.ensure_open()?;
        self.element_result(time_index, ElementType::System, 0)
    }
}
