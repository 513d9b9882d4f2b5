// src/format/layout.rs
use crate::error::{Result, SmoError};
use crate::format::{Epilogue, FileHeader, DATE_SIZE, RECORD_SIZE};
use crate::types::ElementType;

/// Number of reported variables per element class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableCounts {
    pub subcatch: usize,
    pub node: usize,
    pub link: usize,
    pub system: usize,
}

/// Cached layout constants for one output file, plus all of the offset
/// arithmetic the accessors rely on.
///
/// Every computed offset is `u64`; output files routinely exceed 4 GiB, so
/// none of this math may pass through a 32-bit intermediate. All bounds
/// checks live here so that the I/O layer never seeks outside the results
/// region.
#[derive(Debug, Clone)]
pub struct ResultsLayout {
    pub n_subcatch: usize,
    pub n_nodes: usize,
    pub n_links: usize,
    pub n_polluts: usize,
    pub vars: VariableCounts,
    pub names_pos: u64,
    pub properties_pos: u64,
    pub results_pos: u64,
    pub n_periods: u64,
    pub bytes_per_period: u64,
}

impl ResultsLayout {
    pub fn new(header: &FileHeader, epilogue: &Epilogue, vars: VariableCounts) -> Self {
        let values_per_period = header.n_subcatch as u64 * vars.subcatch as u64
            + header.n_nodes as u64 * vars.node as u64
            + header.n_links as u64 * vars.link as u64
            + vars.system as u64;
        let bytes_per_period = DATE_SIZE + RECORD_SIZE * values_per_period;

        ResultsLayout {
            n_subcatch: header.n_subcatch,
            n_nodes: header.n_nodes,
            n_links: header.n_links,
            n_polluts: header.n_polluts,
            vars,
            names_pos: epilogue.names_pos,
            properties_pos: epilogue.properties_pos,
            results_pos: epilogue.results_pos,
            n_periods: epilogue.n_periods,
            bytes_per_period,
        }
    }

    /// Bytes of saved per-element input properties (subcatchment area,
    /// node type/invert/max depth, link type/offsets/max depth/length)
    /// sitting between `properties_pos` and the reported-variable counts.
    pub fn properties_skip(header: &FileHeader) -> u64 {
        RECORD_SIZE
            * ((header.n_subcatch as u64 + 2)
                + (3 * header.n_nodes as u64 + 4)
                + (5 * header.n_links as u64 + 6))
    }

    /// Number of elements in a class; the system class always has one.
    pub fn element_count(&self, class: ElementType) -> usize {
        match class {
            ElementType::Subcatchment => self.n_subcatch,
            ElementType::Node => self.n_nodes,
            ElementType::Link => self.n_links,
            ElementType::System => 1,
        }
    }

    /// Number of reported variables per element of a class.
    pub fn var_count(&self, class: ElementType) -> usize {
        match class {
            ElementType::Subcatchment => self.vars.subcatch,
            ElementType::Node => self.vars.node,
            ElementType::Link => self.vars.link,
            ElementType::System => self.vars.system,
        }
    }

    /// Cumulative value count of all classes stored before `class` within
    /// one period block.
    fn class_base(&self, class: ElementType) -> u64 {
        let subcatch = self.n_subcatch as u64 * self.vars.subcatch as u64;
        let node = self.n_nodes as u64 * self.vars.node as u64;
        let link = self.n_links as u64 * self.vars.link as u64;
        match class {
            ElementType::Subcatchment => 0,
            ElementType::Node => subcatch,
            ElementType::Link => subcatch + node,
            ElementType::System => subcatch + node + link,
        }
    }

    pub fn check_time(&self, time_index: u64) -> Result<()> {
        if time_index >= self.n_periods {
            return Err(SmoError::InvalidTimeIndex {
                index: time_index,
                n_periods: self.n_periods,
            });
        }
        Ok(())
    }

    pub fn check_element(&self, class: ElementType, index: usize) -> Result<()> {
        let count = self.element_count(class);
        if index >= count {
            return Err(SmoError::InvalidIndex { index, count });
        }
        Ok(())
    }

    /// Reject an attribute position outside the class's per-period block,
    /// and a pollutant slot beyond the tracked pollutant count.
    pub fn check_attr(
        &self,
        class: ElementType,
        attr_index: usize,
        pollutant: Option<usize>,
    ) -> Result<()> {
        if let Some(p) = pollutant {
            if p >= self.n_polluts {
                return Err(SmoError::InvalidParameter);
            }
        }
        if attr_index >= self.var_count(class) {
            return Err(SmoError::InvalidParameter);
        }
        Ok(())
    }

    /// Offset of the period's leading date record.
    pub fn period_offset(&self, time_index: u64) -> Result<u64> {
        self.check_time(time_index)?;
        Ok(self.results_pos + time_index * self.bytes_per_period)
    }

    /// Offset of one float value at (time, class, element, attribute).
    pub fn value_offset(
        &self,
        time_index: u64,
        class: ElementType,
        element_index: usize,
        attr_index: usize,
    ) -> Result<u64> {
        self.check_element(class, element_index)?;
        let base = self.element_offset(time_index, class, element_index)?;
        Ok(base + RECORD_SIZE * attr_index as u64)
    }

    /// Offset of the first of an element's `var_count` contiguous values
    /// at one time step.
    pub fn element_offset(
        &self,
        time_index: u64,
        class: ElementType,
        element_index: usize,
    ) -> Result<u64> {
        self.check_time(time_index)?;
        self.check_element(class, element_index)?;
        let values = self.class_base(class)
            + element_index as u64 * self.var_count(class) as u64;
        Ok(self.results_pos
            + time_index * self.bytes_per_period
            + DATE_SIZE
            + RECORD_SIZE * values)
    }
}
