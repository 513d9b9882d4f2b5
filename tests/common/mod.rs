// tests/common/mod.rs
//! Fixture builder producing byte-exact SWMM output files in memory or on
//! disk, with a distinct float at every (time, class, element, attribute)
//! coordinate so offset mistakes surface as wrong values, not just panics.
#![allow(dead_code)] // not every test binary uses every helper

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write as _;
use tempfile::NamedTempFile;

pub const MAGIC: i32 = 516114522;

/// Class ordinal used by [`value_at`]: 0 subcatchment, 1 node, 2 link,
/// 3 system.
pub fn value_at(t: u64, class: usize, elem: usize, attr: usize) -> f32 {
    // Stays below 2^24 for every fixture in this suite, so the value is
    // exactly representable as f32.
    (((t as usize * 4 + class) * 100 + elem) * 100 + attr) as f32
}

pub struct FixtureBuilder {
    pub n_subcatch: usize,
    pub n_nodes: usize,
    pub n_links: usize,
    pub n_polluts: usize,
    pub subcatch_vars: usize,
    pub node_vars: usize,
    pub link_vars: usize,
    pub sys_vars: usize,
    pub n_periods: i32,
    pub flow_units: i32,
    pub start_date: f64,
    pub report_step: i32,
    pub error_code: i32,
    /// Concentration unit code per pollutant; defaults to mg/L.
    pub conc_units: Vec<i32>,
    /// Override for the trailing magic copy, for corruption fixtures.
    pub tail_magic: Option<i32>,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        FixtureBuilder {
            n_subcatch: 2,
            n_nodes: 3,
            n_links: 2,
            n_polluts: 0,
            subcatch_vars: 8,
            node_vars: 6,
            link_vars: 5,
            sys_vars: 14,
            n_periods: 4,
            flow_units: 4, // LPS
            start_date: 44_000.5,
            report_step: 300,
            error_code: 0,
            conc_units: Vec::new(),
            tail_magic: None,
        }
    }
}

impl FixtureBuilder {
    /// Small model with pollutant channels.
    pub fn with_pollutants(n: usize) -> Self {
        FixtureBuilder {
            n_polluts: n,
            subcatch_vars: 8 + n,
            node_vars: 6 + n,
            link_vars: 5 + n,
            conc_units: vec![0; n],
            ..Default::default()
        }
    }

    /// The 7/14/16/0 reference model with 10 periods (972 bytes each).
    pub fn reference_model() -> Self {
        FixtureBuilder {
            n_subcatch: 7,
            n_nodes: 14,
            n_links: 16,
            n_polluts: 0,
            subcatch_vars: 9,
            node_vars: 6,
            link_vars: 5,
            sys_vars: 14,
            n_periods: 10,
            ..Default::default()
        }
    }

    pub fn element_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for i in 0..self.n_subcatch {
            names.push(format!("SC{i}"));
        }
        for i in 0..self.n_nodes {
            names.push(format!("Junction-{i}"));
        }
        for i in 0..self.n_links {
            names.push(format!("Conduit-{i}"));
        }
        for i in 0..self.n_polluts {
            names.push(format!("POL{i}"));
        }
        names
    }

    pub fn period_timestamp(&self, t: u64) -> f64 {
        self.start_date + (t + 1) as f64 * self.report_step as f64 / 86_400.0
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::new();

        // leading magic + header
        buf.write_i32::<LittleEndian>(MAGIC).unwrap();
        buf.write_i32::<LittleEndian>(51_000).unwrap(); // version
        buf.write_i32::<LittleEndian>(self.flow_units).unwrap();
        buf.write_i32::<LittleEndian>(self.n_subcatch as i32).unwrap();
        buf.write_i32::<LittleEndian>(self.n_nodes as i32).unwrap();
        buf.write_i32::<LittleEndian>(self.n_links as i32).unwrap();
        buf.write_i32::<LittleEndian>(self.n_polluts as i32).unwrap();

        // names region
        let names_pos = buf.len() as i32;
        for name in self.element_names() {
            buf.write_i32::<LittleEndian>(name.len() as i32).unwrap();
            buf.write_all(name.as_bytes()).unwrap();
        }

        // pollutant concentration units sit right before the properties
        assert_eq!(self.conc_units.len(), self.n_polluts);
        for code in &self.conc_units {
            buf.write_i32::<LittleEndian>(*code).unwrap();
        }

        // saved input properties; content is irrelevant to the reader
        let properties_pos = buf.len() as i32;
        let skip = 4 * ((self.n_subcatch + 2)
            + (3 * self.n_nodes + 4)
            + (5 * self.n_links + 6));
        buf.extend(std::iter::repeat(0u8).take(skip));

        // reported variable counts, each followed by its attribute codes
        for count in [self.subcatch_vars, self.node_vars, self.link_vars] {
            buf.write_i32::<LittleEndian>(count as i32).unwrap();
            for code in 0..count {
                buf.write_i32::<LittleEndian>(code as i32).unwrap();
            }
        }
        buf.write_i32::<LittleEndian>(self.sys_vars as i32).unwrap();

        // start date + report step immediately precede the results
        buf.write_f64::<LittleEndian>(self.start_date).unwrap();
        buf.write_i32::<LittleEndian>(self.report_step).unwrap();

        let results_pos = buf.len() as i32;
        for t in 0..self.n_periods as u64 {
            buf.write_f64::<LittleEndian>(self.period_timestamp(t)).unwrap();
            for elem in 0..self.n_subcatch {
                for attr in 0..self.subcatch_vars {
                    buf.write_f32::<LittleEndian>(value_at(t, 0, elem, attr)).unwrap();
                }
            }
            for elem in 0..self.n_nodes {
                for attr in 0..self.node_vars {
                    buf.write_f32::<LittleEndian>(value_at(t, 1, elem, attr)).unwrap();
                }
            }
            for elem in 0..self.n_links {
                for attr in 0..self.link_vars {
                    buf.write_f32::<LittleEndian>(value_at(t, 2, elem, attr)).unwrap();
                }
            }
            for attr in 0..self.sys_vars {
                buf.write_f32::<LittleEndian>(value_at(t, 3, 0, attr)).unwrap();
            }
        }

        // epilogue
        buf.write_i32::<LittleEndian>(names_pos).unwrap();
        buf.write_i32::<LittleEndian>(properties_pos).unwrap();
        buf.write_i32::<LittleEndian>(results_pos).unwrap();
        buf.write_i32::<LittleEndian>(self.n_periods).unwrap();
        buf.write_i32::<LittleEndian>(self.error_code).unwrap();
        buf.write_i32::<LittleEndian>(self.tail_magic.unwrap_or(MAGIC)).unwrap();

        buf
    }

    pub fn write_temp(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&self.build()).unwrap();
        file.flush().unwrap();
        file
    }
}
