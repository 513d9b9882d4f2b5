// src/reader/element_names.rs
use crate::error::{Result, SmoError};
use crate::format::ResultsLayout;
use crate::types::ElementType;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// Element-name table stored at the start of the names region.
///
/// Names are length-prefixed strings concatenated in a fixed order:
/// subcatchments, then nodes, then links, then pollutants. The table is
/// loaded in one pass on first use and then held for the life of the
/// reader.
#[derive(Debug)]
pub struct ElementNames {
    names: Vec<String>,
    n_subcatch: usize,
    n_nodes: usize,
    n_links: usize,
    n_polluts: usize,
}

impl ElementNames {
    pub fn load_from<R: Read + Seek>(reader: &mut R, layout: &ResultsLayout) -> Result<Self> {
        let count = layout.n_subcatch + layout.n_nodes + layout.n_links + layout.n_polluts;
        let mut names = Vec::with_capacity(count);

        reader.seek(SeekFrom::Start(layout.names_pos))?;
        for _ in 0..count {
            let len = reader.read_i32::<LittleEndian>()?;
            if len < 0 {
                return Err(SmoError::CorruptFile);
            }
            let mut bytes = vec![0u8; len as usize];
            reader.read_exact(&mut bytes)?;
            let name = String::from_utf8(bytes).map_err(|_| SmoError::InvalidName)?;
            names.push(name);
        }

        Ok(ElementNames {
            names,
            n_subcatch: layout.n_subcatch,
            n_nodes: layout.n_nodes,
            n_links: layout.n_links,
            n_polluts: layout.n_polluts,
        })
    }

    /// Map a per-class index into the flat table. The system class shares
    /// the pollutant sub-range, matching the writer's concatenation order.
    fn flat_index(&self, class: ElementType, index: usize) -> Result<usize> {
        let (count, base) = match class {
            ElementType::Subcatchment => (self.n_subcatch, 0),
            ElementType::Node => (self.n_nodes, self.n_subcatch),
            ElementType::Link => (self.n_links, self.n_subcatch + self.n_nodes),
            ElementType::System => (
                self.n_polluts,
                self.n_subcatch + self.n_nodes + self.n_links,
            ),
        };
        if index >= count {
            return Err(SmoError::InvalidIndex { index, count });
        }
        Ok(base + index)
    }

    pub fn get(&self, class: ElementType, index: usize) -> Result<&str> {
        let idx = self.flat_index(class, index)?;
        Ok(&self.names[idx])
    }

    /// Name capped at `max_chars` characters, plus the true character
    /// length so the caller can detect truncation.
    pub fn get_limited(
        &self,
        class: ElementType,
        index: usize,
        max_chars: usize,
    ) -> Result<(&str, usize)> {
        let name = self.get(class, index)?;
        let true_len = name.chars().count();
        let end = name
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(name.len());
        Ok((&name[..end], true_len))
    }
}
