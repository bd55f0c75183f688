use crate::config::{TA_ARGLIST, TA_TYPE, TA_VARTYPE, TRAILER_PREFIX, TYPE_FUNCTION};

/// A free function found in the summary. Fields are raw bytes because the
/// summary is not guaranteed to be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub name: Vec<u8>,
    pub return_type: Vec<u8>,
    pub param_list: Vec<u8>,
}

impl TagRecord {
    /// Serializes to one tagmanager line (without the newline):
    /// `name TA_TYPE "128" TA_ARGLIST params TA_VARTYPE return_type`.
    pub fn to_line(&self) -> Vec<u8> {
        let type_code = TYPE_FUNCTION.to_string();
        let mut line = Vec::with_capacity(
            self.name.len() + self.param_list.len() + self.return_type.len() + type_code.len() + 3,
        );
        line.extend_from_slice(&self.name);
        line.push(TA_TYPE);
        line.extend_from_slice(type_code.as_bytes());
        line.push(TA_ARGLIST);
        line.extend_from_slice(&self.param_list);
        line.push(TA_VARTYPE);
        line.extend_from_slice(&self.return_type);
        line
    }
}

pub fn trailer_line(timestamp: &str) -> Vec<u8> {
    format!("{TRAILER_PREFIX}{timestamp})").into_bytes()
}

/// The fully materialized tag index: serialized records plus the trailer,
/// sorted byte-wise as one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFile {
    lines: Vec<Vec<u8>>,
    record_count: usize,
}

impl TagFile {
    pub fn assemble(records: &[TagRecord], trailer: Vec<u8>) -> Self {
        let mut lines: Vec<Vec<u8>> = records.iter().map(TagRecord::to_line).collect();
        lines.push(trailer);
        lines.sort();
        Self {
            lines,
            record_count: records.len(),
        }
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Lines joined with `\n`, no trailing newline.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.lines.join(&b'\n')
    }
}
