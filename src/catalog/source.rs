//! # Dataset Sources
//!
//! Where course records come from. The bundled source is a JSON file or a
//! spreadsheet workbook; tests inject records directly through `MemorySource`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use super::errors::{CatalogError, CatalogResult};
use super::record::{is_blank_cell, CourseRecord};
use super::workbook::{is_workbook, workbook_rows};

/// Number of header rows at the top of a spreadsheet export
const HEADER_ROWS: usize = 2;

/// Source of the course collection
pub trait CourseSource: Send + Sync + std::fmt::Debug {
    /// Read and parse the full collection
    fn load(&self) -> CatalogResult<Vec<CourseRecord>>;

    /// Write a replacement collection back to the source, if supported.
    ///
    /// Returns `Ok(false)` when the source is read-only.
    fn persist(&self, _records: &[CourseRecord]) -> CatalogResult<bool> {
        Ok(false)
    }
}

/// Dataset on disk (JSON or workbook), tried in order across candidate paths
#[derive(Debug, Clone)]
pub struct FileSource {
    candidates: Vec<PathBuf>,
}

impl FileSource {
    /// Create a source over the given candidate paths.
    ///
    /// Persisted uploads are written as JSON to the first `.json` candidate,
    /// or next to the first candidate with a `.json` extension.
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Single-path source
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self::new(vec![path.into()])
    }

    fn persist_path(&self) -> Option<PathBuf> {
        let is_json = |p: &&PathBuf| p.extension().map_or(false, |ext| ext == "json");
        self.candidates
            .iter()
            .find(is_json)
            .or_else(|| self.candidates.first())
            .map(|p| p.with_extension("json"))
    }

    fn load_file(path: &Path) -> CatalogResult<Vec<CourseRecord>> {
        let bytes = fs::read(path).map_err(|e| CatalogError::io(path, e))?;
        let records = parse_dataset(&bytes)?;
        info!(path = %path.display(), count = records.len(), "loaded course dataset");
        Ok(records)
    }
}

impl CourseSource for FileSource {
    fn load(&self) -> CatalogResult<Vec<CourseRecord>> {
        let mut last_error = None;

        for path in &self.candidates {
            if !path.exists() {
                debug!(path = %path.display(), "dataset candidate missing");
                continue;
            }
            match Self::load_file(path) {
                Ok(records) => return Ok(records),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "dataset candidate rejected");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CatalogError::NotFound(self.candidates.clone())))
    }

    fn persist(&self, records: &[CourseRecord]) -> CatalogResult<bool> {
        let Some(path) = self.persist_path() else {
            return Ok(false);
        };
        let path = path.as_path();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }

        let json = serde_json::to_vec_pretty(records)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| CatalogError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| CatalogError::io(path, e))?;

        info!(path = %path.display(), count = records.len(), "persisted course dataset");
        Ok(true)
    }
}

/// Fixed in-memory collection
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<CourseRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<CourseRecord>) -> Self {
        Self { records }
    }
}

impl CourseSource for MemorySource {
    fn load(&self) -> CatalogResult<Vec<CourseRecord>> {
        Ok(assign_ids(self.records.clone()))
    }
}

/// Parse a dataset document.
///
/// Accepts an Excel/OpenDocument workbook (first sheet), a JSON array of
/// record objects, or a JSON array of rows. Rows skip the two header rows,
/// rows with a blank first cell and repeated header rows; the row at index
/// `i` gets id `i - 1`.
pub fn parse_dataset(bytes: &[u8]) -> CatalogResult<Vec<CourseRecord>> {
    if is_workbook(bytes) {
        return parse_rows(&workbook_rows(bytes)?);
    }

    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| CatalogError::malformed(format!("invalid JSON: {}", e)))?;

    let Value::Array(items) = document else {
        return Err(CatalogError::malformed("top-level value must be an array"));
    };

    if items.first().map_or(false, Value::is_array) {
        return parse_rows(&items);
    }

    let records = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<CourseRecord>(item)
                .map_err(|e| CatalogError::malformed(format!("record {}: {}", i, e)))
        })
        .collect::<CatalogResult<Vec<_>>>()?;

    Ok(assign_ids(records))
}

fn parse_rows(rows: &[Value]) -> CatalogResult<Vec<CourseRecord>> {
    let mut records = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let Value::Array(cells) = row else {
            return Err(CatalogError::malformed(format!(
                "row {}: expected an array of cells",
                i
            )));
        };
        if i < HEADER_ROWS {
            continue;
        }

        let skip = match cells.first() {
            None => true,
            Some(Value::String(s)) => s == CourseRecord::HEADER_MARKER || s.is_empty(),
            Some(cell) => is_blank_cell(cell),
        };
        if skip {
            continue;
        }

        records.push(CourseRecord::from_row((i - 1) as u64, cells));
    }

    Ok(records)
}

/// Keep source ids when every record has one and none repeat; otherwise
/// number the whole collection `1..=n` in source order.
pub fn assign_ids(mut records: Vec<CourseRecord>) -> Vec<CourseRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let usable = records
        .iter()
        .all(|r| r.id.map_or(false, |id| seen.insert(id)));

    if !usable {
        for (i, record) in records.iter_mut().enumerate() {
            record.id = Some(i as u64 + 1);
        }
    }
    records
}
