//! Spreadsheet datasets
//!
//! Reads the first worksheet of an Excel or OpenDocument workbook into rows
//! of JSON cells, which then go through the same row-layout rules as a JSON
//! array of rows.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde_json::{Number, Value};

use super::errors::{CatalogError, CatalogResult};

/// ZIP container: xlsx, xlsm, xlsb, ods
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE2 compound document: legacy xls
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Whether the bytes look like a workbook rather than JSON
pub fn is_workbook(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC)
}

/// Rows of the first worksheet, one `Value::Array` per row.
///
/// Rows start at the top of the sheet's used range; empty cells read as
/// `null`, dates as their serial number.
pub fn workbook_rows(bytes: &[u8]) -> CatalogResult<Vec<Value>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| CatalogError::malformed(format!("unreadable workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CatalogError::malformed("workbook has no worksheets"))?
        .map_err(|e| CatalogError::malformed(format!("unreadable worksheet: {}", e)))?;

    let rows = range
        .rows()
        .map(|row| Value::Array(row.iter().map(cell_value).collect()))
        .collect();
    Ok(rows)
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => float_value(*f),
        Data::DateTime(dt) => float_value(dt.as_f64()),
    }
}

fn float_value(f: f64) -> Value {
    // Whole numbers stay integers so codes like 101 do not print as 101.0
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        return Value::Number((f as i64).into());
    }
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}
