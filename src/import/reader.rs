//! Decoding import files into header-keyed rows.

use calamine::{Data, Reader};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use super::Row;
use crate::error::{InventoryError, InventoryResult};

/// Kind of table an import file holds, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    /// `.xlsx` or legacy `.xls`
    Workbook,
}

impl TableFormat {
    pub fn from_extension(ext: &str) -> InventoryResult<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Ok(TableFormat::Csv),
            "xlsx" | "xls" => Ok(TableFormat::Workbook),
            _ => Err(InventoryError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> InventoryResult<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }
}

/// Read every row of a CSV file or of the first worksheet of a workbook.
///
/// The whole file is decoded before anything is returned, so a parse error
/// means no rows at all.
pub fn read_rows<P: AsRef<Path>>(path: P) -> InventoryResult<Vec<Row>> {
    let path = path.as_ref();
    let format = TableFormat::from_path(path)?;
    log::info!("Reading {:?} rows from {}", format, path.display());
    let file = BufReader::new(File::open(path)?);
    read_rows_from(file, format)
}

/// Read rows from any byte stream holding a table of the given format
pub fn read_rows_from<R: Read>(reader: R, format: TableFormat) -> InventoryResult<Vec<Row>> {
    let rows = match format {
        TableFormat::Csv => read_csv_rows(reader)?,
        TableFormat::Workbook => read_workbook_rows(reader)?,
    };
    log::debug!("Decoded {} rows", rows.len());
    Ok(rows)
}

fn read_csv_rows<R: Read>(reader: R) -> InventoryResult<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, field)| (header.to_string(), Value::String(field.to_string())))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Float(f) => serde_json::Number::from_f64(*f).map(Value::Number),
        Data::Int(i) => Some(Value::from(*i)),
        Data::Bool(b) => Some(Value::Bool(*b)),
        other => Some(Value::String(other.to_string())),
    }
}

fn read_workbook_rows<R: Read>(mut reader: R) -> InventoryResult<Vec<Row>> {
    // Format sniffing needs a seekable, cloneable source
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(InventoryError::EmptyWorkbook)?;
    let range = workbook.worksheet_range(&first_sheet)?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    let rows = sheet_rows
        .map(|cells| {
            headers
                .iter()
                .zip(cells.iter())
                .filter(|(header, _)| !header.is_empty())
                .filter_map(|(header, cell)| cell_value(cell).map(|v| (header.clone(), v)))
                .collect::<Row>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    Ok(rows)
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
