//! Item-to-row mapping shared by CSV export, Excel export and the remote workbook.
//!
//! Every sink goes through [`to_rows`], so the listing column is encoded the
//! same way everywhere.

use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

use crate::error::InventoryResult;
use crate::listing_codec;
use crate::models::{Amount, InventoryItem};

pub const CSV_EXPORT_FILENAME: &str = "inventory_export.csv";
pub const XLSX_EXPORT_FILENAME: &str = "inventory_export.xlsx";
pub const WORKSHEET_NAME: &str = "Inventory";
/// Last row index of an xlsx worksheet (1-based)
pub const MAX_SHEET_ROWS: usize = 1_048_576;

pub const HEADERS: [&str; 5] = [
    "Name",
    "Quantity",
    "Category",
    "Cost Price",
    "Marketplace Listings",
];

/// One exported row, in column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Quantity")]
    pub quantity: Amount,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Cost Price")]
    pub cost_price: Amount,
    #[serde(rename = "Marketplace Listings")]
    pub marketplace_listings: String,
}

impl ExportRow {
    /// Cell values for a JSON range update; numbers stay numbers
    pub fn cells(&self) -> Vec<Value> {
        vec![
            Value::String(self.name.clone()),
            amount_cell(&self.quantity),
            Value::String(self.category.clone()),
            amount_cell(&self.cost_price),
            Value::String(self.marketplace_listings.clone()),
        ]
    }
}

fn amount_cell(amount: &Amount) -> Value {
    serde_json::to_value(amount).unwrap_or_else(|_| Value::String(amount.to_string()))
}

pub fn to_row(item: &InventoryItem) -> ExportRow {
    ExportRow {
        name: item.name.clone(),
        quantity: item.quantity.clone(),
        category: item.category.clone(),
        cost_price: item.price.clone(),
        marketplace_listings: listing_codec::encode(&item.marketplaces),
    }
}

pub fn to_rows(items: &[InventoryItem]) -> Vec<ExportRow> {
    items.iter().map(to_row).collect()
}

/// Rows as a 2-D value grid, header excluded
pub fn sheet_values(rows: &[ExportRow]) -> Vec<Vec<Value>> {
    rows.iter().map(ExportRow::cells).collect()
}

/// Cell range covering `row_count` data rows below the header, e.g. `A2:E4`
pub fn sheet_range(row_count: usize) -> String {
    format!("A2:E{}", row_count + 1)
}

/// Rows below the first `row_count` data rows, down to the end of the sheet
pub fn stale_range(row_count: usize) -> String {
    format!("A{}:E{}", row_count + 2, MAX_SHEET_ROWS)
}

/// Write the header and one record per item. Quoting is handled by the csv writer.
pub fn write_csv<W: Write>(items: &[InventoryItem], writer: W) -> InventoryResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADERS)?;
    for row in to_rows(items) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn csv_string(items: &[InventoryItem]) -> InventoryResult<String> {
    let mut buffer = Vec::new();
    write_csv(items, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn build_workbook(items: &[InventoryItem], sheet_name: &str) -> InventoryResult<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, row) in to_rows(items).iter().enumerate() {
        let r = index as u32 + 1;
        worksheet.write_string(r, 0, row.name.as_str())?;
        write_amount(worksheet, r, 1, &row.quantity)?;
        worksheet.write_string(r, 2, row.category.as_str())?;
        write_amount(worksheet, r, 3, &row.cost_price)?;
        worksheet.write_string(r, 4, row.marketplace_listings.as_str())?;
    }

    Ok(workbook)
}

fn write_amount(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    amount: &Amount,
) -> InventoryResult<()> {
    match amount {
        Amount::Number(n) => worksheet.write_number(row, col, *n)?,
        Amount::Text(s) => worksheet.write_string(row, col, s.as_str())?,
    };
    Ok(())
}

/// Single-sheet workbook: header row plus one row per item
pub fn write_xlsx<P: AsRef<Path>>(items: &[InventoryItem], path: P) -> InventoryResult<()> {
    let mut workbook = build_workbook(items, WORKSHEET_NAME)?;
    workbook.save(path.as_ref())?;
    log::info!("Exported {} items to {}", items.len(), path.as_ref().display());
    Ok(())
}

pub fn xlsx_bytes(items: &[InventoryItem]) -> InventoryResult<Vec<u8>> {
    let mut workbook = build_workbook(items, WORKSHEET_NAME)?;
    Ok(workbook.save_to_buffer()?)
}

/// Empty workbook holding only the header row, on a sheet named `sheet_name`
pub fn header_workbook_bytes(sheet_name: &str) -> InventoryResult<Vec<u8>> {
    let mut workbook = build_workbook(&[], sheet_name)?;
    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
