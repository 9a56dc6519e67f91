//! Spreadsheet input parsing and report writing
//!
//! The input collaborator is a user-supplied workbook whose first column
//! holds tracking numbers. The output is a two-sheet report: `pod_data` with
//! every aggregated record (all observed fields), and
//! `uploaded_tracking_number` with the original input table verbatim.

use crate::error::{Error, Result};
use crate::types::PodRecord;
use calamine::{Data, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Sheet name for the aggregated POD records
const POD_DATA_SHEET: &str = "pod_data";
/// Sheet name for the verbatim input table
const UPLOADED_SHEET: &str = "uploaded_tracking_number";
/// Suffix appended to the input file stem for the report filename
const REPORT_SUFFIX: &str = "_pod_result.xlsx";

/// The uploaded input table, kept verbatim for the report
#[derive(Clone, Debug)]
pub struct InputTable {
    /// Every cell of the first worksheet, header row included
    pub rows: Vec<Vec<Data>>,
}

/// Read the input workbook: the verbatim table plus the tracking numbers
///
/// Tracking numbers come from the first column below the header row,
/// converted to strings (integral numbers render without a trailing `.0`),
/// with empty cells dropped and duplicates removed preserving first-seen
/// order.
pub fn read_input(path: &Path) -> Result<(InputTable, Vec<String>)> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e| Error::InputFile(format!("{}: {e}", path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Spreadsheet("input workbook has no worksheets".to_string()))??;

    let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();

    let mut seen = HashSet::new();
    let mut tracking_numbers = Vec::new();
    // First row is the header, whatever it says
    for row in rows.iter().skip(1) {
        let Some(value) = row.first().and_then(cell_to_string) else {
            continue;
        };
        if seen.insert(value.clone()) {
            tracking_numbers.push(value);
        }
    }

    Ok((InputTable { rows }, tracking_numbers))
}

/// Derive the download folder and report path from the input file location
///
/// For `/data/batch.xlsx` this yields `/data/batch` (POD files) and
/// `/data/batch_pod_result.xlsx` (report).
pub fn output_locations(input_path: &Path) -> Result<(PathBuf, PathBuf)> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            Error::InputFile(format!(
                "cannot derive a file stem from '{}'",
                input_path.display()
            ))
        })?;
    let dir = input_path.parent().unwrap_or_else(|| Path::new("."));

    let pod_dir = dir.join(stem);
    let report_path = dir.join(format!("{stem}{REPORT_SUFFIX}"));
    Ok((pod_dir, report_path))
}

/// Write the two-sheet report
///
/// `pod_data` lists every aggregated record — whether or not its file
/// downloaded — with columns `trackingNumber`, `fileUrl`, then any extra
/// fields in first-seen order across all records. `uploaded_tracking_number`
/// is a verbatim dump of the input table.
pub fn write_report(records: &[PodRecord], input: &InputTable, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet().set_name(POD_DATA_SHEET)?;
    write_pod_data(sheet, records)?;

    let sheet = workbook.add_worksheet().set_name(UPLOADED_SHEET)?;
    write_input_table(sheet, input)?;

    workbook.save(path)?;
    tracing::info!(path = %path.display(), records = records.len(), "Report written");
    Ok(())
}

/// Columns for the record sheet: the two interpreted fields first, then
/// every extra field in the order it was first observed
fn record_columns(records: &[PodRecord]) -> Vec<String> {
    let mut columns = vec!["trackingNumber".to_string(), "fileUrl".to_string()];
    let mut seen: HashSet<String> = columns.iter().cloned().collect();
    for record in records {
        for key in record.extra.keys() {
            if seen.insert(key.clone()) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn write_pod_data(sheet: &mut Worksheet, records: &[PodRecord]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let columns = record_columns(records);
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, &record.tracking_number)?;
        sheet.write_string(row, 1, &record.file_url)?;
        for (col, name) in columns.iter().enumerate().skip(2) {
            if let Some(value) = record.extra.get(name) {
                write_json_value(sheet, row, col as u16, value)?;
            }
        }
    }
    Ok(())
}

fn write_json_value(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &serde_json::Value,
) -> Result<()> {
    match value {
        serde_json::Value::Null => {}
        serde_json::Value::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        serde_json::Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                sheet.write_number(row, col, f)?;
            }
        }
        serde_json::Value::String(s) => {
            sheet.write_string(row, col, s)?;
        }
        // Nested structures are rare; dump them as JSON text
        other => {
            sheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

fn write_input_table(sheet: &mut Worksheet, input: &InputTable) -> Result<()> {
    for (r, row) in input.rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            write_cell(sheet, r as u32, c as u16, cell)?;
        }
    }
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Data) -> Result<()> {
    match cell {
        Data::Empty | Data::Error(_) => {}
        Data::String(s) => {
            sheet.write_string(row, col, s)?;
        }
        Data::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        Data::Float(f) => {
            sheet.write_number(row, col, *f)?;
        }
        Data::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Data::DateTime(dt) => {
            sheet.write_number(row, col, dt.as_f64())?;
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

/// Convert a cell to a tracking-number string, or `None` for unusable cells
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        // Spreadsheets store numeric tracking numbers as floats; render
        // integral values without a trailing ".0"
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::Empty | Data::Error(_) | Data::DateTime(_) | Data::DateTimeIso(_)
        | Data::DurationIso(_) => None,
    }
}
