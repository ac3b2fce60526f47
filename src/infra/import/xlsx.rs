use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::entities::raw::{format_number, RawRow, RawValue};

pub fn cell_to_raw(cell: &Data) -> RawValue {
    match cell {
        Data::String(v) => RawValue::Text(v.to_string()),
        Data::Float(v) => RawValue::Number(*v),
        Data::Int(v) => RawValue::Number(*v as f64),
        Data::Bool(v) => RawValue::Bool(*v),
        Data::DateTime(v) => excel_serial_to_datetime(v.as_f64())
            .map(RawValue::DateTime)
            .unwrap_or(RawValue::Number(v.as_f64())),
        Data::DateTimeIso(v) => RawValue::Text(v.to_string()),
        Data::DurationIso(v) => RawValue::Text(v.to_string()),
        Data::Error(_) | Data::Empty => RawValue::Empty,
    }
}

fn header_label(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => format_number(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTimeIso(v) | Data::DurationIso(v) => v.to_string(),
        Data::DateTime(v) => format_number(v.as_f64()),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// Excel serial day numbers count from 1899-12-30 (1900 date system).
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

/// Reads the first sheet, using its first row as the header.
pub fn parse_xlsx_file(xlsx_path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open xlsx: {}", xlsx_path.display()))?;
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("workbook has no sheets: {}", xlsx_path.display()))?;
    let range = workbook
        .worksheet_range(&first_sheet)
        .with_context(|| format!("failed to read sheet: {first_sheet}"))?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Ok(Vec::new());
    };
    let headers = unique_headers(header_row);

    let mut rows = Vec::new();
    for sheet_row in sheet_rows {
        let mut row = RawRow::new();
        for (label, cell) in headers.iter().zip(sheet_row.iter()) {
            let value = cell_to_raw(cell);
            if !value.is_empty() {
                row.push(label.clone(), value);
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

fn unique_headers(header_row: &[Data]) -> Vec<String> {
    let mut blank_count = 0_usize;
    header_row
        .iter()
        .map(|cell| {
            let label = header_label(cell);
            if !label.trim().is_empty() {
                return label;
            }
            let label = if blank_count == 0 {
                "__EMPTY".to_string()
            } else {
                format!("__EMPTY_{blank_count}")
            };
            blank_count += 1;
            label
        })
        .collect()
}
