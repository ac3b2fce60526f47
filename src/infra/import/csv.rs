use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::raw::{RawRow, RawValue};

pub fn parse_csv_file(csv_path: &Path) -> Result<Vec<RawRow>> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    read_rows(reader).with_context(|| format!("failed to parse csv: {}", csv_path.display()))
}

#[allow(dead_code)]
pub fn parse_csv_reader<R: Read>(source: R) -> Result<Vec<RawRow>> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);
    read_rows(reader)
}

fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawRow>> {
    let headers = reader
        .headers()
        .context("failed to read headers from csv")?
        .clone();

    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        let mut row = RawRow::new();
        for (label, field) in headers.iter().zip(record.iter()) {
            row.push(label, RawValue::coerce_text(field));
        }
        if row.is_empty() {
            continue;
        }
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_records_only_carry_present_keys() {
        let rows = parse_csv_reader("a,b,c\n1,2\n".as_bytes()).expect("csv should parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
        assert!(!rows[0].contains_key("c"));
    }

    #[test]
    fn records_with_empty_fields_are_kept() {
        let rows = parse_csv_reader("campaign,leads\nA,1\n,\nB,2\n".as_bytes())
            .expect("csv should parse");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].get("campaign"), Some(&RawValue::Empty));
        assert_eq!(rows[2].get("campaign"), Some(&RawValue::Text("B".to_string())));
    }

    #[test]
    fn empty_input_has_no_rows() {
        let rows = parse_csv_reader("".as_bytes()).expect("empty csv should parse");

        assert!(rows.is_empty());
    }
}
