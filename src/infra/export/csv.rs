use anyhow::{Context, Result};

use crate::domain::entities::table::TabularData;

pub fn write_csv_bytes(table: &TabularData) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.columns)
        .context("failed to write csv header")?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|value| value.to_string()))
            .context("failed to write csv record")?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv export: {}", err.error()))
}
