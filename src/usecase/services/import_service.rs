use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::domain::entities::raw::RawRow;
use crate::domain::sample::sample_dataset;
use crate::infra::import::csv::parse_csv_file;
use crate::infra::import::xlsx::parse_xlsx_file;
use crate::usecase::normalize::{normalize, UploadShape};
use crate::usecase::ports::store::DatasetStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Csv,
    Spreadsheet,
}

impl UploadKind {
    pub fn parse_file(self, path: &Path) -> Result<Vec<RawRow>> {
        match self {
            UploadKind::Csv => parse_csv_file(path),
            UploadKind::Spreadsheet => parse_xlsx_file(path),
        }
    }
}

/// Rows of one upload selection, concatenated in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBatch {
    pub rows: Vec<RawRow>,
    pub preview: Vec<RawRow>,
    pub failed_files: usize,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub shape: UploadShape,
    pub row_count: usize,
    pub failed_files: usize,
    pub campaigns_replaced: bool,
    pub time_series_replaced: bool,
    pub preview: Vec<RawRow>,
    pub message: String,
}

pub struct ImportService {
    store: Arc<dyn DatasetStore>,
    config: DashboardConfig,
}

impl ImportService {
    pub fn new(store: Arc<dyn DatasetStore>, config: DashboardConfig) -> Self {
        Self { store, config }
    }

    /// Parses every file concurrently and waits for all of them. Results are
    /// collected by file index, so completion order never leaks into the
    /// combined rows. Unreadable files contribute nothing.
    pub fn parse_batch(&self, kind: UploadKind, paths: &[PathBuf]) -> ParsedBatch {
        let per_file: Vec<Option<Vec<RawRow>>> = paths
            .par_iter()
            .map(|path| match kind.parse_file(path) {
                Ok(rows) => {
                    debug!(path = %path.display(), rows = rows.len(), "parsed upload file");
                    Some(rows)
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %format!("{err:#}"), "skipping unreadable upload file");
                    None
                }
            })
            .collect();

        let mut batch = ParsedBatch::default();
        for rows in per_file {
            let Some(rows) = rows else {
                batch.failed_files += 1;
                continue;
            };
            batch
                .preview
                .extend(rows.iter().take(self.config.preview_rows_per_file).cloned());
            batch.rows.extend(rows);
        }
        batch.preview.truncate(self.config.preview_rows_total);
        batch
    }

    pub fn upload(&self, kind: UploadKind, paths: &[PathBuf]) -> Result<UploadOutcome> {
        info!(?kind, files = paths.len(), "upload started");
        let batch = self.parse_batch(kind, paths);
        self.apply_rows(batch)
    }

    pub fn apply_rows(&self, batch: ParsedBatch) -> Result<UploadOutcome> {
        let row_count = batch.rows.len();
        let (shape, normalized) = normalize(&batch.rows);

        let time_series_replaced = match normalized.time_series {
            Some(points) => {
                info!(points = points.len(), "replacing time series");
                self.store
                    .replace_time_series(points)
                    .map_err(|err| anyhow!(err.to_string()))?;
                true
            }
            None => false,
        };
        let campaigns_replaced = match normalized.campaigns {
            Some(campaigns) => {
                info!(campaigns = campaigns.len(), "replacing campaigns");
                self.store
                    .replace_campaigns(campaigns)
                    .map_err(|err| anyhow!(err.to_string()))?;
                true
            }
            None => false,
        };

        let mut message = format!("Uploaded {row_count} rows");
        match batch.failed_files {
            0 => {}
            1 => message.push_str(" (1 file could not be read)"),
            n => message.push_str(&format!(" ({n} files could not be read)")),
        }
        info!(rows = row_count, ?shape, failed = batch.failed_files, "upload applied");

        Ok(UploadOutcome {
            shape,
            row_count,
            failed_files: batch.failed_files,
            campaigns_replaced,
            time_series_replaced,
            preview: batch.preview,
            message,
        })
    }

    pub fn reset(&self) -> Result<String> {
        self.store
            .reset(sample_dataset())
            .map_err(|err| anyhow!(err.to_string()))?;
        info!("dataset reset to sample data");
        Ok("Reset to sample data".to_string())
    }
}
