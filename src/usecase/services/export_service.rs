use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::config::FunnelRatios;
use crate::domain::entities::campaign::{CampaignRecord, TimeSeriesPoint};
use crate::domain::entities::raw::RawValue;
use crate::domain::entities::table::TabularData;
use crate::domain::entities::view::{DateRangeFilter, FunnelStageTotal, NamedValue};
use crate::infra::export::csv::write_csv_bytes;
use crate::infra::export::xlsx::write_xlsx_bytes;
use crate::usecase::ports::store::DatasetStore;
use crate::usecase::services::aggregate_service::build_views;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportView {
    RoiSeries,
    Funnel,
    RevenueByType,
    LeadsOverTime,
    Campaigns,
}

impl ExportView {
    pub fn file_stem(self) -> &'static str {
        match self {
            ExportView::RoiSeries => "roi_bar",
            ExportView::Funnel => "funnel",
            ExportView::RevenueByType => "revenue_by_type",
            ExportView::LeadsOverTime => "leads_over_time",
            ExportView::Campaigns => "campaigns",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn encode(self, table: &TabularData) -> Result<Vec<u8>> {
        match self {
            ExportFormat::Csv => write_csv_bytes(table),
            ExportFormat::Xlsx => write_xlsx_bytes(table),
        }
    }
}

pub fn default_file_name(view: ExportView, format: ExportFormat) -> String {
    format!("{}.{}", view.file_stem(), format.extension())
}

pub struct ExportService {
    store: Arc<dyn DatasetStore>,
    ratios: FunnelRatios,
}

impl ExportService {
    pub fn new(store: Arc<dyn DatasetStore>, ratios: FunnelRatios) -> Self {
        Self { store, ratios }
    }

    pub fn table(&self, view: ExportView, filter: &DateRangeFilter) -> Result<TabularData> {
        let dataset = self
            .store
            .snapshot()
            .map_err(|err| anyhow!(err.to_string()))?;
        let views = build_views(&dataset, filter, &self.ratios);
        Ok(match view {
            ExportView::RoiSeries => roi_table(&views.roi_series),
            ExportView::Funnel => funnel_table(&views.funnel),
            ExportView::RevenueByType => named_value_table(&views.revenue_by_type),
            ExportView::LeadsOverTime => leads_table(&views.leads_over_time),
            ExportView::Campaigns => campaign_table(&dataset.campaigns),
        })
    }

    pub fn export_bytes(
        &self,
        view: ExportView,
        format: ExportFormat,
        filter: &DateRangeFilter,
    ) -> Result<Vec<u8>> {
        let table = self.table(view, filter)?;
        format
            .encode(&table)
            .with_context(|| format!("failed to encode {}", default_file_name(view, format)))
    }

    pub fn export_to_path(
        &self,
        view: ExportView,
        format: ExportFormat,
        filter: &DateRangeFilter,
        path: &Path,
    ) -> Result<()> {
        let bytes = self.export_bytes(view, format, filter)?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write export: {}", path.display()))?;
        info!(?view, ?format, path = %path.display(), bytes = bytes.len(), "export written");
        Ok(())
    }
}

pub fn roi_table(series: &[NamedValue]) -> TabularData {
    let mut table = TabularData::new(&["campaign", "roi"]);
    for item in series {
        table.push_row(vec![
            RawValue::Text(item.name.clone()),
            RawValue::Number(item.value),
        ]);
    }
    table
}

pub fn named_value_table(values: &[NamedValue]) -> TabularData {
    let mut table = TabularData::new(&["name", "value"]);
    for item in values {
        table.push_row(vec![
            RawValue::Text(item.name.clone()),
            RawValue::Number(item.value),
        ]);
    }
    table
}

pub fn funnel_table(stages: &[FunnelStageTotal]) -> TabularData {
    let mut table = TabularData::new(&["name", "value"]);
    for stage in stages {
        table.push_row(vec![
            RawValue::Text(stage.stage.label().to_string()),
            RawValue::Number(stage.value as f64),
        ]);
    }
    table
}

pub fn leads_table(points: &[TimeSeriesPoint]) -> TabularData {
    let mut table = TabularData::new(&["date", "leads"]);
    for point in points {
        table.push_row(vec![
            RawValue::Text(point.date.clone()),
            RawValue::Number(point.leads as f64),
        ]);
    }
    table
}

pub fn campaign_table(campaigns: &[CampaignRecord]) -> TabularData {
    let mut table = TabularData::new(&[
        "campaign",
        "type",
        "status",
        "leads",
        "conversions",
        "cost",
        "revenue",
        "roi",
    ]);
    for c in campaigns {
        table.push_row(vec![
            RawValue::Text(c.name.clone()),
            RawValue::Text(c.campaign_type.clone()),
            RawValue::Text(c.status.label().to_string()),
            RawValue::Number(c.leads as f64),
            RawValue::Number(c.conversions as f64),
            RawValue::Number(c.cost),
            RawValue::Number(c.revenue),
            RawValue::Number(c.roi as f64),
        ]);
    }
    table
}
