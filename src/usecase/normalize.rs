//! Turns combined upload rows into canonical campaign and time-series
//! records.
//!
//! Detection looks at key presence across the whole batch, not per row:
//! a batch is time-series shaped when some row has `date` and some row has
//! `leads`, and campaign shaped when some row has `campaign` or `Campaign`.
//! Both checks are independent, so one upload can feed either collection,
//! both, or neither.

use crate::domain::entities::campaign::{
    round_half_up, CampaignRecord, CampaignStatus, FunnelCounts, TimeSeriesPoint,
};
use crate::domain::entities::raw::{RawRow, RawValue};

const TIME_SERIES_KEYS: [&str; 2] = ["date", "leads"];
const CAMPAIGN_KEYS: [&str; 2] = ["campaign", "Campaign"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadShape {
    Neither,
    TimeSeries,
    Campaign,
    Both,
}

impl UploadShape {
    pub fn has_time_series(self) -> bool {
        matches!(self, UploadShape::TimeSeries | UploadShape::Both)
    }

    pub fn has_campaigns(self) -> bool {
        matches!(self, UploadShape::Campaign | UploadShape::Both)
    }
}

pub fn classify(rows: &[RawRow]) -> UploadShape {
    let has_time_series = TIME_SERIES_KEYS
        .iter()
        .all(|key| rows.iter().any(|row| row.contains_key(key)));
    let has_campaign = rows
        .iter()
        .any(|row| CAMPAIGN_KEYS.iter().any(|key| row.contains_key(key)));

    match (has_time_series, has_campaign) {
        (true, true) => UploadShape::Both,
        (true, false) => UploadShape::TimeSeries,
        (false, true) => UploadShape::Campaign,
        (false, false) => UploadShape::Neither,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub time_series: Option<Vec<TimeSeriesPoint>>,
    pub campaigns: Option<Vec<CampaignRecord>>,
}

/// Maps every collection the batch is shaped for. A collection whose mapped
/// list comes out empty is reported as `None` so the caller keeps what it has.
pub fn normalize(rows: &[RawRow]) -> (UploadShape, Normalized) {
    let shape = classify(rows);
    let mut normalized = Normalized::default();

    if shape.has_time_series() {
        let points = map_time_series(rows);
        if !points.is_empty() {
            normalized.time_series = Some(points);
        }
    }

    if shape.has_campaigns() {
        let campaigns = map_campaigns(rows);
        if !campaigns.is_empty() {
            normalized.campaigns = Some(campaigns);
        }
    }

    (shape, normalized)
}

pub fn map_time_series(rows: &[RawRow]) -> Vec<TimeSeriesPoint> {
    rows.iter()
        .filter_map(|row| {
            let date = row.get("date").filter(|value| value.is_truthy())?;
            let date: String = date.to_string().chars().take(10).collect();
            let leads = row.get("leads").map(to_count).unwrap_or(0);
            Some(TimeSeriesPoint::new(date, leads))
        })
        .collect()
}

pub fn map_campaigns(rows: &[RawRow]) -> Vec<CampaignRecord> {
    rows.iter().filter_map(map_campaign).collect()
}

fn map_campaign(row: &RawRow) -> Option<CampaignRecord> {
    let name = first_truthy(row, &CAMPAIGN_KEYS)?.to_string();
    let campaign_type = first_truthy(row, &["type", "Type"])
        .map(|value| value.to_string())
        .unwrap_or_else(|| "Other".to_string());
    let status = first_truthy(row, &["status", "Status"])
        .map(|value| CampaignStatus::parse(&value.to_string()))
        .unwrap_or_default();

    let record = CampaignRecord::new(
        name,
        campaign_type,
        status,
        first_present(row, &["leads", "Leads"]).map(to_count).unwrap_or(0),
        first_present(row, &["conversions", "Conversions"])
            .map(to_count)
            .unwrap_or(0),
        first_present(row, &["cost", "Cost"])
            .map(RawValue::as_number)
            .unwrap_or(0.0),
        first_present(row, &["revenue", "Revenue"])
            .map(RawValue::as_number)
            .unwrap_or(0.0),
    );

    let funnel = FunnelCounts {
        mqls: first_present(row, &["mqls", "MQLs"]).map(to_count),
        sqls: first_present(row, &["sqls", "SQLs"]).map(to_count),
        opportunities: first_present(row, &["opportunities", "Opportunities"]).map(to_count),
        closed: first_present(row, &["closed", "Closed"]).map(to_count),
    };

    Some(record.with_funnel(funnel))
}

fn first_truthy<'a>(row: &'a RawRow, labels: &[&str]) -> Option<&'a RawValue> {
    labels
        .iter()
        .filter_map(|label| row.get(label))
        .find(|value| value.is_truthy())
}

fn first_present<'a>(row: &'a RawRow, labels: &[&str]) -> Option<&'a RawValue> {
    labels
        .iter()
        .filter_map(|label| row.get(label))
        .find(|value| !value.is_empty())
}

/// Counts are whole and never negative.
fn to_count(value: &RawValue) -> u64 {
    round_half_up(value.as_number()).max(0.0) as u64
}
