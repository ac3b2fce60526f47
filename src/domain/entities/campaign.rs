use std::fmt;

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
    Other(String),
}

impl CampaignStatus {
    /// Uploaded labels are kept as written; only the exact upper-case
    /// labels map to the known variants.
    pub fn parse(label: &str) -> Self {
        match label {
            "ACTIVE" => CampaignStatus::Active,
            "PAUSED" => CampaignStatus::Paused,
            "COMPLETED" => CampaignStatus::Completed,
            _ => CampaignStatus::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Paused => "PAUSED",
            CampaignStatus::Completed => "COMPLETED",
            CampaignStatus::Other(label) => label,
        }
    }
}

impl Default for CampaignStatus {
    fn default() -> Self {
        CampaignStatus::Active
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Explicit funnel counts carried by an uploaded campaign row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunnelCounts {
    pub mqls: Option<u64>,
    pub sqls: Option<u64>,
    pub opportunities: Option<u64>,
    pub closed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRecord {
    pub name: String,
    pub campaign_type: String,
    pub status: CampaignStatus,
    pub leads: u64,
    pub conversions: u64,
    pub cost: f64,
    pub revenue: f64,
    pub roi: i64,
    pub funnel: FunnelCounts,
}

impl CampaignRecord {
    pub fn new(
        name: impl Into<String>,
        campaign_type: impl Into<String>,
        status: CampaignStatus,
        leads: u64,
        conversions: u64,
        cost: f64,
        revenue: f64,
    ) -> Self {
        Self {
            name: name.into(),
            campaign_type: campaign_type.into(),
            status,
            leads,
            conversions,
            cost,
            revenue,
            roi: roi_percent(revenue, cost),
            funnel: FunnelCounts::default(),
        }
    }

    pub fn with_funnel(mut self, funnel: FunnelCounts) -> Self {
        self.funnel = funnel;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub leads: u64,
}

impl TimeSeriesPoint {
    pub fn new(date: impl Into<String>, leads: u64) -> Self {
        Self {
            date: date.into(),
            leads,
        }
    }

    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub campaigns: Vec<CampaignRecord>,
    pub time_series: Vec<TimeSeriesPoint>,
}

/// `round(((revenue - cost) / cost) * 100)`, zero when there is no cost.
pub fn roi_percent(revenue: f64, cost: f64) -> i64 {
    if cost > 0.0 {
        round_half_up((revenue - cost) / cost * 100.0) as i64
    } else {
        0
    }
}

/// Halves round toward positive infinity, so `-0.5` becomes `0`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
