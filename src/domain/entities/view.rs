use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::entities::campaign::{CampaignRecord, TimeSeriesPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Campaign,
    Type,
    Status,
    Leads,
    Conversions,
    Cost,
    Revenue,
    Roi,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::Campaign,
        SortKey::Type,
        SortKey::Status,
        SortKey::Leads,
        SortKey::Conversions,
        SortKey::Cost,
        SortKey::Revenue,
        SortKey::Roi,
    ];

    pub fn field(self) -> &'static str {
        match self {
            SortKey::Campaign => "campaign",
            SortKey::Type => "type",
            SortKey::Status => "status",
            SortKey::Leads => "leads",
            SortKey::Conversions => "conversions",
            SortKey::Cost => "cost",
            SortKey::Revenue => "revenue",
            SortKey::Roi => "roi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Campaign => "Campaign Name",
            SortKey::Type => "Type",
            SortKey::Status => "Status",
            SortKey::Leads => "Leads",
            SortKey::Conversions => "Conversions",
            SortKey::Cost => "Cost",
            SortKey::Revenue => "Revenue",
            SortKey::Roi => "ROI%",
        }
    }

    pub fn value_of(self, record: &CampaignRecord) -> SortValue<'_> {
        match self {
            SortKey::Campaign => SortValue::Text(&record.name),
            SortKey::Type => SortValue::Text(&record.campaign_type),
            SortKey::Status => SortValue::Text(record.status.label()),
            SortKey::Leads => SortValue::Number(record.leads as f64),
            SortKey::Conversions => SortValue::Number(record.conversions as f64),
            SortKey::Cost => SortValue::Number(record.cost),
            SortKey::Revenue => SortValue::Number(record.revenue),
            SortKey::Roi => SortValue::Number(record.roi as f64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl SortValue<'_> {
    /// Equal values compare equal; otherwise `a > b` is greater and
    /// everything else, including incomparable numbers, is less.
    pub fn compare(&self, other: &Self) -> Ordering {
        let (equal, greater) = match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => (a == b, a > b),
            (SortValue::Number(a), SortValue::Number(b)) => (a == b, a > b),
            (SortValue::Text(_), SortValue::Number(_)) => (false, true),
            (SortValue::Number(_), SortValue::Text(_)) => (false, false),
        };
        if equal {
            Ordering::Equal
        } else if greater {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Campaign,
            direction: SortDirection::Asc,
        }
    }
}

impl SortSpec {
    /// Same key flips direction, a new key starts ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Asc,
            }
        }
    }

    pub fn compare(&self, a: &CampaignRecord, b: &CampaignRecord) -> Ordering {
        let ordering = self.key.value_of(a).compare(&self.key.value_of(b));
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
}

impl PageWindow {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn start(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    pub fn end(&self) -> usize {
        self.page * self.page_size
    }
}

/// Search, sort and page controls of the campaign table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub search: String,
    pub sort: SortSpec,
    pub window: PageWindow,
}

impl TableQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort: SortSpec::default(),
            window: PageWindow::new(1, page_size),
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.window.page = 1;
    }

    // Sorting keeps the current page.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggled(key);
    }

    pub fn previous_page(&mut self) {
        self.window.page = self.window.page.saturating_sub(1).max(1);
    }

    pub fn next_page(&mut self, total: usize) {
        if self.window.end() < total {
            self.window.page += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TablePage {
    pub rows: Vec<CampaignRecord>,
    pub total: usize,
    pub window: PageWindow,
}

impl TablePage {
    pub fn has_previous(&self) -> bool {
        self.window.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.window.end() < self.total
    }

    /// 1-based inclusive bounds for the "Showing a-b of n" label.
    pub fn showing_range(&self) -> (usize, usize) {
        (self.window.start() + 1, self.total.min(self.window.end()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRangeFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRangeFilter {
    pub fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Points whose date is not a calendar day are never excluded.
    pub fn contains(&self, point: &TimeSeriesPoint) -> bool {
        let Some(day) = point.day() else {
            return true;
        };
        if self.start.is_some_and(|start| day < start) {
            return false;
        }
        if self.end.is_some_and(|end| day > end) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunnelStage {
    Leads,
    Mqls,
    Sqls,
    Opportunities,
    ClosedWon,
}

impl FunnelStage {
    pub const ORDER: [FunnelStage; 5] = [
        FunnelStage::Leads,
        FunnelStage::Mqls,
        FunnelStage::Sqls,
        FunnelStage::Opportunities,
        FunnelStage::ClosedWon,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FunnelStage::Leads => "Leads",
            FunnelStage::Mqls => "MQLs",
            FunnelStage::Sqls => "SQLs",
            FunnelStage::Opportunities => "Opportunities",
            FunnelStage::ClosedWon => "Closed Won",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunnelStageTotal {
    pub stage: FunnelStage,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KpiTotals {
    pub total_campaigns: usize,
    pub revenue: f64,
    pub leads: u64,
    #[allow(dead_code)]
    pub cost: f64,
    pub blended_roi: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardViews {
    pub kpis: KpiTotals,
    pub roi_series: Vec<NamedValue>,
    pub funnel: Vec<FunnelStageTotal>,
    pub revenue_by_type: Vec<NamedValue>,
    pub leads_over_time: Vec<TimeSeriesPoint>,
}
