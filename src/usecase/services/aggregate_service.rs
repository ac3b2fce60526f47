use std::sync::Arc;

use crate::config::FunnelRatios;
use crate::domain::entities::campaign::{
    roi_percent, round_half_up, CampaignRecord, Dataset, TimeSeriesPoint,
};
use crate::domain::entities::view::{
    DashboardViews, DateRangeFilter, FunnelStage, FunnelStageTotal, KpiTotals, NamedValue,
};
use crate::usecase::ports::store::{DatasetStore, StoreError};

pub struct AggregateService {
    store: Arc<dyn DatasetStore>,
    ratios: FunnelRatios,
}

impl AggregateService {
    pub fn new(store: Arc<dyn DatasetStore>, ratios: FunnelRatios) -> Self {
        Self { store, ratios }
    }

    pub fn views(&self, filter: &DateRangeFilter) -> Result<DashboardViews, StoreError> {
        let dataset = self.store.snapshot()?;
        Ok(build_views(&dataset, filter, &self.ratios))
    }
}

pub fn build_views(
    dataset: &Dataset,
    filter: &DateRangeFilter,
    ratios: &FunnelRatios,
) -> DashboardViews {
    DashboardViews {
        kpis: kpi_totals(&dataset.campaigns),
        roi_series: roi_series(&dataset.campaigns),
        funnel: funnel_totals(&dataset.campaigns, ratios),
        revenue_by_type: revenue_by_type(&dataset.campaigns),
        leads_over_time: leads_over_time(&dataset.time_series, filter),
    }
}

/// Blended ROI is the ROI of the summed revenue and cost, not the mean of
/// per-campaign ROI.
pub fn kpi_totals(campaigns: &[CampaignRecord]) -> KpiTotals {
    let revenue: f64 = campaigns.iter().map(|c| c.revenue).sum();
    let cost: f64 = campaigns.iter().map(|c| c.cost).sum();
    KpiTotals {
        total_campaigns: campaigns.len(),
        revenue,
        leads: campaigns.iter().map(|c| c.leads).sum(),
        cost,
        blended_roi: roi_percent(revenue, cost),
    }
}

pub fn roi_series(campaigns: &[CampaignRecord]) -> Vec<NamedValue> {
    campaigns
        .iter()
        .map(|c| NamedValue {
            name: c.name.clone(),
            value: c.roi as f64,
        })
        .collect()
}

/// Estimates are rounded per campaign before summing, so stage totals are
/// close to but not exactly the ratio applied to total leads.
pub fn funnel_totals(campaigns: &[CampaignRecord], ratios: &FunnelRatios) -> Vec<FunnelStageTotal> {
    let mut totals = [0_u64; 5];
    for campaign in campaigns {
        let estimate = |ratio: f64| round_half_up(campaign.leads as f64 * ratio) as u64;
        let explicit = |count: Option<u64>| count.filter(|value| *value > 0);
        let funnel = &campaign.funnel;

        totals[0] += campaign.leads;
        totals[1] += explicit(funnel.mqls).unwrap_or_else(|| estimate(ratios.mql));
        totals[2] += explicit(funnel.sqls).unwrap_or_else(|| estimate(ratios.sql));
        totals[3] += explicit(funnel.opportunities).unwrap_or_else(|| estimate(ratios.opportunity));
        totals[4] += explicit(funnel.closed)
            .or_else(|| explicit(Some(campaign.conversions)))
            .unwrap_or_else(|| estimate(ratios.closed));
    }

    FunnelStage::ORDER
        .iter()
        .zip(totals)
        .map(|(stage, value)| FunnelStageTotal {
            stage: *stage,
            value,
        })
        .collect()
}

pub fn revenue_by_type(campaigns: &[CampaignRecord]) -> Vec<NamedValue> {
    let mut groups: Vec<NamedValue> = Vec::new();
    for campaign in campaigns {
        let name = if campaign.campaign_type.is_empty() {
            "Other"
        } else {
            campaign.campaign_type.as_str()
        };
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.value += campaign.revenue,
            None => groups.push(NamedValue {
                name: name.to_string(),
                value: campaign.revenue,
            }),
        }
    }
    groups
}

pub fn leads_over_time(points: &[TimeSeriesPoint], filter: &DateRangeFilter) -> Vec<TimeSeriesPoint> {
    points
        .iter()
        .filter(|point| filter.contains(point))
        .cloned()
        .collect()
}
