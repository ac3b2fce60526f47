use std::sync::Arc;

use crate::domain::entities::campaign::CampaignRecord;
use crate::domain::entities::view::{TablePage, TableQuery};
use crate::usecase::ports::store::{DatasetStore, StoreError};

pub struct QueryService {
    store: Arc<dyn DatasetStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self { store }
    }

    pub fn query_page(&self, query: &TableQuery) -> Result<TablePage, StoreError> {
        let dataset = self.store.snapshot()?;
        Ok(project_table(&dataset.campaigns, query))
    }
}

/// Search on name, stable sort on the selected field, then one page window.
pub fn project_table(campaigns: &[CampaignRecord], query: &TableQuery) -> TablePage {
    let term = query.search.trim().to_lowercase();
    let mut matching: Vec<&CampaignRecord> = campaigns
        .iter()
        .filter(|record| term.is_empty() || record.name.to_lowercase().contains(&term))
        .collect();
    matching.sort_by(|a, b| query.sort.compare(a, b));

    let total = matching.len();
    let start = query.window.start().min(total);
    let end = query.window.end().min(total);

    TablePage {
        rows: matching[start..end].iter().map(|r| (*r).clone()).collect(),
        total,
        window: query.window,
    }
}
