use crate::domain::entities::campaign::{CampaignRecord, Dataset, TimeSeriesPoint};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Message(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Owner of the one mutable dataset. Collections are only ever replaced
/// wholesale, never merged.
pub trait DatasetStore: Send + Sync {
    fn snapshot(&self) -> Result<Dataset, StoreError>;

    fn replace_campaigns(&self, campaigns: Vec<CampaignRecord>) -> Result<(), StoreError>;
    fn replace_time_series(&self, points: Vec<TimeSeriesPoint>) -> Result<(), StoreError>;
    fn reset(&self, dataset: Dataset) -> Result<(), StoreError>;
}
