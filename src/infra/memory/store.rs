use std::sync::{PoisonError, RwLock};

use crate::domain::entities::campaign::{CampaignRecord, Dataset, TimeSeriesPoint};
use crate::usecase::ports::store::{DatasetStore, StoreError};

pub struct MemoryStore {
    dataset: RwLock<Dataset>,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: RwLock::new(dataset),
        }
    }
}

fn lock_error<T>(err: PoisonError<T>) -> StoreError {
    StoreError::Message(format!("dataset lock poisoned: {err}"))
}

impl DatasetStore for MemoryStore {
    fn snapshot(&self) -> Result<Dataset, StoreError> {
        Ok(self.dataset.read().map_err(lock_error)?.clone())
    }

    fn replace_campaigns(&self, campaigns: Vec<CampaignRecord>) -> Result<(), StoreError> {
        self.dataset.write().map_err(lock_error)?.campaigns = campaigns;
        Ok(())
    }

    fn replace_time_series(&self, points: Vec<TimeSeriesPoint>) -> Result<(), StoreError> {
        self.dataset.write().map_err(lock_error)?.time_series = points;
        Ok(())
    }

    fn reset(&self, dataset: Dataset) -> Result<(), StoreError> {
        *self.dataset.write().map_err(lock_error)? = dataset;
        Ok(())
    }
}
