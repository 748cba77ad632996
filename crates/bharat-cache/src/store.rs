//! Record storage seam shared by the pipeline (writes) and the query API (reads).

use async_trait::async_trait;
use bharat_models::AggregateRecord;
use std::collections::BTreeMap;
use tracing::instrument;

use crate::redis::{CacheError, RedisCache};

/// One fiscal year's worth of records, keyed by cache key.
pub type RecordBatch = BTreeMap<String, AggregateRecord>;

/// Bulk key-value access to aggregate records.
///
/// Writes replace any existing value for the same key. Reads return one slot
/// per requested key, in request order, `None` for keys that are absent.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put_records(&self, batch: &RecordBatch) -> Result<(), CacheError>;

    async fn get_records(&self, keys: &[String])
    -> Result<Vec<Option<AggregateRecord>>, CacheError>;
}

#[async_trait]
impl RecordStore for RedisCache {
    #[instrument(skip(self, batch), fields(batch.len = batch.len()))]
    async fn put_records(&self, batch: &RecordBatch) -> Result<(), CacheError> {
        let pairs: Vec<(&String, &AggregateRecord)> = batch.iter().collect();
        self.mset_json(&pairs).await
    }

    async fn get_records(
        &self,
        keys: &[String],
    ) -> Result<Vec<Option<AggregateRecord>>, CacheError> {
        self.mget_json(keys).await
    }
}
