use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bharat_digital::bharat_cache::{CacheError, RecordBatch, RecordStore};
use bharat_digital::bharat_models::AggregateRecord;

/// `RecordStore` over a map, with call counters and failure switches.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, AggregateRecord>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, record: AggregateRecord) {
        self.records.lock().unwrap().insert(key.to_string(), record);
    }

    pub fn get(&self, key: &str) -> Option<AggregateRecord> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.records.lock().unwrap().keys().cloned().collect()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put_records(&self, batch: &RecordBatch) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("write refused".into()));
        }

        let mut records = self.records.lock().unwrap();
        for (key, record) in batch {
            records.insert(key.clone(), record.clone());
        }
        Ok(())
    }

    async fn get_records(
        &self,
        keys: &[String],
    ) -> Result<Vec<Option<AggregateRecord>>, CacheError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::Backend("connection reset".into()));
        }

        let records = self.records.lock().unwrap();
        Ok(keys.iter().map(|key| records.get(key).cloned()).collect())
    }
}
