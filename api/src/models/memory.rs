use super::{RequestStore, VerificationRecord};
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Process-lifetime store, no eviction; lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    requests: DashMap<String, VerificationRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn put(&self, record: &VerificationRecord) -> Result<()> {
        self.requests
            .insert(record.request_id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, request_id: &str) -> Result<Option<VerificationRecord>> {
        Ok(self.requests.get(request_id).map(|r| r.value().clone()))
    }
}
