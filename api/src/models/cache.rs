use super::{RequestStore, VerificationRecord};
use anyhow::Result;
use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

/// Keep verification requests for 7 days
const TTL: u64 = 7 * 24 * 3600;

pub struct RedisStore {
    pub redis: RedisClient,
}

fn key(request_id: &str) -> String {
    format!("mtv:req:{}", request_id)
}

#[async_trait]
impl RequestStore for RedisStore {
    async fn put(&self, record: &VerificationRecord) -> Result<()> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let value = serde_json::to_string(record)?;
        let _: () = conn.set_ex(key(&record.request_id), value, TTL).await?;

        debug!("Stored verification request in Redis: {}", record.request_id);
        Ok(())
    }

    async fn get(&self, request_id: &str) -> Result<Option<VerificationRecord>> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key(request_id)).await?;

        match value {
            Some(v) => Ok(Some(serde_json::from_str(&v)?)),
            None => Ok(None),
        }
    }
}
