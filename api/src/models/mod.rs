mod cache;
mod memory;
mod record;

pub use cache::RedisStore;
pub use memory::MemoryStore;
pub use record::{CandidateSummary, VerificationRecord, VerificationResults};

use anyhow::Result;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Where created verification requests live between create and lookup
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Last write wins
    async fn put(&self, record: &VerificationRecord) -> Result<()>;

    async fn get(&self, request_id: &str) -> Result<Option<VerificationRecord>>;
}

/// Verification event for webhook
pub enum Event {
    VerificationCompleted(String, String),
}

impl Event {
    /// Post the event, signed with `X-Signature: sha256=<hex hmac of body>`
    pub async fn send(self, url: &str, secret: &str) -> Result<()> {
        let client = reqwest::Client::new();

        let (event, params): (&str, Vec<serde_json::Value>) = match self {
            Event::VerificationCompleted(request_id, risk) => (
                "verification.completed",
                vec![request_id.into(), risk.into()],
            ),
        };

        let payload = serde_json::json!({
            "event": event,
            "params": params
        });
        let body = serde_json::to_string(&payload)?;
        let signature = sign(secret, &body)?;

        let response = client
            .post(url)
            .header("Content-Type", "application/json")
            .header("X-Signature", format!("sha256={signature}"))
            .body(body)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(anyhow::anyhow!("failed status code"))
        }
    }
}

fn sign(secret: &str, body: &str) -> Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| anyhow::anyhow!("invalid webhook secret"))?;
    mac.update(body.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_hex_sha256() {
        let sig = sign("whsec_test", r#"{"event":"verification.completed"}"#).unwrap();
        assert_eq!(sig.len(), 64);
        assert_eq!(sig, sign("whsec_test", r#"{"event":"verification.completed"}"#).unwrap());
        assert_ne!(sig, sign("whsec_other", r#"{"event":"verification.completed"}"#).unwrap());
    }
}
