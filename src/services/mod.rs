pub mod calendar;
pub mod push;
pub mod storage;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn save_photo(&self, key: &str, body: Vec<u8>) -> anyhow::Result<()>;

    async fn get_photo_as_bytes(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

/// A message handed off to the push gateway. Delivery is fire and forget:
/// the gateway owns the trigger time, no receipt is read back.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PushMessage {
    /// Opaque device token registered by the client.
    pub to: String,
    pub title: String,
    pub body: String,
    pub trigger_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushService: Send + Sync {
    async fn schedule_push(&self, message: &PushMessage) -> anyhow::Result<()>;
}

pub type ImplStorageService = Box<dyn StorageService>;
pub type ImplPushService = Box<dyn PushService>;
