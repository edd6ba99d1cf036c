//! Durable shared store for cross-instance markers.
//!
//! Write-only from this process: markers are never read back for admission.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;

use crate::error::Result;

#[async_trait]
pub trait DurableStore: Send + Sync {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}

// Used when no shared store is configured
#[derive(Debug, Default)]
pub struct NoopStore;

#[async_trait]
impl DurableStore for NoopStore {
    async fn put(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
        Ok(())
    }
}

// Redis-backed store, one SET .. EX per marker
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to `url` ("redis://127.0.0.1:6379"). The manager reconnects on
    /// its own after the initial connection succeeds.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl DurableStore for RedisStore {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        // redis rejects EX 0
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds).await?;
        Ok(())
    }
}
