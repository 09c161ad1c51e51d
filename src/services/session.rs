//! Per-visitor session data: the catalog home page visit counter

use std::collections::HashMap;

use async_trait::async_trait;
use redis::Client;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};

/// Storage for per-session counters
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Increment the visit counter of a session and return the new value.
    /// Concurrent calls on the same session never lose an increment.
    async fn incr_visits(&self, session_id: &str) -> AppResult<i64>;

    /// Storage round trip, used by the readiness check
    async fn ping(&self) -> AppResult<()>;
}

fn visits_key(session_id: &str) -> String {
    format!("session:{}:num_visits", session_id)
}

// ---------------------------------------------------------------------------
// Redis
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct RedisSessionStore {
    client: Client,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Open the client and check the server answers
    pub async fn new(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let store = Self { client, ttl_seconds };
        store.ping().await?;
        Ok(store)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn incr_visits(&self, session_id: &str) -> AppResult<i64> {
        let mut conn = self.connection().await?;
        let key = visits_key(session_id);

        let (visits,): (i64,) = redis::pipe()
            .atomic()
            .incr(&key, 1)
            .expire(&key, self.ttl_seconds as i64)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("Failed to increment visit counter: {}", e)))?;

        Ok(visits)
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::StorageUnavailable(format!("Redis connection test failed: {}", e)))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-process
// ---------------------------------------------------------------------------

/// Counters kept in process memory. Lost on restart and not shared
/// between server instances; sessions never expire.
#[derive(Default)]
pub struct MemorySessionStore {
    visits: Mutex<HashMap<String, i64>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn incr_visits(&self, session_id: &str) -> AppResult<i64> {
        let mut visits = self.visits.lock().await;
        let counter = visits.entry(visits_key(session_id)).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_visit_counts_one() {
        let store = MemorySessionStore::default();
        assert_eq!(store.incr_visits("abc").await.unwrap(), 1);
        assert_eq!(store.incr_visits("abc").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = MemorySessionStore::default();
        store.incr_visits("a").await.unwrap();
        store.incr_visits("a").await.unwrap();
        assert_eq!(store.incr_visits("b").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::default());

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.incr_visits("shared").await.unwrap() })
            })
            .collect();

        let mut seen = Vec::new();
        for handle in handles {
            seen.push(handle.await.unwrap());
        }
        seen.sort();

        assert_eq!(seen, (1..=50).collect::<Vec<i64>>());
        assert_eq!(store.incr_visits("shared").await.unwrap(), 51);
    }

    #[test]
    fn test_key_layout() {
        assert_eq!(visits_key("xyz"), "session:xyz:num_visits");
    }
}
