use crate::core::{Competition, FootballDataSource, MatchRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct Entry<T> {
    stored_at: Instant,
    value: T,
}

impl<T: Clone> Entry<T> {
    fn fresh(&self, ttl: Duration) -> Option<T> {
        (self.stored_at.elapsed() < ttl).then(|| self.value.clone())
    }
}

/// Time-bounded cache in front of another [`FootballDataSource`].
///
/// Only successful responses are stored. Entries are keyed by competition and
/// status; the API key is not part of the key.
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    matches: RwLock<HashMap<String, Entry<Vec<MatchRecord>>>>,
    competitions: RwLock<Option<Entry<Vec<Competition>>>>,
}

impl<S: FootballDataSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            matches: RwLock::new(HashMap::new()),
            competitions: RwLock::new(None),
        }
    }

    pub async fn clear(&self) {
        self.matches.write().await.clear();
        *self.competitions.write().await = None;
    }
}

#[async_trait]
impl<S: FootballDataSource> FootballDataSource for CachedSource<S> {
    async fn competition_matches(
        &self,
        api_key: &str,
        code: &str,
        status: &str,
    ) -> Result<Vec<MatchRecord>> {
        let key = format!("{}:{}", code, status);
        if let Some(hit) = self
            .matches
            .read()
            .await
            .get(&key)
            .and_then(|entry| entry.fresh(self.ttl))
        {
            tracing::debug!("Cache hit for {}", key);
            return Ok(hit);
        }

        let records = self.inner.competition_matches(api_key, code, status).await?;
        self.matches.write().await.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                value: records.clone(),
            },
        );
        Ok(records)
    }

    async fn competitions(&self, api_key: &str) -> Result<Vec<Competition>> {
        if let Some(hit) = self
            .competitions
            .read()
            .await
            .as_ref()
            .and_then(|entry| entry.fresh(self.ttl))
        {
            tracing::debug!("Cache hit for competitions");
            return Ok(hit);
        }

        let competitions = self.inner.competitions(api_key).await?;
        *self.competitions.write().await = Some(Entry {
            stored_at: Instant::now(),
            value: competitions.clone(),
        });
        Ok(competitions)
    }
}
