/// Stroke Client: the single point of entry for stroke counts in the fortune engine.
///
/// ARCHITECTURAL RULE: stroke counts come from the external oracle only.
/// There is no local estimation; if the oracle is down, the lookup fails.
///
/// `StrokeClient` owns the process-lifetime cache. It is constructed once in
/// `main`, shared through `AppState`, and only emptied by `clear_cache`.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

pub mod http;

pub use http::HttpStrokeOracle;

#[derive(Debug, Error)]
pub enum StrokeError {
    /// Transport failure, non-success status or a malformed body. The oracle
    /// never yields a guessed count, so every failure collapses to this kind.
    #[error("stroke service unavailable: {0}")]
    Unavailable(String),
}

/// The raw stroke oracle. Implement this to swap the transport without
/// touching the cache or the fortune calculators.
#[async_trait]
pub trait StrokeOracle: Send + Sync {
    /// Total strokes for a whole string (whitespace is not counted).
    async fn stroke_count(&self, text: &str) -> Result<u32, StrokeError>;

    /// Strokes for a single character.
    async fn char_strokes(&self, ch: char) -> Result<u32, StrokeError>;

    /// Totals for several names in one round trip, in request order.
    async fn batch_stroke_counts(&self, names: &[String]) -> Result<Vec<(String, u32)>, StrokeError>;

    async fn is_healthy(&self) -> bool;
}

/// Point-in-time view of the cache, exposed on the admin endpoint.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Caching front for a `StrokeOracle`. Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct StrokeClient {
    oracle: Arc<dyn StrokeOracle>,
    cache: Arc<RwLock<HashMap<String, u32>>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl StrokeClient {
    pub fn new(oracle: Arc<dyn StrokeOracle>) -> Self {
        Self {
            oracle,
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Total strokes for `text`. Blank input is 0 and never reaches the oracle.
    pub async fn strokes_of(&self, text: &str) -> Result<u32, StrokeError> {
        let key = text.trim();
        if key.is_empty() {
            return Ok(0);
        }

        if let Some(strokes) = self.cached(key) {
            debug!("Stroke cache hit: {key} = {strokes}");
            return Ok(strokes);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let strokes = self.oracle.stroke_count(key).await?;
        self.store(key.to_string(), strokes);

        info!("Resolved strokes via oracle: {key} = {strokes}");
        Ok(strokes)
    }

    /// Strokes for a single character, sharing the same cache as `strokes_of`.
    pub async fn strokes_of_char(&self, ch: char) -> Result<u32, StrokeError> {
        if ch.is_whitespace() {
            return Ok(0);
        }

        let key = ch.to_string();
        if let Some(strokes) = self.cached(&key) {
            debug!("Stroke cache hit: {key} = {strokes}");
            return Ok(strokes);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let strokes = self.oracle.char_strokes(ch).await?;
        info!("Resolved character strokes via oracle: {key} = {strokes}");
        self.store(key, strokes);
        Ok(strokes)
    }

    /// Resolves several names at once. Cached names are answered locally and
    /// only the remainder is sent to the oracle's batch endpoint.
    pub async fn strokes_of_many(&self, names: &[String]) -> Result<Vec<(String, u32)>, StrokeError> {
        let mut resolved: HashMap<String, u32> = HashMap::new();
        let mut pending: Vec<String> = Vec::new();

        for name in names {
            let key = name.trim();
            if key.is_empty() {
                resolved.insert(key.to_string(), 0);
            } else if let Some(strokes) = self.cached(key) {
                resolved.insert(key.to_string(), strokes);
            } else if !pending.iter().any(|p| p == key) {
                pending.push(key.to_string());
            }
        }

        if !pending.is_empty() {
            self.misses.fetch_add(pending.len() as u64, Ordering::Relaxed);
            let fetched = self.oracle.batch_stroke_counts(&pending).await?;
            for (name, strokes) in fetched {
                let key = name.trim().to_string();
                self.store(key.clone(), strokes);
                resolved.insert(key, strokes);
            }
            info!("Resolved {} names via oracle batch", pending.len());
        }

        names
            .iter()
            .map(|name| {
                let key = name.trim();
                resolved
                    .get(key)
                    .map(|&strokes| (name.clone(), strokes))
                    .ok_or_else(|| {
                        StrokeError::Unavailable(format!("batch response omitted '{key}'"))
                    })
            })
            .collect()
    }

    pub async fn health_check(&self) -> bool {
        self.oracle.is_healthy().await
    }

    pub fn clear_cache(&self) {
        self.cache.write().clear();
        info!("Stroke cache cleared");
    }

    pub fn cache_size(&self) -> usize {
        self.cache.read().len()
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache_size(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn cached(&self, key: &str) -> Option<u32> {
        let strokes = self.cache.read().get(key).copied();
        if strokes.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        strokes
    }

    fn store(&self, key: String, strokes: u32) {
        self.cache.write().insert(key, strokes);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::{StrokeError, StrokeOracle};

    /// In-process oracle that counts calls. Unknown text resolves to its char count.
    #[derive(Default)]
    pub struct CountingOracle {
        pub known: HashMap<String, u32>,
        pub calls: AtomicUsize,
        pub batch_calls: AtomicUsize,
        pub down: AtomicBool,
    }

    impl CountingOracle {
        pub fn with(entries: &[(&str, u32)]) -> Self {
            Self {
                known: entries.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                ..Default::default()
            }
        }

        pub fn unavailable() -> Self {
            let oracle = Self::default();
            oracle.down.store(true, Ordering::SeqCst);
            oracle
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn lookup(&self, text: &str) -> Result<u32, StrokeError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(StrokeError::Unavailable("connection refused".to_string()));
            }
            Ok(self
                .known
                .get(text)
                .copied()
                .unwrap_or(text.chars().count() as u32))
        }
    }

    #[async_trait]
    impl StrokeOracle for CountingOracle {
        async fn stroke_count(&self, text: &str) -> Result<u32, StrokeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.lookup(text)
        }

        async fn char_strokes(&self, ch: char) -> Result<u32, StrokeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.lookup(&ch.to_string())
        }

        async fn batch_stroke_counts(
            &self,
            names: &[String],
        ) -> Result<Vec<(String, u32)>, StrokeError> {
            self.batch_calls.fetch_add(1, Ordering::SeqCst);
            names
                .iter()
                .map(|n| self.lookup(n).map(|s| (n.clone(), s)))
                .collect()
        }

        async fn is_healthy(&self) -> bool {
            !self.down.load(Ordering::SeqCst)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CountingOracle;
    use super::*;

    fn client_with(oracle: CountingOracle) -> (StrokeClient, Arc<CountingOracle>) {
        let oracle = Arc::new(oracle);
        (StrokeClient::new(oracle.clone()), oracle)
    }

    #[tokio::test]
    async fn test_blank_text_is_zero_without_oracle_call() {
        let (client, oracle) = client_with(CountingOracle::default());
        assert_eq!(client.strokes_of("").await.unwrap(), 0);
        assert_eq!(client.strokes_of("   \t").await.unwrap(), 0);
        assert_eq!(oracle.calls(), 0);
        assert_eq!(client.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_repeated_lookup_hits_oracle_once() {
        let (client, oracle) = client_with(CountingOracle::with(&[("王小明", 15)]));

        for _ in 0..5 {
            assert_eq!(client.strokes_of("王小明").await.unwrap(), 15);
        }

        assert_eq!(oracle.calls(), 1);
        let stats = client.cache_stats();
        assert_eq!(stats.hits, 4);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_lookup_key_is_trimmed() {
        let (client, oracle) = client_with(CountingOracle::with(&[("王小明", 15)]));
        client.strokes_of("  王小明 ").await.unwrap();
        client.strokes_of("王小明").await.unwrap();
        assert_eq!(oracle.calls(), 1);
        assert_eq!(client.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_clear_cache_resets_size_and_refetches() {
        let (client, oracle) = client_with(CountingOracle::with(&[("林", 8)]));
        client.strokes_of("林").await.unwrap();
        assert_eq!(client.cache_size(), 1);

        client.clear_cache();
        assert_eq!(client.cache_size(), 0);

        client.strokes_of("林").await.unwrap();
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test]
    async fn test_char_lookup_shares_cache() {
        let (client, oracle) = client_with(CountingOracle::with(&[("王", 4)]));
        assert_eq!(client.strokes_of_char('王').await.unwrap(), 4);
        assert_eq!(client.strokes_of("王").await.unwrap(), 4);
        assert_eq!(oracle.calls(), 1);
        assert_eq!(client.strokes_of_char(' ').await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_oracle_fails_and_caches_nothing() {
        let (client, _) = client_with(CountingOracle::unavailable());
        let err = client.strokes_of("王小明").await.unwrap_err();
        assert!(matches!(err, StrokeError::Unavailable(_)));
        assert_eq!(client.cache_size(), 0);
        assert!(!client.health_check().await);
    }

    #[tokio::test]
    async fn test_batch_only_sends_uncached_names() {
        let (client, oracle) = client_with(CountingOracle::with(&[("王小明", 15), ("陳美麗", 36)]));
        client.strokes_of("王小明").await.unwrap();

        let names = vec!["王小明".to_string(), "陳美麗".to_string(), " ".to_string()];
        let result = client.strokes_of_many(&names).await.unwrap();

        assert_eq!(
            result,
            vec![
                ("王小明".to_string(), 15),
                ("陳美麗".to_string(), 36),
                (" ".to_string(), 0)
            ]
        );
        assert_eq!(oracle.batch_calls.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(client.cache_size(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_lookups_keep_cache_consistent() {
        let (client, _) = client_with(CountingOracle::default());

        let mut handles = Vec::new();
        for i in 0..32 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                let text = format!("名{}", i % 8);
                client.strokes_of(&text).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(client.cache_size(), 8);
    }
}
