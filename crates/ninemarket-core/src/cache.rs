//! Short-lived cache for token prices.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::CurrencyTicker;

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    price: f64,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

/// Token price per `(symbol, currency)`, kept for one refresh interval.
#[derive(Debug, Clone)]
pub struct PriceCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner {
                entries: HashMap::new(),
                ttl,
            })),
        }
    }

    pub fn key(symbol: &str, currency: CurrencyTicker) -> String {
        format!("{}:{currency}", symbol.to_ascii_lowercase())
    }

    pub async fn get(&self, key: &str) -> Option<f64> {
        let inner = self.inner.read().await;
        inner
            .entries
            .get(key)
            .filter(|entry| Instant::now() <= entry.expires_at)
            .map(|entry| entry.price)
    }

    pub async fn put(&self, key: String, price: f64) {
        let mut inner = self.inner.write().await;
        if inner.ttl == Duration::ZERO {
            return;
        }
        let expires_at = Instant::now() + inner.ttl;
        inner.entries.insert(key, CacheEntry { price, expires_at });
    }

    pub async fn invalidate(&self, key: &str) {
        self.inner.write().await.entries.remove(key);
    }

    pub async fn clear_expired(&self) {
        let now = Instant::now();
        self.inner
            .write()
            .await
            .entries
            .retain(|_, entry| entry.expires_at > now);
    }

    /// Includes expired entries not yet cleared.
    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_until_expiry() {
        let cache = PriceCache::new(Duration::from_millis(100));
        let key = PriceCache::key("WNCG", CurrencyTicker::Usd);
        assert_eq!(key, "wncg:USD");

        assert_eq!(cache.get(&key).await, None);
        cache.put(key.clone(), 0.042).await;
        assert_eq!(cache.get(&key).await, Some(0.042));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(cache.get(&key).await, None);
        cache.clear_expired().await;
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn keys_are_per_currency() {
        let cache = PriceCache::new(Duration::from_secs(60));
        cache
            .put(PriceCache::key("wncg", CurrencyTicker::Usd), 0.04)
            .await;
        assert_eq!(
            cache.get(&PriceCache::key("wncg", CurrencyTicker::Krw)).await,
            None
        );

        cache
            .invalidate(&PriceCache::key("wncg", CurrencyTicker::Usd))
            .await;
        assert_eq!(cache.len().await, 0);
    }
}
