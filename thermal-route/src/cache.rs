//! Caching layer for routing service responses.
//!
//! Route answers depend only on the start, end and target hour, so repeated
//! selections of the same pair (a user toggling between two hours, or
//! re-picking a building) can be served without another round-trip.
//! Failures are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{RouteRequest, RouteResult};
use crate::service::{RouteError, RouteProvider};

/// Cache key: bit patterns of the start and end coordinates plus the target
/// hour as a Unix timestamp. The sequence id is deliberately not part of it.
type RouteKey = ([u64; 4], i64);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 256,
        }
    }
}

fn route_key(request: &RouteRequest) -> RouteKey {
    let (start, end) = (request.start(), request.end());
    (
        [
            start.longitude().to_bits(),
            start.latitude().to_bits(),
            end.longitude().to_bits(),
            end.latitude().to_bits(),
        ],
        request.time().timestamp(),
    )
}

/// Route provider with caching.
///
/// Wraps any [`RouteProvider`] and caches successful routes.
pub struct CachedRouteClient<P> {
    inner: P,
    routes: MokaCache<RouteKey, Arc<RouteResult>>,
}

impl<P: RouteProvider> CachedRouteClient<P> {
    /// Create a new cached client.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, routes }
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.routes.invalidate_all();
    }
}

impl<P: RouteProvider> RouteProvider for CachedRouteClient<P> {
    async fn fetch(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        let key = route_key(request);

        // Try cache first
        if let Some(cached) = self.routes.get(&key).await {
            trace!(seq = %request.sequence_id(), "route cache hit");
            return Ok(RouteResult::clone(&cached));
        }

        let route = self.inner.fetch(request).await?;
        self.routes.insert(key, Arc::new(route.clone())).await;

        Ok(route)
    }
}
