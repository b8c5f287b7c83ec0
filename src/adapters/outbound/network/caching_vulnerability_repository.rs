use crate::ports::outbound::{VulnerabilityQuery, VulnerabilityRepository};
use crate::sbom_analysis::domain::VulnerabilityRecord;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache key for vulnerability lookups
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    ecosystem: String,
    name: String,
    version: String,
}

impl CacheKey {
    fn new(query: &VulnerabilityQuery) -> Self {
        Self {
            ecosystem: query.ecosystem.to_ascii_lowercase(),
            name: query.name.clone(),
            version: query.version.clone(),
        }
    }
}

/// CachingVulnerabilityRepository wraps a VulnerabilityRepository and adds in-memory caching.
///
/// This adapter implements the decorator pattern to add caching capability
/// to any VulnerabilityRepository implementation. The cache is thread-safe and
/// suitable for concurrent access from one enrichment batch.
///
/// Only successful lookups are cached; a failed lookup is retried on the
/// next request. The cache lives as long as this object and is never
/// expired implicitly: callers invalidate it with [`Self::clear`].
pub struct CachingVulnerabilityRepository<R: VulnerabilityRepository> {
    inner: R,
    cache: Arc<DashMap<CacheKey, Vec<VulnerabilityRecord>>>,
}

impl<R: VulnerabilityRepository> CachingVulnerabilityRepository<R> {
    /// Creates a new caching repository wrapping the given inner repository
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Number of cached package versions
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops every cached lookup
    pub fn clear(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl<R: VulnerabilityRepository> VulnerabilityRepository for CachingVulnerabilityRepository<R> {
    async fn fetch_vulnerabilities(
        &self,
        query: &VulnerabilityQuery,
    ) -> Result<Vec<VulnerabilityRecord>> {
        let key = CacheKey::new(query);

        // Check cache first
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(package = %query.name, version = %query.version, "Vulnerability cache hit");
            return Ok(cached.clone());
        }

        // Cache miss: fetch from inner repository
        let records = self.inner.fetch_vulnerabilities(query).await?;

        self.cache.insert(key, records.clone());

        Ok(records)
    }
}
