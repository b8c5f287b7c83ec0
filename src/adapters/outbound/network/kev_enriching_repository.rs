use super::kev_catalog::KevCatalog;
use crate::ports::outbound::{VulnerabilityQuery, VulnerabilityRepository};
use crate::sbom_analysis::domain::VulnerabilityRecord;
use crate::shared::Result;
use async_trait::async_trait;

/// KevEnrichingRepository flags records listed in the CISA KEV catalog
///
/// Decorates any VulnerabilityRepository: records whose id or one of whose
/// aliases appears in the catalog get `known_exploited = true`. Records
/// already flagged by the inner source stay flagged.
pub struct KevEnrichingRepository<R: VulnerabilityRepository> {
    inner: R,
    catalog: KevCatalog,
}

impl<R: VulnerabilityRepository> KevEnrichingRepository<R> {
    pub fn new(inner: R, catalog: KevCatalog) -> Self {
        Self { inner, catalog }
    }

    fn is_listed(&self, record: &VulnerabilityRecord) -> bool {
        std::iter::once(&record.id)
            .chain(record.aliases.iter())
            .any(|id| self.catalog.contains(id))
    }
}

#[async_trait]
impl<R: VulnerabilityRepository> VulnerabilityRepository for KevEnrichingRepository<R> {
    async fn fetch_vulnerabilities(
        &self,
        query: &VulnerabilityQuery,
    ) -> Result<Vec<VulnerabilityRecord>> {
        let mut records = self.inner.fetch_vulnerabilities(query).await?;
        for record in records.iter_mut() {
            if !record.known_exploited && self.is_listed(record) {
                tracing::debug!(id = %record.id, package = %query.name, "Listed in KEV catalog");
                record.known_exploited = true;
            }
        }
        Ok(records)
    }
}
