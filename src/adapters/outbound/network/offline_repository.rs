use crate::ports::outbound::{VulnerabilityQuery, VulnerabilityRepository};
use crate::sbom_analysis::domain::VulnerabilityRecord;
use crate::shared::Result;
use async_trait::async_trait;

/// OfflineVulnerabilityRepository never reports vulnerabilities
///
/// Stands in for the network sources when no lookups are wanted: every
/// component is scored on metadata alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineVulnerabilityRepository;

impl OfflineVulnerabilityRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VulnerabilityRepository for OfflineVulnerabilityRepository {
    async fn fetch_vulnerabilities(
        &self,
        _query: &VulnerabilityQuery,
    ) -> Result<Vec<VulnerabilityRecord>> {
        Ok(Vec::new())
    }
}
