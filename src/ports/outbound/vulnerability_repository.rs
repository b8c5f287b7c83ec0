use crate::sbom_analysis::domain::{Component, VulnerabilityRecord};
use crate::shared::Result;
use async_trait::async_trait;

/// Lookup key sent to a vulnerability source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VulnerabilityQuery {
    pub name: String,
    pub version: String,
    /// Ecosystem as found in the SBOM (purl type, e.g. `npm`, `pypi`)
    pub ecosystem: String,
}

impl VulnerabilityQuery {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        ecosystem: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ecosystem: ecosystem.into(),
        }
    }

    pub fn for_component(component: &Component) -> Self {
        Self::new(component.name(), component.version(), component.ecosystem())
    }
}

/// VulnerabilityRepository port for looking up known vulnerabilities
///
/// This port abstracts the external vulnerability database (e.g., OSV)
/// queried by package name, version and ecosystem.
///
/// # Async Support
/// Lookups are async so a batch of components can be queried concurrently.
/// Implementations must be `Send + Sync` to support concurrent access.
#[async_trait]
pub trait VulnerabilityRepository: Send + Sync {
    /// Fetches the vulnerabilities affecting one package version
    ///
    /// # Arguments
    /// * `query` - Package name, version and ecosystem
    ///
    /// # Returns
    /// Zero or more records. Optional fields the source does not provide
    /// are left empty rather than reported as errors.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The network request fails or times out
    /// - The source answers with an error status
    /// - The response cannot be parsed
    ///
    /// The enrichment use case recovers from these errors per component.
    async fn fetch_vulnerabilities(
        &self,
        query: &VulnerabilityQuery,
    ) -> Result<Vec<VulnerabilityRecord>>;
}

#[async_trait]
impl<T: VulnerabilityRepository + ?Sized> VulnerabilityRepository for Box<T> {
    async fn fetch_vulnerabilities(
        &self,
        query: &VulnerabilityQuery,
    ) -> Result<Vec<VulnerabilityRecord>> {
        (**self).fetch_vulnerabilities(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_for_component() {
        let component = Component::builder("c1", "requests")
            .version(Some("2.31.0".to_string()))
            .ecosystem("pypi")
            .build();

        assert_eq!(
            VulnerabilityQuery::for_component(&component),
            VulnerabilityQuery::new("requests", "2.31.0", "pypi")
        );
    }
}
