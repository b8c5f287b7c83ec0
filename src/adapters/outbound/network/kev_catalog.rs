//! CISA KEV (Known Exploited Vulnerabilities) catalog

use crate::shared::Result;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

/// Default CISA KEV catalog URL
pub const KEV_CATALOG_URL: &str =
    "https://www.cisa.gov/sites/default/files/feeds/known_exploited_vulnerabilities.json";

const KEV_TIMEOUT_SECONDS: u64 = 30;

/// CISA KEV catalog response structure (fields the analyzer needs)
#[derive(Debug, Deserialize)]
struct KevCatalogResponse {
    #[serde(rename = "catalogVersion", default)]
    catalog_version: String,
    vulnerabilities: Vec<KevVulnerability>,
}

#[derive(Debug, Deserialize)]
struct KevVulnerability {
    #[serde(rename = "cveID")]
    cve_id: String,
}

/// In-memory KEV catalog for fast lookups
#[derive(Debug, Clone, Default)]
pub struct KevCatalog {
    cve_ids: HashSet<String>,
    version: String,
}

impl KevCatalog {
    /// Builds a catalog from a list of CVE ids
    pub fn from_ids<I, S>(cve_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            cve_ids: cve_ids
                .into_iter()
                .map(|id| normalize_cve_id(id.as_ref()))
                .collect(),
            version: String::new(),
        }
    }

    /// Parses the catalog JSON feed published by CISA
    ///
    /// The feed must be a JSON object with a `vulnerabilities` array.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse KEV catalog: {}", e))?;
        if !value.is_object() {
            anyhow::bail!("Failed to parse KEV catalog: expected a JSON object");
        }
        let response: KevCatalogResponse = serde_json::from_value(value)
            .map_err(|e| anyhow::anyhow!("Failed to parse KEV catalog: {}", e))?;
        let mut catalog = Self::from_ids(response.vulnerabilities.iter().map(|v| &v.cve_id));
        catalog.version = response.catalog_version;
        Ok(catalog)
    }

    /// Downloads the catalog from CISA
    pub async fn fetch() -> Result<Self> {
        Self::fetch_from(KEV_CATALOG_URL).await
    }

    pub async fn fetch_from(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(KEV_TIMEOUT_SECONDS))
            .user_agent(format!("sbom-analyzer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let response = client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("KEV catalog returned status code {}", response.status());
        }

        let catalog = Self::from_json(&response.text().await?)?;
        tracing::info!(version = %catalog.version, entries = catalog.len(), "Loaded KEV catalog");
        Ok(catalog)
    }

    /// Check if a CVE ID is in the KEV catalog
    pub fn contains(&self, cve_id: &str) -> bool {
        self.cve_ids.contains(&normalize_cve_id(cve_id))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.cve_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cve_ids.is_empty()
    }
}

/// Normalize CVE ID for consistent lookup
fn normalize_cve_id(cve_id: &str) -> String {
    cve_id.trim().to_uppercase()
}
