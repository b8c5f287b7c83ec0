use super::cvss::{cvss_v2_base_score, cvss_v3_base_score};
use crate::ports::outbound::{VulnerabilityQuery, VulnerabilityRepository};
use crate::sbom_analysis::domain::{VulnerabilityRecord, UNKNOWN_VERSION};
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OSV API client for fetching vulnerability data
///
/// Uses the OSV.dev single query API: one request per package version,
/// following `next_page_token` until every page is read. Components without
/// a known version are not looked up, since OSV would match every release.
///
/// # Security
/// - Implements timeout (30 seconds)
/// - Does not retry failed requests (the enrichment use case recovers per component)
pub struct OsvClient {
    client: reqwest::Client,
    api_url: String,
}

impl OsvClient {
    const API_ENDPOINT: &'static str = "https://api.osv.dev/v1/query";
    const TIMEOUT_SECONDS: u64 = 30;
    const MAX_PAGES: usize = 10;

    /// Creates a new OSV API client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_api_url(Self::API_ENDPOINT)
    }

    /// Creates a client against a different OSV-compatible endpoint
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("sbom-analyzer/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    async fn fetch_page(&self, query: &OsvQuery) -> Result<OsvQueryResponse> {
        let response = self.client.post(&self.api_url).json(query).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("OSV API returned status code {}", response.status());
        }

        Ok(response.json().await?)
    }

    /// Converts a single OSV vulnerability to a source record
    fn convert_to_record(osv_vuln: OsvVulnerability) -> VulnerabilityRecord {
        let vector_of = |kind: &str| {
            osv_vuln
                .severity
                .iter()
                .find(|s| s.severity_type == kind)
                .map(|s| s.score.as_str())
        };
        let cvss_v3 = vector_of("CVSS_V3").and_then(score_from_vector(cvss_v3_base_score));
        let cvss_v2 = vector_of("CVSS_V2").and_then(score_from_vector(cvss_v2_base_score));

        let severity = osv_vuln
            .database_specific
            .as_ref()
            .and_then(|db| db.severity.clone());

        VulnerabilityRecord {
            id: osv_vuln.id,
            aliases: osv_vuln.aliases,
            summary: osv_vuln.summary.or(osv_vuln.details),
            severity,
            published: osv_vuln.published,
            cvss_v2,
            cvss_v3,
            known_exploited: false,
            epss_score: None,
            references: osv_vuln.references.into_iter().map(|r| r.url).collect(),
        }
    }
}

#[async_trait]
impl VulnerabilityRepository for OsvClient {
    async fn fetch_vulnerabilities(
        &self,
        query: &VulnerabilityQuery,
    ) -> Result<Vec<VulnerabilityRecord>> {
        if query.name.trim().is_empty() {
            anyhow::bail!("Cannot query OSV for a component without a name");
        }

        let version = query.version.trim();
        if version.is_empty() || version.eq_ignore_ascii_case(UNKNOWN_VERSION) {
            tracing::debug!(
                package = %query.name,
                "Skipping OSV lookup for a component without a version"
            );
            return Ok(Vec::new());
        }

        let mut osv_query = OsvQuery {
            package: OsvPackage {
                name: query.name.clone(),
                ecosystem: osv_ecosystem(&query.ecosystem),
            },
            version: version.to_string(),
            page_token: None,
        };

        let mut records = Vec::new();
        for _ in 0..Self::MAX_PAGES {
            let page = self.fetch_page(&osv_query).await?;
            records.extend(page.vulns.into_iter().map(Self::convert_to_record));

            match page.next_page_token {
                Some(token) if !token.is_empty() => osv_query.page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(
            package = %query.name,
            version = %query.version,
            ecosystem = %osv_query.package.ecosystem,
            count = records.len(),
            "OSV lookup finished"
        );
        Ok(records)
    }
}

/// Maps a package-URL type to the ecosystem name used by OSV
///
/// Unknown types are passed through unchanged.
pub fn osv_ecosystem(purl_type: &str) -> String {
    let mapped = match purl_type.to_ascii_lowercase().as_str() {
        "npm" => "npm",
        "pypi" => "PyPI",
        "maven" => "Maven",
        "cargo" => "crates.io",
        "golang" => "Go",
        "nuget" => "NuGet",
        "gem" => "RubyGems",
        "composer" => "Packagist",
        "pub" => "Pub",
        "hex" => "Hex",
        _ => return purl_type.to_string(),
    };
    mapped.to_string()
}

/// Accepts either a vector string or a plain numeric score
fn score_from_vector(calculate: fn(&str) -> Option<f32>) -> impl Fn(&str) -> Option<f32> {
    move |score| {
        score
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|s| (0.0..=10.0).contains(s))
            .or_else(|| calculate(score))
    }
}

// OSV API request/response structures

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvPackage,
    version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct OsvPackage {
    name: String,
    ecosystem: String,
}

#[derive(Debug, Deserialize)]
struct OsvQueryResponse {
    #[serde(default)]
    vulns: Vec<OsvVulnerability>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerability {
    id: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    published: Option<String>,
    #[serde(default)]
    severity: Vec<OsvSeverity>,
    #[serde(default)]
    database_specific: Option<DatabaseSpecific>,
    #[serde(default)]
    references: Vec<OsvReference>,
}

#[derive(Debug, Deserialize)]
struct OsvSeverity {
    #[serde(rename = "type")]
    severity_type: String, // "CVSS_V3"
    score: String,         // e.g., "CVSS:3.1/AV:N/AC:L/..."
}

#[derive(Debug, Deserialize)]
struct DatabaseSpecific {
    #[serde(default)]
    severity: Option<String>, // "CRITICAL", "HIGH", "MODERATE", "LOW"
}

#[derive(Debug, Deserialize)]
struct OsvReference {
    url: String,
}
