use crate::sbom_analysis::domain::{Severity, Vulnerability, VulnerabilityRecord};

const NO_SUMMARY: &str = "No summary available";

/// VulnerabilityMapper turns source records into domain vulnerabilities
///
/// Severity prefers the source's explicit label and falls back to the CVSS
/// bands of the highest available score. The CVE alias is the first alias
/// starting with `CVE-`, else the record's own id.
pub struct VulnerabilityMapper;

impl VulnerabilityMapper {
    pub fn map(record: VulnerabilityRecord) -> Vulnerability {
        let cve_id = Self::cve_alias(&record).unwrap_or_else(|| record.id.clone());

        let cvss_max = Vulnerability::max_score(
            record.cvss_v2.filter(|s| (0.0..=10.0).contains(s)),
            record.cvss_v3.filter(|s| (0.0..=10.0).contains(s)),
        );
        let severity = record
            .severity
            .as_deref()
            .and_then(Severity::parse)
            .unwrap_or_else(|| Severity::from_cvss_score(cvss_max));

        let summary = record
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| NO_SUMMARY.to_string());

        Vulnerability::new(record.id, cve_id, severity, summary)
            .with_published(record.published)
            .with_cvss(record.cvss_v2, record.cvss_v3)
            .with_known_exploited(record.known_exploited)
            .with_epss_score(record.epss_score)
            .with_references(record.references)
    }

    pub fn map_all(records: Vec<VulnerabilityRecord>) -> Vec<Vulnerability> {
        records.into_iter().map(Self::map).collect()
    }

    fn cve_alias(record: &VulnerabilityRecord) -> Option<String> {
        record
            .aliases
            .iter()
            .find(|a| a.starts_with("CVE-"))
            .cloned()
    }
}
