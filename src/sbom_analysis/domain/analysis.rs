use super::{Component, DependencyEdge, SbomDocument, Severity, Vulnerability};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Field of a component inspected by the data quality audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityField {
    Purl,
    Hashes,
    Supplier,
}

impl QualityField {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityField::Purl => "purl",
            QualityField::Hashes => "hashes",
            QualityField::Supplier => "supplier",
        }
    }
}

/// One missing identity/provenance field on one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityIssue {
    pub component_id: String,
    pub field: QualityField,
    pub message: String,
}

/// Per-component summary of the data quality audit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityFlags {
    pub missing_purl: bool,
    pub missing_hashes: bool,
    pub missing_supplier: bool,
}

impl DataQualityFlags {
    pub fn is_clean(&self) -> bool {
        !(self.missing_purl || self.missing_hashes || self.missing_supplier)
    }
}

/// Enrichment and scoring outcome for a single component
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentAnalysis {
    pub component: Component,
    pub vulnerabilities: Vec<Vulnerability>,
    pub risk_score: u8,
    pub quality_flags: DataQualityFlags,
}

/// One of the five NTIA minimum-elements checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NtiaCheck {
    DependencyRelationships,
    AuthorOrTool,
    Timestamp,
    SpecVersion,
    UniqueIdentifier,
}

impl NtiaCheck {
    pub const ALL: [NtiaCheck; 5] = [
        NtiaCheck::DependencyRelationships,
        NtiaCheck::AuthorOrTool,
        NtiaCheck::Timestamp,
        NtiaCheck::SpecVersion,
        NtiaCheck::UniqueIdentifier,
    ];

    /// Display name, reported verbatim in `failed_checks`
    pub fn name(&self) -> &'static str {
        match self {
            NtiaCheck::DependencyRelationships => "Dependency Relationships",
            NtiaCheck::AuthorOrTool => "Author or Tool Information",
            NtiaCheck::Timestamp => "Timestamp",
            NtiaCheck::SpecVersion => "Spec Version",
            NtiaCheck::UniqueIdentifier => "Serial Number or Namespace",
        }
    }
}

/// Result of the NTIA minimum-elements validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NtiaCompliance {
    pub has_dependency_graph: bool,
    pub has_author_or_tool: bool,
    pub has_timestamp: bool,
    pub has_spec_version: bool,
    pub has_unique_identifier: bool,
    pub compliant: bool,
    /// Percentage of checks passed, 0..=100
    pub score: u8,
    pub failed_checks: Vec<String>,
}

impl NtiaCompliance {
    pub fn from_checks(
        has_dependency_graph: bool,
        has_author_or_tool: bool,
        has_timestamp: bool,
        has_spec_version: bool,
        has_unique_identifier: bool,
    ) -> Self {
        let outcomes = [
            (NtiaCheck::DependencyRelationships, has_dependency_graph),
            (NtiaCheck::AuthorOrTool, has_author_or_tool),
            (NtiaCheck::Timestamp, has_timestamp),
            (NtiaCheck::SpecVersion, has_spec_version),
            (NtiaCheck::UniqueIdentifier, has_unique_identifier),
        ];

        let failed_checks: Vec<String> = outcomes
            .iter()
            .filter(|(_, passed)| !passed)
            .map(|(check, _)| check.name().to_string())
            .collect();
        let passed = outcomes.len() - failed_checks.len();
        let score = (passed as f64 / outcomes.len() as f64 * 100.0).round() as u8;

        Self {
            has_dependency_graph,
            has_author_or_tool,
            has_timestamp,
            has_spec_version,
            has_unique_identifier,
            compliant: failed_checks.is_empty(),
            score,
            failed_checks,
        }
    }

    pub fn passed(&self, check: NtiaCheck) -> bool {
        match check {
            NtiaCheck::DependencyRelationships => self.has_dependency_graph,
            NtiaCheck::AuthorOrTool => self.has_author_or_tool,
            NtiaCheck::Timestamp => self.has_timestamp,
            NtiaCheck::SpecVersion => self.has_spec_version,
            NtiaCheck::UniqueIdentifier => self.has_unique_identifier,
        }
    }
}

/// Vulnerability counts by severity across all component analyses
///
/// Invariant: `critical + high + medium + low + unknown == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VulnerabilitySummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unknown: usize,
    pub total: usize,
}

impl VulnerabilitySummary {
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unknown => self.unknown,
        }
    }

    pub(crate) fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
            Severity::Unknown => self.unknown += 1,
        }
        self.total += 1;
    }
}

/// Aggregate outcome of one analysis run, owned by the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub document: SbomDocument,
    pub components: Vec<ComponentAnalysis>,
    pub dependencies: Vec<DependencyEdge>,
    pub vulnerability_summary: VulnerabilitySummary,
    pub ntia_compliance: NtiaCompliance,
    pub data_quality_issues: Vec<DataQualityIssue>,
    pub overall_risk_score: u8,
    pub analyzed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_checks_passed() {
        let compliance = NtiaCompliance::from_checks(true, true, true, true, true);
        assert!(compliance.compliant);
        assert_eq!(compliance.score, 100);
        assert!(compliance.failed_checks.is_empty());
    }

    #[test]
    fn test_failed_checks_are_named_in_order() {
        let compliance = NtiaCompliance::from_checks(false, true, false, true, true);
        assert!(!compliance.compliant);
        assert_eq!(compliance.score, 60);
        assert_eq!(
            compliance.failed_checks,
            vec!["Dependency Relationships".to_string(), "Timestamp".to_string()]
        );
    }

    #[test]
    fn test_no_checks_passed() {
        let compliance = NtiaCompliance::from_checks(false, false, false, false, false);
        assert_eq!(compliance.score, 0);
        assert_eq!(compliance.failed_checks.len(), 5);
    }

    #[test]
    fn test_passed_lookup() {
        let compliance = NtiaCompliance::from_checks(true, false, true, false, true);
        assert!(compliance.passed(NtiaCheck::DependencyRelationships));
        assert!(!compliance.passed(NtiaCheck::AuthorOrTool));
        assert!(!compliance.passed(NtiaCheck::SpecVersion));
    }

    #[test]
    fn test_summary_record_keeps_total_consistent() {
        let mut summary = VulnerabilitySummary::default();
        summary.record(Severity::Critical);
        summary.record(Severity::Low);
        summary.record(Severity::Low);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(Severity::Low), 2);
        assert_eq!(
            summary.critical + summary.high + summary.medium + summary.low + summary.unknown,
            summary.total
        );
    }

    #[test]
    fn test_quality_flags_clean() {
        assert!(DataQualityFlags::default().is_clean());
        let flags = DataQualityFlags {
            missing_hashes: true,
            ..Default::default()
        };
        assert!(!flags.is_clean());
    }
}
