use crate::sbom_analysis::domain::{ComponentAnalysis, VulnerabilitySummary};

/// Counts vulnerabilities by severity across all component analyses
pub struct VulnerabilitySummarizer;

impl VulnerabilitySummarizer {
    pub fn summarize(analyses: &[ComponentAnalysis]) -> VulnerabilitySummary {
        let mut summary = VulnerabilitySummary::default();
        for vulnerability in analyses.iter().flat_map(|a| &a.vulnerabilities) {
            summary.record(vulnerability.severity());
        }
        summary
    }
}
