use crate::sbom_analysis::domain::{AnalysisResult, AnalysisState};

/// AnalysisResponse - Output DTO of the analysis use case
///
/// `state` is the terminal state of the run: `Complete`, or `Cancelled`
/// when the result only covers the batches enriched before cancellation.
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    pub state: AnalysisState,
    pub result: AnalysisResult,
    /// Component lookups that failed and were recovered as "no vulnerabilities known"
    pub lookup_failures: usize,
}

impl AnalysisResponse {
    pub fn new(state: AnalysisState, result: AnalysisResult, lookup_failures: usize) -> Self {
        Self {
            state,
            result,
            lookup_failures,
        }
    }

    /// True when the result must not be treated as authoritative
    pub fn is_partial(&self) -> bool {
        self.state == AnalysisState::Cancelled
    }
}
