use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::application::use_cases::{EnrichComponentsUseCase, EnrichmentOutcome};
use crate::ports::inbound::SbomAnalysisPort;
use crate::ports::outbound::{ProgressReporter, VulnerabilityRepository};
use crate::sbom_analysis::domain::{AnalysisResult, AnalysisState, ComponentAnalysis};
use crate::sbom_analysis::parsers::{parse_sbom, ParsedSbom};
use crate::sbom_analysis::services::{
    DataQualityAuditor, NtiaValidator, RiskScorer, VulnerabilitySummarizer,
};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// AnalyzeSbomUseCase - Analysis orchestrator
///
/// Drives one run through `Idle -> Parsing -> Enriching -> Scoring -> Complete`.
/// A format error moves the job to `Failed` and is returned to the caller;
/// cancellation during enrichment moves it to `Cancelled` and still yields
/// a result computed from the components enriched so far.
///
/// # Type Parameters
/// * `R` - VulnerabilityRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeSbomUseCase<R, PR> {
    enricher: EnrichComponentsUseCase<R>,
    progress_reporter: PR,
}

impl<R, PR> AnalyzeSbomUseCase<R, PR>
where
    R: VulnerabilityRepository,
    PR: ProgressReporter,
{
    /// Creates a new AnalyzeSbomUseCase with injected dependencies
    pub fn new(enricher: EnrichComponentsUseCase<R>, progress_reporter: PR) -> Self {
        Self {
            enricher,
            progress_reporter,
        }
    }

    /// Executes the analysis use case
    ///
    /// # Arguments
    /// * `request` - Raw SBOM content, source label and job handle
    ///
    /// # Returns
    /// AnalysisResponse with the terminal state, the result and the number
    /// of recovered lookup failures
    pub async fn execute(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        let job = request.job.clone();

        // Step 1: Parse
        job.transition(AnalysisState::Parsing)?;
        let parsed = match parse_sbom(&request.content, &request.source_label) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::info!(source = %request.source_label, error = %e, "SBOM parsing failed");
                job.transition(AnalysisState::Failed)?;
                return Err(e.into());
            }
        };
        self.progress_reporter.report(&format!(
            "📖 Loaded {} SBOM '{}' with {} component(s)",
            parsed.document.format(),
            request.source_label,
            parsed.components.len()
        ));

        // Step 2: Enrich
        job.transition(AnalysisState::Enriching)?;
        self.progress_reporter
            .report("🔐 Checking components for known vulnerabilities...");
        let EnrichmentOutcome {
            analyses,
            lookup_failures,
            cancelled,
        } = self
            .enricher
            .execute(
                &parsed.components,
                &self.progress_reporter,
                &job.cancellation_token(),
            )
            .await;

        // Step 3: Score (also for a cancelled run, over what was enriched)
        if cancelled {
            job.transition(AnalysisState::Cancelled)?;
        } else {
            job.transition(AnalysisState::Scoring)?;
        }
        let total = parsed.components.len();
        let result = Self::build_result(job.id(), parsed, analyses);

        if cancelled {
            self.progress_reporter.report_error(&format!(
                "⚠️  Analysis cancelled: {} of {} component(s) enriched, result is partial",
                result.components.len(),
                total
            ));
        } else {
            job.transition(AnalysisState::Complete)?;
            self.progress_reporter.report_completion(&format!(
                "✅ Analysis complete: {} vulnerabilities, overall risk score {}",
                result.vulnerability_summary.total, result.overall_risk_score
            ));
        }

        tracing::info!(
            job = %job.id(),
            components = result.components.len(),
            vulnerabilities = result.vulnerability_summary.total,
            lookup_failures,
            score = result.overall_risk_score,
            "Analysis finished"
        );

        Ok(AnalysisResponse::new(job.state(), result, lookup_failures))
    }

    /// Runs the pure scoring steps over the enriched components
    ///
    /// The data quality audit always covers every parsed component, even
    /// when cancellation left some of them unenriched.
    fn build_result(
        analysis_id: Uuid,
        parsed: ParsedSbom,
        analyses: Vec<ComponentAnalysis>,
    ) -> AnalysisResult {
        let ntia_compliance =
            NtiaValidator::validate(&parsed.document, parsed.has_dependency_graph());
        let data_quality_issues = DataQualityAuditor::audit(&parsed.components);
        let vulnerability_summary = VulnerabilitySummarizer::summarize(&analyses);
        let overall_risk_score = RiskScorer::aggregate(analyses.iter().map(|a| a.risk_score));

        AnalysisResult {
            analysis_id,
            document: parsed.document,
            components: analyses,
            dependencies: parsed.edges,
            vulnerability_summary,
            ntia_compliance,
            data_quality_issues,
            overall_risk_score,
            analyzed_at: Utc::now(),
        }
    }
}

#[async_trait]
impl<R, PR> SbomAnalysisPort for AnalyzeSbomUseCase<R, PR>
where
    R: VulnerabilityRepository,
    PR: ProgressReporter,
{
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests;
