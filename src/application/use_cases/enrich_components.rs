use crate::ports::outbound::{
    ProgressEvent, ProgressReporter, VulnerabilityQuery, VulnerabilityRepository,
};
use crate::sbom_analysis::domain::{Component, ComponentAnalysis, Vulnerability};
use crate::sbom_analysis::policies::ComponentPolicy;
use crate::sbom_analysis::services::{DataQualityAuditor, RiskScorer, VulnerabilityMapper};
use crate::shared::{CancellationToken, Result};
use futures::future::join_all;
use std::collections::HashSet;
use std::time::Duration;

/// Default number of components looked up concurrently
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default pause between two batches, to respect external rate limits (milliseconds)
pub const DEFAULT_BATCH_DELAY_MS: u64 = 500;

/// Tuning knobs of the enrichment orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentSettings {
    /// Components per batch, at least 1
    pub batch_size: usize,
    /// Pause between batches (not after the last one)
    pub batch_delay: Duration,
    /// Vulnerability ids or aliases dropped from lookup results
    pub ignored_ids: HashSet<String>,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: Duration::from_millis(DEFAULT_BATCH_DELAY_MS),
            ignored_ids: HashSet::new(),
        }
    }
}

/// Outcome of one enrichment pass
#[derive(Debug, Clone)]
pub struct EnrichmentOutcome {
    /// One record per enriched component, in document order
    pub analyses: Vec<ComponentAnalysis>,
    pub lookup_failures: usize,
    /// True when cancellation stopped the pass before every batch ran
    pub cancelled: bool,
}

/// EnrichComponentsUseCase - Vulnerability enrichment orchestrator
///
/// Components are processed in fixed-size batches. Lookups inside a batch
/// run concurrently; batches run one after another with a pause in between.
/// A failed lookup never fails the pass: the component gets an empty
/// vulnerability list and a metadata-only risk score.
///
/// Progress is pushed once per batch and cancellation is checked only at
/// batch boundaries, so lookups already dispatched always complete.
///
/// # Type Parameters
/// * `R` - VulnerabilityRepository implementation
pub struct EnrichComponentsUseCase<R> {
    vulnerability_repository: R,
    settings: EnrichmentSettings,
    policy: Option<ComponentPolicy>,
}

impl<R: VulnerabilityRepository> EnrichComponentsUseCase<R> {
    /// Creates a new EnrichComponentsUseCase with injected repository
    ///
    /// A `batch_size` of 0 is treated as 1.
    pub fn new(vulnerability_repository: R, settings: EnrichmentSettings) -> Self {
        let settings = EnrichmentSettings {
            batch_size: settings.batch_size.max(1),
            ..settings
        };
        Self {
            vulnerability_repository,
            settings,
            policy: None,
        }
    }

    /// Enables policy flags for risk scoring; unconfigured policies are ignored
    pub fn with_policy(mut self, policy: ComponentPolicy) -> Self {
        self.policy = policy.is_configured().then_some(policy);
        self
    }

    pub fn settings(&self) -> &EnrichmentSettings {
        &self.settings
    }

    /// Enriches `components` and returns one analysis per processed component
    ///
    /// # Arguments
    /// * `components` - Components in document order
    /// * `progress_reporter` - Sink invoked after each batch
    /// * `cancellation` - Checked before each batch is dispatched
    pub async fn execute(
        &self,
        components: &[Component],
        progress_reporter: &dyn ProgressReporter,
        cancellation: &CancellationToken,
    ) -> EnrichmentOutcome {
        let total = components.len();
        let batch_size = self.settings.batch_size;
        let batch_count = total.div_ceil(batch_size);

        let mut analyses = Vec::with_capacity(total);
        let mut lookup_failures = 0;
        let mut cancelled = false;

        for (batch_index, batch) in components.chunks(batch_size).enumerate() {
            if batch_index > 0 && !self.settings.batch_delay.is_zero() {
                tokio::time::sleep(self.settings.batch_delay).await;
            }

            if cancellation.is_cancelled() {
                tracing::info!(
                    completed = analyses.len(),
                    total,
                    "Enrichment cancelled before batch {}/{}",
                    batch_index + 1,
                    batch_count
                );
                cancelled = true;
                break;
            }

            tracing::debug!(
                batch = batch_index + 1,
                batches = batch_count,
                size = batch.len(),
                "Dispatching enrichment batch"
            );

            // join_all yields results in input order, whatever the completion order.
            let results = join_all(batch.iter().map(|c| self.lookup(c))).await;

            for (component, result) in batch.iter().zip(results) {
                let vulnerabilities = match result {
                    Ok(vulnerabilities) => vulnerabilities,
                    Err(e) => {
                        lookup_failures += 1;
                        tracing::warn!(
                            component = component.id(),
                            error = %e,
                            "Vulnerability lookup failed, assuming no known vulnerabilities"
                        );
                        progress_reporter.report_error(&format!(
                            "⚠️  Vulnerability lookup failed for {}@{}: {}",
                            component.name(),
                            component.version(),
                            e
                        ));
                        Vec::new()
                    }
                };
                analyses.push(self.analyze_component(component, vulnerabilities));
            }

            progress_reporter.report_progress(&ProgressEvent::new(
                analyses.len(),
                total,
                format!(
                    "Enriched batch {}/{} ({} of {} components)",
                    batch_index + 1,
                    batch_count,
                    analyses.len(),
                    total
                ),
            ));
        }

        EnrichmentOutcome {
            analyses,
            lookup_failures,
            cancelled,
        }
    }

    async fn lookup(&self, component: &Component) -> Result<Vec<Vulnerability>> {
        let query = VulnerabilityQuery::for_component(component);
        let records = self
            .vulnerability_repository
            .fetch_vulnerabilities(&query)
            .await?;

        let records = records
            .into_iter()
            .filter(|record| {
                !self
                    .settings
                    .ignored_ids
                    .iter()
                    .any(|id| record.is_identified_by(id))
            })
            .collect();
        Ok(VulnerabilityMapper::map_all(records))
    }

    fn analyze_component(
        &self,
        component: &Component,
        vulnerabilities: Vec<Vulnerability>,
    ) -> ComponentAnalysis {
        let policy_flags = self.policy.as_ref().map(|p| p.evaluate(component));
        ComponentAnalysis {
            risk_score: RiskScorer::score(&vulnerabilities, component, policy_flags),
            quality_flags: DataQualityAuditor::flags_for(component),
            component: component.clone(),
            vulnerabilities,
        }
    }
}
