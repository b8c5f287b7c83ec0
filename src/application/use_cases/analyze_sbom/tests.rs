use super::*;
use crate::application::use_cases::EnrichmentSettings;
use crate::application::AnalysisJob;
use crate::ports::outbound::{NoopProgressReporter, ProgressEvent, VulnerabilityQuery};
use crate::sbom_analysis::domain::{Severity, VulnerabilityRecord};
use crate::shared::error::FormatError;
use std::sync::Mutex;
use std::time::Duration;

// Mock implementations for testing
struct MockVulnerabilityRepository;

#[async_trait]
impl VulnerabilityRepository for MockVulnerabilityRepository {
    async fn fetch_vulnerabilities(
        &self,
        query: &VulnerabilityQuery,
    ) -> Result<Vec<VulnerabilityRecord>> {
        match query.name.as_str() {
            "log4j-core" => Ok(vec![VulnerabilityRecord {
                aliases: vec!["CVE-2021-44228".to_string()],
                severity: Some("CRITICAL".to_string()),
                cvss_v3: Some(10.0),
                known_exploited: true,
                ..VulnerabilityRecord::new("GHSA-jfh8-c2jp-5v3q")
            }]),
            "broken" => anyhow::bail!("HTTP 503"),
            _ => Ok(vec![]),
        }
    }
}

#[derive(Default)]
struct MockProgressReporter {
    events: Mutex<Vec<ProgressEvent>>,
    messages: Mutex<Vec<String>>,
}

impl ProgressReporter for MockProgressReporter {
    fn report_progress(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

fn use_case<PR: ProgressReporter>(reporter: PR) -> AnalyzeSbomUseCase<MockVulnerabilityRepository, PR> {
    let settings = EnrichmentSettings {
        batch_delay: Duration::ZERO,
        ..Default::default()
    };
    AnalyzeSbomUseCase::new(
        EnrichComponentsUseCase::new(MockVulnerabilityRepository, settings),
        reporter,
    )
}

const CYCLONEDX: &str = r#"{
    "bomFormat": "CycloneDX",
    "specVersion": "1.5",
    "serialNumber": "urn:uuid:00000000-0000-0000-0000-000000000001",
    "metadata": {
        "timestamp": "2024-03-01T00:00:00Z",
        "tools": [{"name": "syft", "version": "1.0.0"}]
    },
    "components": [
        {"type": "application", "bom-ref": "app", "name": "app", "version": "1.0.0"},
        {"type": "library", "bom-ref": "log4j", "name": "log4j-core", "version": "2.14.1",
         "purl": "pkg:maven/org.apache.logging.log4j/log4j-core@2.14.1",
         "supplier": {"name": "Apache"},
         "hashes": [{"alg": "SHA-256", "content": "abc"}]},
        {"type": "library", "bom-ref": "broken", "name": "broken", "version": "0.1.0"}
    ]
}"#;

fn many_components(count: usize) -> String {
    let components: Vec<String> = (0..count)
        .map(|i| format!(r#"{{"bom-ref": "c{i}", "name": "pkg-{i}", "version": "1.0.0"}}"#))
        .collect();
    format!(
        r#"{{"bomFormat": "CycloneDX", "specVersion": "1.5", "components": [{}]}}"#,
        components.join(",")
    )
}

#[tokio::test]
async fn test_complete_run() {
    let job = AnalysisJob::new();
    let request = AnalysisRequest::new(CYCLONEDX, "bom.json").with_job(job.clone());

    let response = use_case(NoopProgressReporter).execute(request).await.unwrap();

    assert_eq!(response.state, AnalysisState::Complete);
    assert!(!response.is_partial());
    assert_eq!(response.lookup_failures, 1);
    assert_eq!(
        job.history(),
        vec![
            AnalysisState::Idle,
            AnalysisState::Parsing,
            AnalysisState::Enriching,
            AnalysisState::Scoring,
            AnalysisState::Complete
        ]
    );

    let result = &response.result;
    assert_eq!(result.analysis_id, job.id());
    assert_eq!(result.components.len(), 3);
    // Star graph rooted at the application component
    assert_eq!(result.dependencies.len(), 2);
    assert!(result.ntia_compliance.compliant);
    assert_eq!(result.vulnerability_summary.critical, 1);
    assert_eq!(result.vulnerability_summary.total, 1);

    let log4j = &result.components[1];
    assert_eq!(log4j.vulnerabilities[0].cve_id(), "CVE-2021-44228");
    assert_eq!(log4j.vulnerabilities[0].severity(), Severity::Critical);
    // 100 - 50 - 30
    assert_eq!(log4j.risk_score, 20);

    // (100 + 20 + 100) / 3
    assert_eq!(result.overall_risk_score, 73);
}

#[tokio::test]
async fn test_quality_issues_cover_all_components() {
    let response = use_case(NoopProgressReporter)
        .execute(AnalysisRequest::new(CYCLONEDX, "bom.json"))
        .await
        .unwrap();

    let issues = &response.result.data_quality_issues;
    // app and broken miss all three fields, log4j-core none
    assert_eq!(issues.len(), 6);
    assert!(issues.iter().all(|i| i.component_id != "log4j"));
    assert!(!response.result.components[0].quality_flags.is_clean());
    assert!(response.result.components[1].quality_flags.is_clean());
}

#[tokio::test]
async fn test_format_error_fails_job() {
    let job = AnalysisJob::new();
    let request = AnalysisRequest::new(r#"{"hello": "world"}"#, "x.json").with_job(job.clone());

    let err = use_case(NoopProgressReporter)
        .execute(request)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FormatError>(),
        Some(FormatError::UnrecognizedFormat { .. })
    ));
    assert_eq!(job.state(), AnalysisState::Failed);
}

#[tokio::test]
async fn test_not_json_fails_job() {
    let job = AnalysisJob::new();
    let request = AnalysisRequest::new("<bom/>", "bom.xml").with_job(job.clone());

    let err = use_case(NoopProgressReporter)
        .execute(request)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<FormatError>(),
        Some(FormatError::NotStructuredData { .. })
    ));
    assert_eq!(job.state(), AnalysisState::Failed);
}

#[tokio::test]
async fn test_job_cannot_be_reused() {
    let job = AnalysisJob::new();
    let use_case = use_case(NoopProgressReporter);
    use_case
        .execute(AnalysisRequest::new(CYCLONEDX, "bom.json").with_job(job.clone()))
        .await
        .unwrap();

    let err = use_case
        .execute(AnalysisRequest::new(CYCLONEDX, "bom.json").with_job(job))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Complete -> Parsing"));
}

#[tokio::test]
async fn test_progress_events_for_25_components() {
    let reporter = MockProgressReporter::default();
    let use_case = use_case(reporter);

    let response = use_case
        .execute(AnalysisRequest::new(many_components(25), "bom.json"))
        .await
        .unwrap();

    assert_eq!(response.result.components.len(), 25);
    let completed: Vec<usize> = use_case
        .progress_reporter
        .events
        .lock()
        .unwrap()
        .iter()
        .map(|e| e.completed)
        .collect();
    assert_eq!(completed, vec![10, 20, 25]);
    assert!(!use_case.progress_reporter.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancellation_after_first_batch() {
    let job = AnalysisJob::new();
    let handle = job.clone();
    let cancel_after_first_batch = move |event: &ProgressEvent| {
        if event.completed == 10 {
            handle.cancel();
        }
    };

    let response = use_case(cancel_after_first_batch)
        .execute(AnalysisRequest::new(many_components(30), "bom.json").with_job(job.clone()))
        .await
        .unwrap();

    assert_eq!(response.state, AnalysisState::Cancelled);
    assert!(response.is_partial());
    assert_eq!(response.result.components.len(), 10);
    assert_eq!(job.state(), AnalysisState::Cancelled);
    // Audit still covers the whole document
    assert_eq!(response.result.data_quality_issues.len(), 90);
}

#[tokio::test]
async fn test_empty_document_scores_100() {
    let response = use_case(NoopProgressReporter)
        .execute(AnalysisRequest::new(
            r#"{"bomFormat": "CycloneDX", "specVersion": "1.5", "components": []}"#,
            "empty.json",
        ))
        .await
        .unwrap();

    assert_eq!(response.state, AnalysisState::Complete);
    assert!(response.result.components.is_empty());
    assert_eq!(response.result.overall_risk_score, 100);
    assert!(!response.result.ntia_compliance.has_dependency_graph);
}

#[tokio::test]
async fn test_analyze_through_inbound_port() {
    let port: &dyn SbomAnalysisPort = &use_case(NoopProgressReporter);
    let response = port
        .analyze(AnalysisRequest::new(CYCLONEDX, "bom.json"))
        .await
        .unwrap();
    assert_eq!(response.result.components.len(), 3);
}
