use crate::application::AnalysisJob;

/// AnalysisRequest - Input DTO for the analysis use case
///
/// Carries already-read SBOM content; the use case never touches the file
/// system. The job handle is created fresh unless the caller supplies one
/// with [`AnalysisRequest::with_job`] to observe or cancel the run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Raw SBOM content (CycloneDX or SPDX JSON)
    pub content: String,
    /// Label identifying the source, usually the file name
    pub source_label: String,
    pub job: AnalysisJob,
}

impl AnalysisRequest {
    pub fn new(content: impl Into<String>, source_label: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source_label: source_label.into(),
            job: AnalysisJob::new(),
        }
    }

    pub fn with_job(mut self, job: AnalysisJob) -> Self {
        self.job = job;
        self
    }
}
