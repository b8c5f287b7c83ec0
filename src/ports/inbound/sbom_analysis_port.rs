use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::shared::Result;
use async_trait::async_trait;

/// SbomAnalysisPort - Inbound port for the SBOM analysis use case
///
/// This port defines the single entry point that external adapters (CLI,
/// services embedding the engine) use to analyze an SBOM document.
#[async_trait]
pub trait SbomAnalysisPort {
    /// Analyzes the SBOM content carried by `request`
    ///
    /// # Arguments
    /// * `request` - Raw content, source label and the job handle of this run
    ///
    /// # Returns
    /// The terminal state together with the (possibly partial) analysis result
    ///
    /// # Errors
    /// Returns an error before any enrichment begins if:
    /// - The content is not a JSON object (`FormatError::NotStructuredData`)
    /// - The document is neither CycloneDX nor SPDX (`FormatError::UnrecognizedFormat`)
    /// - A recognized document has malformed fields (`FormatError::InvalidStructure`)
    /// - The job handle was already used for another run
    ///
    /// Failed vulnerability lookups and cancellation are not errors.
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse>;
}
