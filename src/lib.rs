//! sbom-analyzer - SBOM analysis engine
//!
//! This library normalizes CycloneDX and SPDX JSON documents into one
//! document model, checks them against the NTIA minimum elements, audits
//! component data quality, enriches components with known vulnerabilities
//! and computes deterministic 0-100 risk scores (higher is safer).
//! It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_analysis`): Document model, format parsers and pure analysis services
//! - **Application Layer** (`application`): Analysis and enrichment use cases, job handle, DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports (OSV, KEV, console, filesystem)
//! - **Shared** (`shared`): Error types, cancellation and file security checks
//!
//! # Example
//!
//! ```no_run
//! use sbom_analyzer::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let repository = CachingVulnerabilityRepository::new(OsvClient::new()?);
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let enricher = EnrichComponentsUseCase::new(repository, EnrichmentSettings::default());
//! let use_case = AnalyzeSbomUseCase::new(enricher, progress_reporter);
//!
//! // Execute
//! let content = std::fs::read_to_string("bom.json")?;
//! let request = AnalysisRequest::new(content, "bom.json");
//! let response = use_case.execute(request).await?;
//!
//! println!("overall risk score: {}", response.result.overall_risk_score);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod sbom_analysis;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{
        CachingVulnerabilityRepository, KevCatalog, KevEnrichingRepository,
        OfflineVulnerabilityRepository, OsvClient,
    };
    pub use crate::application::dto::{AnalysisRequest, AnalysisResponse};
    pub use crate::application::use_cases::{
        AnalyzeSbomUseCase, EnrichComponentsUseCase, EnrichmentSettings,
    };
    pub use crate::application::AnalysisJob;
    pub use crate::ports::inbound::SbomAnalysisPort;
    pub use crate::ports::outbound::{
        NoopProgressReporter, OutputPresenter, ProgressEvent, ProgressReporter, SbomReader,
        VulnerabilityQuery, VulnerabilityRepository,
    };
    pub use crate::sbom_analysis::domain::{
        AnalysisResult, AnalysisState, Component, ComponentAnalysis, DependencyEdge,
        SbomDocument, SbomFormat, Severity, Vulnerability, VulnerabilityRecord,
    };
    pub use crate::sbom_analysis::parsers::{parse_sbom, ParsedSbom};
    pub use crate::sbom_analysis::policies::{ComponentPolicy, PolicyFlags};
    pub use crate::shared::error::{AnalysisError, FormatError};
    pub use crate::shared::{CancellationToken, Result};
}
