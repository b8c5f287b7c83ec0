/// Use cases module containing application business logic orchestration
mod analyze_sbom;
mod enrich_components;

pub use analyze_sbom::AnalyzeSbomUseCase;
pub use enrich_components::{
    EnrichComponentsUseCase, EnrichmentOutcome, EnrichmentSettings, DEFAULT_BATCH_DELAY_MS,
    DEFAULT_BATCH_SIZE,
};
