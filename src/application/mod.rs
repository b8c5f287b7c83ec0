/// Application layer - Use cases, DTOs and the analysis job handle
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod analysis_job;
pub mod dto;
pub mod use_cases;

pub use analysis_job::AnalysisJob;
