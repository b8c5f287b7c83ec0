mod data_quality_auditor;
mod ntia_validator;
mod risk_scorer;
mod vulnerability_mapper;
mod vulnerability_summarizer;

pub use data_quality_auditor::DataQualityAuditor;
pub use ntia_validator::NtiaValidator;
pub use risk_scorer::{RiskScorer, CLEAN_COMPONENT_FLOOR};
pub use vulnerability_mapper::VulnerabilityMapper;
pub use vulnerability_summarizer::VulnerabilitySummarizer;
