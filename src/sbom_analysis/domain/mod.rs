pub mod analysis;
pub mod analysis_state;
pub mod component;
pub mod dependency_edge;
pub mod document;
pub mod vulnerability;

pub use analysis::{
    AnalysisResult, ComponentAnalysis, DataQualityFlags, DataQualityIssue, NtiaCheck,
    NtiaCompliance, QualityField, VulnerabilitySummary,
};
pub use analysis_state::{AnalysisState, AnalysisStateMachine};
pub use component::{
    Component, ComponentBuilder, ComponentType, HashDigest, UNKNOWN_LICENSE, UNKNOWN_VERSION,
};
pub use dependency_edge::{DependencyEdge, RelationKind};
pub use document::{SbomDocument, SbomFormat};
pub use vulnerability::{Severity, Vulnerability, VulnerabilityRecord};
