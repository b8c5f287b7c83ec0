/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (vulnerability databases, file system, console).
pub mod output_presenter;
pub mod progress_reporter;
pub mod sbom_reader;
pub mod vulnerability_repository;

pub use output_presenter::OutputPresenter;
pub use progress_reporter::{NoopProgressReporter, ProgressEvent, ProgressReporter};
pub use sbom_reader::SbomReader;
pub use vulnerability_repository::{VulnerabilityQuery, VulnerabilityRepository};
