use crate::sbom_analysis::domain::{NtiaCompliance, SbomDocument};

/// NtiaValidator checks the NTIA minimum elements at document level
///
/// Pure and total: absent fields fail their check, validation never errors.
pub struct NtiaValidator;

impl NtiaValidator {
    /// # Arguments
    /// * `document` - Parsed document metadata
    /// * `has_dependency_graph` - Whether the parsed edge list is non-empty
    pub fn validate(document: &SbomDocument, has_dependency_graph: bool) -> NtiaCompliance {
        let has_author_or_tool = !document.authors().is_empty() || !document.tools().is_empty();
        let has_timestamp = document.created().is_some();
        let has_spec_version = !document.spec_version().trim().is_empty();
        let has_unique_identifier =
            document.serial_number().is_some() || document.namespace().is_some();

        NtiaCompliance::from_checks(
            has_dependency_graph,
            has_author_or_tool,
            has_timestamp,
            has_spec_version,
            has_unique_identifier,
        )
    }
}
