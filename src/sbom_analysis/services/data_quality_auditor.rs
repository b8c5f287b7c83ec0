use crate::sbom_analysis::domain::{Component, DataQualityFlags, DataQualityIssue, QualityField};

/// DataQualityAuditor reports missing identity and provenance fields
///
/// Checks, per component: package-URL, at least one hash, supplier.
/// Deficiencies are returned as data; auditing never fails.
pub struct DataQualityAuditor;

impl DataQualityAuditor {
    /// Issues for every component, in component order then field order
    pub fn audit(components: &[Component]) -> Vec<DataQualityIssue> {
        components
            .iter()
            .flat_map(|component| {
                Self::missing_fields(component)
                    .into_iter()
                    .map(move |field| DataQualityIssue {
                        component_id: component.id().to_string(),
                        field,
                        message: Self::message(component, field),
                    })
            })
            .collect()
    }

    pub fn flags_for(component: &Component) -> DataQualityFlags {
        DataQualityFlags {
            missing_purl: component.purl().is_none(),
            missing_hashes: component.hashes().is_empty(),
            missing_supplier: component.supplier().is_none(),
        }
    }

    fn missing_fields(component: &Component) -> Vec<QualityField> {
        let flags = Self::flags_for(component);
        [
            (QualityField::Purl, flags.missing_purl),
            (QualityField::Hashes, flags.missing_hashes),
            (QualityField::Supplier, flags.missing_supplier),
        ]
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect()
    }

    fn message(component: &Component, field: QualityField) -> String {
        let what = match field {
            QualityField::Purl => "has no package URL (purl)",
            QualityField::Hashes => "has no cryptographic hashes",
            QualityField::Supplier => "has no supplier",
        };
        format!("{}@{} {}", component.name(), component.version(), what)
    }
}
