use crate::sbom_analysis::domain::SbomFormat;
use crate::shared::error::FormatError;
use serde_json::{Map, Value};

/// Raw SBOM content after structural format sniffing
///
/// Each variant owns the parsed JSON object so the format-specific
/// extraction never has to re-parse the input.
#[derive(Debug, Clone, PartialEq)]
pub enum SbomInput {
    CycloneDx(Map<String, Value>),
    Spdx(Map<String, Value>),
}

impl SbomInput {
    /// Parses `raw` as JSON and probes its top-level shape
    ///
    /// Probe order: `bomFormat == "CycloneDX"`, then `spdxVersion`, then a
    /// `components` array, then a `packages` array.
    pub fn sniff(raw: &str, source_label: &str) -> Result<Self, FormatError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| FormatError::NotStructuredData {
                source_label: source_label.to_string(),
                details: e.to_string(),
            })?;

        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(FormatError::NotStructuredData {
                    source_label: source_label.to_string(),
                    details: format!("top-level value is {}", json_kind(&other)),
                })
            }
        };

        let input = if is_cyclonedx_declared(&object) {
            SbomInput::CycloneDx(object)
        } else if object.contains_key("spdxVersion") {
            SbomInput::Spdx(object)
        } else if has_array(&object, "components") {
            SbomInput::CycloneDx(object)
        } else if has_array(&object, "packages") {
            SbomInput::Spdx(object)
        } else {
            return Err(FormatError::UnrecognizedFormat {
                source_label: source_label.to_string(),
            });
        };

        tracing::debug!(format = %input.format(), source = source_label, "Detected SBOM format");
        Ok(input)
    }

    pub fn format(&self) -> SbomFormat {
        match self {
            SbomInput::CycloneDx(_) => SbomFormat::CycloneDx,
            SbomInput::Spdx(_) => SbomFormat::Spdx,
        }
    }
}

fn is_cyclonedx_declared(object: &Map<String, Value>) -> bool {
    object
        .get("bomFormat")
        .and_then(Value::as_str)
        .is_some_and(|f| f == "CycloneDX")
}

fn has_array(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).is_some_and(Value::is_array)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(raw: &str) -> Result<SbomInput, FormatError> {
        SbomInput::sniff(raw, "test.json")
    }

    #[test]
    fn test_declared_cyclonedx() {
        let input = sniff(r#"{"bomFormat": "CycloneDX", "specVersion": "1.5"}"#).unwrap();
        assert_eq!(input.format(), SbomFormat::CycloneDx);
    }

    #[test]
    fn test_declared_spdx() {
        let input = sniff(r#"{"spdxVersion": "SPDX-2.3"}"#).unwrap();
        assert_eq!(input.format(), SbomFormat::Spdx);
    }

    #[test]
    fn test_bom_format_wins_over_spdx_version() {
        let input = sniff(r#"{"bomFormat": "CycloneDX", "spdxVersion": "SPDX-2.3"}"#).unwrap();
        assert_eq!(input.format(), SbomFormat::CycloneDx);
    }

    #[test]
    fn test_components_array_implies_cyclonedx() {
        let input = sniff(r#"{"components": []}"#).unwrap();
        assert_eq!(input.format(), SbomFormat::CycloneDx);
    }

    #[test]
    fn test_packages_array_implies_spdx() {
        let input = sniff(r#"{"packages": [{"name": "a"}]}"#).unwrap();
        assert_eq!(input.format(), SbomFormat::Spdx);
    }

    #[test]
    fn test_other_bom_format_falls_through_to_probes() {
        let input = sniff(r#"{"bomFormat": "Other", "packages": []}"#).unwrap();
        assert_eq!(input.format(), SbomFormat::Spdx);
    }

    #[test]
    fn test_components_must_be_an_array_to_count() {
        let err = sniff(r#"{"components": "nope"}"#).unwrap_err();
        assert!(matches!(err, FormatError::UnrecognizedFormat { .. }));
    }

    #[test]
    fn test_unrecognized_object() {
        let err = sniff(r#"{"name": "not an sbom"}"#).unwrap_err();
        assert_eq!(
            err,
            FormatError::UnrecognizedFormat {
                source_label: "test.json".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = sniff("{not json").unwrap_err();
        assert!(matches!(err, FormatError::NotStructuredData { .. }));
    }

    #[test]
    fn test_non_object_json() {
        let err = sniff("[1, 2, 3]").unwrap_err();
        match err {
            FormatError::NotStructuredData { details, .. } => {
                assert!(details.contains("an array"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
