//! Property-based tests for the SBOM parsers.
//!
//! Parsers must reject arbitrary input with a `FormatError`, never panic.

use proptest::prelude::*;
use sbom_analyzer::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn parse_sbom_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = parse_sbom(&s, "fuzz.json");
    }

    #[test]
    fn json_like_input_doesnt_panic(
        s in prop::string::string_regex(r#"\{[^\}]{0,500}\}"#).unwrap()
    ) {
        let _ = parse_sbom(&s, "fuzz.json");
    }

    #[test]
    fn object_without_format_markers_is_rejected(
        key in "[a-z]{1,12}",
        value in "[a-zA-Z0-9 ]{0,40}",
    ) {
        let input = format!(r#"{{"{}": "{}"}}"#, key, value);
        let result = parse_sbom(&input, "fuzz.json");
        prop_assert!(
            matches!(result, Err(FormatError::UnrecognizedFormat { .. })),
            "unexpected result for {}", input
        );
    }

    #[test]
    fn cyclonedx_partial_json_doesnt_panic(
        version in "1\\.[0-9]",
        extra in "\\PC{0,200}",
    ) {
        let input = format!(r#"{{"bomFormat": "CycloneDX", "specVersion": "{}", {}}}"#, version, extra);
        let _ = parse_sbom(&input, "fuzz.json");
    }

    #[test]
    fn spdx_partial_json_doesnt_panic(
        version in "SPDX-[0-9]\\.[0-9]",
        extra in "\\PC{0,200}",
    ) {
        let input = format!(r#"{{"spdxVersion": "{}", {}}}"#, version, extra);
        let _ = parse_sbom(&input, "fuzz.json");
    }

    #[test]
    fn cyclonedx_components_keep_order(names in prop::collection::vec("[a-z][a-z0-9-]{0,15}", 0..30)) {
        let components: Vec<serde_json::Value> = names
            .iter()
            .enumerate()
            .map(|(i, name)| serde_json::json!({"bom-ref": format!("ref-{i}"), "name": name}))
            .collect();
        let input = serde_json::json!({
            "bomFormat": "CycloneDX",
            "specVersion": "1.5",
            "components": components,
        })
        .to_string();

        let parsed = parse_sbom(&input, "bom.json").unwrap();
        let parsed_names: Vec<&str> = parsed.components.iter().map(|c| c.name()).collect();
        prop_assert_eq!(parsed_names, names.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
