//! Format parsers turning raw SBOM content into the document model
//!
//! Parsing happens in two steps: [`SbomInput::sniff`] probes the top-level
//! JSON shape and picks a format, then the matching [`SbomParser`] performs
//! statically-typed extraction with explicit defaults. Either step can fail
//! with a [`FormatError`]; no partially populated document is ever returned.

pub mod cyclonedx;
pub mod detection;
mod ids;
pub mod purl;
pub mod spdx;

pub use cyclonedx::CycloneDxParser;
pub use detection::SbomInput;
pub use spdx::SpdxParser;

use crate::sbom_analysis::domain::{Component, DependencyEdge, SbomDocument, SbomFormat};
use crate::shared::error::FormatError;
use serde_json::{Map, Value};

/// Output of a successful parse: document metadata, components in document
/// order, and the dependency edge list
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSbom {
    pub document: SbomDocument,
    pub components: Vec<Component>,
    pub edges: Vec<DependencyEdge>,
}

impl ParsedSbom {
    pub fn has_dependency_graph(&self) -> bool {
        !self.edges.is_empty()
    }
}

/// Format-specific extraction from an already sniffed JSON object
pub trait SbomParser {
    fn format(&self) -> SbomFormat;

    fn parse_object(
        &self,
        object: Map<String, Value>,
        source_label: &str,
    ) -> Result<ParsedSbom, FormatError>;
}

/// Sniffs the format of `raw` and dispatches to the matching parser
pub fn parse_sbom(raw: &str, source_label: &str) -> Result<ParsedSbom, FormatError> {
    match SbomInput::sniff(raw, source_label)? {
        SbomInput::CycloneDx(object) => CycloneDxParser.parse_object(object, source_label),
        SbomInput::Spdx(object) => SpdxParser.parse_object(object, source_label),
    }
}

/// Deserializes the sniffed object into a format-specific serde model
pub(crate) fn deserialize_object<T: serde::de::DeserializeOwned>(
    object: Map<String, Value>,
    format: SbomFormat,
    source_label: &str,
) -> Result<T, FormatError> {
    serde_json::from_value(Value::Object(object)).map_err(|e| FormatError::InvalidStructure {
        format: format.name().to_string(),
        source_label: source_label.to_string(),
        details: e.to_string(),
    })
}
