use serde::Serialize;
use std::fmt;

/// Source format of a parsed SBOM document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SbomFormat {
    #[serde(rename = "CycloneDX")]
    CycloneDx,
    #[serde(rename = "SPDX")]
    Spdx,
    Unknown,
}

impl SbomFormat {
    pub fn name(&self) -> &'static str {
        match self {
            SbomFormat::CycloneDx => "CycloneDX",
            SbomFormat::Spdx => "SPDX",
            SbomFormat::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// SbomDocument value object holding document-level metadata
///
/// Immutable once produced by a parser. Fields that a document may omit are
/// kept as `Option` / empty collections so the NTIA validator can report them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SbomDocument {
    format: SbomFormat,
    spec_version: String,
    serial_number: Option<String>,
    namespace: Option<String>,
    created: Option<String>,
    authors: Vec<String>,
    tools: Vec<String>,
    source_label: String,
}

impl SbomDocument {
    pub fn new(format: SbomFormat, spec_version: String, source_label: String) -> Self {
        Self {
            format,
            spec_version,
            serial_number: None,
            namespace: None,
            created: None,
            authors: Vec::new(),
            tools: Vec::new(),
            source_label,
        }
    }

    pub fn with_serial_number(mut self, serial_number: Option<String>) -> Self {
        self.serial_number = non_blank(serial_number);
        self
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = non_blank(namespace);
        self
    }

    pub fn with_created(mut self, created: Option<String>) -> Self {
        self.created = non_blank(created);
        self
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tools = tools;
        self
    }

    pub fn format(&self) -> SbomFormat {
        self.format
    }

    pub fn spec_version(&self) -> &str {
        &self.spec_version
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
