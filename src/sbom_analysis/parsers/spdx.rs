use super::ids::assign_unique_ids;
use super::purl::ecosystem_or_default;
use super::{deserialize_object, ParsedSbom, SbomParser};
use crate::sbom_analysis::domain::{
    Component, ComponentType, DependencyEdge, HashDigest, RelationKind, SbomDocument, SbomFormat,
};
use crate::shared::error::FormatError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

const DOCUMENT_REF: &str = "SPDXRef-DOCUMENT";

/// SPDX 2.x JSON parser
///
/// Unlike CycloneDX, SPDX documents without relationships get no
/// synthesized edges.
pub struct SpdxParser;

impl SbomParser for SpdxParser {
    fn format(&self) -> SbomFormat {
        SbomFormat::Spdx
    }

    fn parse_object(
        &self,
        object: Map<String, Value>,
        source_label: &str,
    ) -> Result<ParsedSbom, FormatError> {
        let doc: SpdxDocument = deserialize_object(object, self.format(), source_label)?;

        let document = build_document(&doc, source_label);
        let components = build_components(doc.packages.unwrap_or_default());
        let edges = relationship_edges(doc.relationships.unwrap_or_default());

        tracing::debug!(
            components = components.len(),
            edges = edges.len(),
            "Parsed SPDX document"
        );

        Ok(ParsedSbom {
            document,
            components,
            edges,
        })
    }
}

fn build_document(doc: &SpdxDocument, source_label: &str) -> SbomDocument {
    let mut tools = Vec::new();
    let mut authors = Vec::new();

    let creation_info = doc.creation_info.as_ref();
    for creator in creation_info.map(|c| c.creators.as_slice()).unwrap_or_default() {
        if let Some(tool) = creator.strip_prefix("Tool:") {
            push_non_blank(&mut tools, tool);
        } else if let Some(author) = creator
            .strip_prefix("Person:")
            .or_else(|| creator.strip_prefix("Organization:"))
        {
            push_non_blank(&mut authors, author);
        }
    }

    SbomDocument::new(
        SbomFormat::Spdx,
        doc.spdx_version.clone().unwrap_or_default(),
        source_label.to_string(),
    )
    .with_namespace(doc.document_namespace.clone())
    .with_created(creation_info.and_then(|c| c.created.clone()))
    .with_authors(authors)
    .with_tools(tools)
}

fn push_non_blank(target: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        target.push(value.to_string());
    }
}

fn build_components(packages: Vec<SpdxPackage>) -> Vec<Component> {
    let ids = assign_unique_ids(packages.iter().map(|p| p.spdx_id.as_deref()), "package");

    packages
        .into_iter()
        .zip(ids)
        .map(|(p, id)| {
            let name = p
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| id.clone());
            let purl = p.external_refs.as_deref().and_then(find_purl);
            let ecosystem = ecosystem_or_default(purl.as_deref());
            let license = asserted(p.license_concluded).or_else(|| asserted(p.license_declared));
            let component_type = match p.primary_package_purpose.as_deref() {
                Some(purpose) if purpose.eq_ignore_ascii_case("APPLICATION") => {
                    ComponentType::Application
                }
                _ => ComponentType::Package,
            };
            let hashes = p
                .checksums
                .unwrap_or_default()
                .into_iter()
                .map(|c| HashDigest::new(c.algorithm, c.checksum_value))
                .collect();

            Component::builder(id, name)
                .version(p.version_info)
                .component_type(component_type)
                .ecosystem(ecosystem)
                .license(license)
                .purl(purl)
                .hashes(hashes)
                .supplier(p.supplier.as_deref().and_then(strip_actor))
                .maintainer(p.originator.as_deref().and_then(strip_actor))
                .description(p.description.or(p.summary))
                .release_date(p.release_date)
                .build()
        })
        .collect()
}

/// `NOASSERTION` and `NONE` carry no information and are treated as absent
fn asserted(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != "NOASSERTION" && v != "NONE"
    })
}

/// Strips the `Organization:` / `Person:` / `Tool:` actor prefix
fn strip_actor(value: &str) -> Option<String> {
    let value = value.trim();
    let name = value
        .strip_prefix("Organization:")
        .or_else(|| value.strip_prefix("Person:"))
        .or_else(|| value.strip_prefix("Tool:"))
        .unwrap_or(value)
        .trim();
    asserted(Some(name.to_string()))
}

/// Package-URL from `externalRefs`: a `purl` reference type wins over a
/// generic package-manager category entry
fn find_purl(refs: &[SpdxExternalRef]) -> Option<String> {
    let by_type = refs
        .iter()
        .find(|r| r.reference_type.eq_ignore_ascii_case("purl"));
    let by_category = || {
        refs.iter().find(|r| {
            let category = r.reference_category.replace('_', "-");
            category.eq_ignore_ascii_case("PACKAGE-MANAGER")
                && r.reference_locator.starts_with("pkg:")
        })
    };

    by_type
        .or_else(by_category)
        .map(|r| r.reference_locator.trim().to_string())
        .filter(|l| !l.is_empty())
}

fn relationship_edges(relationships: Vec<SpdxRelationship>) -> Vec<DependencyEdge> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for rel in relationships {
        if rel.spdx_element_id == DOCUMENT_REF || rel.related_spdx_element == DOCUMENT_REF {
            continue;
        }

        let rel_type = rel.relationship_type.to_ascii_uppercase();
        let edge = if rel_type.contains("DEPENDS_ON") {
            DependencyEdge::new(
                rel.spdx_element_id,
                rel.related_spdx_element,
                RelationKind::DependsOn,
            )
        } else if rel_type.contains("DEPENDENCY_OF") {
            // A DEPENDENCY_OF B: B is the dependent.
            DependencyEdge::new(
                rel.related_spdx_element,
                rel.spdx_element_id,
                RelationKind::DependencyOf,
            )
        } else if rel_type.contains("CONTAINS") {
            DependencyEdge::new(
                rel.spdx_element_id,
                rel.related_spdx_element,
                RelationKind::Contains,
            )
        } else {
            None
        };

        if let Some(edge) = edge {
            if seen.insert(edge.clone()) {
                edges.push(edge);
            }
        }
    }
    edges
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocument {
    spdx_version: Option<String>,
    document_namespace: Option<String>,
    creation_info: Option<SpdxCreationInfo>,
    packages: Option<Vec<SpdxPackage>>,
    relationships: Option<Vec<SpdxRelationship>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxCreationInfo {
    created: Option<String>,
    #[serde(default)]
    creators: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage {
    #[serde(rename = "SPDXID")]
    spdx_id: Option<String>,
    name: Option<String>,
    version_info: Option<String>,
    license_concluded: Option<String>,
    license_declared: Option<String>,
    supplier: Option<String>,
    originator: Option<String>,
    checksums: Option<Vec<SpdxChecksum>>,
    external_refs: Option<Vec<SpdxExternalRef>>,
    description: Option<String>,
    summary: Option<String>,
    release_date: Option<String>,
    primary_package_purpose: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxChecksum {
    algorithm: String,
    checksum_value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxExternalRef {
    #[serde(default)]
    reference_category: String,
    #[serde(default)]
    reference_type: String,
    #[serde(default)]
    reference_locator: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpdxRelationship {
    spdx_element_id: String,
    relationship_type: String,
    related_spdx_element: String,
}
