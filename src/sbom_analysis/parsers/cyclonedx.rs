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

/// CycloneDX JSON parser (1.2 through 1.6)
pub struct CycloneDxParser;

impl SbomParser for CycloneDxParser {
    fn format(&self) -> SbomFormat {
        SbomFormat::CycloneDx
    }

    fn parse_object(
        &self,
        object: Map<String, Value>,
        source_label: &str,
    ) -> Result<ParsedSbom, FormatError> {
        let bom: CycloneDxBom = deserialize_object(object, self.format(), source_label)?;

        let document = build_document(&bom, source_label);
        let components = build_components(bom.components.unwrap_or_default());
        let edges = match bom.dependencies {
            Some(dependencies) if !dependencies.is_empty() => declared_edges(dependencies),
            _ => synthesize_star_graph(&components),
        };

        tracing::debug!(
            components = components.len(),
            edges = edges.len(),
            "Parsed CycloneDX document"
        );

        Ok(ParsedSbom {
            document,
            components,
            edges,
        })
    }
}

fn build_document(bom: &CycloneDxBom, source_label: &str) -> SbomDocument {
    let metadata = bom.metadata.as_ref();

    let tools = metadata
        .and_then(|m| m.tools.as_ref())
        .map(CdxTools::labels)
        .unwrap_or_default();

    let authors = metadata
        .and_then(|m| m.authors.as_ref())
        .map(|authors| {
            authors
                .iter()
                .filter_map(|a| a.name.clone().or_else(|| a.email.clone()))
                .filter(|a| !a.trim().is_empty())
                .collect()
        })
        .unwrap_or_default();

    SbomDocument::new(
        SbomFormat::CycloneDx,
        bom.spec_version.clone().unwrap_or_default(),
        source_label.to_string(),
    )
    .with_serial_number(bom.serial_number.clone())
    .with_created(metadata.and_then(|m| m.timestamp.clone()))
    .with_authors(authors)
    .with_tools(tools)
}

fn build_components(raw: Vec<CdxComponent>) -> Vec<Component> {
    let ids = assign_unique_ids(raw.iter().map(|c| c.bom_ref.as_deref()), "component");

    raw.into_iter()
        .zip(ids)
        .map(|(c, id)| {
            let name = c
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| id.clone());
            let component_type = c
                .component_type
                .as_deref()
                .map(ComponentType::from_cyclonedx)
                .unwrap_or(ComponentType::Library);
            let ecosystem = ecosystem_or_default(c.purl.as_deref());
            let license = flatten_licenses(c.licenses.as_deref().unwrap_or_default());
            let hashes = c
                .hashes
                .unwrap_or_default()
                .into_iter()
                .map(|h| HashDigest::new(h.alg, h.content))
                .collect();

            Component::builder(id, name)
                .version(c.version)
                .component_type(component_type)
                .ecosystem(ecosystem)
                .license(license)
                .purl(c.purl)
                .hashes(hashes)
                .supplier(c.supplier.and_then(|s| s.name))
                .description(c.description)
                .maintainer(c.author.or(c.publisher))
                .build()
        })
        .collect()
}

/// Joins license ids, names and expressions with `", "`
///
/// Returns `None` when nothing usable is recorded so the component falls
/// back to `"Unknown"`.
fn flatten_licenses(licenses: &[CdxLicenseChoice]) -> Option<String> {
    let parts: Vec<&str> = licenses
        .iter()
        .filter_map(|choice| match choice {
            CdxLicenseChoice::Text(text) => Some(text.as_str()),
            CdxLicenseChoice::License { license } => {
                license.id.as_deref().or(license.name.as_deref())
            }
            CdxLicenseChoice::Expression { expression } => Some(expression.as_str()),
            CdxLicenseChoice::Other(_) => None,
        })
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn declared_edges(dependencies: Vec<CdxDependency>) -> Vec<DependencyEdge> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for dependency in dependencies {
        for target in dependency.depends_on.unwrap_or_default() {
            if let Some(edge) =
                DependencyEdge::new(dependency.reference.clone(), target, RelationKind::DependsOn)
            {
                if seen.insert(edge.clone()) {
                    edges.push(edge);
                }
            }
        }
    }
    edges
}

/// Root-to-every-other-component edges for documents without a dependency list
///
/// Root is the first `application` component, else the first component.
fn synthesize_star_graph(components: &[Component]) -> Vec<DependencyEdge> {
    let Some(root) = components
        .iter()
        .find(|c| *c.component_type() == ComponentType::Application)
        .or_else(|| components.first())
    else {
        return Vec::new();
    };

    components
        .iter()
        .filter_map(|c| DependencyEdge::new(root.id(), c.id(), RelationKind::Synthesized))
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycloneDxBom {
    spec_version: Option<String>,
    serial_number: Option<String>,
    metadata: Option<CdxMetadata>,
    components: Option<Vec<CdxComponent>>,
    dependencies: Option<Vec<CdxDependency>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxMetadata {
    timestamp: Option<String>,
    tools: Option<CdxTools>,
    authors: Option<Vec<CdxAuthor>>,
}

/// `metadata.tools`: an array in 1.4/1.5, an object with components/services in 1.6
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CdxTools {
    List(Vec<CdxTool>),
    Object {
        #[serde(default)]
        components: Vec<CdxTool>,
        #[serde(default)]
        services: Vec<CdxTool>,
    },
}

impl CdxTools {
    fn labels(&self) -> Vec<String> {
        let tools: Box<dyn Iterator<Item = &CdxTool>> = match self {
            CdxTools::List(tools) => Box::new(tools.iter()),
            CdxTools::Object {
                components,
                services,
            } => Box::new(components.iter().chain(services.iter())),
        };
        tools.filter_map(CdxTool::label).collect()
    }
}

#[derive(Debug, Deserialize)]
struct CdxTool {
    name: Option<String>,
    version: Option<String>,
}

impl CdxTool {
    fn label(&self) -> Option<String> {
        let name = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        Some(match self.version.as_deref().map(str::trim) {
            Some(version) if !version.is_empty() => format!("{}@{}", name, version),
            _ => name.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CdxAuthor {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponent {
    #[serde(rename = "type")]
    component_type: Option<String>,
    #[serde(rename = "bom-ref", alias = "bomRef")]
    bom_ref: Option<String>,
    name: Option<String>,
    version: Option<String>,
    purl: Option<String>,
    description: Option<String>,
    author: Option<String>,
    publisher: Option<String>,
    licenses: Option<Vec<CdxLicenseChoice>>,
    supplier: Option<CdxSupplier>,
    hashes: Option<Vec<CdxHash>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CdxLicenseChoice {
    Text(String),
    License { license: CdxLicense },
    Expression { expression: String },
    Other(Value),
}

#[derive(Debug, Deserialize)]
struct CdxLicense {
    id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxSupplier {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxHash {
    alg: String,
    content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxDependency {
    #[serde(rename = "ref")]
    reference: String,
    depends_on: Option<Vec<String>>,
}
