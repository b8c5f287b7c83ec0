use serde::Serialize;

/// License string used when a document records no license for a component
pub const UNKNOWN_LICENSE: &str = "Unknown";

/// Version string used when a document records no version for a component
pub const UNKNOWN_VERSION: &str = "unknown";

/// Kind of software unit a component describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Application,
    Library,
    Framework,
    Package,
    Other,
}

impl ComponentType {
    /// Maps a CycloneDX `type` value. Unrecognized values become `Other`.
    pub fn from_cyclonedx(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "application" => ComponentType::Application,
            "library" => ComponentType::Library,
            "framework" => ComponentType::Framework,
            _ => ComponentType::Other,
        }
    }
}

/// A single (algorithm, digest) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HashDigest {
    pub algorithm: String,
    pub value: String,
}

impl HashDigest {
    pub fn new(algorithm: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            value: value.into(),
        }
    }

    /// True for `SHA-256`, `SHA256` and `sha-256` spellings
    pub fn is_sha256(&self) -> bool {
        self.algorithm.replace(['-', '_'], "").eq_ignore_ascii_case("SHA256")
    }
}

/// Component entity: one inventory entry of an SBOM
///
/// Created by a parser and never mutated afterwards. Enrichment results are
/// attached through `ComponentAnalysis`, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    id: String,
    name: String,
    version: String,
    component_type: ComponentType,
    ecosystem: String,
    license: String,
    purl: Option<String>,
    hashes: Vec<HashDigest>,
    supplier: Option<String>,
    description: Option<String>,
    release_date: Option<String>,
    maintainer: Option<String>,
    popularity: Option<u64>,
}

impl Component {
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> ComponentBuilder {
        ComponentBuilder::new(id.into(), name.into())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn component_type(&self) -> &ComponentType {
        &self.component_type
    }

    pub fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn purl(&self) -> Option<&str> {
        self.purl.as_deref()
    }

    /// Hashes with SHA-256 entries first
    pub fn hashes(&self) -> &[HashDigest] {
        &self.hashes
    }

    pub fn supplier(&self) -> Option<&str> {
        self.supplier.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }

    pub fn maintainer(&self) -> Option<&str> {
        self.maintainer.as_deref()
    }

    /// Popularity metric (e.g. weekly downloads) when the source knows it
    pub fn popularity(&self) -> Option<u64> {
        self.popularity
    }
}

/// Builder for [`Component`]
///
/// Unset fields fall back to explicit defaults: version `"unknown"`,
/// license `"Unknown"`, ecosystem `"unknown"`, type `Library`.
#[derive(Debug, Clone)]
pub struct ComponentBuilder {
    id: String,
    name: String,
    version: Option<String>,
    component_type: ComponentType,
    ecosystem: Option<String>,
    license: Option<String>,
    purl: Option<String>,
    hashes: Vec<HashDigest>,
    supplier: Option<String>,
    description: Option<String>,
    release_date: Option<String>,
    maintainer: Option<String>,
    popularity: Option<u64>,
}

impl ComponentBuilder {
    fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            version: None,
            component_type: ComponentType::Library,
            ecosystem: None,
            license: None,
            purl: None,
            hashes: Vec::new(),
            supplier: None,
            description: None,
            release_date: None,
            maintainer: None,
            popularity: None,
        }
    }

    pub fn version(mut self, version: Option<String>) -> Self {
        self.version = non_blank(version);
        self
    }

    pub fn component_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = component_type;
        self
    }

    pub fn ecosystem(mut self, ecosystem: impl Into<String>) -> Self {
        self.ecosystem = Some(ecosystem.into());
        self
    }

    pub fn license(mut self, license: Option<String>) -> Self {
        self.license = non_blank(license);
        self
    }

    pub fn purl(mut self, purl: Option<String>) -> Self {
        self.purl = non_blank(purl);
        self
    }

    pub fn hashes(mut self, hashes: Vec<HashDigest>) -> Self {
        self.hashes = hashes;
        self
    }

    pub fn supplier(mut self, supplier: Option<String>) -> Self {
        self.supplier = non_blank(supplier);
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = non_blank(description);
        self
    }

    pub fn release_date(mut self, release_date: Option<String>) -> Self {
        self.release_date = non_blank(release_date);
        self
    }

    pub fn maintainer(mut self, maintainer: Option<String>) -> Self {
        self.maintainer = non_blank(maintainer);
        self
    }

    pub fn popularity(mut self, popularity: Option<u64>) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn build(self) -> Component {
        let mut hashes = self.hashes;
        // Stable: relative order of the remaining algorithms is preserved.
        hashes.sort_by_key(|h| !h.is_sha256());

        Component {
            id: self.id,
            name: self.name,
            version: self.version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            component_type: self.component_type,
            ecosystem: self.ecosystem.unwrap_or_else(|| "unknown".to_string()),
            license: self.license.unwrap_or_else(|| UNKNOWN_LICENSE.to_string()),
            purl: self.purl,
            hashes,
            supplier: self.supplier,
            description: self.description,
            release_date: self.release_date,
            maintainer: self.maintainer,
            popularity: self.popularity,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
