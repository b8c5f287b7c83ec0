use serde::Serialize;

/// How a dependency edge was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    /// CycloneDX `dependsOn` or SPDX `DEPENDS_ON`
    DependsOn,
    /// SPDX `DEPENDENCY_OF`, stored reversed so the edge points dependent -> dependency
    DependencyOf,
    /// SPDX `CONTAINS`
    Contains,
    /// Root-to-component edge invented for CycloneDX documents without a dependency list.
    /// This is a leniency, not evidence about the real dependency structure.
    Synthesized,
}

/// Directed edge between two component ids of the same document
///
/// Self-edges are never constructed; cycles are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    from: String,
    to: String,
    kind: RelationKind,
}

impl DependencyEdge {
    /// Returns `None` for a self-edge
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RelationKind) -> Option<Self> {
        let from = from.into();
        let to = to.into();
        if from == to {
            return None;
        }
        Some(Self { from, to, kind })
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }
}
