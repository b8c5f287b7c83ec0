use serde::Serialize;
use std::fmt;

/// Severity bucket of a vulnerability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// Derives a severity from a CVSS base score
    ///
    /// - 9.0 and above: Critical
    /// - 7.0 to 8.9: High
    /// - 4.0 to 6.9: Medium
    /// - above 0.0: Low
    /// - 0.0 (no score): Unknown
    pub fn from_cvss_score(score: f32) -> Self {
        if score >= 9.0 {
            Severity::Critical
        } else if score >= 7.0 {
            Severity::High
        } else if score >= 4.0 {
            Severity::Medium
        } else if score > 0.0 {
            Severity::Low
        } else {
            Severity::Unknown
        }
    }

    /// Parses a severity label supplied by a vulnerability source
    ///
    /// Accepts `MODERATE` as an alias of `MEDIUM`. Returns `None` for labels
    /// that carry no usable severity so the caller can fall back to CVSS.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" => Some(Severity::Critical),
            "HIGH" => Some(Severity::High),
            "MODERATE" | "MEDIUM" => Some(Severity::Medium),
            "LOW" => Some(Severity::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vulnerability value object attached to a component analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    id: String,
    cve_id: String,
    severity: Severity,
    summary: String,
    published: Option<String>,
    cvss_v2: Option<f32>,
    cvss_v3: Option<f32>,
    cvss_max: f32,
    known_exploited: bool,
    epss_score: Option<f32>,
    references: Vec<String>,
}

impl Vulnerability {
    pub fn new(id: String, cve_id: String, severity: Severity, summary: String) -> Self {
        Self {
            id,
            cve_id,
            severity,
            summary,
            published: None,
            cvss_v2: None,
            cvss_v3: None,
            cvss_max: 0.0,
            known_exploited: false,
            epss_score: None,
            references: Vec::new(),
        }
    }

    /// Sets both CVSS scores and recomputes `cvss_max`
    ///
    /// Scores outside 0.0..=10.0 or NaN are discarded.
    pub fn with_cvss(mut self, cvss_v2: Option<f32>, cvss_v3: Option<f32>) -> Self {
        self.cvss_v2 = cvss_v2.filter(|s| valid_cvss(*s));
        self.cvss_v3 = cvss_v3.filter(|s| valid_cvss(*s));
        self.cvss_max = Self::max_score(self.cvss_v2, self.cvss_v3);
        self
    }

    pub fn with_published(mut self, published: Option<String>) -> Self {
        self.published = published;
        self
    }

    pub fn with_known_exploited(mut self, known_exploited: bool) -> Self {
        self.known_exploited = known_exploited;
        self
    }

    /// Exploit prediction probability, clamped to 0.0..=1.0
    pub fn with_epss_score(mut self, epss_score: Option<f32>) -> Self {
        self.epss_score = epss_score.filter(|s| !s.is_nan()).map(|s| s.clamp(0.0, 1.0));
        self
    }

    pub fn with_references(mut self, references: Vec<String>) -> Self {
        self.references = references;
        self
    }

    /// Largest of the available CVSS scores, 0.0 when none is known
    pub fn max_score(cvss_v2: Option<f32>, cvss_v3: Option<f32>) -> f32 {
        cvss_v2
            .into_iter()
            .chain(cvss_v3)
            .fold(0.0_f32, f32::max)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cve_id(&self) -> &str {
        &self.cve_id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn published(&self) -> Option<&str> {
        self.published.as_deref()
    }

    pub fn cvss_v2(&self) -> Option<f32> {
        self.cvss_v2
    }

    pub fn cvss_v3(&self) -> Option<f32> {
        self.cvss_v3
    }

    pub fn cvss_max(&self) -> f32 {
        self.cvss_max
    }

    pub fn known_exploited(&self) -> bool {
        self.known_exploited
    }

    pub fn epss_score(&self) -> Option<f32> {
        self.epss_score
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }
}

/// Vulnerability as reported by a vulnerability source, before mapping
///
/// Every field besides `id` is optional; sources fill in what they know and
/// `VulnerabilityMapper` derives the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VulnerabilityRecord {
    pub id: String,
    pub aliases: Vec<String>,
    pub summary: Option<String>,
    /// Severity label as given by the source (e.g. `HIGH`, `MODERATE`)
    pub severity: Option<String>,
    pub published: Option<String>,
    pub cvss_v2: Option<f32>,
    pub cvss_v3: Option<f32>,
    pub known_exploited: bool,
    pub epss_score: Option<f32>,
    pub references: Vec<String>,
}

impl VulnerabilityRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// True when `id` is the record id or one of its aliases
    pub fn is_identified_by(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(id))
    }
}

fn valid_cvss(score: f32) -> bool {
    (0.0..=10.0).contains(&score)
}
