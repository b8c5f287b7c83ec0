use crate::sbom_analysis::domain::{Component, UNKNOWN_LICENSE};
use std::collections::HashSet;

/// Policy verdicts for one component, consumed by the risk scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyFlags {
    pub license_approved: bool,
    pub maintainer_active: bool,
}

impl Default for PolicyFlags {
    fn default() -> Self {
        Self {
            license_approved: true,
            maintainer_active: true,
        }
    }
}

/// ComponentPolicy encodes the organisation's license and maintainer rules
///
/// Rules:
/// - With no approved-license list configured, every license is approved.
/// - License comparison is case-insensitive.
/// - A comma-joined license string is approved only if every element is.
/// - `"Unknown"` is never approved once a list is configured.
/// - A maintainer is active unless listed as inactive.
#[derive(Debug, Clone, Default)]
pub struct ComponentPolicy {
    approved_licenses: Option<HashSet<String>>,
    inactive_maintainers: HashSet<String>,
}

impl ComponentPolicy {
    pub fn new(approved_licenses: Option<Vec<String>>, inactive_maintainers: Vec<String>) -> Self {
        Self {
            approved_licenses: approved_licenses
                .map(|list| list.iter().map(|l| normalize(l)).collect()),
            inactive_maintainers: inactive_maintainers.iter().map(|m| normalize(m)).collect(),
        }
    }

    /// True when the policy would change any score, i.e. flags should be passed
    pub fn is_configured(&self) -> bool {
        self.approved_licenses.is_some() || !self.inactive_maintainers.is_empty()
    }

    pub fn evaluate(&self, component: &Component) -> PolicyFlags {
        PolicyFlags {
            license_approved: self.is_license_approved(component.license()),
            maintainer_active: component
                .maintainer()
                .is_none_or(|m| !self.inactive_maintainers.contains(&normalize(m))),
        }
    }

    pub fn is_license_approved(&self, license: &str) -> bool {
        let Some(approved) = &self.approved_licenses else {
            return true;
        };

        let mut parts = license
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .peekable();
        if parts.peek().is_none() {
            return false;
        }
        parts.all(|p| !p.eq_ignore_ascii_case(UNKNOWN_LICENSE) && approved.contains(&normalize(p)))
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}
