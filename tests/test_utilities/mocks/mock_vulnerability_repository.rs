use async_trait::async_trait;
use sbom_analyzer::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock VulnerabilityRepository for testing
///
/// Answers from a fixed table keyed by package name; names registered with
/// `with_failure` return an error. Every query is recorded.
#[derive(Default, Clone)]
pub struct MockVulnerabilityRepository {
    records: HashMap<String, Vec<VulnerabilityRecord>>,
    failing: HashSet<String>,
    fail_all: bool,
    pub queries: Arc<Mutex<Vec<VulnerabilityQuery>>>,
}

impl MockVulnerabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, package: &str, records: Vec<VulnerabilityRecord>) -> Self {
        self.records.insert(package.to_string(), records);
        self
    }

    pub fn with_failure(mut self, package: &str) -> Self {
        self.failing.insert(package.to_string());
        self
    }

    pub fn failing_everything() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn get_queries(&self) -> Vec<VulnerabilityQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VulnerabilityRepository for MockVulnerabilityRepository {
    async fn fetch_vulnerabilities(
        &self,
        query: &VulnerabilityQuery,
    ) -> Result<Vec<VulnerabilityRecord>> {
        self.queries.lock().unwrap().push(query.clone());

        if self.fail_all || self.failing.contains(&query.name) {
            anyhow::bail!("Mock vulnerability source failure for {}", query.name);
        }

        Ok(self.records.get(&query.name).cloned().unwrap_or_default())
    }
}
