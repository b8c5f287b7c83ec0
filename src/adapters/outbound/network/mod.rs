/// Network adapters for external vulnerability sources
mod caching_vulnerability_repository;
mod cvss;
mod kev_catalog;
mod kev_enriching_repository;
mod offline_repository;
mod osv_client;

pub use caching_vulnerability_repository::CachingVulnerabilityRepository;
pub use cvss::{cvss_v2_base_score, cvss_v3_base_score};
pub use kev_catalog::{KevCatalog, KEV_CATALOG_URL};
pub use kev_enriching_repository::KevEnrichingRepository;
pub use offline_repository::OfflineVulnerabilityRepository;
pub use osv_client::{osv_ecosystem, OsvClient};
