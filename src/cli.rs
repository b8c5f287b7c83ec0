use clap::Parser;
use std::path::PathBuf;

/// Analyze CycloneDX and SPDX SBOMs for compliance, data quality and supply-chain risk
#[derive(Parser, Debug)]
#[command(name = "sbom-analyzer")]
#[command(version)]
#[command(
    about = "Analyze CycloneDX and SPDX SBOMs for compliance, data quality and supply-chain risk",
    long_about = None
)]
pub struct Args {
    /// Path to the SBOM document (CycloneDX or SPDX, JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output file path for the JSON result (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a config file (defaults to sbom-analyzer.config.yml next to FILE)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip vulnerability lookups and score components on metadata only
    #[arg(long)]
    pub offline: bool,

    /// Flag vulnerabilities listed in the CISA Known Exploited Vulnerabilities catalog
    #[arg(long)]
    pub check_kev: bool,

    /// Number of components looked up concurrently
    #[arg(long, value_name = "N", value_parser = parse_batch_size)]
    pub batch_size: Option<usize>,

    /// Pause between two lookup batches in milliseconds
    #[arg(long, value_name = "MS")]
    pub batch_delay_ms: Option<u64>,

    /// Exit with code 1 when the overall risk score is below SCORE (0-100)
    #[arg(long, value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_below: Option<u8>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn parse_batch_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("batch size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid batch size: {}", s)),
    }
}
