mod cli;
mod config;

use cli::Args;
use config::{discover_config, load_config_from_path, ResolvedOptions};
use owo_colors::OwoColorize;
use sbom_analyzer::adapters::outbound::console::StderrProgressReporter;
use sbom_analyzer::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use sbom_analyzer::adapters::outbound::network::{
    CachingVulnerabilityRepository, KevCatalog, KevEnrichingRepository,
    OfflineVulnerabilityRepository, OsvClient,
};
use sbom_analyzer::application::dto::{AnalysisRequest, AnalysisResponse};
use sbom_analyzer::application::use_cases::{AnalyzeSbomUseCase, EnrichComponentsUseCase};
use sbom_analyzer::ports::outbound::{OutputPresenter, SbomReader, VulnerabilityRepository};
use sbom_analyzer::shared::error::ExitCode;
use sbom_analyzer::shared::Result;
use std::path::Path;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Installs the stderr subscriber; `RUST_LOG` wins unless `--verbose` is given
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = match args.config.as_deref() {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(config_dir(&args.file))?,
    };
    let options = ResolvedOptions::resolve(&args, config);

    // Read input (security checks happen in the reader)
    let content = FileSystemReader::new().read_sbom(&args.file)?;
    let source_label = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    // Create adapters (Dependency Injection)
    let repository = build_repository(&options).await?;
    let enricher = EnrichComponentsUseCase::new(repository, options.settings.clone())
        .with_policy(options.component_policy());
    let use_case = AnalyzeSbomUseCase::new(enricher, StderrProgressReporter::new());

    // Execute use case
    let response = use_case
        .execute(AnalysisRequest::new(content, source_label))
        .await?;

    // Present output
    let output = serde_json::to_string_pretty(&response.result)?;
    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&output)?;

    print_summary(&response);

    Ok(exit_code_for(
        response.result.overall_risk_score,
        options.fail_below,
    ))
}

/// Directory searched for `sbom-analyzer.config.yml`
fn config_dir(file: &Path) -> &Path {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

async fn build_repository(options: &ResolvedOptions) -> Result<Box<dyn VulnerabilityRepository>> {
    if options.offline {
        if options.check_kev {
            tracing::warn!("--check-kev has no effect in offline mode");
        }
        return Ok(Box::new(OfflineVulnerabilityRepository::new()));
    }

    let osv = CachingVulnerabilityRepository::new(OsvClient::new()?);
    if !options.check_kev {
        return Ok(Box::new(osv));
    }

    match KevCatalog::fetch().await {
        Ok(catalog) => Ok(Box::new(KevEnrichingRepository::new(osv, catalog))),
        Err(e) => {
            tracing::warn!(error = %e, "KEV catalog unavailable, continuing without it");
            Ok(Box::new(osv))
        }
    }
}

fn print_summary(response: &AnalysisResponse) {
    let result = &response.result;
    let summary = &result.vulnerability_summary;
    let score = result.overall_risk_score;

    let score_text = format!("risk score {}/100", score);
    let score_text = if score >= 80 {
        score_text.green().to_string()
    } else if score >= 50 {
        score_text.yellow().to_string()
    } else {
        score_text.red().bold().to_string()
    };
    let ntia = if result.ntia_compliance.compliant {
        "NTIA compliant".green().to_string()
    } else {
        format!("NTIA {}%", result.ntia_compliance.score)
            .yellow()
            .to_string()
    };

    eprintln!(
        "📊 {} component(s), {} vulnerabilities ({} critical, {} high), {}, {}{}",
        result.components.len(),
        summary.total,
        summary.critical,
        summary.high,
        ntia,
        score_text,
        if response.is_partial() {
            " (partial)".dimmed().to_string()
        } else {
            String::new()
        }
    );
    if response.lookup_failures > 0 {
        eprintln!(
            "⚠️  {} vulnerability lookup(s) failed; affected components are scored on metadata only",
            response.lookup_failures
        );
    }
}

fn exit_code_for(score: u8, fail_below: Option<u8>) -> ExitCode {
    match fail_below {
        Some(threshold) if score < threshold => ExitCode::RiskThresholdExceeded,
        _ => ExitCode::Success,
    }
}
