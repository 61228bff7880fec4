use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use codegauge::cli::{Cli, Commands, OutputFormat};
use codegauge::config::{LintConfig, ServerConfig};
use codegauge::core::{AnalysisReport, Language};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve {
            host,
            port,
            pylint,
            lint_timeout,
        } => {
            let config = ServerConfig {
                host,
                port,
                lint: LintConfig {
                    binary: pylint,
                    timeout: Duration::from_secs(lint_timeout),
                },
            };
            run_server(config)
        }
        Commands::Analyze {
            path,
            language,
            format,
        } => run_analyze(&path, language.map(Into::into), format),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("codegauge=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_server(config: ServerConfig) -> Result<()> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?
        .block_on(codegauge::server::serve(config))
}

fn run_analyze(path: &Path, language: Option<Language>, format: OutputFormat) -> Result<()> {
    let source = read_source(path)?;
    let language = language
        .or_else(|| Language::from_path(path))
        .ok_or_else(|| anyhow!("cannot infer language from {}; pass --language", path.display()))?;

    let report = codegauge::engine::analyze_source(&source, language)
        .map_err(|err| anyhow!("analysis failed: {err}"))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Summary => print_summary(&report),
    }
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn print_summary(report: &AnalysisReport) {
    println!("Language:            {}", report.language);
    println!(
        "Overall score:       {:.2} ({})",
        report.overall_score, report.overall_interpretation
    );
    print_metric_line(
        "Cyclomatic",
        report.metrics.cyclomatic_complexity.result.value,
        &report.metrics.cyclomatic_complexity.band_label,
    );
    print_metric_line(
        "Cognitive",
        report.metrics.cognitive_complexity.result.value,
        &report.metrics.cognitive_complexity.band_label,
    );
    print_metric_line(
        "Weighted",
        report.metrics.weighted_complexity.result.value,
        &report.metrics.weighted_complexity.band_label,
    );
    print_metric_line(
        "Maintainability",
        report.metrics.maintainability_index.result.value,
        &report.metrics.maintainability_index.band_label,
    );
    if let Some(quality) = &report.quality {
        match quality.score {
            Some(score) => println!("Lint score:          {score:.2}/10"),
            None => println!("Lint score:          (no score in linter output)"),
        }
    }
    println!("Recommendations:");
    for recommendation in &report.recommendations {
        println!("  - {recommendation}");
    }
}

fn print_metric_line(name: &str, value: f64, band: &str) {
    println!("{name:<21}{value:.2} ({band})");
}
