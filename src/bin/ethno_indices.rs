// Ethnobiological index CLI
//
// Purpose: Compute indices for one survey table and export each result
// Usage: cargo run --features cli --bin ethno_indices -- <table.csv|table.parquet> [INDEX ...]

use anyhow::{bail, Context};
use ethno_indices::{IndexKind, ResultView, Survey, SurveyConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    Json,
    Parquet,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "parquet" => Ok(OutputFormat::Parquet),
            other => bail!("Unknown OUTPUT_FORMAT '{}' (expected csv, json or parquet)", other),
        }
    }
}

fn default_indices(config: &SurveyConfig) -> Vec<IndexKind> {
    let mut kinds: Vec<IndexKind> = IndexKind::PER_TAXON.to_vec();
    kinds.push(IndexKind::FidelityLevel);
    kinds.push(IndexKind::InformantConsensus);
    if config.columns.literature_column.is_some() {
        kinds.push(IndexKind::Jaccard);
    }
    kinds
}

fn export(view: &ResultView, survey: &Survey, output_dir: &Path, format: OutputFormat) -> anyhow::Result<PathBuf> {
    let bindings = &survey.config().columns;
    let path = match format {
        OutputFormat::Csv => view.save_csv(output_dir, bindings)?,
        OutputFormat::Parquet => view.save_parquet(output_dir, bindings)?,
        OutputFormat::Json => {
            let path = output_dir.join(view.file_name().replace(".csv", ".json"));
            fs::write(&path, view.to_json()?)
                .with_context(|| format!("Failed to write {:?}", path))?;
            path
        }
    };
    Ok(path)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "ethno_indices=info,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(table_path) = args.next() else {
        bail!("Usage: ethno_indices <table.csv|table.parquet> [INDEX ...]");
    };
    let requested: Vec<String> = args.collect();

    // Configuration from environment variables
    let config = match std::env::var("ETHNO_CONFIG") {
        Ok(path) => SurveyConfig::load(Path::new(&path))?,
        Err(_) => SurveyConfig::default(),
    };

    let output_dir = PathBuf::from(
        std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "ethno_output".to_string()),
    );

    let format: OutputFormat = std::env::var("OUTPUT_FORMAT")
        .unwrap_or_else(|_| "csv".to_string())
        .parse()?;

    tracing::info!("Configuration:");
    tracing::info!("  TABLE: {}", table_path);
    tracing::info!("  OUTPUT_DIR: {}", output_dir.display());
    tracing::info!("  OUTPUT_FORMAT: {:?}", format);

    let kinds: Vec<IndexKind> = if requested.is_empty() {
        default_indices(&config)
    } else {
        requested
            .iter()
            .map(|name| IndexKind::from_str(name))
            .collect::<Result<_, _>>()?
    };

    let survey = Survey::from_path(Path::new(&table_path), config)?;

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    let mut failures = 0usize;
    for kind in kinds {
        match survey.calculate(kind) {
            Ok(view) => {
                let path = export(&view, &survey, &output_dir, format)?;
                tracing::info!("{}: {} rows -> {}", view.name(), view.table().len(), path.display());
            }
            Err(err) => {
                failures += 1;
                tracing::warn!("{} skipped: {}", kind.short_name(), err);
            }
        }
    }

    let summary = survey.calculate_summary(None, false)?;
    let path = export(&summary, &survey, &output_dir, format)?;
    tracing::info!("Summary: {} taxa -> {}", summary.table().len(), path.display());

    if failures > 0 {
        tracing::warn!("{} index calculations failed", failures);
    }

    Ok(())
}
