use crate::cli::OutputFormat;
use crate::config::{self, ColumnsConfig, GreenriskConfig};
use crate::formatting::FormattingConfig;
use crate::io;
use crate::observability::{phase_span, PipelinePhase};
use crate::output::{self, RiskReport};
use crate::pipeline::{self, PipelineSettings};
use crate::risk::RiskClassifier;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub charts_dir: Option<PathBuf>,
    pub no_charts: bool,
    pub snapshot_year: Option<i32>,
    pub trend_start: Option<i32>,
    pub config: Option<PathBuf>,
    pub top: Option<usize>,
    pub formatting_config: FormattingConfig,
}

/// Run settings after CLI flags are laid over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAnalysis {
    pub format: OutputFormat,
    pub columns: ColumnsConfig,
    pub settings: PipelineSettings,
    /// `None` when chart rendering is disabled
    pub charts_dir: Option<PathBuf>,
}

/// Merge CLI flags over file values; flags win.
pub fn resolve_settings(config: &AnalyzeConfig, file: &GreenriskConfig) -> Result<ResolvedAnalysis> {
    let analysis = file.analysis();
    let file_output = file.output();

    let snapshot_year = config.snapshot_year.unwrap_or(analysis.snapshot_year);
    let trend_start_year = config.trend_start.unwrap_or(analysis.trend_start_year);

    let format = match (config.format, file_output.default_format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(name)) => OutputFormat::from_str(name, true)
            .map_err(|e| anyhow::anyhow!("Invalid output.default_format: {e}"))?,
        (None, None) => OutputFormat::Terminal,
    };

    let charts_dir = if config.no_charts {
        None
    } else {
        Some(
            config
                .charts_dir
                .clone()
                .or_else(|| file_output.charts_dir.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(".")),
        )
    };

    Ok(ResolvedAnalysis {
        format,
        columns: file.columns(),
        settings: PipelineSettings {
            classifier: RiskClassifier::new(file.classification().offset_threshold),
            snapshot_year,
            trend_start_year,
        },
        charts_dir,
    })
}

fn load_file_config(config: &AnalyzeConfig) -> Result<GreenriskConfig> {
    match &config.config {
        Some(path) => config::load_config_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(config::load_config()),
    }
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let file_config = load_file_config(&config)?;
    let resolved = resolve_settings(&config, &file_config)?;

    let dataset = io::load_records(&config.path, &resolved.columns)
        .with_context(|| format!("Failed to load {}", config.path.display()))?;
    let skipped = dataset.skipped_rows.len();
    if skipped > 0 {
        warn!(skipped, "rows without year or parent entity were skipped");
    }

    let result = pipeline::run_pipeline(dataset.records, &resolved.settings);
    if result.representatives.is_empty() {
        warn!(
            year = resolved.settings.snapshot_year,
            "no entity reports data in the snapshot year"
        );
    }

    let mut report = RiskReport::build(config.path.clone(), &result, skipped, config.top);
    if let Some(dir) = &resolved.charts_dir {
        report.charts = output::render_charts(&result, dir)
            .with_context(|| format!("Failed to write charts to {}", dir.display()))?;
    }

    let _span = phase_span(PipelinePhase::OutputGeneration);
    let mut writer = io::output::create_writer(
        resolved.format,
        config.output.as_deref(),
        config.formatting_config,
    )?;
    writer.write_report(&report)?;
    if let Some(path) = &config.output {
        info!(path = %path.display(), "wrote report");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisSettings, OutputConfig};

    fn cli_config() -> AnalyzeConfig {
        AnalyzeConfig {
            path: PathBuf::from("data.csv"),
            format: None,
            output: None,
            charts_dir: None,
            no_charts: false,
            snapshot_year: None,
            trend_start: None,
            config: None,
            top: None,
            formatting_config: FormattingConfig::plain(),
        }
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let resolved = resolve_settings(&cli_config(), &GreenriskConfig::default()).unwrap();
        assert_eq!(resolved.format, OutputFormat::Terminal);
        assert_eq!(resolved.settings, PipelineSettings::default());
        assert_eq!(resolved.charts_dir, Some(PathBuf::from(".")));
    }

    #[test]
    fn test_flags_override_file() {
        let file = GreenriskConfig {
            analysis: Some(AnalysisSettings {
                snapshot_year: 2020,
                trend_start_year: 2000,
            }),
            output: Some(OutputConfig {
                default_format: Some("markdown".to_string()),
                charts_dir: Some("charts".to_string()),
            }),
            ..Default::default()
        };

        let resolved = resolve_settings(&cli_config(), &file).unwrap();
        assert_eq!(resolved.format, OutputFormat::Markdown);
        assert_eq!(resolved.settings.snapshot_year, 2020);
        assert_eq!(resolved.charts_dir, Some(PathBuf::from("charts")));

        let mut flags = cli_config();
        flags.format = Some(OutputFormat::Json);
        flags.snapshot_year = Some(2022);
        flags.no_charts = true;
        let resolved = resolve_settings(&flags, &file).unwrap();
        assert_eq!(resolved.format, OutputFormat::Json);
        assert_eq!(resolved.settings.snapshot_year, 2022);
        assert_eq!(resolved.settings.trend_start_year, 2000);
        assert_eq!(resolved.charts_dir, None);
    }

    #[test]
    fn test_snapshot_year_before_default_trend_start_is_accepted() {
        let mut flags = cli_config();
        flags.snapshot_year = Some(2000);
        let resolved = resolve_settings(&flags, &GreenriskConfig::default()).unwrap();
        assert_eq!(resolved.settings.snapshot_year, 2000);
        assert_eq!(resolved.settings.trend_start_year, 2005);
    }
}
