use crate::cli::OutputFormat;
use crate::errors::Error;
use crate::formatting::{ColoredFormatter, FormattingConfig, OutputFormatter};
use crate::output::{RiskReport, SnapshotShare};
use crate::risk::CleanedCategory;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub trait OutputWriter {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()>;
}

/// `n/a` for undefined values, fixed precision otherwise.
pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "n/a".to_string(),
    }
}

/// Count per cleaned category for one trend year, zero when absent.
fn trend_row(report: &RiskReport, year: i32) -> Vec<usize> {
    let points = report.trend_for_year(year);
    CleanedCategory::ALL
        .iter()
        .map(|category| {
            points
                .iter()
                .find(|p| p.category == *category)
                .map_or(0, |p| p.count)
        })
        .collect()
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_snapshot(report)?;
        self.write_representatives(report)?;
        self.write_distribution(report)?;
        self.write_trend(report)?;
        self.write_charts(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Greenwashing Risk Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Source: `{}`", report.source.display())?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Records | {} |", report.total_records)?;
        writeln!(self.writer, "| Skipped rows | {} |", report.skipped_rows)?;
        writeln!(self.writer, "| Entities | {} |", report.entity_count)?;
        writeln!(
            self.writer,
            "| Entities in {} | {} |",
            report.snapshot_year, report.snapshot_entities
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_snapshot(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Snapshot {}", report.snapshot_year)?;
        writeln!(self.writer)?;
        if report.snapshot.is_empty() {
            writeln!(self.writer, "No entities reported in {}.", report.snapshot_year)?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "| Category | Companies | Share |")?;
        writeln!(self.writer, "|----------|-----------|-------|")?;
        for SnapshotShare {
            category,
            count,
            percentage,
        } in &report.snapshot
        {
            writeln!(self.writer, "| {category} | {count} | {percentage:.1}% |")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_representatives(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        if report.representatives.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "### Representatives")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Entity | Scope 1 intensity | Scope 3 intensity | Δ Scope 1 | Δ Scope 3 | Δ Production | Category |"
        )?;
        writeln!(
            self.writer,
            "|--------|-------------------|-------------------|-----------|-----------|--------------|----------|"
        )?;
        for rep in &report.representatives {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} | {} |",
                rep.parent_entity,
                format_optional(rep.scope1_intensity, 4),
                format_optional(rep.scope3_intensity, 4),
                format_optional(rep.deltas.scope1, 4),
                format_optional(rep.deltas.scope3, 4),
                format_optional(rep.deltas.production, 2),
                rep.risk_category
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_distribution(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## All Records")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Category | Records |")?;
        writeln!(self.writer, "|----------|---------|")?;
        for entry in &report.raw_distribution {
            writeln!(self.writer, "| {} | {} |", entry.category, entry.count)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_trend(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "## Trend {}–{}",
            report.trend_start_year, report.trend_end_year
        )?;
        writeln!(self.writer)?;

        let labels: Vec<&str> = CleanedCategory::ALL.iter().map(|c| c.label()).collect();
        writeln!(self.writer, "| Year | {} |", labels.join(" | "))?;
        writeln!(self.writer, "|------{}|", "|---".repeat(labels.len()))?;
        for year in report.trend_years() {
            let cells: Vec<String> = trend_row(report, year)
                .iter()
                .map(usize::to_string)
                .collect();
            writeln!(self.writer, "| {year} | {} |", cells.join(" | "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_charts(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        if report.charts.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Charts")?;
        writeln!(self.writer)?;
        for chart in &report.charts {
            writeln!(self.writer, "- `{}`", chart.display())?;
        }
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: ColoredFormatter,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, config: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: ColoredFormatter::new(config),
        }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        self.print_header(report)?;
        self.print_snapshot(report)?;
        self.print_representatives(report)?;
        self.print_distribution(report)?;
        self.print_trend(report)?;
        self.print_charts(report)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let f = &self.formatter;
        writeln!(self.writer, "{}", f.header("Greenwashing Risk Report"))?;
        writeln!(self.writer, "{}", f.header("========================"))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "  Source: {}", report.source.display())?;
        writeln!(
            self.writer,
            "  Records: {} ({} skipped)",
            report.total_records, report.skipped_rows
        )?;
        writeln!(self.writer, "  Entities: {}", report.entity_count)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_snapshot(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let f = &self.formatter;
        writeln!(
            self.writer,
            "{} {} ({} entities, filtered by Scope1 intensity):",
            f.emoji("📊", "[STATS]"),
            f.bold(&format!("Snapshot {}", report.snapshot_year)),
            report.snapshot_entities
        )?;

        if report.snapshot.is_empty() {
            writeln!(
                self.writer,
                "  {}",
                f.warning(&format!("No entities reported in {}", report.snapshot_year))
            )?;
        }
        for share in &report.snapshot {
            let label = share.category.label();
            let padding = " ".repeat(24usize.saturating_sub(label.len()));
            writeln!(
                self.writer,
                "  {}{padding}{:>5}  {:>5.1}%",
                f.category(share.category),
                share.count,
                share.percentage
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_representatives(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        if report.representatives.is_empty() {
            return Ok(());
        }

        let f = &self.formatter;
        writeln!(self.writer, "{}", f.bold("Representatives:"))?;
        for (i, rep) in report.representatives.iter().enumerate() {
            writeln!(
                self.writer,
                "  {}. {} - {} {}",
                i + 1,
                rep.parent_entity,
                f.category(rep.risk_category_cleaned),
                f.dim(&format!(
                    "(scope1 intensity {}, Δs1 {}, Δs3 {}, Δprod {})",
                    format_optional(rep.scope1_intensity, 4),
                    format_optional(rep.deltas.scope1, 4),
                    format_optional(rep.deltas.scope3, 4),
                    format_optional(rep.deltas.production, 2)
                ))
            )?;
        }
        if report.representatives.len() < report.snapshot_entities {
            writeln!(
                self.writer,
                "  {}",
                f.dim(&format!(
                    "... {} more",
                    report.snapshot_entities - report.representatives.len()
                ))
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_distribution(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.bold("All records:"))?;
        for entry in &report.raw_distribution {
            writeln!(
                self.writer,
                "  {:<24}{:>6}",
                entry.category.label(),
                entry.count
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_trend(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let f = &self.formatter;
        writeln!(
            self.writer,
            "{} {}:",
            f.emoji("📈", "[TREND]"),
            f.bold(&format!(
                "Trend {}–{}",
                report.trend_start_year, report.trend_end_year
            ))
        )?;

        let years = report.trend_years();
        if years.is_empty() {
            writeln!(self.writer, "  {}", f.warning("No records in range"))?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let mut header = String::from("  Year");
        for category in CleanedCategory::ALL {
            header.push_str(&format!("  {:>22}", category.label()));
        }
        writeln!(self.writer, "{}", f.dim(&header))?;
        for year in years {
            let mut line = format!("  {year}");
            for count in trend_row(report, year) {
                line.push_str(&format!("  {count:>22}"));
            }
            writeln!(self.writer, "{line}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_charts(&mut self, report: &RiskReport) -> anyhow::Result<()> {
        let f = &self.formatter;
        for chart in &report.charts {
            writeln!(
                self.writer,
                "{} Chart written to {}",
                f.success(&f.emoji("✓", "[OK]")),
                chart.display()
            )?;
        }
        Ok(())
    }
}

/// Writer for `format`, targeting `output` when given and stdout otherwise.
///
/// Terminal output to a file is always plain.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
    formatting: FormattingConfig,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let Some(path) = output else {
        return Ok(match format {
            OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
            OutputFormat::Markdown => Box::new(MarkdownWriter::new(std::io::stdout())),
            OutputFormat::Terminal => Box::new(TerminalWriter::new(std::io::stdout(), formatting)),
        });
    };

    super::ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| Error::file_system(path, e))?;
    let file = BufWriter::new(file);
    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(file)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(file)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(file, FormattingConfig::plain())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EmissionRecord;
    use crate::pipeline::{run_pipeline, PipelineSettings};
    use std::path::PathBuf;

    fn sample_report() -> RiskReport {
        let output = run_pipeline(
            vec![
                EmissionRecord::new(0, 2022, "Acme", Some(10.0), Some(100.0), Some(50.0)),
                EmissionRecord::new(1, 2023, "Acme", Some(10.0), Some(80.0), Some(30.0)),
                EmissionRecord::new(2, 2023, "Beta", Some(10.0), Some(20.0), Some(5.0)),
            ],
            &PipelineSettings::default(),
        );
        RiskReport::build(PathBuf::from("emissions.csv"), &output, 0, None)
    }

    fn render(writer: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buffer = Vec::new();
        writer(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(1.23456), 2), "1.23");
        assert_eq!(format_optional(None, 2), "n/a");
    }

    #[test]
    fn test_json_writer_output_parses() {
        let report = sample_report();
        let text = render(|buf| JsonWriter::new(buf).write_report(&report));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["snapshot_year"], 2023);
        assert_eq!(value["snapshot"][0]["category"], "True Reducer");
        assert_eq!(value["snapshot"][1]["category"], "Other");
        assert_eq!(value["representatives"][0]["risk_category"], "True Reducer");
        assert!(value["representatives"][1]["scope1_delta"].is_null());
    }

    #[test]
    fn test_markdown_writer_sections() {
        let report = sample_report();
        let text = render(|buf| MarkdownWriter::new(buf).write_report(&report));
        assert!(text.starts_with("# Greenwashing Risk Report"));
        assert!(text.contains("## Snapshot 2023"));
        assert!(text.contains("| True Reducer | 1 | 50.0% |"));
        assert!(text.contains("## Trend 2005–2023"));
        assert!(text.contains("| 2023 | 1 | 0 | 0 | 1 |"));
    }

    #[test]
    fn test_plain_terminal_writer_has_no_escape_codes() {
        let report = sample_report();
        let text =
            render(|buf| TerminalWriter::new(buf, FormattingConfig::plain()).write_report(&report));
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("[STATS] Snapshot 2023 (2 entities"));
        assert!(text.contains("1. Acme - True Reducer"));
    }

    #[test]
    fn test_create_writer_to_file_creates_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("risk.md");
        let mut writer =
            create_writer(OutputFormat::Markdown, Some(&path), FormattingConfig::plain()).unwrap();
        writer.write_report(&sample_report()).unwrap();
        drop(writer);
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("Greenwashing Risk Report"));
    }
}
