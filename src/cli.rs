use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "greenrisk")]
#[command(
    about = "Classify companies' emission trajectories into greenwashing risk categories",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze an emissions table and report greenwashing risk
    Analyze {
        /// CSV file or spreadsheet workbook to analyze
        path: PathBuf,

        /// Output format (defaults to the config file value, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the SVG charts
        #[arg(long = "charts-dir")]
        charts_dir: Option<PathBuf>,

        /// Skip chart rendering
        #[arg(long = "no-charts")]
        no_charts: bool,

        /// Year of the per-entity snapshot
        #[arg(long = "snapshot-year")]
        snapshot_year: Option<i32>,

        /// First year included in the trend
        #[arg(long = "trend-start")]
        trend_start: Option<i32>,

        /// Configuration file (skips discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// List only the first N snapshot representatives
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// Plain output (no colors, no emoji)
        #[arg(long)]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}
