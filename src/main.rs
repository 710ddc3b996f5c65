use anyhow::Result;
use clap::Parser;
use greenrisk::cli::{Cli, Commands};
use greenrisk::commands::AnalyzeConfig;
use greenrisk::formatting::{ColorMode, EmojiMode, FormattingConfig};
use greenrisk::observability::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            charts_dir,
            no_charts,
            snapshot_year,
            trend_start,
            config,
            top,
            plain,
            verbosity,
        } => {
            init_tracing(verbosity);
            greenrisk::commands::handle_analyze(AnalyzeConfig {
                path,
                format,
                output,
                charts_dir,
                no_charts,
                snapshot_year,
                trend_start,
                config,
                top,
                formatting_config: create_formatting_config(plain),
            })
        }
        Commands::Init { force } => {
            init_tracing(0);
            greenrisk::commands::init_config(force)
        }
    }
}

fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::new(ColorMode::Never, EmojiMode::Never)
    } else {
        FormattingConfig::from_env()
    }
}
