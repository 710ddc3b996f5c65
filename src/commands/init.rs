use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# greenrisk configuration

[columns]
year = "year"
parent_entity = "parent_entity"
production_value = "production_value"
operational_emissions = "total_operational_emissions_MtCO2e"
product_emissions = "product_emissions_MtCO2"
# Headers matching this regex are dropped before processing
unnamed_pattern = "Unnamed"

[classification]
# Scope 3 delta (MtCO2) strictly below this marks a flat-or-rising Scope 1 as offset-heavy
offset_threshold = -5.0

[analysis]
snapshot_year = 2023
trend_start_year = 2005

[output]
default_format = "terminal"
charts_dir = "."
"#;

/// Write the default config to `path` unless it exists and `force` is unset.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(path, DEFAULT_CONFIG)?;
    Ok(())
}

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}
