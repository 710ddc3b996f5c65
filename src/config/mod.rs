//! Configuration loaded from `.greenrisk.toml`.
//!
//! Every section is optional; accessors on [`GreenriskConfig`] fall back to
//! defaults so callers never deal with `Option` sections directly.

mod core;
mod loader;
pub mod validation;

pub use self::core::{
    AnalysisSettings, ClassificationConfig, ColumnsConfig, GreenriskConfig, OutputConfig,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use validation::{validate_config, validate_config_rules, ConfigValidation};
