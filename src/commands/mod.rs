//! CLI command implementations for greenrisk.
//!
//! Available commands:
//! - **analyze**: classify an emissions table and report risk distribution
//! - **init**: write a default `.greenrisk.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, resolve_settings, AnalyzeConfig, ResolvedAnalysis};
pub use init::{init_config, write_default_config};
