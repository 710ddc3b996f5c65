// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod output;
pub mod pipeline;
pub mod risk;

// Re-export commonly used types
pub use crate::core::{
    CategoryCount, ClassifiedRecord, DeltaRecord, Deltas, EmissionRecord, IntensityRecord,
    TrendPoint,
};

pub use crate::errors::{Error, Result};

pub use crate::io::output::{create_writer, OutputWriter};

pub use crate::output::{render_charts, RiskReport};

pub use crate::pipeline::{run_pipeline, PipelineOutput, PipelineSettings};

pub use crate::risk::{CleanedCategory, RiskCategory, RiskClassifier};
