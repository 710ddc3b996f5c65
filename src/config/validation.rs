//! Validation with error accumulation for configuration.
//!
//! Each section is checked by its own rule returning a stillwater
//! [`Validation`]; the rules are combined so a user sees every problem in
//! their `.greenrisk.toml` in a single run.

use super::core::{ClassificationConfig, ColumnsConfig, GreenriskConfig, OutputConfig};
use crate::cli::OutputFormat;
use crate::errors::{Error, Result};
use clap::ValueEnum;
use stillwater::{NonEmptyVec, Validation};

/// Outcome of a config rule: success, or every message it produced.
pub type ConfigValidation = Validation<(), NonEmptyVec<String>>;

fn valid() -> ConfigValidation {
    Validation::Success(())
}

fn invalid(message: String) -> ConfigValidation {
    Validation::Failure(NonEmptyVec::new(message, Vec::new()))
}

fn from_messages(messages: Vec<String>) -> ConfigValidation {
    let mut messages = messages.into_iter();
    match messages.next() {
        Some(head) => Validation::Failure(NonEmptyVec::new(head, messages.collect())),
        None => valid(),
    }
}

/// Fold rule outcomes together, keeping every failure in order.
pub fn combine(validations: Vec<ConfigValidation>) -> ConfigValidation {
    let messages = validations
        .into_iter()
        .flat_map(|validation| match validation {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(messages) => messages.into_vec(),
        })
        .collect();
    from_messages(messages)
}

fn validate_classification(classification: Option<&ClassificationConfig>) -> ConfigValidation {
    let Some(classification) = classification else {
        return valid();
    };

    let threshold = classification.offset_threshold;
    if threshold.is_finite() && threshold <= 0.0 {
        valid()
    } else {
        invalid(format!(
            "classification.offset_threshold: must be a finite value <= 0 (got: {threshold})"
        ))
    }
}

fn validate_columns(columns: Option<&ColumnsConfig>) -> ConfigValidation {
    let Some(columns) = columns else {
        return valid();
    };

    let named = [
        ("columns.year", &columns.year),
        ("columns.parent_entity", &columns.parent_entity),
        ("columns.production_value", &columns.production_value),
        ("columns.operational_emissions", &columns.operational_emissions),
        ("columns.product_emissions", &columns.product_emissions),
    ];
    let mut messages: Vec<String> = named
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| format!("{field}: column name must not be empty"))
        .collect();

    if let Err(e) = regex::Regex::new(&columns.unnamed_pattern) {
        messages.push(format!("columns.unnamed_pattern: invalid regex ({e})"));
    }

    from_messages(messages)
}

fn validate_output(output: Option<&OutputConfig>) -> ConfigValidation {
    match output.and_then(|o| o.default_format.as_deref()) {
        Some(format) if OutputFormat::from_str(format, true).is_err() => invalid(format!(
            "output.default_format: unknown format '{format}' (expected: terminal, json, markdown)"
        )),
        _ => valid(),
    }
}

/// Run every rule against `config`, accumulating all failures (pure).
pub fn validate_config_rules(config: &GreenriskConfig) -> ConfigValidation {
    combine(vec![
        validate_classification(config.classification.as_ref()),
        validate_columns(config.columns.as_ref()),
        validate_output(config.output.as_ref()),
    ])
}

/// Validate `config`, joining all failures into one error.
pub fn validate_config(config: &GreenriskConfig) -> Result<()> {
    match validate_config_rules(config) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(messages) => {
            Err(Error::configuration(messages.into_vec().join("; ")))
        }
    }
}
