//! Pipeline phases for structured log context.
//!
//! Each phase opens a `tracing` span so events emitted inside it carry the
//! phase name, which makes `-vv` output readable when a run misbehaves.

use tracing::span::EnteredSpan;

/// Major stages of a greenrisk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    /// Reading the source table
    Loading,
    /// Deriving Scope 1 and Scope 3 intensities
    Intensity,
    /// Ordering records and computing year-over-year deltas
    Delta,
    /// Assigning risk categories
    Classification,
    /// Picking one snapshot record per entity
    Selection,
    /// Counting categories for snapshot and trend
    Aggregation,
    /// Writing reports and charts
    OutputGeneration,
}

impl PipelinePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Intensity => "intensity",
            Self::Delta => "delta",
            Self::Classification => "classification",
            Self::Selection => "selection",
            Self::Aggregation => "aggregation",
            Self::OutputGeneration => "output_generation",
        }
    }
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enter a span for `phase`; the span closes when the guard drops.
///
/// # Example
///
/// ```ignore
/// let _phase = phase_span(PipelinePhase::Delta);
/// // events logged here carry phase=delta
/// ```
#[must_use]
pub fn phase_span(phase: PipelinePhase) -> EnteredSpan {
    tracing::info_span!("phase", phase = phase.as_str()).entered()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display_uses_snake_case() {
        assert_eq!(PipelinePhase::OutputGeneration.to_string(), "output_generation");
        assert_eq!(PipelinePhase::Delta.to_string(), "delta");
    }

    #[test]
    fn test_phase_span_without_subscriber_is_harmless() {
        let guard = phase_span(PipelinePhase::Loading);
        drop(guard);
    }
}
