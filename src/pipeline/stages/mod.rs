//! Pure transformation stages of the risk pipeline.
//!
//! Stages are ordered: intensity, delta, classify, selection, aggregation.
//! None of them perform I/O.

pub mod aggregation;
pub mod classify;
pub mod delta;
pub mod intensity;
pub mod selection;
