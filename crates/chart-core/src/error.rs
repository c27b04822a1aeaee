// File: crates/chart-core/src/error.rs
// Summary: Typed errors for view-model validation and I/O-facing operations.
// Notes:
// - Rendering never returns these; invalid rows are skipped and logged instead.

use thiserror::Error;

use crate::types::EntityId;

/// A view-model row that breaks one of its invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("{entity}: field `{field}` is not a finite number")]
    NonFinite { entity: EntityId, field: &'static str },

    #[error("{entity}: quartiles out of order ({detail})")]
    QuartileOrder { entity: EntityId, detail: String },

    #[error("{entity}: mean {mean} outside [{min}, {max}]")]
    MeanOutOfRange { entity: EntityId, mean: f64, min: f64, max: f64 },

    #[error("{entity}: sample x values must be strictly increasing (index {index})")]
    NonIncreasingX { entity: EntityId, index: usize },

    #[error("{entity}: negative density {y} at index {index}")]
    NegativeDensity { entity: EntityId, index: usize, y: f64 },

    #[error("{entity}: interval low {low} exceeds high {high}")]
    InvertedInterval { entity: EntityId, low: f64, high: f64 },

    #[error("{entity}: interval [{low}, {high}] outside x-domain [{min}, {max}]")]
    IntervalOutsideDomain { entity: EntityId, low: f64, high: f64, min: f64, max: f64 },

    #[error("{entity}: count {count} must be a non-negative number")]
    NegativeCount { entity: EntityId, count: f64 },

    #[error("{entity}: too few samples ({count})")]
    TooFewSamples { entity: EntityId, count: usize },
}

/// Errors from parsing inputs, loading options and exporting scenes.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    Model(#[from] ModelError),

    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
