//! Statistical routines used by both pipelines.
//!
//! Correlation, rolling means and hourly aggregation are polars expressions.
//! Each routine documents its input contract and returns [`StatsError`] instead
//! of a placeholder value when the input is degenerate.

mod correlation;
mod decompose;
mod distribution;
mod hourly;
mod kmeans;
mod rolling;

pub use correlation::pearson;
pub use decompose::{seasonal_decompose, Decomposition};
pub use distribution::{gaussian_kde, histogram, HistogramBin};
pub use hourly::{hourly_counts, hourly_means, HOUR_COLUMN};
pub use kmeans::{kmeans, KMeansModel, KMeansParams};
pub use rolling::{rolling_column, with_rolling_means};

use polars::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("need at least {required} samples, got {actual}")]
    TooFewSamples { required: usize, actual: usize },

    #[error("{series} has zero variance")]
    ZeroVariance { series: String },

    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },

    #[error("rolling window must be at least 1")]
    ZeroWindow,

    #[error("seasonal period must be at least 1")]
    ZeroPeriod,

    #[error("cluster count must be at least 1")]
    ZeroClusters,

    #[error("cannot form {clusters} clusters from {points} points")]
    InsufficientPoints { points: usize, clusters: usize },
}

/// Numeric column as `f64`, failing on nulls.
pub fn float_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<f64>> {
    let casted = df.column(column)?.cast(&DataType::Float64)?;
    let values = casted.f64()?;
    if values.null_count() > 0 {
        return Err(PolarsError::ComputeError(
            format!("column '{column}' contains {} nulls", values.null_count()).into(),
        ));
    }
    Ok(values.into_no_null_iter().collect())
}

pub(crate) fn ensure_finite(values: &[f64]) -> Result<(), StatsError> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(StatsError::NonFinite { index }),
        None => Ok(()),
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
