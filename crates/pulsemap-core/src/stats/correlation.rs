use polars::prelude::*;

use super::{ensure_finite, float_values, StatsError};
use crate::error::Result;

const CORRELATION: &str = "correlation";

/// Pearson correlation between two numeric columns of `df`.
///
/// Requires at least two rows, no nulls or non-finite values, and non-zero
/// variance in both columns.
pub fn pearson(df: &DataFrame, left: &str, right: &str) -> Result<f64> {
    if df.height() < 2 {
        return Err(StatsError::TooFewSamples {
            required: 2,
            actual: df.height(),
        }
        .into());
    }

    for name in [left, right] {
        let values = float_values(df, name)?;
        ensure_finite(&values)?;
        if values.iter().all(|value| *value == values[0]) {
            return Err(StatsError::ZeroVariance {
                series: name.to_string(),
            }
            .into());
        }
    }

    let out = df
        .clone()
        .lazy()
        .select([pearson_corr(
            col(left).cast(DataType::Float64),
            col(right).cast(DataType::Float64),
        )
        .alias(CORRELATION)])
        .collect()?;

    let r = out.column(CORRELATION)?.f64()?.get(0).ok_or_else(|| {
        PolarsError::ComputeError(format!("no correlation for '{left}' and '{right}'").into())
    })?;
    Ok(r.clamp(-1.0, 1.0))
}
