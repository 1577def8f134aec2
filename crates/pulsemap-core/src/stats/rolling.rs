use polars::prelude::*;

use super::StatsError;
use crate::error::Result;

/// Name of the column holding the rolling mean of `column`.
pub fn rolling_column(column: &str) -> String {
    format!("{column}_rolling")
}

/// Append a trailing `window`-row mean of each of `columns` as `<column>_rolling`.
///
/// Rows before the first full window are null.
pub fn with_rolling_means(df: &DataFrame, columns: &[&str], window: usize) -> Result<DataFrame> {
    if window == 0 {
        return Err(StatsError::ZeroWindow.into());
    }

    let options = RollingOptionsFixedWindow {
        window_size: window,
        min_periods: window,
        ..Default::default()
    };
    let rolled: Vec<Expr> = columns
        .iter()
        .map(|name| {
            col(*name)
                .cast(DataType::Float64)
                .rolling_mean(options.clone())
                .alias(rolling_column(name))
        })
        .collect();

    Ok(df.clone().lazy().with_columns(rolled).collect()?)
}
