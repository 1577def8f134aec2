use polars::prelude::*;

pub const HOUR_COLUMN: &str = "hour";

/// Mean of each of `columns` per hour of day, ordered by hour.
///
/// Expects the frame to carry an `hour` column (see `with_hour_column`).
pub fn hourly_means(df: &DataFrame, columns: &[&str]) -> PolarsResult<DataFrame> {
    let aggregations: Vec<Expr> = columns
        .iter()
        .map(|name| col(*name).cast(DataType::Float64).mean().alias(*name))
        .collect();

    df.clone()
        .lazy()
        .group_by([col(HOUR_COLUMN)])
        .agg(aggregations)
        .sort([HOUR_COLUMN], SortMultipleOptions::default())
        .collect()
}

/// Number of rows per hour of day as a `count` column, ordered by hour.
pub fn hourly_counts(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .group_by([col(HOUR_COLUMN)])
        .agg([len().cast(DataType::Int64).alias("count")])
        .sort([HOUR_COLUMN], SortMultipleOptions::default())
        .collect()
}
