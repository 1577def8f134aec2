use chrono::{DateTime, NaiveDateTime, Timelike};
use polars::prelude::*;

use crate::model::{PickupEvent, Reading};

/// Build the indexed readings table. Rows are ordered by `date_time`.
pub fn readings_frame(readings: &[Reading]) -> PolarsResult<DataFrame> {
    let mut ordered: Vec<&Reading> = readings.iter().collect();
    ordered.sort_by_key(|reading| reading.date_time);

    let timestamps: Vec<i64> = ordered
        .iter()
        .map(|reading| reading.date_time.and_utc().timestamp_micros())
        .collect();
    let ts_series = Series::new("date_time".into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

    let int_column = |name: &str, select: fn(&Reading) -> u32| -> Column {
        let values: Vec<i64> = ordered
            .iter()
            .map(|reading| i64::from(select(reading)))
            .collect();
        Series::new(name.into(), values).into()
    };

    let activity: Vec<&str> = ordered
        .iter()
        .map(|reading| reading.activity.as_str())
        .collect();

    DataFrame::new(vec![
        ts_series.into(),
        int_column("systolic", |r| r.systolic),
        int_column("diastolic", |r| r.diastolic),
        int_column("heart_rate", |r| r.heart_rate),
        int_column("age", |r| r.age),
        Series::new("activity".into(), activity).into(),
    ])
}

pub fn pickups_frame(events: &[PickupEvent]) -> PolarsResult<DataFrame> {
    let timestamps: Vec<i64> = events
        .iter()
        .map(|event| event.pickup_time.and_utc().timestamp_micros())
        .collect();
    let ts_series = Series::new("pickup_time".into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

    let latitude: Vec<f64> = events.iter().map(|event| event.latitude).collect();
    let longitude: Vec<f64> = events.iter().map(|event| event.longitude).collect();
    let cluster: Vec<Option<i64>> = events
        .iter()
        .map(|event| event.cluster.map(|id| id as i64))
        .collect();

    DataFrame::new(vec![
        ts_series.into(),
        Series::new("latitude".into(), latitude).into(),
        Series::new("longitude".into(), longitude).into(),
        Series::new("cluster".into(), cluster).into(),
    ])
}

/// Read a datetime column back into naive timestamps.
pub fn timestamp_column(df: &DataFrame, column: &str) -> PolarsResult<Vec<NaiveDateTime>> {
    let values = df.column(column)?.datetime()?;
    let mut timestamps = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let micros = values.get(idx).ok_or_else(|| {
            PolarsError::ComputeError(format!("column '{column}' has a null at row {idx}").into())
        })?;
        let timestamp = DateTime::from_timestamp_micros(micros)
            .ok_or_else(|| {
                PolarsError::ComputeError(
                    format!("column '{column}' holds out-of-range value {micros}").into(),
                )
            })?
            .naive_utc();
        timestamps.push(timestamp);
    }
    Ok(timestamps)
}

/// Append an `hour` column (hour of day, 0-23) derived from `ts_column`.
pub fn with_hour_column(df: &DataFrame, ts_column: &str) -> PolarsResult<DataFrame> {
    let hours: Vec<i32> = timestamp_column(df, ts_column)?
        .iter()
        .map(|ts| ts.hour() as i32)
        .collect();

    let mut output = df.clone();
    output.hstack_mut(&mut [Series::new("hour".into(), hours).into()])?;
    Ok(output)
}
