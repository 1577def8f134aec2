//! Blood pressure pipeline: generate, persist, reload, analyze, render, summarize.

pub mod sample;
pub mod summary;

use chrono::NaiveDateTime;
use polars::prelude::*;
use pulsemap_records::{
    read_readings, readings_frame, timestamp_column, with_hour_column, write_readings,
};
use tracing::{info, warn};

use crate::config::VitalsConfig;
use crate::error::Result;
use crate::outputs::{
    OutputArtifacts, OutputDir, DECOMPOSITION_SVG, PRESSURE_BY_HOUR_SVG,
    PRESSURE_DISTRIBUTION_SVG, PRESSURE_OVER_TIME_SVG, READINGS_CSV, ROLLING_AVERAGE_SVG,
    SUMMARY_TXT,
};
use crate::render::{
    render_decomposition_chart, render_distribution_chart, render_line_chart,
    DistributionSeries, LineChart, PlotSeries, XAxis, DIASTOLIC_COLOR, SYSTOLIC_COLOR,
};
use crate::stats::{
    float_values, hourly_means, pearson, rolling_column, seasonal_decompose,
    with_rolling_means, Decomposition, HOUR_COLUMN,
};

pub use sample::sample_readings;
pub use summary::{format_summary, write_summary};

#[derive(Debug, Clone)]
pub struct VitalsReport {
    /// Reloaded readings with the rolling and hour columns attached.
    pub frame: DataFrame,
    pub correlation: f64,
    pub decomposition: Decomposition,
    pub hourly: DataFrame,
    pub summary: String,
    pub artifacts: OutputArtifacts,
}

pub fn run(config: &VitalsConfig, output: &OutputDir) -> Result<VitalsReport> {
    let mut artifacts = OutputArtifacts::default();

    let readings = sample_readings()?;
    let csv_path = output.path(READINGS_CSV);
    write_readings(&csv_path, &readings)?;
    info!(rows = readings.len(), "sample blood pressure table generated");
    artifacts.record(csv_path.clone(), "blood pressure data");

    let loaded = read_readings(&csv_path)?;
    let frame = readings_frame(&loaded)?;
    let timestamps = timestamp_column(&frame, "date_time")?;
    let systolic = float_values(&frame, "systolic")?;
    let diastolic = float_values(&frame, "diastolic")?;

    let x_axis = XAxis::timeline(&timestamps);
    let x_values = positions(&x_axis, &timestamps);

    let over_time_path = output.path(PRESSURE_OVER_TIME_SVG);
    render_line_chart(
        &over_time_path,
        &LineChart {
            title: "Blood Pressure Over Time",
            x_desc: "Date Time",
            y_desc: "Blood Pressure (mmHg)",
            x_axis,
            series: &[
                dense_series("Systolic", SYSTOLIC_COLOR, &x_values, &systolic),
                dense_series("Diastolic", DIASTOLIC_COLOR, &x_values, &diastolic),
            ],
        },
    )?;
    artifacts.record(over_time_path, "blood pressure line chart");

    let distribution_path = output.path(PRESSURE_DISTRIBUTION_SVG);
    render_distribution_chart(
        &distribution_path,
        "Distribution of Blood Pressure Readings",
        "Blood Pressure (mmHg)",
        &[
            DistributionSeries {
                label: "Systolic",
                color: SYSTOLIC_COLOR,
                values: &systolic,
            },
            DistributionSeries {
                label: "Diastolic",
                color: DIASTOLIC_COLOR,
                values: &diastolic,
            },
        ],
    )?;
    artifacts.record(distribution_path, "blood pressure distribution chart");

    let correlation = pearson(&frame, "systolic", "diastolic")?;
    info!(correlation, "correlation between systolic and diastolic pressure");

    if config.decomposition_period < 2 {
        warn!(
            period = config.decomposition_period,
            "seasonal decomposition period below 2 leaves the seasonal component at zero"
        );
    }
    let decomposition = seasonal_decompose(&systolic, config.decomposition_period)?;
    let decomposition_path = output.path(DECOMPOSITION_SVG);
    render_decomposition_chart(
        &decomposition_path,
        "Seasonal Decomposition of Systolic Blood Pressure",
        &x_values,
        x_axis,
        &decomposition,
    )?;
    artifacts.record(decomposition_path, "seasonal decomposition chart");

    let window = config.rolling_window;
    let frame = with_rolling_means(&frame, &["systolic", "diastolic"], window)?;
    let systolic_rolling = optional_values(&frame, &rolling_column("systolic"))?;
    let diastolic_rolling = optional_values(&frame, &rolling_column("diastolic"))?;

    let rolling_path = output.path(ROLLING_AVERAGE_SVG);
    render_line_chart(
        &rolling_path,
        &LineChart {
            title: &format!("{window}-Day Rolling Average of Blood Pressure"),
            x_desc: "Date Time",
            y_desc: "Blood Pressure (mmHg)",
            x_axis,
            series: &[
                PlotSeries::new(
                    format!("Systolic ({window}-day Avg)"),
                    SYSTOLIC_COLOR,
                    x_values.iter().copied().zip(systolic_rolling).collect(),
                ),
                PlotSeries::new(
                    format!("Diastolic ({window}-day Avg)"),
                    DIASTOLIC_COLOR,
                    x_values.iter().copied().zip(diastolic_rolling).collect(),
                ),
            ],
        },
    )?;
    artifacts.record(rolling_path, "rolling average chart");

    let frame = with_hour_column(&frame, "date_time")?;
    let hourly = hourly_means(&frame, &["systolic", "diastolic"])?;
    info!(buckets = hourly.height(), "hourly blood pressure averages computed");

    let hours: Vec<f64> = float_values(&hourly, HOUR_COLUMN)?;
    let hourly_systolic = float_values(&hourly, "systolic")?;
    let hourly_diastolic = float_values(&hourly, "diastolic")?;
    let by_hour_path = output.path(PRESSURE_BY_HOUR_SVG);
    render_line_chart(
        &by_hour_path,
        &LineChart {
            title: "Average Blood Pressure by Hour of Day",
            x_desc: "Hour of Day",
            y_desc: "Blood Pressure (mmHg)",
            x_axis: XAxis::HourOfDay,
            series: &[
                dense_series("Systolic", SYSTOLIC_COLOR, &hours, &hourly_systolic),
                dense_series("Diastolic", DIASTOLIC_COLOR, &hours, &hourly_diastolic),
            ],
        },
    )?;
    artifacts.record(by_hour_path, "hourly blood pressure chart");

    let summary = format_summary(correlation, window);
    let summary_path = output.path(SUMMARY_TXT);
    write_summary(&summary_path, &summary)?;
    artifacts.record(summary_path, "analysis summary");

    Ok(VitalsReport {
        frame,
        correlation,
        decomposition,
        hourly,
        summary,
        artifacts,
    })
}

fn positions(x_axis: &XAxis, timestamps: &[NaiveDateTime]) -> Vec<f64> {
    timestamps.iter().map(|ts| x_axis.position(*ts)).collect()
}

fn optional_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<f64>>> {
    Ok(df.column(column)?.f64()?.into_iter().collect())
}

fn dense_series(label: &str, color: plotters::style::RGBColor, x: &[f64], y: &[f64]) -> PlotSeries {
    PlotSeries::new(
        label,
        color,
        x.iter().copied().zip(y.iter().copied().map(Some)).collect(),
    )
}
