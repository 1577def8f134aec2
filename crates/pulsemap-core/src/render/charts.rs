use std::ops::Range;
use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use plotters::prelude::*;

use crate::error::{AnalysisError, Result};
use crate::stats::{gaussian_kde, histogram, Decomposition};

pub const SYSTOLIC_COLOR: RGBColor = BLUE;
pub const DIASTOLIC_COLOR: RGBColor = RED;
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);
const KDE_SAMPLES: usize = 200;

/// How x values are turned back into tick labels.
#[derive(Debug, Clone, Copy)]
pub enum XAxis {
    /// x is hours elapsed since `origin`.
    Timeline { origin: NaiveDateTime },
    HourOfDay,
}

impl XAxis {
    pub fn timeline(timestamps: &[NaiveDateTime]) -> Self {
        let origin = timestamps.iter().min().copied().unwrap_or_default();
        XAxis::Timeline { origin }
    }

    pub fn position(&self, timestamp: NaiveDateTime) -> f64 {
        match self {
            XAxis::Timeline { origin } => (timestamp - *origin).num_seconds() as f64 / 3600.0,
            XAxis::HourOfDay => {
                f64::from(chrono::Timelike::hour(&timestamp))
                    + f64::from(chrono::Timelike::minute(&timestamp)) / 60.0
            }
        }
    }

    fn label(&self, x: f64) -> String {
        match self {
            XAxis::Timeline { origin } => {
                let offset = Duration::seconds((x * 3600.0).round() as i64);
                (*origin + offset).format("%m-%d %H:%M").to_string()
            }
            XAxis::HourOfDay => format!("{:.0}", x),
        }
    }
}

/// One labelled line. `None` y values break the line.
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub label: String,
    pub color: RGBColor,
    pub points: Vec<(f64, Option<f64>)>,
}

impl PlotSeries {
    pub fn new(label: impl Into<String>, color: RGBColor, points: Vec<(f64, Option<f64>)>) -> Self {
        Self {
            label: label.into(),
            color,
            points,
        }
    }

    fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            match y {
                Some(y) => current.push((x, y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

#[derive(Debug, Clone)]
pub struct LineChart<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub x_axis: XAxis,
    pub series: &'a [PlotSeries],
}

pub fn render_line_chart(path: &Path, chart: &LineChart<'_>) -> Result<()> {
    let root = SVGBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|err| render_error(path, err))?;

    let x_range = padded_range(chart.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)));
    let y_range = padded_range(
        chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().filter_map(|p| p.1)),
    );

    let mut ctx = ChartBuilder::on(&root)
        .caption(chart.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|err| render_error(path, err))?;

    let x_axis = chart.x_axis;
    let x_formatter = move |x: &f64| x_axis.label(*x);
    ctx.configure_mesh()
        .x_desc(chart.x_desc)
        .y_desc(chart.y_desc)
        .x_label_formatter(&x_formatter)
        .draw()
        .map_err(|err| render_error(path, err))?;

    for series in chart.series {
        let color = series.color;
        let mut segments = series.segments().into_iter();
        let Some(first) = segments.next() else {
            continue;
        };
        ctx.draw_series(LineSeries::new(first, color.stroke_width(2)))
            .map_err(|err| render_error(path, err))?
            .label(series.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        for segment in segments {
            ctx.draw_series(LineSeries::new(segment, color.stroke_width(2)))
                .map_err(|err| render_error(path, err))?;
        }
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|err| render_error(path, err))?;

    root.present().map_err(|err| render_error(path, err))?;
    Ok(())
}

/// Values whose distribution is drawn as a histogram with a density curve.
#[derive(Debug, Clone)]
pub struct DistributionSeries<'a> {
    pub label: &'a str,
    pub color: RGBColor,
    pub values: &'a [f64],
}

pub fn render_distribution_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    groups: &[DistributionSeries<'_>],
) -> Result<()> {
    struct Prepared {
        label: String,
        color: RGBColor,
        bins: Vec<crate::stats::HistogramBin>,
        curve: Vec<(f64, f64)>,
    }

    let mut prepared = Vec::with_capacity(groups.len());
    for group in groups {
        let bins = histogram(group.values, None)?;
        let low = bins.first().map(|bin| bin.start).unwrap_or(0.0);
        let high = bins.last().map(|bin| bin.end).unwrap_or(1.0);
        let width = bins.first().map(|bin| bin.end - bin.start).unwrap_or(1.0);

        let grid: Vec<f64> = (0..KDE_SAMPLES)
            .map(|idx| low + (high - low) * idx as f64 / (KDE_SAMPLES - 1) as f64)
            .collect();
        // Scale density to counts so the curve overlays the bars.
        let curve = match gaussian_kde(group.values, &grid) {
            Ok(density) => grid
                .iter()
                .zip(density)
                .map(|(x, d)| (*x, d * group.values.len() as f64 * width))
                .collect(),
            Err(err) => {
                tracing::warn!(series = group.label, error = %err, "skipping density curve");
                Vec::new()
            }
        };

        prepared.push(Prepared {
            label: group.label.to_string(),
            color: group.color,
            bins,
            curve,
        });
    }

    let x_range = padded_range(
        prepared
            .iter()
            .flat_map(|p| p.bins.iter().flat_map(|bin| [bin.start, bin.end])),
    );
    let y_max = prepared
        .iter()
        .flat_map(|p| {
            p.bins
                .iter()
                .map(|bin| bin.count as f64)
                .chain(p.curve.iter().map(|point| point.1))
        })
        .fold(1.0, f64::max);

    let root = SVGBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(|err| render_error(path, err))?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0.0..y_max * 1.1)
        .map_err(|err| render_error(path, err))?;

    ctx.configure_mesh()
        .x_desc(x_desc)
        .y_desc("Count")
        .draw()
        .map_err(|err| render_error(path, err))?;

    for group in &prepared {
        let color = group.color;
        ctx.draw_series(group.bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                color.mix(0.4).filled(),
            )
        }))
        .map_err(|err| render_error(path, err))?
        .label(group.label.clone())
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.mix(0.4).filled()));

        if !group.curve.is_empty() {
            ctx.draw_series(LineSeries::new(
                group.curve.iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(|err| render_error(path, err))?;
        }
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|err| render_error(path, err))?;

    root.present().map_err(|err| render_error(path, err))?;
    Ok(())
}

/// Four stacked panels: observed, trend, seasonal, residual.
pub fn render_decomposition_chart(
    path: &Path,
    title: &str,
    x_values: &[f64],
    x_axis: XAxis,
    decomposition: &Decomposition,
) -> Result<()> {
    let panels: [(&str, Vec<Option<f64>>); 4] = [
        (
            "Observed",
            decomposition.observed.iter().copied().map(Some).collect(),
        ),
        ("Trend", decomposition.trend.clone()),
        (
            "Seasonal",
            decomposition.seasonal.iter().copied().map(Some).collect(),
        ),
        ("Residual", decomposition.residual.clone()),
    ];

    let root = SVGBackend::new(path, (1000, 900)).into_drawing_area();
    root.fill(&WHITE).map_err(|err| render_error(path, err))?;
    let body = root
        .titled(title, CAPTION_FONT)
        .map_err(|err| render_error(path, err))?;
    let areas = body.split_evenly((4, 1));

    let x_range = padded_range(x_values.iter().copied());
    let x_formatter = move |x: &f64| x_axis.label(*x);

    for (area, (name, values)) in areas.iter().zip(panels) {
        let series = PlotSeries::new(
            name,
            SYSTOLIC_COLOR,
            x_values.iter().copied().zip(values).collect(),
        );
        let y_range = padded_range(series.points.iter().filter_map(|p| p.1));

        let mut ctx = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), y_range)
            .map_err(|err| render_error(path, err))?;

        ctx.configure_mesh()
            .y_desc(name)
            .x_label_formatter(&x_formatter)
            .draw()
            .map_err(|err| render_error(path, err))?;

        for segment in series.segments() {
            ctx.draw_series(LineSeries::new(segment, series.color.stroke_width(1)))
                .map_err(|err| render_error(path, err))?;
        }
    }

    root.present().map_err(|err| render_error(path, err))?;
    Ok(())
}

/// Vertical bars keyed by hour of day.
pub fn render_bar_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    bars: &[(i32, f64)],
    color: RGBColor,
) -> Result<()> {
    let x_low = bars.iter().map(|bar| bar.0).min().unwrap_or(0);
    let x_high = bars.iter().map(|bar| bar.0).max().unwrap_or(0);
    let y_max = bars.iter().map(|bar| bar.1).fold(1.0, f64::max);

    let root = SVGBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(|err| render_error(path, err))?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (f64::from(x_low) - 0.5)..(f64::from(x_high) + 0.5),
            0.0..y_max * 1.1,
        )
        .map_err(|err| render_error(path, err))?;

    let x_formatter = |x: &f64| format!("{:.0}", x);
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels((x_high - x_low + 1).clamp(1, 24) as usize)
        .x_label_formatter(&x_formatter)
        .draw()
        .map_err(|err| render_error(path, err))?;

    ctx.draw_series(bars.iter().map(|&(hour, value)| {
        let center = f64::from(hour);
        Rectangle::new([(center - 0.4, 0.0), (center + 0.4, value)], color.filled())
    }))
    .map_err(|err| render_error(path, err))?;

    root.present().map_err(|err| render_error(path, err))?;
    Ok(())
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

fn render_error(path: &Path, err: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Render {
        artifact: path.display().to_string(),
        message: err.to_string(),
    }
}
