//! Artifact renderers. Each consumes finished data and writes exactly one file.

pub mod charts;
pub mod maps;

pub use charts::{
    render_bar_chart, render_decomposition_chart, render_distribution_chart, render_line_chart,
    DistributionSeries, LineChart, PlotSeries, XAxis, DIASTOLIC_COLOR, SKY_BLUE, SYSTOLIC_COLOR,
};
pub use maps::{render_cluster_map, render_heatmap, MapView};
