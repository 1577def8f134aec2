//! Pickup pipeline: generate, normalize, cluster into hotspots, render.

pub mod generator;

use chrono::NaiveDateTime;
use polars::prelude::*;
use pulsemap_records::{normalize_pickups, pickups_frame, with_hour_column, PickupEvent};
use tracing::info;

use crate::config::MobilityConfig;
use crate::error::Result;
use crate::outputs::{
    OutputArtifacts, OutputDir, CLUSTER_MAP_HTML, HEATMAP_HTML, HOURLY_PICKUPS_SVG,
};
use crate::render::{render_bar_chart, render_cluster_map, render_heatmap, MapView, SKY_BLUE};
use crate::stats::{float_values, hourly_counts, kmeans, KMeansModel, KMeansParams, HOUR_COLUMN};

pub use generator::{generate_pickups, pickup_rng, SEED_LOCATIONS};

#[derive(Debug, Clone)]
pub struct MobilityReport {
    pub events: Vec<PickupEvent>,
    /// Pickups with `cluster` and `hour` columns.
    pub frame: DataFrame,
    pub model: KMeansModel<2>,
    pub hourly: DataFrame,
    pub artifacts: OutputArtifacts,
}

pub fn run(config: &MobilityConfig, output: &OutputDir, now: NaiveDateTime) -> Result<MobilityReport> {
    let mut artifacts = OutputArtifacts::default();

    let mut rng = pickup_rng(config.seed);
    let records = generate_pickups(config.records, now, &mut rng);
    info!(records = records.len(), "synthetic pickups generated");

    let mut events = normalize_pickups(&records)?;
    let points: Vec<[f64; 2]> = events.iter().map(PickupEvent::coordinates).collect();

    let params = KMeansParams {
        clusters: config.clusters,
        max_iterations: config.max_iterations,
        tolerance: config.tolerance,
        seed: config.seed,
    };
    let model = kmeans(&points, &params)?;
    for (event, &label) in events.iter_mut().zip(&model.labels) {
        event.cluster = Some(label);
    }
    info!(
        centers = ?model.centers,
        iterations = model.iterations,
        inertia = model.inertia,
        "cluster centers (hotspots)"
    );

    let frame = with_hour_column(&pickups_frame(&events)?, "pickup_time")?;
    let hourly = hourly_counts(&frame)?;

    let view = MapView {
        center: config.map_center,
        zoom: config.zoom,
    };

    let heatmap_path = output.path(HEATMAP_HTML);
    render_heatmap(&heatmap_path, view, &points)?;
    artifacts.record(heatmap_path, "pickup heatmap");

    let cluster_path = output.path(CLUSTER_MAP_HTML);
    render_cluster_map(&cluster_path, view, &points, &model.centers)?;
    artifacts.record(cluster_path, "cluster map");

    let hours = float_values(&hourly, HOUR_COLUMN)?;
    let counts = float_values(&hourly, "count")?;
    let bars: Vec<(i32, f64)> = hours
        .iter()
        .zip(&counts)
        .map(|(&hour, &count)| (hour as i32, count))
        .collect();
    let bar_path = output.path(HOURLY_PICKUPS_SVG);
    render_bar_chart(
        &bar_path,
        "Hourly Pickup Distribution in Delhi",
        "Hour of the Day",
        "Number of Pickups",
        &bars,
        SKY_BLUE,
    )?;
    artifacts.record(bar_path, "hourly pickup distribution");

    Ok(MobilityReport {
        events,
        frame,
        model,
        hourly,
        artifacts,
    })
}
