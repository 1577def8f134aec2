use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

pub const READINGS_CSV: &str = "blood_pressure_data.csv";
pub const SUMMARY_TXT: &str = "blood_pressure_analysis_summary.txt";
pub const PRESSURE_OVER_TIME_SVG: &str = "blood_pressure_over_time.svg";
pub const PRESSURE_DISTRIBUTION_SVG: &str = "blood_pressure_distribution.svg";
pub const DECOMPOSITION_SVG: &str = "systolic_decomposition.svg";
pub const ROLLING_AVERAGE_SVG: &str = "blood_pressure_rolling_average.svg";
pub const PRESSURE_BY_HOUR_SVG: &str = "blood_pressure_by_hour.svg";
pub const HEATMAP_HTML: &str = "delhi_uber_heatmap.html";
pub const CLUSTER_MAP_HTML: &str = "delhi_uber_clusters.html";
pub const HOURLY_PICKUPS_SVG: &str = "hourly_pickups.svg";

/// Directory every artifact of a run is written into. Existing files are overwritten.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    pub fn create(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

/// Files written by a pipeline run, in the order they were produced.
#[derive(Debug, Clone, Default)]
pub struct OutputArtifacts {
    pub files: Vec<PathBuf>,
}

impl OutputArtifacts {
    pub fn record(&mut self, path: PathBuf, description: &str) {
        info!(path = %path.display(), "{description} saved");
        self.files.push(path);
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.files
            .iter()
            .any(|path| path.file_name().is_some_and(|name| name == file_name))
    }
}
